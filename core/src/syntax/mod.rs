//! Front end: block splitting and the statement model shared by the
//! evaluator and the code generator.

mod block;
mod builder;
mod error;
mod head;
mod statement;

pub use block::{SourceLine, source_lines, split};
pub use builder::{Program, build};
pub use error::SyntaxError;
pub use head::{Keyword, STATEMENT_WORDS, classify, first_word};
pub use statement::{
    ArithmeticOp, AssignValue, Branch, Expression, FunctionDef, Statement, StatementKind,
    StringOpKind,
};
