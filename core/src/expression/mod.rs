//! Expression layer: literal recognizers, the closed arithmetic/comparison
//! grammar and its evaluator.

mod error;
mod eval;
mod operators;
mod parsed_expr;
mod parser;
pub(crate) mod scan;

pub use error::EvalError;
pub use eval::{apply_closure, eval_expr, evaluate, parse_arrow};
pub(crate) use operators::eval_binary;
pub use parsed_expr::{BinaryOp, BoolOp, ComparisonOp, Expr, Literal, UnaryOp};
pub use parser::parse;

#[cfg(test)]
mod eval_test;
