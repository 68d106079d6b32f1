use core::fmt;
use std::rc::Rc;

/// Unevaluated expression text.
///
/// Expressions are evaluated lazily by the evaluator and re-rendered by the
/// code generator, so the statement model keeps them as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression(String);

impl Expression {
    pub fn new(text: impl Into<String>) -> Self {
        Expression(text.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One statement with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// 1-based source line.
    pub line: usize,
    /// Trimmed source text of the statement's first line.
    pub text: String,
    pub kind: StatementKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// `set x = e`, `let x = e`, `set x = map f over items`.
    Assign { target: String, value: AssignValue },
    /// `print a, b`; no arguments prints an empty line.
    Print { args: Vec<Expression> },
    /// `say e`
    Say { message: Expression },
    /// `ask "question" into answer`
    Ask {
        prompt: Expression,
        target: Option<String>,
    },
    /// `add a and b into c`, `multiply a and b into c`
    Arithmetic {
        op: ArithmeticOp,
        left: Expression,
        right: Expression,
        target: Option<String>,
    },
    /// `length of e`, `uppercase e`, `sqrt of e`, ...
    StringOp {
        op: StringOpKind,
        operand: Expression,
        target: Option<String>,
    },
    /// `random between a and b into roll`
    RandomBetween {
        low: Expression,
        high: Expression,
        target: Option<String>,
    },
    /// `choose from "a", "b" into pick`
    ChooseFrom {
        options: Vec<Expression>,
        target: Option<String>,
    },
    TimerStart,
    TimerStop,
    /// `wait 2 seconds`. Never pauses.
    Wait { duration: String },
    FunctionDef(Rc<FunctionDef>),
    /// `return` or `return e`
    Return { value: Option<Expression> },
    /// `call f` or `call f(a, b)`
    Call { name: String, args: Vec<Expression> },
    Conditional {
        branches: Vec<Branch>,
        default: Option<Vec<Statement>>,
    },
    /// `repeat n times { ... }`
    Repeat {
        count: Expression,
        body: Vec<Statement>,
    },
    /// Anything unrecognized. Reported, never executed.
    Raw,
}

/// Right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignValue {
    Expr(Expression),
    /// Apply a closure to every element of a list.
    Map {
        function: Expression,
        list: Expression,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Multiply,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StringOpKind {
    Length,
    Uppercase,
    Lowercase,
    Reverse,
    Square,
    SquareRoot,
}

/// One `if` / `else if` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: Expression,
    pub body: Vec<Statement>,
}

/// A user-defined function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// `None` for `function anonymous (x) { ... }`.
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Vec<Statement>,
}

impl Statement {
    /// The variable this statement binds, if any.
    pub fn binding_target(&self) -> Option<&str> {
        match &self.kind {
            StatementKind::Assign { target, .. } => Some(target),
            StatementKind::Ask { target, .. }
            | StatementKind::Arithmetic { target, .. }
            | StatementKind::StringOp { target, .. }
            | StatementKind::RandomBetween { target, .. }
            | StatementKind::ChooseFrom { target, .. } => target.as_deref(),
            _ => None,
        }
    }
}
