//! Expressions rendered as JavaScript.

use crate::expression::{self, BinaryOp, BoolOp, ComparisonOp, Expr, Literal, UnaryOp};

/// Binding strength, loosest first. Mirrors the Jam grammar, so parentheses
/// are only added where the JavaScript reading would differ.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    Or,
    And,
    Not,
    Comparison,
    Sum,
    Product,
    Negation,
    Atom,
}

impl Precedence {
    fn of(expr: &Expr) -> Self {
        match expr {
            Expr::Literal(_) | Expr::Ident(_) | Expr::List(_) => Precedence::Atom,
            Expr::Unary { op: UnaryOp::Neg, .. } => Precedence::Negation,
            Expr::Unary { op: UnaryOp::Not, .. } => Precedence::Not,
            Expr::Binary {
                op: BinaryOp::Add | BinaryOp::Sub,
                ..
            } => Precedence::Sum,
            Expr::Binary { .. } => Precedence::Product,
            Expr::Comparison { .. } => Precedence::Comparison,
            Expr::Boolean { op: BoolOp::And, .. } => Precedence::And,
            Expr::Boolean { op: BoolOp::Or, .. } => Precedence::Or,
        }
    }

    fn tighter(self) -> Self {
        match self {
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::Not,
            Precedence::Not => Precedence::Comparison,
            Precedence::Comparison => Precedence::Sum,
            Precedence::Sum => Precedence::Product,
            Precedence::Product => Precedence::Negation,
            Precedence::Negation | Precedence::Atom => Precedence::Atom,
        }
    }
}

/// Render Jam expression text as JavaScript.
///
/// Text outside the expression grammar (arrow functions, for one) is kept
/// as written.
pub fn render_expression(text: &str) -> String {
    match expression::parse(text) {
        Ok(expr) => render_expr(&expr),
        Err(_) => text.trim().to_string(),
    }
}

/// Render expression text for a position that binds at least as tightly
/// as `min`, adding parentheses when needed.
pub(crate) fn operand(text: &str, min: Precedence) -> String {
    match expression::parse(text) {
        Ok(expr) => wrap(&expr, min),
        Err(_) if min == Precedence::Or => text.trim().to_string(),
        Err(_) => format!("({})", text.trim()),
    }
}

pub fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::Literal(literal) => render_literal(literal),
        Expr::Ident(name) => name.clone(),
        Expr::List(items) => format!(
            "[{}]",
            items.iter().map(render_expr).collect::<Vec<_>>().join(", ")
        ),
        Expr::Unary { op, expr: inner } => {
            let symbol = match op {
                UnaryOp::Neg => "-",
                UnaryOp::Not => "!",
            };
            format!("{}{}", symbol, wrap(inner, Precedence::Atom))
        }
        Expr::Binary { op, left, right } => {
            let own = Precedence::of(expr);
            infix(left, own, op.symbol(), right, own.tighter())
        }
        // `===` and `<` do not share a level in JavaScript.
        Expr::Comparison { op, left, right } => {
            let operands = Precedence::Comparison.tighter();
            infix(left, operands, comparison_symbol(*op), right, operands)
        }
        Expr::Boolean { op, left, right } => {
            let own = Precedence::of(expr);
            let symbol = match op {
                BoolOp::And => "&&",
                BoolOp::Or => "||",
            };
            infix(left, own, symbol, right, own.tighter())
        }
    }
}

fn infix(left: &Expr, left_min: Precedence, symbol: &str, right: &Expr, right_min: Precedence) -> String {
    format!("{} {} {}", wrap(left, left_min), symbol, wrap(right, right_min))
}

fn wrap(expr: &Expr, min: Precedence) -> String {
    if Precedence::of(expr) < min {
        format!("({})", render_expr(expr))
    } else {
        render_expr(expr)
    }
}

fn comparison_symbol(op: ComparisonOp) -> &'static str {
    match op {
        ComparisonOp::Eq => "===",
        ComparisonOp::Neq => "!==",
        ComparisonOp::Lt => "<",
        ComparisonOp::Le => "<=",
        ComparisonOp::Gt => ">",
        ComparisonOp::Ge => ">=",
    }
}

fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::Int(value) => value.to_string(),
        Literal::Float(value) => format!("{:?}", value),
        Literal::Bool(value) => value.to_string(),
        Literal::Str(text) => string_literal(text),
    }
}

/// Double-quoted JavaScript string literal.
pub(crate) fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
