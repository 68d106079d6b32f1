use lazy_static::lazy_static;
use pest::Parser;
use pest::error::ErrorVariant;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;
use tracing::trace;

use super::error::EvalError;
use super::parsed_expr::{BinaryOp, BoolOp, ComparisonOp, Expr, Literal, UnaryOp};

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        // (lowest precedence)
        // Logical operators.
        .op(Op::infix(Rule::or, Assoc::Left))            // `or`
        .op(Op::infix(Rule::and, Assoc::Left))           // `and`
        .op(Op::prefix(Rule::not))                       // `not`

        // Comparison operators.
        .op(
            Op::infix(Rule::eq, Assoc::Left) |
            Op::infix(Rule::neq, Assoc::Left) |
            Op::infix(Rule::lt, Assoc::Left) |
            Op::infix(Rule::le, Assoc::Left) |
            Op::infix(Rule::gt, Assoc::Left) |
            Op::infix(Rule::ge, Assoc::Left)
        )                                               // `==`, `!=`, `<`, `<=`, `>`, `>=`

        // Arithmetic operators.
        .op(
            Op::infix(Rule::add, Assoc::Left) |
            Op::infix(Rule::sub, Assoc::Left)
        )                                               // `+`, `-`
        .op(
            Op::infix(Rule::mul, Assoc::Left) |
            Op::infix(Rule::div, Assoc::Left)
        )                                               // `*`, `/`
        .op(Op::prefix(Rule::neg))                       // `-`
        // (highest precedence)
        ;
}

#[derive(Parser)]
#[grammar = "expression/expression.pest"]
pub struct ExpressionParser;

fn parse_expr(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    match pair.as_rule() {
        Rule::main => match pair.clone().into_inner().next() {
            Some(inner) => parse_expr(inner),
            None => Err(EvalError::unresolved(pair.as_str())),
        },

        Rule::expression => PRATT_PARSER
            .map_primary(|primary| parse_expr(primary))
            .map_prefix(|op, rhs| {
                let op = match op.as_rule() {
                    Rule::neg => UnaryOp::Neg,
                    Rule::not => UnaryOp::Not,
                    _ => return Err(EvalError::unresolved(op.as_str())),
                };
                Ok(Expr::Unary {
                    op,
                    expr: Box::new(rhs?),
                })
            })
            .map_infix(|lhs, op, rhs| {
                let (left, right) = (Box::new(lhs?), Box::new(rhs?));
                let binary = |op| Expr::Binary {
                    op,
                    left: left.clone(),
                    right: right.clone(),
                };
                let comparison = |op| Expr::Comparison {
                    op,
                    left: left.clone(),
                    right: right.clone(),
                };
                let boolean = |op| Expr::Boolean {
                    op,
                    left: left.clone(),
                    right: right.clone(),
                };
                Ok(match op.as_rule() {
                    Rule::add => binary(BinaryOp::Add),
                    Rule::sub => binary(BinaryOp::Sub),
                    Rule::mul => binary(BinaryOp::Mul),
                    Rule::div => binary(BinaryOp::Div),
                    Rule::eq => comparison(ComparisonOp::Eq),
                    Rule::neq => comparison(ComparisonOp::Neq),
                    Rule::lt => comparison(ComparisonOp::Lt),
                    Rule::le => comparison(ComparisonOp::Le),
                    Rule::gt => comparison(ComparisonOp::Gt),
                    Rule::ge => comparison(ComparisonOp::Ge),
                    Rule::and => boolean(BoolOp::And),
                    Rule::or => boolean(BoolOp::Or),
                    _ => return Err(EvalError::unresolved(op.as_str())),
                })
            })
            .parse(pair.into_inner()),

        Rule::array => {
            let items = pair
                .into_inner()
                .map(parse_expr)
                .collect::<Result<_, _>>()?;
            Ok(Expr::List(items))
        }

        Rule::integer => {
            let value = pair
                .as_str()
                .parse()
                .map_err(|_| EvalError::unresolved(pair.as_str()))?;
            Ok(Expr::Literal(Literal::Int(value)))
        }

        Rule::float => {
            let value = pair
                .as_str()
                .parse()
                .map_err(|_| EvalError::unresolved(pair.as_str()))?;
            Ok(Expr::Literal(Literal::Float(value)))
        }

        Rule::boolean => Ok(Expr::Literal(Literal::Bool(pair.as_str() == "true"))),

        Rule::string => {
            let s = pair.as_str();
            let inner = &s[1..s.len() - 1];
            Ok(Expr::Literal(Literal::Str(inner.to_string())))
        }

        Rule::grouped => match pair.clone().into_inner().next() {
            Some(inner) => parse_expr(inner),
            None => Err(EvalError::unresolved(pair.as_str())),
        },

        Rule::ident => Ok(Expr::Ident(pair.as_str().to_string())),

        _ => Err(EvalError::unresolved(pair.as_str())),
    }
}

/// Parse expression text with the closed arithmetic / comparison grammar.
///
/// Anything the grammar does not accept is reported as
/// [`EvalError::Unresolved`] carrying the whole input. Nesting too deep for
/// pest's stack guard is [`EvalError::TooDeep`].
pub fn parse(source: &str) -> Result<Expr, EvalError> {
    let source = source.trim();
    let mut pairs = ExpressionParser::parse(Rule::main, source).map_err(|err| {
        trace!(source, %err, "expression rejected by grammar");
        match err.variant {
            // pest gives up before the thread stack runs out.
            ErrorVariant::CustomError { message } if message.ends_with("limit reached") => {
                EvalError::TooDeep
            }
            _ => EvalError::unresolved(source),
        }
    })?;
    match pairs.next() {
        Some(pair) => parse_expr(pair),
        None => Err(EvalError::unresolved(source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(value: i64) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::Int(value)))
    }

    fn ident(name: &str) -> Box<Expr> {
        Box::new(Expr::Ident(name.to_string()))
    }

    #[test]
    fn test_simple_binary_expr() {
        assert_eq!(
            parse("1 + 2").unwrap(),
            Expr::Binary {
                op: BinaryOp::Add,
                left: int(1),
                right: int(2),
            }
        );
    }

    #[test]
    fn test_comparison_expr() {
        assert_eq!(
            parse("x > 3").unwrap(),
            Expr::Comparison {
                op: ComparisonOp::Gt,
                left: ident("x"),
                right: int(3),
            }
        );
        assert_eq!(
            parse("x<=3").unwrap(),
            Expr::Comparison {
                op: ComparisonOp::Le,
                left: ident("x"),
                right: int(3),
            }
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse("2.5").unwrap(), Expr::Literal(Literal::Float(2.5)));
        assert_eq!(parse("true").unwrap(), Expr::Literal(Literal::Bool(true)));
        assert_eq!(
            parse("'hi there'").unwrap(),
            Expr::Literal(Literal::Str("hi there".to_string()))
        );
        assert_eq!(
            parse("\"a\"").unwrap(),
            Expr::Literal(Literal::Str("a".to_string()))
        );
    }

    #[test]
    fn test_list_literal() {
        assert_eq!(
            parse("[1, x]").unwrap(),
            Expr::List(vec![*int(1), *ident("x")])
        );
        assert_eq!(parse("[]").unwrap(), Expr::List(vec![]));
    }

    #[test]
    fn test_keywords_are_not_identifiers() {
        assert_eq!(
            parse("not done").unwrap(),
            Expr::Unary {
                op: UnaryOp::Not,
                expr: ident("done"),
            }
        );
        // Identifiers that merely start with a keyword are fine.
        assert_eq!(parse("nothing").unwrap(), *ident("nothing"));
        assert_eq!(parse("order").unwrap(), *ident("order"));
        assert_eq!(parse("truthy").unwrap(), *ident("truthy"));
    }

    #[test]
    fn test_rejects_malformed_input() {
        for source in [
            "",
            "1 +",
            "[1, 2,]",
            "(1 + 2",
            "x = 5",
            "3.",
            "hello world",
            "print(\"x\")",
            "__import__('os').system('ls')",
        ] {
            assert!(
                matches!(parse(source), Err(EvalError::Unresolved { .. })),
                "expected '{}' to be rejected",
                source
            );
        }
    }

    #[test]
    fn test_integer_overflow_is_unresolved() {
        assert_eq!(
            parse("99999999999999999999"),
            Err(EvalError::unresolved("99999999999999999999"))
        );
    }

    #[test]
    fn test_nesting_past_the_stack_guard() {
        let depth = 100_000;
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(parse(&source), Err(EvalError::TooDeep));
    }
}
