//! Builds the statement model from source lines.

use std::rc::Rc;

use tracing::debug;

use super::block::{SourceLine, source_lines, split};
use super::error::SyntaxError;
use super::head::{Keyword, classify};
use super::statement::{
    ArithmeticOp, AssignValue, Branch, Expression, FunctionDef, Statement, StatementKind,
    StringOpKind,
};
use crate::expression::scan::{is_identifier, rsplit_on_word, split_on_word, split_top_level};

/// A parsed program: the top-level statement sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    /// Split `source` into blocks and build one statement per line.
    pub fn parse(source: &str) -> Result<Program, SyntaxError> {
        let lines = source_lines(source);
        let statements = build(&lines)?;
        debug!(statements = statements.len(), "program parsed");
        Ok(Program { statements })
    }
}

/// Build statements from a block of lines.
pub fn build(lines: &[SourceLine<'_>]) -> Result<Vec<Statement>, SyntaxError> {
    let mut statements = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        if line.is_skipped() {
            index += 1;
            continue;
        }

        let (kind, next) = match classify(line.text) {
            Some((Keyword::If, rest)) => match block_header(rest) {
                Some(condition) => build_conditional(lines, index, condition)?,
                None => (StatementKind::Raw, index + 1),
            },
            Some((Keyword::Repeat, rest)) => match block_header(rest) {
                Some(header) => {
                    let (body, end) = split(lines, index + 1)?;
                    let count = header
                        .strip_suffix("times")
                        .filter(|count| count.ends_with(char::is_whitespace))
                        .unwrap_or(header);
                    let kind = StatementKind::Repeat {
                        count: Expression::new(count),
                        body: build(&body)?,
                    };
                    (kind, end + 1)
                }
                None => (StatementKind::Raw, index + 1),
            },
            Some((Keyword::Function, rest)) => match block_header(rest) {
                Some(header) => {
                    let (body, end) = split(lines, index + 1)?;
                    let kind = match function_signature(header) {
                        Some((name, params)) => StatementKind::FunctionDef(Rc::new(FunctionDef {
                            name,
                            params,
                            body: build(&body)?,
                        })),
                        None => StatementKind::Raw,
                    };
                    (kind, end + 1)
                }
                None => (StatementKind::Raw, index + 1),
            },
            Some((keyword, rest)) => (simple_statement(keyword, rest), index + 1),
            None => (StatementKind::Raw, index + 1),
        };

        statements.push(Statement {
            line: line.number,
            text: line.text.to_string(),
            kind,
        });
        index = next;
    }

    Ok(statements)
}

/// Text between the keyword and the trailing `{` of a block opener.
fn block_header(rest: &str) -> Option<&str> {
    rest.strip_suffix('{').map(str::trim)
}

/// Build an `if` chain starting at `lines[index]`.
///
/// Returns the statement kind and the index of the first line after the chain.
fn build_conditional(
    lines: &[SourceLine<'_>],
    index: usize,
    condition: &str,
) -> Result<(StatementKind, usize), SyntaxError> {
    let (body, mut end) = split(lines, index + 1)?;
    let mut branches = vec![Branch {
        condition: Expression::new(condition),
        body: build(&body)?,
    }];

    loop {
        let Some((arm_index, arm)) = continuation(lines, end) else {
            let next = if lines[end].is_chained_closer() {
                // Not an else arm: reprocess the closer on its own.
                end
            } else {
                end + 1
            };
            return Ok((
                StatementKind::Conditional {
                    branches,
                    default: None,
                },
                next,
            ));
        };

        let (body, arm_end) = split(lines, arm_index + 1)?;
        let body = build(&body)?;
        match arm {
            Arm::ElseIf(condition) => {
                branches.push(Branch {
                    condition: Expression::new(condition),
                    body,
                });
                end = arm_end;
            }
            Arm::Else => {
                let next = if lines[arm_end].is_chained_closer() {
                    arm_end
                } else {
                    arm_end + 1
                };
                return Ok((
                    StatementKind::Conditional {
                        branches,
                        default: Some(body),
                    },
                    next,
                ));
            }
        }
    }
}

enum Arm<'a> {
    ElseIf(&'a str),
    Else,
}

/// Find the arm that continues a conditional whose body closed at
/// `lines[end]`: either on the closer itself (`} else {`) or on the next
/// statement line (`else {` after a lone `}`).
fn continuation<'a>(lines: &[SourceLine<'a>], end: usize) -> Option<(usize, Arm<'a>)> {
    let (arm_index, text) = if lines[end].is_chained_closer() {
        (end, lines[end].text[1..].trim())
    } else {
        let next = lines
            .iter()
            .enumerate()
            .skip(end + 1)
            .find(|(_, line)| !line.is_skipped())?;
        (next.0, next.1.text)
    };

    let arm = match classify(text)? {
        (Keyword::ElseIf, rest) => Arm::ElseIf(block_header(rest)?),
        (Keyword::Else, rest) => {
            if block_header(rest)?.is_empty() {
                Arm::Else
            } else {
                return None;
            }
        }
        // `otherwise {` is an else; `otherwise cond {` is an else-if.
        (Keyword::Otherwise, rest) => match block_header(rest)? {
            "" => Arm::Else,
            condition => Arm::ElseIf(condition),
        },
        _ => return None,
    };
    Some((arm_index, arm))
}

/// Parse `name (a, b)`, `name(a)`, `name` or `anonymous (x)`.
fn function_signature(header: &str) -> Option<(Option<String>, Vec<String>)> {
    let (name, params) = match header.split_once('(') {
        Some((name, params)) => (name.trim(), params.trim().strip_suffix(')')?),
        None => (header, ""),
    };
    if !is_identifier(name) {
        return None;
    }
    let params = params
        .split(',')
        .map(str::trim)
        .filter(|param| !param.is_empty())
        .map(str::to_string)
        .collect();
    let name = (name != "anonymous").then(|| name.to_string());
    Some((name, params))
}

/// Split off a trailing `into v` or `and store in v`.
fn take_target(rest: &str) -> (&str, Option<String>) {
    if let Some((body, target)) = rsplit_on_word(rest, "into") {
        if !target.is_empty() {
            return (body, Some(target.to_string()));
        }
    }
    if let Some((body, tail)) = rsplit_on_word(rest, "and") {
        if let Some(target) = tail.strip_prefix("store in ") {
            return (body, Some(target.trim().to_string()));
        }
    }
    (rest, None)
}

fn expressions(text: &str) -> Vec<Expression> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    split_top_level(text, ',')
        .into_iter()
        .map(Expression::new)
        .collect()
}

/// Build a statement that does not own a block.
fn simple_statement(keyword: Keyword, rest: &str) -> StatementKind {
    match keyword {
        Keyword::Set | Keyword::Let => {
            let Some((target, value)) = rest.split_once('=') else {
                return StatementKind::Raw;
            };
            let value = value.trim();
            let value = match value
                .strip_prefix("map ")
                .and_then(|map| split_on_word(map, "over"))
            {
                Some((function, list)) => AssignValue::Map {
                    function: Expression::new(function),
                    list: Expression::new(list),
                },
                None => AssignValue::Expr(Expression::new(value)),
            };
            StatementKind::Assign {
                target: target.trim().to_string(),
                value,
            }
        }

        Keyword::Print => StatementKind::Print {
            args: expressions(rest),
        },

        Keyword::Say => StatementKind::Say {
            message: Expression::new(rest),
        },

        Keyword::Ask => {
            let (prompt, target) = take_target(rest);
            StatementKind::Ask {
                prompt: Expression::new(prompt),
                target,
            }
        }

        Keyword::Add | Keyword::Multiply => {
            let (body, target) = take_target(rest);
            let Some((left, right)) = split_on_word(body, "and") else {
                return StatementKind::Raw;
            };
            let op = if keyword == Keyword::Add {
                ArithmeticOp::Add
            } else {
                ArithmeticOp::Multiply
            };
            StatementKind::Arithmetic {
                op,
                left: Expression::new(left),
                right: Expression::new(right),
                target,
            }
        }

        Keyword::LengthOf
        | Keyword::Uppercase
        | Keyword::Lowercase
        | Keyword::Reverse
        | Keyword::SquareOf
        | Keyword::SqrtOf => {
            let op = match keyword {
                Keyword::LengthOf => StringOpKind::Length,
                Keyword::Uppercase => StringOpKind::Uppercase,
                Keyword::Lowercase => StringOpKind::Lowercase,
                Keyword::Reverse => StringOpKind::Reverse,
                Keyword::SquareOf => StringOpKind::Square,
                _ => StringOpKind::SquareRoot,
            };
            let (operand, target) = take_target(rest);
            if operand.is_empty() {
                return StatementKind::Raw;
            }
            StatementKind::StringOp {
                op,
                operand: Expression::new(operand),
                target,
            }
        }

        Keyword::RandomBetween => {
            let (body, target) = take_target(rest);
            match split_on_word(body, "and") {
                Some((low, high)) => StatementKind::RandomBetween {
                    low: Expression::new(low),
                    high: Expression::new(high),
                    target,
                },
                None => StatementKind::Raw,
            }
        }

        Keyword::ChooseFrom => {
            let (body, target) = take_target(rest);
            StatementKind::ChooseFrom {
                options: expressions(body),
                target,
            }
        }

        Keyword::TimerStart if rest.is_empty() => StatementKind::TimerStart,
        Keyword::TimerStop if rest.is_empty() => StatementKind::TimerStop,

        Keyword::Wait => StatementKind::Wait {
            duration: rest.to_string(),
        },

        Keyword::Return => StatementKind::Return {
            value: (!rest.is_empty()).then(|| Expression::new(rest)),
        },

        Keyword::Call => match rest.split_once('(') {
            Some((name, args)) => match args.trim_end().strip_suffix(')') {
                Some(args) => StatementKind::Call {
                    name: name.trim().to_string(),
                    args: expressions(args),
                },
                None => StatementKind::Raw,
            },
            None if !rest.is_empty() => StatementKind::Call {
                name: rest.to_string(),
                args: Vec::new(),
            },
            None => StatementKind::Raw,
        },

        // Block openers without a block, and arms outside a conditional.
        _ => StatementKind::Raw,
    }
}
