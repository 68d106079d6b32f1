//! Standalone diagnostics pass: everything the checks can find without
//! running the program.

use super::diagnostic::Diagnostic;
use super::engine::{NumericContext, check, check_command, check_numeric_bounds};
use super::types::TypeObservations;
use crate::environment::Environment;
use crate::expression::evaluate;
use crate::syntax::{AssignValue, Expression, Program, Statement, StatementKind};
use crate::values::Value;

/// Check every statement of `program`, in source order.
pub fn lint(program: &Program) -> Vec<Diagnostic> {
    let mut linter = Linter::default();
    linter.statements(&program.statements);
    linter.diagnostics
}

#[derive(Default)]
struct Linter {
    types: TypeObservations,
    diagnostics: Vec<Diagnostic>,
}

impl Linter {
    fn statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.statement(statement);
        }
    }

    fn statement(&mut self, statement: &Statement) {
        let line = statement.line;

        if let Some(target) = statement.binding_target() {
            self.diagnostics.extend(check(target, line, &statement.text));
        }

        match &statement.kind {
            StatementKind::Assign {
                target,
                value: AssignValue::Expr(value),
            } => {
                if let Some(number) = constant(value) {
                    let context = NumericContext::Assignment { name: target, line };
                    self.diagnostics
                        .extend(check_numeric_bounds(&number, &context));
                }
                if let Some(kind) = self.types.infer(value.as_str()) {
                    self.diagnostics
                        .extend(self.types.observe(target, kind, line));
                }
            }
            StatementKind::Repeat { count, body } => {
                if let Some(count) = constant(count) {
                    let context = NumericContext::RepeatCount { line };
                    self.diagnostics
                        .extend(check_numeric_bounds(&count, &context));
                }
                self.statements(body);
            }
            StatementKind::Conditional { branches, default } => {
                for branch in branches {
                    self.statements(&branch.body);
                }
                if let Some(body) = default {
                    self.statements(body);
                }
            }
            StatementKind::FunctionDef(def) => self.statements(&def.body),
            StatementKind::Raw => self
                .diagnostics
                .push(check_command(line, &statement.text)),
            _ => {}
        }
    }
}

/// Value of an expression that needs no variables.
fn constant(expression: &Expression) -> Option<Value> {
    evaluate(expression.as_str(), &Environment::new()).ok()
}
