//! Statement rendering.

use hashbrown::HashSet;
use tracing::{debug, trace};

use super::expr::{Precedence, operand, render_expression};
use crate::api::GeneratorOptions;
use crate::diagnostics::TypeObservations;
use crate::syntax::{
    ArithmeticOp, AssignValue, Expression, FunctionDef, Program, Statement, StatementKind,
    StringOpKind,
};
use crate::values::ValueKind;

const TIMER_LABEL: &str = "\"jamTimer\"";

/// Label around the program when a top-level `return` has to leave it early.
const PROGRAM_LABEL: &str = "program";

/// Names declared with `let` in one function body or at the top level.
#[derive(Debug, Default)]
struct Scope {
    declared: HashSet<String>,
}

/// Renders one program as JavaScript. Owns all per-render state, including
/// the anonymous function counter.
pub struct JsGenerator<'a> {
    options: &'a GeneratorOptions,
    lines: Vec<String>,
    scopes: Vec<Scope>,
    types: TypeObservations,
    warnings: Vec<String>,
    depth: usize,
    loops: usize,
    anonymous_count: usize,
}

impl<'a> JsGenerator<'a> {
    pub fn new(options: &'a GeneratorOptions) -> Self {
        Self {
            options,
            lines: Vec::new(),
            scopes: Vec::new(),
            types: TypeObservations::new(),
            warnings: Vec::new(),
            depth: 0,
            loops: 0,
            anonymous_count: 0,
        }
    }

    pub fn render(mut self, program: &Program) -> String {
        debug!(statements = program.statements.len(), "render started");
        if returns_early(&program.statements) {
            // Scripts cannot `return`; a labeled block can be left with `break`.
            self.emit(format!("{}: {{", PROGRAM_LABEL));
            self.depth += 1;
            self.function_body(&program.statements, &[]);
            self.depth -= 1;
            self.emit("}");
        } else {
            self.function_body(&program.statements, &[]);
        }
        self.finalize()
    }

    /// Join the emitted lines and append the type warnings, if any.
    fn finalize(mut self) -> String {
        if !self.warnings.is_empty() {
            debug!(warnings = self.warnings.len(), "type drift observed");
            self.lines.push("\n/* Type Warnings:".to_string());
            for warning in std::mem::take(&mut self.warnings) {
                self.lines.push(format!("   - {}", warning));
            }
            self.lines.push("*/".to_string());
        }
        self.lines.join("\n")
    }

    // === Output ===

    fn emit(&mut self, line: impl Into<String>) {
        let line = line.into();
        let indent = self.options.indent_width * self.depth;
        if indent == 0 {
            self.lines.push(line);
        } else {
            self.lines.push(format!("{}{}", " ".repeat(indent), line));
        }
    }

    // === Scopes ===

    /// Render a function body (or the whole program) as a fresh scope.
    ///
    /// Names first bound inside a nested block are declared up front so
    /// later statements at this level can still see them.
    fn function_body(&mut self, body: &[Statement], params: &[String]) {
        let mut scope = Scope::default();
        scope.declared.extend(params.iter().cloned());
        self.scopes.push(scope);

        for name in hoisted_names(body, params) {
            self.emit(format!("let {};", name));
            self.declare(&name);
        }
        self.block(body);

        self.scopes.pop();
    }

    /// Returns true if `name` was not yet declared in the current scope.
    fn declare(&mut self, name: &str) -> bool {
        self.scopes
            .last_mut()
            .is_some_and(|scope| scope.declared.insert(name.to_string()))
    }

    /// True outside every function body.
    fn at_top_level(&self) -> bool {
        self.scopes.len() == 1
    }

    fn nested(&mut self, body: &[Statement]) {
        self.depth += 1;
        self.block(body);
        self.depth -= 1;
    }

    // === Statements ===

    fn block(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.statement(statement);
        }
    }

    fn statement(&mut self, statement: &Statement) {
        let line = statement.line;
        trace!(line, text = %statement.text, "rendering");

        match &statement.kind {
            StatementKind::Assign { target, value } => {
                let (kind, rendered) = match value {
                    AssignValue::Expr(expr) => {
                        (self.types.infer(expr.as_str()), render_expression(expr.as_str()))
                    }
                    AssignValue::Map { function, list } => (
                        Some(ValueKind::List),
                        format!(
                            "{}.map({})",
                            operand(list.as_str(), Precedence::Atom),
                            render_expression(function.as_str())
                        ),
                    ),
                };
                self.observe(target, kind, line);
                self.bind(target, rendered);
            }

            StatementKind::Print { args } => {
                self.emit(format!("console.log({});", arguments(args)));
            }

            StatementKind::Say { message } => {
                if message.as_str().is_empty() {
                    self.emit("console.log(\"(say):\");");
                } else {
                    self.emit(format!(
                        "console.log(\"(say):\", {});",
                        render_expression(message.as_str())
                    ));
                }
            }

            StatementKind::Ask { prompt, target } => {
                let value = format!("prompt({})", render_expression(prompt.as_str()));
                match target {
                    Some(target) => {
                        self.observe(target, Some(ValueKind::Text), line);
                        self.bind(target, value);
                    }
                    None => self.emit(format!("{};", value)),
                }
            }

            StatementKind::Arithmetic {
                op,
                left,
                right,
                target,
            } => {
                let joins_lists = matches!(op, ArithmeticOp::Add)
                    && [left, right]
                        .iter()
                        .any(|side| self.types.infer(side.as_str()) == Some(ValueKind::List));
                if joins_lists {
                    let value = format!(
                        "[...{}, ...{}]",
                        render_expression(left.as_str()),
                        render_expression(right.as_str())
                    );
                    self.bind_or_log(target.as_deref(), Some(ValueKind::List), value, line);
                    return;
                }
                let (symbol, own, right_min) = match op {
                    ArithmeticOp::Add => ("+", Precedence::Sum, Precedence::Product),
                    ArithmeticOp::Multiply => ("*", Precedence::Product, Precedence::Negation),
                };
                let value = format!(
                    "{} {} {}",
                    operand(left.as_str(), own),
                    symbol,
                    operand(right.as_str(), right_min)
                );
                self.bind_or_log(target.as_deref(), None, value, line);
            }

            StatementKind::StringOp {
                op,
                operand: text,
                target,
            } => {
                let (kind, value) = self.string_op(*op, text);
                self.bind_or_log(target.as_deref(), kind, value, line);
            }

            StatementKind::RandomBetween { low, high, target } => {
                let value = format!(
                    "Math.floor(Math.random() * ({} - {} + 1)) + {}",
                    operand(high.as_str(), Precedence::Sum),
                    operand(low.as_str(), Precedence::Product),
                    operand(low.as_str(), Precedence::Product)
                );
                self.bind_or_log(target.as_deref(), Some(ValueKind::Integer), value, line);
            }

            StatementKind::ChooseFrom { options, target } => {
                let value = match options.as_slice() {
                    [single]
                        if matches!(
                            self.types.infer(single.as_str()),
                            None | Some(ValueKind::List)
                        ) =>
                    {
                        let list = operand(single.as_str(), Precedence::Atom);
                        format!("{}[Math.floor(Math.random() * {}.length)]", list, list)
                    }
                    _ => format!(
                        "[{}][Math.floor(Math.random() * {})]",
                        arguments(options),
                        options.len()
                    ),
                };
                self.bind_or_log(target.as_deref(), None, value, line);
            }

            StatementKind::TimerStart => self.emit(format!("console.time({});", TIMER_LABEL)),
            StatementKind::TimerStop => self.emit(format!("console.timeEnd({});", TIMER_LABEL)),

            StatementKind::Wait { duration } => {
                let duration = duration.as_str().replace("*/", "* /");
                self.emit(format!("/* wait {} (no-op in compiled JS) */", duration));
            }

            StatementKind::FunctionDef(def) => self.function(def),

            StatementKind::Return { value } => match value {
                _ if self.at_top_level() => self.emit(format!("break {};", PROGRAM_LABEL)),
                Some(value) => self.emit(format!("return {};", render_expression(value.as_str()))),
                None => self.emit("return;"),
            },

            StatementKind::Call { name, args } => {
                self.emit(format!("{}({});", name, arguments(args)));
            }

            StatementKind::Conditional { branches, default } => {
                for (index, branch) in branches.iter().enumerate() {
                    let keyword = if index == 0 { "if" } else { "else if" };
                    self.emit(format!(
                        "{} ({}) {{",
                        keyword,
                        render_expression(branch.condition.as_str())
                    ));
                    self.nested(&branch.body);
                    self.emit("}");
                }
                if let Some(body) = default {
                    self.emit("else {");
                    self.nested(body);
                    self.emit("}");
                }
            }

            StatementKind::Repeat { count, body } => {
                let n = self.loops;
                self.emit(format!(
                    "for (let _i{n} = 0, _n{n} = {count}; _i{n} < _n{n}; _i{n}++) {{",
                    n = n,
                    count = render_expression(count.as_str())
                ));
                self.loops += 1;
                self.nested(body);
                self.loops -= 1;
                self.emit("}");
            }

            StatementKind::Raw => self.emit(format!("// Unknown command: {}", statement.text)),
        }
    }

    fn function(&mut self, def: &FunctionDef) {
        let params = def.params.join(", ");
        let closing = match &def.name {
            Some(name) => {
                self.emit(format!("function {}({}) {{", name, params));
                "}"
            }
            None => {
                self.anonymous_count += 1;
                self.emit(format!(
                    "const _anon_{} = ({}) => {{",
                    self.anonymous_count, params
                ));
                "};"
            }
        };
        self.depth += 1;
        self.function_body(&def.body, &def.params);
        self.depth -= 1;
        self.emit(closing);
    }

    /// JavaScript for a string operation, with the kind it produces when
    /// that is known without running it.
    fn string_op(&self, op: StringOpKind, text: &Expression) -> (Option<ValueKind>, String) {
        let text = text.as_str();
        match op {
            StringOpKind::Length => {
                let value = match self.types.infer(text) {
                    // Numbers and booleans count the characters they print as.
                    Some(ValueKind::Integer | ValueKind::Float | ValueKind::Boolean) => {
                        format!("String({}).length", render_expression(text))
                    }
                    _ => format!("{}.length", operand(text, Precedence::Atom)),
                };
                (Some(ValueKind::Integer), value)
            }
            StringOpKind::Uppercase => (
                Some(ValueKind::Text),
                format!("String({}).toUpperCase()", render_expression(text)),
            ),
            StringOpKind::Lowercase => (
                Some(ValueKind::Text),
                format!("String({}).toLowerCase()", render_expression(text)),
            ),
            StringOpKind::Reverse => match self.types.infer(text) {
                Some(ValueKind::List) => (
                    Some(ValueKind::List),
                    format!("[...{}].reverse()", render_expression(text)),
                ),
                _ => (
                    Some(ValueKind::Text),
                    format!("[...String({})].reverse().join(\"\")", render_expression(text)),
                ),
            },
            StringOpKind::Square => (
                self.types
                    .infer(text)
                    .filter(|kind| matches!(kind, ValueKind::Integer | ValueKind::Float)),
                format!(
                    "{} * {}",
                    operand(text, Precedence::Product),
                    operand(text, Precedence::Negation)
                ),
            ),
            StringOpKind::SquareRoot => (
                Some(ValueKind::Float),
                format!("Math.sqrt({})", render_expression(text)),
            ),
        }
    }

    // === Bindings ===

    fn bind(&mut self, target: &str, value: String) {
        if self.declare(target) {
            self.emit(format!("let {} = {};", target, value));
        } else {
            self.emit(format!("{} = {};", target, value));
        }
    }

    /// Bind the result to `target`, or log it when there is no target.
    fn bind_or_log(&mut self, target: Option<&str>, kind: Option<ValueKind>, value: String, line: usize) {
        match target {
            Some(target) => {
                self.observe(target, kind, line);
                self.bind(target, value);
            }
            None => self.emit(format!("console.log({});", value)),
        }
    }

    fn observe(&mut self, target: &str, kind: Option<ValueKind>, line: usize) {
        let Some(kind) = kind else {
            return;
        };
        if let Some(diagnostic) = self.types.observe(target, kind, line) {
            self.warnings.push(diagnostic.message);
        }
    }
}

fn arguments(args: &[Expression]) -> String {
    args.iter()
        .map(|arg| render_expression(arg.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// True if `body` can `return` outside any function.
fn returns_early(body: &[Statement]) -> bool {
    body.iter().any(|statement| match &statement.kind {
        StatementKind::Return { .. } => true,
        StatementKind::Conditional { branches, default } => {
            branches.iter().any(|branch| returns_early(&branch.body))
                || default.as_deref().is_some_and(returns_early)
        }
        StatementKind::Repeat { body, .. } => returns_early(body),
        _ => false,
    })
}

/// Names whose first binding in `body` happens inside a nested block.
///
/// Function bodies are separate scopes and are not searched.
fn hoisted_names(body: &[Statement], params: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = params.iter().cloned().collect();
    let mut hoisted = Vec::new();
    collect_bindings(body, 0, &mut seen, &mut hoisted);
    hoisted
}

fn collect_bindings(
    statements: &[Statement],
    depth: usize,
    seen: &mut HashSet<String>,
    hoisted: &mut Vec<String>,
) {
    for statement in statements {
        if let Some(name) = statement.binding_target() {
            if seen.insert(name.to_string()) && depth > 0 {
                hoisted.push(name.to_string());
            }
        }
        match &statement.kind {
            StatementKind::Conditional { branches, default } => {
                for branch in branches {
                    collect_bindings(&branch.body, depth + 1, seen, hoisted);
                }
                if let Some(body) = default {
                    collect_bindings(body, depth + 1, seen, hoisted);
                }
            }
            StatementKind::Repeat { body, .. } => collect_bindings(body, depth + 1, seen, hoisted),
            _ => {}
        }
    }
}
