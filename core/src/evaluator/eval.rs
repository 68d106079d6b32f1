//! Core execution logic.

use std::rc::Rc;
use std::time::Instant;

use hashbrown::HashMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::error::{ExecutionError, ExecutionErrorKind, ResourceExceeded};
use super::report::RunReport;
use crate::api::ExecutionOptions;
use crate::diagnostics::{
    Diagnostic, NumericContext, TypeObservations, check, check_command, check_numeric_bounds,
};
use crate::environment::{Environment, LAST_RETURN};
use crate::expression::{BinaryOp, apply_closure, eval_binary, evaluate};
use crate::syntax::{
    ArithmeticOp, AssignValue, Expression, FunctionDef, Program, Statement, StatementKind,
    StringOpKind,
};
use crate::values::Value;

/// Remaining stack below which a block runs on a freshly allocated segment.
const STACK_RED_ZONE: usize = 256 * 1024;
/// Size of each extra stack segment.
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// How a statement sequence finished.
#[derive(Debug)]
enum Flow {
    /// Fell through to the end.
    Next,
    /// Hit a `return`.
    Return(Option<Value>),
}

/// Executes one program. Owns all per-run state.
pub struct Interpreter<'a> {
    options: &'a ExecutionOptions,
    functions: HashMap<String, Rc<FunctionDef>>,
    types: TypeObservations,
    rng: StdRng,
    answers: std::slice::Iter<'a, String>,
    timer: Option<Instant>,
    anonymous_count: usize,
    depth: usize,
    iterations: usize,
    report: RunReport,
}

impl<'a> Interpreter<'a> {
    pub fn new(options: &'a ExecutionOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            options,
            functions: HashMap::new(),
            types: TypeObservations::new(),
            rng,
            answers: options.answers.iter(),
            timer: None,
            anonymous_count: 0,
            depth: 0,
            iterations: 0,
            report: RunReport::default(),
        }
    }

    /// Run `program` against a fresh top-level environment.
    pub fn run(mut self, program: &Program) -> RunReport {
        debug!(statements = program.statements.len(), "run started");
        let mut env = Environment::new();
        match self.exec_block(&program.statements, &mut env) {
            Ok(Flow::Next) => {}
            Ok(Flow::Return(_)) => debug!("top-level return ended the run"),
            Err(error) => {
                debug!(%error, "run aborted");
                self.report.error = Some(error);
            }
        }
        self.report
    }

    fn print(&mut self, line: impl Into<String>) {
        self.report.lines.push(line.into());
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        for line in diagnostic.to_string().lines() {
            self.report.lines.push(line.to_string());
        }
        self.report.diagnostics.push(diagnostic);
    }

    fn eval(
        &self,
        expression: &Expression,
        env: &Environment,
        line: usize,
    ) -> Result<Value, ExecutionError> {
        evaluate(expression.as_str(), env).map_err(|e| ExecutionError::new(e, line))
    }

    /// Run a statement sequence. Recursion through `call` and nested blocks
    /// grows the stack on demand, so `max_call_depth` is the only depth limit.
    fn exec_block(
        &mut self,
        statements: &[Statement],
        env: &mut Environment,
    ) -> Result<Flow, ExecutionError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.exec_statements(statements, env)
        })
    }

    fn exec_statements(
        &mut self,
        statements: &[Statement],
        env: &mut Environment,
    ) -> Result<Flow, ExecutionError> {
        for statement in statements {
            if let Flow::Return(value) = self.exec_statement(statement, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Next)
    }

    fn exec_statement(
        &mut self,
        statement: &Statement,
        env: &mut Environment,
    ) -> Result<Flow, ExecutionError> {
        let line = statement.line;
        trace!(line, text = %statement.text, "executing");

        // An Error-level name diagnostic cancels the statement.
        if let Some(target) = statement.binding_target() {
            let mut blocked = false;
            for diagnostic in check(target, line, &statement.text) {
                blocked |= diagnostic.is_error();
                self.record(diagnostic);
            }
            if blocked {
                debug!(line, variable = target, "binding cancelled by diagnostic");
                return Ok(Flow::Next);
            }
        }

        match &statement.kind {
            StatementKind::Assign { target, value } => {
                let value = match value {
                    AssignValue::Expr(expression) => self.eval(expression, env, line)?,
                    AssignValue::Map { function, list } => {
                        self.map_over(function, list, env, line)?
                    }
                };
                self.bind(target, value, line, env);
            }

            StatementKind::Print { args } => {
                let mut parts = Vec::with_capacity(args.len());
                for arg in args {
                    parts.push(self.eval(arg, env, line)?.to_string());
                }
                self.print(parts.join(" "));
            }

            StatementKind::Say { message } => {
                let message = self.eval(message, env, line)?;
                self.print(format!("(say): {}", message));
            }

            StatementKind::Ask { prompt, target } => {
                let prompt = self.eval(prompt, env, line)?;
                self.print(format!("(input requested: {})", prompt));
                let answer = self.answers.next().cloned().unwrap_or_default();
                if let Some(target) = target {
                    self.bind(target, Value::Text(answer), line, env);
                }
            }

            StatementKind::Arithmetic {
                op,
                left,
                right,
                target,
            } => {
                let left = self.eval(left, env, line)?;
                let right = self.eval(right, env, line)?;
                let result =
                    arithmetic(*op, &left, &right).map_err(|e| ExecutionError::new(e, line))?;
                self.bind_or_print(target.as_deref(), result, line, env);
            }

            StatementKind::StringOp {
                op,
                operand,
                target,
            } => {
                let operand = self.eval(operand, env, line)?;
                let result = string_op(*op, &operand).map_err(|e| ExecutionError::new(e, line))?;
                self.bind_or_print(target.as_deref(), result, line, env);
            }

            StatementKind::RandomBetween { low, high, target } => {
                let low_value = self.eval(low, env, line)?;
                let high_value = self.eval(high, env, line)?;
                let (Some(low), Some(high)) = (low_value.as_int(), high_value.as_int()) else {
                    return Err(ExecutionError::new(
                        ExecutionErrorKind::invalid_operation(format!(
                            "random between needs whole numbers, not {} and {}",
                            low_value, high_value
                        )),
                        line,
                    ));
                };
                if low > high {
                    return Err(ExecutionError::new(
                        ExecutionErrorKind::invalid_operation(format!(
                            "random between {} and {}: the first number must not be bigger",
                            low, high
                        )),
                        line,
                    ));
                }
                let result = Value::Integer(self.rng.gen_range(low..=high));
                self.bind_or_print(target.as_deref(), result, line, env);
            }

            StatementKind::ChooseFrom { options, target } => {
                let mut choices = Vec::with_capacity(options.len());
                for option in options {
                    choices.push(self.eval(option, env, line)?);
                }
                // A single list operand chooses among its elements.
                let elements = match choices.as_slice() {
                    [Value::List(items)] => Some(items.borrow().clone()),
                    _ => None,
                };
                if let Some(elements) = elements {
                    choices = elements;
                }
                let Some(choice) = choices.choose(&mut self.rng).cloned() else {
                    return Err(ExecutionError::new(ExecutionErrorKind::EmptyChoice, line));
                };
                self.bind_or_print(target.as_deref(), choice, line, env);
            }

            StatementKind::TimerStart => self.timer = Some(Instant::now()),

            StatementKind::TimerStop => match self.timer.take() {
                Some(start) => {
                    let elapsed = start.elapsed().as_secs_f64();
                    self.print(format!("Time elapsed: {:.2} seconds", elapsed));
                }
                None => self.record(
                    Diagnostic::warning(line, "The timer was stopped before it was started")
                        .with_help("Add 'timer start' earlier in the program"),
                ),
            },

            StatementKind::Wait { duration } => trace!(line, duration = %duration, "wait skipped"),

            StatementKind::FunctionDef(def) => {
                let name = match &def.name {
                    Some(name) => name.clone(),
                    None => {
                        self.anonymous_count += 1;
                        format!("_anon_{}", self.anonymous_count)
                    }
                };
                debug!(line, name = %name, params = def.params.len(), "function registered");
                self.functions.insert(name, Rc::clone(def));
            }

            StatementKind::Return { value } => {
                let value = match value {
                    Some(expression) => Some(self.eval(expression, env, line)?),
                    None => None,
                };
                return Ok(Flow::Return(value));
            }

            StatementKind::Call { name, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg, env, line)?);
                }
                self.call(name, values, line, env)?;
            }

            StatementKind::Conditional { branches, default } => {
                for branch in branches {
                    let condition = self.eval(&branch.condition, env, line)?;
                    let Some(taken) = condition.as_bool() else {
                        return Err(ExecutionError::new(
                            ExecutionErrorKind::invalid_operation(format!(
                                "The condition '{}' must be true or false, not {}",
                                branch.condition,
                                condition.kind()
                            )),
                            line,
                        ));
                    };
                    if taken {
                        return self.exec_block(&branch.body, env);
                    }
                }
                if let Some(body) = default {
                    return self.exec_block(body, env);
                }
            }

            StatementKind::Repeat { count, body } => {
                let count_value = self.eval(count, env, line)?;
                let times = match count_value {
                    Value::Integer(n) if n >= 0 => n,
                    other => {
                        return Err(ExecutionError::new(
                            ExecutionErrorKind::InvalidLoopBound {
                                count: other.to_string(),
                            },
                            line,
                        ));
                    }
                };
                let context = NumericContext::RepeatCount { line };
                if let Some(diagnostic) = check_numeric_bounds(&count_value, &context) {
                    self.record(diagnostic);
                }
                for _ in 0..times {
                    self.iterations += 1;
                    if let Some(max_iterations) = self.options.max_iterations {
                        if self.iterations > max_iterations {
                            return Err(ExecutionError::new(
                                ResourceExceeded::Iterations { max_iterations },
                                line,
                            ));
                        }
                    }
                    if let Flow::Return(value) = self.exec_block(body, env)? {
                        return Ok(Flow::Return(value));
                    }
                }
            }

            StatementKind::Raw => self.record(check_command(line, &statement.text)),
        }

        Ok(Flow::Next)
    }

    /// Bounds check, type observation, then the binding itself.
    fn bind(&mut self, target: &str, value: Value, line: usize, env: &mut Environment) {
        let context = NumericContext::Assignment { name: target, line };
        if let Some(diagnostic) = check_numeric_bounds(&value, &context) {
            self.record(diagnostic);
        }
        if let Some(diagnostic) = self.types.observe(target, value.kind(), line) {
            self.record(diagnostic);
        }
        env.set(target, value);
    }

    fn bind_or_print(
        &mut self,
        target: Option<&str>,
        value: Value,
        line: usize,
        env: &mut Environment,
    ) {
        match target {
            Some(target) => self.bind(target, value, line, env),
            None => self.print(value.to_string()),
        }
    }

    /// `call name(args)`: run a defined function, or apply a closure held in
    /// a variable. The result lands in `last_return`.
    fn call(
        &mut self,
        name: &str,
        args: Vec<Value>,
        line: usize,
        env: &mut Environment,
    ) -> Result<(), ExecutionError> {
        if let Some(def) = self.functions.get(name).cloned() {
            if self.depth >= self.options.max_call_depth {
                return Err(ExecutionError::new(
                    ResourceExceeded::CallDepth {
                        max_depth: self.options.max_call_depth,
                    },
                    line,
                ));
            }

            // Missing arguments leave the parameter unbound; extras are ignored.
            let mut callee = env.snapshot();
            for (param, arg) in def.params.iter().zip(args) {
                callee.set(param.clone(), arg);
            }

            self.depth += 1;
            let flow = self.exec_block(&def.body, &mut callee);
            self.depth -= 1;

            match flow? {
                Flow::Return(Some(value)) => env.set(LAST_RETURN, value),
                Flow::Return(None) | Flow::Next => {
                    env.remove(LAST_RETURN);
                }
            }
            return Ok(());
        }

        if let Some(Value::Closure(closure)) = env.get(name) {
            let closure = Rc::clone(closure);
            let [arg]: [Value; 1] = args.try_into().map_err(|args: Vec<Value>| {
                ExecutionError::new(
                    ExecutionErrorKind::invalid_operation(format!(
                        "'{}' takes exactly 1 value, but {} were given",
                        name,
                        args.len()
                    )),
                    line,
                )
            })?;
            let result = apply_closure(&closure, arg).map_err(|e| ExecutionError::new(e, line))?;
            env.set(LAST_RETURN, result);
            return Ok(());
        }

        Err(ExecutionError::new(
            ExecutionErrorKind::UnknownFunction {
                name: name.to_string(),
            },
            line,
        ))
    }

    /// `map f over items`: apply a closure to every element.
    fn map_over(
        &mut self,
        function: &Expression,
        list: &Expression,
        env: &Environment,
        line: usize,
    ) -> Result<Value, ExecutionError> {
        let Value::Closure(closure) = self.eval(function, env, line)? else {
            return Err(ExecutionError::new(
                ExecutionErrorKind::invalid_operation(format!(
                    "'{}' is not a function made with '=>'",
                    function
                )),
                line,
            ));
        };
        let list_value = self.eval(list, env, line)?;
        let Some(items) = list_value.list_items() else {
            return Err(ExecutionError::new(
                ExecutionErrorKind::invalid_operation(format!(
                    "map needs a list, but '{}' is {}",
                    list,
                    list_value.kind()
                )),
                line,
            ));
        };
        let mapped = items
            .into_iter()
            .map(|item| apply_closure(&closure, item))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ExecutionError::new(e, line))?;
        Ok(Value::list(mapped))
    }
}

/// `add` and `multiply`. `add` also joins two texts or two lists.
fn arithmetic(op: ArithmeticOp, left: &Value, right: &Value) -> Result<Value, ExecutionErrorKind> {
    match (op, left, right) {
        (ArithmeticOp::Add, Value::Text(l), Value::Text(r)) => {
            Ok(Value::Text(format!("{}{}", l, r)))
        }
        (ArithmeticOp::Add, Value::List(l), Value::List(r)) => {
            let mut items = l.borrow().clone();
            items.extend(r.borrow().iter().cloned());
            Ok(Value::list(items))
        }
        (ArithmeticOp::Add, _, _) => Ok(eval_binary(BinaryOp::Add, left, right)?),
        (ArithmeticOp::Multiply, _, _) => Ok(eval_binary(BinaryOp::Mul, left, right)?),
    }
}

fn string_op(op: StringOpKind, operand: &Value) -> Result<Value, ExecutionErrorKind> {
    match op {
        StringOpKind::Length => {
            let length = match operand {
                Value::Text(s) => s.chars().count(),
                Value::List(items) => items.borrow().len(),
                other => other.to_string().chars().count(),
            };
            Ok(Value::Integer(length as i64))
        }
        StringOpKind::Uppercase => Ok(Value::Text(operand.to_string().to_uppercase())),
        StringOpKind::Lowercase => Ok(Value::Text(operand.to_string().to_lowercase())),
        StringOpKind::Reverse => match operand {
            Value::List(items) => {
                let mut items = items.borrow().clone();
                items.reverse();
                Ok(Value::list(items))
            }
            other => Ok(Value::Text(other.to_string().chars().rev().collect())),
        },
        StringOpKind::Square => {
            if !operand.is_numeric() {
                return Err(ExecutionErrorKind::invalid_operation(format!(
                    "Cannot square {}",
                    operand.kind()
                )));
            }
            Ok(eval_binary(BinaryOp::Mul, operand, operand)?)
        }
        StringOpKind::SquareRoot => match operand.as_number() {
            Some(x) if x >= 0.0 => Ok(Value::Float(x.sqrt())),
            Some(_) => Err(ExecutionErrorKind::invalid_operation(
                "Cannot take the square root of a negative number",
            )),
            None => Err(ExecutionErrorKind::invalid_operation(format!(
                "Cannot take the square root of {}",
                operand.kind()
            ))),
        },
    }
}
