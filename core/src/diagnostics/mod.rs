//! Beginner diagnostics: likely typos, unsafe names, suspicious numbers and
//! variables that change type.
//!
//! The evaluator runs these checks at every binding statement; [`lint`] runs
//! them over a whole program without executing it.

mod diagnostic;
mod engine;
mod keywords;
mod lint;
mod types;

pub use diagnostic::{Diagnostic, Severity};
pub use engine::{
    LARGE_MAGNITUDE, MAX_QUIET_REPEAT, NumericContext, SMALL_MAGNITUDE, check, check_command,
    check_numeric_bounds,
};
pub use keywords::{is_reserved, suggest_keyword};
pub use lint::lint;
pub use types::TypeObservations;

#[cfg(test)]
mod engine_test;
