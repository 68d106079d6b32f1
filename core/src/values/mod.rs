mod value;

pub use value::{Closure, ListRef, Value, ValueKind};
