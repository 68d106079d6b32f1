//! Variable bindings for one execution context.
//!
//! A run starts with an empty top-level environment. Every `call` gets a
//! [`snapshot`](Environment::snapshot) of the caller's bindings: the callee
//! can read and rebind freely, but neither side sees the other's changes
//! after the call starts.
//!
//! Lists and closures are reference values, so a snapshot shares their
//! backing storage with the caller.

use hashbrown::HashMap;

use crate::values::Value;

/// Name of the reserved binding that receives a called function's result.
pub const LAST_RETURN: &str = "last_return";

#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Bind (or rebind) a name.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bindings.remove(name)
    }

    /// Copy of the current bindings, used as the starting environment of a callee.
    pub fn snapshot(&self) -> Environment {
        self.clone()
    }
}

impl<const N: usize> From<[(&str, Value); N]> for Environment {
    fn from(bindings: [(&str, Value); N]) -> Self {
        let mut env = Environment::new();
        for (name, value) in bindings {
            env.set(name, value);
        }
        env
    }
}
