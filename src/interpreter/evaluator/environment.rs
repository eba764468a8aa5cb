use std::collections::HashMap;

use crate::interpreter::value::{core::Value, number::Number};

/// Variable bindings that persist between calls to
/// [`execute`](crate::execute).
///
/// A fresh environment knows `e` and `pi`. Assignments may overwrite them.
#[derive(Debug, Clone)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding the builtin constants.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::evaluator::environment::Environment;
    ///
    /// let env = Environment::new();
    /// assert!(env.get("pi").is_some());
    /// assert!(env.get("x").is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        let mut variables = HashMap::new();
        variables.insert("e".to_string(), Value::Number(Number::Float(std::f64::consts::E)));
        variables.insert("pi".to_string(), Value::Number(Number::Float(std::f64::consts::PI)));
        Self { variables }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    /// Variable names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.variables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
