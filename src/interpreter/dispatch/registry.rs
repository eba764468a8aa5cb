use std::{collections::HashMap, fmt};

use crate::{
    error::Interrupt,
    interpreter::value::core::{Type, Value},
    util::text::close_matches,
};

/// Result type of everything that evaluates: either a value or an
/// [`Interrupt`] carrying a runtime error or control signal.
pub type EvalResult<T> = Result<T, Interrupt>;

/// Type alias for native function implementations.
///
/// A native function receives the registry (so it can dispatch recursively,
/// for example on quantity magnitudes), the coerced positional arguments
/// and the validated keyword arguments.
pub type NativeFn = fn(&Registry, &[Value], &Keywords) -> EvalResult<Value>;

/// Keyword arguments of a call, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keywords(Vec<(String, Value)>);

impl Keywords {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, name: String, value: Value) {
        self.0.push((name, value));
    }

    /// The value of `name`, if it was passed.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(key, _)| key == name).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (String, Value)> {
        self.0.iter_mut()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Declared parameter kinds of one function header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub positional: Vec<Type>,
    /// Kind of every argument past the positional ones, if any are allowed.
    pub vararg:     Option<Type>,
    pub keywords:   Vec<(String, Type)>,
}

impl Signature {
    #[must_use]
    pub fn new(positional: &[Type]) -> Self {
        Self { positional: positional.to_vec(),
               vararg:     None,
               keywords:   Vec::new(), }
    }

    #[must_use]
    pub const fn vararg(mut self, kind: Type) -> Self {
        self.vararg = Some(kind);
        self
    }

    #[must_use]
    pub fn keyword(mut self, name: &str, kind: Type) -> Self {
        self.keywords.push((name.to_string(), kind));
        self
    }

    /// The declared kind of the argument at `index`.
    #[must_use]
    pub fn parameter(&self, index: usize) -> Option<Type> {
        self.positional.get(index).copied().or(self.vararg)
    }

    #[must_use]
    pub fn keyword_type(&self, name: &str) -> Option<Type> {
        self.keywords.iter().find(|(key, _)| key == name).map(|(_, kind)| *kind)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.positional.iter().map(ToString::to_string).collect();
        if let Some(vararg) = self.vararg {
            parts.push(format!("{vararg}..."));
        }
        write!(f, "({}", parts.join(", "))?;
        if !self.keywords.is_empty() {
            let keywords: Vec<String> = self.keywords
                                            .iter()
                                            .map(|(name, kind)| format!("{name}: {kind}"))
                                            .collect();
            write!(f, "; {}", keywords.join(", "))?;
        }
        write!(f, ")")
    }
}

/// One overload of a named function.
#[derive(Clone)]
pub struct FunctionHeader {
    pub name:           String,
    pub signature:      Signature,
    pub implementation: NativeFn,
}

impl fmt::Debug for FunctionHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.signature)
    }
}

/// Defines several fixed-arity overloads at once.
///
/// Each entry provides:
/// - a string name,
/// - the positional parameter kinds, as `Type` variant names,
/// - a function pointer implementing the overload.
///
/// ```ignore
/// register_functions!(builder, {
///     "sqrt" (Float) => sqrt,
///     "+" (Integer, Integer) => add,
/// });
/// ```
#[macro_export]
macro_rules! register_functions {
    (
        $builder:expr, {
            $(
                $name:literal ( $($kind:ident),* ) => $func:expr
            ),* $(,)?
        }
    ) => {
        $(
            $builder.register(
                $name,
                $crate::interpreter::dispatch::registry::Signature::new(
                    &[$($crate::interpreter::value::core::Type::$kind),*]
                ),
                $func,
            );
        )*
    };
}

/// Collects function headers before freezing them into a [`Registry`].
///
/// Headers registered under the same name keep their insertion order, which
/// breaks ties during dispatch.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    functions: HashMap<String, Vec<FunctionHeader>>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one overload of `name`.
    pub fn register(&mut self, name: &str, signature: Signature, implementation: NativeFn) -> &mut Self {
        self.functions
            .entry(name.to_string())
            .or_default()
            .push(FunctionHeader { name: name.to_string(),
                                   signature,
                                   implementation });
        self
    }

    #[must_use]
    pub fn build(self) -> Registry {
        Registry { functions: self.functions }
    }
}

/// Immutable table of every callable function and operator.
///
/// Built once at startup and shared read-only between evaluations.
#[derive(Debug)]
pub struct Registry {
    functions: HashMap<String, Vec<FunctionHeader>>,
}

impl Registry {
    /// Every overload registered under `name`, in registration order.
    #[must_use]
    pub fn headers(&self, name: &str) -> Option<&[FunctionHeader]> {
        self.functions.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// All function names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Printable signatures of every overload of `name`.
    #[must_use]
    pub fn signatures(&self, name: &str) -> Vec<String> {
        self.headers(name)
            .unwrap_or_default()
            .iter()
            .map(|header| header.signature.to_string())
            .collect()
    }

    /// Registered names one edit away from `name`.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::library::standard_functions;
    ///
    /// let registry = standard_functions();
    /// assert!(registry.close_matches("sqr").contains(&"sqrt".to_string()));
    /// ```
    #[must_use]
    pub fn close_matches(&self, name: &str) -> Vec<String> {
        close_matches(name, self.functions.keys().map(String::as_str))
    }
}
