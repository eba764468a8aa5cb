use std::{fmt, rc::Rc};

use crate::{
    display::ValueFormatter,
    error::RuntimeError,
    interpreter::{
        units::quantity::Quantity,
        value::{
            combinatoric::Combinatoric, instant::Instant, interval::Interval, number::Number,
            random::RandomVariable,
        },
    },
};

/// The kind of a runtime value, as seen by the function dispatcher.
///
/// Kinds form a fixed lattice:
/// `Integer <: Rational <: Float <: Number <: Any`, `Combinatoric <: Number`,
/// and every other kind sits directly below `Any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Integer,
    Rational,
    Float,
    Number,
    Bool,
    String,
    Array,
    Quantity,
    Interval,
    Instant,
    Combinatoric,
    RandomVariable,
    Any,
}

impl Type {
    /// Returns `true` when a value of kind `self` may be passed where `other`
    /// is declared.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::value::core::Type;
    ///
    /// assert!(Type::Integer.is_subtype_of(Type::Float));
    /// assert!(Type::Combinatoric.is_subtype_of(Type::Number));
    /// assert!(!Type::Float.is_subtype_of(Type::Rational));
    /// assert!(Type::Instant.is_subtype_of(Type::Any));
    /// assert!(!Type::Quantity.is_subtype_of(Type::Number));
    /// ```
    #[must_use]
    pub const fn is_subtype_of(self, other: Self) -> bool {
        match (self, other) {
            (_, Self::Any) => true,
            (Self::Integer, Self::Rational | Self::Float | Self::Number)
            | (Self::Rational, Self::Float | Self::Number)
            | (Self::Float | Self::Combinatoric, Self::Number) => true,
            (a, b) => a as u8 == b as u8,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::Rational => "Rational",
            Self::Float => "Float",
            Self::Number => "Number",
            Self::Bool => "Bool",
            Self::String => "String",
            Self::Array => "Array",
            Self::Quantity => "Quantity",
            Self::Interval => "Interval",
            Self::Instant => "Instant",
            Self::Combinatoric => "Combinatoric",
            Self::RandomVariable => "RandomVariable",
            Self::Any => "Any",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents a runtime value in the interpreter.
///
/// Numbers produced by evaluation are always in their simplest kind; see
/// [`Number::simplify`].
#[derive(Debug, Clone)]
pub enum Value {
    /// An integer, fraction or float.
    Number(Number),
    /// Produced by comparisons.
    Bool(bool),
    /// A number with physical dimensions.
    Quantity(Quantity),
    /// An ordered list of values, written `{a, b, c}`.
    Array(Rc<Vec<Self>>),
    String(Rc<str>),
    Instant(Instant),
    Interval(Interval),
    /// An unevaluated product quotient of integer ranges.
    Combinatoric(Rc<Combinatoric>),
    /// A probability distribution.
    RandomVariable(Rc<dyn RandomVariable>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Quantity(a), Self::Quantity(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Instant(a), Self::Instant(b)) => a == b,
            (Self::Interval(a), Self::Interval(b)) => a == b,
            (Self::Combinatoric(a), Self::Combinatoric(b)) => a == b,
            (Self::RandomVariable(a), Self::RandomVariable(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(Number::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(Rc::from(s))
    }
}

impl Value {
    /// The dispatcher kind of this value.
    #[must_use]
    pub const fn kind(&self) -> Type {
        match self {
            Self::Number(Number::Integer(_)) => Type::Integer,
            Self::Number(Number::Rational(_)) => Type::Rational,
            Self::Number(Number::Float(_)) => Type::Float,
            Self::Bool(_) => Type::Bool,
            Self::Quantity(_) => Type::Quantity,
            Self::Array(_) => Type::Array,
            Self::String(_) => Type::String,
            Self::Instant(_) => Type::Instant,
            Self::Interval(_) => Type::Interval,
            Self::Combinatoric(_) => Type::Combinatoric,
            Self::RandomVariable(_) => Type::RandomVariable,
        }
    }

    /// Collapses numbers to their simplest kind. Other values are returned
    /// unchanged.
    #[must_use]
    pub fn simplify(self) -> Self {
        match self {
            Self::Number(n) => Self::Number(n.simplify()),
            Self::Quantity(mut q) => {
                q.magnitude = q.magnitude.simplify();
                Self::Quantity(q)
            },
            other => other,
        }
    }

    /// Returns the numeric value, resolving combinatorics.
    ///
    /// # Errors
    /// `InvalidArgument` for non-numeric values.
    pub fn as_number(&self) -> Result<Number, RuntimeError> {
        match self {
            Self::Number(n) => Ok(n.clone()),
            Self::Combinatoric(c) => Ok(c.resolve()),
            other => Err(RuntimeError::InvalidArgument { details: format!("expected a number, got {}", other.kind()) }),
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    pub fn as_bool(&self) -> Result<bool, RuntimeError> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(RuntimeError::ExpectedBoolean { got: other.kind() }),
        }
    }

    /// Returns the elements of an array value.
    pub fn as_array(&self) -> Result<&[Self], RuntimeError> {
        match self {
            Self::Array(items) => Ok(items.as_slice()),
            other => Err(RuntimeError::InvalidArgument { details: format!("expected an array, got {}", other.kind()) }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ValueFormatter::default().format_nested(self))
    }
}
