use thiserror::Error;

use crate::interpreter::{units::vector::QuantityVector, value::core::Type};

/// Represents all errors that can occur during evaluation and dispatch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Read a variable that was never assigned.
    #[error("Variable '{name}' has not been assigned.")]
    UnassignedVariable {
        /// The name of the variable.
        name: String,
    },
    /// Divided (or took a remainder) by zero.
    #[error("Division by zero.")]
    DivisionByZero,
    /// A result was too large to represent.
    #[error("Numeric overflow while computing result.")]
    NumericOverflow,
    /// A floating-point result was NaN.
    #[error("Result is not a number.")]
    NotANumber,
    /// Added, subtracted, compared or converted quantities of different
    /// dimensions.
    #[error("Incompatible quantities: {left} and {right}.")]
    IncompatibleQuantities {
        /// Dimensions of the left operand.
        left:  QuantityVector,
        /// Dimensions of the right operand.
        right: QuantityVector,
    },
    /// A unit with an offset (such as `degC`) was combined with another unit
    /// or raised to a power other than one.
    #[error("Unit '{unit}' has an offset and cannot be combined with other units or raised to a power.")]
    IncompatibleOffsetUnit {
        /// The offending unit.
        unit: String,
    },
    /// A prefix was applied to a unit with an offset.
    #[error("Unit '{unit}' has an offset and cannot take the prefix '{prefix}'.")]
    InvalidPrefix {
        /// The prefix that was stripped.
        prefix: String,
        /// The unit it was applied to.
        unit:   String,
    },
    /// No unit or prefixed unit has this name.
    #[error("Unknown unit '{name}'.")]
    UnknownUnit {
        /// The name as written.
        name: String,
    },
    /// Called a function that has no registered headers.
    #[error("Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name: String,
    },
    /// A function exists but no header accepts these argument kinds.
    #[error("Function '{name}' cannot be called with ({}). Known signatures: {}.",
            join_kinds(.arguments), .known.join("; "))]
    NoMatchingSignature {
        /// The name of the function.
        name:      String,
        /// Kinds of the supplied positional arguments.
        arguments: Vec<Type>,
        /// Printable signatures of every header registered under `name`.
        known:     Vec<String>,
    },
    /// A keyword argument the chosen header does not declare.
    #[error("Function '{name}' has no keyword argument '{keyword}'.")]
    UnknownKeyword {
        /// The name of the function.
        name:    String,
        /// The unknown keyword.
        keyword: String,
    },
    /// A keyword argument of the wrong kind.
    #[error("Keyword '{keyword}' of '{name}' expects {expected}, got {got}.")]
    BadKeywordType {
        /// The name of the function.
        name:     String,
        /// The keyword.
        keyword:  String,
        /// Kind of the supplied value.
        got:      Type,
        /// Declared kind.
        expected: Type,
    },
    /// An argument was accepted by type but is out of its domain.
    #[error("Invalid argument: {details}.")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
    },
    /// `assert` received `false`.
    #[error("Assertion failed.")]
    AssertionFailed,
    /// A date literal that does not describe a valid point in time.
    #[error("Invalid date '{text}'.")]
    InvalidInstant {
        /// The text between the `#` markers.
        text: String,
    },
    /// A boolean was required, for example as a comprehension predicate.
    #[error("Expected a boolean, got {got}.")]
    ExpectedBoolean {
        /// Kind of the value found instead.
        got: Type,
    },
    /// A comprehension generator ranged over something that cannot be
    /// iterated.
    #[error("Cannot iterate over {got}.")]
    NotIterable {
        /// Kind of the value found instead.
        got: Type,
    },
}

fn join_kinds(kinds: &[Type]) -> String {
    kinds.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
