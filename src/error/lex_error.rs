use thiserror::Error;

/// Errors raised while splitting source text into tokens.
///
/// Every variant carries the byte offset in the source where the offending
/// token starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// No token matches the input at this position.
    #[error("Unknown token at index {index}.")]
    UnknownToken {
        /// Byte offset of the unrecognized character.
        index: usize,
    },
    /// A number literal contains a digit that is invalid for its base.
    #[error("Badly formed number at index {index}.")]
    BadNumber {
        /// Byte offset of the literal.
        index: usize,
    },
    /// A string literal is missing its closing quote.
    #[error("Unclosed string starting at index {index}.")]
    UnclosedString {
        /// Byte offset of the opening quote.
        index: usize,
    },
    /// A date literal is missing its closing `#`.
    #[error("Unclosed date literal starting at index {index}.")]
    UnclosedDateLiteral {
        /// Byte offset of the opening `#`.
        index: usize,
    },
}

impl LexError {
    /// Byte offset in the source where the error was found.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::UnknownToken { index }
            | Self::BadNumber { index }
            | Self::UnclosedString { index }
            | Self::UnclosedDateLiteral { index } => *index,
        }
    }
}
