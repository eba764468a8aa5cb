use thiserror::Error;

use crate::interpreter::lexer::{Span, Token};

/// Represents all errors that can occur while building the expression tree.
///
/// `index` is always the position in the token stream where parsing failed,
/// or the number of tokens when input ended early. [`ParseError::offset`]
/// turns it back into a byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token that cannot appear here.
    #[error("Unexpected token '{token}'.")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// Position of the token.
        index: usize,
    },
    /// Reached the end of input in the middle of an expression.
    #[error("Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// Number of tokens.
        index: usize,
    },
    /// A closing delimiter was expected but not found.
    #[error("Expected closing '{delimiter}'.")]
    ExpectedClosing {
        /// The missing delimiter.
        delimiter: &'static str,
        /// Where it was expected.
        index:     usize,
    },
    /// Two statement separators with nothing in between, or a trailing one.
    #[error("Empty statement.")]
    EmptyStatement {
        /// Position of the separator.
        index: usize,
    },
    /// `==` or `!=` used inside a longer comparison chain.
    #[error("Equality operators cannot be chained with other comparisons.")]
    ChainedEquality {
        /// Position of the offending operator.
        index: usize,
    },
    /// A chain such as `a < b > c`.
    #[error("Cannot mix '<' and '>' comparisons in one chain.")]
    MixedComparisonDirections {
        /// Position of the offending operator.
        index: usize,
    },
    /// More than two comparison operators in a row.
    #[error("At most two comparison operators may be chained.")]
    TooManyComparisons {
        /// Position of the third operator.
        index: usize,
    },
    /// A unit raised to something other than an integer literal.
    #[error("Unit exponents must be integers.")]
    NonIntegerUnitExponent {
        /// Position of the exponent.
        index: usize,
    },
    /// `|` in a unit signature with no unit after it.
    #[error("Expected a unit after '|'.")]
    MissingUnitAfterDivide {
        /// Position of the `|`.
        index: usize,
    },
    /// A positional argument written after a keyword argument.
    #[error("Positional arguments must come before keyword arguments.")]
    PositionalAfterKeyword {
        /// Position of the positional argument.
        index: usize,
    },
    /// Some other kind of parse error, with a custom message.
    #[error("{message}")]
    Other {
        /// Details about the parse error.
        message: String,
        /// Where the error occurred.
        index:   usize,
    },
}

impl ParseError {
    /// Token index where parsing failed.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::UnexpectedToken { index, .. }
            | Self::UnexpectedEndOfInput { index }
            | Self::ExpectedClosing { index, .. }
            | Self::EmptyStatement { index }
            | Self::ChainedEquality { index }
            | Self::MixedComparisonDirections { index }
            | Self::TooManyComparisons { index }
            | Self::NonIntegerUnitExponent { index }
            | Self::MissingUnitAfterDivide { index }
            | Self::PositionalAfterKeyword { index }
            | Self::Other { index, .. } => *index,
        }
    }

    /// Byte offset of the failing token in the source the `tokens` came from,
    /// or `source_len` past the last token.
    #[must_use]
    pub fn offset(&self, tokens: &[(Token, Span)], source_len: usize) -> usize {
        tokens.get(self.index()).map_or(source_len, |(_, span)| span.start)
    }
}
