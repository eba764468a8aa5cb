use thiserror::Error;

use crate::interpreter::lexer::tokenize;

/// Tokenizer errors.
///
/// Raised when the source text contains characters or literals that do not
/// form a valid token.
pub mod lex_error;
/// Parsing errors.
///
/// Defines the errors detected while turning tokens into an expression tree:
/// unexpected tokens, malformed comparison chains, bad unit signatures and so
/// on.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and
/// function dispatch. Runtime errors include things like division by zero,
/// incompatible quantities, unknown units or no matching function signature.
pub mod runtime_error;
/// Control signals and the `Interrupt` type that carries them alongside
/// runtime errors.
pub mod signal;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use signal::{ControlSignal, Interrupt};

/// Every way [`execute`](crate::execute) can stop without a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The source could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The tokens could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// Evaluation was stopped by a control signal such as `quit()`.
    #[error("Evaluation stopped by {0:?}.")]
    Signal(ControlSignal),
}

impl From<Interrupt> for Error {
    fn from(interrupt: Interrupt) -> Self {
        match interrupt {
            Interrupt::Error(error) => Self::Runtime(error),
            Interrupt::Signal(signal) => Self::Signal(signal),
        }
    }
}

impl Error {
    /// Byte offset in `source` the error points at, when it has one.
    ///
    /// Lex errors already carry a byte offset. Parse errors carry a token
    /// index, so `source` is tokenized again to find where that token starts.
    #[must_use]
    pub fn offset(&self, source: &str) -> Option<usize> {
        match self {
            Self::Lex(error) => Some(error.index()),
            Self::Parse(error) => tokenize(source).ok()
                                                  .map(|tokens| error.offset(&tokens, source.len())),
            Self::Runtime(_) | Self::Signal(_) => None,
        }
    }
}
