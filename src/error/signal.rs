use crate::error::RuntimeError;

/// Non-error control flow raised by a builtin and carried out to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// `quit()` was called.
    Exit,
}

/// Anything that stops evaluation early.
///
/// Evaluation functions return `Result<T, Interrupt>` so that `?` carries both
/// real errors and control signals up to [`execute`](crate::execute) without
/// conflating the two.
#[derive(Debug, Clone, PartialEq)]
pub enum Interrupt {
    /// Evaluation failed.
    Error(RuntimeError),
    /// Evaluation asked the host to do something.
    Signal(ControlSignal),
}

impl From<RuntimeError> for Interrupt {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

impl From<ControlSignal> for Interrupt {
    fn from(signal: ControlSignal) -> Self {
        Self::Signal(signal)
    }
}
