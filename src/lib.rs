//! # ka
//!
//! ka is a calculator language written in Rust. It evaluates expressions
//! with exact integer and fraction arithmetic, physical units, arrays,
//! intervals, dates and probability distributions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::sync::OnceLock;

use crate::{
    error::Error,
    interpreter::{Interpreter, evaluator::environment::Environment, value::core::Value},
};

/// The expression tree produced by the parser.
///
/// Operators are already calls by name here (`1 + 2` is a call to `+`), so
/// the evaluator only needs to know about literals, variables, calls,
/// quantities, conversions, arrays, comprehensions and comparison chains.
pub mod ast;
/// User settings read from a `name = value` file.
pub mod config;
/// Human-readable rendering of values with a configurable precision.
pub mod display;
/// Lex, parse and runtime errors.
///
/// Each phase has its own enum. Lex errors carry a byte offset and parse
/// errors a token index; [`error::Error::offset`] turns either into a byte
/// offset for caret messages. `quit()` is not an error and travels as a
/// [`error::ControlSignal`] instead.
pub mod error;
/// Tokens to tree to value.
///
/// [`interpreter::Interpreter`] owns the function and unit registries and
/// runs the lexer, parser and evaluator over a source string.
pub mod interpreter;
/// Helpers shared by the library and the command line: checked conversions
/// out of [`interpreter::value::number::Number`], the Gamma and error
/// functions, and near-miss name matching for suggestions.
pub mod util;

/// The interpreter used by [`execute`] and [`execute_default`], built on first
/// use.
fn standard_interpreter() -> &'static Interpreter {
    static INTERPRETER: OnceLock<Interpreter> = OnceLock::new();
    INTERPRETER.get_or_init(Interpreter::new)
}

/// Runs `source` with the standard functions and units.
///
/// Variables assigned by the script are stored in `env`, so consecutive calls
/// can build on each other.
///
/// # Errors
/// Returns an error if lexing, parsing or evaluation fails, or
/// [`Error::Signal`] if the script calls `quit()`.
///
/// # Examples
/// ```
/// use ka::{execute, interpreter::{evaluator::environment::Environment, value::core::Value}};
///
/// let mut env = Environment::new();
/// assert_eq!(execute("x = 3", &mut env).unwrap(), Some(Value::from(3)));
/// assert_eq!(execute("5 * x", &mut env).unwrap(), Some(Value::from(15)));
///
/// // 'y' is not defined.
/// assert!(execute("y + 1", &mut env).is_err());
/// ```
pub fn execute(source: &str, env: &mut Environment) -> Result<Option<Value>, Error> {
    standard_interpreter().execute(source, env)
}

/// [`execute`] in a fresh environment.
///
/// # Errors
/// The same as [`execute`].
///
/// # Examples
/// ```
/// use ka::execute_default;
///
/// let value = execute_default("1+2*3-3^2").unwrap().unwrap();
/// assert_eq!(value.to_string(), "-2");
/// assert_eq!(execute_default("").unwrap(), None);
/// ```
pub fn execute_default(source: &str) -> Result<Option<Value>, Error> {
    execute(source, &mut Environment::new())
}
