/// Entry points: programs, statements and full expressions.
///
/// Handles `;`-separated statements, assignments and `to` conversions.
pub mod core;

/// Binary operator parsing.
///
/// Implements the precedence levels from comparison down to exponentiation.
/// Every operator becomes a call to the function of the same name.
pub mod binary;

/// Terms.
///
/// Parses signs, literals, calls, variables, arrays, comprehensions,
/// intervals and the postfixes that may follow a term.
pub mod unary;

/// Unit signatures after a magnitude or after `to`.
pub mod units;

/// The token cursor shared by every parsing function.
pub mod utils;
