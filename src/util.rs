/// Numeric conversion helpers.
///
/// Checked conversions between the numeric tower and primitive integer and
/// floating-point types. Every function returns a `Result` and never loses
/// information silently.
pub mod num;
/// Edit-distance helpers used for "did you mean" suggestions.
pub mod text;
/// Special functions: the Gamma function and the error function.
pub mod special;
