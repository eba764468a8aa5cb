/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine: variables, calls, quantities,
/// conversions and comparison chains.
pub mod core;

/// Evaluation of array comprehensions.
///
/// Binds generator variables in turn, filters by the predicates and collects
/// the body values.
pub mod comprehension;

/// Variables that outlive a single evaluation.
pub mod environment;
