/// Dimension vectors over the seven SI base units.
pub mod vector;
/// The unit registry: lookup with prefixes, and composition of unit
/// signatures into a single vector, multiplier and offset.
pub mod registry;
/// The standard table of units and prefixes.
pub mod table;
/// The quantity value: a magnitude in SI base units plus its dimensions.
pub mod quantity;
