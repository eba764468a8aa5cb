/// Function headers, signatures and the registry that stores them.
///
/// The registry is assembled through a [`RegistryBuilder`](registry::RegistryBuilder)
/// at startup and is immutable afterwards.
pub mod registry;
/// Overload resolution: picks the most specific header for a call, checks
/// keyword arguments and coerces arguments along the type lattice.
pub mod resolve;
