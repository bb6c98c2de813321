pub mod coordinate;
pub mod math;

// Foundation crate: small, well-tested primitives only.
pub use coordinate::*;
