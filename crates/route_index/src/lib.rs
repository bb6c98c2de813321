//! Distance indexing over route polylines: evenly spaced distance markers and
//! nearest-sample lookup for elevation profile hover.

pub mod locator;
pub mod markers;
pub mod profile;

pub use locator::*;
pub use markers::*;
pub use profile::*;
