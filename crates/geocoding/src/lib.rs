//! Place search result normalization for the two supported geocoding
//! services. The active service is fixed once from configuration.

pub mod backend;
pub mod config;
mod nominatim;
mod photon;
pub mod result;

pub use backend::*;
pub use config::*;
pub use result::*;
