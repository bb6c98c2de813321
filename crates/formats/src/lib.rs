pub mod encoded_polyline;
mod geojson;
pub mod marker_geojson;
pub mod profile_geojson;
pub mod route_geojson;

pub use encoded_polyline::*;
pub use marker_geojson::*;
pub use profile_geojson::*;
pub use route_geojson::*;
