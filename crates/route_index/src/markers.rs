//! Distance markers placed at fixed intervals along a route.

use foundation::Coordinate;
use foundation::math::{GeoPoint, bearing_deg, destination, distance_m, path_length_m};
use tracing::{debug, trace};

/// Default spacing between consecutive markers (meters).
pub const DEFAULT_MARKER_SPACING_M: f64 = 1000.0;

/// Strictly positive, finite distance between consecutive markers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerSpacing(f64);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InvalidSpacing {
    pub meters: f64,
}

impl std::fmt::Display for InvalidSpacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "marker spacing must be a positive finite distance, got {}",
            self.meters
        )
    }
}

impl std::error::Error for InvalidSpacing {}

impl MarkerSpacing {
    pub fn new(meters: f64) -> Result<Self, InvalidSpacing> {
        if meters.is_finite() && meters > 0.0 {
            Ok(Self(meters))
        } else {
            Err(InvalidSpacing { meters })
        }
    }

    pub fn meters(self) -> f64 {
        self.0
    }
}

impl Default for MarkerSpacing {
    fn default() -> Self {
        Self(DEFAULT_MARKER_SPACING_M)
    }
}

/// A point on the route tagged with its distance from the start.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DistanceMarker {
    pub position: Coordinate,
    pub distance_m: f64,
}

impl DistanceMarker {
    /// Overlay label in kilometres, e.g. `"3 km"` or `"2.5 km"`.
    pub fn label(&self) -> String {
        let km = self.distance_m / 1000.0;
        if (km - km.round()).abs() < 1e-9 {
            return format!("{} km", km.round() as i64);
        }
        let fixed = format!("{km:.2}");
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        format!("{trimmed} km")
    }
}

/// Length of a route along its segments (meters).
///
/// Non-finite coordinates are skipped, as in [`place_markers`].
pub fn route_length_m(polyline: &[Coordinate]) -> f64 {
    path_length_m(&finite_points(polyline))
}

fn finite_points(polyline: &[Coordinate]) -> Vec<GeoPoint> {
    polyline
        .iter()
        .filter(|c| {
            let keep = c.is_finite();
            if !keep {
                trace!(?c, "dropping non-finite route coordinate");
            }
            keep
        })
        .copied()
        .map(GeoPoint::from)
        .collect()
}

/// Place a marker every `spacing` meters along `polyline`.
///
/// Markers are ordered by distance and the n-th marker sits at exactly
/// `n * spacing`. A threshold must fall strictly before the end of a segment to
/// produce a marker, so the final route vertex never carries one: a route that
/// is exactly one interval long yields no markers. Fewer than two points yield
/// none. Duplicate consecutive points form zero-length segments and are passed
/// over. Non-finite coordinates are dropped before walking the route.
pub fn place_markers(polyline: &[Coordinate], spacing: MarkerSpacing) -> Vec<DistanceMarker> {
    let points = finite_points(polyline);

    let interval = spacing.meters();
    let mut markers = Vec::new();
    let mut total_m = 0.0;
    let mut next_index: u64 = 1;

    for segment in points.windows(2) {
        let (start, end) = (segment[0], segment[1]);
        let segment_m = distance_m(start, end);

        let mut bearing: Option<f64> = None;
        loop {
            let next_marker_m = next_index as f64 * interval;
            // Exit once the next threshold lies at or past the end of this segment.
            if total_m + segment_m <= next_marker_m {
                break;
            }
            let offset_m = next_marker_m - total_m;
            let heading = *bearing.get_or_insert_with(|| bearing_deg(start, end));
            markers.push(DistanceMarker {
                position: destination(start, offset_m, heading).into(),
                distance_m: next_marker_m,
            });
            next_index += 1;
        }

        total_m += segment_m;
    }

    debug!(
        markers = markers.len(),
        route_length_m = total_m,
        interval_m = interval,
        "placed distance markers"
    );
    markers
}
