use foundation::Coordinate;

/// One position of a profile feature as delivered by the routing engine.
///
/// Distance and elevation are optional because upstream profiles may omit
/// them for individual points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProfileVertex {
    pub position: Coordinate,
    pub elevation_m: Option<f64>,
    pub distance_m: Option<f64>,
}

impl ProfileVertex {
    pub fn new(position: Coordinate, elevation_m: Option<f64>, distance_m: Option<f64>) -> Self {
        Self {
            position,
            elevation_m,
            distance_m,
        }
    }

    /// The vertex as a locator sample, if it carries a usable distance.
    pub fn sample(&self) -> Option<DistanceSample> {
        let distance_m = self.distance_m.filter(|d| d.is_finite())?;
        if !self.position.is_finite() {
            return None;
        }
        Some(DistanceSample {
            position: self.position,
            distance_m,
        })
    }
}

/// A map position paired with its cumulative distance along the route.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DistanceSample {
    pub position: Coordinate,
    pub distance_m: f64,
}

impl DistanceSample {
    pub fn new(position: Coordinate, distance_m: f64) -> Self {
        Self {
            position,
            distance_m,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileGeometry {
    Point(ProfileVertex),
    MultiPoint(Vec<ProfileVertex>),
    LineString(Vec<ProfileVertex>),
    MultiLineString(Vec<Vec<ProfileVertex>>),
    Polygon(Vec<Vec<ProfileVertex>>),
    MultiPolygon(Vec<Vec<Vec<ProfileVertex>>>),
}

impl ProfileGeometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            ProfileGeometry::Point(_) => GeometryKind::Point,
            ProfileGeometry::MultiPoint(_) => GeometryKind::MultiPoint,
            ProfileGeometry::LineString(_) => GeometryKind::LineString,
            ProfileGeometry::MultiLineString(_) => GeometryKind::MultiLineString,
            ProfileGeometry::Polygon(_) => GeometryKind::Polygon,
            ProfileGeometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }

    /// Vertices of a connected line; `None` for every other kind.
    pub fn line_vertices(&self) -> Option<&[ProfileVertex]> {
        match self {
            ProfileGeometry::LineString(vertices) => Some(vertices),
            _ => None,
        }
    }

    /// Distance samples of a line in vertex order. Empty for non-line kinds.
    pub fn samples(&self) -> impl Iterator<Item = DistanceSample> + '_ {
        self.line_vertices()
            .unwrap_or_default()
            .iter()
            .filter_map(ProfileVertex::sample)
    }
}
