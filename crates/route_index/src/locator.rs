//! Nearest-sample lookup by cumulative distance.
//!
//! Used to follow a hover cursor on an elevation profile chart with a point on
//! the map. All sample groups form one flat search space: groups that each
//! restart at zero distance compete with each other, and the earliest sample
//! in scan order wins a tie.

use foundation::Coordinate;
use tracing::trace;

use crate::profile::{DistanceSample, ProfileGeometry};

/// Sample whose distance is closest to `target_m`, first one on ties.
///
/// Samples with a non-finite distance are skipped.
pub fn nearest_sample<I>(target_m: f64, samples: I) -> Option<DistanceSample>
where
    I: IntoIterator<Item = DistanceSample>,
{
    let mut best: Option<(DistanceSample, f64)> = None;
    for sample in samples {
        if !sample.distance_m.is_finite() {
            trace!(?sample, "skipping sample without usable distance");
            continue;
        }
        let diff = (sample.distance_m - target_m).abs();
        if best.map(|(_, best_diff)| diff < best_diff).unwrap_or(true) {
            best = Some((sample, diff));
        }
    }
    best.map(|(sample, _)| sample)
}

/// Position of the sample closest to `target_m` across every group.
///
/// `None` when there is no active target (absent or non-finite) or no sample
/// carries a distance.
pub fn nearest_in_groups<G>(target_m: Option<f64>, groups: &[G]) -> Option<Coordinate>
where
    G: AsRef<[DistanceSample]>,
{
    let target_m = active_target(target_m)?;
    let samples = groups.iter().flat_map(|g| g.as_ref().iter().copied());
    nearest_sample(target_m, samples).map(|s| s.position)
}

/// Position on the profile closest to `target_m`, scanning only line features.
///
/// Point and area geometries in `features` are ignored. Returns `None` when
/// the cursor is inactive or no line vertex carries a distance.
pub fn find_nearest_by_distance(
    target_m: Option<f64>,
    features: &[ProfileGeometry],
) -> Option<Coordinate> {
    let target_m = active_target(target_m)?;
    let samples = features.iter().flat_map(|f| f.samples());
    nearest_sample(target_m, samples).map(|s| s.position)
}

fn active_target(target_m: Option<f64>) -> Option<f64> {
    target_m.filter(|t| t.is_finite())
}
