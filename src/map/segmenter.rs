use rayon::prelude::*;

use crate::geo::{bearing_and_distance, GeoPoint};
use crate::map::projection::{PolarScale, ProjectedPoint};

/// One drawable polyline in polar render space. Fewer than 2 points cannot
/// form a path; such segments are dropped by the renderer, not here.
pub type CoastlineSegment = Vec<ProjectedPoint>;

/// Project geographic rings around `observer` and split them into drawable
/// segments.
///
/// Rings that pass near the observer's antipode produce huge jumps in
/// projected position between neighboring points; drawing through such a
/// jump paints a spurious line across the whole map. A segment is therefore
/// closed whenever the bearing to consecutive points changes by more than
/// `threshold_deg` degrees, and the offending point starts a fresh segment.
///
/// Rings are independent, so they are projected in parallel; output order is
/// ring order, then segment order within each ring.
pub fn segment_rings(
    observer: GeoPoint,
    rings: &[Vec<GeoPoint>],
    scale: &PolarScale,
    threshold_deg: f64,
) -> Vec<CoastlineSegment> {
    rings
        .par_iter()
        .flat_map_iter(|ring| segment_ring(observer, ring, scale, threshold_deg))
        .collect()
}

/// Segment a single ring. Empty input yields no segments; a 1-point ring
/// yields one 1-point segment.
pub fn segment_ring(
    observer: GeoPoint,
    ring: &[GeoPoint],
    scale: &PolarScale,
    threshold_deg: f64,
) -> Vec<CoastlineSegment> {
    let mut segments = Vec::new();
    let mut current: CoastlineSegment = Vec::new();
    let mut last_bearing: Option<f64> = None;

    for &point in ring {
        let bd = bearing_and_distance(observer, point);

        if let Some(last) = last_bearing {
            if (last - bd.bearing).abs().to_degrees() > threshold_deg {
                segments.push(std::mem::take(&mut current));
            }
        }

        current.push(scale.project(bd));
        last_bearing = Some(bd.bearing);
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}
