use glam::DVec2;

use crate::data::CityRecord;
use crate::geo::{bearing_and_distance, GeoPoint};
use crate::map::projection::PolarScale;

/// Axis-aligned rectangle in render units (character cells for this
/// renderer)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Strict-inequality AABB overlap: boxes that merely share an edge do
    /// not overlap.
    #[inline]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.left < other.left + other.width
            && other.left < self.left + self.width
            && self.top < other.top + other.height
            && other.top < self.top + self.height
    }
}

/// The rendering collaborator's side of label placement: given a candidate
/// label at a screen position, report the rectangle a trial marker+label
/// would occupy. Candidates that fail placement are never drawn.
pub trait LabelOracle {
    fn trial_box(&self, label: &str, position: DVec2) -> BoundingBox;
}

/// A city that survived placement
#[derive(Clone, Debug)]
pub struct PlacedLabel {
    pub label: String,
    /// Base screen position in braille pixels (pre view-transform)
    pub position: DVec2,
    pub bbox: BoundingBox,
}

/// Greedy, order-preserving label placement.
///
/// Cities are considered strictly in input order up to `cap`; a candidate is
/// rejected if its trial box overlaps any previously accepted box, including
/// the seeded boxes of non-city elements (ring distance labels, rim
/// letters). Earlier cities always win contested space; callers control
/// quality only by pre-sorting the input. Deterministic for a fixed input
/// order.
///
/// The accepted-set scan is O(n²) in survivors, acceptable at the capped
/// input size.
pub struct LabelPlacer {
    accepted: Vec<BoundingBox>,
}

impl LabelPlacer {
    pub fn new() -> Self {
        Self { accepted: Vec::new() }
    }

    /// Pre-seed the accepted set with boxes of already-drawn elements so
    /// cities never cover them.
    pub fn with_seeds(seeds: Vec<BoundingBox>) -> Self {
        Self { accepted: seeds }
    }

    pub fn place(
        &mut self,
        observer: GeoPoint,
        cities: &[CityRecord],
        scale: &PolarScale,
        center: DVec2,
        oracle: &impl LabelOracle,
        cap: usize,
    ) -> Vec<PlacedLabel> {
        let mut placed = Vec::new();

        for city in cities.iter().take(cap) {
            let bd = bearing_and_distance(observer, city.point());
            let position = scale.to_screen(scale.project(bd), center);
            let bbox = oracle.trial_box(&city.label, position);

            if self.accepted.iter().any(|b| bbox.overlaps(b)) {
                continue;
            }

            self.accepted.push(bbox);
            placed.push(PlacedLabel {
                label: city.label.clone(),
                position,
                bbox,
            });
        }

        placed
    }
}

impl Default for LabelPlacer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every label gets a fixed-size box anchored at its position
    struct FixedOracle {
        w: f64,
        h: f64,
    }

    impl LabelOracle for FixedOracle {
        fn trial_box(&self, _label: &str, position: DVec2) -> BoundingBox {
            BoundingBox::new(position.x, position.y, self.w, self.h)
        }
    }

    fn city(label: &str, lat: f64, lng: f64) -> CityRecord {
        CityRecord {
            label: label.to_string(),
            latitude: lat,
            longitude: lng,
        }
    }

    #[test]
    fn test_adjacent_boxes_do_not_overlap() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 2.0);
        let b = BoundingBox::new(10.0, 0.0, 10.0, 2.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_intersecting_boxes_overlap() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 2.0);
        let b = BoundingBox::new(9.0, 1.0, 10.0, 2.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = BoundingBox::new(0.0, 0.0, 20.0, 20.0);
        let inner = BoundingBox::new(5.0, 5.0, 2.0, 2.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_earlier_city_wins_contested_space() {
        let cities = vec![
            city("First", 10.0, 10.0),
            city("Second", 10.01, 10.01), // projects a fraction of a pixel away
        ];
        let scale = PolarScale::new(400.0);
        let oracle = FixedOracle { w: 8.0, h: 4.0 };
        let mut placer = LabelPlacer::new();
        let placed = placer.place(
            GeoPoint::new(0.0, 0.0),
            &cities,
            &scale,
            DVec2::new(500.0, 500.0),
            &oracle,
            2000,
        );
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].label, "First");
    }

    #[test]
    fn test_distant_cities_both_survive() {
        let cities = vec![city("A", 10.0, 10.0), city("B", -30.0, -120.0)];
        let scale = PolarScale::new(400.0);
        let oracle = FixedOracle { w: 8.0, h: 4.0 };
        let mut placer = LabelPlacer::new();
        let placed = placer.place(
            GeoPoint::new(0.0, 0.0),
            &cities,
            &scale,
            DVec2::new(500.0, 500.0),
            &oracle,
            2000,
        );
        assert_eq!(placed.len(), 2);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let cities: Vec<CityRecord> = (0..200)
            .map(|i| {
                city(
                    &format!("C{i}"),
                    (i as f64 * 7.3) % 120.0 - 60.0,
                    (i as f64 * 13.7) % 300.0 - 150.0,
                )
            })
            .collect();
        let scale = PolarScale::new(400.0);
        let oracle = FixedOracle { w: 10.0, h: 3.0 };
        let observer = GeoPoint::new(39.91, 116.39);
        let center = DVec2::new(500.0, 500.0);

        let run = || {
            LabelPlacer::new()
                .place(observer, &cities, &scale, center, &oracle, 2000)
                .iter()
                .map(|p| p.label.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_seeded_boxes_reject_cities() {
        let cities = vec![city("Blocked", 10.0, 10.0)];
        let scale = PolarScale::new(400.0);
        let oracle = FixedOracle { w: 8.0, h: 4.0 };
        let observer = GeoPoint::new(0.0, 0.0);
        let center = DVec2::new(500.0, 500.0);

        // Find where the city would land, then seed a box right on top
        let bd = bearing_and_distance(observer, cities[0].point());
        let pos = scale.to_screen(scale.project(bd), center);
        let seed = BoundingBox::new(pos.x - 1.0, pos.y - 1.0, 4.0, 4.0);

        let placed = LabelPlacer::with_seeds(vec![seed])
            .place(observer, &cities, &scale, center, &oracle, 2000);
        assert!(placed.is_empty());
    }

    #[test]
    fn test_cap_limits_candidates() {
        let cities: Vec<CityRecord> = (0..50)
            .map(|i| city(&format!("C{i}"), i as f64, i as f64 * 2.0))
            .collect();
        let scale = PolarScale::new(4000.0);
        // Tiny boxes so nothing collides; the cap is the only limit
        let oracle = FixedOracle { w: 0.5, h: 0.5 };
        let placed = LabelPlacer::new().place(
            GeoPoint::new(-40.0, -90.0),
            &cities,
            &scale,
            DVec2::new(5000.0, 5000.0),
            &oracle,
            10,
        );
        assert_eq!(placed.len(), 10);
    }
}
