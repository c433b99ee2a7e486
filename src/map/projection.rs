use std::f64::consts::FRAC_PI_2;

use glam::DVec2;

use crate::geo::{BearingDistance, EARTH_HALF_CIRCUMFERENCE_KM};

/// A point in polar render space: screen angle plus radius in braille pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    /// Mathematical angle in radians (0 = screen right, counter-clockwise)
    pub angle: f64,
    /// Distance from the map center in render units
    pub radius: f64,
}

/// Maps great-circle distance and bearing into polar render space.
///
/// Distance maps linearly from [0, half circumference] onto [0, max_radius],
/// so the rim of the map is the observer's antipode. Inputs past the domain
/// extrapolate linearly; they cannot occur for spherical coordinates but are
/// tolerated.
#[derive(Clone, Copy, Debug)]
pub struct PolarScale {
    max_radius: f64,
}

impl PolarScale {
    pub fn new(max_radius: f64) -> Self {
        Self { max_radius }
    }

    /// Scale sized to a canvas: half the smaller pixel dimension minus a
    /// margin that leaves room for the rim direction letters.
    pub fn for_canvas(width_px: usize, height_px: usize, margin_px: f64) -> Self {
        let half = width_px.min(height_px) as f64 / 2.0;
        Self::new((half - margin_px).max(1.0))
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Linear distance-to-radius interpolation
    #[inline]
    pub fn distance_to_radius(&self, distance_km: f64) -> f64 {
        distance_km / EARTH_HALF_CIRCUMFERENCE_KM * self.max_radius
    }

    /// Compass bearing (clockwise from north) to screen angle
    /// (counter-clockwise from screen right). North lands straight up.
    #[inline]
    pub fn bearing_to_angle(bearing: f64) -> f64 {
        FRAC_PI_2 - bearing
    }

    #[inline]
    pub fn project(&self, bd: BearingDistance) -> ProjectedPoint {
        ProjectedPoint {
            angle: Self::bearing_to_angle(bd.bearing),
            radius: self.distance_to_radius(bd.distance),
        }
    }

    /// Polar to screen pixels. Screen y grows downward, so the y component
    /// is negated to keep positive angles counter-clockwise.
    #[inline]
    pub fn to_screen(&self, p: ProjectedPoint, center: DVec2) -> DVec2 {
        center + DVec2::new(p.angle.cos(), -p.angle.sin()) * p.radius
    }
}

/// Screen-space pan/zoom applied uniformly to all drawn content at draw
/// time. Stored projected coordinates are never touched; a recenter resets
/// this to identity.
#[derive(Clone, Copy, Debug)]
pub struct ViewTransform {
    pub zoom: f64,
    pub offset: DVec2,
}

const MIN_ZOOM: f64 = 0.5;
const MAX_ZOOM: f64 = 8.0;

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            zoom: 1.0,
            offset: DVec2::ZERO,
        }
    }

    /// Transform a base screen position around the canvas center
    #[inline]
    pub fn apply(&self, p: DVec2, center: DVec2) -> DVec2 {
        center + (p - center) * self.zoom + self.offset
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset += DVec2::new(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.5).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 1.5).max(MIN_ZOOM);
    }

    /// Zoom by a factor while keeping the content under `cursor` fixed
    pub fn zoom_at(&mut self, cursor: DVec2, factor: f64, center: DVec2) {
        let old_zoom = self.zoom;
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = self.zoom / old_zoom;
        // Fixed point: cursor - center - offset scales by the zoom ratio
        self.offset = cursor - center - (cursor - center - self.offset) * ratio;
    }

    pub fn reset(&mut self) {
        *self = Self::identity();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{bearing_and_distance, GeoPoint};

    #[test]
    fn test_scale_endpoints() {
        let scale = PolarScale::new(400.0);
        assert_eq!(scale.distance_to_radius(0.0), 0.0);
        assert!((scale.distance_to_radius(EARTH_HALF_CIRCUMFERENCE_KM) - 400.0).abs() < 1e-9);
        let mid = scale.distance_to_radius(EARTH_HALF_CIRCUMFERENCE_KM / 2.0);
        assert!((mid - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_extrapolates_past_domain() {
        let scale = PolarScale::new(100.0);
        let r = scale.distance_to_radius(EARTH_HALF_CIRCUMFERENCE_KM * 2.0);
        assert!((r - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_to_angle_convention() {
        // North (bearing 0) points straight up
        assert!((PolarScale::bearing_to_angle(0.0) - FRAC_PI_2).abs() < 1e-12);
        // East (bearing π/2) points screen-right (angle 0)
        assert!(PolarScale::bearing_to_angle(FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_to_screen_directions() {
        let scale = PolarScale::new(100.0);
        let center = DVec2::new(100.0, 100.0);

        let north = scale.to_screen(
            ProjectedPoint { angle: PolarScale::bearing_to_angle(0.0), radius: 50.0 },
            center,
        );
        assert!((north.x - 100.0).abs() < 1e-9);
        assert!((north.y - 50.0).abs() < 1e-9); // up = smaller y

        let east = scale.to_screen(
            ProjectedPoint { angle: PolarScale::bearing_to_angle(FRAC_PI_2), radius: 50.0 },
            center,
        );
        assert!((east.x - 150.0).abs() < 1e-9);
        assert!((east.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection_composes_with_geodesics() {
        let scale = PolarScale::new(300.0);
        let bd = bearing_and_distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        let p = scale.project(bd);
        // Antipode lands exactly on the rim
        assert!((p.radius - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_identity() {
        let view = ViewTransform::identity();
        let center = DVec2::new(80.0, 60.0);
        let p = DVec2::new(10.0, 20.0);
        assert_eq!(view.apply(p, center), p);
    }

    #[test]
    fn test_view_zoom_scales_about_center() {
        let mut view = ViewTransform::identity();
        view.zoom_in();
        let center = DVec2::new(100.0, 100.0);
        let p = view.apply(DVec2::new(110.0, 100.0), center);
        assert!((p.x - 115.0).abs() < 1e-9);
        assert!((p.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut view = ViewTransform::identity();
        for _ in 0..20 {
            view.zoom_in();
        }
        assert!(view.zoom <= MAX_ZOOM + 1e-9);
        for _ in 0..40 {
            view.zoom_out();
        }
        assert!(view.zoom >= MIN_ZOOM - 1e-9);
    }

    #[test]
    fn test_zoom_at_keeps_cursor_fixed() {
        let mut view = ViewTransform::identity();
        view.pan(7.0, -3.0);
        let center = DVec2::new(100.0, 100.0);
        let cursor = DVec2::new(130.0, 90.0);
        // The base point currently under the cursor
        let base = (cursor - center - view.offset) / view.zoom + center;
        view.zoom_at(cursor, 1.5, center);
        let after = view.apply(base, center);
        assert!((after - cursor).length() < 1e-9);
    }
}
