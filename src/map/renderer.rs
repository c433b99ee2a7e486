use glam::DVec2;

use crate::braille::BrailleCanvas;
use crate::data::MapData;
use crate::geo::{GeoPoint, EARTH_HALF_CIRCUMFERENCE_KM};
use crate::map::geometry::{draw_dot, draw_line, draw_ring};
use crate::map::labels::{BoundingBox, LabelOracle, LabelPlacer, PlacedLabel};
use crate::map::projection::{PolarScale, ViewTransform};
use crate::map::segmenter::{segment_rings, CoastlineSegment};

/// Tunable map constants. The split threshold and city cap mirror the
/// values the map was designed around; change them here, not at call sites.
#[derive(Clone, Copy, Debug)]
pub struct MapConfig {
    /// Bearing change (degrees) between consecutive ring points that forces
    /// a coastline segment split
    pub split_threshold_deg: f64,
    /// Maximum number of city records considered for placement
    pub city_cap: usize,
    /// Spacing of the concentric distance rings
    pub ring_interval_km: f64,
    /// Braille pixels kept free outside the rim for direction letters
    pub rim_margin_px: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            split_threshold_deg: 10.0,
            city_cap: 2000,
            ring_interval_km: 5000.0,
            rim_margin_px: 12.0,
        }
    }
}

/// Layer visibility toggles
#[derive(Clone, Copy, Debug)]
pub struct DisplaySettings {
    pub show_rings: bool,
    pub show_spokes: bool,
    pub show_coastline: bool,
    pub show_cities: bool,
    pub show_labels: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_rings: true,
            show_spokes: true,
            show_coastline: true,
            show_cities: true,
            show_labels: true,
        }
    }
}

impl DisplaySettings {
    pub fn toggle_rings(&mut self) {
        self.show_rings = !self.show_rings;
    }

    pub fn toggle_spokes(&mut self) {
        self.show_spokes = !self.show_spokes;
    }

    pub fn toggle_coastline(&mut self) {
        self.show_coastline = !self.show_coastline;
    }

    pub fn toggle_cities(&mut self) {
        self.show_cities = !self.show_cities;
    }

    pub fn toggle_labels(&mut self) {
        self.show_labels = !self.show_labels;
    }
}

/// Distinguishes guide text (ring distances, rim letters) from city names
/// so the UI can color them separately
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKind {
    Guide,
    City,
}

/// A piece of text on the character-cell grid
#[derive(Clone, Debug)]
pub struct TextLabel {
    pub x: u16,
    pub y: u16,
    pub text: String,
    pub kind: LabelKind,
}

/// Per-frame draw targets: one Braille canvas per colored layer plus the
/// text overlay
pub struct MapLayers {
    pub grid: BrailleCanvas,
    pub coastline: BrailleCanvas,
    pub cities: BrailleCanvas,
    pub labels: Vec<TextLabel>,
}

impl MapLayers {
    pub fn new(width_chars: usize, height_chars: usize) -> Self {
        Self {
            grid: BrailleCanvas::new(width_chars, height_chars),
            coastline: BrailleCanvas::new(width_chars, height_chars),
            cities: BrailleCanvas::new(width_chars, height_chars),
            labels: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.coastline.clear();
        self.cities.clear();
        self.labels.clear();
    }
}

/// Compass bearings of the eight spokes and their rim letters
const CARDINAL_DIRECTIONS: [(f64, &str); 8] = [
    (0.0, "N"),
    (45.0, "NE"),
    (90.0, "E"),
    (135.0, "SE"),
    (180.0, "S"),
    (225.0, "SW"),
    (270.0, "W"),
    (315.0, "NW"),
];

/// Bearing along which the ring distance labels sit
const RING_LABEL_BEARING_DEG: f64 = 15.0;

/// Guide text anchored at a base screen position
#[derive(Clone, Debug)]
pub struct GuideLabel {
    pub text: String,
    pub position: DVec2,
}

/// One concentric distance ring
#[derive(Clone, Debug)]
pub struct RingGuide {
    pub radius_px: f64,
    pub label: GuideLabel,
}

/// One cardinal bearing spoke
#[derive(Clone, Debug)]
pub struct SpokeGuide {
    /// Screen angle of the spoke line
    pub angle: f64,
    pub letter: GuideLabel,
}

/// Character-cell bounding boxes for this renderer: a city marker occupies
/// its own cell plus a gap, the label text one cell per character.
pub struct CharCellOracle;

impl LabelOracle for CharCellOracle {
    fn trial_box(&self, label: &str, position: DVec2) -> BoundingBox {
        let cx = (position.x / 2.0).floor();
        let cy = (position.y / 4.0).floor();
        BoundingBox::new(cx, cy, 2.0 + label.chars().count() as f64, 1.0)
    }
}

/// Box and starting cell for guide text centered on a position
fn centered_text_box(text: &str, position: DVec2) -> (i32, i32, BoundingBox) {
    let len = text.chars().count() as i32;
    let cx = (position.x / 2.0).floor() as i32 - len / 2;
    let cy = (position.y / 4.0).floor() as i32;
    (cx, cy, BoundingBox::new(cx as f64, cy as f64, len as f64, 1.0))
}

/// Thousands-grouped ring distance label, e.g. "15,000 km"
fn format_km(km: f64) -> String {
    let digits = (km.round() as i64).to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped} km")
}

/// Unit vector for a screen angle (y flipped for screen space)
#[inline]
fn angle_dir(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), -angle.sin())
}

/// Everything derived from one observer: scale, guides, coastline segments,
/// and placed city labels. An observer change throws the whole scene away;
/// nothing in here is patched incrementally.
pub struct MapScene {
    pub observer: GeoPoint,
    pub scale: PolarScale,
    pub center: DVec2,
    pub rings: Vec<RingGuide>,
    pub spokes: Vec<SpokeGuide>,
    pub segments: Vec<CoastlineSegment>,
    pub labels: Vec<PlacedLabel>,
}

impl MapScene {
    /// Run one full synchronous pass: project, segment, and place for the
    /// given observer and canvas size.
    pub fn rebuild(
        observer: GeoPoint,
        data: &MapData,
        config: &MapConfig,
        width_px: usize,
        height_px: usize,
    ) -> Self {
        let scale = PolarScale::for_canvas(width_px, height_px, config.rim_margin_px);
        let center = DVec2::new(width_px as f64 / 2.0, height_px as f64 / 2.0);

        let ring_label_angle =
            PolarScale::bearing_to_angle(RING_LABEL_BEARING_DEG.to_radians());
        let mut rings = Vec::new();
        let mut ring_km = config.ring_interval_km;
        while ring_km <= EARTH_HALF_CIRCUMFERENCE_KM {
            let radius_px = scale.distance_to_radius(ring_km);
            // Label floats just outside its ring
            let position = center + angle_dir(ring_label_angle) * (radius_px + 3.0);
            rings.push(RingGuide {
                radius_px,
                label: GuideLabel {
                    text: format_km(ring_km),
                    position,
                },
            });
            ring_km += config.ring_interval_km;
        }

        let letter_radius = scale.max_radius() + config.rim_margin_px / 2.0;
        let spokes: Vec<SpokeGuide> = CARDINAL_DIRECTIONS
            .iter()
            .map(|&(bearing_deg, letter)| {
                let angle = PolarScale::bearing_to_angle(bearing_deg.to_radians());
                SpokeGuide {
                    angle,
                    letter: GuideLabel {
                        text: letter.to_string(),
                        position: center + angle_dir(angle) * letter_radius,
                    },
                }
            })
            .collect();

        // Cities must not cover the guide text either, so its boxes seed the
        // placer's accepted set
        let seeds: Vec<BoundingBox> = rings
            .iter()
            .map(|r| &r.label)
            .chain(spokes.iter().map(|s| &s.letter))
            .map(|l| centered_text_box(&l.text, l.position).2)
            .collect();

        let segments = segment_rings(observer, &data.coastline, &scale, config.split_threshold_deg);

        let labels = LabelPlacer::with_seeds(seeds).place(
            observer,
            &data.cities,
            &scale,
            center,
            &CharCellOracle,
            config.city_cap,
        );

        Self {
            observer,
            scale,
            center,
            rings,
            spokes,
            segments,
            labels,
        }
    }

    /// Rasterize the scene into the layer canvases under the current view
    /// transform. Projected data stays untouched; pan/zoom only shifts what
    /// gets drawn where.
    pub fn draw(&self, view: &ViewTransform, settings: &DisplaySettings, layers: &mut MapLayers) {
        layers.clear();

        let width_px = layers.grid.width() as i32 * 2;
        let height_px = layers.grid.height() as i32 * 4;
        let origin = view.apply(self.center, self.center);

        if settings.show_rings {
            for ring in &self.rings {
                let radius = (ring.radius_px * view.zoom).round() as i32;
                draw_ring(
                    &mut layers.grid,
                    origin.x.round() as i32,
                    origin.y.round() as i32,
                    radius,
                );
                push_guide_text(layers, &ring.label, view, self.center);
            }
        }

        if settings.show_spokes {
            for spoke in &self.spokes {
                let rim = self.center + angle_dir(spoke.angle) * self.scale.max_radius();
                let end = view.apply(rim, self.center);
                draw_line(
                    &mut layers.grid,
                    origin.x.round() as i32,
                    origin.y.round() as i32,
                    end.x.round() as i32,
                    end.y.round() as i32,
                );
                push_guide_text(layers, &spoke.letter, view, self.center);
            }
        }

        if settings.show_coastline {
            for segment in &self.segments {
                // A single projected point cannot form a path
                if segment.len() < 2 {
                    continue;
                }
                let mut prev: Option<DVec2> = None;
                for &point in segment {
                    let p = view.apply(self.scale.to_screen(point, self.center), self.center);
                    if let Some(q) = prev {
                        if line_might_be_visible(q, p, width_px, height_px) {
                            draw_line(
                                &mut layers.coastline,
                                q.x.round() as i32,
                                q.y.round() as i32,
                                p.x.round() as i32,
                                p.y.round() as i32,
                            );
                        }
                    }
                    prev = Some(p);
                }
            }
        }

        if settings.show_cities {
            for placed in &self.labels {
                let p = view.apply(placed.position, self.center);
                let (px, py) = (p.x.round() as i32, p.y.round() as i32);
                draw_dot(&mut layers.cities, px, py, 1);

                if settings.show_labels && px >= 0 && py >= 0 {
                    let char_x = px / 2 + 2;
                    let char_y = py / 4;
                    push_text(layers, char_x, char_y, &placed.label, LabelKind::City);
                }
            }
        }
    }
}

fn push_guide_text(layers: &mut MapLayers, label: &GuideLabel, view: &ViewTransform, center: DVec2) {
    let p = view.apply(label.position, center);
    let (cx, cy, _) = centered_text_box(&label.text, p);
    push_text(layers, cx, cy, &label.text, LabelKind::Guide);
}

fn push_text(layers: &mut MapLayers, char_x: i32, char_y: i32, text: &str, kind: LabelKind) {
    let width = layers.grid.width() as i32;
    let height = layers.grid.height() as i32;
    if char_y < 0 || char_y >= height || char_x >= width || char_x + (text.chars().count() as i32) < 0 {
        return;
    }
    layers.labels.push(TextLabel {
        x: char_x.max(0) as u16,
        y: char_y as u16,
        text: if char_x < 0 {
            text.chars().skip((-char_x) as usize).collect()
        } else {
            text.to_string()
        },
        kind,
    });
}

/// Rough visibility check so far off-canvas lines skip rasterization
fn line_might_be_visible(a: DVec2, b: DVec2, width_px: i32, height_px: i32) -> bool {
    let min_x = a.x.min(b.x);
    let max_x = a.x.max(b.x);
    let min_y = a.y.min(b.y);
    let max_y = a.y.max(b.y);
    max_x >= 0.0 && min_x < width_px as f64 && max_y >= 0.0 && min_y < height_px as f64
}
