use azmap::data::MapData;
use azmap::geo::GeoPoint;
use azmap::geocode::{Gazetteer, Geocoder};
use azmap::map::{DisplaySettings, MapConfig, MapScene, ViewTransform};
use glam::DVec2;

/// Default observer: Beijing
pub const DEFAULT_OBSERVER: GeoPoint = GeoPoint {
    lat: 39.91,
    lng: 116.39,
};

/// Application state: the observer, the raw map data, and everything
/// derived from the two. Changing the observer (or the canvas size the
/// scale depends on) discards the derived scene and rebuilds it from
/// scratch; the view transform is pure screen-space and never touches
/// projected data.
pub struct App {
    pub observer: GeoPoint,
    pub data: MapData,
    pub config: MapConfig,
    pub settings: DisplaySettings,
    pub view: ViewTransform,
    pub scene: MapScene,
    pub should_quit: bool,
    /// Last mouse position while dragging
    pub last_mouse: Option<(u16, u16)>,
    /// Some while the user is typing a recenter query
    pub recenter_input: Option<String>,
    width_px: usize,
    height_px: usize,
}

/// Terminal size to braille pixel size, minus the border and status bar
fn inner_pixels(width_chars: usize, height_chars: usize) -> (usize, usize) {
    (
        width_chars.saturating_sub(2) * 2,
        height_chars.saturating_sub(3) * 4,
    )
}

impl App {
    pub fn new(width_chars: usize, height_chars: usize, data: MapData) -> Self {
        let (width_px, height_px) = inner_pixels(width_chars, height_chars);
        let config = MapConfig::default();
        let scene = MapScene::rebuild(DEFAULT_OBSERVER, &data, &config, width_px, height_px);
        Self {
            observer: DEFAULT_OBSERVER,
            data,
            config,
            settings: DisplaySettings::default(),
            view: ViewTransform::identity(),
            scene,
            should_quit: false,
            last_mouse: None,
            recenter_input: None,
            width_px,
            height_px,
        }
    }

    fn rebuild(&mut self) {
        self.scene = MapScene::rebuild(
            self.observer,
            &self.data,
            &self.config,
            self.width_px,
            self.height_px,
        );
    }

    /// Move the observer and run a fresh full pass; the old scene and view
    /// transform are discarded wholesale.
    pub fn recenter(&mut self, point: GeoPoint) {
        log::info!("recentering on {:.2}, {:.2}", point.lat, point.lng);
        self.observer = point;
        self.view.reset();
        self.rebuild();
    }

    /// The scale depends on the canvas, so a resize is also a fresh pass
    pub fn resize(&mut self, width_chars: usize, height_chars: usize) {
        let (width_px, height_px) = inner_pixels(width_chars, height_chars);
        self.width_px = width_px;
        self.height_px = height_px;
        self.rebuild();
    }

    pub fn begin_recenter(&mut self) {
        self.recenter_input = Some(String::new());
    }

    pub fn cancel_recenter(&mut self) {
        self.recenter_input = None;
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(input) = &mut self.recenter_input {
            input.push(c);
        }
    }

    pub fn input_backspace(&mut self) {
        if let Some(input) = &mut self.recenter_input {
            input.pop();
        }
    }

    /// Geocode the typed query. A miss leaves the observer (and the whole
    /// scene) untouched.
    pub fn submit_recenter(&mut self) {
        if let Some(query) = self.recenter_input.take() {
            let hit = Gazetteer::new(&self.data.cities).resolve(&query);
            match hit {
                Some(point) => self.recenter(point),
                None => log::info!("no match for {query:?}"),
            }
        }
    }

    /// Pan the view window by a character-cell delta
    pub fn pan(&mut self, dx_chars: i32, dy_chars: i32) {
        self.view
            .pan(-(dx_chars as f64) * 2.0, -(dy_chars as f64) * 4.0);
    }

    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
    }

    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        self.zoom_at(col, row, 1.5);
    }

    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        self.zoom_at(col, row, 1.0 / 1.5);
    }

    fn zoom_at(&mut self, col: u16, row: u16, factor: f64) {
        let cursor = Self::cursor_pixels(col, row);
        self.view.zoom_at(cursor, factor, self.scene.center);
    }

    /// Terminal cell to braille pixel, accounting for the one-cell border
    fn cursor_pixels(col: u16, row: u16) -> DVec2 {
        DVec2::new(
            (col.saturating_sub(1) as f64) * 2.0,
            (row.saturating_sub(1) as f64) * 4.0,
        )
    }

    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = (x as i32 - last_x as i32) as f64 * 2.0;
            let dy = (y as i32 - last_y as i32) as f64 * 4.0;
            // Content follows the cursor
            self.view.pan(dx, dy);
        }
        self.last_mouse = Some((x, y));
    }

    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.view.zoom)
    }

    pub fn observer_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.observer.lat.abs(),
            if self.observer.lat >= 0.0 { "N" } else { "S" },
            self.observer.lng.abs(),
            if self.observer.lng >= 0.0 { "E" } else { "W" }
        )
    }
}
