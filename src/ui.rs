use crate::app::App;
use azmap::braille::BrailleCanvas;
use azmap::map::{LabelKind, MapLayers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_map(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Great-Circle Map ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut layers = MapLayers::new(inner.width as usize, inner.height as usize);
    app.scene.draw(&app.view, &app.settings, &mut layers);

    frame.render_widget(MapWidget { layers }, inner);
}

/// Renders the braille layers back to front with per-layer colors, then
/// overlays the text labels
struct MapWidget {
    layers: MapLayers,
}

impl MapWidget {
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (row_idx, row_str) in canvas.rows().enumerate() {
            if row_idx >= area.height as usize {
                break;
            }
            let y = area.y + row_idx as u16;

            for (col_idx, ch) in row_str.chars().enumerate() {
                if col_idx >= area.width as usize {
                    break;
                }
                // Empty braille cell
                if ch == '\u{2800}' {
                    continue;
                }
                let x = area.x + col_idx as u16;
                buf[(x, y)].set_char(ch).set_fg(color);
            }
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Self::render_layer(&self.layers.grid, Color::DarkGray, area, buf);
        Self::render_layer(&self.layers.coastline, Color::Cyan, area, buf);
        Self::render_layer(&self.layers.cities, Color::White, area, buf);

        for label in &self.layers.labels {
            if label.y >= area.height || label.x >= area.width {
                continue;
            }
            let style = match label.kind {
                LabelKind::Guide => Style::default().fg(Color::Yellow),
                LabelKind::City => Style::default().fg(Color::White),
            };

            let y = area.y + label.y;
            let max_len = (area.width - label.x) as usize;
            for (i, ch) in label.text.chars().take(max_len).enumerate() {
                let x = area.x + label.x + i as u16;
                buf[(x, y)].set_char(ch).set_style(style);
            }
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(input) = &app.recenter_input {
        Line::from(vec![
            Span::styled(" Recenter: ", Style::default().fg(Color::Cyan)),
            Span::styled(input.clone(), Style::default().fg(Color::White)),
            Span::styled("▌", Style::default().fg(Color::White)),
            Span::styled(
                "  Enter: go  Esc: cancel",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        let settings = &app.settings;
        let toggle = |on: bool, on_text: &str, off_text: &str| {
            Span::styled(
                if on { on_text } else { off_text }.to_string(),
                Style::default().fg(if on { Color::Green } else { Color::DarkGray }),
            )
        };

        Line::from(vec![
            Span::styled(" Center: ", Style::default().fg(Color::DarkGray)),
            Span::styled(app.observer_coords(), Style::default().fg(Color::Cyan)),
            Span::styled(" | Zoom: ", Style::default().fg(Color::DarkGray)),
            Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            toggle(settings.show_rings, "[R]ings ", "[r]ings "),
            toggle(settings.show_spokes, "[S]pokes ", "[s]pokes "),
            toggle(settings.show_coastline, "[C]oast ", "[c]oast "),
            toggle(settings.show_cities, "[Y]cities ", "[y]cities "),
            toggle(settings.show_labels, "[L]abels ", "[l]abels "),
            Span::styled(
                "| /:recenter 0:reset q:quit",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    };

    frame.render_widget(Paragraph::new(status), area);
}
