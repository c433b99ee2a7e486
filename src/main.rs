mod app;
mod ui;

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use app::App;
use azmap::data;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

fn main() -> Result<()> {
    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    // Run the app
    let result = run(&mut terminal);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Handle mouse events for panning and zooming
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        // Scroll wheel for zooming towards mouse position
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        // Horizontal scroll for panning (trackpad two-finger swipe)
        MouseEventKind::ScrollLeft => app.pan(-8, 0),
        MouseEventKind::ScrollRight => app.pan(8, 0),
        // Click and drag to pan
        MouseEventKind::Down(MouseButton::Left) => {
            app.last_mouse = Some((mouse.column, mouse.row));
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.handle_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.end_drag();
        }
        _ => {}
    }
}

/// Key handling while the recenter prompt is open
fn handle_recenter_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter => app.submit_recenter(),
        KeyCode::Esc => app.cancel_recenter(),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Char(c) => app.input_char(c),
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal) -> Result<()> {
    let size = terminal.size()?;

    let data = data::load_map_data(Path::new("data"));
    let mut app = App::new(size.width as usize, size.height as usize, data);

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if app.recenter_input.is_some() {
                        handle_recenter_key(&mut app, key.code);
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                        // Pan with hjkl or arrow keys
                        KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
                        KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
                        KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
                        KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

                        // Zoom
                        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                        KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

                        // Layer toggles
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            app.settings.toggle_rings();
                        }
                        KeyCode::Char('s') | KeyCode::Char('S') => {
                            app.settings.toggle_spokes();
                        }
                        KeyCode::Char('c') | KeyCode::Char('C') => {
                            app.settings.toggle_coastline();
                        }
                        KeyCode::Char('y') | KeyCode::Char('Y') => {
                            app.settings.toggle_cities();
                        }
                        KeyCode::Char('L') => {
                            app.settings.toggle_labels();
                        }

                        // Recenter prompt
                        KeyCode::Char('/') => app.begin_recenter(),

                        // Reset pan/zoom
                        KeyCode::Char('0') => app.reset_view(),

                        _ => {}
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse(&mut app, mouse);
                }
                Event::Resize(width, height) => {
                    app.resize(width as usize, height as usize);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
