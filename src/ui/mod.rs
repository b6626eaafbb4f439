mod detail;
mod help;
mod list;
mod status;

use crate::app::{App, Screen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
};

/// Slate blue used for titles, badges and the close button.
pub(crate) const ACCENT: Color = Color::Rgb(0x4a, 0x65, 0x72);

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    match &app.screen {
        Screen::Loading => status::render_loading(app, frame),
        Screen::Error => status::render_error(frame),
        Screen::Loaded(movies) => {
            list::render(app, movies, frame);
            if let Some(movie) = app.selected_movie() {
                detail::render(app, movie, frame);
            }
        }
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

/// How far the detail overlay can scroll on a terminal of `area`, or 0
/// when no movie is selected.
pub fn detail_scroll_limit(app: &App, area: Rect) -> u16 {
    app.selected_movie()
        .map(|movie| detail::scroll_limit(movie, area))
        .unwrap_or(0)
}

/// Create a centered rectangle using percentage of parent area.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
