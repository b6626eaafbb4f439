use super::ACCENT;
use crate::api::{CONNECTIVITY_HINT, LOAD_FAILURE_MESSAGE};
use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Vertically centered band of `height` rows.
fn middle_band(area: Rect, height: u16) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area)[1]
}

pub fn render_loading(app: &App, frame: &mut Frame) {
    let area = middle_band(frame.area(), 3);
    let text = vec![
        Line::from(Span::styled(
            app.spinner_frame(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Carregando filmes...",
            Style::default().fg(ACCENT),
        )),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

/// Fixed message and hint only; there is no retry control.
pub fn render_error(frame: &mut Frame) {
    let area = middle_band(frame.area(), 2);
    let text = vec![
        Line::from(Span::styled(
            LOAD_FAILURE_MESSAGE,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            CONNECTIVITY_HINT,
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use crate::api::{CONNECTIVITY_HINT, CatalogMessage, LOAD_FAILURE_MESSAGE};
    use crate::app::App;
    use crate::app::tests::movie;
    use crate::ui::testing::{contains, render_rows};

    #[test]
    fn test_loading_shows_caption_and_no_list() {
        let app = App::new();
        let rows = render_rows(60, 20, |frame| crate::ui::render(&app, frame));
        assert!(contains(&rows, "Carregando filmes..."));
        assert!(contains(&rows, app.spinner_frame()));
        assert!(!contains(&rows, "filmes carregados da API"));
    }

    #[test]
    fn test_error_shows_fixed_message_and_no_list() {
        let mut app = App::new();
        app.apply(CatalogMessage::Failed);
        let rows = render_rows(60, 20, |frame| crate::ui::render(&app, frame));
        assert!(contains(&rows, LOAD_FAILURE_MESSAGE));
        assert!(contains(&rows, CONNECTIVITY_HINT));
        assert!(!contains(&rows, "Catálogo de filmes"));
        assert!(!contains(&rows, "filmes carregados da API"));
    }

    #[test]
    fn test_laputa_example_renders() {
        let mut app = App::new();
        let laputa = crate::catalog::Movie {
            director: "Miyazaki".to_string(),
            ..movie("1", "Laputa")
        };
        app.apply(CatalogMessage::Loaded(vec![laputa]));
        app.update_page_size(20);

        let rows = render_rows(60, 20, |frame| crate::ui::render(&app, frame));
        assert!(contains(&rows, "Laputa"));
        assert!(contains(&rows, "Miyazaki"));
        assert!(contains(&rows, "1986"));
        assert!(contains(&rows, "95/100"));
        assert!(contains(&rows, "1 filmes carregados da API"));
    }
}
