use super::list::{banner_line, wrap_text};
use super::{ACCENT, centered_rect};
use crate::app::App;
use crate::catalog::Movie;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

fn popup_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Detalhes ")
        .padding(Padding::horizontal(1))
}

/// Split the popup interior into banner(1) + body(min) + button(1).
fn sections(inner: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);
    [chunks[0], chunks[1], chunks[2]]
}

/// Title, details and description. Everything here wraps and scrolls
/// together so no field is ever cut.
fn body_lines(movie: &Movie) -> Vec<Line<'static>> {
    let label_style = Style::default().fg(Color::Gray);
    vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            format!("🎬 Diretor: {}", movie.director),
            label_style,
        )),
        Line::from(Span::styled(
            format!("📅 Lançamento: {}", movie.release_date),
            label_style,
        )),
        Line::from(Span::styled(
            format!(" ⭐ Avaliação: {} ", movie.score_label()),
            Style::default()
                .fg(Color::White)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(movie.description.clone()),
    ]
}

/// Largest useful `detail_scroll` for `movie` on a terminal of `area`: the
/// offset at which the last body line reaches the bottom of the popup.
pub fn scroll_limit(movie: &Movie, area: Rect) -> u16 {
    let inner = popup_block().inner(centered_rect(80, 80, area));
    let [_, body, _] = sections(inner);
    let width = body.width as usize;
    let rows: usize = body_lines(movie)
        .iter()
        .map(|line| wrap_text(&line.to_string(), width, usize::MAX).len().max(1))
        .sum();
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_sub(body.height)
}

/// Detail overlay drawn over the card list for the selected movie.
pub fn render(app: &App, movie: &Movie, frame: &mut Frame) {
    let area = centered_rect(80, 80, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let block = popup_block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [banner, body, button_row] = sections(inner);

    frame.render_widget(
        Paragraph::new(banner_line(&movie.image, banner.width as usize)),
        banner,
    );

    let content = Paragraph::new(body_lines(movie))
        .wrap(Wrap { trim: true })
        .scroll((app.detail_scroll, 0));
    frame.render_widget(content, body);

    let button = Paragraph::new(Line::from(vec![
        Span::styled(
            " Fechar ",
            Style::default()
                .fg(Color::White)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Esc/Enter  ↑↓ rolar  o abrir imagem", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(button, button_row);
}
