use super::ACCENT;
use crate::app::{App, CARD_HEIGHT};
use crate::catalog::Movie;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Lines of description shown on a card before it is cut.
pub const CARD_DESCRIPTION_LINES: usize = 3;

pub fn render(app: &App, movies: &[Movie], frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + cards(min) + footer(1) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Studio Ghibli",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Catálogo de filmes",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, chunks[0]);

    // ── Cards ──
    let offset = app.page_offset();
    let visible = (chunks[1].height / CARD_HEIGHT).max(1) as usize;
    let column = chunks[1];
    for (slot, (index, movie)) in movies
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .enumerate()
    {
        let y = column.y + slot as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(column.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let card_area = Rect::new(column.x, y, column.width, height);
        render_card(movie, index == app.cursor, frame, card_area);
    }

    // ── Footer ──
    let footer = Paragraph::new(Line::from(Span::styled(
        format!("{} filmes carregados da API", movies.len()),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[2]);

    // ── Status bar ──
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let status_line = Line::from(vec![
        Span::styled(" ↑↓", key_style),
        Span::raw(" Navegar  "),
        Span::styled("Enter", key_style),
        Span::raw(" Abrir  "),
        Span::styled("?", key_style),
        Span::raw(" Ajuda  "),
        Span::styled("q", key_style),
        Span::raw(" Sair  "),
        Span::styled(
            format!("[{}/{}]", app.cursor + 1, movies.len().max(1)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(" "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}

fn render_card(movie: &Movie, focused: bool, frame: &mut Frame, area: Rect) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = card_lines(movie, inner.width as usize);
    frame.render_widget(Paragraph::new(lines), inner);
}

/// The text of one card: banner strip, title, details, rating badge and up
/// to [`CARD_DESCRIPTION_LINES`] lines of description.
pub fn card_lines(movie: &Movie, width: usize) -> Vec<Line<'static>> {
    let detail_style = Style::default().fg(Color::Gray);
    let mut lines = vec![
        banner_line(&movie.image, width),
        Line::from(Span::styled(
            truncate_str(&movie.title, width),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_str(&format!("🎬 {}", movie.director), width),
            detail_style,
        )),
        Line::from(Span::styled(
            truncate_str(&format!("📅 {}", movie.release_date), width),
            detail_style,
        )),
        rating_badge(movie),
    ];

    lines.extend(
        wrap_text(&movie.description, width, CARD_DESCRIPTION_LINES)
            .into_iter()
            .map(|l| Line::from(Span::raw(l))),
    );
    lines
}

/// A strip standing in for the banner image, showing its URL.
pub(crate) fn banner_line(url: &str, width: usize) -> Line<'static> {
    let text = format!("▣ {}", url);
    let mut text = truncate_str(&text, width);
    let pad = width.saturating_sub(text.width());
    text.push_str(&" ".repeat(pad));
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::White).bg(ACCENT),
    ))
}

pub(crate) fn rating_badge(movie: &Movie) -> Line<'static> {
    Line::from(Span::styled(
        format!(" ⭐ {} ", movie.score_label()),
        Style::default()
            .fg(Color::White)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        result.push(ch);
        used += w;
    }
    if max_width > 0 {
        result.push('…');
    }
    result
}

/// Word-wrap `text` to `width` columns, keeping at most `max_lines` lines.
///
/// Words longer than a line are split. When lines are dropped the last kept
/// line ends in "…".
pub fn wrap_text(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if current_width > 0 && current_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width > width {
            for ch in word.chars() {
                let w = ch.width().unwrap_or(0);
                if current_width + w > width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += w;
            }
            continue;
        }

        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            while !last.is_empty() && last.width() + 1 > width {
                last.pop();
            }
            let trimmed = last.trim_end().len();
            last.truncate(trimmed);
            last.push('…');
        }
    }
    lines
}
