use super::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn binding(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(keys, Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        section("  Geral"),
        binding("    ?           ", "Mostrar/ocultar esta ajuda"),
        binding("    q           ", "Sair do aplicativo"),
        binding("    Ctrl+C      ", "Sair a qualquer momento"),
        Line::from(""),
        section("  Catálogo"),
        binding("    ↑/k ↓/j     ", "Mover entre os filmes"),
        binding("    PgUp/PgDn   ", "Página anterior/seguinte"),
        binding("    g/G         ", "Primeiro/último filme"),
        binding("    Enter       ", "Abrir detalhes do filme"),
        Line::from(""),
        section("  Detalhes"),
        binding("    ↑/↓         ", "Rolar descrição"),
        binding("    PgUp/PgDn   ", "Rolar uma página"),
        binding("    o           ", "Abrir imagem no navegador"),
        binding("    Esc/Enter/q ", "Fechar"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Ajuda: teclas ")
                .title_bottom(
                    Line::from(" Pressione qualquer tecla para fechar ")
                        .style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
