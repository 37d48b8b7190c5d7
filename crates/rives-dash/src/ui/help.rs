use super::helpers::centered_rect;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const KEYS: [(&str, &str); 6] = [
    ("  r        ", "Refresh leaderboard"),
    ("  Enter    ", "Replay selected entry"),
    ("  c        ", "Connect wallet"),
    ("  j / k    ", "Move selection"),
    ("  q / Esc  ", "Quit"),
    ("  ?        ", "Toggle help"),
];

pub fn render_help(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let popup_area = centered_rect(50, 60, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(theme.highlight))
        .title(Span::styled(" Help ", Style::default().fg(theme.title).add_modifier(Modifier::BOLD)));

    let heading = |text: &'static str| {
        Line::from(Span::styled(text, Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)))
    };
    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(k, Style::default().fg(theme.highlight)),
            Span::styled(what, Style::default().fg(theme.text)),
        ])
    };

    let mut lines = vec![
        heading("Navigation"),
        Line::from(""),
        key("  1-3      ", "Switch to tab"),
        key("  Tab      ", "Next tab"),
        Line::from(""),
        heading("Actions"),
        Line::from(""),
    ];
    lines.extend(KEYS.iter().map(|&(k, what)| key(k, what)));

    f.render_widget(Clear, popup_area);
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), popup_area);
}
