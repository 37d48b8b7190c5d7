use super::helpers::{elide, field, panel, spinner};
use crate::app::{App, ReplayPanel};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render_replay(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let data = match app.data.try_read() {
        Ok(d) => d,
        Err(_) => return,
    };
    let width = area.width.saturating_sub(16) as usize;

    let lines = match &data.replay {
        ReplayPanel::Empty => vec![
            Line::from(Span::styled("No replay selected", Style::default().fg(theme.label))),
            Line::from(""),
            Line::from(Span::styled(
                "Select a leaderboard row and press Enter",
                Style::default().fg(theme.text),
            )),
        ],
        ReplayPanel::Loading(target) => vec![
            field("Link", target.href(), theme),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} Fetching tape for input {}", spinner(app.frame), target.input_index),
                Style::default().fg(theme.warning),
            )),
        ],
        ReplayPanel::Ready { target, tape_size, emulator_url, upload } => vec![
            field("Link", target.href(), theme),
            field("Player", target.user.to_checksum(), theme),
            field("Input", target.input_index.to_string(), theme),
            field("Tape", format!("{} bytes", tape_size), theme),
            Line::from(""),
            Line::from(Span::styled(
                "Open in the emulator:",
                Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(emulator_url.clone(), Style::default().fg(theme.success))),
            Line::from(""),
            field("Upload", elide(upload, width), theme),
        ],
        ReplayPanel::Failed(message) => vec![Line::from(Span::styled(
            format!("Replay failed: {}", message),
            Style::default().fg(theme.error),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(panel("Replay", theme))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
