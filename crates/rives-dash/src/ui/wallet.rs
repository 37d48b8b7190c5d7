use super::helpers::{field, panel};
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render_wallet(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let data = match app.data.try_read() {
        Ok(d) => d,
        Err(_) => return,
    };
    let wallet = &data.wallet;

    let (status, color) = if wallet.connected {
        ("Connected", theme.success)
    } else {
        ("Disconnected", theme.error)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{:<12}", "Status"), Style::default().fg(theme.label)),
            Span::styled(status, Style::default().fg(color)),
        ]),
        field(
            "Address",
            wallet.address.map(|a| a.to_checksum()).unwrap_or_else(|| "-".to_string()),
            theme,
        ),
        field("Chain", wallet.chain.clone().unwrap_or_else(|| "-".to_string()), theme),
        field("Expected", app.config.chain_id.to_string(), theme),
        field("Entropy", wallet.entropy.clone().unwrap_or_else(|| "simple mode".to_string()), theme),
    ];

    if !wallet.message.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(wallet.message.clone(), Style::default().fg(theme.warning))));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Play in the emulator:", Style::default().fg(theme.highlight))));
    lines.push(Line::from(Span::styled(wallet.emulator_url.clone(), Style::default().fg(theme.text))));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press c to reconnect",
        Style::default().fg(theme.label),
    )));

    let paragraph = Paragraph::new(lines)
        .block(panel("Wallet", theme))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
