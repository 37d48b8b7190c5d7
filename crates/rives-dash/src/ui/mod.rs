mod help;
mod helpers;
mod leaderboard;
mod replay;
mod tabs;
mod wallet;

pub use help::render_help;
pub use leaderboard::render_leaderboard;
pub use replay::render_replay;
pub use tabs::render_tabs;
pub use wallet::render_wallet;

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use rives_client::leaderboard::RenderState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render_ui(f: &mut Frame, app: &mut App) {
    let theme = &app.theme;
    let size = f.area();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            " RIVES Leaderboard ",
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);
    f.render_widget(block, size);

    if size.width < 3 || size.height < 3 {
        return;
    }
    let inner = Rect::new(size.x + 1, size.y + 1, size.width - 2, size.height - 2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(inner);

    render_tabs(f, app, chunks[0]);

    match app.tab {
        0 => render_leaderboard(f, app, chunks[1]),
        1 => render_replay(f, app, chunks[1]),
        2 => render_wallet(f, app, chunks[1]),
        _ => {}
    }

    render_status_bar(f, app, chunks[2]);

    if app.show_help {
        render_help(f, app, size);
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let data = match app.data.try_read() {
        Ok(d) => d,
        Err(_) => return,
    };

    let state_color = match data.state {
        RenderState::Rendered => theme.success,
        RenderState::ErrorDisplayed => theme.error,
        RenderState::Idle => theme.label,
        _ => theme.warning,
    };
    let refreshed = data
        .last_refresh
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let status = Line::from(vec![
        Span::styled(" [Q]", Style::default().fg(theme.highlight)),
        Span::styled(" Quit ", Style::default().fg(theme.text)),
        Span::styled("[Tab]", Style::default().fg(theme.highlight)),
        Span::styled(" Switch ", Style::default().fg(theme.text)),
        Span::styled("[?]", Style::default().fg(theme.highlight)),
        Span::styled(" Help ", Style::default().fg(theme.text)),
        Span::raw(" | "),
        Span::styled(format!("v{}", VERSION), Style::default().fg(theme.label)),
        Span::raw(" | "),
        Span::styled(data.state.to_string().to_uppercase(), Style::default().fg(state_color)),
        Span::styled(format!(" @ {}", refreshed), Style::default().fg(theme.label)),
        Span::raw(" | "),
        Span::styled(
            if data.wallet.connected { "WALLET" } else { "NO WALLET" },
            Style::default().fg(if data.wallet.connected { theme.success } else { theme.error }),
        ),
    ]);

    f.render_widget(Paragraph::new(status), area);
}
