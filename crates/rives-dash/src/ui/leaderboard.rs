use super::helpers::{panel, spinner};
use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use rives_client::leaderboard::{RenderState, COLUMN_TITLES};

const WIDTHS: [Constraint; 5] = [
    Constraint::Length(6),
    Constraint::Min(44),
    Constraint::Length(26),
    Constraint::Length(14),
    Constraint::Length(7),
];

pub fn render_leaderboard(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let data = match app.data.try_read() {
        Ok(d) => d,
        Err(_) => return,
    };

    let title = match data.state {
        RenderState::Fetching | RenderState::Decoding | RenderState::Sorting => {
            format!("Leaderboard {} {}", spinner(app.frame), data.state)
        }
        _ => "Leaderboard".to_string(),
    };
    let block = panel(&title, theme);

    let header = Row::new(COLUMN_TITLES.iter().map(|t| {
        Cell::from(*t).style(Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD))
    }))
    .bottom_margin(1);

    if let Some(message) = data.table.placeholder() {
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);
        f.render_widget(Table::new(Vec::<Row>::new(), WIDTHS).header(header), chunks[0]);

        let color = if data.table.is_error() { theme.error } else { theme.label };
        let placeholder = Paragraph::new(Span::styled(message.to_string(), Style::default().fg(color)))
            .alignment(Alignment::Center);
        f.render_widget(placeholder, chunks[1]);
        return;
    }

    let rows: Vec<Row> = data
        .table
        .entries()
        .map(|entry| {
            let style = if entry.nav.is_some() {
                Style::default().fg(theme.text)
            } else {
                Style::default().fg(theme.label)
            };
            Row::new(entry.cells.iter().map(|c| Cell::from(c.clone()))).style(style)
        })
        .collect();

    let table = Table::new(rows, WIDTHS)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(theme.selection).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}
