use crate::app::{App, TAB_TITLES};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};

pub fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let tabs: Vec<Line> = TAB_TITLES
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let style = if i == app.tab as usize {
                Style::default().fg(theme.active_tab).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.inactive_tab)
            };
            Line::from(Span::styled(format!(" {} {} ", i + 1, t), style))
        })
        .collect();

    let tabs_widget = Tabs::new(tabs)
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(theme.border)))
        .select(app.tab as usize)
        .highlight_style(Style::default().fg(theme.active_tab))
        .divider(Span::styled("|", Style::default().fg(theme.border)));

    f.render_widget(tabs_widget, area);
}
