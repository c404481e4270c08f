//! Category tab bar widget.

use crate::catalog::CategoryTab;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

/// Render the category tab bar with `selected` highlighted.
///
/// Tabs are numbered 1-5 to match their shortcut keys.
pub fn render_category_tabs(frame: &mut Frame, area: Rect, selected: CategoryTab) {
    let titles: Vec<Line> = CategoryTab::TABS
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" cdir "))
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Yellow))
        .select(selected.index());

    frame.render_widget(tabs, area);
}
