//! Search input widget for rendering the search bar.

use crate::catalog::SearchState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search input widget.
///
/// Renders an editable box while typing and a read-only one once the
/// query is confirmed. Renders nothing when search is inactive.
pub struct SearchInput<'a> {
    search_state: &'a SearchState,
}

impl<'a> SearchInput<'a> {
    /// Create new SearchInput widget.
    pub fn new(search_state: &'a SearchState) -> Self {
        Self { search_state }
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.search_state {
            SearchState::Typing { query } => {
                let line = Line::from(vec![
                    Span::raw(query.as_str()),
                    Span::styled(
                        " ",
                        Style::default()
                            .bg(Color::White)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]);
                Paragraph::new(line)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(" Search (Enter to keep, Esc to clear) ")
                            .style(Style::default().bg(Color::DarkGray)),
                    )
                    .render(area, buf);
            }
            SearchState::Active { query } => {
                Paragraph::new(Line::from(query.as_str()))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(" Search ")
                            .style(Style::default().bg(Color::Blue)),
                    )
                    .render(area, buf);
            }
            SearchState::Inactive => {}
        }
    }
}
