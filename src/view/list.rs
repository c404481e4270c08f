//! Listing list pane.
//!
//! Draws the visible slice of the filtered listings and, in infinite mode,
//! a trailing sentinel row. The caller learns whether the sentinel row made
//! it into the viewport so it can feed the visibility notifier.

use super::styles::{category_color, ColorConfig, MUTED_TEXT, SELECTED_ROW, SENTINEL_ROW};
use crate::model::Listing;
use crate::paginator::Sentinel;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// What to draw after the last listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingRow {
    /// Nothing (paged mode or list exhausted).
    None,
    /// More items can be loaded; the row carries the watched sentinel.
    More(Sentinel),
    /// A load is in flight.
    Loading,
}

/// Inputs for one list render.
#[derive(Debug)]
pub struct ListPane<'a> {
    /// Visible listings in display order.
    pub rows: &'a [&'a Listing],
    /// Cursor row within `rows`.
    pub selected: usize,
    /// Row after the listings.
    pub trailing: TrailingRow,
    /// Whether to highlight the cursor (false while the detail pane has focus).
    pub focused: bool,
    /// Color switch.
    pub colors: ColorConfig,
}

/// First row to draw so the cursor and the row after it stay in view.
pub fn scroll_offset(selected: usize, total_rows: usize, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    let max_offset = total_rows.saturating_sub(height);
    (selected + 2).saturating_sub(height).min(max_offset)
}

/// Truncate `text` to at most `max_width` terminal columns, marking the cut
/// with `…`.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn listing_line(listing: &Listing, width: usize, colors: ColorConfig) -> Line<'static> {
    let badge = format!("[{}] ", listing.category.label());
    let location = listing
        .location_label()
        .map(|loc| format!(" · {loc}"))
        .unwrap_or_default();

    let title_room = width
        .saturating_sub(badge.width())
        .saturating_sub(location.width());
    let title = truncate_to_width(&listing.title, title_room.max(1));
    let location_room = width
        .saturating_sub(badge.width())
        .saturating_sub(title.width());

    Line::from(vec![
        Span::styled(
            badge,
            colors.apply(Style::default().fg(category_color(listing.category))),
        ),
        Span::raw(title),
        Span::styled(
            truncate_to_width(&location, location_room),
            colors.apply(MUTED_TEXT),
        ),
    ])
}

/// Render the list into `area`.
///
/// Returns the sentinel when its row was drawn inside the viewport.
pub fn render_listing_list(frame: &mut Frame, area: Rect, pane: &ListPane<'_>) -> Option<Sentinel> {
    let block = Block::default().borders(Borders::ALL).title(" Listings ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if pane.rows.is_empty() {
        let empty = Paragraph::new(Line::styled(
            "No listings match.",
            pane.colors.apply(MUTED_TEXT),
        ));
        frame.render_widget(empty, inner);
        return None;
    }

    let height = usize::from(inner.height);
    let width = usize::from(inner.width);
    let has_trailing = pane.trailing != TrailingRow::None;
    let total_rows = pane.rows.len() + usize::from(has_trailing);
    let offset = scroll_offset(pane.selected, total_rows, height);

    let mut lines: Vec<Line> = pane
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, listing)| {
            let line = listing_line(listing, width, pane.colors);
            if pane.focused && i == pane.selected {
                line.style(pane.colors.apply(SELECTED_ROW))
            } else {
                line
            }
        })
        .collect();

    let sentinel_in_view = has_trailing && pane.rows.len() < offset + height;
    let mut drawn = None;
    if sentinel_in_view {
        let text = match pane.trailing {
            TrailingRow::More(sentinel) => {
                drawn = Some(sentinel);
                "↓ more"
            }
            TrailingRow::Loading => "Loading more…",
            TrailingRow::None => "",
        };
        lines.push(Line::styled(text, pane.colors.apply(SENTINEL_ROW)));
    }

    frame.render_widget(Paragraph::new(lines), inner);
    drawn
}
