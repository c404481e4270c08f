//! Screen layout: tab bar, search box, list / detail body, footer, status.

use super::constants::{
    FOOTER_HEIGHT, LIST_WIDTH_PERCENT, SEARCH_INPUT_HEIGHT, STATUS_BAR_HEIGHT, TAB_BAR_HEIGHT,
};
use super::detail::render_detail;
use super::help::render_help_overlay;
use super::list::{render_listing_list, ListPane, TrailingRow};
use super::search_input::SearchInput;
use super::styles::{ColorConfig, KEY_HINT, MUTED_TEXT, STATUS_TEXT};
use super::tabs::render_category_tabs;
use crate::catalog::{AppState, InputMode, SearchState};
use crate::paginator::{Clock, PaginationMode, Sentinel};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Category tab bar.
    pub tabs: Rect,
    /// Search box, when a search is typed or active.
    pub search: Option<Rect>,
    /// Listing list.
    pub list: Rect,
    /// Detail pane, when a listing is open.
    pub detail: Option<Rect>,
    /// Pagination footer.
    pub footer: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Split `area` for the current state.
pub fn calculate_areas<C: Clock>(area: Rect, state: &AppState<C>) -> ScreenAreas {
    let search_height = match state.search() {
        SearchState::Inactive => 0,
        _ => SEARCH_INPUT_HEIGHT,
    };
    let [tabs, search, body, footer, status] = Layout::vertical([
        Constraint::Length(TAB_BAR_HEIGHT),
        Constraint::Length(search_height),
        Constraint::Min(0),
        Constraint::Length(FOOTER_HEIGHT),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(area);

    let (list, detail) = if state.detail_listing().is_some() {
        let [list, detail] = Layout::horizontal([
            Constraint::Percentage(LIST_WIDTH_PERCENT),
            Constraint::Min(0),
        ])
        .areas(body);
        (list, Some(detail))
    } else {
        (body, None)
    };

    ScreenAreas {
        tabs,
        search: (search_height > 0).then_some(search),
        list,
        detail,
        footer,
        status,
    }
}

fn trailing_row<C: Clock>(state: &AppState<C>) -> TrailingRow {
    if state.paginator().mode() != PaginationMode::Infinite {
        return TrailingRow::None;
    }
    match state.sentinel() {
        Some(sentinel) => TrailingRow::More(sentinel),
        None if state.paginator().is_loading() => TrailingRow::Loading,
        None => TrailingRow::None,
    }
}

fn status_line<C: Clock>(state: &AppState<C>, colors: ColorConfig) -> Line<'static> {
    if let Some(message) = state.status() {
        return Line::styled(message.to_string(), colors.apply(STATUS_TEXT));
    }
    let hints: &[(&str, &str)] = match state.input_mode() {
        InputMode::Search => &[("Enter", "keep"), ("Esc", "clear")],
        InputMode::Comment => &[("Enter", "post"), ("Esc", "cancel")],
        InputMode::Normal => &[
            ("/", "search"),
            ("Tab", "category"),
            ("Enter", "open"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(format!(" {key} "), colors.apply(KEY_HINT)));
        spans.push(Span::styled(format!("{action} "), colors.apply(MUTED_TEXT)));
    }
    Line::from(spans)
}

/// Render a full frame.
///
/// Returns the sentinel when its row was drawn inside the list viewport.
pub fn render_layout<C: Clock>(
    frame: &mut Frame,
    state: &AppState<C>,
    colors: ColorConfig,
) -> Option<Sentinel> {
    let areas = calculate_areas(frame.area(), state);

    render_category_tabs(frame, areas.tabs, state.tab());

    if let Some(search_area) = areas.search {
        frame.render_widget(SearchInput::new(state.search()), search_area);
    }

    let rows = state.visible_listings();
    let pane = ListPane {
        rows: &rows,
        selected: state.selected(),
        trailing: trailing_row(state),
        focused: areas.detail.is_none(),
        colors,
    };
    let drawn = render_listing_list(frame, areas.list, &pane);

    if let (Some(detail_area), Some(listing)) = (areas.detail, state.detail_listing()) {
        render_detail(frame, detail_area, listing, state.comment_draft(), colors);
    }

    frame.render_widget(
        Paragraph::new(Line::styled(format!(" {}", state.footer_label()), colors.apply(MUTED_TEXT))),
        areas.footer,
    );
    frame.render_widget(Paragraph::new(status_line(state, colors)), areas.status);

    if state.help_visible() {
        render_help_overlay(frame);
    }

    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolvedConfig;
    use crate::model::{Category, Listing, ListingId};
    use crate::paginator::ManualClock;

    fn state(n: usize) -> AppState<ManualClock> {
        let listings = (0..n)
            .map(|i| {
                Listing::new(
                    ListingId::new(format!("e-{i}")).unwrap(),
                    Category::Events,
                    format!("Event {i}"),
                )
            })
            .collect();
        AppState::with_clock(ManualClock::new(), listings, &ResolvedConfig::default())
    }

    #[test]
    fn areas_without_search_or_detail() {
        let areas = calculate_areas(Rect::new(0, 0, 80, 24), &state(3));
        assert_eq!(areas.tabs.height, TAB_BAR_HEIGHT);
        assert_eq!(areas.search, None);
        assert_eq!(areas.detail, None);
        assert_eq!(areas.list.height, 24 - TAB_BAR_HEIGHT - FOOTER_HEIGHT - STATUS_BAR_HEIGHT);
        assert_eq!(areas.status.y, 23);
    }

    #[test]
    fn areas_with_search_and_detail() {
        let mut s = state(3);
        s.start_search();
        s.open_detail();
        let areas = calculate_areas(Rect::new(0, 0, 100, 30), &s);
        assert_eq!(areas.search.map(|r| r.height), Some(SEARCH_INPUT_HEIGHT));
        let detail = areas.detail.expect("detail pane open");
        assert_eq!(areas.list.width + detail.width, 100);
    }

    #[test]
    fn paged_mode_has_no_trailing_row() {
        assert_eq!(trailing_row(&state(30)), TrailingRow::None);
    }
}
