//! Application state for the directory browser.
//!
//! Owns the listings and the derived view: category tab, search query,
//! the filtered index list, and the [`Paginator`] cursor over it. Every
//! change to the filtered set resets pagination so the user starts at the
//! top of the new list.

use super::comment::{CommentDraft, CommentError};
use super::filter::{filter_indices, CategoryTab, SearchState};
use crate::config::ResolvedConfig;
use crate::model::Listing;
use crate::paginator::{
    Clock, InfiniteScrollTrigger, LoadMoreOutcome, PageMetrics, PaginationMode, Paginator,
    Sentinel, SystemClock, ViewportNotifier,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Which input the keyboard currently drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// List / detail navigation.
    Normal,
    /// Typing into the search box.
    Search,
    /// Typing a comment.
    Comment,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState<C: Clock = SystemClock> {
    listings: Vec<Listing>,
    filtered: Vec<usize>,
    tab: CategoryTab,
    search: SearchState,
    paginator: Paginator<C>,
    trigger: InfiniteScrollTrigger<ViewportNotifier>,
    selected: usize,
    detail: Option<usize>,
    draft: Option<CommentDraft>,
    author: String,
    status: Option<String>,
    help_visible: bool,
}

impl AppState<SystemClock> {
    /// State on the system clock.
    pub fn new(listings: Vec<Listing>, config: &ResolvedConfig) -> Self {
        Self::with_clock(SystemClock, listings, config)
    }
}

impl<C: Clock> AppState<C> {
    /// State driven by `clock`, configured from `config`.
    pub fn with_clock(clock: C, listings: Vec<Listing>, config: &ResolvedConfig) -> Self {
        let filtered: Vec<usize> = (0..listings.len()).collect();
        let paginator = Paginator::new(
            clock,
            config.pagination_mode(),
            config.page_size,
            filtered.len(),
        )
        .with_pacing(config.pacing());
        let mut trigger = InfiniteScrollTrigger::new(ViewportNotifier::new());
        trigger.sync(&paginator);

        info!(
            listings = listings.len(),
            mode = ?paginator.mode(),
            page_size = paginator.page_size().get(),
            "catalog ready"
        );

        Self {
            listings,
            filtered,
            tab: CategoryTab::All,
            search: SearchState::Inactive,
            paginator,
            trigger,
            selected: 0,
            detail: None,
            draft: None,
            author: config.author.clone(),
            status: None,
            help_visible: false,
        }
    }

    // ===== Accessors =====

    /// All listings in load order.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Number of listings passing the current tab and search.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Active category tab.
    pub fn tab(&self) -> CategoryTab {
        self.tab
    }

    /// Search state.
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// Pagination cursor.
    pub fn paginator(&self) -> &Paginator<C> {
        &self.paginator
    }

    /// Load-more trigger.
    pub fn trigger(&self) -> &InfiniteScrollTrigger<ViewportNotifier> {
        &self.trigger
    }

    /// Pagination metrics for the footer.
    pub fn metrics(&self) -> PageMetrics {
        self.paginator.metrics()
    }

    /// Row of the selection within the visible slice.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Listings currently in view, in display order.
    pub fn visible_listings(&self) -> Vec<&Listing> {
        self.paginator
            .visible(&self.filtered)
            .iter()
            .map(|&index| &self.listings[index])
            .collect()
    }

    /// Sentinel the list should draw after its last row, if any.
    pub fn sentinel(&self) -> Option<Sentinel> {
        self.paginator.sentinel()
    }

    /// Listing under the cursor.
    pub fn selected_listing(&self) -> Option<&Listing> {
        self.selected_index().map(|index| &self.listings[index])
    }

    /// Listing open in the detail pane.
    pub fn detail_listing(&self) -> Option<&Listing> {
        self.detail.and_then(|index| self.listings.get(index))
    }

    /// Comment being typed.
    pub fn comment_draft(&self) -> Option<&CommentDraft> {
        self.draft.as_ref()
    }

    /// Status-bar message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether the help overlay is shown.
    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Where keystrokes should go.
    pub fn input_mode(&self) -> InputMode {
        if self.draft.is_some() {
            InputMode::Comment
        } else if self.search.is_typing() {
            InputMode::Search
        } else {
            InputMode::Normal
        }
    }

    /// Footer text: page position or infinite-scroll progress.
    pub fn footer_label(&self) -> String {
        let metrics = self.metrics();
        match self.paginator.mode() {
            PaginationMode::Paged => format!(
                "Page {} of {} · {}",
                metrics.page,
                metrics.total_pages.max(1),
                metrics.showing_label()
            ),
            PaginationMode::Infinite => {
                let progress = if metrics.is_loading {
                    "Loading more…"
                } else if metrics.has_next_page {
                    "↓ more"
                } else {
                    "End of list"
                };
                format!("{} · {}", metrics.showing_label(), progress)
            }
        }
    }

    fn selected_index(&self) -> Option<usize> {
        self.paginator.visible(&self.filtered).get(self.selected).copied()
    }

    fn visible_len(&self) -> usize {
        self.paginator.visible(&self.filtered).len()
    }

    // ===== Filtering =====

    fn refilter(&mut self) {
        self.filtered = filter_indices(&self.listings, self.tab, self.search.query());
        // sync_len resets on a length change; same length can still be a new list.
        if !self.paginator.sync_len(self.filtered.len()) {
            self.paginator.reset_pagination();
        }
        self.selected = 0;
        self.trigger.sync(&self.paginator);
        debug!(
            tab = self.tab.label(),
            query = self.search.query(),
            matches = self.filtered.len(),
            "filter applied"
        );
    }

    /// Switch category tab.
    pub fn set_tab(&mut self, tab: CategoryTab) {
        if tab == self.tab {
            return;
        }
        self.tab = tab;
        self.refilter();
    }

    /// Next category tab.
    pub fn next_tab(&mut self) {
        self.set_tab(self.tab.next());
    }

    /// Previous category tab.
    pub fn prev_tab(&mut self) {
        self.set_tab(self.tab.prev());
    }

    /// Select tab by position (0 = All); out-of-range is ignored.
    pub fn select_tab_index(&mut self, index: usize) {
        if let Some(tab) = CategoryTab::from_index(index) {
            self.set_tab(tab);
        }
    }

    /// Enter search typing mode, keeping any existing query.
    pub fn start_search(&mut self) {
        let query = self.search.query().to_string();
        self.search = SearchState::Typing { query };
    }

    /// Replace the query outright (e.g. from `--search`).
    pub fn set_search(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.search.query() {
            return;
        }
        self.search = if query.is_empty() {
            SearchState::Inactive
        } else {
            SearchState::Active { query }
        };
        self.refilter();
    }

    /// Type a character into the search box.
    pub fn search_push(&mut self, ch: char) {
        let mut query = self.search.query().to_string();
        query.push(ch);
        self.search = SearchState::Typing { query };
        self.refilter();
    }

    /// Delete the last search character.
    pub fn search_backspace(&mut self) {
        let mut query = self.search.query().to_string();
        if query.pop().is_none() {
            return;
        }
        self.search = SearchState::Typing { query };
        self.refilter();
    }

    /// Stop typing and keep the query.
    pub fn confirm_search(&mut self) {
        let query = self.search.query().to_string();
        self.search = if query.is_empty() {
            SearchState::Inactive
        } else {
            SearchState::Active { query }
        };
    }

    /// Drop the query and show the whole tab again.
    pub fn clear_search(&mut self) {
        let had_query = !self.search.query().is_empty();
        self.search = SearchState::Inactive;
        if had_query {
            self.refilter();
        }
    }

    // ===== Navigation =====

    /// Move the cursor down, stopping at the last visible row.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible_len() {
            self.selected += 1;
        }
    }

    /// Move the cursor up.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Next page (paged mode).
    pub fn next_page(&mut self) {
        if self.paginator.mode() == PaginationMode::Paged {
            let before = self.paginator.page();
            if self.paginator.next_page() != before {
                self.selected = 0;
            }
        }
    }

    /// Previous page (paged mode).
    pub fn prev_page(&mut self) {
        if self.paginator.mode() == PaginationMode::Paged {
            let before = self.paginator.page();
            if self.paginator.prev_page() != before {
                self.selected = 0;
            }
        }
    }

    /// First page, or the top row in infinite mode.
    pub fn first_page(&mut self) {
        if self.paginator.mode() == PaginationMode::Paged {
            self.paginator.go_to_page(1);
        }
        self.selected = 0;
    }

    /// Last page, or the bottom loaded row in infinite mode.
    pub fn last_page(&mut self) {
        match self.paginator.mode() {
            PaginationMode::Paged => {
                self.paginator.last_page();
                self.selected = 0;
            }
            PaginationMode::Infinite => {
                self.selected = self.visible_len().saturating_sub(1);
            }
        }
    }

    // ===== Loading =====

    /// Explicit load-more command.
    pub fn load_more(&mut self) -> LoadMoreOutcome {
        let outcome = self.paginator.load_more();
        self.trigger.sync(&self.paginator);
        outcome
    }

    /// Apply time-based changes. Returns `true` when a redraw is needed.
    ///
    /// That is when a pending load completed, or when the throttle window
    /// that dropped a sentinel request has closed: the next frame reports
    /// the re-armed sentinel again.
    pub fn tick(&mut self) -> bool {
        let advanced = self.paginator.tick();
        if advanced {
            self.trigger.sync(&self.paginator);
        }
        let retry = self.paginator.throttle_elapsed();
        if retry {
            debug!("throttle window closed, re-checking sentinel");
        }
        advanced || retry
    }

    /// Feed the render result to the visibility notifier and dispatch.
    ///
    /// `visible` is the sentinel if its row was drawn inside the viewport.
    pub fn on_frame_rendered(&mut self, visible: Option<Sentinel>) -> Option<LoadMoreOutcome> {
        self.trigger.notifier_mut().report_rendered(visible);
        self.trigger.dispatch(&mut self.paginator)
    }

    /// When the event loop must wake up: a pending load or the end of a
    /// throttle window, whichever comes first.
    pub fn next_deadline(&self) -> Option<std::time::Instant> {
        match (self.paginator.next_deadline(), self.paginator.throttle_deadline()) {
            (Some(load), Some(retry)) => Some(load.min(retry)),
            (load, retry) => load.or(retry),
        }
    }

    // ===== Detail & comments =====

    /// Open the selected listing.
    pub fn open_detail(&mut self) {
        self.detail = self.selected_index();
    }

    /// Close the detail pane (and any comment draft).
    pub fn close_detail(&mut self) {
        self.detail = None;
        self.draft = None;
    }

    /// Start a comment on the open listing.
    ///
    /// # Errors
    ///
    /// `CommentError::NoListing` when no detail pane is open.
    pub fn start_comment(&mut self) -> Result<(), CommentError> {
        if self.detail.is_none() {
            return Err(CommentError::NoListing);
        }
        self.draft = Some(CommentDraft::new());
        Ok(())
    }

    /// Type into the comment draft.
    pub fn comment_push(&mut self, ch: char) {
        if let Some(draft) = self.draft.as_mut() {
            draft.push(ch);
        }
    }

    /// Delete from the comment draft.
    pub fn comment_backspace(&mut self) {
        if let Some(draft) = self.draft.as_mut() {
            draft.backspace();
        }
    }

    /// Discard the draft.
    pub fn cancel_comment(&mut self) {
        self.draft = None;
    }

    /// Submit the draft, stamped now.
    ///
    /// # Errors
    ///
    /// See [`Self::submit_comment_at`].
    pub fn submit_comment(&mut self) -> Result<(), CommentError> {
        self.submit_comment_at(Utc::now())
    }

    /// Submit the draft with an explicit timestamp.
    ///
    /// On error the draft stays open so the user can fix it.
    ///
    /// # Errors
    ///
    /// `NoListing` without an open listing or draft; `Empty`/`TooLong`
    /// from validation.
    pub fn submit_comment_at(&mut self, now: DateTime<Utc>) -> Result<(), CommentError> {
        let (Some(index), Some(draft)) = (self.detail, self.draft.as_ref()) else {
            return Err(CommentError::NoListing);
        };
        let comment = draft.finish(&self.author, now)?;
        let listing = self
            .listings
            .get_mut(index)
            .ok_or(CommentError::NoListing)?;
        info!(listing = %listing.id, author = %comment.author, "comment added");
        listing.comments.push(comment);
        self.draft = None;
        Ok(())
    }

    // ===== Status & help =====

    /// Show a status-bar message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Clear the status-bar message.
    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
