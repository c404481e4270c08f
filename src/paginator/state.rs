//! Paginator state machine.
//!
//! Holds the cursor (page or displayed count), the loading flag and the
//! throttle timestamp for one logical source list. The list itself stays
//! with the caller and is passed to [`Paginator::visible`] on every render.
//!
//! # Invariants
//! - `1 <= page <= max(total_pages, 1)`
//! - `displayed_count <= len`, non-decreasing between resets
//! - at most one load-more in flight; completions from a previous
//!   generation are never applied

use super::clock::{Clock, SystemClock};
use super::slice::{clamp_page, derive_infinite_slice, derive_paged_slice, total_pages};
use super::types::{Generation, PageSize, PaginationMode, Sentinel};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Pacing of infinite-scroll loads.
///
/// Purely presentational: the delay models perceived latency and the
/// throttle drops rapid repeated triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPacing {
    /// Time between an accepted load-more and its completion.
    pub delay: Duration,
    /// Minimum time between two accepted load-more requests.
    pub throttle: Duration,
}

impl LoadPacing {
    /// Default completion delay.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);
    /// Default throttle interval.
    pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(500);

    /// Build pacing from millisecond values.
    pub const fn from_millis(delay_ms: u64, throttle_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            throttle: Duration::from_millis(throttle_ms),
        }
    }

    /// No delay and no throttle: every accepted load completes synchronously.
    pub const fn immediate() -> Self {
        Self {
            delay: Duration::ZERO,
            throttle: Duration::ZERO,
        }
    }
}

impl Default for LoadPacing {
    fn default() -> Self {
        Self {
            delay: Self::DEFAULT_DELAY,
            throttle: Self::DEFAULT_THROTTLE,
        }
    }
}

/// Result of a [`Paginator::load_more`] call.
///
/// Every variant except `Loaded` and `Scheduled` is a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreOutcome {
    /// Zero delay: the displayed count advanced immediately.
    Loaded,
    /// Completion scheduled; applied by a later [`Paginator::tick`].
    Scheduled,
    /// Paged mode has no load-more.
    NotInfinite,
    /// A previous load is still pending.
    AlreadyLoading,
    /// Every item is already displayed.
    Exhausted,
    /// Too soon after the previous accepted load.
    Throttled,
}

impl LoadMoreOutcome {
    /// Whether the request was accepted.
    pub const fn accepted(self) -> bool {
        matches!(self, Self::Loaded | Self::Scheduled)
    }
}

/// Read-only navigation metrics for labels and buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMetrics {
    /// Current 1-based page.
    pub page: usize,
    /// `ceil(total_items / page_size)`.
    pub total_pages: usize,
    /// 1-based index of the first visible item (0 when nothing is visible).
    pub start_index: usize,
    /// 1-based index of the last visible item (0 when nothing is visible).
    pub end_index: usize,
    /// Length of the source list.
    pub total_items: usize,
    /// More content reachable forward.
    pub has_next_page: bool,
    /// A previous page exists.
    pub has_prev_page: bool,
    /// A load-more completion is pending.
    pub is_loading: bool,
}

impl PageMetrics {
    /// "Showing X–Y of N", or "No items" for an empty list.
    pub fn showing_label(&self) -> String {
        if self.total_items == 0 {
            return "No items".to_string();
        }
        format!(
            "Showing {}–{} of {}",
            self.start_index, self.end_index, self.total_items
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingLoad {
    due: Instant,
    generation: Generation,
}

/// Cursor state over a caller-owned list.
///
/// Generic over the [`Clock`] so tests can drive time by hand.
#[derive(Debug, Clone)]
pub struct Paginator<C: Clock = SystemClock> {
    clock: C,
    mode: PaginationMode,
    page_size: PageSize,
    pacing: LoadPacing,
    len: usize,
    page: usize,
    displayed: usize,
    pending: Option<PendingLoad>,
    last_load: Option<Instant>,
    retry_due: Option<Instant>,
    generation: Generation,
}

impl Paginator<SystemClock> {
    /// Paginator on the system clock with default pacing.
    pub fn with_system_clock(mode: PaginationMode, page_size: PageSize, len: usize) -> Self {
        Self::new(SystemClock, mode, page_size, len)
    }
}

impl<C: Clock> Paginator<C> {
    /// Create a paginator for a source list of `len` items.
    pub fn new(clock: C, mode: PaginationMode, page_size: PageSize, len: usize) -> Self {
        Self {
            clock,
            mode,
            page_size,
            pacing: LoadPacing::default(),
            len,
            page: 1,
            displayed: page_size.get().min(len),
            pending: None,
            last_load: None,
            retry_due: None,
            generation: Generation::default(),
        }
    }

    /// Replace the load pacing.
    pub fn with_pacing(mut self, pacing: LoadPacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Navigation model.
    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    /// Items per page.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Current pacing.
    pub fn pacing(&self) -> LoadPacing {
        self.pacing
    }

    /// Length of the source list this cursor was computed for.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the source list is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of items materialized in infinite mode.
    pub fn displayed_count(&self) -> usize {
        self.displayed
    }

    /// Whether a load-more completion is pending.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Identity of the current logical list.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// `ceil(len / page_size)`.
    pub fn total_pages(&self) -> usize {
        total_pages(self.len, self.page_size)
    }

    /// The part of `source` currently in view.
    pub fn visible<'a, T>(&self, source: &'a [T]) -> &'a [T] {
        match self.mode {
            PaginationMode::Paged => derive_paged_slice(source, self.page_size, self.page),
            PaginationMode::Infinite => derive_infinite_slice(source, self.displayed),
        }
    }

    /// Jump to `requested`, clamped into `[1, total_pages]`.
    pub fn go_to_page(&mut self, requested: usize) -> usize {
        let page = clamp_page(requested, self.total_pages());
        if page != self.page {
            debug!(from = self.page, to = page, requested, "page changed");
        }
        self.page = page;
        page
    }

    /// Step forward one page; no-op on the last page.
    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.page.saturating_add(1))
    }

    /// Step back one page; no-op on the first page.
    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.page.saturating_sub(1))
    }

    /// Jump to the last page.
    pub fn last_page(&mut self) -> usize {
        self.go_to_page(self.total_pages())
    }

    /// Request the next chunk in infinite mode.
    ///
    /// Dropped (not queued) while loading, when exhausted, or inside the
    /// throttle interval.
    pub fn load_more(&mut self) -> LoadMoreOutcome {
        let outcome = self.try_load_more();
        match outcome {
            LoadMoreOutcome::Loaded | LoadMoreOutcome::Scheduled => debug!(
                ?outcome,
                displayed = self.displayed,
                len = self.len,
                "load-more accepted"
            ),
            _ => trace!(?outcome, "load-more dropped"),
        }
        outcome
    }

    fn try_load_more(&mut self) -> LoadMoreOutcome {
        if self.mode != PaginationMode::Infinite {
            return LoadMoreOutcome::NotInfinite;
        }
        if self.pending.is_some() {
            return LoadMoreOutcome::AlreadyLoading;
        }
        if self.displayed >= self.len {
            return LoadMoreOutcome::Exhausted;
        }

        let now = self.clock.now();
        if let Some(last) = self.last_load {
            if now.saturating_duration_since(last) < self.pacing.throttle {
                self.retry_due = Some(last + self.pacing.throttle);
                return LoadMoreOutcome::Throttled;
            }
        }
        self.last_load = Some(now);
        self.retry_due = None;

        if self.pacing.delay.is_zero() {
            self.advance();
            return LoadMoreOutcome::Loaded;
        }

        self.pending = Some(PendingLoad {
            due: now + self.pacing.delay,
            generation: self.generation,
        });
        LoadMoreOutcome::Scheduled
    }

    /// Apply a due load-more completion.
    ///
    /// Returns `true` when the displayed count advanced. Call from the
    /// event loop; cheap when nothing is pending.
    pub fn tick(&mut self) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if pending.generation != self.generation {
            trace!("discarding completion from a previous list");
            self.pending = None;
            return false;
        }
        if self.clock.now() < pending.due {
            return false;
        }
        self.pending = None;
        self.advance();
        true
    }

    /// When the pending completion falls due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// End of the throttle window that dropped the last request.
    ///
    /// Set only after a [`LoadMoreOutcome::Throttled`]; a caller whose
    /// trigger fired inside the window should retry once this passes.
    pub fn throttle_deadline(&self) -> Option<Instant> {
        self.retry_due
    }

    /// Consume an elapsed throttle window.
    ///
    /// Returns `true` once, at the first call after the window that dropped
    /// a request has closed and more items remain.
    pub fn throttle_elapsed(&mut self) -> bool {
        let Some(due) = self.retry_due else {
            return false;
        };
        if self.clock.now() < due {
            return false;
        }
        self.retry_due = None;
        self.has_more_items()
    }

    fn advance(&mut self) {
        let before = self.displayed;
        self.displayed = self
            .displayed
            .saturating_add(self.page_size.get())
            .min(self.len);
        debug!(from = before, to = self.displayed, len = self.len, "displayed count advanced");
    }

    /// Back to the initial cursor for a new logical list.
    ///
    /// Cancels any pending completion and starts a new generation.
    pub fn reset_pagination(&mut self) {
        self.page = 1;
        self.displayed = self.page_size.get().min(self.len);
        self.pending = None;
        self.last_load = None;
        self.retry_due = None;
        self.generation = self.generation.next();
        debug!(
            generation = self.generation.get(),
            len = self.len,
            page_size = self.page_size.get(),
            "pagination reset"
        );
    }

    /// Record the current source length, resetting when it changed.
    ///
    /// Returns `true` when a reset happened.
    pub fn sync_len(&mut self, len: usize) -> bool {
        if len == self.len {
            return false;
        }
        self.len = len;
        self.reset_pagination();
        true
    }

    /// Change the page size, resetting when it changed.
    pub fn set_page_size(&mut self, page_size: PageSize) -> bool {
        if page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        self.reset_pagination();
        true
    }

    /// More content reachable forward.
    pub fn has_next_page(&self) -> bool {
        match self.mode {
            PaginationMode::Paged => self.page < self.total_pages(),
            PaginationMode::Infinite => self.has_more_items(),
        }
    }

    /// A previous page exists.
    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    /// Infinite mode still has undisplayed items.
    pub fn has_more_items(&self) -> bool {
        self.displayed < self.len
    }

    /// 1-based index of the first visible item, 0 when nothing is visible.
    pub fn start_index(&self) -> usize {
        if self.len == 0 {
            return 0;
        }
        match self.mode {
            PaginationMode::Paged => {
                let start = (self.page - 1).saturating_mul(self.page_size.get());
                if start >= self.len {
                    0
                } else {
                    start + 1
                }
            }
            PaginationMode::Infinite => usize::from(self.displayed > 0),
        }
    }

    /// 1-based index of the last visible item, 0 when nothing is visible.
    pub fn end_index(&self) -> usize {
        if self.start_index() == 0 {
            return 0;
        }
        match self.mode {
            PaginationMode::Paged => self
                .page
                .saturating_mul(self.page_size.get())
                .min(self.len),
            PaginationMode::Infinite => self.displayed,
        }
    }

    /// Snapshot of every derived metric.
    pub fn metrics(&self) -> PageMetrics {
        PageMetrics {
            page: self.page,
            total_pages: self.total_pages(),
            start_index: self.start_index(),
            end_index: self.end_index(),
            total_items: self.len,
            has_next_page: self.has_next_page(),
            has_prev_page: self.has_prev_page(),
            is_loading: self.is_loading(),
        }
    }

    /// Sentinel to render after the last displayed item.
    ///
    /// `None` outside infinite mode, while loading, and once every item is
    /// displayed.
    pub fn sentinel(&self) -> Option<Sentinel> {
        if self.mode != PaginationMode::Infinite || self.is_loading() || !self.has_more_items() {
            return None;
        }
        Some(Sentinel::new(self.generation, self.displayed))
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
