//! List pagination (pure core).
//!
//! Turns a caller-owned list plus a page size into either a page-indexed
//! view or a growing infinite-scroll prefix. Time and visibility are
//! injected ([`Clock`], [`VisibilityNotifier`]) so the whole state machine
//! runs under test without a terminal or real timers.

pub mod clock;
pub mod slice;
pub mod state;
pub mod trigger;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use slice::{clamp_page, derive_infinite_slice, derive_paged_slice, total_pages};
pub use state::{LoadMoreOutcome, LoadPacing, PageMetrics, Paginator};
pub use trigger::{CommandNotifier, InfiniteScrollTrigger, ViewportNotifier, VisibilityNotifier};
pub use types::{Generation, InvalidPageSize, PageSize, PaginationMode, Sentinel};
