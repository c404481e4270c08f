//! Layout dimension and timing constants for TUI rendering.

use std::time::Duration;

/// Height of the category tab bar in lines (border + content).
pub const TAB_BAR_HEIGHT: u16 = 3;

/// Height of the search input widget in lines.
///
/// Only reserved while a search is typed or active.
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of the pagination footer in lines.
pub const FOOTER_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the comment input box in the detail pane.
pub const COMMENT_INPUT_HEIGHT: u16 = 3;

/// Share of the body width given to the list when the detail pane is open.
pub const LIST_WIDTH_PERCENT: u16 = 45;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Event poll timeout when nothing is pending.
pub const IDLE_POLL: Duration = Duration::from_millis(250);

/// Shortest event poll timeout while a load completion is pending.
pub const MIN_LOAD_POLL: Duration = Duration::from_millis(10);
