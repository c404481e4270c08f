//! Directory browsing state (pure core).
//!
//! Filtering, selection and comments on top of the [`crate::paginator`].

pub mod app_state;
pub mod comment;
pub mod filter;

pub use app_state::{AppState, InputMode};
pub use comment::{CommentDraft, CommentError, MAX_COMMENT_CHARS};
pub use filter::{filter_indices, CategoryTab, SearchState};
