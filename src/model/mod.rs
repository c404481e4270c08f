//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod listing;

// Re-export for convenience
pub use error::{AppError, InputError, ParseError};
pub use identifiers::{InvalidListingId, ListingId};
pub use key_action::KeyAction;
pub use listing::{Category, Comment, Cuisine, Listing};
