//! Identifier newtypes with smart constructors.
//!
//! Identifiers validate non-empty strings at construction time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListingId(String);

impl ListingId {
    /// Smart constructor: trims and rejects blank ids.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidListingId> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidListingId::Empty);
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Borrow the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ListingId {
    type Error = InvalidListingId;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ListingId> for String {
    fn from(id: ListingId) -> Self {
        id.0
    }
}

/// Error returned by [`ListingId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidListingId {
    /// Blank id.
    #[error("Listing ID cannot be empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_id_accepts_non_empty() {
        let id = ListingId::new("job-42").unwrap();
        assert_eq!(id.as_str(), "job-42");
        assert_eq!(id.to_string(), "job-42");
    }

    #[test]
    fn listing_id_trims_whitespace() {
        let id = ListingId::new("  dine-7 ").unwrap();
        assert_eq!(id.as_str(), "dine-7");
    }

    #[test]
    fn listing_id_rejects_blank() {
        assert_eq!(ListingId::new(""), Err(InvalidListingId::Empty));
        assert_eq!(ListingId::new("   "), Err(InvalidListingId::Empty));
    }

    #[test]
    fn listing_id_deserializes_from_string() {
        let id: ListingId = serde_json::from_str("\"evt-1\"").unwrap();
        assert_eq!(id.as_str(), "evt-1");
    }

    #[test]
    fn listing_id_deserialize_rejects_blank() {
        let result: Result<ListingId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
