//! Directory listings and their comments.

use super::identifiers::ListingId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Section of the directory a listing belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Job postings.
    #[serde(alias = "job")]
    Jobs,
    /// Community events.
    #[serde(alias = "event")]
    Events,
    /// Restaurants and food.
    #[serde(alias = "restaurant", alias = "restaurants", alias = "food")]
    Dining,
    /// Housing for rent.
    #[serde(alias = "rental", alias = "housing")]
    Rentals,
}

impl Category {
    /// All categories in tab order.
    pub const ALL: [Self; 4] = [Self::Jobs, Self::Events, Self::Dining, Self::Rentals];

    /// Human-readable tab label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Jobs => "Jobs",
            Self::Events => "Events",
            Self::Dining => "Dining",
            Self::Rentals => "Rentals",
        }
    }

    /// Parse a user-supplied name (case-insensitive, singular or plural).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "jobs" | "job" => Some(Self::Jobs),
            "events" | "event" => Some(Self::Events),
            "dining" | "restaurant" | "restaurants" | "food" => Some(Self::Dining),
            "rentals" | "rental" | "housing" => Some(Self::Rentals),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cuisine of a dining listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Cuisine {
    Chinese,
    Japanese,
    Korean,
    Vietnamese,
    Thai,
    Indian,
    Italian,
    Mexican,
    French,
    MiddleEastern,
    Cafe,
}

impl Cuisine {
    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Chinese => "Chinese",
            Self::Japanese => "Japanese",
            Self::Korean => "Korean",
            Self::Vietnamese => "Vietnamese",
            Self::Thai => "Thai",
            Self::Indian => "Indian",
            Self::Italian => "Italian",
            Self::Mexican => "Mexican",
            Self::French => "French",
            Self::MiddleEastern => "Middle Eastern",
            Self::Cafe => "Café",
        }
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A comment left on a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Display name of the author.
    pub author: String,
    /// Comment text.
    pub body: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

/// One directory entry.
///
/// Wire shape is a camelCase JSON object; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique id.
    pub id: ListingId,
    /// Directory section.
    pub category: Category,
    /// Headline.
    pub title: String,
    /// Free-form body text.
    #[serde(default)]
    pub description: String,
    /// Street address as entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// City, usually derived from the address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Province or state, usually derived from the address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    /// Cuisine (dining only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<Cuisine>,
    /// Price or salary text, kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Contact line (phone, email, handle).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Date of the event (events only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    /// When the listing was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Comments in posting order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

impl Listing {
    /// Minimal listing; optional fields empty.
    pub fn new(id: ListingId, category: Category, title: impl Into<String>) -> Self {
        Self {
            id,
            category,
            title: title.into(),
            description: String::new(),
            address: None,
            city: None,
            province: None,
            cuisine: None,
            price: None,
            contact: None,
            event_date: None,
            created_at: None,
            comments: Vec::new(),
        }
    }

    /// "City, Province", whichever parts are known.
    pub fn location_label(&self) -> Option<String> {
        match (self.city.as_deref(), self.province.as_deref()) {
            (Some(city), Some(province)) => Some(format!("{city}, {province}")),
            (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
            (None, None) => None,
        }
    }

    /// Case-insensitive match of `needle` (already lowercased) against the
    /// searchable text fields.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let fields = [
            Some(self.title.as_str()),
            Some(self.description.as_str()),
            self.address.as_deref(),
            self.city.as_deref(),
            self.province.as_deref(),
            self.cuisine.map(Cuisine::label),
        ];
        fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}
