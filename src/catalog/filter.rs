//! Category tabs and free-text search over the listing set.

use crate::model::{Category, Listing};

// ===== CategoryTab =====

/// Tab in the category bar. `All` shows every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryTab {
    /// Every category.
    #[default]
    All,
    /// A single category.
    Only(Category),
}

impl CategoryTab {
    /// Tabs in display order.
    pub const TABS: [Self; 5] = [
        Self::All,
        Self::Only(Category::Jobs),
        Self::Only(Category::Events),
        Self::Only(Category::Dining),
        Self::Only(Category::Rentals),
    ];

    /// Tab label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.label(),
        }
    }

    /// Position in [`Self::TABS`].
    pub fn index(self) -> usize {
        Self::TABS
            .iter()
            .position(|tab| *tab == self)
            .unwrap_or_default()
    }

    /// Tab at `index`, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::TABS.get(index).copied()
    }

    /// Next tab, wrapping around.
    pub fn next(self) -> Self {
        Self::TABS[(self.index() + 1) % Self::TABS.len()]
    }

    /// Previous tab, wrapping around.
    pub fn prev(self) -> Self {
        let len = Self::TABS.len();
        Self::TABS[(self.index() + len - 1) % len]
    }

    /// Whether `listing` belongs under this tab.
    pub fn admits(self, listing: &Listing) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => listing.category == category,
        }
    }
}

impl From<Option<Category>> for CategoryTab {
    fn from(category: Option<Category>) -> Self {
        category.map_or(Self::All, Self::Only)
    }
}

// ===== SearchState =====

/// Search input state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    /// No search.
    #[default]
    Inactive,
    /// User is typing; the list filters live.
    Typing {
        /// Query so far.
        query: String,
    },
    /// Query confirmed with Enter.
    Active {
        /// Confirmed query.
        query: String,
    },
}

impl SearchState {
    /// Current query text, empty when inactive.
    pub fn query(&self) -> &str {
        match self {
            Self::Inactive => "",
            Self::Typing { query } | Self::Active { query } => query,
        }
    }

    /// Whether keystrokes go to the search box.
    pub fn is_typing(&self) -> bool {
        matches!(self, Self::Typing { .. })
    }
}

// ===== Filtering =====

/// Indices into `listings` admitted by `tab` and matching `query`.
///
/// Matching is case-insensitive over title, description, address, city,
/// province and cuisine. Order follows `listings`.
pub fn filter_indices(listings: &[Listing], tab: CategoryTab, query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| tab.admits(listing) && listing.matches_lowercase(&needle))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListingId;

    fn listing(id: &str, category: Category, title: &str) -> Listing {
        Listing::new(ListingId::new(id).unwrap(), category, title)
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing("j1", Category::Jobs, "Line cook wanted"),
            listing("d1", Category::Dining, "Pho Saigon"),
            listing("e1", Category::Events, "Cooking class"),
            listing("r1", Category::Rentals, "Basement suite"),
        ]
    }

    #[test]
    fn tabs_wrap_in_both_directions() {
        assert_eq!(CategoryTab::All.prev(), CategoryTab::Only(Category::Rentals));
        assert_eq!(CategoryTab::Only(Category::Rentals).next(), CategoryTab::All);
        assert_eq!(CategoryTab::All.next(), CategoryTab::Only(Category::Jobs));
    }

    #[test]
    fn from_index_round_trips_positions() {
        for (i, tab) in CategoryTab::TABS.iter().enumerate() {
            assert_eq!(CategoryTab::from_index(i), Some(*tab));
            assert_eq!(tab.index(), i);
        }
        assert_eq!(CategoryTab::from_index(5), None);
    }

    #[test]
    fn filter_by_tab_only() {
        let listings = sample();
        assert_eq!(filter_indices(&listings, CategoryTab::All, ""), vec![0, 1, 2, 3]);
        assert_eq!(
            filter_indices(&listings, CategoryTab::Only(Category::Dining), ""),
            vec![1]
        );
    }

    #[test]
    fn filter_by_query_is_case_insensitive() {
        let listings = sample();
        assert_eq!(filter_indices(&listings, CategoryTab::All, "COOK"), vec![0, 2]);
        assert_eq!(
            filter_indices(&listings, CategoryTab::Only(Category::Events), " cook "),
            vec![2]
        );
    }

    #[test]
    fn filter_with_no_match_is_empty() {
        assert!(filter_indices(&sample(), CategoryTab::All, "zzz").is_empty());
    }

    #[test]
    fn search_state_query_text() {
        assert_eq!(SearchState::Inactive.query(), "");
        let typing = SearchState::Typing {
            query: "pho".into(),
        };
        assert_eq!(typing.query(), "pho");
        assert!(typing.is_typing());
        assert!(!SearchState::Active {
            query: "pho".into()
        }
        .is_typing());
    }
}
