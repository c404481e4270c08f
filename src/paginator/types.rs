//! Value types shared by the paginator and its trigger adapter.

use std::fmt;
use std::num::NonZeroUsize;
use thiserror::Error;

/// Number of items per page (or per load-more step in infinite mode).
///
/// Always positive. Construct via [`PageSize::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Page size used when nothing else is configured.
    pub const DEFAULT: Self = match NonZeroUsize::new(6) {
        Some(n) => Self(n),
        None => unreachable!(),
    };

    /// Smart constructor: rejects zero.
    pub fn new(raw: usize) -> Result<Self, InvalidPageSize> {
        NonZeroUsize::new(raw).map(Self).ok_or(InvalidPageSize::Zero)
    }

    /// Raw value.
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned by [`PageSize::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidPageSize {
    /// Zero items per page.
    #[error("Page size must be at least 1")]
    Zero,
}

/// Navigation model, fixed for the paginator's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationMode {
    /// Discrete page index over fixed-size pages.
    #[default]
    Paged,
    /// Growing prefix of the source list.
    Infinite,
}

impl PaginationMode {
    /// `Infinite` when `enabled`, otherwise `Paged`.
    pub const fn from_infinite_flag(enabled: bool) -> Self {
        if enabled {
            Self::Infinite
        } else {
            Self::Paged
        }
    }
}

/// Identity of one logical source list.
///
/// Bumped on every reset. Completions and sentinels carry the generation
/// they were issued for and are ignored once it is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    /// Following generation.
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Handle for the marker rendered after the last displayed item.
///
/// A new sentinel is issued for every load cycle: it names the list
/// generation and the displayed count it was rendered under, so a
/// visibility report for an old sentinel never advances a fresh list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sentinel {
    generation: Generation,
    displayed: usize,
}

impl Sentinel {
    pub(crate) const fn new(generation: Generation, displayed: usize) -> Self {
        Self {
            generation,
            displayed,
        }
    }

    /// Generation this sentinel belongs to.
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Displayed count at the time the sentinel was issued.
    pub const fn displayed(&self) -> usize {
        self.displayed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_rejects_zero() {
        assert_eq!(PageSize::new(0), Err(InvalidPageSize::Zero));
    }

    #[test]
    fn page_size_accepts_positive() {
        assert_eq!(PageSize::new(6).map(PageSize::get), Ok(6));
    }

    #[test]
    fn page_size_default_is_six() {
        assert_eq!(PageSize::default().get(), 6);
    }

    #[test]
    fn mode_from_flag() {
        assert_eq!(PaginationMode::from_infinite_flag(true), PaginationMode::Infinite);
        assert_eq!(PaginationMode::from_infinite_flag(false), PaginationMode::Paged);
    }

    #[test]
    fn generation_next_increments() {
        let g = Generation::default();
        assert_eq!(g.next().get(), 1);
        assert_eq!(g.next().next().get(), 2);
    }

    #[test]
    fn sentinels_differ_across_generations() {
        let a = Sentinel::new(Generation::default(), 6);
        let b = Sentinel::new(Generation::default().next(), 6);
        assert_ne!(a, b);
    }
}
