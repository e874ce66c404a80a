//! # View-state derivation
//!
//! Pure derivation of a displayed record sequence from the dataset and the
//! active criteria. [`select`] has no side effects; calling it twice with
//! unchanged inputs yields an identical sequence.
//!
//! Filters apply in a fixed order (scope, then sector, then text) and compose
//! as logical AND; the stable sort is always applied last.

use crate::records::{Sector, StartupRecord};

/// Top-level subset selector, implied by the active navigational view.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum Scope {
    /// Every record in the dataset
    #[default]
    All,
    /// Bookmarked records only
    Watchlist,
}

/// Sort key for the displayed sequence. All sorts are stable: records with
/// equal keys keep their relative order from the pre-sort sequence.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
    /// Insertion order, unchanged
    #[default]
    RecentlyAdded,
    /// Descending by amount raised
    MostRaised,
    /// Descending by valuation
    HighestValuation,
}

/// Ephemeral, client-only view criteria. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCriteria {
    /// Free-text query; case-insensitive substring match against name and
    /// tagline. An empty query means "no text filter", not "match nothing".
    pub query: String,
    /// Sector filter; `None` means "All"
    pub sector: Option<Sector>,
    pub sort: SortKey,
}

impl ViewCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text query.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Restricts results to one sector.
    pub fn sector(mut self, sector: Sector) -> Self {
        self.sector = Some(sector);
        self
    }

    /// Sets the sort key.
    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

/// Derives the displayed sequence for `records` under `criteria` and `scope`.
///
/// An empty result is a valid outcome (the empty-state affordance is the
/// caller's concern). Borrowed references preserve dataset identity; callers
/// that need owned rows clone them.
pub fn select<'a>(
    records: &'a [StartupRecord],
    criteria: &ViewCriteria,
    scope: Scope,
) -> Vec<&'a StartupRecord> {
    let query = criteria.query.to_lowercase();
    let mut rows: Vec<&StartupRecord> = records
        .iter()
        .filter(|record| scope == Scope::All || record.bookmarked)
        .filter(|record| criteria.sector.is_none_or(|sector| record.sector == sector))
        .filter(|record| {
            query.is_empty()
                || record.name.to_lowercase().contains(&query)
                || record.tagline.to_lowercase().contains(&query)
        })
        .collect();

    // slice::sort_by is stable; ties keep their pre-sort order
    match criteria.sort {
        SortKey::RecentlyAdded => {}
        SortKey::MostRaised => rows.sort_by(|left, right| right.raised.cmp(&left.raised)),
        SortKey::HighestValuation => {
            rows.sort_by(|left, right| right.valuation.cmp(&left.valuation));
        }
    }
    rows
}
