//! # Catalog: the shared dataset and its bookmark mutator
//!
//! [`Catalog`] is the single owned container for the startup dataset. After
//! the initial load, [`toggle_bookmark`](Catalog::toggle_bookmark) is the only
//! writer; every read goes through a snapshot or the pure
//! [`view::select`](crate::view::select) derivation.
//!
//! Toggles are optimistic: the in-memory flag flips before the persistence
//! call is issued, the result of the call then confirms it, reverts it, or is
//! discarded as stale. See [`ToggleOutcome`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dealflow::prelude::*;
//! # async fn example() -> Result<(), DealflowError> {
//! let catalog = Catalog::new(HttpRecordStore::new()?);
//! catalog.load().await?;
//!
//! let criteria = ViewCriteria::new().sort(SortKey::MostRaised);
//! for startup in catalog.view(&criteria, Scope::All) {
//!     println!("{} {}", startup.id, startup.name);
//! }
//!
//! match catalog.toggle_bookmark("1").await? {
//!     ToggleOutcome::Confirmed { bookmarked } => println!("saved: {bookmarked}"),
//!     ToggleOutcome::Reverted { bookmarked } => println!("write failed, back to {bookmarked}"),
//!     ToggleOutcome::Superseded => {}
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::{
    Result,
    error::DealflowError,
    records::StartupRecord,
    store::RecordStore,
    view::{Scope, ViewCriteria, select},
};

/// Resolution of a bookmark toggle, reported after the persistence call
/// settles. The optimistic flip itself happens before the toggle future
/// first suspends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The remote write succeeded; the optimistic value stands.
    Confirmed { bookmarked: bool },
    /// The remote write failed; the literal pre-toggle value was restored.
    Reverted { bookmarked: bool },
    /// A newer toggle for the same id was issued while this write was in
    /// flight. The response was discarded without touching the record;
    /// the newer toggle owns the record's fate.
    Superseded,
}

impl ToggleOutcome {
    /// The record's bookmark value after this outcome settled, if this
    /// outcome still owned the record.
    pub fn bookmarked(&self) -> Option<bool> {
        match self {
            Self::Confirmed { bookmarked } | Self::Reverted { bookmarked } => Some(*bookmarked),
            Self::Superseded => None,
        }
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    records: Vec<StartupRecord>,
    /// Monotonic toggle sequence per record id. A settling response applies
    /// only while its sequence is still the latest for that id.
    toggle_seq: HashMap<String, u64>,
}

/// Single owned container for the startup dataset.
///
/// Interior mutability (`parking_lot::RwLock`) keeps the mutation API on
/// `&self`; the lock is never held across an await point, so the optimistic
/// phase of a toggle is atomic with respect to other event handlers.
/// Toggles on different ids are independent and may be in flight concurrently.
pub struct Catalog<S> {
    store: S,
    state: RwLock<CatalogState>,
}

impl<S: RecordStore> Catalog<S> {
    /// Creates an empty catalog backed by `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: RwLock::new(CatalogState::default()),
        }
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replaces the dataset with the store's current contents and returns the
    /// record count. On failure the dataset is left unchanged (empty on first
    /// load) and the error is returned for the caller to log.
    pub async fn load(&self) -> Result<usize> {
        let records = self.store.fetch_all().await?;
        let count = records.len();
        debug!(count, "dataset loaded");
        let mut state = self.state.write();
        state.records = records;
        state.toggle_seq.clear();
        Ok(count)
    }

    /// Snapshot of the full dataset, in insertion order.
    pub fn records(&self) -> Vec<StartupRecord> {
        self.state.read().records.clone()
    }

    /// Looks up one record by id.
    pub fn get(&self, id: &str) -> Option<StartupRecord> {
        self.state
            .read()
            .records
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }

    /// Number of bookmarked records.
    pub fn bookmarked_count(&self) -> usize {
        self.state
            .read()
            .records
            .iter()
            .filter(|record| record.bookmarked)
            .count()
    }

    /// Derives the displayed sequence for `criteria` and `scope`.
    /// Pure with respect to the current dataset snapshot.
    pub fn view(&self, criteria: &ViewCriteria, scope: Scope) -> Vec<StartupRecord> {
        let state = self.state.read();
        select(&state.records, criteria, scope)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Toggles the bookmark flag on `id` optimistically.
    ///
    /// The flag is flipped in memory before this future first suspends, so
    /// readers (including a detail view holding the same id) observe the new
    /// value immediately. The remote write then settles the toggle:
    ///
    /// - success keeps the optimistic value ([`ToggleOutcome::Confirmed`]),
    /// - failure restores the literal pre-toggle value and logs a warning
    ///   ([`ToggleOutcome::Reverted`]); there is no automatic retry,
    /// - a response that arrives after a newer toggle was issued for the same
    ///   id leaves the record untouched ([`ToggleOutcome::Superseded`]).
    ///
    /// Fails with [`NotFound`](DealflowError::NotFound) if `id` is absent;
    /// no mutation is attempted in that case.
    pub async fn toggle_bookmark(&self, id: &str) -> Result<ToggleOutcome> {
        // Optimistic phase, synchronous: flip the flag and claim a sequence
        // number while holding the write lock.
        let (seq, prior, new_value) = {
            let mut state = self.state.write();
            let Some(record) = state.records.iter_mut().find(|record| record.id == id) else {
                return Err(DealflowError::NotFound { id: id.to_string() });
            };
            let prior = record.bookmarked;
            let new_value = !prior;
            record.bookmarked = new_value;
            let counter = state.toggle_seq.entry(id.to_string()).or_default();
            *counter += 1;
            (*counter, prior, new_value)
        };
        debug!(id, value = new_value, seq, "optimistic bookmark toggle");

        let written = self.store.set_bookmark(id, new_value).await;

        let mut state = self.state.write();
        let latest = state.toggle_seq.get(id).copied().unwrap_or(0);
        if latest != seq {
            // A newer toggle was issued while this write was in flight. Its
            // optimistic state must not be clobbered, whatever our result was.
            debug!(id, seq, latest, "stale bookmark response ignored");
            return Ok(ToggleOutcome::Superseded);
        }
        match written {
            Ok(()) => Ok(ToggleOutcome::Confirmed {
                bookmarked: new_value,
            }),
            Err(source) => {
                if let Some(record) = state.records.iter_mut().find(|record| record.id == id) {
                    record.bookmarked = prior;
                }
                let error = DealflowError::Persistence {
                    id: id.to_string(),
                    source: Box::new(source),
                };
                warn!(%error, "optimistic bookmark value reverted");
                Ok(ToggleOutcome::Reverted { bookmarked: prior })
            }
        }
    }
}
