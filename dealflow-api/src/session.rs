//! # Interactive session
//!
//! Navigation and selection state, plus the command surface a presentation
//! layer drives: search/filter/sort setters, view switching, record
//! selection, bookmark toggling, and interest registration.
//!
//! The session owns a [`Catalog`] handle; the scope of the visible list is
//! implied by the active view (the watchlist view shows bookmarked records
//! only). Selection is stored by id and resolved against the catalog on every
//! read, so the detail copy of a record can never diverge from the list copy
//! while a bookmark write is in flight.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dealflow::prelude::*;
//! # async fn example() -> Result<(), DealflowError> {
//! let mut session = Session::new(HttpRecordStore::new()?);
//! session.load().await;
//!
//! session.set_query("carbon");
//! session.navigate(View::Watchlist);
//! for startup in session.visible() {
//!     println!("{}", startup.name);
//! }
//!
//! session.select("2")?;
//! session.register_interest("2")?;
//! assert!(session.notice().is_visible());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use snafu::prelude::*;
use tracing::{debug, warn};

use crate::{
    Result,
    catalog::{Catalog, ToggleOutcome},
    error::NotFoundSnafu,
    notify::InterestNotice,
    records::{Sector, StartupRecord},
    store::RecordStore,
    view::{Scope, SortKey, ViewCriteria},
};

/// Top-level views. `Detail` requires a selected record; rendering it
/// without one falls back to `Dashboard`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum View {
    #[default]
    Dashboard,
    Calendar,
    Watchlist,
    Detail,
    Profile,
}

/// Interactive session state for one user.
///
/// All methods are synchronous-looking calls into the core; only
/// [`load`](Session::load) and [`toggle_bookmark`](Session::toggle_bookmark)
/// suspend, and the optimistic part of a toggle is visible before the first
/// suspension.
pub struct Session<S> {
    catalog: Arc<Catalog<S>>,
    criteria: ViewCriteria,
    view: View,
    selected: Option<String>,
    notice: InterestNotice,
}

impl<S: RecordStore> Session<S> {
    /// Creates a session with an empty catalog backed by `store`.
    pub fn new(store: S) -> Self {
        Self {
            catalog: Arc::new(Catalog::new(store)),
            criteria: ViewCriteria::default(),
            view: View::Dashboard,
            selected: None,
            notice: InterestNotice::new(),
        }
    }

    /// Loads the dataset. A load failure degrades to an empty catalog with a
    /// logged warning; it is never surfaced as a blocking error. Returns the
    /// number of records loaded.
    pub async fn load(&mut self) -> usize {
        match self.catalog.load().await {
            Ok(count) => count,
            Err(error) => {
                warn!(%error, "dataset load failed; continuing with empty catalog");
                0
            }
        }
    }

    /// Handle to the underlying catalog, for presentation code that needs to
    /// run toggles off the interactive path.
    pub fn catalog(&self) -> Arc<Catalog<S>> {
        Arc::clone(&self.catalog)
    }

    pub fn criteria(&self) -> &ViewCriteria {
        &self.criteria
    }

    pub fn active_view(&self) -> View {
        self.view
    }

    /// Sets the free-text search query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
    }

    /// Sets the sector filter (`None` = all sectors).
    pub fn set_sector(&mut self, sector: Option<Sector>) {
        self.criteria.sector = sector;
    }

    /// Sets the sort key.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.criteria.sort = sort;
    }

    /// Scope implied by the active view.
    pub fn scope(&self) -> Scope {
        match self.view {
            View::Watchlist => Scope::Watchlist,
            _ => Scope::All,
        }
    }

    /// Records visible in the active view under the current criteria.
    /// An empty result is valid and should render an empty-state affordance.
    pub fn visible(&self) -> Vec<StartupRecord> {
        self.catalog.view(&self.criteria, self.scope())
    }

    /// Switches the top-level view. Entering `Detail` without a selection
    /// falls back to `Dashboard`; leaving `Detail` clears the selection, so
    /// no stale detail context survives a view switch.
    pub fn navigate(&mut self, view: View) {
        if view == View::Detail && self.selected.is_none() {
            debug!("detail view requested without selection; showing dashboard");
            self.view = View::Dashboard;
            return;
        }
        if self.view == View::Detail && view != View::Detail {
            self.selected = None;
        }
        self.view = view;
    }

    /// Selects a record for detail display and enters the detail view.
    /// Fails with `NotFound` (and stays on the current view) for an unknown id.
    pub fn select(&mut self, id: &str) -> Result<()> {
        ensure!(self.catalog.get(id).is_some(), NotFoundSnafu { id });
        self.selected = Some(id.to_string());
        self.view = View::Detail;
        Ok(())
    }

    /// Returns from the detail view to the dashboard, clearing the selection.
    pub fn back(&mut self) {
        if self.view == View::Detail {
            self.selected = None;
            self.view = View::Dashboard;
        }
    }

    /// The record selected for detail display. Resolved against the catalog
    /// on every call, so an in-flight bookmark toggle is reflected here at
    /// the same moment it is in the list.
    pub fn selected(&self) -> Option<StartupRecord> {
        self.selected.as_deref().and_then(|id| self.catalog.get(id))
    }

    /// Toggles the bookmark on `id`. See
    /// [`Catalog::toggle_bookmark`] for the optimistic/rollback contract.
    pub async fn toggle_bookmark(&self, id: &str) -> Result<ToggleOutcome> {
        self.catalog.toggle_bookmark(id).await
    }

    /// Registers interest in a startup and raises the completion notice.
    pub fn register_interest(&mut self, id: &str) -> Result<()> {
        ensure!(self.catalog.get(id).is_some(), NotFoundSnafu { id });
        debug!(id, "interest registered");
        self.notice.raise();
        Ok(())
    }

    /// The one-shot completion notice.
    pub fn notice(&self) -> &InterestNotice {
        &self.notice
    }

    /// Acknowledges the completion notice.
    pub fn dismiss_notice(&mut self) {
        self.notice.dismiss();
    }
}
