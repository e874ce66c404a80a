/*
 * Dealflow rust client
 *
 * SPDX-License-Identifier: Apache-2.0
 */
//! # Dealflow
//!
//! Client-side engine for a browsable startup investment catalog.
//!
//! ## Features
//!
//! - pure view-state derivation: search, sector filter, scope, stable sort
//! - optimistic bookmark toggling with rollback on persistence failure
//! - stale-response detection, so a late write result never clobbers a newer toggle
//! - navigation and selection state for list/detail presentations
//! - one-shot "interest registered" notification signal
//! - HTTP record store client, plus an in-memory mock for tests
//! - companion cli tool (`dfl`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dealflow::prelude::*;
//! # async fn example() -> Result<(), DealflowError> {
//!
//! // Connect to the record store (url from DEALFLOW_URL, or the local default)
//! let store = HttpRecordStore::new()?;
//! let mut session = Session::new(store);
//!
//! // Load the catalog. A failed load logs a warning and leaves the catalog empty.
//! let count = session.load().await;
//! println!("{count} startups");
//!
//! // Search and sort the visible list
//! session.set_query("ai");
//! session.set_sort(SortKey::MostRaised);
//! for startup in session.visible() {
//!     println!("{} {} ({})", startup.id, startup.name, startup.sector);
//! }
//!
//! // Open a detail view, then bookmark it. The flag flips immediately; the
//! // outcome reports whether the remote write confirmed or was rolled back.
//! session.select("1")?;
//! let outcome = session.toggle_bookmark("1").await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Design notes
//!
//! - The dataset is a single owned container ([`Catalog`](catalog::Catalog));
//!   the bookmark mutator is its only writer after the initial load. All reads
//!   go through snapshots or the pure [`view::select`] derivation.
//! - Bookmark toggles are optimistic: the in-memory flag changes before the
//!   future first suspends. A per-id sequence number tags each write, so a
//!   settling response that has been superseded by a newer toggle is ignored
//!   rather than reverted (see [`ToggleOutcome`](catalog::ToggleOutcome)).
//! - Rollback restores the literal pre-toggle value, never a re-negation.
//! - Remote failures are recovered locally and logged; none are fatal, and
//!   there is no automatic retry.
//!
//#![warn(clippy::pedantic)] // experimental
#![allow(clippy::missing_errors_doc)] // pedantic
#![allow(clippy::missing_const_for_fn)] //  nursery function
#![allow(clippy::must_use_candidate)] // pedantic
#![warn(clippy::default_trait_access)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::future_not_send)]
#![warn(clippy::implicit_clone)]
#![warn(clippy::match_same_arms)]
#![warn(clippy::min_ident_chars)]
#![warn(clippy::option_if_let_else)]
#![warn(clippy::redundant_clone)]
#![warn(clippy::redundant_closure)]
#![warn(clippy::uninlined_format_args)]
#![warn(clippy::unnecessary_wraps)]
#![warn(clippy::unused_async)]

pub mod catalog;
pub mod error;
#[doc(hidden)]
pub mod mock;
pub mod notify;
pub mod records;
pub mod session;
pub mod store;
pub mod view;

/// Result type alias using `DealflowError` as the default error.
pub type Result<T, E = crate::error::DealflowError> = std::result::Result<T, E>;

/// Prelude module - import (nearly) all the things with `use dealflow::prelude::*;`
pub mod prelude {
    pub use super::DEALFLOW_LOCAL_URL;
    // Error types
    pub use crate::error::*;
    pub use crate::{
        // Dataset container and bookmark mutator
        catalog::{Catalog, ToggleOutcome},
        // Notification signal
        notify::{InterestNotice, NOTICE_VISIBLE},
        // Records
        records::{FundingStage, Sector, StartupRecord, TeamMember, TractionMetric},
        // Navigation and the interactive surface
        session::{Session, View},
        // Record store client
        store::{HttpRecordStore, RecordStore, StoreConfig},
        // View criteria and derivation
        view::{Scope, SortKey, ViewCriteria, select},
    };
}

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default record store endpoint (local development stack)
pub const DEALFLOW_LOCAL_URL: &str = "http://127.0.0.1:54321";

pub(crate) mod config {
    /// Environment variable for default endpoint URL
    pub const DEALFLOW_URL_ENV: &str = "DEALFLOW_URL";

    /// Environment variable for an optional bearer api key
    pub const DEALFLOW_API_KEY_ENV: &str = "DEALFLOW_API_KEY";

    /// Collection path for the startup catalog
    pub const STARTUPS_PATH: &str = "/v1/startups";
}
