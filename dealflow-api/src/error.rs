//! Errors returned by the dealflow client
//!
use snafu::prelude::*;

/// Errors returned by the dealflow crate
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DealflowError {
    /// HTTP connection or timeout error. When returned from a dataset fetch,
    /// the caller should degrade to an empty dataset and log, not crash.
    #[snafu(display("HTTP error {method} url:{url}"))]
    Http {
        method: String,
        url: String,
        source: reqwest::Error,
    },

    /// The record store responded with an error status.
    #[snafu(display("store reported error ({code}) {method} {url}: {message}"))]
    Api {
        code: u16,
        method: String,
        url: String,
        message: String,
    },

    /// Deserialization error. This means a store response did not match the
    /// expected record shape. If you see this error, please report it as a bug.
    #[snafu(display("deserialization: {source}"))]
    Deserialization { source: serde_json::Error },

    /// Serialization error. Unlikely to occur.
    #[snafu(display("serialization: {source}"))]
    Serialization { source: serde_json::Error },

    /// A mutation or selection target is absent from the dataset.
    /// The operation was a no-op; no record was changed.
    #[snafu(display("startup {id} not found"))]
    NotFound { id: String },

    /// A bookmark write failed. The optimistic in-memory value has already
    /// been rolled back to the pre-toggle value when this is reported.
    #[snafu(display("bookmark write for {id} failed: {source}"))]
    Persistence {
        id: String,
        #[snafu(source(from(DealflowError, Box::new)))]
        source: Box<DealflowError>,
    },

    /// An internal parameter validation check failed.
    #[snafu(display("validation error: {message}"))]
    Validation { message: String },

    /// Some other error occurred
    #[snafu(display("{message}"))]
    Other { message: String },
}
