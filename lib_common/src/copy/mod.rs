//! Copy-record cache: the record model, the snapshot store, the query
//! engine, and the refresh orchestration around the `CopySource` trait.

pub mod query;
pub mod record;
pub mod refresh;
pub mod source;
pub mod store;

pub use query::{ListOutcome, NO_RECORDS_MESSAGE};
pub use record::{CopyFields, CopyRecord};
pub use refresh::refresh;
pub use source::{CopySource, SourceError};
pub use store::{CopySnapshot, CopyStore};

use thiserror::Error;

/// Failures surfaced by the query and refresh operations. The store itself
/// never fails; it either holds data or is empty.
#[derive(Debug, Error)]
pub enum CopyError {
    /// The `since` filter value could not be parsed as an ISO-8601 timestamp.
    #[error("invalid 'since' timestamp: {0}")]
    InvalidTimestamp(String),

    /// No record in the current snapshot matches the requested key.
    #[error("Key not found")]
    KeyNotFound,

    /// The remote source could not be fetched; the store is left unchanged.
    #[error("remote fetch failed: {0}")]
    RemoteFetch(#[from] SourceError),
}
