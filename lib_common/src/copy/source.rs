use async_trait::async_trait;
use thiserror::Error;

use crate::copy::record::CopyRecord;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("remote source returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("remote source request failed: {0}")]
    Transport(String),
    #[error("remote source payload could not be decoded: {0}")]
    Decode(String),
}

/// Where copy records come from. The production implementation talks to the
/// remote table API; tests substitute a fake.
///
/// `fetch_all` returns the complete record set; there is no delta protocol.
#[async_trait]
pub trait CopySource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<CopyRecord>, SourceError>;
}
