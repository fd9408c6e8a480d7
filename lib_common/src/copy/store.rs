use std::sync::Arc;
use tokio::sync::RwLock;

use crate::copy::record::CopyRecord;

/// The complete record set valid at a point in time. Shared by reference;
/// replaced wholesale, never patched in place.
pub type CopySnapshot = Arc<Vec<CopyRecord>>;

/// Holds the live snapshot. Readers clone the snapshot pointer and work on
/// an immutable set; `replace` swaps the pointer. The lock is held only for
/// the clone or the swap, never across any I/O, so a reader always observes
/// one complete snapshot.
#[derive(Debug, Default)]
pub struct CopyStore {
    snapshot: RwLock<CopySnapshot>,
}

impl CopyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, in the order records were received from the
    /// source. Empty until the first `replace`.
    pub async fn get_all(&self) -> CopySnapshot {
        self.snapshot.read().await.clone()
    }

    /// Installs `records` as the new snapshot, discarding the old one, and
    /// returns the installed snapshot so callers can echo it back without a
    /// second read.
    pub async fn replace(&self, records: Vec<CopyRecord>) -> CopySnapshot {
        let next: CopySnapshot = Arc::new(records);
        let mut guard = self.snapshot.write().await;
        *guard = next.clone();
        next
    }
}
