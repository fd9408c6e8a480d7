use std::sync::Arc;

use lib_common::copy::{refresh, CopyError, CopySnapshot, CopySource, CopyStore};

/// Shared handles for request handlers: the snapshot store plus the remote
/// source used to refill it. Cheap to clone; both sides are behind Arcs.
#[derive(Clone)]
pub struct AppState {
    store: Arc<CopyStore>,
    source: Arc<dyn CopySource>,
}

impl AppState {
    pub fn new(source: Arc<dyn CopySource>) -> Self {
        Self {
            store: Arc::new(CopyStore::new()),
            source,
        }
    }

    /// The currently installed snapshot.
    pub async fn snapshot(&self) -> CopySnapshot {
        self.store.get_all().await
    }

    /// Fetches the full record set from the source and installs it,
    /// returning the snapshot that was installed.
    pub async fn refresh(&self) -> Result<CopySnapshot, CopyError> {
        refresh(self.store.as_ref(), self.source.as_ref()).await
    }
}
