use crate::copy::source::CopySource;
use crate::copy::store::{CopySnapshot, CopyStore};
use crate::copy::CopyError;

/// Resynchronizes the store with the remote source: fetch everything, then
/// install it as the new snapshot. The fetch completes before the store is
/// touched, so a failed fetch leaves the previous snapshot intact.
///
/// Returns the installed snapshot so the caller can echo it back without a
/// second read; racing refreshes could interleave between a write and a
/// read-back.
pub async fn refresh(
    store: &CopyStore,
    source: &dyn CopySource,
) -> Result<CopySnapshot, CopyError> {
    let records = source.fetch_all().await?;
    let installed = store.replace(records).await;
    log::info!("Installed copy snapshot with {} records", installed.len());
    Ok(installed)
}
