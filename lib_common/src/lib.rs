// Declare the modules to re-export
#[cfg(feature = "copy")]
pub mod copy;
#[cfg(feature = "retrieve")]
pub mod retrieve;

// Re-export the common types
#[cfg(feature = "copy")]
pub use copy::record::{CopyFields, CopyRecord};
#[cfg(feature = "copy")]
pub use copy::source::{CopySource, SourceError};
#[cfg(feature = "copy")]
pub use copy::store::{CopySnapshot, CopyStore};
#[cfg(feature = "copy")]
pub use copy::CopyError;
#[cfg(feature = "retrieve")]
pub use retrieve::airtable::AirtableSource;
