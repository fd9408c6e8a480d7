use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The keyed text payload of a record. The capitalized member names are the
/// wire format of the remote source and of our own responses; existing
/// consumers depend on them, so they are pinned with explicit renames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyFields {
    #[serde(rename = "Key", default)]
    pub key: String,
    #[serde(rename = "Copy", default)]
    pub copy: String,
}

/// One unit of displayable text, exactly as the remote source shapes it:
/// `{"id": ..., "createdTime": ..., "fields": {"Key": ..., "Copy": ...}}`.
///
/// `created_time` is kept verbatim as a string so responses echo the source
/// byte-for-byte (including fractional seconds); it is parsed only when a
/// comparison is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyRecord {
    pub id: String,
    #[serde(rename = "createdTime")]
    pub created_time: String,
    pub fields: CopyFields,
}

impl CopyRecord {
    /// Parses `created_time` as an RFC 3339 timestamp in UTC. Returns `None`
    /// when the source sent something unparsable.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_time)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}
