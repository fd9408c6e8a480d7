use chrono::{DateTime, Utc};

use crate::copy::record::CopyRecord;
use crate::copy::CopyError;

/// Informational body returned when a since-filter matches nothing. Pinned
/// verbatim; existing consumers match on this text.
pub const NO_RECORDS_MESSAGE: &str = "We don't have records after the specified time";

/// Outcome of a listing. The sentinel is a distinguishable success, not an
/// error and not an empty array, so it is tagged here rather than inferred
/// from a length check downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Records(Vec<CopyRecord>),
    Empty { message: &'static str },
}

/// Lists records, optionally filtered to those created strictly after
/// `since`.
///
/// Without `since` the whole snapshot is returned as-is, even when empty.
/// With `since`, an empty filter result becomes the sentinel outcome. A
/// stored record whose own timestamp does not parse cannot be ordered and is
/// left out of filtered results.
pub fn list_since(
    records: &[CopyRecord],
    since: Option<&str>,
) -> Result<ListOutcome, CopyError> {
    let Some(since_raw) = since else {
        return Ok(ListOutcome::Records(records.to_vec()));
    };
    let threshold = parse_since(since_raw)?;

    let newer: Vec<CopyRecord> = records
        .iter()
        .filter(|record| match record.created_at() {
            Some(created) => created > threshold,
            None => {
                log::warn!(
                    "Record {} has unparsable createdTime {:?}; excluded from filtered listing",
                    record.id,
                    record.created_time
                );
                false
            }
        })
        .cloned()
        .collect();

    if newer.is_empty() {
        Ok(ListOutcome::Empty { message: NO_RECORDS_MESSAGE })
    } else {
        Ok(ListOutcome::Records(newer))
    }
}

/// Finds the first record (in snapshot order) whose key equals `key`.
/// Key uniqueness is not guaranteed upstream; first match wins.
pub fn find_by_key(records: &[CopyRecord], key: &str) -> Result<CopyRecord, CopyError> {
    records
        .iter()
        .find(|record| record.fields.key == key)
        .cloned()
        .ok_or(CopyError::KeyNotFound)
}

fn parse_since(raw: &str) -> Result<DateTime<Utc>, CopyError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| CopyError::InvalidTimestamp(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::record::CopyFields;

    fn record(id: &str, created: &str, key: &str, copy: &str) -> CopyRecord {
        CopyRecord {
            id: id.into(),
            created_time: created.into(),
            fields: CopyFields { key: key.into(), copy: copy.into() },
        }
    }

    fn sample() -> Vec<CopyRecord> {
        vec![
            record("rec1", "2023-07-05T10:00:00.000Z", "intro", "Welcome to our app!"),
            record("rec2", "2023-07-05T11:00:00.000Z", "greeting", "Hello, {name}!"),
        ]
    }

    #[test]
    fn no_filter_returns_everything() {
        let records = sample();
        let outcome = list_since(&records, None).unwrap();
        assert_eq!(outcome, ListOutcome::Records(records));
    }

    #[test]
    fn no_filter_on_an_empty_store_returns_an_empty_list_not_the_sentinel() {
        let outcome = list_since(&[], None).unwrap();
        assert_eq!(outcome, ListOutcome::Records(vec![]));
    }

    #[test]
    fn filter_keeps_only_records_created_strictly_after_since() {
        let records = sample();
        let outcome = list_since(&records, Some("2023-07-05T10:30:00Z")).unwrap();
        match outcome {
            ListOutcome::Records(filtered) => {
                assert_eq!(filtered.len(), 1);
                assert_eq!(filtered[0].id, "rec2");
            }
            other => panic!("expected records, got {other:?}"),
        }
    }

    #[test]
    fn filter_earlier_than_every_record_returns_the_full_snapshot() {
        let records = sample();
        let outcome = list_since(&records, Some("2023-01-01T00:00:00Z")).unwrap();
        assert_eq!(outcome, ListOutcome::Records(records));
    }

    #[test]
    fn filter_is_strict_a_record_created_exactly_at_since_is_excluded() {
        let records = sample();
        let outcome = list_since(&records, Some("2023-07-05T11:00:00Z")).unwrap();
        assert_eq!(outcome, ListOutcome::Empty { message: NO_RECORDS_MESSAGE });
    }

    #[test]
    fn filter_later_than_every_record_returns_the_sentinel() {
        let records = sample();
        let outcome = list_since(&records, Some("2023-07-05T12:00:00Z")).unwrap();
        assert_eq!(outcome, ListOutcome::Empty { message: NO_RECORDS_MESSAGE });
    }

    #[test]
    fn filter_on_an_empty_store_returns_the_sentinel() {
        let outcome = list_since(&[], Some("2023-07-05T12:00:00Z")).unwrap();
        assert_eq!(outcome, ListOutcome::Empty { message: NO_RECORDS_MESSAGE });
    }

    #[test]
    fn filter_accepts_fractional_seconds_and_numeric_offsets() {
        let records = sample();
        for since in ["2023-07-05T10:30:00.000Z", "2023-07-05T10:30:00+00:00"] {
            let outcome = list_since(&records, Some(since)).unwrap();
            match outcome {
                ListOutcome::Records(filtered) => assert_eq!(filtered[0].id, "rec2"),
                other => panic!("expected records for {since}, got {other:?}"),
            }
        }
    }

    #[test]
    fn unparsable_since_is_an_invalid_timestamp_error() {
        let records = sample();
        for bad in ["not-a-date", "2023-07-05", "2023-07-05 10:30:00", ""] {
            let err = list_since(&records, Some(bad)).unwrap_err();
            assert!(
                matches!(err, CopyError::InvalidTimestamp(ref raw) if raw == bad),
                "expected InvalidTimestamp for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn records_with_unparsable_timestamps_are_skipped_by_the_filter_only() {
        let records = vec![
            record("bad", "garbage", "broken", "x"),
            record("rec2", "2023-07-05T11:00:00.000Z", "greeting", "Hello, {name}!"),
        ];

        // Unfiltered listing still serves the record as stored.
        let all = list_since(&records, None).unwrap();
        assert_eq!(all, ListOutcome::Records(records.clone()));

        // Filtered listing cannot order it, so it is left out.
        let filtered = list_since(&records, Some("2023-01-01T00:00:00Z")).unwrap();
        match filtered {
            ListOutcome::Records(kept) => {
                assert_eq!(kept.len(), 1);
                assert_eq!(kept[0].id, "rec2");
            }
            other => panic!("expected records, got {other:?}"),
        }
    }

    #[test]
    fn find_by_key_returns_the_matching_record() {
        let records = sample();
        let found = find_by_key(&records, "greeting").unwrap();
        assert_eq!(found.id, "rec2");
        assert_eq!(found.fields.copy, "Hello, {name}!");
    }

    #[test]
    fn find_by_key_misses_with_key_not_found() {
        let records = sample();
        let err = find_by_key(&records, "nope").unwrap_err();
        assert!(matches!(err, CopyError::KeyNotFound));
        assert_eq!(err.to_string(), "Key not found");
    }

    #[test]
    fn find_by_key_returns_the_first_match_when_keys_are_duplicated() {
        let records = vec![
            record("rec1", "2023-07-05T10:00:00.000Z", "greeting", "first"),
            record("rec2", "2023-07-05T11:00:00.000Z", "greeting", "second"),
        ];
        let found = find_by_key(&records, "greeting").unwrap();
        assert_eq!(found.id, "rec1");
        assert_eq!(found.fields.copy, "first");
    }
}
