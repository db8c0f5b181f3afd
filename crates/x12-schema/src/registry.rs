//! Process-wide schema registries.
//!
//! Registries are built once on first access and are immutable afterwards,
//! so they are freely shareable across threads. A malformed table is a
//! configuration error and fails fast at startup.

use crate::model::{SegmentSchema, TransactionSchema};
use crate::{segments, transactions};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static SEGMENTS: Lazy<HashMap<&'static str, SegmentSchema>> = Lazy::new(segments::base_segments);

static TRANSACTIONS: Lazy<HashMap<(String, String), TransactionSchema>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for table in transactions::all() {
        let key = (
            table.code.to_string(),
            version_base(table.version).to_string(),
        );
        map.insert(key, table);
    }
    map
});

/// Base schema for a segment id.
pub fn segment_schema(id: &str) -> Option<&'static SegmentSchema> {
    SEGMENTS.get(id)
}

/// Dispatch table and loop schemas for a transaction.
///
/// Versions match on the 10-character base (e.g. `005010X279`), so addenda
/// revisions such as `005010X279A1` resolve to the same table.
pub fn transaction_schema(code: &str, version: &str) -> Option<&'static TransactionSchema> {
    let key = (code.to_string(), version_base(version).to_string());
    TRANSACTIONS.get(&key)
}

/// The implementation version base: release digits plus the guide code.
pub fn version_base(version: &str) -> &str {
    version.get(..10).unwrap_or(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_lookup() {
        assert!(segment_schema("NM1").is_some());
        assert!(segment_schema("HL").is_some());
        assert!(segment_schema("ZZZ").is_none());
    }

    #[test]
    fn test_version_base() {
        assert_eq!(version_base("005010X279A1"), "005010X279");
        assert_eq!(version_base("005010X212"), "005010X212");
        assert_eq!(version_base("00501"), "00501");
    }

    #[test]
    fn test_transaction_lookup_with_addenda_revision() {
        let table = transaction_schema("270", "005010X279A1").unwrap();
        assert_eq!(table.code, "270");

        // base version resolves to the same table
        assert!(transaction_schema("270", "005010X279").is_some());
        assert!(transaction_schema("999", "005010X279A1").is_none());
    }

    #[test]
    fn test_all_supported_transactions_registered() {
        let supported = [
            ("270", "005010X279A1"),
            ("271", "005010X279A1"),
            ("276", "005010X212"),
            ("277", "005010X212"),
            ("278", "005010X217"),
            ("820", "005010X218"),
            ("834", "005010X220A1"),
            ("835", "005010X221A1"),
            ("837", "005010X222A2"),
            ("837", "005010X223A3"),
            ("837", "005010X224A2"),
        ];
        for (code, version) in supported {
            assert!(
                transaction_schema(code, version).is_some(),
                "missing table for {code} {version}"
            );
        }
    }
}
