//! Per-transaction dispatch tables and loop schemas.
//!
//! One module per (transaction code, implementation guide) pair. Tables are
//! assembled at registry startup; an inconsistent table fails fast there.

pub mod x212_276;
pub mod x212_277;
pub mod x217_278;
pub mod x218_820;
pub mod x220_834;
pub mod x221_835;
pub mod x279_270;
pub mod x279_271;
pub mod x837;

use crate::model::{merge_override, SegmentOverride, SegmentSchema, TransactionSchema};
use crate::registry;

pub(crate) fn all() -> Vec<TransactionSchema> {
    vec![
        x279_270::table(),
        x279_271::table(),
        x212_276::table(),
        x212_277::table(),
        x217_278::table(),
        x218_820::table(),
        x220_834::table(),
        x221_835::table(),
        x837::professional(),
        x837::institutional(),
        x837::dental(),
    ]
}

/// Clone the base schema for a segment id.
///
/// Tables reference segments by id; a missing base schema is a
/// configuration error caught the first time the registry is touched.
pub(crate) fn seg(id: &str) -> SegmentSchema {
    registry::segment_schema(id)
        .unwrap_or_else(|| panic!("base schema for segment '{id}' is not registered"))
        .clone()
}

/// Clone a base schema with a loop-local override merged on.
pub(crate) fn seg_in(id: &str, ov: SegmentOverride) -> SegmentSchema {
    merge_override(&seg(id), &ov)
}
