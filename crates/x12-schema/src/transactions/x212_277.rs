//! Claim status response (277) table for 005010X212.
//!
//! Shares the 276 hierarchy; the tracking loops carry STC status
//! information instead of inquiry references.

use super::{seg, seg_in, x212_276};
use crate::checks;
use crate::model::{
    FieldOverride, HierarchyRole, LoopSchema, LoopSlot, MatchRule, SegmentOverride, SegmentSlot,
    TransactionSchema,
};

const SOURCE: &[&str] = &["loop_2000a"];
const RECEIVER: &[&str] = &["loop_2000a", "loop_2000b"];
const PROVIDER: &[&str] = &["loop_2000a", "loop_2000b", "loop_2000c"];
const SUBSCRIBER: &[&str] = &["loop_2000a", "loop_2000b", "loop_2000c", "loop_2000d"];
const DEPENDENT: &[&str] = &[
    "loop_2000a",
    "loop_2000b",
    "loop_2000c",
    "loop_2000d",
    "loop_2000e",
];

fn path(base: &[&'static str], tail: &[&'static str]) -> Vec<&'static str> {
    let mut path = base.to_vec();
    path.extend_from_slice(tail);
    path
}

pub(crate) fn table() -> TransactionSchema {
    TransactionSchema::build("277", "005010X212", loops(), rules(), checks())
        .expect("277/005010X212 table must assemble")
}

fn loops() -> Vec<LoopSchema> {
    vec![
        x212_276::root(),
        x212_276::header("277"),
        hierarchy_level("loop_2000a", "20", true, "loop_2100a", Some("loop_2000b"), None),
        x212_276::entity_name("loop_2100a", &["PR"]),
        hierarchy_level("loop_2000b", "21", false, "loop_2100b", Some("loop_2000c"), None),
        x212_276::entity_name("loop_2100b", &["41"]),
        hierarchy_level("loop_2000c", "19", false, "loop_2100c", Some("loop_2000d"), None),
        x212_276::entity_name("loop_2100c", &["1P"]),
        hierarchy_level(
            "loop_2000d",
            "22",
            false,
            "loop_2100d",
            Some("loop_2000e"),
            Some("loop_2200d"),
        ),
        x212_276::entity_name("loop_2100d", &["IL"]),
        status_tracking("loop_2200d", "loop_2220d"),
        status_line("loop_2220d"),
        hierarchy_level("loop_2000e", "23", false, "loop_2100e", None, Some("loop_2200e")),
        x212_276::entity_name("loop_2100e", &["QC"]),
        status_tracking("loop_2200e", "loop_2220e"),
        status_line("loop_2220e"),
        footer(),
    ]
}

fn hierarchy_level(
    name: &'static str,
    level_code: &'static str,
    root: bool,
    name_loop: &'static str,
    child: Option<&'static str>,
    tracking: Option<&'static str>,
) -> LoopSchema {
    let mut hl_override = SegmentOverride::new("HL")
        .field(FieldOverride::new("hierarchical_level_code").literal(level_code));
    hl_override = if root {
        hl_override
            .field(FieldOverride::new("hierarchical_parent_id_number").optional())
            .check(checks::hl_root_has_no_parent)
    } else {
        hl_override.field(FieldOverride::new("hierarchical_parent_id_number").require())
    };

    let mut schema = LoopSchema::new(name)
        .segment(SegmentSlot::single(seg_in("HL", hl_override)).required());

    if tracking.is_some() {
        schema = schema.segment(SegmentSlot::single(seg("DMG")));
    }

    schema = schema.child(LoopSlot::single(name_loop).required());
    if let Some(tracking_loop) = tracking {
        schema = schema.child(LoopSlot::repeating(tracking_loop).required());
    }
    if let Some(child_name) = child {
        schema = schema.child(LoopSlot::repeating(child_name));
    }
    schema
}

fn status_tracking(name: &'static str, lines: &'static str) -> LoopSchema {
    LoopSchema::new(name)
        .segment(SegmentSlot::single(seg("TRN")).required())
        .segment(SegmentSlot::repeating(seg("STC"), 0, 9))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 2))
        .child(LoopSlot::repeating(lines))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn status_line(name: &'static str) -> LoopSchema {
    LoopSchema::new(name)
        .segment(SegmentSlot::single(seg("SVC")).required())
        .segment(SegmentSlot::repeating(seg("STC"), 0, 9))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::single(seg("DTP")))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn footer() -> LoopSchema {
    LoopSchema::new("footer").segment(SegmentSlot::single(seg("SE")).required())
}

fn rules() -> Vec<MatchRule> {
    vec![
        MatchRule::new("ST", &["header"]),
        MatchRule::new("HL", SOURCE)
            .when("hierarchical_level_code", &["20"])
            .new_instance(),
        MatchRule::new("HL", RECEIVER)
            .when("hierarchical_level_code", &["21"])
            .new_instance(),
        MatchRule::new("HL", PROVIDER)
            .when("hierarchical_level_code", &["19"])
            .new_instance(),
        MatchRule::new("HL", SUBSCRIBER)
            .when("hierarchical_level_code", &["22"])
            .new_instance()
            .hierarchy(HierarchyRole::Subscriber),
        MatchRule::new("HL", DEPENDENT)
            .when("hierarchical_level_code", &["23"])
            .new_instance()
            .hierarchy(HierarchyRole::Patient),
        MatchRule::new("NM1", &path(SOURCE, &["loop_2100a"]))
            .when("entity_identifier_code", &["PR"]),
        MatchRule::new("NM1", &path(RECEIVER, &["loop_2100b"]))
            .when("entity_identifier_code", &["41"]),
        MatchRule::new("NM1", &path(PROVIDER, &["loop_2100c"]))
            .when("entity_identifier_code", &["1P"]),
        MatchRule::new("NM1", &path(SUBSCRIBER, &["loop_2100d"]))
            .when("entity_identifier_code", &["IL"]),
        MatchRule::new("NM1", &path(DEPENDENT, &["loop_2100e"]))
            .when("entity_identifier_code", &["QC"]),
        MatchRule::new("TRN", &path(DEPENDENT, &["loop_2200e"])).new_instance(),
        MatchRule::new("TRN", &path(SUBSCRIBER, &["loop_2200d"])).new_instance(),
        MatchRule::new("SVC", &path(DEPENDENT, &["loop_2200e", "loop_2220e"])).new_instance(),
        MatchRule::new("SVC", &path(SUBSCRIBER, &["loop_2200d", "loop_2220d"])).new_instance(),
        MatchRule::new("SE", &["footer"]),
    ]
}

fn checks() -> Vec<fn(&x12_ir::LoopRecord) -> Vec<String>> {
    vec![checks::hl_parent_links, checks::segment_count_matches]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_assembles() {
        let table = table();
        assert_eq!(table.code, "277");
        assert!(table.loop_schema("loop_2220e").is_some());
        let tracking = table.loop_schema("loop_2200d").unwrap();
        assert!(tracking.slot("stc_segment").is_some());
    }
}
