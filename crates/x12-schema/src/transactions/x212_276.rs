//! Claim status request (276) table for 005010X212.
//!
//! The 276 hierarchy inserts a service provider level between the
//! information receiver and the subscriber:
//!
//! - loop_2000a (information source, HL 20)
//! - loop_2000b (information receiver, HL 21)
//! - loop_2000c (service provider, HL 19)
//! - loop_2000d (subscriber, HL 22) with claim status tracking (2200D/2210D)
//! - loop_2000e (dependent, HL 23) with claim status tracking (2200E/2210E)

use super::{seg, seg_in};
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
    TransactionSchema::build("276", "005010X212", loops(), rules(), checks())
        .expect("276/005010X212 table must assemble")
}

fn loops() -> Vec<LoopSchema> {
    vec![
        root(),
        header("276"),
        hierarchy_level("loop_2000a", "20", true, "loop_2100a", Some("loop_2000b"), false),
        entity_name("loop_2100a", &["PR"]),
        hierarchy_level("loop_2000b", "21", false, "loop_2100b", Some("loop_2000c"), false),
        entity_name("loop_2100b", &["41"]),
        hierarchy_level("loop_2000c", "19", false, "loop_2100c", Some("loop_2000d"), false),
        entity_name("loop_2100c", &["1P"]),
        hierarchy_level("loop_2000d", "22", false, "loop_2100d", Some("loop_2000e"), true),
        entity_name("loop_2100d", &["IL"]),
        tracking("loop_2200d", "loop_2210d"),
        service_line("loop_2210d"),
        hierarchy_level("loop_2000e", "23", false, "loop_2100e", None, true),
        entity_name("loop_2100e", &["QC"]),
        tracking("loop_2200e", "loop_2210e"),
        service_line("loop_2210e"),
        footer(),
    ]
}

pub(super) fn root() -> LoopSchema {
    LoopSchema::new("transaction")
        .child(LoopSlot::single("header").required())
        .child(LoopSlot::repeating("loop_2000a").required())
        .child(LoopSlot::single("footer").required())
}

pub(super) fn header(code: &'static str) -> LoopSchema {
    let st = seg_in(
        "ST",
        SegmentOverride::new("ST")
            .field(FieldOverride::new("transaction_set_identifier_code").literal(code))
            .field(FieldOverride::new("implementation_convention_reference").literal("005010X212")),
    );
    let bht = seg_in(
        "BHT",
        SegmentOverride::new("BHT")
            .field(FieldOverride::new("hierarchical_structure_code").literal("0010"))
            .field(FieldOverride::new("transaction_set_purpose_code").codes(&["08", "13"])),
    );

    LoopSchema::new("header")
        .segment(SegmentSlot::single(st).required())
        .segment(SegmentSlot::single(bht).required())
}

fn hierarchy_level(
    name: &'static str,
    level_code: &'static str,
    root: bool,
    name_loop: &'static str,
    child: Option<&'static str>,
    member_level: bool,
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

    let mut schema = LoopSchema::new(name).segment(SegmentSlot::single(seg_in("HL", hl_override)).required());

    if member_level {
        schema = schema.segment(SegmentSlot::single(seg("DMG")));
    }

    schema = schema.child(LoopSlot::single(name_loop).required());
    if member_level {
        let tracking_loop = if name == "loop_2000d" { "loop_2200d" } else { "loop_2200e" };
        schema = schema.child(LoopSlot::repeating(tracking_loop).required());
    }
    if let Some(child_name) = child {
        schema = schema.child(LoopSlot::repeating(child_name));
    }
    schema
}

pub(super) fn entity_name(name: &'static str, entity_codes: &[&'static str]) -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1")
            .field(FieldOverride::new("entity_identifier_code").codes(entity_codes)),
    );
    LoopSchema::new(name).segment(SegmentSlot::single(nm1).required())
}

fn tracking(name: &'static str, lines: &'static str) -> LoopSchema {
    LoopSchema::new(name)
        .segment(SegmentSlot::single(seg("TRN")).required())
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::single(seg("AMT")))
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 2))
        .child(LoopSlot::repeating(lines))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn service_line(name: &'static str) -> LoopSchema {
    LoopSchema::new(name)
        .segment(SegmentSlot::single(seg("SVC")).required())
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
        MatchRule::new("SVC", &path(DEPENDENT, &["loop_2200e", "loop_2210e"])).new_instance(),
        MatchRule::new("SVC", &path(SUBSCRIBER, &["loop_2200d", "loop_2210d"])).new_instance(),
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
        assert_eq!(table.code, "276");
        assert_eq!(table.rules_for("HL").count(), 5);
        assert!(table.loop_schema("loop_2210e").is_some());
    }

    #[test]
    fn test_provider_level_uses_code_19() {
        let table = table();
        let rule = table
            .rules_for("HL")
            .find(|r| r.target.last() == Some(&"loop_2000c"))
            .unwrap();
        assert_eq!(rule.conditions[0].one_of, vec!["19"]);
    }
}
