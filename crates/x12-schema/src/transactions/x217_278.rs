//! Health care services review (278) table for 005010X217.
//!
//! Hierarchy: utilization management organization (HL 20), requester
//! (HL 21), subscriber (HL 22), optional dependent (HL 23), patient event
//! (HL EV) and service level (HL SS). The event and service loops carry the
//! review request itself (UM) and any certification response (HCR).

use super::{seg, seg_in};
use crate::checks;
use crate::model::{
    FieldOverride, HierarchyRole, LoopSchema, LoopSlot, MatchRule, SegmentOverride, SegmentSlot,
    TransactionSchema,
};

const UMO: &[&str] = &["loop_2000a"];
const REQUESTER: &[&str] = &["loop_2000a", "loop_2000b"];
const SUBSCRIBER: &[&str] = &["loop_2000a", "loop_2000b", "loop_2000c"];
const DEPENDENT: &[&str] = &["loop_2000a", "loop_2000b", "loop_2000c", "loop_2000d"];

fn path(base: &[&'static str], tail: &[&'static str]) -> Vec<&'static str> {
    let mut path = base.to_vec();
    path.extend_from_slice(tail);
    path
}

pub(crate) fn table() -> TransactionSchema {
    TransactionSchema::build("278", "005010X217", loops(), rules(), checks())
        .expect("278/005010X217 table must assemble")
}

fn loops() -> Vec<LoopSchema> {
    vec![
        root(),
        header(),
        umo_level(),
        named_party("loop_2010a", &["X3"]),
        requester_level(),
        named_party("loop_2010b", &["1P", "FA"]),
        member_level("loop_2000c", "22", "loop_2010c", &["loop_2000d", "loop_2000e"]),
        member_party("loop_2010c", "IL"),
        member_level("loop_2000d", "23", "loop_2010d", &["loop_2000e"]),
        member_party("loop_2010d", "QC"),
        event_level(),
        named_party("loop_2010e", &["71", "72", "73", "77", "AAJ", "DD", "DN", "FA", "G3", "P3", "SJ"]),
        service_level(),
        named_party("loop_2010f", &["71", "72", "73", "77", "AAJ", "DD", "DN", "FA", "G3", "P3", "SJ"]),
        footer(),
    ]
}

fn root() -> LoopSchema {
    LoopSchema::new("transaction")
        .child(LoopSlot::single("header").required())
        .child(LoopSlot::repeating("loop_2000a").required())
        .child(LoopSlot::single("footer").required())
}

fn header() -> LoopSchema {
    let st = seg_in(
        "ST",
        SegmentOverride::new("ST")
            .field(FieldOverride::new("transaction_set_identifier_code").literal("278"))
            .field(FieldOverride::new("implementation_convention_reference").literal("005010X217")),
    );
    let bht = seg_in(
        "BHT",
        SegmentOverride::new("BHT")
            .field(FieldOverride::new("hierarchical_structure_code").literal("0007"))
            .field(FieldOverride::new("transaction_set_purpose_code").codes(&["01", "11", "13", "36"])),
    );

    LoopSchema::new("header")
        .segment(SegmentSlot::single(st).required())
        .segment(SegmentSlot::single(bht).required())
}

fn umo_level() -> LoopSchema {
    let hl = seg_in(
        "HL",
        SegmentOverride::new("HL")
            .field(FieldOverride::new("hierarchical_parent_id_number").optional())
            .field(FieldOverride::new("hierarchical_level_code").literal("20"))
            .check(checks::hl_root_has_no_parent),
    );

    LoopSchema::new("loop_2000a")
        .segment(SegmentSlot::single(hl).required())
        .segment(SegmentSlot::repeating(seg("AAA"), 0, 9))
        .child(LoopSlot::single("loop_2010a").required())
        .child(LoopSlot::repeating("loop_2000b").required())
}

fn requester_level() -> LoopSchema {
    let hl = seg_in(
        "HL",
        SegmentOverride::new("HL")
            .field(FieldOverride::new("hierarchical_parent_id_number").require())
            .field(FieldOverride::new("hierarchical_level_code").literal("21")),
    );

    LoopSchema::new("loop_2000b")
        .segment(SegmentSlot::single(hl).required())
        .child(LoopSlot::single("loop_2010b").required())
        .child(LoopSlot::repeating("loop_2000c").required())
}

fn member_level(
    name: &'static str,
    level_code: &'static str,
    party: &'static str,
    children: &[&'static str],
) -> LoopSchema {
    let hl = seg_in(
        "HL",
        SegmentOverride::new("HL")
            .field(FieldOverride::new("hierarchical_parent_id_number").require())
            .field(FieldOverride::new("hierarchical_level_code").literal(level_code)),
    );

    let mut schema = LoopSchema::new(name)
        .segment(SegmentSlot::single(hl).required())
        .child(LoopSlot::single(party).required());
    for child in children {
        schema = schema.child(LoopSlot::repeating(child));
    }
    schema
}

fn event_level() -> LoopSchema {
    let hl = seg_in(
        "HL",
        SegmentOverride::new("HL")
            .field(FieldOverride::new("hierarchical_parent_id_number").require())
            .field(FieldOverride::new("hierarchical_level_code").literal("EV")),
    );

    LoopSchema::new("loop_2000e")
        .segment(SegmentSlot::single(hl).required())
        .segment(SegmentSlot::repeating(seg("TRN"), 0, 9))
        .segment(SegmentSlot::repeating(seg("AAA"), 0, 9))
        .segment(SegmentSlot::single(seg("UM")).required())
        .segment(SegmentSlot::single(seg("HCR")))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 9))
        .segment(SegmentSlot::single(seg("HI")))
        .segment(SegmentSlot::single(seg("HSD")))
        .segment(SegmentSlot::single(seg("CL1")))
        .segment(SegmentSlot::repeating(seg("CRC"), 0, 9))
        .segment(SegmentSlot::repeating(seg("MSG"), 0, 9))
        .child(LoopSlot::repeating("loop_2010e"))
        .child(LoopSlot::repeating("loop_2000f"))
        .check(checks::no_duplicate_ref_qualifiers)
        .check(checks::no_duplicate_dtp_qualifiers)
}

fn service_level() -> LoopSchema {
    let hl = seg_in(
        "HL",
        SegmentOverride::new("HL")
            .field(FieldOverride::new("hierarchical_parent_id_number").require())
            .field(FieldOverride::new("hierarchical_level_code").literal("SS")),
    );

    LoopSchema::new("loop_2000f")
        .segment(SegmentSlot::single(hl).required())
        .segment(SegmentSlot::repeating(seg("TRN"), 0, 9))
        .segment(SegmentSlot::single(seg("UM")))
        .segment(SegmentSlot::single(seg("HCR")))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 9))
        .segment(SegmentSlot::single(seg("SV1")))
        .segment(SegmentSlot::single(seg("SV2")))
        .segment(SegmentSlot::single(seg("HSD")))
        .child(LoopSlot::repeating("loop_2010f"))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn named_party(name: &'static str, entity_codes: &[&'static str]) -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1")
            .field(FieldOverride::new("entity_identifier_code").codes(entity_codes)),
    );

    LoopSchema::new(name)
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::single(seg("PER")))
        .segment(SegmentSlot::repeating(seg("AAA"), 0, 9))
        .segment(SegmentSlot::single(seg("PRV")))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn member_party(name: &'static str, entity_code: &'static str) -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1")
            .field(FieldOverride::new("entity_identifier_code").literal(entity_code)),
    );

    LoopSchema::new(name)
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::single(seg("DMG")))
        .segment(SegmentSlot::single(seg("INS")))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn footer() -> LoopSchema {
    LoopSchema::new("footer").segment(SegmentSlot::single(seg("SE")).required())
}

fn rules() -> Vec<MatchRule> {
    let mut rules = vec![
        MatchRule::new("ST", &["header"]),
        MatchRule::new("HL", UMO)
            .when("hierarchical_level_code", &["20"])
            .new_instance(),
        MatchRule::new("HL", REQUESTER)
            .when("hierarchical_level_code", &["21"])
            .new_instance(),
        MatchRule::new("HL", SUBSCRIBER)
            .when("hierarchical_level_code", &["22"])
            .new_instance()
            .hierarchy(HierarchyRole::Subscriber),
        MatchRule::new("HL", DEPENDENT)
            .when("hierarchical_level_code", &["23"])
            .new_instance()
            .hierarchy(HierarchyRole::Patient),
    ];

    // the patient event hangs off the dependent when present, else the
    // subscriber; the service level always hangs off the event
    for base in [DEPENDENT, SUBSCRIBER] {
        rules.push(
            MatchRule::new("HL", &path(base, &["loop_2000e"]))
                .when("hierarchical_level_code", &["EV"])
                .new_instance(),
        );
        rules.push(
            MatchRule::new("HL", &path(base, &["loop_2000e", "loop_2000f"]))
                .when("hierarchical_level_code", &["SS"])
                .new_instance(),
        );
    }

    for base in [DEPENDENT, SUBSCRIBER] {
        rules.push(MatchRule::new("NM1", &path(base, &["loop_2000e", "loop_2000f", "loop_2010f"])).new_instance());
        rules.push(MatchRule::new("NM1", &path(base, &["loop_2000e", "loop_2010e"])).new_instance());
    }
    rules.push(MatchRule::new("NM1", &path(DEPENDENT, &["loop_2010d"])));
    rules.push(MatchRule::new("NM1", &path(SUBSCRIBER, &["loop_2010c"])));
    rules.push(MatchRule::new("NM1", &path(REQUESTER, &["loop_2010b"])));
    rules.push(MatchRule::new("NM1", &path(UMO, &["loop_2010a"])));

    rules.push(MatchRule::new("SE", &["footer"]));
    rules
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
        assert_eq!(table.code, "278");
        assert_eq!(table.rules_for("HL").count(), 9);
        let event = table.loop_schema("loop_2000e").unwrap();
        assert!(event.slot("um_segment").is_some());
    }

    #[test]
    fn test_event_level_matches_on_ev() {
        let table = table();
        assert!(table
            .rules_for("HL")
            .any(|r| r.conditions[0].one_of == vec!["EV"]));
    }
}
