//! Eligibility response (271) table for 005010X279A1.
//!
//! Mirrors the 270 hierarchy and adds the benefit reporting loops: repeating
//! eligibility/benefit loops (2110) with additional information (2115) and
//! LS/LE-bracketed benefit related entities (2120).

use super::{seg, seg_in};
use crate::checks;
use crate::model::{
    FieldOverride, HierarchyRole, LoopSchema, LoopSlot, MatchRule, SegmentOverride, SegmentSlot,
    TransactionSchema,
};

pub(crate) fn table() -> TransactionSchema {
    TransactionSchema::build("271", "005010X279A1", loops(), rules(), checks())
        .expect("271/005010X279A1 table must assemble")
}

fn loops() -> Vec<LoopSchema> {
    vec![
        root(),
        header(),
        information_source(),
        name_loop("loop_2100a", &["2B", "36", "GP", "P5", "PR"]),
        information_receiver(),
        name_loop("loop_2100b", &["1P", "2B", "36", "80", "FA", "GP", "P5", "PR"]),
        member("loop_2000c", "22", "loop_2100c", Some("loop_2000d")),
        member_name("loop_2100c", "loop_2110c", "IL"),
        benefit("loop_2110c", "loop_2115c", "loop_2120c"),
        additional_information("loop_2115c"),
        related_entity("loop_2120c"),
        member("loop_2000d", "23", "loop_2100d", None),
        member_name("loop_2100d", "loop_2110d", "03"),
        benefit("loop_2110d", "loop_2115d", "loop_2120d"),
        additional_information("loop_2115d"),
        related_entity("loop_2120d"),
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
            .field(FieldOverride::new("transaction_set_identifier_code").literal("271"))
            .field(FieldOverride::new("implementation_convention_reference").literal("005010X279A1")),
    );
    let bht = seg_in(
        "BHT",
        SegmentOverride::new("BHT")
            .field(FieldOverride::new("hierarchical_structure_code").literal("0022"))
            .field(FieldOverride::new("transaction_set_purpose_code").codes(&["06", "11"])),
    );

    LoopSchema::new("header")
        .segment(SegmentSlot::single(st).required())
        .segment(SegmentSlot::single(bht).required())
}

fn information_source() -> LoopSchema {
    let hl = seg_in(
        "HL",
        SegmentOverride::new("HL")
            .field(FieldOverride::new("hierarchical_parent_id_number").optional())
            .field(FieldOverride::new("hierarchical_level_code").literal("20"))
            .field(FieldOverride::new("hierarchical_child_code").literal("1"))
            .check(checks::hl_root_has_no_parent),
    );

    LoopSchema::new("loop_2000a")
        .segment(SegmentSlot::single(hl).required())
        .segment(SegmentSlot::repeating(seg("AAA"), 0, 9))
        .child(LoopSlot::single("loop_2100a").required())
        .child(LoopSlot::repeating("loop_2000b"))
}

fn information_receiver() -> LoopSchema {
    let hl = seg_in(
        "HL",
        SegmentOverride::new("HL")
            .field(FieldOverride::new("hierarchical_parent_id_number").require())
            .field(FieldOverride::new("hierarchical_level_code").literal("21"))
            .field(FieldOverride::new("hierarchical_child_code").literal("1")),
    );

    LoopSchema::new("loop_2000b")
        .segment(SegmentSlot::single(hl).required())
        .child(LoopSlot::single("loop_2100b").required())
        .child(LoopSlot::repeating("loop_2000c"))
}

fn name_loop(name: &'static str, entity_codes: &[&'static str]) -> LoopSchema {
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
        .segment(SegmentSlot::repeating(seg("AAA"), 0, 9))
        .segment(SegmentSlot::repeating(seg("PER"), 0, 3))
        .segment(SegmentSlot::single(seg("PRV")))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn member(
    name: &'static str,
    level_code: &'static str,
    name_loop: &'static str,
    child: Option<&'static str>,
) -> LoopSchema {
    let hl = seg_in(
        "HL",
        SegmentOverride::new("HL")
            .field(FieldOverride::new("hierarchical_parent_id_number").require())
            .field(FieldOverride::new("hierarchical_level_code").literal(level_code)),
    );

    let mut schema = LoopSchema::new(name)
        .segment(SegmentSlot::single(hl).required())
        .segment(SegmentSlot::repeating(seg("TRN"), 0, 3))
        .segment(SegmentSlot::repeating(seg("AAA"), 0, 9))
        .child(LoopSlot::single(name_loop).required());

    if let Some(child_name) = child {
        schema = schema.child(LoopSlot::repeating(child_name));
    }
    schema
}

fn member_name(
    name: &'static str,
    benefit_loop: &'static str,
    entity_code: &'static str,
) -> LoopSchema {
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
        .segment(SegmentSlot::repeating(seg("AAA"), 0, 9))
        .segment(SegmentSlot::single(seg("PRV")))
        .segment(SegmentSlot::single(seg("DMG")))
        .segment(SegmentSlot::single(seg("INS")))
        .segment(SegmentSlot::single(seg("HI")))
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 9))
        .segment(SegmentSlot::single(seg("MPI")))
        .child(LoopSlot::repeating(benefit_loop))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn benefit(
    name: &'static str,
    additional: &'static str,
    entities: &'static str,
) -> LoopSchema {
    LoopSchema::new(name)
        .segment(SegmentSlot::single(seg("EB")).required())
        .segment(SegmentSlot::repeating(seg("HSD"), 0, 9))
        .segment(SegmentSlot::repeating(seg("AAA"), 0, 9))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 20))
        .segment(SegmentSlot::repeating(seg("MSG"), 0, 10))
        .segment(SegmentSlot::single(seg("LS")))
        .segment(SegmentSlot::single(seg("LE")))
        .child(LoopSlot::repeating(additional))
        .child(LoopSlot::repeating(entities))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn additional_information(name: &'static str) -> LoopSchema {
    LoopSchema::new(name).segment(SegmentSlot::single(seg("III")).required())
}

fn related_entity(name: &'static str) -> LoopSchema {
    LoopSchema::new(name)
        .segment(SegmentSlot::single(seg("NM1")).required())
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::repeating(seg("PER"), 0, 3))
        .segment(SegmentSlot::single(seg("PRV")))
}

fn footer() -> LoopSchema {
    LoopSchema::new("footer").segment(SegmentSlot::single(seg("SE")).required())
}

const SOURCE: &[&str] = &["loop_2000a"];
const RECEIVER: &[&str] = &["loop_2000a", "loop_2000b"];
const SUBSCRIBER: &[&str] = &["loop_2000a", "loop_2000b", "loop_2000c"];
const DEPENDENT: &[&str] = &["loop_2000a", "loop_2000b", "loop_2000c", "loop_2000d"];

fn path(base: &[&'static str], tail: &[&'static str]) -> Vec<&'static str> {
    let mut path = base.to_vec();
    path.extend_from_slice(tail);
    path
}

fn rules() -> Vec<MatchRule> {
    let mut rules = vec![
        MatchRule::new("ST", &["header"]),
        MatchRule::new("HL", SOURCE)
            .when("hierarchical_level_code", &["20"])
            .new_instance(),
        MatchRule::new("HL", RECEIVER)
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

    // deepest-first so anchoring resolves shared segment ids
    let nm1_targets = [
        path(DEPENDENT, &["loop_2100d", "loop_2110d", "loop_2120d"]),
        path(SUBSCRIBER, &["loop_2100c", "loop_2110c", "loop_2120c"]),
        path(DEPENDENT, &["loop_2100d"]),
        path(SUBSCRIBER, &["loop_2100c"]),
        path(RECEIVER, &["loop_2100b"]),
        path(SOURCE, &["loop_2100a"]),
    ];
    for target in nm1_targets {
        rules.push(MatchRule::new("NM1", &target));
    }

    let eb_targets = [
        path(DEPENDENT, &["loop_2100d", "loop_2110d"]),
        path(SUBSCRIBER, &["loop_2100c", "loop_2110c"]),
    ];
    for target in eb_targets {
        rules.push(MatchRule::new("EB", &target).new_instance());
    }

    let iii_targets = [
        path(DEPENDENT, &["loop_2100d", "loop_2110d", "loop_2115d"]),
        path(SUBSCRIBER, &["loop_2100c", "loop_2110c", "loop_2115c"]),
    ];
    for target in iii_targets {
        rules.push(MatchRule::new("III", &target).new_instance());
    }

    // LE closes the benefit related entity bracket back onto the 2110 loop
    let le_targets = [
        path(DEPENDENT, &["loop_2100d", "loop_2110d"]),
        path(SUBSCRIBER, &["loop_2100c", "loop_2110c"]),
    ];
    for target in le_targets {
        rules.push(MatchRule::new("LE", &target));
    }

    rules.push(MatchRule::new("SE", &["footer"]));
    rules
}

fn checks() -> Vec<fn(&x12_ir::LoopRecord) -> Vec<String>> {
    vec![
        checks::hl_parent_links,
        super::x279_270::hierarchy_ids_are_chained,
        checks::segment_count_matches,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_assembles() {
        let table = table();
        assert_eq!(table.code, "271");
        assert!(table.loop_schema("loop_2120d").is_some());
        assert_eq!(table.rules_for("EB").count(), 2);
        assert_eq!(table.rules_for("LE").count(), 2);
    }

    #[test]
    fn test_benefit_loop_repeats() {
        let table = table();
        let subscriber_name = table.loop_schema("loop_2100c").unwrap();
        let benefit = subscriber_name.child_slot("loop_2110c").unwrap();
        assert!(benefit.repeating);
    }
}
