//! Benefit enrollment and maintenance (834) table for 005010X220A1.
//!
//! Repeating member detail loops (INS) carry name, coverage, disability,
//! coordination-of-benefits, and LS/LE-bracketed reporting category loops.

use super::{seg, seg_in};
use crate::checks;
use crate::model::{
    FieldOverride, LoopSchema, LoopSlot, MatchRule, SegmentOverride, SegmentSlot,
    TransactionSchema,
};

/// NM1 codes grouped into the member associated party loop (employer,
/// school, custodial parent, responsible person).
const ASSOCIATED_PARTY_CODES: &[&str] = &["36", "M8", "S1", "6Y", "9K", "E1", "EI", "EXS", "GB", "GD", "J6", "LR", "QD"];

const MEMBER: &[&str] = &["loop_2000"];

fn path(tail: &[&'static str]) -> Vec<&'static str> {
    let mut path = MEMBER.to_vec();
    path.extend_from_slice(tail);
    path
}

pub(crate) fn table() -> TransactionSchema {
    TransactionSchema::build("834", "005010X220A1", loops(), rules(), checks())
        .expect("834/005010X220A1 table must assemble")
}

fn loops() -> Vec<LoopSchema> {
    vec![
        root(),
        header(),
        sponsor(),
        payer(),
        broker(),
        member_detail(),
        member_name(),
        incorrect_member_name(),
        member_mailing_address(),
        associated_party(),
        drop_off_location(),
        disability(),
        coverage(),
        provider_information(),
        coordination_of_benefits(),
        cob_related_entity(),
        reporting_categories(),
        reporting_category(),
        footer(),
    ]
}

fn root() -> LoopSchema {
    LoopSchema::new("transaction")
        .child(LoopSlot::single("header").required())
        .child(LoopSlot::single("loop_1000a").required())
        .child(LoopSlot::single("loop_1000b").required())
        .child(LoopSlot::repeating("loop_1000c"))
        .child(LoopSlot::repeating("loop_2000").required())
        .child(LoopSlot::single("footer").required())
}

fn header() -> LoopSchema {
    let st = seg_in(
        "ST",
        SegmentOverride::new("ST")
            .field(FieldOverride::new("transaction_set_identifier_code").literal("834"))
            .field(FieldOverride::new("implementation_convention_reference").literal("005010X220A1")),
    );

    LoopSchema::new("header")
        .segment(SegmentSlot::single(st).required())
        .segment(SegmentSlot::single(seg("BGN")).required())
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 9))
        .segment(SegmentSlot::repeating(seg("QTY"), 0, 3))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn sponsor() -> LoopSchema {
    let n1 = seg_in(
        "N1",
        SegmentOverride::new("N1").field(FieldOverride::new("entity_identifier_code").literal("P5")),
    );
    LoopSchema::new("loop_1000a").segment(SegmentSlot::single(n1).required())
}

fn payer() -> LoopSchema {
    let n1 = seg_in(
        "N1",
        SegmentOverride::new("N1").field(FieldOverride::new("entity_identifier_code").literal("IN")),
    );
    LoopSchema::new("loop_1000b").segment(SegmentSlot::single(n1).required())
}

fn broker() -> LoopSchema {
    let n1 = seg_in(
        "N1",
        SegmentOverride::new("N1")
            .field(FieldOverride::new("entity_identifier_code").codes(&["BO", "TV"])),
    );
    LoopSchema::new("loop_1000c")
        .segment(SegmentSlot::single(n1).required())
        .segment(SegmentSlot::single(seg("ACT")))
}

fn member_detail() -> LoopSchema {
    LoopSchema::new("loop_2000")
        .segment(SegmentSlot::single(seg("INS")).required())
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9).required())
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 9))
        .segment(SegmentSlot::single(seg("LS")))
        .segment(SegmentSlot::single(seg("LE")))
        .child(LoopSlot::single("loop_2100a").required())
        .child(LoopSlot::single("loop_2100b"))
        .child(LoopSlot::single("loop_2100c"))
        .child(LoopSlot::repeating("loop_2100d"))
        .child(LoopSlot::single("loop_2100h"))
        .child(LoopSlot::repeating("loop_2200"))
        .child(LoopSlot::repeating("loop_2300"))
        .child(LoopSlot::repeating("loop_2700"))
        .check(checks::no_duplicate_ref_qualifiers)
        .check(checks::no_duplicate_dtp_qualifiers)
}

fn member_name() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1")
            .field(FieldOverride::new("entity_identifier_code").codes(&["74", "IL"])),
    );

    LoopSchema::new("loop_2100a")
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::single(seg("PER")))
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::single(seg("DMG")))
        .segment(SegmentSlot::single(seg("HLH")))
}

fn incorrect_member_name() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1").field(FieldOverride::new("entity_identifier_code").literal("70")),
    );

    LoopSchema::new("loop_2100b")
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::single(seg("DMG")))
}

fn member_mailing_address() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1").field(FieldOverride::new("entity_identifier_code").literal("31")),
    );

    LoopSchema::new("loop_2100c")
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
}

fn associated_party() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1")
            .field(FieldOverride::new("entity_identifier_code").codes(ASSOCIATED_PARTY_CODES)),
    );

    LoopSchema::new("loop_2100d")
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::single(seg("PER")))
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
}

fn drop_off_location() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1").field(FieldOverride::new("entity_identifier_code").literal("45")),
    );

    LoopSchema::new("loop_2100h")
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
}

fn disability() -> LoopSchema {
    LoopSchema::new("loop_2200")
        .segment(SegmentSlot::single(seg("DSB")).required())
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 2))
        .check(checks::no_duplicate_dtp_qualifiers)
}

fn coverage() -> LoopSchema {
    LoopSchema::new("loop_2300")
        .segment(SegmentSlot::single(seg("HD")).required())
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 9))
        .segment(SegmentSlot::repeating(seg("AMT"), 0, 9))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::repeating(seg("IDC"), 0, 3))
        .child(LoopSlot::repeating("loop_2310"))
        .child(LoopSlot::repeating("loop_2320"))
        .check(checks::no_duplicate_ref_qualifiers)
        .check(checks::no_duplicate_amt_qualifiers)
        .check(checks::no_duplicate_dtp_qualifiers)
}

fn provider_information() -> LoopSchema {
    LoopSchema::new("loop_2310")
        .segment(SegmentSlot::single(seg("LX")).required())
        .segment(SegmentSlot::single(seg("NM1")))
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::repeating(seg("PLA"), 0, 2))
}

fn coordination_of_benefits() -> LoopSchema {
    LoopSchema::new("loop_2320")
        .segment(SegmentSlot::single(seg("COB")).required())
        .segment(SegmentSlot::repeating(seg("REF"), 0, 4))
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 2))
        .child(LoopSlot::repeating("loop_2330"))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn cob_related_entity() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1")
            .field(FieldOverride::new("entity_identifier_code").codes(&["36", "GW", "IN"])),
    );

    LoopSchema::new("loop_2330")
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::single(seg("PER")))
}

fn reporting_categories() -> LoopSchema {
    LoopSchema::new("loop_2700")
        .segment(SegmentSlot::single(seg("LX")).required())
        .child(LoopSlot::single("loop_2750"))
}

fn reporting_category() -> LoopSchema {
    let n1 = seg_in(
        "N1",
        SegmentOverride::new("N1").field(FieldOverride::new("entity_identifier_code").literal("75")),
    );

    LoopSchema::new("loop_2750")
        .segment(SegmentSlot::single(n1).required())
        .segment(SegmentSlot::single(seg("REF")))
        .segment(SegmentSlot::single(seg("DTP")))
}

fn footer() -> LoopSchema {
    LoopSchema::new("footer").segment(SegmentSlot::single(seg("SE")).required())
}

fn rules() -> Vec<MatchRule> {
    vec![
        MatchRule::new("ST", &["header"]),
        MatchRule::new("N1", &["loop_1000a"]).when("entity_identifier_code", &["P5"]),
        MatchRule::new("N1", &["loop_1000b"]).when("entity_identifier_code", &["IN"]),
        MatchRule::new("N1", &["loop_1000c"])
            .when("entity_identifier_code", &["BO", "TV"])
            .new_instance(),
        MatchRule::new("INS", MEMBER).new_instance(),
        // member name loops, ordered deepest-first for anchoring
        MatchRule::new("NM1", &path(&["loop_2300", "loop_2320", "loop_2330"]))
            .when("entity_identifier_code", &["36", "GW", "IN"])
            .new_instance(),
        MatchRule::new("NM1", &path(&["loop_2100a"]))
            .when("entity_identifier_code", &["74", "IL"]),
        MatchRule::new("NM1", &path(&["loop_2100b"])).when("entity_identifier_code", &["70"]),
        MatchRule::new("NM1", &path(&["loop_2100c"])).when("entity_identifier_code", &["31"]),
        MatchRule::new("NM1", &path(&["loop_2100d"]))
            .when("entity_identifier_code", ASSOCIATED_PARTY_CODES)
            .new_instance(),
        MatchRule::new("NM1", &path(&["loop_2100h"])).when("entity_identifier_code", &["45"]),
        MatchRule::new("DSB", &path(&["loop_2200"])).new_instance(),
        MatchRule::new("HD", &path(&["loop_2300"])).new_instance(),
        MatchRule::new("COB", &path(&["loop_2300", "loop_2320"])).new_instance(),
        // LX inside a coverage loop is provider information; after the LS
        // bracket it opens a reporting categories loop
        MatchRule::new("LX", &path(&["loop_2300", "loop_2310"])).new_instance(),
        MatchRule::new("LX", &path(&["loop_2700"])).new_instance(),
        MatchRule::new("N1", &path(&["loop_2700", "loop_2750"]))
            .when("entity_identifier_code", &["75"]),
        MatchRule::new("LS", MEMBER),
        MatchRule::new("LE", MEMBER),
        MatchRule::new("SE", &["footer"]),
    ]
}

fn checks() -> Vec<fn(&x12_ir::LoopRecord) -> Vec<String>> {
    vec![checks::segment_count_matches]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_assembles() {
        let table = table();
        assert_eq!(table.code, "834");
        assert!(table.loop_schema("loop_2750").is_some());
        assert_eq!(table.rules_for("LX").count(), 2);
    }

    #[test]
    fn test_member_detail_requires_ref() {
        let table = table();
        let member = table.loop_schema("loop_2000").unwrap();
        let (_, ref_slot) = member.slot("ref_segment").unwrap();
        assert!(ref_slot.required);
    }
}
