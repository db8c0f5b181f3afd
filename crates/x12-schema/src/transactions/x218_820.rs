//! Premium payment (820) table for 005010X218.
//!
//! Flat structure: payment header (BPR/TRN), premium receiver and payer
//! name loops, then repeating organization summary loops with individual
//! remittance detail.

use super::{seg, seg_in};
use crate::checks;
use crate::model::{
    FieldOverride, LoopSchema, LoopSlot, MatchRule, SegmentOverride, SegmentSlot,
    TransactionSchema,
};

pub(crate) fn table() -> TransactionSchema {
    TransactionSchema::build("820", "005010X218", loops(), rules(), checks())
        .expect("820/005010X218 table must assemble")
}

fn loops() -> Vec<LoopSchema> {
    vec![
        root(),
        header(),
        party("loop_1000a", "PE"),
        party("loop_1000b", "PR"),
        organization_summary(),
        remittance_detail(),
        footer(),
    ]
}

fn root() -> LoopSchema {
    LoopSchema::new("transaction")
        .child(LoopSlot::single("header").required())
        .child(LoopSlot::single("loop_1000a").required())
        .child(LoopSlot::single("loop_1000b").required())
        .child(LoopSlot::repeating("loop_2000"))
        .child(LoopSlot::single("footer").required())
}

fn header() -> LoopSchema {
    let st = seg_in(
        "ST",
        SegmentOverride::new("ST")
            .field(FieldOverride::new("transaction_set_identifier_code").literal("820"))
            .field(FieldOverride::new("implementation_convention_reference").literal("005010X218")),
    );

    LoopSchema::new("header")
        .segment(SegmentSlot::single(st).required())
        .segment(SegmentSlot::single(seg("BPR")).required())
        .segment(SegmentSlot::single(seg("TRN")))
        .segment(SegmentSlot::single(seg("CUR")))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 9))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn party(name: &'static str, entity_code: &'static str) -> LoopSchema {
    let n1 = seg_in(
        "N1",
        SegmentOverride::new("N1")
            .field(FieldOverride::new("entity_identifier_code").literal(entity_code)),
    );

    LoopSchema::new(name)
        .segment(SegmentSlot::single(n1).required())
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::repeating(seg("PER"), 0, 3))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn organization_summary() -> LoopSchema {
    LoopSchema::new("loop_2000")
        .segment(SegmentSlot::single(seg("ENT")).required())
        .segment(SegmentSlot::single(seg("NM1")))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .child(LoopSlot::repeating("loop_2300"))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn remittance_detail() -> LoopSchema {
    LoopSchema::new("loop_2300")
        .segment(SegmentSlot::single(seg("RMR")).required())
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 9))
        .segment(SegmentSlot::repeating(seg("ADX"), 0, 9))
        .check(checks::no_duplicate_ref_qualifiers)
        .check(checks::no_duplicate_dtp_qualifiers)
}

fn footer() -> LoopSchema {
    LoopSchema::new("footer").segment(SegmentSlot::single(seg("SE")).required())
}

fn rules() -> Vec<MatchRule> {
    vec![
        MatchRule::new("ST", &["header"]),
        MatchRule::new("N1", &["loop_1000a"]).when("entity_identifier_code", &["PE"]),
        MatchRule::new("N1", &["loop_1000b"]).when("entity_identifier_code", &["PR"]),
        MatchRule::new("ENT", &["loop_2000"]).new_instance(),
        MatchRule::new("RMR", &["loop_2000", "loop_2300"]).new_instance(),
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
        assert_eq!(table.code, "820");
        assert!(table.loop_schema("loop_2300").is_some());
        assert_eq!(table.rules_for("N1").count(), 2);
    }
}
