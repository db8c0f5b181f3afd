//! Claim payment/advice (835) table for 005010X221A1.
//!
//! Non-hierarchical: payment header, payer and payee identification, then
//! repeating claim payment line groups (LX) holding claim payments (CLP)
//! and service payments (SVC). Provider-level adjustments (PLB) land in the
//! footer alongside SE.

use super::{seg, seg_in};
use crate::checks;
use crate::model::{
    FieldOverride, LoopSchema, LoopSlot, MatchRule, SegmentOverride, SegmentSlot,
    TransactionSchema,
};

pub(crate) fn table() -> TransactionSchema {
    TransactionSchema::build("835", "005010X221A1", loops(), rules(), checks())
        .expect("835/005010X221A1 table must assemble")
}

fn loops() -> Vec<LoopSchema> {
    vec![
        root(),
        header(),
        payer_identification(),
        payee_identification(),
        claim_payment_line(),
        claim_payment(),
        service_payment(),
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
            .field(FieldOverride::new("transaction_set_identifier_code").literal("835"))
            .field(FieldOverride::new("implementation_convention_reference").literal("005010X221A1")),
    );
    let trn = seg_in(
        "TRN",
        SegmentOverride::new("TRN")
            .field(FieldOverride::new("trace_type_code").literal("1"))
            .field(FieldOverride::new("originating_company_identifier").require()),
    );

    LoopSchema::new("header")
        .segment(SegmentSlot::single(st).required())
        .segment(SegmentSlot::single(seg("BPR")).required())
        .segment(SegmentSlot::single(trn).required())
        .segment(SegmentSlot::single(seg("CUR")))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 2))
        .segment(SegmentSlot::repeating(seg("DTM"), 0, 1))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn payer_identification() -> LoopSchema {
    let n1 = seg_in(
        "N1",
        SegmentOverride::new("N1").field(FieldOverride::new("entity_identifier_code").literal("PR")),
    );

    LoopSchema::new("loop_1000a")
        .segment(SegmentSlot::single(n1).required())
        .segment(SegmentSlot::single(seg("N3")).required())
        .segment(SegmentSlot::single(seg("N4")).required())
        .segment(SegmentSlot::repeating(seg("REF"), 0, 4))
        .segment(SegmentSlot::repeating(seg("PER"), 0, 3))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn payee_identification() -> LoopSchema {
    let n1 = seg_in(
        "N1",
        SegmentOverride::new("N1").field(FieldOverride::new("entity_identifier_code").literal("PE")),
    );

    LoopSchema::new("loop_1000b")
        .segment(SegmentSlot::single(n1).required())
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::single(seg("RDM")))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn claim_payment_line() -> LoopSchema {
    LoopSchema::new("loop_2000")
        .segment(SegmentSlot::single(seg("LX")).required())
        .segment(SegmentSlot::single(seg("TS3")))
        .segment(SegmentSlot::single(seg("TS2")))
        .child(LoopSlot::repeating("loop_2100").required())
}

fn claim_payment() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1").field(
            FieldOverride::new("entity_identifier_code")
                .codes(&["74", "82", "GB", "IL", "PR", "QC", "TT"]),
        ),
    );

    LoopSchema::new("loop_2100")
        .segment(SegmentSlot::single(seg("CLP")).required())
        .segment(SegmentSlot::repeating(seg("CAS"), 0, 99))
        .segment(SegmentSlot::repeating(nm1, 0, 7))
        .segment(SegmentSlot::single(seg("MIA")))
        .segment(SegmentSlot::single(seg("MOA")))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::repeating(seg("DTM"), 0, 4))
        .segment(SegmentSlot::single(seg("PER")))
        .segment(SegmentSlot::repeating(seg("AMT"), 0, 13))
        .segment(SegmentSlot::repeating(seg("QTY"), 0, 14))
        .child(LoopSlot::repeating("loop_2110"))
        .check(checks::no_duplicate_ref_qualifiers)
        .check(checks::no_duplicate_amt_qualifiers)
}

fn service_payment() -> LoopSchema {
    LoopSchema::new("loop_2110")
        .segment(SegmentSlot::single(seg("SVC")).required())
        .segment(SegmentSlot::repeating(seg("DTM"), 0, 2))
        .segment(SegmentSlot::repeating(seg("CAS"), 0, 99))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::repeating(seg("AMT"), 0, 9))
        .segment(SegmentSlot::repeating(seg("QTY"), 0, 6))
        .segment(SegmentSlot::repeating(seg("LQ"), 0, 99))
        .check(checks::no_duplicate_ref_qualifiers)
        .check(checks::no_duplicate_amt_qualifiers)
}

fn footer() -> LoopSchema {
    LoopSchema::new("footer")
        .segment(SegmentSlot::repeating(seg("PLB"), 0, 99))
        .segment(SegmentSlot::single(seg("SE")).required())
}

fn rules() -> Vec<MatchRule> {
    vec![
        MatchRule::new("ST", &["header"]),
        MatchRule::new("N1", &["loop_1000a"]).when("entity_identifier_code", &["PR"]),
        MatchRule::new("N1", &["loop_1000b"]).when("entity_identifier_code", &["PE"]),
        MatchRule::new("LX", &["loop_2000"]).new_instance(),
        MatchRule::new("CLP", &["loop_2000", "loop_2100"]).new_instance(),
        MatchRule::new("SVC", &["loop_2000", "loop_2100", "loop_2110"]).new_instance(),
        MatchRule::new("PLB", &["footer"]),
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
        assert_eq!(table.code, "835");
        assert!(table.loop_schema("loop_2110").is_some());
    }

    #[test]
    fn test_plb_lands_in_footer() {
        let table = table();
        let rule = table.rules_for("PLB").next().unwrap();
        assert_eq!(rule.target, vec!["footer"]);
        let footer = table.loop_schema("footer").unwrap();
        assert!(footer.slot("plb_segment").unwrap().1.is_repeating());
    }
}
