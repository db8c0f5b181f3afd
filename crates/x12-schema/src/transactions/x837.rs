//! Health care claim (837) tables: professional (005010X222A2),
//! institutional (005010X223A3), and dental (005010X224A2).
//!
//! The three guides share the billing provider / subscriber / patient
//! hierarchy and the claim (2300) and service line (2400) loops; they
//! differ in the service segment (SV1/SV2/SV3), institutional claim codes
//! (CL1), and dental tooth information (TOO).

use super::{seg, seg_in};
use crate::checks;
use crate::model::{
    FieldOverride, HierarchyRole, LoopSchema, LoopSlot, MatchRule, SegmentOverride, SegmentSlot,
    TransactionSchema,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    Professional,
    Institutional,
    Dental,
}

const BILLING: &[&str] = &["loop_2000a"];
const SUBSCRIBER: &[&str] = &["loop_2000a", "loop_2000b"];
const PATIENT: &[&str] = &["loop_2000a", "loop_2000b", "loop_2000c"];

/// NM1 codes for claim-level associated entities (referring, rendering,
/// service facility, supervising providers).
const CLAIM_ENTITY_CODES: &[&str] = &["71", "72", "73", "77", "82", "DK", "DN", "DQ", "P3"];

/// NM1 codes for other-payer entities within the COB loop.
const COB_ENTITY_CODES: &[&str] = &["IL", "PR"];

fn path(base: &[&'static str], tail: &[&'static str]) -> Vec<&'static str> {
    let mut path = base.to_vec();
    path.extend_from_slice(tail);
    path
}

pub(crate) fn professional() -> TransactionSchema {
    build("005010X222A2", Flavor::Professional)
}

pub(crate) fn institutional() -> TransactionSchema {
    build("005010X223A3", Flavor::Institutional)
}

pub(crate) fn dental() -> TransactionSchema {
    build("005010X224A2", Flavor::Dental)
}

fn build(version: &'static str, flavor: Flavor) -> TransactionSchema {
    TransactionSchema::build("837", version, loops(version, flavor), rules(), checks())
        .unwrap_or_else(|error| panic!("837/{version} table must assemble: {error}"))
}

fn loops(version: &'static str, flavor: Flavor) -> Vec<LoopSchema> {
    vec![
        root(),
        header(version),
        submitter(),
        receiver(),
        billing_provider(),
        named_party("loop_2010aa", &["85"], true),
        named_party("loop_2010ab", &["87"], false),
        named_party("loop_2010ac", &["PE"], false),
        subscriber_level(),
        subscriber_name(),
        payer_name(),
        patient_level(),
        patient_name(),
        claim(flavor),
        claim_entity(),
        other_subscriber(),
        other_payer(),
        service_line(flavor),
        drug_identification(),
        line_entity(),
        line_adjudication(),
        footer(),
    ]
}

fn root() -> LoopSchema {
    LoopSchema::new("transaction")
        .child(LoopSlot::single("header").required())
        .child(LoopSlot::single("loop_1000a").required())
        .child(LoopSlot::single("loop_1000b").required())
        .child(LoopSlot::repeating("loop_2000a").required())
        .child(LoopSlot::single("footer").required())
}

fn header(version: &'static str) -> LoopSchema {
    let st = seg_in(
        "ST",
        SegmentOverride::new("ST")
            .field(FieldOverride::new("transaction_set_identifier_code").literal("837"))
            .field(FieldOverride::new("implementation_convention_reference").literal(version)),
    );
    let bht = seg_in(
        "BHT",
        SegmentOverride::new("BHT")
            .field(FieldOverride::new("hierarchical_structure_code").literal("0019"))
            .field(FieldOverride::new("transaction_set_purpose_code").codes(&["00", "18"]))
            .field(FieldOverride::new("submitter_transactional_identifier").require())
            .field(FieldOverride::new("transaction_type_code").codes(&["31", "CH", "RP"])),
    );

    LoopSchema::new("header")
        .segment(SegmentSlot::single(st).required())
        .segment(SegmentSlot::single(bht).required())
}

fn submitter() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1").field(FieldOverride::new("entity_identifier_code").literal("41")),
    );

    LoopSchema::new("loop_1000a")
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::repeating(seg("PER"), 1, 2))
}

fn receiver() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1").field(FieldOverride::new("entity_identifier_code").literal("40")),
    );

    LoopSchema::new("loop_1000b").segment(SegmentSlot::single(nm1).required())
}

fn billing_provider() -> LoopSchema {
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
        .segment(SegmentSlot::single(seg("PRV")))
        .segment(SegmentSlot::single(seg("CUR")))
        .child(LoopSlot::single("loop_2010aa").required())
        .child(LoopSlot::single("loop_2010ab"))
        .child(LoopSlot::single("loop_2010ac"))
        .child(LoopSlot::repeating("loop_2000b").required())
}

fn named_party(name: &'static str, entity_codes: &[&'static str], contacts: bool) -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1")
            .field(FieldOverride::new("entity_identifier_code").codes(entity_codes)),
    );

    let mut schema = LoopSchema::new(name)
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .check(checks::no_duplicate_ref_qualifiers);
    if contacts {
        schema = schema.segment(SegmentSlot::repeating(seg("PER"), 0, 2));
    }
    schema
}

fn subscriber_level() -> LoopSchema {
    let hl = seg_in(
        "HL",
        SegmentOverride::new("HL")
            .field(FieldOverride::new("hierarchical_parent_id_number").require())
            .field(FieldOverride::new("hierarchical_level_code").literal("22")),
    );

    LoopSchema::new("loop_2000b")
        .segment(SegmentSlot::single(hl).required())
        .segment(SegmentSlot::single(seg("SBR")).required())
        .segment(SegmentSlot::single(seg("PAT")))
        .child(LoopSlot::single("loop_2010ba").required())
        .child(LoopSlot::single("loop_2010bb").required())
        .child(LoopSlot::repeating("loop_2000c"))
        .child(LoopSlot::repeating("loop_2300"))
}

fn subscriber_name() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1").field(FieldOverride::new("entity_identifier_code").literal("IL")),
    );

    LoopSchema::new("loop_2010ba")
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::single(seg("DMG")))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .segment(SegmentSlot::single(seg("PER")))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn payer_name() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1").field(FieldOverride::new("entity_identifier_code").literal("PR")),
    );

    LoopSchema::new("loop_2010bb")
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn patient_level() -> LoopSchema {
    let hl = seg_in(
        "HL",
        SegmentOverride::new("HL")
            .field(FieldOverride::new("hierarchical_parent_id_number").require())
            .field(FieldOverride::new("hierarchical_level_code").literal("23")),
    );

    LoopSchema::new("loop_2000c")
        .segment(SegmentSlot::single(hl).required())
        .segment(SegmentSlot::single(seg("PAT")).required())
        .child(LoopSlot::single("loop_2010ca").required())
        .child(LoopSlot::repeating("loop_2300"))
}

fn patient_name() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1").field(FieldOverride::new("entity_identifier_code").literal("QC")),
    );

    LoopSchema::new("loop_2010ca")
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::single(seg("DMG")))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn claim(flavor: Flavor) -> LoopSchema {
    let mut schema = LoopSchema::new("loop_2300")
        .segment(SegmentSlot::single(seg("CLM")).required())
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 17))
        .segment(SegmentSlot::repeating(seg("PWK"), 0, 10));

    if flavor == Flavor::Institutional {
        schema = schema.segment(SegmentSlot::single(seg("CL1")));
    }

    schema
        .segment(SegmentSlot::single(seg("CN1")))
        .segment(SegmentSlot::repeating(seg("AMT"), 0, 3))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 14))
        .segment(SegmentSlot::repeating(seg("K3"), 0, 10))
        .segment(SegmentSlot::single(seg("NTE")))
        .segment(SegmentSlot::repeating(seg("CRC"), 0, 8))
        .segment(SegmentSlot::repeating(seg("HI"), 0, 4))
        .child(LoopSlot::repeating("loop_2310"))
        .child(LoopSlot::repeating("loop_2320"))
        .child(LoopSlot::repeating("loop_2400").required())
        .check(checks::no_duplicate_ref_qualifiers)
        .check(checks::no_duplicate_amt_qualifiers)
        .check(checks::no_duplicate_dtp_qualifiers)
}

fn claim_entity() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1")
            .field(FieldOverride::new("entity_identifier_code").codes(CLAIM_ENTITY_CODES)),
    );

    LoopSchema::new("loop_2310")
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::single(seg("PRV")))
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn other_subscriber() -> LoopSchema {
    LoopSchema::new("loop_2320")
        .segment(SegmentSlot::single(seg("SBR")).required())
        .segment(SegmentSlot::repeating(seg("CAS"), 0, 5))
        .segment(SegmentSlot::repeating(seg("AMT"), 0, 3))
        .segment(SegmentSlot::single(seg("OI")))
        .segment(SegmentSlot::single(seg("MOA")))
        .child(LoopSlot::repeating("loop_2330"))
        .check(checks::no_duplicate_amt_qualifiers)
}

fn other_payer() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1")
            .field(FieldOverride::new("entity_identifier_code").codes(COB_ENTITY_CODES)),
    );

    LoopSchema::new("loop_2330")
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 9))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn service_line(flavor: Flavor) -> LoopSchema {
    let mut schema = LoopSchema::new("loop_2400").segment(SegmentSlot::single(seg("LX")).required());

    schema = match flavor {
        Flavor::Professional => schema.segment(SegmentSlot::single(seg("SV1")).required()),
        Flavor::Institutional => schema.segment(SegmentSlot::single(seg("SV2")).required()),
        Flavor::Dental => schema
            .segment(SegmentSlot::single(seg("SV3")).required())
            .segment(SegmentSlot::repeating(seg("TOO"), 0, 32)),
    };

    schema
        .segment(SegmentSlot::repeating(seg("PWK"), 0, 10))
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 15))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 15))
        .segment(SegmentSlot::repeating(seg("AMT"), 0, 3))
        .segment(SegmentSlot::repeating(seg("K3"), 0, 10))
        .segment(SegmentSlot::single(seg("NTE")))
        .child(LoopSlot::single("loop_2410"))
        .child(LoopSlot::repeating("loop_2420"))
        .child(LoopSlot::repeating("loop_2430"))
        .check(checks::no_duplicate_ref_qualifiers)
        .check(checks::no_duplicate_amt_qualifiers)
}

fn drug_identification() -> LoopSchema {
    LoopSchema::new("loop_2410")
        .segment(SegmentSlot::single(seg("LIN")).required())
        .segment(SegmentSlot::single(seg("REF")))
}

fn line_entity() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1")
            .field(FieldOverride::new("entity_identifier_code").codes(CLAIM_ENTITY_CODES)),
    );

    LoopSchema::new("loop_2420")
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::single(seg("PRV")))
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::repeating(seg("REF"), 0, 20))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn line_adjudication() -> LoopSchema {
    LoopSchema::new("loop_2430")
        .segment(SegmentSlot::single(seg("SVD")).required())
        .segment(SegmentSlot::repeating(seg("CAS"), 0, 5))
        .segment(SegmentSlot::repeating(seg("DTP"), 0, 9))
        .segment(SegmentSlot::single(seg("AMT")))
}

fn footer() -> LoopSchema {
    LoopSchema::new("footer").segment(SegmentSlot::single(seg("SE")).required())
}

fn rules() -> Vec<MatchRule> {
    let mut rules = vec![
        MatchRule::new("ST", &["header"]),
        MatchRule::new("HL", BILLING)
            .when("hierarchical_level_code", &["20"])
            .new_instance(),
        MatchRule::new("HL", SUBSCRIBER)
            .when("hierarchical_level_code", &["22"])
            .new_instance()
            .hierarchy(HierarchyRole::Subscriber),
        MatchRule::new("HL", PATIENT)
            .when("hierarchical_level_code", &["23"])
            .new_instance()
            .hierarchy(HierarchyRole::Patient),
    ];

    // claim structure exists under both the subscriber and patient levels;
    // deepest-first plus anchoring resolves the shared segment ids
    for base in [PATIENT, SUBSCRIBER] {
        rules.push(
            MatchRule::new("NM1", &path(base, &["loop_2300", "loop_2400", "loop_2420"]))
                .when("entity_identifier_code", CLAIM_ENTITY_CODES)
                .new_instance(),
        );
        rules.push(
            MatchRule::new("NM1", &path(base, &["loop_2300", "loop_2320", "loop_2330"]))
                .when("entity_identifier_code", COB_ENTITY_CODES)
                .new_instance(),
        );
        rules.push(
            MatchRule::new("NM1", &path(base, &["loop_2300", "loop_2310"]))
                .when("entity_identifier_code", CLAIM_ENTITY_CODES)
                .new_instance(),
        );
        rules.push(MatchRule::new("CLM", &path(base, &["loop_2300"])).new_instance());
        rules.push(
            MatchRule::new("SBR", &path(base, &["loop_2300", "loop_2320"])).new_instance(),
        );
        rules.push(MatchRule::new("LX", &path(base, &["loop_2300", "loop_2400"])).new_instance());
        rules.push(MatchRule::new(
            "LIN",
            &path(base, &["loop_2300", "loop_2400", "loop_2410"]),
        ));
        rules.push(
            MatchRule::new("SVD", &path(base, &["loop_2300", "loop_2400", "loop_2430"]))
                .new_instance(),
        );
    }

    rules.push(MatchRule::new("NM1", &path(PATIENT, &["loop_2010ca"])).when("entity_identifier_code", &["QC"]));
    rules.push(MatchRule::new("NM1", &path(SUBSCRIBER, &["loop_2010ba"])).when("entity_identifier_code", &["IL"]));
    rules.push(MatchRule::new("NM1", &path(SUBSCRIBER, &["loop_2010bb"])).when("entity_identifier_code", &["PR"]));
    rules.push(MatchRule::new("NM1", &path(BILLING, &["loop_2010aa"])).when("entity_identifier_code", &["85"]));
    rules.push(MatchRule::new("NM1", &path(BILLING, &["loop_2010ab"])).when("entity_identifier_code", &["87"]));
    rules.push(MatchRule::new("NM1", &path(BILLING, &["loop_2010ac"])).when("entity_identifier_code", &["PE"]));
    rules.push(MatchRule::new("NM1", &["loop_1000a"]).when("entity_identifier_code", &["41"]));
    rules.push(MatchRule::new("NM1", &["loop_1000b"]).when("entity_identifier_code", &["40"]));
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
    fn test_three_flavors_assemble() {
        assert_eq!(professional().version, "005010X222A2");
        assert_eq!(institutional().version, "005010X223A3");
        assert_eq!(dental().version, "005010X224A2");
    }

    #[test]
    fn test_service_segment_per_flavor() {
        let line = professional();
        let line = line.loop_schema("loop_2400").unwrap();
        assert!(line.slot("sv1_segment").is_some());
        assert!(line.slot("sv2_segment").is_none());

        let institutional = institutional();
        let line = institutional.loop_schema("loop_2400").unwrap();
        assert!(line.slot("sv2_segment").is_some());

        let dental = dental();
        let line = dental.loop_schema("loop_2400").unwrap();
        assert!(line.slot("sv3_segment").is_some());
        assert!(line.slot("too_segment").is_some());
    }

    #[test]
    fn test_institutional_claim_carries_cl1() {
        let table = institutional();
        let claim = table.loop_schema("loop_2300").unwrap();
        assert!(claim.slot("cl1_segment").is_some());

        let professional = professional();
        let claim = professional.loop_schema("loop_2300").unwrap();
        assert!(claim.slot("cl1_segment").is_none());
    }
}
