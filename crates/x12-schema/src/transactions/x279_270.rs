//! Eligibility inquiry (270) table for 005010X279A1.
//!
//! Loop hierarchy:
//!
//! - header
//! - loop_2000a (information source)
//!   - loop_2100a (information source name)
//!   - loop_2000b (information receiver)
//!     - loop_2100b (information receiver name)
//!     - loop_2000c (subscriber)
//!       - loop_2100c (subscriber name)
//!         - loop_2110c (subscriber eligibility)
//!       - loop_2000d (dependent)
//!         - loop_2100d (dependent name)
//!           - loop_2110d (dependent eligibility)
//! - footer

use super::{seg, seg_in};
use crate::checks;
use crate::model::{
    FieldOverride, HierarchyRole, LoopSchema, LoopSlot, MatchRule, SegmentOverride, SegmentSlot,
    TransactionSchema,
};
use crate::segments::PLACE_OF_SERVICE_CODES;
use x12_ir::LoopRecord;

/// REF qualifiers for information receiver identification.
const RECEIVER_REF_CODES: &[&str] = &[
    "0B", "1C", "1D", "1J", "4A", "CT", "EL", "EO", "HPI", "JD", "N5", "N7", "Q4", "SY", "TJ",
];

/// REF qualifiers for subscriber and dependent identification.
const MEMBER_REF_CODES: &[&str] = &[
    "18", "1L", "1W", "3H", "6P", "CT", "EA", "EJ", "F6", "GH", "HJ", "IG", "N6", "NQ", "SY", "Y4",
];

/// PRV provider codes.
const PROVIDER_CODES: &[&str] = &[
    "AD", "AT", "BI", "CO", "CV", "H", "HH", "LA", "OT", "P1", "P2", "PC", "PE", "R", "RF", "SB",
    "SK", "SU",
];

/// PRV reference qualifiers for member-associated providers.
const MEMBER_PRV_REF_CODES: &[&str] = &["9K", "D3", "EI", "HPI", "PXC", "SY", "TJ"];

pub(crate) fn table() -> TransactionSchema {
    TransactionSchema::build("270", "005010X279A1", loops(), rules(), checks())
        .expect("270/005010X279A1 table must assemble")
}

fn loops() -> Vec<LoopSchema> {
    vec![
        root(),
        header(),
        information_source(),
        information_source_name(),
        information_receiver(),
        information_receiver_name(),
        subscriber(),
        member_name("loop_2100c", "loop_2110c", false),
        eligibility("loop_2110c"),
        dependent(),
        member_name("loop_2100d", "loop_2110d", true),
        eligibility("loop_2110d"),
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
            .field(FieldOverride::new("transaction_set_identifier_code").literal("270"))
            .field(FieldOverride::new("implementation_convention_reference").literal("005010X279A1")),
    );
    let bht = seg_in(
        "BHT",
        SegmentOverride::new("BHT")
            .field(FieldOverride::new("hierarchical_structure_code").literal("0022"))
            .field(FieldOverride::new("transaction_set_purpose_code").codes(&["01", "13"]))
            .field(FieldOverride::new("submitter_transactional_identifier").require())
            .field(FieldOverride::new("transaction_type_code").codes(&["RT"])),
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
        .child(LoopSlot::single("loop_2100a").required())
        .child(LoopSlot::repeating("loop_2000b").required())
}

fn information_source_name() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1")
            .field(FieldOverride::new("entity_identifier_code").codes(&["2B", "36", "GP", "P5", "PR"]))
            .field(
                FieldOverride::new("identification_code_qualifier")
                    .require()
                    .codes(&["24", "46", "FI", "NI", "PI", "XV", "XX"]),
            )
            .field(FieldOverride::new("identification_code").require()),
    );

    LoopSchema::new("loop_2100a").segment(SegmentSlot::single(nm1).required())
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
        .child(LoopSlot::repeating("loop_2000c").required())
}

fn information_receiver_name() -> LoopSchema {
    let nm1 = seg_in(
        "NM1",
        SegmentOverride::new("NM1")
            .field(
                FieldOverride::new("entity_identifier_code")
                    .codes(&["1P", "2B", "36", "80", "FA", "GP", "P5", "PR"]),
            )
            .field(
                FieldOverride::new("identification_code_qualifier")
                    .require()
                    .codes(&["24", "34", "FI", "PI", "PP", "SV", "XV", "XX"]),
            )
            .field(FieldOverride::new("identification_code").require()),
    );
    let ref_ = seg_in(
        "REF",
        SegmentOverride::new("REF")
            .field(FieldOverride::new("reference_identification_qualifier").codes(RECEIVER_REF_CODES)),
    );
    let prv = seg_in(
        "PRV",
        SegmentOverride::new("PRV")
            .field(FieldOverride::new("provider_code").codes(PROVIDER_CODES)),
    );

    LoopSchema::new("loop_2100b")
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::repeating(ref_, 0, 9))
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::single(prv))
        .check(checks::no_duplicate_ref_qualifiers)
}

fn subscriber() -> LoopSchema {
    let hl = seg_in(
        "HL",
        SegmentOverride::new("HL")
            .field(FieldOverride::new("hierarchical_parent_id_number").require())
            .field(FieldOverride::new("hierarchical_level_code").literal("22")),
    );

    LoopSchema::new("loop_2000c")
        .segment(SegmentSlot::single(hl).required())
        .segment(SegmentSlot::repeating(seg("TRN"), 0, 2))
        .child(LoopSlot::single("loop_2100c").required())
        .child(LoopSlot::repeating("loop_2000d"))
}

fn dependent() -> LoopSchema {
    let hl = seg_in(
        "HL",
        SegmentOverride::new("HL")
            .field(FieldOverride::new("hierarchical_parent_id_number").require())
            .field(FieldOverride::new("hierarchical_level_code").literal("23")),
    );

    LoopSchema::new("loop_2000d")
        .segment(SegmentSlot::single(hl).required())
        .segment(SegmentSlot::repeating(seg("TRN"), 0, 2))
        .child(LoopSlot::single("loop_2100d").required())
}

fn member_name(name: &'static str, eligibility_loop: &'static str, dependent: bool) -> LoopSchema {
    let nm1 = if dependent {
        seg_in(
            "NM1",
            SegmentOverride::new("NM1")
                .field(FieldOverride::new("entity_identifier_code").literal("03"))
                .field(FieldOverride::new("name_first").require()),
        )
    } else {
        seg_in(
            "NM1",
            SegmentOverride::new("NM1")
                .field(FieldOverride::new("entity_identifier_code").literal("IL"))
                .field(FieldOverride::new("name_last_or_organization_name").optional()),
        )
    };

    let ref_ = seg_in(
        "REF",
        SegmentOverride::new("REF")
            .field(FieldOverride::new("reference_identification_qualifier").codes(MEMBER_REF_CODES)),
    );
    let prv = seg_in(
        "PRV",
        SegmentOverride::new("PRV").field(
            FieldOverride::new("reference_identification_qualifier").codes(MEMBER_PRV_REF_CODES),
        ),
    );
    let ins = if dependent {
        seg_in(
            "INS",
            SegmentOverride::new("INS")
                .field(FieldOverride::new("member_indicator").literal("N"))
                .field(FieldOverride::new("individual_relationship_code").codes(&["01", "19", "34"]))
                .field(FieldOverride::new("maintenance_type_code").optional()),
        )
    } else {
        seg_in(
            "INS",
            SegmentOverride::new("INS")
                .field(FieldOverride::new("member_indicator").literal("Y"))
                .field(FieldOverride::new("individual_relationship_code").literal("18"))
                .field(FieldOverride::new("maintenance_type_code").optional()),
        )
    };
    let dtp = seg_in(
        "DTP",
        SegmentOverride::new("DTP")
            .field(FieldOverride::new("date_time_qualifier").codes(&["102", "291"])),
    );

    LoopSchema::new(name)
        .segment(SegmentSlot::single(nm1).required())
        .segment(SegmentSlot::repeating(ref_, 0, 9))
        .segment(SegmentSlot::single(seg("N3")))
        .segment(SegmentSlot::single(seg("N4")))
        .segment(SegmentSlot::single(prv))
        .segment(SegmentSlot::single(seg("DMG")))
        .segment(SegmentSlot::single(ins))
        .segment(SegmentSlot::single(seg("HI")))
        .segment(SegmentSlot::repeating(dtp, 0, 2))
        .child(LoopSlot::single(eligibility_loop))
        .check(checks::no_duplicate_ref_qualifiers)
        .check(checks::no_duplicate_dtp_qualifiers)
}

fn eligibility(name: &'static str) -> LoopSchema {
    let amt = seg_in(
        "AMT",
        SegmentOverride::new("AMT")
            .field(FieldOverride::new("amount_qualifier_code").codes(&["R", "PB"])),
    );
    let iii = seg_in(
        "III",
        SegmentOverride::new("III")
            .field(FieldOverride::new("code_list_qualifier_code").literal("ZZ"))
            .field(FieldOverride::new("industry_code").codes(PLACE_OF_SERVICE_CODES)),
    );
    let ref_ = seg_in(
        "REF",
        SegmentOverride::new("REF")
            .field(FieldOverride::new("reference_identification_qualifier").codes(&["9F", "G1"])),
    );
    let dtp = seg_in(
        "DTP",
        SegmentOverride::new("DTP")
            .field(FieldOverride::new("date_time_qualifier").literal("291")),
    );

    LoopSchema::new(name)
        .segment(SegmentSlot::single(seg("EQ")))
        .segment(SegmentSlot::repeating(amt, 0, 2))
        .segment(SegmentSlot::single(iii))
        .segment(SegmentSlot::single(ref_))
        .segment(SegmentSlot::single(dtp))
        .check(checks::no_duplicate_amt_qualifiers)
}

fn footer() -> LoopSchema {
    LoopSchema::new("footer").segment(SegmentSlot::single(seg("SE")).required())
}

fn rules() -> Vec<MatchRule> {
    vec![
        MatchRule::new("ST", &["header"]),
        MatchRule::new("HL", &["loop_2000a"])
            .when("hierarchical_level_code", &["20"])
            .new_instance(),
        MatchRule::new("HL", &["loop_2000a", "loop_2000b"])
            .when("hierarchical_level_code", &["21"])
            .new_instance(),
        MatchRule::new("HL", &["loop_2000a", "loop_2000b", "loop_2000c"])
            .when("hierarchical_level_code", &["22"])
            .new_instance()
            .hierarchy(HierarchyRole::Subscriber),
        MatchRule::new("HL", &["loop_2000a", "loop_2000b", "loop_2000c", "loop_2000d"])
            .when("hierarchical_level_code", &["23"])
            .new_instance()
            .hierarchy(HierarchyRole::Patient),
        // entity name loops, anchored to the active hierarchy level
        MatchRule::new(
            "NM1",
            &["loop_2000a", "loop_2000b", "loop_2000c", "loop_2000d", "loop_2100d"],
        ),
        MatchRule::new("NM1", &["loop_2000a", "loop_2000b", "loop_2000c", "loop_2100c"]),
        MatchRule::new("NM1", &["loop_2000a", "loop_2000b", "loop_2100b"]),
        MatchRule::new("NM1", &["loop_2000a", "loop_2100a"]),
        // eligibility inquiry loops
        MatchRule::new(
            "EQ",
            &[
                "loop_2000a",
                "loop_2000b",
                "loop_2000c",
                "loop_2000d",
                "loop_2100d",
                "loop_2110d",
            ],
        ),
        MatchRule::new(
            "EQ",
            &["loop_2000a", "loop_2000b", "loop_2000c", "loop_2100c", "loop_2110c"],
        ),
        MatchRule::new("SE", &["footer"]),
    ]
}

fn checks() -> Vec<fn(&LoopRecord) -> Vec<String>> {
    vec![
        checks::hl_parent_links,
        hierarchy_ids_are_chained,
        subscriber_patient_has_first_name,
        subscriber_child_code_consistent,
        // the count check runs last so it never masks other findings
        checks::segment_count_matches,
    ]
}

/// Each HL child must name its immediate hierarchical parent.
pub(crate) fn hierarchy_ids_are_chained(root: &LoopRecord) -> Vec<String> {
    let mut findings = Vec::new();

    for source in root.child_loops("loop_2000a") {
        let source_id = source.segment("hl_segment").map_or("", |s| s.value(1));

        for receiver in source.child_loops("loop_2000b") {
            let receiver_hl = receiver.segment("hl_segment");
            let receiver_id = receiver_hl.map_or("", |s| s.value(1));
            let receiver_parent = receiver_hl.map_or("", |s| s.value(2));

            if receiver_parent != source_id {
                findings.push(format!(
                    "receiver parent id {receiver_parent} != source id {source_id}"
                ));
            }

            for subscriber in receiver.child_loops("loop_2000c") {
                let subscriber_hl = subscriber.segment("hl_segment");
                let subscriber_id = subscriber_hl.map_or("", |s| s.value(1));
                let subscriber_parent = subscriber_hl.map_or("", |s| s.value(2));

                if subscriber_parent != receiver_id {
                    findings.push(format!(
                        "subscriber parent id {subscriber_parent} != receiver id {receiver_id}"
                    ));
                }

                for dependent in subscriber.child_loops("loop_2000d") {
                    let dependent_hl = dependent.segment("hl_segment");
                    let dependent_parent = dependent_hl.map_or("", |s| s.value(2));

                    if dependent_parent != subscriber_id {
                        findings.push(format!(
                            "dependent parent id {dependent_parent} != subscriber id {subscriber_id}"
                        ));
                    }
                }
            }
        }
    }

    findings
}

/// When the subscriber is the patient (HL04 == "0") a first name is required.
fn subscriber_patient_has_first_name(root: &LoopRecord) -> Vec<String> {
    let mut findings = Vec::new();
    for_each_subscriber(root, |subscriber| {
        let child_code = subscriber.segment("hl_segment").map_or("", |s| s.value(4));
        let first_name = subscriber
            .child_loop("loop_2100c")
            .and_then(|l| l.segment("nm1_segment"))
            .map_or("", |s| s.value(4));

        if child_code == "0" && first_name.is_empty() {
            findings.push("name_first is required when the subscriber is the patient".to_string());
        }
    });
    findings
}

/// HL04 == "1" promises a dependent loop beneath the subscriber.
fn subscriber_child_code_consistent(root: &LoopRecord) -> Vec<String> {
    let mut findings = Vec::new();
    for_each_subscriber(root, |subscriber| {
        let child_code = subscriber.segment("hl_segment").map_or("", |s| s.value(4));
        if child_code == "1" && subscriber.child_loops("loop_2000d").is_empty() {
            findings.push(format!(
                "Invalid subscriber hierarchy code {child_code} no dependent record is present"
            ));
        }
    });
    findings
}

fn for_each_subscriber<'a>(root: &'a LoopRecord, mut visit: impl FnMut(&'a LoopRecord)) {
    for source in root.child_loops("loop_2000a") {
        for receiver in source.child_loops("loop_2000b") {
            for subscriber in receiver.child_loops("loop_2000c") {
                visit(subscriber);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_assembles() {
        let table = table();
        assert_eq!(table.code, "270");
        assert!(table.loop_schema("loop_2110d").is_some());
        assert_eq!(table.rules_for("HL").count(), 4);
        assert_eq!(table.rules_for("NM1").count(), 4);
    }

    #[test]
    fn test_header_st_is_pinned_to_270() {
        let table = table();
        let header = table.loop_schema("header").unwrap();
        let (_, st) = header.slot("st_segment").unwrap();
        let code = st.schema.field("transaction_set_identifier_code").unwrap();
        assert_eq!(code.codes.as_deref(), Some(&["270"][..]));
    }

    #[test]
    fn test_subscriber_ref_codes_include_group_number() {
        let table = table();
        let name_loop = table.loop_schema("loop_2100d").unwrap();
        let (_, ref_slot) = name_loop.slot("ref_segment").unwrap();
        let qualifier = ref_slot
            .schema
            .field("reference_identification_qualifier")
            .unwrap();
        assert!(qualifier.codes.as_ref().unwrap().contains(&"6P"));
        assert!(ref_slot.is_repeating());
    }

    #[test]
    fn test_nm1_rules_are_ordered_deepest_first() {
        let table = table();
        let depths: Vec<usize> = table.rules_for("NM1").map(|r| r.target.len()).collect();
        let mut sorted = depths.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(depths, sorted);
    }
}
