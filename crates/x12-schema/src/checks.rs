//! Reusable validator functions attached to segment, loop, and transaction
//! schemas.
//!
//! Validators are pure functions over their scope's record data. They return
//! finding messages; severity, kind, and location are assigned by the
//! binder. Field positions follow the 005010 segment layouts (position 0 is
//! the identifier field).

use std::collections::{HashMap, HashSet};
use x12_ir::{LoopRecord, SegmentRecord};

// ---------------------------------------------------------------------------
// segment scope
// ---------------------------------------------------------------------------

/// NM1: an identification code and its qualifier travel together (NM108/NM109).
pub fn nm1_identification_pair(segment: &SegmentRecord) -> Vec<String> {
    let qualifier = segment.value(8);
    let code = segment.value(9);
    if qualifier.is_empty() != code.is_empty() {
        return vec![
            "Identification code usage requires the code qualifier and code value".to_string(),
        ];
    }
    Vec::new()
}

/// NM1: person-name fields are invalid on a non-person entity (NM102 == "2").
pub fn nm1_entity_name_usage(segment: &SegmentRecord) -> Vec<String> {
    if segment.value(2) == "2" {
        for index in 4..=7 {
            if !segment.value(index).is_empty() {
                return vec!["Invalid field usage for Organization/Non-Person Entity".to_string()];
            }
        }
    }
    Vec::new()
}

/// PER: each communication number travels with its qualifier (PER05..PER08).
pub fn per_communication_pairs(segment: &SegmentRecord) -> Vec<String> {
    let mut findings = Vec::new();
    for (qualifier, number) in [(5, 6), (7, 8)] {
        if segment.value(qualifier).is_empty() != segment.value(number).is_empty() {
            findings.push("communication fields require a qualifier and number".to_string());
        }
    }
    findings
}

/// N4: state code and country subdivision code are mutually exclusive.
pub fn n4_state_subdivision_exclusive(segment: &SegmentRecord) -> Vec<String> {
    if !segment.value(2).is_empty() && !segment.value(7).is_empty() {
        return vec![
            "only one of state_province_code or country_subdivision_code is allowed".to_string(),
        ];
    }
    Vec::new()
}

/// DMG: birth date and its format qualifier travel together (DMG01/DMG02).
pub fn dmg_date_pair(segment: &SegmentRecord) -> Vec<String> {
    if segment.value(1).is_empty() != segment.value(2).is_empty() {
        return vec![
            "DMG requires both a date_time_period_format_qualifier and date_time_period"
                .to_string(),
        ];
    }
    Vec::new()
}

/// INS: a member death date travels with its format qualifier (INS12/INS13).
pub fn ins_death_date_pair(segment: &SegmentRecord) -> Vec<String> {
    if segment.value(11).is_empty() != segment.value(12).is_empty() {
        return vec![
            "member death date requires both the format qualifier and date value".to_string(),
        ];
    }
    Vec::new()
}

/// PRV: reference id and qualifier travel together (PRV02/PRV03).
pub fn prv_reference_pair(segment: &SegmentRecord) -> Vec<String> {
    if segment.value(2).is_empty() != segment.value(3).is_empty() {
        return vec![
            "reference identification requires both the qualifier and value".to_string(),
        ];
    }
    Vec::new()
}

/// EQ: a service type code or a medical procedure id is required.
pub fn eq_inquiry_required(segment: &SegmentRecord) -> Vec<String> {
    if segment.value(1).is_empty() && segment.value(2).is_empty() {
        return vec![
            "Service Type Code or Medical Procedure is required for EQ segment".to_string(),
        ];
    }
    Vec::new()
}

/// III: an industry code travels with its qualifier (III01/III02).
pub fn iii_industry_pair(segment: &SegmentRecord) -> Vec<String> {
    if segment.value(1).is_empty() != segment.value(2).is_empty() {
        return vec!["Industry codes require a qualifier and value".to_string()];
    }
    Vec::new()
}

/// III: a nature-of-injury category requires the body part description.
pub fn iii_nature_of_injury(segment: &SegmentRecord) -> Vec<String> {
    if !segment.value(3).is_empty() && segment.value(4).is_empty() {
        return vec!["Nature of injury requires a category and value/description".to_string()];
    }
    Vec::new()
}

/// HL at the top of a hierarchy must not carry a parent id.
pub fn hl_root_has_no_parent(segment: &SegmentRecord) -> Vec<String> {
    let parent = segment.value(2);
    if !parent.is_empty() {
        return vec![format!("invalid hierarchical_parent_id_number {parent}")];
    }
    Vec::new()
}

/// DTP: the period value must agree with its format qualifier (D8 or RD8).
pub fn dtp_period_format(segment: &SegmentRecord) -> Vec<String> {
    let qualifier = segment.value(2);
    let period = segment.value(3);

    match qualifier {
        "RD8" => {
            let parts: Vec<&str> = period.split('-').collect();
            if parts.len() != 2 || !parts.iter().all(|p| is_x12_date(p)) {
                return vec![format!("Invalid date range {period}")];
            }
        }
        "D8" => {
            if !is_x12_date(period) {
                return vec![format!("Invalid date value {period}")];
            }
        }
        _ => {}
    }
    Vec::new()
}

fn is_x12_date(value: &str) -> bool {
    value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// loop scope
// ---------------------------------------------------------------------------

fn duplicate_qualifier_codes(
    record: &LoopRecord,
    key: &str,
    field_index: usize,
    field_label: &str,
) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for segment in record.segments(key) {
        *counts.entry(segment.value(field_index)).or_default() += 1;
    }

    let mut duplicates: Vec<&str> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(code, _)| code)
        .collect();
    duplicates.sort_unstable();

    duplicates
        .into_iter()
        .map(|code| format!("Duplicate {key}.{field_label} code '{code}'"))
        .collect()
}

/// Repeated REF segments within a loop must carry distinct qualifiers.
pub fn no_duplicate_ref_qualifiers(record: &LoopRecord) -> Vec<String> {
    duplicate_qualifier_codes(
        record,
        "ref_segment",
        1,
        "reference_identification_qualifier",
    )
}

/// Repeated AMT segments within a loop must carry distinct qualifiers.
pub fn no_duplicate_amt_qualifiers(record: &LoopRecord) -> Vec<String> {
    duplicate_qualifier_codes(record, "amt_segment", 1, "amount_qualifier_code")
}

/// Repeated DTP segments within a loop must carry distinct date qualifiers.
pub fn no_duplicate_dtp_qualifiers(record: &LoopRecord) -> Vec<String> {
    duplicate_qualifier_codes(record, "dtp_segment", 1, "date_time_qualifier")
}

// ---------------------------------------------------------------------------
// transaction scope
// ---------------------------------------------------------------------------

/// SE01 must equal the count of segments from ST through SE inclusive.
pub fn segment_count_matches(root: &LoopRecord) -> Vec<String> {
    let Some(footer) = root.child_loop("footer") else {
        return vec!["transaction footer is missing".to_string()];
    };
    let Some(se) = footer.segment("se_segment") else {
        return vec!["SE segment is missing from the transaction footer".to_string()];
    };

    let Ok(expected) = se.value(1).parse::<usize>() else {
        return vec!["Expected transaction count not found in SE segment".to_string()];
    };

    let actual = root.segment_count();
    if expected != actual {
        return vec![format!("SE segment count {expected} != actual count {actual}")];
    }
    Vec::new()
}

/// Every non-root HL must reference a previously seen HL id; ids are unique.
pub fn hl_parent_links(root: &LoopRecord) -> Vec<String> {
    let mut segments = Vec::new();
    root.collect_segments(&mut segments);

    let mut findings = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for segment in segments.iter().filter(|s| s.id == "HL") {
        let id = segment.value(1);
        let parent = segment.value(2);

        if !parent.is_empty() && !seen.contains(parent) {
            findings.push(format!(
                "HL parent id {parent} does not refer to a previously seen HL id"
            ));
        }
        if !seen.insert(id) {
            findings.push(format!("duplicate HL id {id}"));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use x12_ir::Delimiters;

    fn segment(id: &str, fields: &[&str]) -> SegmentRecord {
        let mut all = vec![id.to_string()];
        all.extend(fields.iter().map(|f| f.to_string()));
        SegmentRecord::new(id, all, Delimiters::default(), 1)
    }

    #[test]
    fn test_nm1_identification_pair() {
        let valid = segment("NM1", &["PR", "2", "PAYER C", "", "", "", "", "PI", "12345"]);
        assert!(nm1_identification_pair(&valid).is_empty());

        let qualifier_only = segment("NM1", &["PR", "2", "PAYER C", "", "", "", "", "PI"]);
        assert_eq!(nm1_identification_pair(&qualifier_only).len(), 1);
    }

    #[test]
    fn test_nm1_entity_name_usage() {
        let organization_with_first_name =
            segment("NM1", &["PR", "2", "PAYER C", "JOHN", "", "", "", "PI", "12345"]);
        let findings = nm1_entity_name_usage(&organization_with_first_name);
        assert_eq!(
            findings,
            vec!["Invalid field usage for Organization/Non-Person Entity".to_string()]
        );

        let person = segment("NM1", &["IL", "1", "SMITH", "ROBERT"]);
        assert!(nm1_entity_name_usage(&person).is_empty());
    }

    #[test]
    fn test_per_communication_pairs() {
        let valid = segment("PER", &["IC", "JOHN SMITH", "TE", "5551114444", "EX", "123"]);
        assert!(per_communication_pairs(&valid).is_empty());

        let dangling = segment("PER", &["IC", "JOHN SMITH", "TE", "5551114444", "EX"]);
        assert_eq!(per_communication_pairs(&dangling).len(), 1);
    }

    #[test]
    fn test_n4_state_subdivision_exclusive() {
        let valid = segment("N4", &["KANSAS CITY", "MO", "64108"]);
        assert!(n4_state_subdivision_exclusive(&valid).is_empty());

        let both = segment("N4", &["TORONTO", "ON", "", "CA", "", "", "ON"]);
        assert_eq!(n4_state_subdivision_exclusive(&both).len(), 1);
    }

    #[test]
    fn test_dtp_period_format() {
        assert!(dtp_period_format(&segment("DTP", &["291", "D8", "20060501"])).is_empty());
        assert!(
            dtp_period_format(&segment("DTP", &["291", "RD8", "20060501-20060530"])).is_empty()
        );
        assert_eq!(dtp_period_format(&segment("DTP", &["291", "D8", "2006"])).len(), 1);
        assert_eq!(
            dtp_period_format(&segment("DTP", &["291", "RD8", "20060501"])).len(),
            1
        );
    }

    #[test]
    fn test_hl_root_has_no_parent() {
        assert!(hl_root_has_no_parent(&segment("HL", &["1", "", "20", "1"])).is_empty());
        let findings = hl_root_has_no_parent(&segment("HL", &["1", "9", "20", "1"]));
        assert_eq!(findings, vec!["invalid hierarchical_parent_id_number 9".to_string()]);
    }

    #[test]
    fn test_duplicate_ref_qualifiers() {
        let mut record = LoopRecord::new("loop_2100d");
        record.attach_segment("ref_segment", segment("REF", &["6P", "111"]), true);
        record.attach_segment("ref_segment", segment("REF", &["6P", "222"]), true);
        record.attach_segment("ref_segment", segment("REF", &["SY", "333"]), true);

        let findings = no_duplicate_ref_qualifiers(&record);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("'6P'"));
    }

    #[test]
    fn test_segment_count_matches() {
        let mut root = LoopRecord::new("transaction");
        let mut header = LoopRecord::new("header");
        header.attach_segment("st_segment", segment("ST", &["270", "0001"]), false);
        let mut footer = LoopRecord::new("footer");
        footer.attach_segment("se_segment", segment("SE", &["2", "0001"]), false);
        root.insert("header", x12_ir::EntryValue::Loop(header));
        root.insert("footer", x12_ir::EntryValue::Loop(footer));

        assert!(segment_count_matches(&root).is_empty());

        // mutate the declared count
        let mut footer_bad = LoopRecord::new("footer");
        footer_bad.attach_segment("se_segment", segment("SE", &["3", "0001"]), false);
        root.insert("footer", x12_ir::EntryValue::Loop(footer_bad));
        let findings = segment_count_matches(&root);
        assert_eq!(findings, vec!["SE segment count 3 != actual count 2".to_string()]);
    }

    #[test]
    fn test_hl_parent_links() {
        let mut root = LoopRecord::new("transaction");
        let mut source = LoopRecord::new("loop_2000a");
        source.attach_segment("hl_segment", segment("HL", &["1", "", "20", "1"]), false);
        let mut receiver = LoopRecord::new("loop_2000b");
        receiver.attach_segment("hl_segment", segment("HL", &["2", "1", "21", "1"]), false);
        source.insert("loop_2000b", x12_ir::EntryValue::Loops(vec![receiver]));
        root.insert("loop_2000a", x12_ir::EntryValue::Loops(vec![source]));

        assert!(hl_parent_links(&root).is_empty());

        // unknown parent reference
        let mut orphan = LoopRecord::new("loop_2000b");
        orphan.attach_segment("hl_segment", segment("HL", &["3", "9", "21", "1"]), false);
        root.insert("loop_2000b", x12_ir::EntryValue::Loops(vec![orphan]));
        let findings = hl_parent_links(&root);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("parent id 9"));
    }
}
