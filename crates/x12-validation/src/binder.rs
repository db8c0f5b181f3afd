//! Model binder.
//!
//! Walks the accumulated record tree against the transaction's loop
//! schemas: field shape validation and typed coercion first, then
//! segment-scope validators, loop-scope validators, and finally
//! transaction-scope validators. The segment count check is declared last
//! in every table so it can never mask other findings.

use crate::shape;
use std::panic::{catch_unwind, AssertUnwindSafe};
use x12_ir::{
    Diagnostic, DiagnosticKind, EntryValue, LoopRecord, SegmentRecord, SourceLocation,
    TransactionModel,
};
use x12_schema::{segment_schema, LoopSchema, SegmentSchema, TransactionSchema};

/// Bind and validate a completed transaction record.
///
/// Diagnostics append to the model in tier order; binding always completes
/// and the caller decides what to do with an invalid model.
pub fn bind_transaction(
    model: &mut TransactionModel,
    schema: &TransactionSchema,
    base: SourceLocation,
) {
    let mut sink = Findings::default();

    let mut root = std::mem::replace(&mut model.root, LoopRecord::new("transaction"));
    bind_loop(&mut root, schema.loop_schema("transaction"), schema, base, &mut sink);
    model.root = root;

    model.diagnostics.extend(sink.shape);
    model.diagnostics.extend(sink.segment);
    model.diagnostics.extend(sink.loops);

    for check in &schema.checks {
        for message in run_check(|| check(&model.root)) {
            model.diagnostics.push(Diagnostic::error(
                DiagnosticKind::TransactionSemantic,
                base,
                message,
            ));
        }
    }
}

#[derive(Default)]
struct Findings {
    shape: Vec<Diagnostic>,
    segment: Vec<Diagnostic>,
    loops: Vec<Diagnostic>,
}

fn bind_loop(
    record: &mut LoopRecord,
    loop_schema: Option<&LoopSchema>,
    transaction: &TransactionSchema,
    base: SourceLocation,
    sink: &mut Findings,
) {
    let record_name = record.name.clone();

    for (key, value) in record.entries_mut() {
        match value {
            EntryValue::Segment(segment) => {
                let resolved = resolve_schema(loop_schema, key, &segment.id);
                bind_segment(segment, resolved.as_ref(), base, sink);
            }
            EntryValue::Segments(segments) => {
                let first_id = segments.first().map(|s| s.id.clone()).unwrap_or_default();
                let resolved = resolve_schema(loop_schema, key, &first_id);
                for segment in segments.iter_mut() {
                    bind_segment(segment, resolved.as_ref(), base, sink);
                }
            }
            EntryValue::Loop(child) => {
                let name = child.name.clone();
                bind_loop(child, transaction.loop_schema(&name), transaction, base, sink);
            }
            EntryValue::Loops(children) => {
                for child in children.iter_mut() {
                    let name = child.name.clone();
                    bind_loop(child, transaction.loop_schema(&name), transaction, base, sink);
                }
            }
        }
    }

    let Some(loop_schema) = loop_schema else {
        return;
    };

    // occurrence bounds and required slots
    for slot in &loop_schema.segments {
        let count = record.segments(&slot.key).len();
        if slot.required && count == 0 {
            sink.loops.push(Diagnostic::error(
                DiagnosticKind::LoopSemantic,
                base,
                format!("required segment '{}' is missing in {record_name}", slot.key),
            ));
        }
        if count > slot.max_repeat {
            sink.loops.push(Diagnostic::error(
                DiagnosticKind::LoopSemantic,
                base,
                format!(
                    "segment '{}' repeats {count} times in {record_name}, maximum is {}",
                    slot.key, slot.max_repeat
                ),
            ));
        }
    }

    for child in &loop_schema.children {
        if child.required && record.child_loops(child.name).is_empty() {
            sink.loops.push(Diagnostic::error(
                DiagnosticKind::LoopSemantic,
                base,
                format!("required loop '{}' is missing in {record_name}", child.name),
            ));
        }
    }

    for check in &loop_schema.checks {
        let findings = run_check(|| check(record));
        for message in findings {
            sink.loops.push(Diagnostic::error(
                DiagnosticKind::LoopSemantic,
                base,
                message,
            ));
        }
    }
}

/// Loop-local slot schema when one exists, otherwise the base schema.
fn resolve_schema(
    loop_schema: Option<&LoopSchema>,
    key: &str,
    segment_id: &str,
) -> Option<SegmentSchema> {
    if let Some((_, slot)) = loop_schema.and_then(|l| l.slot(key)) {
        return Some(slot.schema.clone());
    }
    segment_schema(segment_id).cloned()
}

fn bind_segment(
    segment: &mut SegmentRecord,
    schema: Option<&SegmentSchema>,
    base: SourceLocation,
    sink: &mut Findings,
) {
    let location = base.at_segment(segment.position);

    let Some(schema) = schema else {
        sink.shape.push(Diagnostic::error(
            DiagnosticKind::Shape,
            location,
            format!("segment '{}' has no registered schema", segment.id),
        ));
        return;
    };

    let delimiters = segment.delimiters;
    let declared = schema.fields.len();

    for (index, field) in segment.fields.iter_mut().enumerate() {
        let Some(field_schema) = schema.fields.get(index) else {
            sink.shape.push(Diagnostic::error(
                DiagnosticKind::Shape,
                location.at_field(index),
                format!(
                    "{} carries a field at position {index} beyond the declared {declared}",
                    segment.id
                ),
            ));
            continue;
        };

        for message in shape::bind_field(field, field_schema, delimiters) {
            sink.shape.push(Diagnostic::error(
                DiagnosticKind::Shape,
                location.at_field(index),
                message,
            ));
        }
    }

    // required fields beyond the conveyed positions
    for (index, field_schema) in schema.fields.iter().enumerate().skip(segment.fields.len()) {
        if field_schema.required {
            sink.shape.push(Diagnostic::error(
                DiagnosticKind::Shape,
                location.at_field(index),
                format!("{} is required", field_schema.name),
            ));
        }
    }

    for check in &schema.checks {
        let findings = run_check(|| check(segment));
        for message in findings {
            sink.segment.push(Diagnostic::error(
                DiagnosticKind::SegmentSemantic,
                location,
                message,
            ));
        }
    }
}

/// Run a validator, converting any panic into a finding.
fn run_check(check: impl FnOnce() -> Vec<String>) -> Vec<String> {
    match catch_unwind(AssertUnwindSafe(check)) {
        Ok(findings) => findings,
        Err(_) => {
            tracing::warn!("validator panicked; reporting as diagnostic");
            vec!["validator fault: check failed unexpectedly".to_string()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use x12_ir::Delimiters;
    use x12_schema::transaction_schema;

    fn segment(id: &str, fields: &[&str], position: usize) -> SegmentRecord {
        let mut all = vec![id.to_string()];
        all.extend(fields.iter().map(|f| f.to_string()));
        SegmentRecord::new(id, all, Delimiters::default(), position)
    }

    fn model_270(root: LoopRecord) -> TransactionModel {
        TransactionModel {
            transaction_code: "270".to_string(),
            implementation_version: "005010X279A1".to_string(),
            control_number: "0001".to_string(),
            group_control_number: None,
            usage_indicator: None,
            delimiters: Delimiters::default(),
            root,
            diagnostics: Vec::new(),
        }
    }

    /// A minimal single-subscriber 270 record in wire order.
    fn subscriber_270_record(segment_count_value: &str) -> LoopRecord {
        let mut root = LoopRecord::new("transaction");

        let mut header = LoopRecord::new("header");
        header.attach_segment(
            "st_segment",
            segment("ST", &["270", "0001", "005010X279A1"], 1),
            false,
        );
        header.attach_segment(
            "bht_segment",
            segment("BHT", &["0022", "13", "10001234", "20060501", "1319"], 2),
            false,
        );
        root.insert("header", EntryValue::Loop(header));

        let mut source = LoopRecord::new("loop_2000a");
        source.attach_segment("hl_segment", segment("HL", &["1", "", "20", "1"], 3), false);

        let mut source_name = LoopRecord::new("loop_2100a");
        source_name.attach_segment(
            "nm1_segment",
            segment(
                "NM1",
                &["PR", "2", "ABC COMPANY", "", "", "", "", "PI", "842610001"],
                4,
            ),
            false,
        );
        source.insert("loop_2100a", EntryValue::Loop(source_name));

        let mut receiver = LoopRecord::new("loop_2000b");
        receiver.attach_segment("hl_segment", segment("HL", &["2", "1", "21", "1"], 5), false);

        let mut receiver_name = LoopRecord::new("loop_2100b");
        receiver_name.attach_segment(
            "nm1_segment",
            segment(
                "NM1",
                &["1P", "2", "BONE AND JOINT CLINIC", "", "", "", "", "SV", "2000035"],
                6,
            ),
            false,
        );
        receiver.insert("loop_2100b", EntryValue::Loop(receiver_name));

        let mut subscriber = LoopRecord::new("loop_2000c");
        subscriber.attach_segment("hl_segment", segment("HL", &["3", "2", "22", "0"], 7), false);
        subscriber.attach_segment(
            "trn_segment",
            segment("TRN", &["1", "93175-012547", "9877281234"], 8),
            true,
        );

        let mut subscriber_name = LoopRecord::new("loop_2100c");
        subscriber_name.attach_segment(
            "nm1_segment",
            segment(
                "NM1",
                &["IL", "1", "SMITH", "ROBERT", "", "", "", "MI", "11122333301"],
                9,
            ),
            false,
        );
        subscriber_name.attach_segment(
            "dmg_segment",
            segment("DMG", &["D8", "19430519"], 10),
            false,
        );
        subscriber_name.attach_segment(
            "dtp_segment",
            segment("DTP", &["291", "D8", "20060501"], 11),
            true,
        );

        let mut eligibility = LoopRecord::new("loop_2110c");
        eligibility.attach_segment("eq_segment", segment("EQ", &["30"], 12), false);
        subscriber_name.insert("loop_2110c", EntryValue::Loop(eligibility));

        subscriber.insert("loop_2100c", EntryValue::Loop(subscriber_name));
        receiver.insert("loop_2000c", EntryValue::Loops(vec![subscriber]));
        source.insert("loop_2000b", EntryValue::Loops(vec![receiver]));
        root.insert("loop_2000a", EntryValue::Loops(vec![source]));

        let mut footer = LoopRecord::new("footer");
        footer.attach_segment(
            "se_segment",
            segment("SE", &[segment_count_value, "0001"], 13),
            false,
        );
        root.insert("footer", EntryValue::Loop(footer));

        root
    }

    #[test]
    fn test_valid_270_binds_clean() {
        let schema = transaction_schema("270", "005010X279A1").unwrap();
        let mut model = model_270(subscriber_270_record("13"));
        bind_transaction(&mut model, schema, SourceLocation::default());
        assert!(
            model.valid(),
            "expected clean bind, got {:?}",
            model.diagnostics
        );
    }

    #[test]
    fn test_segment_count_mismatch_is_sole_finding() {
        let schema = transaction_schema("270", "005010X279A1").unwrap();
        let mut model = model_270(subscriber_270_record("18"));
        bind_transaction(&mut model, schema, SourceLocation::default());

        let errors: Vec<_> = model.errors().collect();
        assert_eq!(errors.len(), 1, "diagnostics: {:?}", model.diagnostics);
        assert_eq!(errors[0].kind, DiagnosticKind::TransactionSemantic);
        assert!(errors[0].message.contains("SE segment count 18 != actual count 13"));
    }

    #[test]
    fn test_organization_with_person_name_is_segment_semantic() {
        let schema = transaction_schema("270", "005010X279A1").unwrap();
        let mut root = subscriber_270_record("13");

        // corrupt the payer name with a person first name
        {
            let path = vec![("loop_2000a".to_string(), 0)];
            let source = root.resolve_mut(&path).unwrap();
            let EntryValue::Loop(name_loop) = source.get_mut("loop_2100a").unwrap() else {
                panic!("expected loop entry");
            };
            let EntryValue::Segment(nm1) = name_loop.get_mut("nm1_segment").unwrap() else {
                panic!("expected segment entry");
            };
            nm1.fields[4] = x12_ir::FieldValue::new("JOHN");
        }

        let mut model = model_270(root);
        bind_transaction(&mut model, schema, SourceLocation::default());

        assert!(!model.valid());
        let semantic: Vec<_> = model
            .errors()
            .filter(|d| d.kind == DiagnosticKind::SegmentSemantic)
            .collect();
        assert_eq!(semantic.len(), 1);
        assert_eq!(
            semantic[0].message,
            "Invalid field usage for Organization/Non-Person Entity"
        );
        // the model still binds
        assert!(model.root.segment_count() > 0);
    }

    #[test]
    fn test_shape_diagnostics_precede_semantic_tiers() {
        let schema = transaction_schema("270", "005010X279A1").unwrap();
        let mut root = subscriber_270_record("13");

        {
            let path = vec![("loop_2000a".to_string(), 0)];
            let source = root.resolve_mut(&path).unwrap();
            let EntryValue::Loop(name_loop) = source.get_mut("loop_2100a").unwrap() else {
                panic!("expected loop entry");
            };
            let EntryValue::Segment(nm1) = name_loop.get_mut("nm1_segment").unwrap() else {
                panic!("expected segment entry");
            };
            // invalid entity type and a dangling identification qualifier
            nm1.fields[2] = x12_ir::FieldValue::new("9");
            nm1.fields[9] = x12_ir::FieldValue::new("");
        }

        let mut model = model_270(root);
        bind_transaction(&mut model, schema, SourceLocation::default());

        let kinds: Vec<_> = model.errors().map(|d| d.kind).collect();
        let first_semantic = kinds
            .iter()
            .position(|k| *k == DiagnosticKind::SegmentSemantic);
        let last_shape = kinds
            .iter()
            .rposition(|k| *k == DiagnosticKind::Shape);
        if let (Some(first_semantic), Some(last_shape)) = (first_semantic, last_shape) {
            assert!(last_shape < first_semantic);
        }
    }
}
