//! End-to-end coverage for the 270 eligibility inquiry pipeline.

use x12_engine::{render, ModelReader};
use x12_ir::{DiagnosticKind, Severity, TransactionModel};

const ISA: &str = "ISA*03*9876543210*01*9876543210*30*000000005      *30*12345          *131031*1147*^*00501*000000907*1*T*:~";
const GS: &str = "GS*HS*000000005*54321*20131031*1147*1*X*005010X279A1~";

/// A subscriber-only inquiry with seventeen segments from ST through SE.
const SUBSCRIBER_ONLY: &str = concat!(
    "ST*270*0001*005010X279A1~",
    "BHT*0022*13*10001234*20060501*1319~",
    "HL*1**20*1~",
    "NM1*PR*2*PAYER C*****PI*11122~",
    "HL*2*1*21*1~",
    "NM1*1P*2*BONE AND JOINT CLINIC*****SV*2000035~",
    "HL*3*2*22*0~",
    "TRN*1*93175-012547*9877281234~",
    "NM1*IL*1*SMITH*ROBERT****MI*11122333301~",
    "REF*1L*599119~",
    "N3*3523 MAIN ST~",
    "N4*KANSAS CITY*MO*64108~",
    "DMG*D8*19430519~",
    "DTP*291*D8*20060501~",
    "EQ*30~",
    "AMT*R*37.50~",
    "SE*17*0001~",
);

fn interchange(transaction: &str) -> String {
    format!("{ISA}{GS}{transaction}GE*1*1~IEA*1*000000907~")
}

fn parse_one(data: &str) -> TransactionModel {
    let mut reader = ModelReader::from_payload(data.to_string()).unwrap();
    let mut models: Vec<_> = reader.models().collect::<Result<_, _>>().unwrap();
    assert_eq!(models.len(), 1);
    models.remove(0)
}

#[test]
fn test_subscriber_only_inquiry_binds_clean() {
    let model = parse_one(&interchange(SUBSCRIBER_ONLY));

    assert!(model.valid(), "diagnostics: {:?}", model.diagnostics);
    assert!(model.diagnostics.is_empty());
    assert_eq!(model.transaction_code, "270");
    assert_eq!(model.implementation_version, "005010X279A1");
    assert_eq!(model.usage_indicator.as_deref(), Some("T"));

    let header = model.root.child_loop("header").unwrap();
    assert_eq!(header.segment("st_segment").unwrap().value(1), "270");

    let sources = model.root.child_loops("loop_2000a");
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].segment("hl_segment").unwrap().value(3), "20");

    let receivers = sources[0].child_loops("loop_2000b");
    assert_eq!(receivers.len(), 1);
    assert_eq!(receivers[0].segment("hl_segment").unwrap().value(3), "21");

    let subscribers = receivers[0].child_loops("loop_2000c");
    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers[0].segment("hl_segment").unwrap().value(3), "22");

    let name = subscribers[0].child_loop("loop_2100c").unwrap();
    assert_eq!(name.segment("nm1_segment").unwrap().value(3), "SMITH");

    let eligibility = name.child_loop("loop_2110c").unwrap();
    assert_eq!(eligibility.segment("eq_segment").unwrap().value(1), "30");
    assert_eq!(eligibility.segments("amt_segment").len(), 1);
}

#[test]
fn test_render_reproduces_input() {
    let model = parse_one(&interchange(SUBSCRIBER_ONLY));
    assert_eq!(render(&model, false), SUBSCRIBER_ONLY);
}

#[test]
fn test_pretty_render_separates_segments_with_newlines() {
    let model = parse_one(&interchange(SUBSCRIBER_ONLY));
    let pretty = render(&model, true);
    assert_eq!(pretty.lines().count(), 17);
    assert!(pretty.starts_with("ST*270*0001*005010X279A1~\n"));
}

#[test]
fn test_round_trip_is_stable() {
    let first = parse_one(&interchange(SUBSCRIBER_ONLY));
    let rendered = render(&first, false);
    let second = parse_one(&interchange(&rendered));
    assert_eq!(first, second);
}

#[test]
fn test_segment_count_mismatch_is_the_only_error() {
    let mutated = SUBSCRIBER_ONLY.replace("SE*17*0001~", "SE*18*0001~");
    let model = parse_one(&interchange(&mutated));

    assert!(!model.valid());
    let errors: Vec<_> = model.errors().collect();
    assert_eq!(errors.len(), 1, "diagnostics: {:?}", model.diagnostics);
    assert_eq!(errors[0].kind, DiagnosticKind::TransactionSemantic);
    assert!(errors[0].message.contains("SE segment count 18 != actual count 17"));
}

#[test]
fn test_mixed_entity_nm1_still_binds() {
    let mutated = SUBSCRIBER_ONLY.replace(
        "NM1*PR*2*PAYER C*****PI*11122~",
        "NM1*PR*2*PAYER C*JOHN****PI*11122~",
    );
    let model = parse_one(&interchange(&mutated));

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
    // binding still produced the full record
    assert_eq!(model.root.segment_count(), 17);
}

#[test]
fn test_duplicate_ref_qualifier_in_dependent_loop() {
    let with_dependent = concat!(
        "ST*270*0001*005010X279A1~",
        "BHT*0022*13*10001234*20060501*1319~",
        "HL*1**20*1~",
        "NM1*PR*2*PAYER C*****PI*11122~",
        "HL*2*1*21*1~",
        "NM1*1P*2*BONE AND JOINT CLINIC*****SV*2000035~",
        "HL*3*2*22*1~",
        "NM1*IL*1*SMITH*ROBERT****MI*11122333301~",
        "HL*4*3*23*0~",
        "NM1*03*1*SMITH*MARY~",
        "REF*6P*55512~",
        "REF*6P*55513~",
        "SE*13*0001~",
    );
    let model = parse_one(&interchange(with_dependent));

    assert!(!model.valid());
    let loop_errors: Vec<_> = model
        .errors()
        .filter(|d| d.kind == DiagnosticKind::LoopSemantic)
        .collect();
    assert_eq!(loop_errors.len(), 1, "diagnostics: {:?}", model.diagnostics);
    assert!(loop_errors[0].message.contains("Duplicate"));
    assert!(loop_errors[0].message.contains("'6P'"));
}

#[test]
fn test_unknown_hl_parent_is_reported() {
    let mutated = SUBSCRIBER_ONLY.replace("HL*2*1*21*1~", "HL*2*9*21*1~");
    let model = parse_one(&interchange(&mutated));

    assert!(!model.valid());
    assert!(model.errors().any(|d| {
        d.kind == DiagnosticKind::TransactionSemantic && d.message.contains("parent id 9")
    }));
}

#[test]
fn test_unexpected_segment_order_warns_and_attaches() {
    // N3 belongs before DMG in the subscriber name loop
    let mutated = SUBSCRIBER_ONLY
        .replace("N3*3523 MAIN ST~N4*KANSAS CITY*MO*64108~DMG*D8*19430519~", "DMG*D8*19430519~N3*3523 MAIN ST~N4*KANSAS CITY*MO*64108~");
    let model = parse_one(&interchange(&mutated));

    let warnings: Vec<_> = model
        .warnings()
        .filter(|d| d.kind == DiagnosticKind::Structure)
        .collect();
    assert!(!warnings.is_empty());
    assert!(warnings[0].message.contains("unexpected segment order"));
    assert_eq!(warnings[0].severity, Severity::Warning);

    // the out-of-order segments were attached regardless
    let sources = model.root.child_loops("loop_2000a");
    let name = sources[0].child_loops("loop_2000b")[0].child_loops("loop_2000c")[0]
        .child_loop("loop_2100c")
        .unwrap();
    assert!(name.segment("n3_segment").is_some());
}

#[test]
fn test_two_transactions_in_one_group() {
    let data = format!(
        "{ISA}{GS}{SUBSCRIBER_ONLY}{}GE*2*1~IEA*1*000000907~",
        SUBSCRIBER_ONLY.replace("ST*270*0001", "ST*270*0002")
    );
    let mut reader = ModelReader::from_payload(data).unwrap();
    let models: Vec<_> = reader.models().collect::<Result<_, _>>().unwrap();
    assert_eq!(models.len(), 2);
    assert_eq!(models[0].control_number, "0001");
    assert_eq!(models[1].control_number, "0002");
}
