//! End-to-end coverage for the 276 claim status request pipeline.

use x12_engine::{render, ModelReader};

const ISA: &str = "ISA*03*9876543210*01*9876543210*30*000000005      *30*12345          *131031*1147*^*00501*000000907*1*T*:~";
const GS: &str = "GS*HR*000000005*54321*20131031*1147*1*X*005010X212~";

const CLAIM_STATUS: &str = concat!(
    "ST*276*0001*005010X212~",
    "BHT*0010*13*ABC276XXX*20050915*1425~",
    "HL*1**20*1~",
    "NM1*PR*2*ABC INSURANCE*****PI*12345~",
    "HL*2*1*21*1~",
    "NM1*41*2*XYZ SERVICE*****46*X67E~",
    "HL*3*2*19*1~",
    "NM1*1P*2*HOME HOSPITAL*****XX*1666666661~",
    "HL*4*3*22*0~",
    "DMG*D8*19301210*M~",
    "NM1*IL*1*SMITH*FRED****MI*123456789A~",
    "TRN*1*ABCXYZ1~",
    "REF*BLT*111~",
    "DTP*472*RD8*20050831-20050906~",
    "SE*15*0001~",
);

fn interchange(transaction: &str) -> String {
    format!("{ISA}{GS}{transaction}GE*1*1~IEA*1*000000907~")
}

#[test]
fn test_claim_status_request_binds_clean() {
    let data = interchange(CLAIM_STATUS);
    let mut reader = ModelReader::from_payload(data).unwrap();
    let models: Vec<_> = reader.models().collect::<Result<_, _>>().unwrap();
    assert_eq!(models.len(), 1);

    let model = &models[0];
    assert!(model.valid(), "diagnostics: {:?}", model.diagnostics);
    assert_eq!(model.transaction_code, "276");

    // the provider level sits between the receiver and the subscriber
    let source = &model.root.child_loops("loop_2000a")[0];
    let receiver = &source.child_loops("loop_2000b")[0];
    let provider = &receiver.child_loops("loop_2000c")[0];
    assert_eq!(provider.segment("hl_segment").unwrap().value(3), "19");

    let subscriber = &provider.child_loops("loop_2000d")[0];
    assert!(subscriber.segment("dmg_segment").is_some());

    let tracking = subscriber.child_loops("loop_2200d");
    assert_eq!(tracking.len(), 1);
    assert_eq!(tracking[0].segment("trn_segment").unwrap().value(2), "ABCXYZ1");
    assert_eq!(tracking[0].segments("ref_segment").len(), 1);
    assert_eq!(tracking[0].segments("dtp_segment").len(), 1);
}

#[test]
fn test_claim_status_round_trip() {
    let data = interchange(CLAIM_STATUS);
    let mut reader = ModelReader::from_payload(data).unwrap();
    let model = reader.models().next().unwrap().unwrap();
    assert_eq!(render(&model, false), CLAIM_STATUS);
}
