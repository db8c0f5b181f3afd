//! Base segment schemas for the 005010 implementation guides.
//!
//! One schema per segment id, shared by every transaction table. Loop-local
//! overrides narrow these; the base layouts carry the field order, types,
//! length bounds, and the code tables that hold regardless of context.

use crate::checks;
use crate::model::{FieldSchema, FieldType, SegmentSchema};
use std::collections::HashMap;

use FieldType::{Date, Decimal, Id, Integer, Text, Time};

/// Service type codes shared by EQ01 and EB03.
pub const SERVICE_TYPE_CODES: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "23", "24", "25", "26", "27", "28", "30", "32", "33", "34", "35",
    "36", "37", "38", "39", "40", "41", "42", "43", "44", "45", "46", "47", "48", "49", "50", "51",
    "52", "53", "54", "55", "56", "57", "58", "59", "60", "61", "62", "63", "64", "65", "66", "67",
    "68", "69", "70", "71", "72", "73", "74", "75", "76", "77", "78", "79", "80", "81", "82", "83",
    "84", "85", "86", "87", "88", "89", "90", "91", "92", "93", "94", "95", "96", "97", "98", "99",
    "A0", "A1", "A2", "A3", "A4", "A5", "A6", "A7", "A8", "A9", "AA", "AB", "AC", "AD", "AE", "AF",
    "AG", "AH", "AI", "AJ", "AK", "AL", "AM", "AN", "AO", "AQ", "AR", "B1", "B2", "B3", "BA", "BB",
    "BC", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BK", "BL", "BM", "BN", "BP", "BQ", "BR", "BS",
    "BT", "BU", "BV", "BW", "BX", "BY", "BZ", "C1", "CA", "CB", "CC", "CD", "CE", "CF", "CG", "CH",
    "CI", "CJ", "CK", "CL", "CM", "CN", "CO", "CP", "CQ", "DG", "DM", "DS", "GF", "GN", "GY", "IC",
    "MH", "NI", "ON", "PT", "PU", "RN", "RT", "TC", "TN", "UC",
];

/// Place-of-service industry codes for III02 under the `ZZ` qualifier.
pub const PLACE_OF_SERVICE_CODES: &[&str] = &[
    "01", "03", "04", "05", "06", "07", "08", "11", "12", "13", "14", "15", "20", "21", "22", "23",
    "24", "25", "26", "31", "32", "33", "34", "41", "42", "49", "50", "51", "52", "53", "54", "55",
    "56", "57", "60", "61", "62", "65", "71", "72", "81", "99",
];

/// Build the base registry keyed by segment id.
pub fn base_segments() -> HashMap<&'static str, SegmentSchema> {
    let mut map = HashMap::new();
    for schema in all() {
        map.insert(schema.id, schema);
    }
    map
}

fn all() -> Vec<SegmentSchema> {
    vec![
        aaa(),
        act(),
        adx(),
        amt(),
        bgn(),
        bht(),
        bpr(),
        cas(),
        cl1(),
        clm(),
        clp(),
        cn1(),
        cob(),
        crc(),
        cur(),
        dmg(),
        dsb(),
        dtm(),
        dtp(),
        eb(),
        ent(),
        eq(),
        ge(),
        gs(),
        hcr(),
        hd(),
        hi(),
        hl(),
        hlh(),
        hsd(),
        idc(),
        iea(),
        iii(),
        ins(),
        isa(),
        k3(),
        le(),
        lin(),
        lq(),
        ls(),
        lx(),
        mia(),
        moa(),
        mpi(),
        msg(),
        n1(),
        n3(),
        n4(),
        nm1(),
        nte(),
        oi(),
        pat(),
        per(),
        pla(),
        plb(),
        prv(),
        pwk(),
        qty(),
        rdm(),
        ref_(),
        rmr(),
        sbr(),
        se(),
        st(),
        stc(),
        sv1(),
        sv2(),
        sv3(),
        svc(),
        svd(),
        too(),
        trn(),
        ts2(),
        ts3(),
        um(),
    ]
}

/// Request validation result, e.g. `AAA*Y**42*Y~`
fn aaa() -> SegmentSchema {
    SegmentSchema::new("AAA").with_fields(vec![
        FieldSchema::new("response_code", Id).required().codes(&["N", "Y"]),
        FieldSchema::new("agency_qualifier_code", Id).max(2),
        FieldSchema::new("reject_reason_code", Id).required().length(2, 2),
        FieldSchema::new("follow_up_action_code", Id).required().length(1, 1),
    ])
}

/// Account identification, e.g. `ACT*1234*****23498765~`
fn act() -> SegmentSchema {
    SegmentSchema::new("ACT").with_fields(vec![
        FieldSchema::new("tpa_account_number", Text).required().length(1, 35),
        FieldSchema::new("name", Text).max(60),
        FieldSchema::new("identification_code_qualifier", Id).max(2),
        FieldSchema::new("identification_code", Text).max(80),
        FieldSchema::new("account_number_qualifier", Id).max(3),
        FieldSchema::new("tpa_account_number_2", Text).max(35),
        FieldSchema::new("description", Text).max(80),
        FieldSchema::new("payment_method_type_code", Id).max(2),
        FieldSchema::new("benefit_status_code", Id).max(1),
    ])
}

/// Premium adjustment, e.g. `ADX*-100*H1~`
fn adx() -> SegmentSchema {
    SegmentSchema::new("ADX").with_fields(vec![
        FieldSchema::new("adjustment_amount", Decimal).required(),
        FieldSchema::new("adjustment_reason_code", Id).required().length(2, 2),
        FieldSchema::new("reference_identification_qualifier", Id).max(3),
        FieldSchema::new("reference_identification", Text).max(50),
    ])
}

/// Monetary amount, e.g. `AMT*R*37.5~`
fn amt() -> SegmentSchema {
    SegmentSchema::new("AMT").with_fields(vec![
        FieldSchema::new("amount_qualifier_code", Id).required().length(1, 3),
        FieldSchema::new("monetary_amount", Decimal).required(),
        FieldSchema::new("credit_debit_flag_code", Id).max(1),
    ])
}

/// Beginning segment, e.g. `BGN*00*12456*20131020*1200****2~`
fn bgn() -> SegmentSchema {
    SegmentSchema::new("BGN").with_fields(vec![
        FieldSchema::new("transaction_set_purpose_code", Id)
            .required()
            .codes(&["00", "15", "22"]),
        FieldSchema::new("transaction_set_reference_number", Text).required().length(1, 50),
        FieldSchema::new("transaction_set_creation_date", Date).required(),
        FieldSchema::new("transaction_set_creation_time", Time).required(),
        FieldSchema::new("time_zone_code", Id).max(2),
        FieldSchema::new("original_transaction_set_reference_number", Text).max(50),
        FieldSchema::new("transaction_type_code", Id).length(2, 2),
        FieldSchema::new("action_code", Id).required().codes(&["2", "4", "RX"]),
        FieldSchema::new("security_level_code", Id).length(2, 2),
    ])
}

/// Beginning of hierarchical transaction, e.g. `BHT*0022*01**19980101*1400*RT~`
fn bht() -> SegmentSchema {
    SegmentSchema::new("BHT").with_fields(vec![
        FieldSchema::new("hierarchical_structure_code", Id).required().length(4, 4),
        FieldSchema::new("transaction_set_purpose_code", Id).required().length(2, 2),
        FieldSchema::new("submitter_transactional_identifier", Text).length(1, 50),
        FieldSchema::new("transaction_set_creation_date", Date).required(),
        FieldSchema::new("transaction_set_creation_time", Time).required(),
        FieldSchema::new("transaction_type_code", Id).length(2, 2),
    ])
}

/// Financial information, e.g. `BPR*C*150000*C*ACH*CTX*01*999999992*DA*123456~`
fn bpr() -> SegmentSchema {
    SegmentSchema::new("BPR").with_fields(vec![
        FieldSchema::new("transaction_handling_code", Id)
            .required()
            .codes(&["C", "D", "H", "I", "P", "U", "X"]),
        FieldSchema::new("total_actual_provider_payment_amount", Decimal).required(),
        FieldSchema::new("credit_debit_flag_code", Id).required().codes(&["C", "D"]),
        FieldSchema::new("payment_method_code", Id)
            .required()
            .codes(&["ACH", "BOP", "CHK", "FWT", "NON"]),
        FieldSchema::new("payment_format_code", Id).max(3),
        FieldSchema::new("sender_dfi_qualifier", Id).length(2, 2),
        FieldSchema::new("sender_dfi_id", Text).max(12),
        FieldSchema::new("sender_account_qualifier", Id).codes(&["DA"]),
        FieldSchema::new("sender_account_number", Text).max(35),
        FieldSchema::new("payer_identifier", Text).max(10),
        FieldSchema::new("sender_supplemental_code", Text).max(9),
        FieldSchema::new("receiver_dfi_qualifier", Id).length(2, 2),
        FieldSchema::new("receiver_bank_id_number", Text).max(12),
        FieldSchema::new("receiver_account_qualifier", Id).length(1, 3),
        FieldSchema::new("receiver_account_number", Text).max(35),
        FieldSchema::new("eft_effective_date", Date),
    ])
}

/// Claims adjustment, e.g. `CAS*PR*1*7.93~`
fn cas() -> SegmentSchema {
    let mut fields = vec![
        FieldSchema::new("adjustment_group_code", Id)
            .required()
            .codes(&["CO", "CR", "OA", "PI", "PR"]),
        FieldSchema::new("adjustment_reason_code_1", Id).required().length(1, 5),
        FieldSchema::new("monetary_amount_1", Decimal).required(),
        FieldSchema::new("quantity_1", Decimal),
    ];
    for group in 2..=6 {
        fields.push(reason_code(group));
        fields.push(group_amount(group));
        fields.push(group_quantity(group));
    }
    SegmentSchema::new("CAS").with_fields(fields)
}

fn reason_code(group: usize) -> FieldSchema {
    let name: &'static str = match group {
        2 => "adjustment_reason_code_2",
        3 => "adjustment_reason_code_3",
        4 => "adjustment_reason_code_4",
        5 => "adjustment_reason_code_5",
        _ => "adjustment_reason_code_6",
    };
    FieldSchema::new(name, Id).max(12)
}

fn group_amount(group: usize) -> FieldSchema {
    let name: &'static str = match group {
        2 => "monetary_amount_2",
        3 => "monetary_amount_3",
        4 => "monetary_amount_4",
        5 => "monetary_amount_5",
        _ => "monetary_amount_6",
    };
    FieldSchema::new(name, Decimal)
}

fn group_quantity(group: usize) -> FieldSchema {
    let name: &'static str = match group {
        2 => "quantity_2",
        3 => "quantity_3",
        4 => "quantity_4",
        5 => "quantity_5",
        _ => "quantity_6",
    };
    FieldSchema::new(name, Decimal)
}

/// Institutional claim codes, e.g. `CL1*2*7*01~`
fn cl1() -> SegmentSchema {
    SegmentSchema::new("CL1").with_fields(vec![
        FieldSchema::new("admission_type_code", Id).max(1),
        FieldSchema::new("admission_source_code", Id).max(1),
        FieldSchema::new("patient_status_code", Id).max(2),
        FieldSchema::new("nursing_home_residential_status_code", Id).max(1),
    ])
}

/// Health claim, e.g. `CLM*26463774*100***11:B:1*Y*A*Y*I~`
fn clm() -> SegmentSchema {
    SegmentSchema::new("CLM").with_fields(vec![
        FieldSchema::new("patient_control_number", Text).required().length(1, 38),
        FieldSchema::new("total_claim_charge_amount", Decimal).required(),
        FieldSchema::new("claim_filing_indicator_code", Id).length(1, 2),
        FieldSchema::new("non_institutional_claim_type_code", Id).length(1, 2),
        FieldSchema::new("health_care_service_location_information", Text)
            .required()
            .composite(),
        FieldSchema::new("provider_or_supplier_signature_indicator", Id).max(1),
        FieldSchema::new("provider_accept_assignment_code", Id).required().codes(&["A", "B", "C"]),
        FieldSchema::new("benefit_assignment_certification_indicator", Id)
            .required()
            .codes(&["N", "W", "Y"]),
        FieldSchema::new("release_of_information_code", Id).required().codes(&["I", "Y"]),
        FieldSchema::new("patient_signature_source_code", Id).max(1),
        FieldSchema::new("related_causes_code", Text).composite(),
        FieldSchema::new("special_program_code", Id).max(3),
        FieldSchema::new("yes_no_condition_response_code_1", Id).max(1),
        FieldSchema::new("level_of_service_code", Id).max(3),
        FieldSchema::new("yes_no_condition_response_code_2", Id).max(1),
        FieldSchema::new("provider_agreement_code", Id).max(1),
        FieldSchema::new("claim_status_code", Id).max(2),
        FieldSchema::new("yes_no_condition_response_code_3", Id).max(1),
        FieldSchema::new("claim_submission_reason_code", Id).max(2),
        FieldSchema::new("delay_reason_code", Id).max(2),
    ])
}

/// Claim payment information, e.g. `CLP*7722337*1*211366.97*138018.40**12*119932404007801~`
fn clp() -> SegmentSchema {
    SegmentSchema::new("CLP").with_fields(vec![
        FieldSchema::new("patient_control_number", Text).required().length(1, 38),
        FieldSchema::new("claim_status_code", Id)
            .required()
            .codes(&["1", "2", "3", "4", "19", "20", "21", "22", "23", "25"]),
        FieldSchema::new("total_claim_charge_amount", Decimal).required(),
        FieldSchema::new("claim_payment_amount", Decimal).required(),
        FieldSchema::new("patient_responsibility_amount", Decimal),
        FieldSchema::new("claim_filing_indicator_code", Id).required().length(1, 2),
        FieldSchema::new("payer_claim_control_number", Text).max(50),
        FieldSchema::new("facility_type_code", Id).max(2),
        FieldSchema::new("claim_frequency_type_code", Id).max(1),
        FieldSchema::new("patient_status_code", Id).max(2),
        FieldSchema::new("drg_code", Id).max(4),
        FieldSchema::new("drg_weight", Decimal),
        FieldSchema::new("discharge_fraction", Decimal),
        FieldSchema::new("condition_response_code", Id).max(1),
    ])
}

/// Contract information, e.g. `CN1*02*550~`
fn cn1() -> SegmentSchema {
    SegmentSchema::new("CN1").with_fields(vec![
        FieldSchema::new("contract_type_code", Id).required().length(2, 2),
        FieldSchema::new("contract_amount", Decimal),
        FieldSchema::new("contract_percentage", Decimal),
        FieldSchema::new("contract_code", Text).max(50),
        FieldSchema::new("terms_discount_percentage", Decimal),
        FieldSchema::new("contract_version_identifier", Text).max(30),
    ])
}

/// Coordination of benefits, e.g. `COB*P*XYZ123*1~`
fn cob() -> SegmentSchema {
    SegmentSchema::new("COB").with_fields(vec![
        FieldSchema::new("payer_responsibility_sequence_code", Id)
            .required()
            .codes(&["P", "S", "T", "U"]),
        FieldSchema::new("group_policy_number", Text).length(1, 50),
        FieldSchema::new("coordination_of_benefits_code", Id).required().codes(&["1", "5", "6"]),
        FieldSchema::new("service_type_code", Id).codes(SERVICE_TYPE_CODES),
    ])
}

/// Conditions indicator, e.g. `CRC*E1*Y*L1~`
fn crc() -> SegmentSchema {
    SegmentSchema::new("CRC").with_fields(vec![
        FieldSchema::new("code_category", Id).required().length(2, 2),
        FieldSchema::new("certification_condition_indicator", Id).required().codes(&["N", "Y"]),
        FieldSchema::new("condition_code_1", Id).required().length(2, 3),
        FieldSchema::new("condition_code_2", Id).max(3),
        FieldSchema::new("condition_code_3", Id).max(3),
        FieldSchema::new("condition_code_4", Id).max(3),
        FieldSchema::new("condition_code_5", Id).max(3),
    ])
}

/// Currency, e.g. `CUR*85*USD~`
fn cur() -> SegmentSchema {
    SegmentSchema::new("CUR").with_fields(vec![
        FieldSchema::new("entity_identifier_code", Id).required().length(2, 3),
        FieldSchema::new("currency_code", Id).required().length(3, 3),
    ])
}

/// Demographic information, e.g. `DMG*D8*19430917*M~`
fn dmg() -> SegmentSchema {
    SegmentSchema::new("DMG")
        .with_fields(vec![
            FieldSchema::new("date_time_period_format_qualifier", Id).codes(&["D8"]),
            FieldSchema::new("date_time_period", Date),
            FieldSchema::new("gender_code", Id).codes(&["F", "M"]),
            FieldSchema::new("marital_status_code", Id).max(1),
            FieldSchema::new("race_or_ethnicity", Text).composite(),
            FieldSchema::new("citizenship_status_code", Id).max(2),
            FieldSchema::new("country_code", Id).max(3),
            FieldSchema::new("basis_of_verification_code", Id).max(2),
            FieldSchema::new("quantity", Decimal),
            FieldSchema::new("code_list_qualifier_code", Id).codes(&["REC"]),
            FieldSchema::new("race_or_ethnicity_code", Id).max(30),
        ])
        .check(checks::dmg_date_pair)
}

/// Disability information, e.g. `DSB*2******DX*585~`
fn dsb() -> SegmentSchema {
    SegmentSchema::new("DSB").with_fields(vec![
        FieldSchema::new("disability_type_code", Id).required().codes(&["1", "2", "3", "4"]),
        FieldSchema::new("quantity", Decimal),
        FieldSchema::new("occupation_code", Id).length(4, 6),
        FieldSchema::new("work_intensity_code", Id).max(1),
        FieldSchema::new("product_option_code", Id).length(1, 2),
        FieldSchema::new("monetary_amount", Decimal),
        FieldSchema::new("product_service_id_qualifier", Id).length(2, 2),
        FieldSchema::new("diagnosis_code", Id).length(1, 15),
    ])
}

/// Date reference, e.g. `DTM*405*20020317~`
fn dtm() -> SegmentSchema {
    SegmentSchema::new("DTM").with_fields(vec![
        FieldSchema::new("date_time_qualifier", Id).required().length(3, 3),
        FieldSchema::new("production_date", Date).required(),
    ])
}

/// Date or time period, e.g. `DTP*291*D8*20051015~`
fn dtp() -> SegmentSchema {
    SegmentSchema::new("DTP")
        .with_fields(vec![
            FieldSchema::new("date_time_qualifier", Id).required().length(3, 3),
            FieldSchema::new("date_time_period_format_qualifier", Id)
                .required()
                .codes(&["D8", "RD8"]),
            FieldSchema::new("date_time_period", Text).required().max(35),
        ])
        .check(checks::dtp_period_format)
}

/// Eligibility or benefit information, e.g. `EB*B**1^33^35*HM*GOLD 123 PLAN~`
fn eb() -> SegmentSchema {
    SegmentSchema::new("EB").with_fields(vec![
        FieldSchema::new("eligibility_benefit_information", Id).required().length(1, 2),
        FieldSchema::new("coverage_level_code", Id).length(3, 3),
        FieldSchema::new("service_type_code", Id).repeated().codes(SERVICE_TYPE_CODES),
        FieldSchema::new("insurance_type_code", Id).length(1, 3),
        FieldSchema::new("plan_coverage_description", Text).max(50),
        FieldSchema::new("time_period_qualifier", Id).length(1, 2),
        FieldSchema::new("benefit_amount", Decimal),
        FieldSchema::new("benefit_percent", Decimal),
        FieldSchema::new("quantity_qualifier", Id).length(2, 2),
        FieldSchema::new("quantity", Decimal),
        FieldSchema::new("authorization_certification_indicator", Id).codes(&["N", "U", "Y"]),
        FieldSchema::new("inplan_network_indicator", Id).codes(&["N", "U", "W", "Y"]),
        FieldSchema::new("procedure_identifier", Text).composite(),
        FieldSchema::new("diagnosis_code_pointer", Text).composite(),
    ])
}

/// Entity, e.g. `ENT*1~`
fn ent() -> SegmentSchema {
    SegmentSchema::new("ENT").with_fields(vec![
        FieldSchema::new("assigned_number", Integer).required().pattern("^[0-9]+$"),
        FieldSchema::new("entity_identifier_code", Id).length(2, 3),
        FieldSchema::new("identification_code_qualifier", Id).max(2),
        FieldSchema::new("identification_code", Text).max(80),
    ])
}

/// Eligibility inquiry, e.g. `EQ*98^34^44**FAM~`
fn eq() -> SegmentSchema {
    SegmentSchema::new("EQ")
        .with_fields(vec![
            FieldSchema::new("service_type_code", Id).repeated().codes(SERVICE_TYPE_CODES),
            FieldSchema::new("medical_procedure_id", Text).composite(),
            FieldSchema::new("coverage_level_code", Id).max(3),
            FieldSchema::new("insurance_type_code", Id).max(3),
            FieldSchema::new("diagnosis_code_pointer", Text).composite(),
        ])
        .check(checks::eq_inquiry_required)
}

/// Functional group trailer, e.g. `GE*1*1~`
fn ge() -> SegmentSchema {
    SegmentSchema::new("GE").with_fields(vec![
        FieldSchema::new("number_of_transaction_sets_included", Integer)
            .required()
            .pattern("^[0-9]+$"),
        FieldSchema::new("group_control_number", Text).required().length(1, 9),
    ])
}

/// Functional group header, e.g. `GS*HS*000000005*54321*20131031*1147*1*X*005010X279A1~`
fn gs() -> SegmentSchema {
    SegmentSchema::new("GS").with_fields(vec![
        FieldSchema::new("functional_identifier_code", Id).required().length(2, 2),
        FieldSchema::new("application_sender_code", Text).required().length(2, 15),
        FieldSchema::new("application_receiver_code", Text).required().length(2, 15),
        FieldSchema::new("functional_group_creation_date", Date).required(),
        FieldSchema::new("functional_group_creation_time", Time).required(),
        FieldSchema::new("group_control_number", Text).required().length(1, 9),
        FieldSchema::new("responsible_agency_code", Id).required().codes(&["X"]),
        FieldSchema::new("version_identifier_code", Id).required().length(1, 12),
    ])
}

/// Health care services review, e.g. `HCR*A1*12345~`
fn hcr() -> SegmentSchema {
    SegmentSchema::new("HCR").with_fields(vec![
        FieldSchema::new("action_code", Id).required().length(1, 2),
        FieldSchema::new("reference_identification", Text).max(50),
        FieldSchema::new("reject_reason_code", Id).max(2),
        FieldSchema::new("second_surgical_opinion_indicator", Id).codes(&["N", "Y"]),
    ])
}

/// Health coverage, e.g. `HD*021**HLT*PLAN A BCD*FAM~`
fn hd() -> SegmentSchema {
    SegmentSchema::new("HD").with_fields(vec![
        FieldSchema::new("maintenance_type_code", Id).required().length(3, 3),
        FieldSchema::new("maintenance_reason_code", Id).length(2, 3),
        FieldSchema::new("insurance_line_code", Id).required().length(2, 3),
        FieldSchema::new("plan_coverage_description", Text).length(1, 50),
        FieldSchema::new("coverage_line_code", Id).max(3),
        FieldSchema::new("count_1", Integer),
        FieldSchema::new("count_2", Integer),
        FieldSchema::new("underwriting_decision_code", Id).max(1),
        FieldSchema::new("late_enrollment_indicator", Id).codes(&["N", "Y"]),
        FieldSchema::new("drug_house_code", Id).length(2, 3),
        FieldSchema::new("yes_no_condition_response_code", Id).max(1),
    ])
}

/// Health care information codes, e.g. `HI*BK:8901*BF:87200~`
fn hi() -> SegmentSchema {
    let mut fields = vec![FieldSchema::new("health_care_code_1", Text).required().composite()];
    for name in [
        "health_care_code_2",
        "health_care_code_3",
        "health_care_code_4",
        "health_care_code_5",
        "health_care_code_6",
        "health_care_code_7",
        "health_care_code_8",
    ] {
        fields.push(FieldSchema::new(name, Text).composite());
    }
    SegmentSchema::new("HI").with_fields(fields)
}

/// Hierarchical level, e.g. `HL*3*2*22*1~`
fn hl() -> SegmentSchema {
    SegmentSchema::new("HL").with_fields(vec![
        FieldSchema::new("hierarchical_id_number", Text).required().length(1, 12),
        FieldSchema::new("hierarchical_parent_id_number", Text).length(1, 12),
        FieldSchema::new("hierarchical_level_code", Id).required().length(1, 2),
        FieldSchema::new("hierarchical_child_code", Id).length(1, 1).pattern("^0|1$"),
    ])
}

/// Health information, e.g. `HLH*X*74*210~`
fn hlh() -> SegmentSchema {
    SegmentSchema::new("HLH").with_fields(vec![
        FieldSchema::new("health_related_code", Id).required().codes(&["N", "S", "T", "U", "X"]),
        FieldSchema::new("member_height", Decimal),
        FieldSchema::new("member_weight", Decimal),
    ])
}

/// Health care services delivery, e.g. `HSD*VS*12*WK*3*34*1~`
fn hsd() -> SegmentSchema {
    SegmentSchema::new("HSD").with_fields(vec![
        FieldSchema::new("quantity_qualifier", Id).length(2, 2),
        FieldSchema::new("quantity", Decimal),
        FieldSchema::new("measurement_code", Id).length(2, 2),
        FieldSchema::new("sample_selection_modulus", Decimal),
        FieldSchema::new("time_period_qualifier", Id).length(1, 2),
        FieldSchema::new("period_count", Decimal),
        FieldSchema::new("delivery_frequency_code", Id).length(1, 1),
        FieldSchema::new("delivery_pattern_time_code", Id).length(1, 1),
    ])
}

/// Identification card, e.g. `IDC*12345*H~`
fn idc() -> SegmentSchema {
    SegmentSchema::new("IDC").with_fields(vec![
        FieldSchema::new("plan_coverage_description", Text).required().length(1, 50),
        FieldSchema::new("identification_card_type_code", Id).required().codes(&["D", "H", "P"]),
        FieldSchema::new("identification_card_count", Integer).pattern("^[0-9]+$"),
        FieldSchema::new("action_code", Id).max(2),
    ])
}

/// Interchange trailer, e.g. `IEA*1*000000907~`
fn iea() -> SegmentSchema {
    SegmentSchema::new("IEA").with_fields(vec![
        FieldSchema::new("number_of_included_functional_groups", Integer)
            .required()
            .pattern("^[0-9]+$"),
        FieldSchema::new("interchange_control_number", Text).required().length(9, 9),
    ])
}

/// Additional inquiry information, e.g. `III*ZZ*21~`
fn iii() -> SegmentSchema {
    SegmentSchema::new("III")
        .with_fields(vec![
            FieldSchema::new("code_list_qualifier_code", Id).codes(&["GR", "NI", "ZZ"]),
            FieldSchema::new("industry_code", Id).max(30),
            FieldSchema::new("code_category", Id).codes(&["44"]),
            FieldSchema::new("injured_body_part_name", Text).max(264),
        ])
        .check(checks::iii_industry_pair)
        .check(checks::iii_nature_of_injury)
}

/// Insured benefit, e.g. `INS*Y*18*021*28*A***FT~`
fn ins() -> SegmentSchema {
    SegmentSchema::new("INS")
        .with_fields(vec![
            FieldSchema::new("member_indicator", Id).required().codes(&["N", "Y"]),
            FieldSchema::new("individual_relationship_code", Id).required().length(2, 2),
            FieldSchema::new("maintenance_type_code", Id).length(3, 3),
            FieldSchema::new("maintenance_reason_code", Id).max(3),
            FieldSchema::new("benefit_status_code", Id).max(1),
            FieldSchema::new("medicare_status_code", Text).composite(),
            FieldSchema::new("cobra_qualifying_event_code", Id).max(2),
            FieldSchema::new("employment_status_code", Id).max(2),
            FieldSchema::new("student_status_code", Id).max(1),
            FieldSchema::new("handicap_indicator", Id).codes(&["N", "Y"]),
            FieldSchema::new("date_time_period_format_qualifier", Id).max(3),
            FieldSchema::new("member_death_date", Date),
            FieldSchema::new("confidentiality_code", Id).max(1),
            FieldSchema::new("city_name", Text).max(30),
            FieldSchema::new("state_province_code", Id).max(2),
            FieldSchema::new("country_code", Id).max(3),
            FieldSchema::new("birth_sequence_number", Integer),
        ])
        .check(checks::ins_death_date_pair)
}

/// Interchange header; fixed-width on the wire.
fn isa() -> SegmentSchema {
    SegmentSchema::new("ISA").with_fields(vec![
        FieldSchema::new("authorization_information_qualifier", Id).required().length(2, 2),
        FieldSchema::new("authorization_information", Text).required().length(10, 10),
        FieldSchema::new("security_information_qualifier", Id).required().length(2, 2),
        FieldSchema::new("security_information", Text).required().length(10, 10),
        FieldSchema::new("interchange_sender_qualifier", Id).required().length(2, 2),
        FieldSchema::new("interchange_sender_id", Text).required().length(15, 15),
        FieldSchema::new("interchange_receiver_qualifier", Id).required().length(2, 2),
        FieldSchema::new("interchange_receiver_id", Text).required().length(15, 15),
        FieldSchema::new("interchange_date", Date).required(),
        FieldSchema::new("interchange_time", Time).required(),
        FieldSchema::new("repetition_separator", Text).required().length(1, 1),
        FieldSchema::new("interchange_control_version_number", Id).required().length(5, 5),
        FieldSchema::new("interchange_control_number", Text).required().length(9, 9),
        FieldSchema::new("acknowledgment_requested", Id).required().length(1, 1),
        FieldSchema::new("interchange_usage_indicator", Id).required().codes(&["I", "P", "T"]),
        FieldSchema::new("component_element_separator", Text).required().length(1, 1),
    ])
}

/// Supplemental fixed-format data, e.g. `K3*STATE DATA REQUIREMENT~`
fn k3() -> SegmentSchema {
    SegmentSchema::new("K3").with_fields(vec![
        FieldSchema::new("fixed_format_information", Text).required().length(1, 80),
        FieldSchema::new("record_format_code", Id).max(2),
        FieldSchema::new("composite_unit_of_measurement", Text).composite(),
    ])
}

/// Loop trailer, e.g. `LE*2120~`
fn le() -> SegmentSchema {
    SegmentSchema::new("LE").with_fields(vec![
        FieldSchema::new("loop_id_code", Id).required().length(1, 4),
    ])
}

/// Drug identification, e.g. `LIN**N4*01234567891~`
fn lin() -> SegmentSchema {
    SegmentSchema::new("LIN").with_fields(vec![
        FieldSchema::new("assigned_identification", Text).max(20),
        FieldSchema::new("product_service_id_qualifier", Id).required().codes(&["EN", "N4", "UP"]),
        FieldSchema::new("national_drug_code_universal_product_number", Text)
            .required()
            .length(1, 48),
    ])
}

/// Form identification code, e.g. `LQ*UT*1.02~`
fn lq() -> SegmentSchema {
    SegmentSchema::new("LQ").with_fields(vec![
        FieldSchema::new("code_list_qualifier_code", Id).required().length(1, 3),
        FieldSchema::new("form_identifier", Text).required().length(1, 30),
    ])
}

/// Loop header, e.g. `LS*2120~`
fn ls() -> SegmentSchema {
    SegmentSchema::new("LS").with_fields(vec![
        FieldSchema::new("loop_id_code", Id).required().length(1, 4),
    ])
}

/// Transaction set line number, e.g. `LX*1~`
fn lx() -> SegmentSchema {
    SegmentSchema::new("LX").with_fields(vec![
        FieldSchema::new("assigned_number", Integer).required().pattern("^[0-9]+$"),
    ])
}

/// Inpatient adjudication information, e.g. `MIA*0***138018.40~`
fn mia() -> SegmentSchema {
    SegmentSchema::new("MIA").with_fields(vec![
        FieldSchema::new("covered_days_visit_count", Integer).required(),
        FieldSchema::new("pps_operating_outlier_amount", Decimal),
        FieldSchema::new("lifetime_psychiatric_days_count", Decimal),
        FieldSchema::new("claim_drg_amount", Decimal),
        FieldSchema::new("claim_payment_remark_code", Text).max(20),
        FieldSchema::new("claim_disproportionate_share_amount", Decimal),
        FieldSchema::new("claim_msp_passthrough_amount", Decimal),
        FieldSchema::new("claim_pps_capital_amount", Decimal),
        FieldSchema::new("pps_capital_fsp_drg_amount", Decimal),
        FieldSchema::new("pps_capital_hsp_drg_amount", Decimal),
        FieldSchema::new("pps_capital_dsh_drg_amount", Decimal),
        FieldSchema::new("old_capital_amount", Decimal),
        FieldSchema::new("pps_capital_ime_amount", Decimal),
        FieldSchema::new("pps_operating_hospital_specific_drg_amount", Decimal),
        FieldSchema::new("cost_report_day_count", Decimal),
        FieldSchema::new("pps_operating_federal_specific_drg_amount", Decimal),
        FieldSchema::new("claim_pps_capital_outlier_amount", Decimal),
        FieldSchema::new("claim_indirect_teaching_amount", Decimal),
        FieldSchema::new("nonpayable_professional_component_amount", Decimal),
        FieldSchema::new("claim_payment_remark_code_1", Text).max(50),
        FieldSchema::new("claim_payment_remark_code_2", Text).max(50),
        FieldSchema::new("claim_payment_remark_code_3", Text).max(50),
        FieldSchema::new("claim_payment_remark_code_4", Text).max(50),
        FieldSchema::new("pps_capital_exception_amount", Decimal),
    ])
}

/// Outpatient adjudication information, e.g. `MOA***A4~`
fn moa() -> SegmentSchema {
    SegmentSchema::new("MOA").with_fields(vec![
        FieldSchema::new("reimbursement_rate", Decimal),
        FieldSchema::new("hcpcs_payable_amount", Decimal),
        FieldSchema::new("claim_payment_remark_code_1", Text).max(50),
        FieldSchema::new("claim_payment_remark_code_2", Text).max(50),
        FieldSchema::new("claim_payment_remark_code_3", Text).max(50),
        FieldSchema::new("claim_payment_remark_code_4", Text).max(50),
        FieldSchema::new("claim_payment_remark_code_5", Text).max(50),
        FieldSchema::new("end_stage_renal_disease_payment_amount", Decimal),
        FieldSchema::new("nonpayable_professional_component_billable_amount", Decimal),
    ])
}

/// Military personnel information.
fn mpi() -> SegmentSchema {
    SegmentSchema::new("MPI").with_fields(vec![
        FieldSchema::new("information_status_code", Id).required().length(1, 1),
        FieldSchema::new("employment_status_code", Id).required().length(2, 2),
        FieldSchema::new("government_services_affiliation_code", Id).required().length(1, 1),
        FieldSchema::new("description", Text).max(80),
        FieldSchema::new("military_service_rank_code", Id).length(2, 2),
        FieldSchema::new("date_time_period_format_qualifier", Id).codes(&["D8", "RD8"]),
        FieldSchema::new("date_time_period", Text).max(35),
    ])
}

/// Message text, e.g. `MSG*PLAN LIMITATIONS APPLY~`
fn msg() -> SegmentSchema {
    SegmentSchema::new("MSG").with_fields(vec![
        FieldSchema::new("free_form_text", Text).required().length(1, 264),
    ])
}

/// Party identification, e.g. `N1*PR*PAYER NAME*PI*12345~`
fn n1() -> SegmentSchema {
    SegmentSchema::new("N1").with_fields(vec![
        FieldSchema::new("entity_identifier_code", Id).required().length(2, 3),
        FieldSchema::new("name", Text).required().length(1, 60),
        FieldSchema::new("identification_code_qualifier", Id).length(1, 2),
        FieldSchema::new("identification_code", Text).length(2, 80),
    ])
}

/// Party location, e.g. `N3*201 PARK AVENUE*SUITE 300~`
fn n3() -> SegmentSchema {
    SegmentSchema::new("N3").with_fields(vec![
        FieldSchema::new("address_information_1", Text).required().length(1, 55),
        FieldSchema::new("address_information_2", Text).max(55),
    ])
}

/// Geographic location, e.g. `N4*KANSAS CITY*MO*64108~`
fn n4() -> SegmentSchema {
    SegmentSchema::new("N4")
        .with_fields(vec![
            FieldSchema::new("city_name", Text).required().length(2, 30),
            FieldSchema::new("state_province_code", Id).max(2),
            FieldSchema::new("postal_code", Id).max(15),
            FieldSchema::new("country_code", Id).max(3),
            FieldSchema::new("location_qualifier", Id).max(2),
            FieldSchema::new("location_identifier", Text).max(30),
            FieldSchema::new("country_subdivision_code", Id).max(3),
        ])
        .check(checks::n4_state_subdivision_exclusive)
}

/// Entity name, e.g. `NM1*PR*2*PAYER C*****PI*12345~`
fn nm1() -> SegmentSchema {
    SegmentSchema::new("NM1")
        .with_fields(vec![
            FieldSchema::new("entity_identifier_code", Id).required().length(2, 3),
            FieldSchema::new("entity_type_qualifier", Id).required().codes(&["1", "2"]),
            FieldSchema::new("name_last_or_organization_name", Text).required().length(1, 60),
            FieldSchema::new("name_first", Text).max(35),
            FieldSchema::new("name_middle", Text).max(25),
            FieldSchema::new("name_prefix", Text).max(10),
            FieldSchema::new("name_suffix", Text).max(10),
            FieldSchema::new("identification_code_qualifier", Id).max(2),
            FieldSchema::new("identification_code", Text).max(80),
            FieldSchema::new("entity_relationship_code", Id).max(2),
        ])
        .check(checks::nm1_identification_pair)
        .check(checks::nm1_entity_name_usage)
}

/// Note, e.g. `NTE*ADD*SURGERY WAS UNUSUALLY LONG~`
fn nte() -> SegmentSchema {
    SegmentSchema::new("NTE").with_fields(vec![
        FieldSchema::new("note_reference_code", Id).required().length(3, 3),
        FieldSchema::new("description", Text).required().length(1, 80),
    ])
}

/// Other insurance information, e.g. `OI***Y*B**Y~`
fn oi() -> SegmentSchema {
    SegmentSchema::new("OI").with_fields(vec![
        FieldSchema::new("claim_filing_indicator_code", Id).max(2),
        FieldSchema::new("claim_submission_reason_code", Id).max(2),
        FieldSchema::new("benefits_assignment_certification", Id).required().codes(&["N", "W", "Y"]),
        FieldSchema::new("patient_signature_source_code", Id).codes(&["P"]),
        FieldSchema::new("provider_agreement_code", Id).max(1),
        FieldSchema::new("release_of_information_code", Id).required().codes(&["I", "Y"]),
    ])
}

/// Patient information, e.g. `PAT******01*146~`
fn pat() -> SegmentSchema {
    SegmentSchema::new("PAT").with_fields(vec![
        FieldSchema::new("individual_relationship_code", Id).max(2),
        FieldSchema::new("patient_location_code", Id).max(1),
        FieldSchema::new("employment_status_code", Id).max(2),
        FieldSchema::new("student_status_code", Id).max(1),
        FieldSchema::new("date_time_period_format_qualifier", Id).codes(&["D8"]),
        FieldSchema::new("patient_death_date", Date),
        FieldSchema::new("unit_basis_measurement_code", Id).codes(&["01"]),
        FieldSchema::new("patient_weight", Decimal),
        FieldSchema::new("pregnancy_indicator", Id).codes(&["Y"]),
    ])
}

/// Contact information, e.g. `PER*IC*JOHN SMITH*TE*5551114444*EX*123~`
fn per() -> SegmentSchema {
    SegmentSchema::new("PER")
        .with_fields(vec![
            FieldSchema::new("contact_function_code", Id).required().codes(&["IC"]),
            FieldSchema::new("name", Text).max(60),
            FieldSchema::new("communication_number_qualifier_1", Id).max(2),
            FieldSchema::new("communication_number_1", Text).max(256),
            FieldSchema::new("communication_number_qualifier_2", Id).max(2),
            FieldSchema::new("communication_number_2", Text).max(256),
            FieldSchema::new("communication_number_qualifier_3", Id).max(2),
            FieldSchema::new("communication_number_3", Text).max(256),
        ])
        .check(checks::per_communication_pairs)
}

/// Place or location, e.g. `PLA*2*1P*19970628**AI~`
fn pla() -> SegmentSchema {
    SegmentSchema::new("PLA").with_fields(vec![
        FieldSchema::new("action_code", Id).required().length(1, 2),
        FieldSchema::new("entity_identifier_code", Id).required().length(2, 3),
        FieldSchema::new("date", Date).required(),
        FieldSchema::new("time", Time),
        FieldSchema::new("maintenance_reason_code", Id).required().length(2, 3),
    ])
}

/// Provider level adjustment, e.g. `PLB*1234567890*20000930*CV:9876514*-1.27~`
fn plb() -> SegmentSchema {
    SegmentSchema::new("PLB").with_fields(vec![
        FieldSchema::new("provider_identifier", Text).required().length(1, 50),
        FieldSchema::new("fiscal_period_date", Date).required(),
        FieldSchema::new("adjustment_reason_code_1", Text).required().composite(),
        FieldSchema::new("provider_adjustment_amount_1", Decimal).required(),
        FieldSchema::new("adjustment_reason_code_2", Text).composite(),
        FieldSchema::new("provider_adjustment_amount_2", Decimal),
        FieldSchema::new("adjustment_reason_code_3", Text).composite(),
        FieldSchema::new("provider_adjustment_amount_3", Decimal),
        FieldSchema::new("adjustment_reason_code_4", Text).composite(),
        FieldSchema::new("provider_adjustment_amount_4", Decimal),
        FieldSchema::new("adjustment_reason_code_5", Text).composite(),
        FieldSchema::new("provider_adjustment_amount_5", Decimal),
        FieldSchema::new("adjustment_reason_code_6", Text).composite(),
        FieldSchema::new("provider_adjustment_amount_6", Decimal),
    ])
}

/// Provider information, e.g. `PRV*RF*PXC*207Q00000X~`
fn prv() -> SegmentSchema {
    SegmentSchema::new("PRV")
        .with_fields(vec![
            FieldSchema::new("provider_code", Id).required().length(1, 3),
            FieldSchema::new("reference_identification_qualifier", Id).max(3),
            FieldSchema::new("reference_identification", Text).max(50),
        ])
        .check(checks::prv_reference_pair)
}

/// Paperwork, e.g. `PWK*OZ*BM***AC*DMN0012~`
fn pwk() -> SegmentSchema {
    SegmentSchema::new("PWK").with_fields(vec![
        FieldSchema::new("report_type_code", Id).required().length(2, 2),
        FieldSchema::new("report_transmission_code", Id).required().length(1, 2),
        FieldSchema::new("report_copies_needed", Integer),
        FieldSchema::new("entity_identifier_code", Id).max(3),
        FieldSchema::new("identification_code_qualifier", Id).max(2),
        FieldSchema::new("identification_code", Text).max(80),
        FieldSchema::new("description", Text).max(80),
        FieldSchema::new("actions_indicated", Text).composite(),
        FieldSchema::new("request_category_code", Id).max(2),
    ])
}

/// Quantity information, e.g. `QTY*PT*2.00~`
fn qty() -> SegmentSchema {
    SegmentSchema::new("QTY").with_fields(vec![
        FieldSchema::new("quantity_qualifier", Id).required().length(2, 2),
        FieldSchema::new("quantity", Decimal).required(),
        FieldSchema::new("composite_unit_of_measure", Text).composite(),
        FieldSchema::new("free_form_message", Text).max(30),
    ])
}

/// Remittance delivery method.
fn rdm() -> SegmentSchema {
    SegmentSchema::new("RDM").with_fields(vec![
        FieldSchema::new("report_transmission_code", Id).required().length(1, 2),
        FieldSchema::new("name", Text).max(60),
        FieldSchema::new("communication_number", Text).max(256),
    ])
}

/// Reference identification, e.g. `REF*EO*477563928~`
fn ref_() -> SegmentSchema {
    SegmentSchema::new("REF").with_fields(vec![
        FieldSchema::new("reference_identification_qualifier", Id).required().length(2, 3),
        FieldSchema::new("reference_identification", Text).required().length(1, 50),
        FieldSchema::new("description", Text).max(80),
    ])
}

/// Remittance advice accounts receivable, e.g. `RMR*IK*INV123**100~`
fn rmr() -> SegmentSchema {
    SegmentSchema::new("RMR").with_fields(vec![
        FieldSchema::new("reference_identification_qualifier", Id).required().length(2, 3),
        FieldSchema::new("reference_identification", Text).required().length(1, 50),
        FieldSchema::new("payment_action_code", Id).max(2),
        FieldSchema::new("detail_premium_payment_amount", Decimal),
        FieldSchema::new("detail_premium_billed_amount", Decimal),
        FieldSchema::new("discount_amount", Decimal),
    ])
}

/// Subscriber information, e.g. `SBR*P**2222-SJ******CI~`
fn sbr() -> SegmentSchema {
    SegmentSchema::new("SBR").with_fields(vec![
        FieldSchema::new("payer_responsibility_code", Id).required().length(1, 1),
        FieldSchema::new("individual_relationship_code", Id).max(2),
        FieldSchema::new("group_policy_number", Text).max(50),
        FieldSchema::new("group_name", Text).max(60),
        FieldSchema::new("insurance_type_code", Id).max(3),
        FieldSchema::new("coordination_of_benefits_code", Id).max(1),
        FieldSchema::new("condition_response_code", Id).max(1),
        FieldSchema::new("employment_status_code", Id).max(2),
        FieldSchema::new("claim_filing_indicator_code", Id).required().length(1, 2),
    ])
}

/// Transaction set trailer, e.g. `SE*17*0001~`
fn se() -> SegmentSchema {
    SegmentSchema::new("SE").with_fields(vec![
        FieldSchema::new("transaction_segment_count", Integer).required().pattern("^[0-9]+$"),
        FieldSchema::new("transaction_set_control_number", Text).required().length(4, 9),
    ])
}

/// Transaction set header, e.g. `ST*270*0001*005010X279A1~`
fn st() -> SegmentSchema {
    SegmentSchema::new("ST").with_fields(vec![
        FieldSchema::new("transaction_set_identifier_code", Id).required().length(3, 3),
        FieldSchema::new("transaction_set_control_number", Text).required().length(4, 9),
        FieldSchema::new("implementation_convention_reference", Id).required().length(1, 35),
    ])
}

/// Status information, e.g. `STC*E0:24:41*20050830~`
fn stc() -> SegmentSchema {
    SegmentSchema::new("STC").with_fields(vec![
        FieldSchema::new("health_care_claim_status_1", Text).required().composite(),
        FieldSchema::new("status_effective_date", Date).required(),
        FieldSchema::new("action_code", Id).max(2),
        FieldSchema::new("total_claim_charge_amount", Decimal),
        FieldSchema::new("claim_payment_amount", Decimal),
        FieldSchema::new("adjudication_finalized_date", Date),
        FieldSchema::new("payment_method_code", Id).max(3),
        FieldSchema::new("remittance_date", Date),
        FieldSchema::new("remittance_trace_number", Text).max(16),
        FieldSchema::new("health_care_claim_status_2", Text).composite(),
        FieldSchema::new("health_care_claim_status_3", Text).composite(),
        FieldSchema::new("free_form_message_text", Text).max(264),
    ])
}

/// Professional service, e.g. `SV1*HC:99213*40*UN*1.0***1~`
fn sv1() -> SegmentSchema {
    SegmentSchema::new("SV1").with_fields(vec![
        FieldSchema::new("product_service_id_qualifier", Text).required().composite(),
        FieldSchema::new("line_item_charge_amount", Decimal).required(),
        FieldSchema::new("unit_basis_measurement_code", Id).required().codes(&["MJ", "UN"]),
        FieldSchema::new("service_unit_count", Decimal).required(),
        FieldSchema::new("place_of_service_code", Id).max(2),
        FieldSchema::new("service_type_code", Id).max(2),
        FieldSchema::new("composite_diagnosis_code_pointer", Text).required().composite(),
        FieldSchema::new("monetary_amount", Decimal),
        FieldSchema::new("emergency_indicator", Id).codes(&["Y"]),
        FieldSchema::new("multiple_procedure_code", Id).max(2),
        FieldSchema::new("epsdt_indicator", Id).codes(&["Y"]),
        FieldSchema::new("family_planning_indicator", Id).codes(&["Y"]),
        FieldSchema::new("review_code", Id).max(2),
        FieldSchema::new("national_local_assigned_review_value", Id).max(2),
        FieldSchema::new("copay_status_code", Id).codes(&["0"]),
        FieldSchema::new("health_care_professional_shortage_area_code", Id).max(1),
        FieldSchema::new("reference_identification", Text).max(50),
        FieldSchema::new("postal_code", Id).max(15),
        FieldSchema::new("monetary_amount_2", Decimal),
        FieldSchema::new("level_of_care_code", Id).max(1),
        FieldSchema::new("provider_agreement_code", Id).max(1),
    ])
}

/// Institutional service, e.g. `SV2*0120**1500*DA*5~`
fn sv2() -> SegmentSchema {
    SegmentSchema::new("SV2").with_fields(vec![
        FieldSchema::new("service_line_revenue_code", Id).required().length(1, 48),
        FieldSchema::new("composite_medical_procedure_identifier", Text).composite(),
        FieldSchema::new("line_item_charge_amount", Decimal).required(),
        FieldSchema::new("measurement_code", Id).required().codes(&["DA", "UN"]),
        FieldSchema::new("service_unit_count", Decimal).required(),
        FieldSchema::new("unit_rate", Decimal),
        FieldSchema::new("non_covered_charge_amount", Decimal),
        FieldSchema::new("condition_response_code", Id).max(1),
        FieldSchema::new("nursing_home_residential_status_code", Id).max(1),
        FieldSchema::new("level_of_care_code", Id).max(1),
    ])
}

/// Dental service, e.g. `SV3*AD:D2150*125**JP:1:2~`
fn sv3() -> SegmentSchema {
    SegmentSchema::new("SV3").with_fields(vec![
        FieldSchema::new("composite_medical_procedure_identifier", Text).required().composite(),
        FieldSchema::new("line_item_charge_amount", Decimal).required(),
        FieldSchema::new("place_of_service_code", Id).max(2),
        FieldSchema::new("composite_oral_cavity_designation", Text).composite(),
        FieldSchema::new("prosthesis_crown_inlay_code", Id).max(1),
        FieldSchema::new("procedure_count", Decimal),
    ])
}

/// Service payment information, e.g. `SVC*HC:99214*100.00*80.00~`
fn svc() -> SegmentSchema {
    SegmentSchema::new("SVC").with_fields(vec![
        FieldSchema::new("composite_medical_procedure_identifier_1", Text)
            .required()
            .composite(),
        FieldSchema::new("line_item_charge_amount", Decimal).required(),
        FieldSchema::new("line_item_provider_payment_amount", Decimal).required(),
        FieldSchema::new("revenue_code", Id).max(48),
        FieldSchema::new("units_of_service_paid_count", Decimal),
        FieldSchema::new("composite_medical_procedure_identifier_2", Text).composite(),
        FieldSchema::new("original_units_of_service_count", Decimal),
    ])
}

/// Service line adjudication, e.g. `SVD*43*55.00*HC:84550**3.00~`
fn svd() -> SegmentSchema {
    SegmentSchema::new("SVD").with_fields(vec![
        FieldSchema::new("other_payer_primary_identifier", Text).required().length(2, 80),
        FieldSchema::new("service_line_paid_amount", Decimal).required(),
        FieldSchema::new("composite_medical_procedure_identifier", Text).composite(),
        FieldSchema::new("product_service_id", Text).max(48),
        FieldSchema::new("paid_service_count", Decimal).required(),
        FieldSchema::new("bundled_unbundled_line_number", Integer).pattern("^[0-9]+$"),
    ])
}

/// Tooth information, e.g. `TOO*JP*19*M:O~`
fn too() -> SegmentSchema {
    SegmentSchema::new("TOO").with_fields(vec![
        FieldSchema::new("code_list_qualifier_code", Id).codes(&["JP"]),
        FieldSchema::new("tooth_code", Id).max(30),
        FieldSchema::new("tooth_surface_code", Text).composite(),
    ])
}

/// Trace number, e.g. `TRN*1*98175-012547*8877281234*RADIOLOGY~`
fn trn() -> SegmentSchema {
    SegmentSchema::new("TRN").with_fields(vec![
        FieldSchema::new("trace_type_code", Id).required().length(1, 2),
        FieldSchema::new("reference_identification_1", Text).required().length(1, 50),
        FieldSchema::new("originating_company_identifier", Text).length(10, 10),
        FieldSchema::new("reference_identification_2", Text).max(50),
    ])
}

/// Provider supplemental summary, e.g. `TS2*59786.00*55375.77~`
fn ts2() -> SegmentSchema {
    SegmentSchema::new("TS2").with_fields(vec![
        FieldSchema::new("total_drg_amount", Decimal),
        FieldSchema::new("total_federal_specific_amount", Decimal),
        FieldSchema::new("total_hospital_specific_amount", Decimal),
        FieldSchema::new("total_disproportionate_share_amount", Decimal),
        FieldSchema::new("total_capital_amount", Decimal),
        FieldSchema::new("total_indirect_medical_education_amount", Decimal),
        FieldSchema::new("total_outlier_day_count", Decimal),
        FieldSchema::new("total_day_outlier_amount", Decimal),
        FieldSchema::new("total_cost_outlier_amount", Decimal),
        FieldSchema::new("average_drg_length_of_stay", Decimal),
        FieldSchema::new("total_discharge_count", Decimal),
        FieldSchema::new("total_cost_report_day_count", Decimal),
        FieldSchema::new("total_covered_day_count", Decimal),
        FieldSchema::new("total_noncovered_day_count", Decimal),
        FieldSchema::new("total_msp_passthrough_amount", Decimal),
        FieldSchema::new("average_drg_weight", Decimal),
        FieldSchema::new("total_pps_capital_fsp_drg_amount", Decimal),
        FieldSchema::new("total_pps_capital_hsp_drg_amount", Decimal),
        FieldSchema::new("total_pps_dsh_drg_amount", Decimal),
    ])
}

/// Provider summary information, e.g. `TS3*123456*11*20021031*10*130957.66~`
fn ts3() -> SegmentSchema {
    SegmentSchema::new("TS3").with_fields(vec![
        FieldSchema::new("provider_identifier", Text).required().length(1, 50),
        FieldSchema::new("facility_type_code", Id).required().length(1, 2),
        FieldSchema::new("fiscal_period_date", Date).required(),
        FieldSchema::new("total_claim_count", Integer).required().pattern("^[0-9]+$"),
        FieldSchema::new("total_claim_charge_amount", Decimal).required(),
        FieldSchema::new("monetary_amount_1", Decimal),
        FieldSchema::new("monetary_amount_2", Decimal),
        FieldSchema::new("monetary_amount_3", Decimal),
        FieldSchema::new("monetary_amount_4", Decimal),
        FieldSchema::new("monetary_amount_5", Decimal),
        FieldSchema::new("monetary_amount_6", Decimal),
        FieldSchema::new("monetary_amount_7", Decimal),
        FieldSchema::new("total_msp_payer_amount", Decimal),
        FieldSchema::new("monetary_amount_8", Decimal),
        FieldSchema::new("total_non_lab_charge_amount", Decimal),
        FieldSchema::new("monetary_amount_9", Decimal),
        FieldSchema::new("total_hcpcs_reported_charge_amount", Decimal),
        FieldSchema::new("total_hcpcs_payable_amount", Decimal),
        FieldSchema::new("monetary_amount_10", Decimal),
        FieldSchema::new("total_professional_component_amount", Decimal),
        FieldSchema::new("total_msp_patient_liability_met_amount", Decimal),
        FieldSchema::new("total_patient_reimbursement_amount", Decimal),
        FieldSchema::new("total_pip_claim_count", Decimal),
        FieldSchema::new("total_pip_adjustment_amount", Decimal),
    ])
}

/// Health care services review information, e.g. `UM*HS*I*2*21:B~`
fn um() -> SegmentSchema {
    SegmentSchema::new("UM").with_fields(vec![
        FieldSchema::new("request_category_code", Id).required().length(1, 2),
        FieldSchema::new("certification_type_code", Id).max(1),
        FieldSchema::new("service_type_code", Id).codes(SERVICE_TYPE_CODES),
        FieldSchema::new("health_care_service_location_information", Text).composite(),
        FieldSchema::new("related_causes_information", Text).composite(),
        FieldSchema::new("level_of_service_code", Id).max(3),
        FieldSchema::new("current_health_condition_code", Id).max(1),
        FieldSchema::new("prognosis_code", Id).max(1),
        FieldSchema::new("release_of_information_code", Id).max(1),
        FieldSchema::new("delay_reason_code", Id).max(2),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contains_control_segments() {
        let map = base_segments();
        for id in ["ISA", "GS", "ST", "SE", "GE", "IEA"] {
            assert!(map.contains_key(id), "missing control segment {id}");
        }
    }

    #[test]
    fn test_nm1_layout() {
        let map = base_segments();
        let nm1 = &map["NM1"];
        assert_eq!(nm1.field_index("entity_type_qualifier"), Some(2));
        assert_eq!(nm1.field_index("identification_code"), Some(9));
        assert_eq!(nm1.checks.len(), 2);
    }

    #[test]
    fn test_hl_child_code_pattern() {
        let map = base_segments();
        let child = map["HL"].field("hierarchical_child_code").unwrap();
        let pattern = child.pattern.as_ref().unwrap();
        assert!(pattern.is_match("0"));
        assert!(pattern.is_match("1"));
        assert!(!pattern.is_match("2"));
    }

    #[test]
    fn test_eq_service_type_is_repeated() {
        let map = base_segments();
        let service = map["EQ"].field("service_type_code").unwrap();
        assert!(service.repeated);
        assert!(service.codes.as_ref().unwrap().contains(&"30"));
    }

    #[test]
    fn test_isa_field_count() {
        let map = base_segments();
        // identifier plus 16 data elements
        assert_eq!(map["ISA"].fields.len(), 17);
    }
}
