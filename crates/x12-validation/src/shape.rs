//! Field shape validation and typed coercion.
//!
//! Each field is checked against its schema (length bounds, pattern, code
//! table) and coerced into the declared semantic type. The raw wire text is
//! never modified; coercion fills the field's typed value.

use x12_ir::{Delimiters, FieldValue, TypedValue};
use x12_schema::{FieldSchema, FieldType};

/// Validate one field against its schema and coerce its typed value.
///
/// Returns shape findings; an empty wire value is only a finding when the
/// field is required.
pub fn bind_field(
    field: &mut FieldValue,
    schema: &FieldSchema,
    delimiters: Delimiters,
) -> Vec<String> {
    let mut findings = Vec::new();
    let raw = field.raw.clone();

    if raw.is_empty() {
        if schema.required {
            findings.push(format!("{} is required", schema.name));
        }
        field.typed = TypedValue::Empty;
        return findings;
    }

    // composite values are preserved verbatim; the component separator is
    // not interpreted here
    if schema.composite {
        field.typed = TypedValue::Text(raw);
        return findings;
    }

    if schema.repeated {
        for part in raw.split(delimiters.repetition) {
            check_constraints(part, schema, &mut findings);
        }
        field.typed = TypedValue::Text(raw);
        return findings;
    }

    check_constraints(&raw, schema, &mut findings);
    field.typed = coerce(&raw, schema, &mut findings);
    findings
}

fn check_constraints(value: &str, schema: &FieldSchema, findings: &mut Vec<String>) {
    let length = value.len();
    if let Some(min) = schema.min_length {
        if length < min {
            findings.push(format!(
                "{} length {length} is less than minimum {min}",
                schema.name
            ));
        }
    }
    if let Some(max) = schema.max_length {
        if length > max {
            findings.push(format!(
                "{} length {length} exceeds maximum {max}",
                schema.name
            ));
        }
    }

    if let Some(pattern) = &schema.pattern {
        if !pattern.is_match(value) {
            findings.push(format!(
                "{} value '{value}' does not match pattern '{pattern}'",
                schema.name
            ));
        }
    }

    if let Some(codes) = &schema.codes {
        if !codes.iter().any(|code| code.eq_ignore_ascii_case(value)) {
            findings.push(format!(
                "{} value '{value}' is not an allowed code",
                schema.name
            ));
        }
    }
}

fn coerce(raw: &str, schema: &FieldSchema, findings: &mut Vec<String>) -> TypedValue {
    match schema.field_type {
        FieldType::Id => TypedValue::Identifier(raw.to_string()),
        FieldType::Text => TypedValue::Text(raw.to_string()),
        FieldType::Binary => TypedValue::Binary(raw.as_bytes().to_vec()),
        FieldType::Integer => match raw.parse::<i64>() {
            Ok(value) => TypedValue::Integer(value),
            Err(_) => {
                findings.push(format!("{} value '{raw}' is not a valid integer", schema.name));
                TypedValue::Text(raw.to_string())
            }
        },
        FieldType::Decimal => {
            if is_x12_decimal(raw) {
                match raw.parse::<f64>() {
                    Ok(value) => TypedValue::Decimal(value),
                    Err(_) => {
                        findings
                            .push(format!("{} value '{raw}' is not a valid decimal", schema.name));
                        TypedValue::Text(raw.to_string())
                    }
                }
            } else {
                findings.push(format!("{} value '{raw}' is not a valid decimal", schema.name));
                TypedValue::Text(raw.to_string())
            }
        }
        FieldType::Date => {
            if is_x12_date(raw) {
                TypedValue::Date(raw.to_string())
            } else {
                findings.push(format!(
                    "{} value '{raw}' is not a valid date (YYYYMMDD or YYMMDD)",
                    schema.name
                ));
                TypedValue::Text(raw.to_string())
            }
        }
        FieldType::Time => {
            if is_x12_time(raw) {
                TypedValue::Time(raw.to_string())
            } else {
                findings.push(format!(
                    "{} value '{raw}' is not a valid time (HHMM with optional seconds)",
                    schema.name
                ));
                TypedValue::Text(raw.to_string())
            }
        }
    }
}

/// X12 decimal: optional sign, digits with at most one decimal point.
fn is_x12_decimal(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() {
        return false;
    }
    let mut seen_point = false;
    let mut seen_digit = false;
    for ch in digits.chars() {
        match ch {
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => return false,
        }
    }
    seen_digit
}

/// X12 date: YYYYMMDD or the interchange header's YYMMDD.
fn is_x12_date(value: &str) -> bool {
    if !(value.len() == 8 || value.len() == 6) || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let (month, day) = if value.len() == 8 {
        (&value[4..6], &value[6..8])
    } else {
        (&value[2..4], &value[4..6])
    };
    let month: u32 = month.parse().unwrap_or(0);
    let day: u32 = day.parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// X12 time: HHMM with optional seconds and hundredths.
fn is_x12_time(value: &str) -> bool {
    if !(matches!(value.len(), 4 | 6 | 8)) || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let hour: u32 = value[0..2].parse().unwrap_or(99);
    let minute: u32 = value[2..4].parse().unwrap_or(99);
    let second: u32 = if value.len() >= 6 {
        value[4..6].parse().unwrap_or(99)
    } else {
        0
    };
    hour < 24 && minute < 60 && second < 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use x12_schema::FieldSchema;

    fn bind(raw: &str, schema: &FieldSchema) -> (FieldValue, Vec<String>) {
        let mut field = FieldValue::new(raw);
        let findings = bind_field(&mut field, schema, Delimiters::default());
        (field, findings)
    }

    #[test]
    fn test_empty_optional_field() {
        let schema = FieldSchema::new("name_first", FieldType::Text).max(35);
        let (field, findings) = bind("", &schema);
        assert!(findings.is_empty());
        assert_eq!(field.typed, TypedValue::Empty);
    }

    #[test]
    fn test_empty_required_field() {
        let schema = FieldSchema::new("entity_identifier_code", FieldType::Id)
            .required()
            .length(2, 3);
        let (_, findings) = bind("", &schema);
        assert_eq!(findings, vec!["entity_identifier_code is required".to_string()]);
    }

    #[test]
    fn test_length_bounds() {
        let schema = FieldSchema::new("reference_identification_qualifier", FieldType::Id)
            .length(2, 3);
        assert!(bind("6P", &schema).1.is_empty());
        assert_eq!(bind("A", &schema).1.len(), 1);
        assert_eq!(bind("ABCD", &schema).1.len(), 1);
    }

    #[test]
    fn test_code_table_membership() {
        let schema = FieldSchema::new("entity_type_qualifier", FieldType::Id).codes(&["1", "2"]);
        assert!(bind("1", &schema).1.is_empty());
        let findings = bind("3", &schema).1;
        assert!(findings[0].contains("not an allowed code"));
    }

    #[test]
    fn test_integer_coercion() {
        let schema = FieldSchema::new("transaction_segment_count", FieldType::Integer);
        let (field, findings) = bind("17", &schema);
        assert!(findings.is_empty());
        assert_eq!(field.typed, TypedValue::Integer(17));

        let (_, findings) = bind("17x", &schema);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_decimal_coercion() {
        let schema = FieldSchema::new("monetary_amount", FieldType::Decimal);
        let (field, findings) = bind("37.50", &schema);
        assert!(findings.is_empty());
        assert_eq!(field.typed, TypedValue::Decimal(37.50));
        // raw text is untouched for rendering
        assert_eq!(field.raw, "37.50");

        assert_eq!(bind("1e5", &schema).1.len(), 1);
        assert!(bind("-1.27", &schema).1.is_empty());
    }

    #[test]
    fn test_date_coercion() {
        let schema = FieldSchema::new("date_time_period", FieldType::Date);
        assert!(bind("20060501", &schema).1.is_empty());
        assert!(bind("131031", &schema).1.is_empty());
        assert_eq!(bind("20061301", &schema).1.len(), 1);
        assert_eq!(bind("2006", &schema).1.len(), 1);
    }

    #[test]
    fn test_time_coercion() {
        let schema = FieldSchema::new("interchange_time", FieldType::Time);
        assert!(bind("1147", &schema).1.is_empty());
        assert!(bind("114701", &schema).1.is_empty());
        assert_eq!(bind("2860", &schema).1.len(), 1);
    }

    #[test]
    fn test_repeated_field_checks_each_part() {
        let schema = FieldSchema::new("service_type_code", FieldType::Id)
            .repeated()
            .codes(&["30", "35", "47"]);
        let (field, findings) = bind("30^35", &schema);
        assert!(findings.is_empty());
        // repetition characters survive verbatim
        assert_eq!(field.raw, "30^35");

        let (_, findings) = bind("30^XX", &schema);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_composite_field_preserved_verbatim() {
        let schema = FieldSchema::new("medical_procedure_id", FieldType::Text)
            .composite()
            .length(1, 3);
        let (field, findings) = bind("HC:33931:TJ", &schema);
        assert!(findings.is_empty());
        assert_eq!(field.typed, TypedValue::Text("HC:33931:TJ".to_string()));
    }
}
