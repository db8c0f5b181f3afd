//! JSON projections for CLI and API consumers.
//!
//! Segment fields are keyed by their schema names; loops nest as objects
//! and repeating entries as arrays. With `exclude_absent` set, fields that
//! were empty on the wire are dropped from the output.

use serde_json::{json, Map, Value};
use x12_ir::{EntryValue, LoopRecord, SegmentRecord, TransactionModel, TypedValue};
use x12_schema::segment_schema;
use x12_wire::SegmentToken;

/// Project a bound model as a JSON object keyed by loop and segment names.
pub fn model_to_json(model: &TransactionModel, exclude_absent: bool) -> Value {
    loop_to_json(&model.root, exclude_absent)
}

/// Project raw segment tokens positionally, e.g. `{"ST00": "ST", ...}`.
pub fn segments_to_json(tokens: &[SegmentToken]) -> Vec<Value> {
    tokens
        .iter()
        .map(|token| {
            let mut object = Map::new();
            for (index, value) in token.fields.iter().enumerate() {
                object.insert(format!("{}{index:02}", token.id), json!(value));
            }
            Value::Object(object)
        })
        .collect()
}

fn loop_to_json(record: &LoopRecord, exclude_absent: bool) -> Value {
    let mut object = Map::new();

    for (key, value) in record.entries() {
        let projected = match value {
            EntryValue::Segment(segment) => segment_to_json(segment, exclude_absent),
            EntryValue::Segments(list) => Value::Array(
                list.iter()
                    .map(|s| segment_to_json(s, exclude_absent))
                    .collect(),
            ),
            EntryValue::Loop(child) => loop_to_json(child, exclude_absent),
            EntryValue::Loops(list) => Value::Array(
                list.iter()
                    .map(|l| loop_to_json(l, exclude_absent))
                    .collect(),
            ),
        };
        object.insert(key.clone(), projected);
    }

    Value::Object(object)
}

fn segment_to_json(segment: &SegmentRecord, exclude_absent: bool) -> Value {
    let schema = segment_schema(&segment.id);
    let mut object = Map::new();

    for (index, field) in segment.fields.iter().enumerate() {
        let name = if index == 0 {
            "segment_name".to_string()
        } else {
            schema
                .and_then(|s| s.fields.get(index))
                .map_or_else(|| format!("field_{index:02}"), |f| f.name.to_string())
        };

        if field.is_empty() {
            if !exclude_absent {
                object.insert(name, Value::Null);
            }
            continue;
        }

        let value = match &field.typed {
            TypedValue::Integer(value) => json!(value),
            TypedValue::Decimal(value) => json!(value),
            _ => json!(field.raw),
        };
        object.insert(name, value);
    }

    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use x12_ir::Delimiters;

    fn nm1() -> SegmentRecord {
        SegmentRecord::new(
            "NM1",
            ["NM1", "IL", "1", "SMITH", "ROBERT", "", "", "", "MI", "11122333301"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            Delimiters::default(),
            1,
        )
    }

    #[test]
    fn test_segment_json_uses_field_names() {
        let value = segment_to_json(&nm1(), false);
        assert_eq!(value["segment_name"], "NM1");
        assert_eq!(value["entity_identifier_code"], "IL");
        assert_eq!(value["name_first"], "ROBERT");
        assert_eq!(value["name_middle"], Value::Null);
    }

    #[test]
    fn test_exclude_absent_drops_empty_fields() {
        let value = segment_to_json(&nm1(), true);
        assert_eq!(value["entity_identifier_code"], "IL");
        assert!(value.get("name_middle").is_none());
    }

    #[test]
    fn test_segments_to_json_positional_keys() {
        let token = SegmentToken {
            id: "ST".to_string(),
            fields: vec!["ST".to_string(), "270".to_string(), "0001".to_string()],
            offset: 0,
        };
        let values = segments_to_json(&[token]);
        assert_eq!(values[0]["ST00"], "ST");
        assert_eq!(values[0]["ST01"], "270");
        assert_eq!(values[0]["ST02"], "0001");
    }

    #[test]
    fn test_loop_json_nests_children() {
        let mut record = LoopRecord::new("loop_2100c");
        record.attach_segment("nm1_segment", nm1(), false);
        let mut outer = LoopRecord::new("loop_2000c");
        outer.insert("loop_2100c", EntryValue::Loop(record));

        let value = loop_to_json(&outer, false);
        assert_eq!(value["loop_2100c"]["nm1_segment"]["name_last_or_organization_name"], "SMITH");
    }
}
