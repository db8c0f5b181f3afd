//! Per-transaction loop engine.
//!
//! Each tokenized segment is matched against the transaction's dispatch
//! rules. On a match the engine unwinds the active loop path to the closest
//! common ancestor of the rule's target, descends (allocating loop records
//! as needed, appending a fresh instance when the rule opens one), and
//! attaches the segment to the active loop record. Unmatched segments
//! attach to the active loop when it declares a slot for them and are
//! otherwise dropped with a structure warning.

use crate::context::ParserContext;
use crate::{Error, Result};
use std::collections::HashMap;
use x12_ir::{
    Delimiters, Diagnostic, DiagnosticKind, EntryValue, LoopRecord, SegmentRecord, SourceLocation,
    TransactionModel,
};
use x12_schema::{segment_schema, HierarchyRole, MatchRule, TransactionSchema};
use x12_validation::bind_transaction;
use x12_wire::SegmentToken;

/// Builds one transaction model from an ST..SE segment window.
pub struct TransactionParser {
    schema: &'static TransactionSchema,
    delimiters: Delimiters,
    base: SourceLocation,
    group_control_number: Option<String>,
    usage_indicator: Option<String>,
    context: ParserContext,
    record: LoopRecord,
    diagnostics: Vec<Diagnostic>,
    ordinal: usize,
    /// Highest slot index attached so far, per loop instance.
    attach_high_water: HashMap<String, usize>,
}

impl TransactionParser {
    /// Create a parser for one transaction set.
    pub fn new(
        schema: &'static TransactionSchema,
        delimiters: Delimiters,
        base: SourceLocation,
        group_control_number: Option<String>,
        usage_indicator: Option<String>,
    ) -> Self {
        Self {
            schema,
            delimiters,
            base,
            group_control_number,
            usage_indicator,
            context: ParserContext::new(),
            record: LoopRecord::new("transaction"),
            diagnostics: Vec::new(),
            ordinal: 0,
            attach_high_water: HashMap::new(),
        }
    }

    /// Consume one segment. Returns the bound model once SE is processed.
    pub fn parse(&mut self, token: SegmentToken) -> Result<Option<TransactionModel>> {
        self.ordinal += 1;
        let segment = SegmentRecord::new(token.id, token.fields, self.delimiters, self.ordinal);

        if segment.id == "HL" {
            self.context.hl_segment = Some(segment.clone());
        }

        let rule = self.select_rule(&segment).cloned();
        let rule_matched = rule.is_some();

        if let Some(rule) = &rule {
            self.enter_target(rule)?;
            match rule.hierarchy {
                HierarchyRole::Subscriber => {
                    self.context.subscriber_path = Some(self.context.path().clone());
                }
                HierarchyRole::Patient => {
                    self.context.patient_path = Some(self.context.path().clone());
                }
                HierarchyRole::None => {}
            }
        }

        let is_final = segment.id == "SE";
        self.attach(segment, rule_matched)?;

        if is_final {
            return Ok(Some(self.finalize()));
        }
        Ok(None)
    }

    /// First rule whose conditions hold and whose target parent lies on the
    /// active path. Tables order rules deepest-first so the rule anchored
    /// closest to the active loop wins.
    fn select_rule(&self, segment: &SegmentRecord) -> Option<&MatchRule> {
        let active = self.context.loop_names();

        self.schema.rules_for(&segment.id).find(|rule| {
            if !conditions_hold(rule, segment) {
                return false;
            }
            let parent = &rule.target[..rule.target.len().saturating_sub(1)];
            parent.len() <= active.len()
                && parent.iter().zip(active.iter()).all(|(a, b)| a == b)
        })
    }

    /// Unwind to the closest common ancestor of the active loop and the
    /// rule target, then descend, allocating records along the way.
    fn enter_target(&mut self, rule: &MatchRule) -> Result<()> {
        let active = self.context.loop_names();
        let mut common = active
            .iter()
            .zip(rule.target.iter())
            .take_while(|(a, b)| *a == *b)
            .count();

        // re-entering the loop the rule targets: step back out so a fresh
        // instance can be appended
        if rule.new_instance && common == rule.target.len() {
            common -= 1;
        }
        self.context.unwind_to(common);

        for depth in common..rule.target.len() {
            let name = rule.target[depth];
            let is_last = depth + 1 == rule.target.len();
            let open_instance = is_last && rule.new_instance;

            let parent_name = self
                .context
                .loop_name()
                .unwrap_or("transaction")
                .to_string();
            let repeating = self
                .schema
                .loop_schema(&parent_name)
                .and_then(|schema| schema.child_slot(name))
                .map_or(open_instance, |slot| slot.repeating);

            let parent = self.record.resolve_mut(self.context.path())?;
            let index = match parent.get_mut(name) {
                None => {
                    let value = if repeating {
                        EntryValue::Loops(vec![LoopRecord::new(name)])
                    } else {
                        EntryValue::Loop(LoopRecord::new(name))
                    };
                    parent.insert(name, value);
                    0
                }
                Some(EntryValue::Loops(instances)) => {
                    if open_instance {
                        instances.push(LoopRecord::new(name));
                    }
                    instances.len() - 1
                }
                Some(EntryValue::Loop(_)) => 0,
                Some(_) => {
                    return Err(Error::Structure {
                        position: self.ordinal,
                        message: format!("record entry '{name}' is not a loop"),
                    });
                }
            };

            self.context.push(name, index);
        }

        Ok(())
    }

    /// Attach a segment to the active loop record.
    fn attach(&mut self, segment: SegmentRecord, rule_matched: bool) -> Result<()> {
        let location = self.base.at_segment(segment.position);
        let key = segment.entry_key();
        let active_name = self
            .context
            .loop_name()
            .unwrap_or("transaction")
            .to_string();
        let path_key = path_key(self.context.path());

        let slot = self
            .schema
            .loop_schema(&active_name)
            .and_then(|schema| schema.slot(&key).map(|(index, s)| (index, s.is_repeating())));

        match slot {
            Some((slot_index, repeating)) => {
                let high_water = self.attach_high_water.entry(path_key).or_insert(0);
                if slot_index < *high_water {
                    self.diagnostics.push(Diagnostic::warning(
                        DiagnosticKind::Structure,
                        location,
                        format!(
                            "unexpected segment order: {} arrived late in {active_name}",
                            segment.id
                        ),
                    ));
                } else {
                    *high_water = slot_index;
                }

                let id = segment.id.clone();
                let target = self.record.resolve_mut(self.context.path())?;
                if !target.attach_segment(&key, segment, repeating) {
                    self.diagnostics.push(Diagnostic::warning(
                        DiagnosticKind::Structure,
                        location,
                        format!("repeated {id} exceeds its slot in {active_name}; dropped"),
                    ));
                }
            }
            None if rule_matched => {
                // the rule vouched for this segment even without a slot
                let target = self.record.resolve_mut(self.context.path())?;
                target.attach_segment(&key, segment, false);
            }
            None => {
                tracing::warn!(
                    segment = %segment.id,
                    active_loop = %active_name,
                    "segment has no slot in the active loop; dropped"
                );
                self.diagnostics.push(Diagnostic::warning(
                    DiagnosticKind::Structure,
                    location,
                    format!("{} has no slot in {active_name}; dropped", segment.id),
                ));
            }
        }

        Ok(())
    }

    /// Close the transaction: build the model and run the binder tiers.
    fn finalize(&mut self) -> TransactionModel {
        let root = std::mem::replace(&mut self.record, LoopRecord::new("transaction"));
        let (transaction_code, control_number, implementation_version) = {
            let st = root.child_loop("header").and_then(|h| h.segment("st_segment"));
            (
                st.map_or(String::new(), |s| s.value(1).to_string()),
                st.map_or(String::new(), |s| s.value(2).to_string()),
                st.map_or(String::new(), |s| s.value(3).to_string()),
            )
        };

        let mut model = TransactionModel {
            transaction_code,
            implementation_version,
            control_number,
            group_control_number: self.group_control_number.clone(),
            usage_indicator: self.usage_indicator.clone(),
            delimiters: self.delimiters,
            root,
            diagnostics: std::mem::take(&mut self.diagnostics),
        };

        bind_transaction(&mut model, self.schema, self.base);
        self.context.reset();
        model
    }
}

fn conditions_hold(rule: &MatchRule, segment: &SegmentRecord) -> bool {
    rule.conditions.iter().all(|condition| {
        let Some(index) =
            segment_schema(&segment.id).and_then(|schema| schema.field_index(condition.field))
        else {
            return false;
        };
        let value = segment.value(index);
        condition
            .one_of
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(value))
    })
}

fn path_key(path: &[(String, usize)]) -> String {
    let mut key = String::new();
    for (name, index) in path {
        key.push_str(name);
        key.push('[');
        key.push_str(&index.to_string());
        key.push_str("]/");
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use x12_schema::transaction_schema;

    fn token(line: &str) -> SegmentToken {
        let fields: Vec<String> = line.split('*').map(str::to_string).collect();
        SegmentToken {
            id: fields[0].clone(),
            fields,
            offset: 0,
        }
    }

    fn parser_270() -> TransactionParser {
        TransactionParser::new(
            transaction_schema("270", "005010X279A1").unwrap(),
            Delimiters::default(),
            SourceLocation {
                interchange: 1,
                group: 1,
                transaction: 1,
                segment: None,
                field: None,
            },
            Some("1".to_string()),
            Some("T".to_string()),
        )
    }

    #[test]
    fn test_hl_codes_drive_loop_dispatch() {
        let mut parser = parser_270();
        parser.parse(token("ST*270*0001*005010X279A1")).unwrap();
        parser.parse(token("BHT*0022*13*10001234*20060501*1319")).unwrap();

        parser.parse(token("HL*1**20*1")).unwrap();
        assert_eq!(parser.context.loop_name(), Some("loop_2000a"));

        parser.parse(token("HL*2*1*21*1")).unwrap();
        assert_eq!(
            parser.context.loop_names(),
            vec!["loop_2000a", "loop_2000b"]
        );
        let hl = parser.context.hl_segment.as_ref().unwrap();
        assert_eq!(hl.value(2), "1");
    }

    #[test]
    fn test_nm1_enters_name_loop_for_active_level() {
        let mut parser = parser_270();
        parser.parse(token("ST*270*0001*005010X279A1")).unwrap();
        parser.parse(token("BHT*0022*13*10001234*20060501*1319")).unwrap();
        parser.parse(token("HL*1**20*1")).unwrap();
        parser.parse(token("NM1*PR*2*ABC COMPANY*****PI*842610001")).unwrap();
        assert_eq!(
            parser.context.loop_names(),
            vec!["loop_2000a", "loop_2100a"]
        );

        parser.parse(token("HL*2*1*21*1")).unwrap();
        parser.parse(token("NM1*1P*2*BONE AND JOINT CLINIC*****SV*2000035")).unwrap();
        assert_eq!(
            parser.context.loop_names(),
            vec!["loop_2000a", "loop_2000b", "loop_2100b"]
        );
    }

    #[test]
    fn test_second_subscriber_opens_new_instance() {
        let mut parser = parser_270();
        parser.parse(token("ST*270*0001*005010X279A1")).unwrap();
        parser.parse(token("BHT*0022*13*10001234*20060501*1319")).unwrap();
        parser.parse(token("HL*1**20*1")).unwrap();
        parser.parse(token("NM1*PR*2*ABC COMPANY*****PI*842610001")).unwrap();
        parser.parse(token("HL*2*1*21*1")).unwrap();
        parser.parse(token("NM1*1P*2*CLINIC*****SV*2000035")).unwrap();
        parser.parse(token("HL*3*2*22*0")).unwrap();
        parser.parse(token("NM1*IL*1*SMITH*ROBERT****MI*11122333301")).unwrap();
        parser.parse(token("EQ*30")).unwrap();
        parser.parse(token("HL*4*2*22*0")).unwrap();

        let receiver_path = vec![
            ("loop_2000a".to_string(), 0),
            ("loop_2000b".to_string(), 0),
        ];
        let receiver = parser.record.resolve(&receiver_path).unwrap();
        assert_eq!(receiver.child_loops("loop_2000c").len(), 2);
        assert_eq!(
            parser.context.subscriber_path.as_ref().unwrap().last(),
            Some(&("loop_2000c".to_string(), 1))
        );
    }

    #[test]
    fn test_unslotted_segment_dropped_with_warning() {
        let mut parser = parser_270();
        parser.parse(token("ST*270*0001*005010X279A1")).unwrap();
        // LX has no slot anywhere in a 270 header
        parser.parse(token("LX*1")).unwrap();

        assert_eq!(parser.diagnostics.len(), 1);
        let warning = &parser.diagnostics[0];
        assert_eq!(warning.kind, DiagnosticKind::Structure);
        assert!(warning.message.contains("no slot"));
    }

    #[test]
    fn test_model_captures_envelope_metadata() {
        let mut parser = parser_270();
        parser.parse(token("ST*270*0001*005010X279A1")).unwrap();
        parser.parse(token("BHT*0022*13*10001234*20060501*1319")).unwrap();
        let model = parser.parse(token("SE*3*0001")).unwrap().unwrap();

        assert_eq!(model.transaction_code, "270");
        assert_eq!(model.control_number, "0001");
        assert_eq!(model.group_control_number.as_deref(), Some("1"));
        assert_eq!(model.usage_indicator.as_deref(), Some("T"));
    }
}
