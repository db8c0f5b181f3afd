//! Schema model definitions.
//!
//! Schemas are data: field constraints, segment layouts, loop slot tables,
//! and dispatch rules, with validator functions attached as `fn` pointers.

use crate::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use x12_ir::{LoopRecord, SegmentRecord};

/// Semantic type of a segment field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Identifier/qualifier code.
    Id,
    /// Free-form string.
    Text,
    /// Signed integer.
    Integer,
    /// Fixed-point decimal.
    Decimal,
    /// Date digits, YYYYMMDD or YYMMDD.
    Date,
    /// Time digits, HHMM with optional seconds and hundredths.
    Time,
    /// Opaque binary payload.
    Binary,
}

/// A segment-scope validator: sees the complete segment, returns findings.
pub type SegmentCheck = fn(&SegmentRecord) -> Vec<String>;
/// A loop-scope validator.
pub type LoopCheck = fn(&LoopRecord) -> Vec<String>;
/// A transaction-scope validator over the whole record tree.
pub type TransactionCheck = fn(&LoopRecord) -> Vec<String>;

/// Constraints for one field position.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub codes: Option<Vec<&'static str>>,
    /// Repetition-separated multi-value field; membership checks split it.
    pub repeated: bool,
    /// Component-separated composite; preserved verbatim, no value checks.
    pub composite: bool,
}

impl FieldSchema {
    /// Create an optional field of the given type.
    pub fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
            min_length: None,
            max_length: None,
            pattern: None,
            codes: None,
            repeated: false,
            composite: false,
        }
    }

    /// Mark the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set minimum and maximum length.
    #[must_use]
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    /// Set maximum length only.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set a regex constraint. Patterns are static literals; an invalid
    /// literal is a programming error surfaced at registry startup.
    #[must_use]
    pub fn pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(Regex::new(pattern).expect("static field pattern must compile"));
        self
    }

    /// Set a code table constraint.
    #[must_use]
    pub fn codes(mut self, codes: &[&'static str]) -> Self {
        self.codes = Some(codes.to_vec());
        self
    }

    /// Mark the field repetition-separated.
    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    /// Mark the field component-separated (preserved verbatim).
    #[must_use]
    pub fn composite(mut self) -> Self {
        self.composite = true;
        self
    }
}

/// Ordered field layout and validators for one segment id.
#[derive(Debug, Clone)]
pub struct SegmentSchema {
    pub id: &'static str,
    /// Field schemas; position 0 describes the identifier field itself.
    pub fields: Vec<FieldSchema>,
    pub checks: Vec<SegmentCheck>,
}

impl SegmentSchema {
    /// Create a schema whose position 0 is pinned to the segment id.
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            fields: vec![FieldSchema::new("segment_id", FieldType::Id)
                .required()
                .codes(&[id])],
            checks: Vec::new(),
        }
    }

    /// Append data element schemas after the identifier.
    #[must_use]
    pub fn with_fields(mut self, fields: Vec<FieldSchema>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Attach a segment-scope validator.
    #[must_use]
    pub fn check(mut self, check: SegmentCheck) -> Self {
        self.checks.push(check);
        self
    }

    /// Position of a field by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Field schema by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Narrower constraints layered onto one field of a base segment schema.
#[derive(Debug, Clone, Default)]
pub struct FieldOverride {
    pub name: &'static str,
    pub required: Option<bool>,
    pub literal: Option<&'static str>,
    pub codes: Option<Vec<&'static str>>,
    pub max_length: Option<usize>,
}

impl FieldOverride {
    /// Create an empty override for a named field.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Flip the field to required.
    #[must_use]
    pub fn require(mut self) -> Self {
        self.required = Some(true);
        self
    }

    /// Flip the field to optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = Some(false);
        self
    }

    /// Constrain the field to a literal value (implies required).
    #[must_use]
    pub fn literal(mut self, value: &'static str) -> Self {
        self.literal = Some(value);
        self.required = Some(true);
        self
    }

    /// Constrain the field to a loop-local code table.
    #[must_use]
    pub fn codes(mut self, codes: &[&'static str]) -> Self {
        self.codes = Some(codes.to_vec());
        self
    }
}

/// Loop-local specialization of a base segment schema.
#[derive(Debug, Clone)]
pub struct SegmentOverride {
    pub segment_id: &'static str,
    pub fields: Vec<FieldOverride>,
    pub checks: Vec<SegmentCheck>,
}

impl SegmentOverride {
    /// Create an empty override for a segment id.
    pub fn new(segment_id: &'static str) -> Self {
        Self {
            segment_id,
            fields: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Add a field override.
    #[must_use]
    pub fn field(mut self, field: FieldOverride) -> Self {
        self.fields.push(field);
        self
    }

    /// Attach an additional segment-scope validator.
    #[must_use]
    pub fn check(mut self, check: SegmentCheck) -> Self {
        self.checks.push(check);
        self
    }
}

/// Merge a loop-local override onto a base schema.
///
/// Override constraints take precedence; base constraints apply unchanged
/// where the override is silent.
pub fn merge_override(base: &SegmentSchema, ov: &SegmentOverride) -> SegmentSchema {
    let mut merged = base.clone();

    for field_override in &ov.fields {
        if let Some(index) = merged.field_index(field_override.name) {
            let field = &mut merged.fields[index];
            if let Some(required) = field_override.required {
                field.required = required;
            }
            if let Some(literal) = field_override.literal {
                field.codes = Some(vec![literal]);
            } else if let Some(codes) = &field_override.codes {
                field.codes = Some(codes.clone());
            }
            if let Some(max) = field_override.max_length {
                field.max_length = Some(max);
            }
        }
    }

    merged.checks.extend(ov.checks.iter().copied());
    merged
}

/// One segment position within a loop.
#[derive(Debug, Clone)]
pub struct SegmentSlot {
    /// Record entry key, e.g. `nm1_segment`.
    pub key: String,
    /// Resolved schema (base merged with any loop-local override).
    pub schema: SegmentSchema,
    pub required: bool,
    pub min_repeat: usize,
    pub max_repeat: usize,
}

impl SegmentSlot {
    /// A single-occurrence slot.
    pub fn single(schema: SegmentSchema) -> Self {
        Self {
            key: format!("{}_segment", schema.id.to_lowercase()),
            schema,
            required: false,
            min_repeat: 0,
            max_repeat: 1,
        }
    }

    /// A repeating slot with occurrence bounds.
    pub fn repeating(schema: SegmentSchema, min: usize, max: usize) -> Self {
        Self {
            key: format!("{}_segment", schema.id.to_lowercase()),
            schema,
            required: min > 0,
            min_repeat: min,
            max_repeat: max,
        }
    }

    /// Mark the slot required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        if self.min_repeat == 0 {
            self.min_repeat = 1;
        }
        self
    }

    /// True when the slot stores a list.
    pub fn is_repeating(&self) -> bool {
        self.max_repeat > 1
    }
}

/// One child loop position within a loop.
#[derive(Debug, Clone)]
pub struct LoopSlot {
    pub name: &'static str,
    pub required: bool,
    pub repeating: bool,
}

impl LoopSlot {
    /// A single optional child loop.
    pub fn single(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            repeating: false,
        }
    }

    /// A repeating child loop.
    pub fn repeating(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            repeating: true,
        }
    }

    /// Mark the child loop required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Ordered slot table and validators for one loop.
#[derive(Debug, Clone)]
pub struct LoopSchema {
    pub name: &'static str,
    pub segments: Vec<SegmentSlot>,
    pub children: Vec<LoopSlot>,
    pub checks: Vec<LoopCheck>,
}

impl LoopSchema {
    /// Create an empty loop schema.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            segments: Vec::new(),
            children: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Append a segment slot.
    #[must_use]
    pub fn segment(mut self, slot: SegmentSlot) -> Self {
        self.segments.push(slot);
        self
    }

    /// Append a child loop slot.
    #[must_use]
    pub fn child(mut self, slot: LoopSlot) -> Self {
        self.children.push(slot);
        self
    }

    /// Attach a loop-scope validator.
    #[must_use]
    pub fn check(mut self, check: LoopCheck) -> Self {
        self.checks.push(check);
        self
    }

    /// Slot position and schema by record entry key.
    pub fn slot(&self, key: &str) -> Option<(usize, &SegmentSlot)> {
        self.segments
            .iter()
            .enumerate()
            .find(|(_, s)| s.key == key)
    }

    /// Child loop slot by name.
    pub fn child_slot(&self, name: &str) -> Option<&LoopSlot> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Whether a match rule updates a hierarchical cache pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyRole {
    None,
    Subscriber,
    Patient,
}

/// Field equality condition; matches when the field equals any listed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: &'static str,
    pub one_of: Vec<&'static str>,
}

/// Maps a matched segment to the loop it enters.
#[derive(Debug, Clone)]
pub struct MatchRule {
    pub segment_id: &'static str,
    pub conditions: Vec<Condition>,
    /// Fully-qualified loop path from the transaction root.
    pub target: Vec<&'static str>,
    /// Append a fresh record to the target's repeating list before entering.
    pub new_instance: bool,
    pub hierarchy: HierarchyRole,
}

impl MatchRule {
    /// Create a rule mapping a segment id to a target loop path.
    pub fn new(segment_id: &'static str, target: &[&'static str]) -> Self {
        Self {
            segment_id,
            conditions: Vec::new(),
            target: target.to_vec(),
            new_instance: false,
            hierarchy: HierarchyRole::None,
        }
    }

    /// Add a field equality condition.
    #[must_use]
    pub fn when(mut self, field: &'static str, one_of: &[&'static str]) -> Self {
        self.conditions.push(Condition {
            field,
            one_of: one_of.to_vec(),
        });
        self
    }

    /// Open a new instance of the target loop on match.
    #[must_use]
    pub fn new_instance(mut self) -> Self {
        self.new_instance = true;
        self
    }

    /// Update a hierarchy cache pointer on match.
    #[must_use]
    pub fn hierarchy(mut self, role: HierarchyRole) -> Self {
        self.hierarchy = role;
        self
    }
}

/// A complete (transaction code, implementation version) schema table.
#[derive(Debug, Clone)]
pub struct TransactionSchema {
    pub code: &'static str,
    pub version: &'static str,
    loops: HashMap<&'static str, LoopSchema>,
    rules: Vec<MatchRule>,
    rules_by_segment: HashMap<&'static str, Vec<usize>>,
    pub checks: Vec<TransactionCheck>,
}

impl TransactionSchema {
    /// Assemble and verify a transaction table.
    ///
    /// Duplicate (segment id, condition set, target) triples are a
    /// configuration error, as is a rule targeting an undeclared loop.
    pub fn build(
        code: &'static str,
        version: &'static str,
        loops: Vec<LoopSchema>,
        rules: Vec<MatchRule>,
        checks: Vec<TransactionCheck>,
    ) -> Result<Self> {
        let loop_map: HashMap<&'static str, LoopSchema> =
            loops.into_iter().map(|l| (l.name, l)).collect();

        let mut rules_by_segment: HashMap<&'static str, Vec<usize>> = HashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            for name in &rule.target {
                if !loop_map.contains_key(name) {
                    return Err(Error::UnknownRuleTarget {
                        segment_id: rule.segment_id.to_string(),
                        target: (*name).to_string(),
                    });
                }
            }

            let duplicate = rules[..index].iter().any(|existing| {
                existing.segment_id == rule.segment_id
                    && existing.conditions == rule.conditions
                    && existing.target == rule.target
            });
            if duplicate {
                return Err(Error::DuplicateRule {
                    segment_id: rule.segment_id.to_string(),
                    target: rule.target.join("/"),
                });
            }

            rules_by_segment.entry(rule.segment_id).or_default().push(index);
        }

        Ok(Self {
            code,
            version,
            loops: loop_map,
            rules,
            rules_by_segment,
            checks,
        })
    }

    /// Loop schema by name.
    pub fn loop_schema(&self, name: &str) -> Option<&LoopSchema> {
        self.loops.get(name)
    }

    /// Candidate rules for a segment id, in declaration order.
    pub fn rules_for(&self, segment_id: &str) -> impl Iterator<Item = &MatchRule> {
        self.rules_by_segment
            .get(segment_id)
            .into_iter()
            .flatten()
            .map(|index| &self.rules[*index])
    }
}
