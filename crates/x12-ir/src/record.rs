//! Record tree for parsed transactions.
//!
//! A transaction accumulates into a [`LoopRecord`] tree: an ordered mapping
//! of entry keys to segments, segment lists, child loops, and child loop
//! lists. Entry keys follow the wire-derived convention of
//! `{segment_id}_segment` for segments and `loop_{name}` for loops.

use crate::delimiters::Delimiters;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A field value coerced by the binder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedValue {
    /// Not yet bound; the raw text is the only representation.
    Unchecked,
    /// Empty wire value, denoting "absent".
    Empty,
    /// Free-form string.
    Text(String),
    /// Identifier/code string.
    Identifier(String),
    /// Signed integer.
    Integer(i64),
    /// Fixed-point decimal.
    Decimal(f64),
    /// Date digits (YYYYMMDD or YYMMDD).
    Date(String),
    /// Time digits (HHMM, HHMMSS, or HHMMSSDD).
    Time(String),
    /// Opaque binary payload.
    Binary(Vec<u8>),
}

/// A single segment field.
///
/// `raw` is the exact wire text and remains the source of truth for
/// rendering; `typed` is the binder's coercion per the field schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub raw: String,
    pub typed: TypedValue,
}

impl FieldValue {
    /// Create an unbound field from wire text.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            typed: TypedValue::Unchecked,
        }
    }

    /// True when the wire value is empty (absent).
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The raw wire text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// A tagged segment record: identifier plus ordered fields.
///
/// `fields[0]` is the identifier field itself, matching the wire layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    /// Three-letter segment identifier (uppercased).
    pub id: String,
    /// Ordered field vector; position 0 holds the identifier.
    pub fields: Vec<FieldValue>,
    /// Delimiters the segment arrived with.
    pub delimiters: Delimiters,
    /// 1-based ordinal of the segment within its transaction.
    pub position: usize,
}

impl SegmentRecord {
    /// Create a segment record from raw wire fields.
    pub fn new(
        id: impl Into<String>,
        fields: Vec<String>,
        delimiters: Delimiters,
        position: usize,
    ) -> Self {
        Self {
            id: id.into(),
            fields: fields.into_iter().map(FieldValue::new).collect(),
            delimiters,
            position,
        }
    }

    /// Field at a position, if present.
    pub fn field(&self, index: usize) -> Option<&FieldValue> {
        self.fields.get(index)
    }

    /// Raw text of the field at a position; empty string when absent.
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", |f| f.raw.as_str())
    }

    /// The conventional record key for this segment, e.g. `hl_segment`.
    pub fn entry_key(&self) -> String {
        format!("{}_segment", self.id.to_lowercase())
    }
}

/// A value stored under a loop record entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntryValue {
    Segment(SegmentRecord),
    Segments(Vec<SegmentRecord>),
    Loop(LoopRecord),
    Loops(Vec<LoopRecord>),
}

/// A named loop holding segments and child loops in wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopRecord {
    /// Loop name, e.g. `loop_2000a`, `header`.
    pub name: String,
    entries: Vec<(String, EntryValue)>,
}

/// Addresses a loop within a record tree as `(loop name, instance index)`
/// steps from the root. Single (non-repeating) loops use index 0.
pub type RecordPath = Vec<(String, usize)>;

impl LoopRecord {
    /// Create an empty loop record.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Ordered entries.
    pub fn entries(&self) -> impl Iterator<Item = &(String, EntryValue)> {
        self.entries.iter()
    }

    /// Mutable ordered entries.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut (String, EntryValue)> {
        self.entries.iter_mut()
    }

    /// True when the loop holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by key.
    pub fn get(&self, key: &str) -> Option<&EntryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Mutable entry by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut EntryValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Insert or replace an entry, preserving first-insertion order.
    pub fn insert(&mut self, key: impl Into<String>, value: EntryValue) {
        let key = key.into();
        if let Some(existing) = self.get_mut(&key) {
            *existing = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Attach a segment under its entry key.
    ///
    /// When `repeating` the entry accumulates a list; otherwise a single
    /// segment is stored and `false` is returned if the slot was already
    /// occupied.
    pub fn attach_segment(&mut self, key: &str, segment: SegmentRecord, repeating: bool) -> bool {
        match self.get_mut(key) {
            None => {
                let value = if repeating {
                    EntryValue::Segments(vec![segment])
                } else {
                    EntryValue::Segment(segment)
                };
                self.entries.push((key.to_string(), value));
                true
            }
            Some(EntryValue::Segments(list)) => {
                list.push(segment);
                true
            }
            Some(_) => false,
        }
    }

    /// First segment stored under a key (single or list entry).
    pub fn segment(&self, key: &str) -> Option<&SegmentRecord> {
        match self.get(key)? {
            EntryValue::Segment(s) => Some(s),
            EntryValue::Segments(list) => list.first(),
            _ => None,
        }
    }

    /// All segments stored under a key.
    pub fn segments(&self, key: &str) -> Vec<&SegmentRecord> {
        match self.get(key) {
            Some(EntryValue::Segment(s)) => vec![s],
            Some(EntryValue::Segments(list)) => list.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// First child loop stored under a key (single or list entry).
    pub fn child_loop(&self, key: &str) -> Option<&LoopRecord> {
        match self.get(key)? {
            EntryValue::Loop(l) => Some(l),
            EntryValue::Loops(list) => list.first(),
            _ => None,
        }
    }

    /// All child loops stored under a key.
    pub fn child_loops(&self, key: &str) -> Vec<&LoopRecord> {
        match self.get(key) {
            Some(EntryValue::Loop(l)) => vec![l],
            Some(EntryValue::Loops(list)) => list.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Resolve a record path to the loop it addresses.
    pub fn resolve(&self, path: &[(String, usize)]) -> Result<&LoopRecord> {
        let mut current = self;
        for (name, index) in path {
            current = match current.get(name) {
                Some(EntryValue::Loop(l)) if *index == 0 => l,
                Some(EntryValue::Loops(list)) => {
                    list.get(*index).ok_or_else(|| Error::LoopNotFound {
                        path: format!("{name}[{index}]"),
                    })?
                }
                Some(_) => {
                    return Err(Error::EntryKindMismatch { key: name.clone() });
                }
                None => {
                    return Err(Error::LoopNotFound {
                        path: format!("{name}[{index}]"),
                    });
                }
            };
        }
        Ok(current)
    }

    /// Resolve a record path to a mutable loop.
    pub fn resolve_mut(&mut self, path: &[(String, usize)]) -> Result<&mut LoopRecord> {
        let mut current = self;
        for (name, index) in path {
            current = match current.get_mut(name) {
                Some(EntryValue::Loop(l)) if *index == 0 => l,
                Some(EntryValue::Loops(list)) => {
                    list.get_mut(*index).ok_or_else(|| Error::LoopNotFound {
                        path: format!("{name}[{index}]"),
                    })?
                }
                Some(_) => {
                    return Err(Error::EntryKindMismatch { key: name.clone() });
                }
                None => {
                    return Err(Error::LoopNotFound {
                        path: format!("{name}[{index}]"),
                    });
                }
            };
        }
        Ok(current)
    }

    /// Count every segment in the tree, recursing through child loops.
    ///
    /// For a complete transaction record the count spans ST through SE
    /// inclusive, which is what the SE trailer conveys.
    pub fn segment_count(&self) -> usize {
        let mut count = 0;
        for (_, value) in &self.entries {
            match value {
                EntryValue::Segment(_) => count += 1,
                EntryValue::Segments(list) => count += list.len(),
                EntryValue::Loop(l) => count += l.segment_count(),
                EntryValue::Loops(list) => count += list.iter().map(Self::segment_count).sum::<usize>(),
            }
        }
        count
    }

    /// Collect every segment in wire order, recursing through child loops.
    pub fn collect_segments<'a>(&'a self, out: &mut Vec<&'a SegmentRecord>) {
        for (_, value) in &self.entries {
            match value {
                EntryValue::Segment(s) => out.push(s),
                EntryValue::Segments(list) => out.extend(list.iter()),
                EntryValue::Loop(l) => l.collect_segments(out),
                EntryValue::Loops(list) => {
                    for l in list {
                        l.collect_segments(out);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: &str, position: usize) -> SegmentRecord {
        SegmentRecord::new(
            id,
            vec![id.to_string(), "1".to_string()],
            Delimiters::default(),
            position,
        )
    }

    #[test]
    fn test_entry_key_convention() {
        assert_eq!(segment("NM1", 1).entry_key(), "nm1_segment");
        assert_eq!(segment("HL", 2).entry_key(), "hl_segment");
    }

    #[test]
    fn test_attach_single_segment_twice_rejected() {
        let mut record = LoopRecord::new("loop_2100a");
        assert!(record.attach_segment("nm1_segment", segment("NM1", 1), false));
        assert!(!record.attach_segment("nm1_segment", segment("NM1", 2), false));
    }

    #[test]
    fn test_attach_repeating_segments() {
        let mut record = LoopRecord::new("loop_2100c");
        assert!(record.attach_segment("ref_segment", segment("REF", 1), true));
        assert!(record.attach_segment("ref_segment", segment("REF", 2), true));
        assert_eq!(record.segments("ref_segment").len(), 2);
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut record = LoopRecord::new("header");
        record.insert("st_segment", EntryValue::Segment(segment("ST", 1)));
        record.insert("bht_segment", EntryValue::Segment(segment("BHT", 2)));

        let keys: Vec<&str> = record.entries().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["st_segment", "bht_segment"]);
    }

    #[test]
    fn test_resolve_path() {
        let mut root = LoopRecord::new("transaction");
        let mut outer = LoopRecord::new("loop_2000a");
        let inner = LoopRecord::new("loop_2100a");
        outer.insert("loop_2100a", EntryValue::Loop(inner));
        root.insert("loop_2000a", EntryValue::Loops(vec![outer]));

        let path = vec![
            ("loop_2000a".to_string(), 0),
            ("loop_2100a".to_string(), 0),
        ];
        assert_eq!(root.resolve(&path).unwrap().name, "loop_2100a");

        let missing = vec![("loop_2000b".to_string(), 0)];
        assert!(root.resolve(&missing).is_err());
    }

    #[test]
    fn test_segment_count_recursive() {
        let mut root = LoopRecord::new("transaction");
        let mut header = LoopRecord::new("header");
        header.attach_segment("st_segment", segment("ST", 1), false);
        header.attach_segment("bht_segment", segment("BHT", 2), false);

        let mut source = LoopRecord::new("loop_2000a");
        source.attach_segment("hl_segment", segment("HL", 3), false);
        source.attach_segment("trn_segment", segment("TRN", 4), true);
        source.attach_segment("trn_segment", segment("TRN", 5), true);

        root.insert("header", EntryValue::Loop(header));
        root.insert("loop_2000a", EntryValue::Loops(vec![source]));

        assert_eq!(root.segment_count(), 5);
    }

    #[test]
    fn test_collect_segments_in_order() {
        let mut root = LoopRecord::new("transaction");
        let mut header = LoopRecord::new("header");
        header.attach_segment("st_segment", segment("ST", 1), false);
        let mut loop_a = LoopRecord::new("loop_2000a");
        loop_a.attach_segment("hl_segment", segment("HL", 2), false);
        root.insert("header", EntryValue::Loop(header));
        root.insert("loop_2000a", EntryValue::Loops(vec![loop_a]));

        let mut segments = Vec::new();
        root.collect_segments(&mut segments);
        let ids: Vec<&str> = segments.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["ST", "HL"]);
    }
}
