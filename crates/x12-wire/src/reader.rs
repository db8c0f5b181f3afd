//! Streaming segment tokenizer.
//!
//! Yields `(segment_id, field_vector)` tokens lazily until end of input or
//! until the IEA trailer has been emitted. Field splitting preserves empty
//! runs as empty fields; repetition and component characters are kept
//! verbatim inside fields for the schema layer to interpret.

use crate::syntax::{detect_delimiters, ISA_SEGMENT_LENGTH};
use crate::{Error, Result};
use std::path::Path;
use x12_ir::Delimiters;

/// A tokenized segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentToken {
    /// Uppercased segment identifier.
    pub id: String,
    /// Raw field values; position 0 holds the identifier field.
    pub fields: Vec<String>,
    /// Byte offset of the segment within the source.
    pub offset: usize,
}

/// Lazy, single-pass tokenizer over one interchange.
///
/// The source is acquired when the tokenizer is constructed and released
/// when it is dropped; the emitted tokens hold owned data only.
pub struct SegmentTokenizer {
    data: String,
    pos: usize,
    delimiters: Delimiters,
    pending_isa: Option<SegmentToken>,
    done: bool,
}

impl SegmentTokenizer {
    /// Build a tokenizer over an in-memory payload.
    pub fn new(data: impl Into<String>) -> Result<Self> {
        let data = data.into();
        let (delimiters, isa_fields) = detect_delimiters(&data)?;
        let isa = SegmentToken {
            id: "ISA".to_string(),
            fields: isa_fields,
            offset: 0,
        };
        Ok(Self {
            data,
            pos: ISA_SEGMENT_LENGTH,
            delimiters,
            pending_isa: Some(isa),
            done: false,
        })
    }

    /// Build a tokenizer over the contents of a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::new(data)
    }

    /// The delimiters detected from the interchange header.
    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    fn skip_separator_whitespace(&mut self) {
        let bytes = self.data.as_bytes();
        while let Some(&b) = bytes.get(self.pos) {
            if b == b' ' || b == b'\n' || b == b'\r' || b == b'\t' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_segment(&mut self) -> Option<Result<SegmentToken>> {
        self.skip_separator_whitespace();

        if self.pos >= self.data.len() {
            return None;
        }

        let start = self.pos;
        let terminator = self.delimiters.segment;
        let Some(rel) = self.data[start..].find(terminator) else {
            self.done = true;
            return Some(Err(Error::Token {
                offset: start,
                message: "unterminated final segment".to_string(),
            }));
        };

        let raw = &self.data[start..start + rel];
        self.pos = start + rel + terminator.len_utf8();

        let fields: Vec<String> = raw.split(self.delimiters.element).map(str::to_string).collect();
        let id = fields[0].clone();

        if id.is_empty() {
            self.done = true;
            return Some(Err(Error::Token {
                offset: start,
                message: "empty segment identifier".to_string(),
            }));
        }
        if !is_valid_segment_id(&id) {
            self.done = true;
            return Some(Err(Error::Token {
                offset: start,
                message: format!("invalid segment identifier '{id}'"),
            }));
        }

        if id == "IEA" {
            self.done = true;
        }

        Some(Ok(SegmentToken {
            id,
            fields,
            offset: start,
        }))
    }
}

impl Iterator for SegmentTokenizer {
    type Item = Result<SegmentToken>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(isa) = self.pending_isa.take() {
            return Some(Ok(isa));
        }
        if self.done {
            return None;
        }
        self.next_segment()
    }
}

/// Segment identifiers are an uppercase letter followed by one or two
/// uppercase letters or digits.
fn is_valid_segment_id(id: &str) -> bool {
    let bytes = id.as_bytes();
    if !(2..=3).contains(&bytes.len()) {
        return false;
    }
    if !bytes[0].is_ascii_uppercase() {
        return false;
    }
    bytes[1..]
        .iter()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISA: &str = "ISA*03*9876543210*01*9876543210*30*000000005      *30*12345          *131031*1147*^*00501*000000907*1*T*:~";

    fn message(segments: &[&str]) -> String {
        let mut data = ISA.to_string();
        for segment in segments {
            data.push_str(segment);
        }
        data
    }

    #[test]
    fn test_isa_emitted_first() {
        let data = message(&["GS*HS*000000005*54321*20131031*1147*1*X*005010X279A1~"]);
        let mut tokenizer = SegmentTokenizer::new(data).unwrap();

        let isa = tokenizer.next().unwrap().unwrap();
        assert_eq!(isa.id, "ISA");
        assert_eq!(isa.fields.len(), 17);
        assert_eq!(isa.offset, 0);

        let gs = tokenizer.next().unwrap().unwrap();
        assert_eq!(gs.id, "GS");
        assert_eq!(gs.fields[8], "005010X279A1");
    }

    #[test]
    fn test_empty_fields_preserved() {
        let data = message(&["HL*1**20*1~"]);
        let tokens: Vec<_> = SegmentTokenizer::new(data)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        let hl = &tokens[1];
        assert_eq!(hl.fields, vec!["HL", "1", "", "20", "1"]);
    }

    #[test]
    fn test_newlines_between_segments_skipped() {
        let data = message(&[
            "GS*HS*000000005*54321*20131031*1147*1*X*005010X279A1~\n",
            "ST*270*0001*005010X279A1~\r\n",
            "SE*2*0001~",
        ]);
        let tokens: Vec<_> = SegmentTokenizer::new(data)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        let ids: Vec<&str> = tokens.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["ISA", "GS", "ST", "SE"]);
    }

    #[test]
    fn test_repetition_and_component_preserved() {
        let data = message(&["EQ*30^35*HC:33931:TJ~"]);
        let tokens: Vec<_> = SegmentTokenizer::new(data)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(tokens[1].fields[1], "30^35");
        assert_eq!(tokens[1].fields[2], "HC:33931:TJ");
    }

    #[test]
    fn test_stops_after_iea() {
        let data = message(&["IEA*1*000000907~", "GS*ignored~"]);
        let tokens: Vec<_> = SegmentTokenizer::new(data)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        let ids: Vec<&str> = tokens.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["ISA", "IEA"]);
    }

    #[test]
    fn test_unterminated_final_segment() {
        let data = message(&["GS*HS*000000005"]);
        let mut tokenizer = SegmentTokenizer::new(data).unwrap();
        tokenizer.next();
        let err = tokenizer.next().unwrap().unwrap_err();
        match err {
            Error::Token { offset, message } => {
                assert_eq!(offset, ISA_SEGMENT_LENGTH);
                assert!(message.contains("unterminated"));
            }
            other => panic!("expected token error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_segment_identifier() {
        let data = message(&["g1*X~"]);
        let mut tokenizer = SegmentTokenizer::new(data).unwrap();
        tokenizer.next();
        let err = tokenizer.next().unwrap().unwrap_err();
        assert!(err.to_string().contains("invalid segment identifier"));
    }

    #[test]
    fn test_empty_segment_identifier() {
        let data = message(&["*X~"]);
        let mut tokenizer = SegmentTokenizer::new(data).unwrap();
        tokenizer.next();
        let err = tokenizer.next().unwrap().unwrap_err();
        assert!(err.to_string().contains("empty segment identifier"));
    }

    #[test]
    fn test_trailing_whitespace_at_end_is_not_an_error() {
        let data = message(&["IEA*1*000000907~\n"]);
        let tokens: Vec<_> = SegmentTokenizer::new(data)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_tokenizer_totality() {
        // joining every token with the original delimiters reproduces the
        // stripped input byte for byte
        let data = message(&[
            "GS*HS*000000005*54321*20131031*1147*1*X*005010X279A1~\n",
            "ST*270*0001*005010X279A1~\n",
            "HL*1**20*1~\n",
            "SE*3*0001~\n",
            "GE*1*1~\n",
            "IEA*1*000000907~\n",
        ]);
        let tokenizer = SegmentTokenizer::new(data.clone()).unwrap();
        let delimiters = tokenizer.delimiters();
        let tokens: Vec<_> = tokenizer.collect::<Result<Vec<_>>>().unwrap();

        let rebuilt: String = tokens
            .iter()
            .map(|t| {
                let mut s = t.fields.join(&delimiters.element.to_string());
                s.push(delimiters.segment);
                s
            })
            .collect();
        // spaces inside ISA padding are data; only newlines separate segments
        let stripped = data.replace('\n', "");
        assert_eq!(rebuilt, stripped);
    }

    #[test]
    fn test_segment_id_validation() {
        assert!(is_valid_segment_id("ST"));
        assert!(is_valid_segment_id("NM1"));
        assert!(is_valid_segment_id("N3"));
        assert!(!is_valid_segment_id("nm1"));
        assert!(!is_valid_segment_id("1NM"));
        assert!(!is_valid_segment_id("S"));
        assert!(!is_valid_segment_id("SEGM"));
    }
}
