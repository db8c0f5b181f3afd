//! Reader API.
//!
//! `SegmentReader` streams raw tokens; `ModelReader` layers envelope
//! tracking and the loop engine on top and yields bound transaction
//! models. Input may be a file path or an in-memory payload; payloads are
//! recognized by their ISA prefix. The source is read when the reader is
//! constructed and released immediately, so no handle outlives the reader.

use crate::parser::TransactionParser;
use crate::{Error, Result};
use std::path::Path;
use x12_ir::{Delimiters, SourceLocation, TransactionModel};
use x12_schema::transaction_schema;
use x12_wire::{SegmentToken, SegmentTokenizer};

/// Returns true when the input looks like an X12 payload rather than a path.
pub fn is_x12_data(input: &str) -> bool {
    input.starts_with("ISA")
}

/// Streams `(segment_id, fields)` tokens with no validation.
pub struct SegmentReader {
    tokenizer: SegmentTokenizer,
}

impl SegmentReader {
    /// Open an input that is either an X12 payload or a file path.
    pub fn new(input: &str) -> Result<Self> {
        if is_x12_data(input) {
            Self::from_payload(input)
        } else {
            Self::from_path(input)
        }
    }

    /// Open an in-memory payload.
    pub fn from_payload(payload: impl Into<String>) -> Result<Self> {
        Ok(Self {
            tokenizer: SegmentTokenizer::new(payload)?,
        })
    }

    /// Open a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            tokenizer: SegmentTokenizer::from_path(path)?,
        })
    }

    /// Delimiters detected from the interchange header.
    pub fn delimiters(&self) -> Delimiters {
        self.tokenizer.delimiters()
    }

    /// Iterate segment tokens in source order.
    pub fn segments(&mut self) -> impl Iterator<Item = Result<SegmentToken>> + '_ {
        (&mut self.tokenizer).map(|item| item.map_err(Error::from))
    }
}

/// Streams bound transaction models through the full pipeline.
pub struct ModelReader {
    tokenizer: SegmentTokenizer,
    interchange: usize,
    group: usize,
    transaction: usize,
    group_version: Option<String>,
    group_control_number: Option<String>,
    usage_indicator: Option<String>,
    parser: Option<TransactionParser>,
}

impl ModelReader {
    /// Open an input that is either an X12 payload or a file path.
    pub fn new(input: &str) -> Result<Self> {
        if is_x12_data(input) {
            Self::from_payload(input)
        } else {
            Self::from_path(input)
        }
    }

    /// Open an in-memory payload.
    pub fn from_payload(payload: impl Into<String>) -> Result<Self> {
        Ok(Self::with_tokenizer(SegmentTokenizer::new(payload)?))
    }

    /// Open a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_tokenizer(SegmentTokenizer::from_path(path)?))
    }

    fn with_tokenizer(tokenizer: SegmentTokenizer) -> Self {
        Self {
            tokenizer,
            interchange: 0,
            group: 0,
            transaction: 0,
            group_version: None,
            group_control_number: None,
            usage_indicator: None,
            parser: None,
        }
    }

    /// Delimiters detected from the interchange header.
    pub fn delimiters(&self) -> Delimiters {
        self.tokenizer.delimiters()
    }

    /// Iterate bound transaction models in source order.
    pub fn models(&mut self) -> Models<'_> {
        Models { reader: self }
    }

    fn handle_control(&mut self, token: &SegmentToken) -> bool {
        match token.id.as_str() {
            "ISA" => {
                self.interchange += 1;
                self.group = 0;
                self.usage_indicator = token.fields.get(15).map(|f| f.trim().to_string());
                true
            }
            "GS" => {
                self.group += 1;
                self.transaction = 0;
                self.group_version = token.fields.get(8).cloned();
                self.group_control_number = token.fields.get(6).cloned();
                true
            }
            "GE" | "IEA" => true,
            _ => false,
        }
    }

    fn start_transaction(&mut self, token: &SegmentToken) -> Result<()> {
        if self.parser.is_some() {
            return Err(Error::Structure {
                position: token.offset,
                message: "ST encountered before the previous transaction's SE".to_string(),
            });
        }

        self.transaction += 1;

        let code = token.fields.get(1).cloned().unwrap_or_default();
        let version = token
            .fields
            .get(3)
            .filter(|v| !v.is_empty())
            .cloned()
            .or_else(|| self.group_version.clone())
            .unwrap_or_default();

        let Some(schema) = transaction_schema(&code, &version) else {
            return Err(Error::UnsupportedTransaction { code, version });
        };

        let base = SourceLocation {
            interchange: self.interchange.max(1),
            group: self.group.max(1),
            transaction: self.transaction,
            segment: None,
            field: None,
        };

        self.parser = Some(TransactionParser::new(
            schema,
            self.tokenizer.delimiters(),
            base,
            self.group_control_number.clone(),
            self.usage_indicator.clone(),
        ));
        Ok(())
    }

    fn step(&mut self) -> Option<Result<TransactionModel>> {
        loop {
            let token = match self.tokenizer.next()? {
                Ok(token) => token,
                Err(error) => return Some(Err(error.into())),
            };

            if self.handle_control(&token) {
                continue;
            }

            if token.id == "ST" {
                if let Err(error) = self.start_transaction(&token) {
                    return Some(Err(error));
                }
            }

            let Some(parser) = self.parser.as_mut() else {
                return Some(Err(Error::Structure {
                    position: token.offset,
                    message: format!("segment {} outside any transaction set", token.id),
                }));
            };

            match parser.parse(token) {
                Ok(Some(model)) => {
                    self.parser = None;
                    return Some(Ok(model));
                }
                Ok(None) => {}
                Err(error) => return Some(Err(error)),
            }
        }
    }
}

/// Iterator over the models of a [`ModelReader`].
pub struct Models<'a> {
    reader: &'a mut ModelReader,
}

impl Iterator for Models<'_> {
    type Item = Result<TransactionModel>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE_HEADER: &str = "ISA*03*9876543210*01*9876543210*30*000000005      *30*12345          *131031*1147*^*00501*000000907*1*T*:~GS*HS*000000005*54321*20131031*1147*1*X*005010X279A1~";

    fn wrap(transaction: &str) -> String {
        format!("{ENVELOPE_HEADER}{transaction}GE*1*1~IEA*1*000000907~")
    }

    #[test]
    fn test_segment_reader_yields_all_tokens() {
        let data = wrap("ST*270*0001*005010X279A1~SE*2*0001~");
        let mut reader = SegmentReader::from_payload(data).unwrap();
        let ids: Vec<String> = reader
            .segments()
            .map(|t| t.unwrap().id)
            .collect();
        assert_eq!(ids, vec!["ISA", "GS", "ST", "SE", "GE", "IEA"]);
    }

    #[test]
    fn test_duplicate_st_is_fatal() {
        let data = wrap("ST*270*0001*005010X279A1~ST*270*0002*005010X279A1~SE*2*0001~");
        let mut reader = ModelReader::from_payload(data).unwrap();
        let error = reader.models().next().unwrap().unwrap_err();
        assert!(matches!(error, Error::Structure { .. }));
        assert!(error.to_string().contains("ST encountered"));
    }

    #[test]
    fn test_unsupported_transaction_is_fatal() {
        let data = wrap("ST*999*0001*005010X999A1~SE*2*0001~");
        let mut reader = ModelReader::from_payload(data).unwrap();
        let error = reader.models().next().unwrap().unwrap_err();
        assert!(matches!(error, Error::UnsupportedTransaction { .. }));
    }

    #[test]
    fn test_version_falls_back_to_gs08() {
        let data = wrap("ST*270*0001~BHT*0022*13*10001234*20060501*1319~SE*3*0001~");
        let mut reader = ModelReader::from_payload(data).unwrap();
        let model = reader.models().next().unwrap().unwrap();
        assert_eq!(model.transaction_code, "270");
    }

    #[test]
    fn test_segment_outside_transaction_is_fatal() {
        let data = wrap("BHT*0022*13*10001234*20060501*1319~");
        let mut reader = ModelReader::from_payload(data).unwrap();
        let error = reader.models().next().unwrap().unwrap_err();
        assert!(matches!(error, Error::Structure { .. }));
    }
}
