//! Fixed-layout interchange header handling.
//!
//! The ISA segment occupies the first 106 characters of a transmission and
//! defines the delimiter set for everything that follows.

use crate::{Error, Result};
use x12_ir::Delimiters;

/// Total length of the ISA segment, terminator included.
pub const ISA_SEGMENT_LENGTH: usize = 106;
/// Offset of the element separator.
pub const ISA_ELEMENT_SEPARATOR: usize = 3;
/// Offset of the repetition separator (ISA11).
pub const ISA_REPETITION_SEPARATOR: usize = 82;
/// Offset of the component separator (ISA16).
pub const ISA_COMPONENT_SEPARATOR: usize = 104;
/// Offset of the segment terminator.
pub const ISA_SEGMENT_TERMINATOR: usize = 105;

/// Fixed widths of ISA01..ISA16. The identifier itself is 3 characters.
pub const ISA_FIELD_WIDTHS: [usize; 16] = [2, 10, 2, 10, 2, 15, 2, 15, 6, 4, 1, 5, 9, 1, 1, 1];

/// Detect the delimiter set from the opening interchange header.
///
/// Reads exactly [`ISA_SEGMENT_LENGTH`] characters and returns the
/// delimiters together with the ISA fields, split on the element separator
/// and left padded exactly as they appear on the wire.
pub fn detect_delimiters(input: &str) -> Result<(Delimiters, Vec<String>)> {
    let bytes = input.as_bytes();

    if bytes.len() < ISA_SEGMENT_LENGTH {
        return Err(Error::Delimiter(format!(
            "interchange header requires {ISA_SEGMENT_LENGTH} characters, found {}",
            bytes.len()
        )));
    }
    if !input.starts_with("ISA") {
        return Err(Error::Delimiter(
            "input does not begin with an ISA segment".to_string(),
        ));
    }

    let delimiters = Delimiters::new(
        bytes[ISA_ELEMENT_SEPARATOR] as char,
        bytes[ISA_REPETITION_SEPARATOR] as char,
        bytes[ISA_COMPONENT_SEPARATOR] as char,
        bytes[ISA_SEGMENT_TERMINATOR] as char,
    );

    if let Some(violation) = delimiters.violation() {
        return Err(Error::Delimiter(violation));
    }

    let header = input.get(..ISA_SEGMENT_TERMINATOR).ok_or_else(|| {
        Error::Delimiter("interchange header contains non-ASCII data".to_string())
    })?;
    let fields: Vec<String> = header
        .split(delimiters.element)
        .map(str::to_string)
        .collect();

    // ISA is 16 data elements plus the identifier itself.
    if fields.len() != ISA_FIELD_WIDTHS.len() + 1 {
        return Err(Error::Delimiter(format!(
            "interchange header has {} elements, expected {}",
            fields.len() - 1,
            ISA_FIELD_WIDTHS.len()
        )));
    }

    Ok((delimiters, fields))
}
