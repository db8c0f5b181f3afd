//! X12 renderer.
//!
//! Segments render as identifier plus element-separated fields with trailing
//! empty fields stripped, per X12 convention. The interchange header renders
//! fixed-width. Delimiters come from the rendered record itself.

use crate::syntax::ISA_FIELD_WIDTHS;
use x12_ir::{LoopRecord, SegmentRecord, TransactionModel};

/// Render a single segment to wire text, terminator included.
pub fn render_segment(segment: &SegmentRecord) -> String {
    let delimiters = segment.delimiters;

    let mut rendered = if segment.id == "ISA" {
        let mut parts: Vec<String> = Vec::with_capacity(segment.fields.len());
        parts.push("ISA".to_string());
        for (index, width) in ISA_FIELD_WIDTHS.iter().enumerate() {
            let raw = segment.value(index + 1);
            parts.push(pad_fixed(raw, *width));
        }
        parts.join(&delimiters.element.to_string())
    } else {
        let mut fields: Vec<&str> = segment.fields.iter().map(|f| f.raw.as_str()).collect();
        while fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        fields.join(&delimiters.element.to_string())
    };

    rendered.push(delimiters.segment);
    rendered
}

/// Render a complete transaction model back to wire text.
///
/// `pretty` inserts a newline after each segment terminator for
/// human-readable output; the wire format uses the terminator alone.
pub fn render_model(model: &TransactionModel, pretty: bool) -> String {
    let mut segments = Vec::new();
    model.root.collect_segments(&mut segments);

    let rendered: Vec<String> = segments.iter().map(|s| render_segment(s)).collect();
    let joiner = if pretty { "\n" } else { "" };
    rendered.join(joiner)
}

/// Render a loop subtree to wire text.
pub fn render_loop(record: &LoopRecord, pretty: bool) -> String {
    let mut segments = Vec::new();
    record.collect_segments(&mut segments);

    let rendered: Vec<String> = segments.iter().map(|s| render_segment(s)).collect();
    let joiner = if pretty { "\n" } else { "" };
    rendered.join(joiner)
}

fn pad_fixed(value: &str, width: usize) -> String {
    if value.len() >= width {
        value.to_string()
    } else {
        format!("{value:<width$}")
    }
}
