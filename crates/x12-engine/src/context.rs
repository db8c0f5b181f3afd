//! Parser context.
//!
//! Tracks the active loop path into the in-progress record tree plus the
//! cached hierarchy pointers some transactions navigate by: the current
//! subscriber record, the current patient record, and the most recently
//! observed HL segment.

use x12_ir::{RecordPath, SegmentRecord};

/// Ephemeral state for one ST..SE window.
#[derive(Debug, Default)]
pub struct ParserContext {
    path: RecordPath,
    /// Path of the most recent subscriber-level loop instance.
    pub subscriber_path: Option<RecordPath>,
    /// Path of the most recent patient/dependent-level loop instance.
    pub patient_path: Option<RecordPath>,
    /// The most recently observed HL segment.
    pub hl_segment: Option<SegmentRecord>,
}

impl ParserContext {
    /// Fresh context at the transaction root.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active loop path from the root.
    pub fn path(&self) -> &RecordPath {
        &self.path
    }

    /// Active loop names, shallowest first.
    pub fn loop_names(&self) -> Vec<&str> {
        self.path.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// The active loop name, if any loop has been entered.
    pub fn loop_name(&self) -> Option<&str> {
        self.path.last().map(|(name, _)| name.as_str())
    }

    /// Unwind to the given depth (number of frames kept).
    pub fn unwind_to(&mut self, depth: usize) {
        self.path.truncate(depth);
    }

    /// Descend into a loop instance.
    pub fn push(&mut self, name: impl Into<String>, index: usize) {
        self.path.push((name.into(), index));
    }

    /// Reset between transactions.
    pub fn reset(&mut self) {
        self.path.clear();
        self.subscriber_path = None;
        self.patient_path = None;
        self.hl_segment = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_operations() {
        let mut context = ParserContext::new();
        assert!(context.loop_name().is_none());

        context.push("loop_2000a", 0);
        context.push("loop_2000b", 1);
        assert_eq!(context.loop_name(), Some("loop_2000b"));
        assert_eq!(context.loop_names(), vec!["loop_2000a", "loop_2000b"]);

        context.unwind_to(1);
        assert_eq!(context.loop_name(), Some("loop_2000a"));

        context.reset();
        assert!(context.path().is_empty());
    }
}
