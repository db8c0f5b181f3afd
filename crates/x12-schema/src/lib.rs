//! # x12-schema
//!
//! Declarative schemas for X12 005010 healthcare transactions.
//!
//! Three layers of schema data live here, all immutable after startup:
//! base segment schemas keyed by segment id, loop schemas with loop-local
//! segment overrides, and per-transaction dispatch tables mapping segment
//! matches to target loops. Validator functions are attached to schemas as
//! plain function pointers so schemas stay data.

pub mod checks;
pub mod model;
pub mod registry;
pub mod segments;
pub mod transactions;

pub use model::{
    Condition, FieldOverride, FieldSchema, FieldType, HierarchyRole, LoopCheck, LoopSchema,
    LoopSlot, MatchRule, SegmentCheck, SegmentOverride, SegmentSchema, SegmentSlot,
    TransactionCheck, TransactionSchema,
};
pub use registry::{segment_schema, transaction_schema, version_base};

use thiserror::Error;

/// Errors raised while assembling schema tables.
#[derive(Error, Debug)]
pub enum Error {
    #[error("duplicate match rule for segment '{segment_id}' targeting '{target}'")]
    DuplicateRule { segment_id: String, target: String },

    #[error("match rule for '{segment_id}' references unknown loop '{target}'")]
    UnknownRuleTarget { segment_id: String, target: String },
}

/// Crate-local result type for schema assembly.
pub type Result<T> = std::result::Result<T, Error>;
