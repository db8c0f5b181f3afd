#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

//! # x12-ir
//!
//! Record structures and diagnostics for ASC X12 transactions.
//!
//! This crate provides the owned record tree produced by parsing: loops
//! holding segments and child loops, the scalar field values they carry, the
//! delimiters discovered from the interchange header, and the structured
//! diagnostics accumulated across validation tiers.

/// Structured validation findings with severity, kind, and location.
pub mod diagnostic;
/// Message delimiters discovered from the interchange header.
pub mod delimiters;
/// Bound transaction model and envelope metadata.
pub mod model;
/// Loop/segment/field record tree and path-based addressing.
pub mod record;

pub use delimiters::Delimiters;
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity, SourceLocation};
pub use model::TransactionModel;
pub use record::{EntryValue, FieldValue, LoopRecord, RecordPath, SegmentRecord, TypedValue};

use thiserror::Error;

/// Errors that can occur when addressing into a record tree
#[derive(Error, Debug)]
pub enum Error {
    #[error("loop not found at path '{path}'")]
    LoopNotFound { path: String },

    #[error("entry '{key}' holds a different record kind")]
    EntryKindMismatch { key: String },
}

/// Crate-local result type for record operations.
pub type Result<T> = std::result::Result<T, Error>;
