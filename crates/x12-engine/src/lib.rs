//! # x12-engine
//!
//! Streaming readers for X12 interchanges: `SegmentReader` yields raw
//! segment tokens with no validation; `ModelReader` runs the full pipeline,
//! inferring loops per transaction dispatch tables and handing each ST..SE
//! window to the binder. Rendering a bound model back to wire text round
//! trips through the same delimiters the message arrived with.

pub mod context;
pub mod io;
pub mod json;
pub mod parser;

pub use io::{ModelReader, SegmentReader};
pub use json::{model_to_json, segments_to_json};

use thiserror::Error;
use x12_ir::TransactionModel;

/// Render a bound transaction model back to X12 wire text.
///
/// `pretty` separates segments with terminator plus newline instead of the
/// terminator alone.
pub fn render(model: &TransactionModel, pretty: bool) -> String {
    x12_wire::render_model(model, pretty)
}

/// Errors that abort a parse. Non-fatal findings accumulate as diagnostics
/// on the returned models instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Wire(#[from] x12_wire::Error),

    #[error(transparent)]
    Record(#[from] x12_ir::Error),

    /// The envelope structure is irredeemably malformed.
    #[error("invalid envelope structure at segment {position}: {message}")]
    Structure { position: usize, message: String },

    /// No dispatch table is registered for the transaction.
    #[error("unsupported transaction {code} ({version})")]
    UnsupportedTransaction { code: String, version: String },
}

/// Crate-local result type for parsing operations.
pub type Result<T> = std::result::Result<T, Error>;
