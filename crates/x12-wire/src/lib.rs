//! # x12-wire
//!
//! X12 wire format adapter: delimiter detection, streaming segment
//! tokenization, and rendering.
//!
//! The interchange opens with a fixed-layout ISA segment carrying the
//! delimiter set; everything after it is tokenized lazily with those
//! delimiters and rendered back with the same characters.

pub mod reader;
pub mod syntax;
pub mod writer;

pub use reader::{SegmentToken, SegmentTokenizer};
pub use syntax::detect_delimiters;
pub use writer::{render_loop, render_model, render_segment};

use thiserror::Error;

/// Errors raised while reading or tokenizing wire data. All are fatal.
#[derive(Error, Debug)]
pub enum Error {
    /// The interchange header is malformed or its delimiters are invalid.
    #[error("delimiter detection failed: {0}")]
    Delimiter(String),

    /// The byte stream could not be tokenized.
    #[error("tokenization failed at offset {offset}: {message}")]
    Token { offset: usize, message: String },

    /// Underlying I/O failure on the source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-local result type for wire operations.
pub type Result<T> = std::result::Result<T, Error>;
