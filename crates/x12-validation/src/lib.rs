//! # x12-validation
//!
//! Model binding and validation for parsed X12 transactions.
//!
//! Binding runs after the loop engine hands over a complete ST..SE record:
//! field shape validation and typed coercion first, then segment-scope,
//! loop-scope, and transaction-scope validators, in that order. Validators
//! never abort the bind; every failure becomes a diagnostic on the model
//! and a validator fault is itself a diagnostic.

pub mod binder;
pub mod shape;

pub use binder::bind_transaction;
