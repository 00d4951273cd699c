//! Error types and error handling for the compiler front end.
//!
//! This module defines:
//!
//! - Parse diagnostics as ordered `(token, message)` records
//! - Tokenizer errors
//! - Generation-time (semantic) errors carrying the offending node's
//!   origin token

pub mod errors;
