//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod qna;

pub use qna::*;
