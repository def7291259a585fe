//! AquaVeda - Community interaction core for a water-sustainability Q&A platform
//!
//! This crate holds the client-side state behind the question board: vote
//! tallies, accepted answers, follows, comment and question drafts, and the
//! profile editor, reconciled against a community backend.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
