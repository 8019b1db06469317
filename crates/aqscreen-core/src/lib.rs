//! aqscreen-core
//!
//! Pure domain types and storage key conventions shared by the host and the
//! persistence layer. No dependency on the scoring engine.

pub mod error;
pub mod keys;
pub mod models;
