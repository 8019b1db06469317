//! aqscreen-storage
//!
//! Persistence interface for screening history. Callers hold an
//! `Arc<dyn ObjectStore>` and never reach for a global connection.

pub mod error;
pub mod memory;
pub mod objects;
pub mod records;
pub mod state;
