//! Adapters layer: Concrete implementations of ports.
//!
//! - `sqlite`: SQLite for the rolling analysis history
//! - `narrative`: HTTP streaming client for clinical commentary
//! - `sanitize`: credential filtering for logs

pub mod narrative;
pub mod sanitize;
pub mod sqlite;

// Re-export storage error for lib.rs
pub use sqlite::StorageError;
