//! # HemoScan
//!
//! CBC anemia classification and risk scoring.
//!
//! This crate provides:
//! - A deterministic rule engine over an 11-parameter complete blood count
//! - A bounded local history of recent analyses
//! - Plain-text reports and an optional streamed clinical narrative
//! - Terminal UI for local use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: The analysis engine (reference ranges, classifier, risk scorer)
//! - `ports`: Trait definitions for history storage and narrative streaming
//! - `adapters`: Concrete implementations (SQLite, reqwest, log sanitizing)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{analyze, AnalysisResult, CbcInput, RiskLevel};

/// Result type for HemoScan operations
pub type Result<T> = std::result::Result<T, HemoscanError>;

/// Main error type for HemoScan
#[derive(Debug, thiserror::Error)]
pub enum HemoscanError {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("Invalid CBC data: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
