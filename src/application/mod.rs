//! Application layer: Use cases and services.
//!
//! This module orchestrates the analysis engine with ports to implement
//! the core use cases of the application.

mod analysis;
pub mod report;

pub use analysis::{AnalysisService, AnalyzedPanel};
