//! Domain layer: the CBC analysis engine.
//!
//! Pure, synchronous functions with no I/O. `analyze` is the single entry
//! point collaborators call; the other modules are its building blocks.

mod analysis;
mod assessment;
mod cbc;
mod classification;
pub mod diet;
mod history;
mod recommendation;
mod reference;
mod risk;
pub mod samples;

pub use analysis::{analyze, AnalysisResult, ModelMetrics};
pub use assessment::{evaluate, ParameterAssessment, ParameterStatus};
pub use cbc::{CbcInput, Parameter, Sex};
pub use classification::{classify, AnemiaType, Classification, Severity};
pub use history::{HistoryEntry, HISTORY_LIMIT};
pub use recommendation::recommend;
pub use reference::{lookup, ReferenceRange};
pub use risk::{score, Risk, RiskLevel};
