//! Narrative port: Trait for streamed free-text commentary on a result.
//!
//! The narrative is informational only. Nothing it returns feeds back
//! into classification, risk or recommendations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{AnalysisResult, CbcInput, RiskLevel};

/// Errors that can occur while streaming a narrative.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NarrativeError {
    #[error("Narrative service is not configured: {0}")]
    NotConfigured(String),

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("AI credits exhausted. Please add credits.")]
    CreditsExhausted,

    #[error("Narrative request failed with HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Narrative transport error: {0}")]
    Transport(String),

    #[error("Narrative stream cancelled")]
    Cancelled,
}

/// Payload sent to the narrative service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeRequest {
    pub cbc_data: CbcInput,
    /// Display label of the anemia type
    pub classification: String,
    pub risk_level: RiskLevel,
    pub risk_score: u8,
}

impl NarrativeRequest {
    /// Build the request for an analyzed panel.
    #[must_use]
    pub fn new(input: &CbcInput, result: &AnalysisResult) -> Self {
        Self {
            cbc_data: *input,
            classification: result.classification.anemia_type.label().to_string(),
            risk_level: result.risk_level,
            risk_score: result.risk_score,
        }
    }
}

/// Shared cancellation flag for an in-flight stream.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Trait for narrative providers.
pub trait NarrativeProvider: Send + Sync {
    /// Stream commentary for `request`, calling `on_chunk` with each text delta.
    ///
    /// Implementations check `cancel` between chunks.
    ///
    /// # Errors
    /// Returns `NarrativeError::Cancelled` if cancelled before completion,
    /// or the transport/service error that ended the stream.
    fn stream(
        &self,
        request: &NarrativeRequest,
        cancel: &CancelFlag,
        on_chunk: &mut dyn FnMut(&str),
    ) -> Result<(), NarrativeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{analyze, samples};

    #[test]
    fn test_request_payload_shape() {
        let input = samples::find("iron-def").expect("Sample exists").data;
        let result = analyze(&input);
        let request = NarrativeRequest::new(&input, &result);

        let json = serde_json::to_value(&request).expect("Should serialize");
        assert_eq!(json["classification"], "Iron Deficiency Anemia");
        assert_eq!(json["riskLevel"], "critical");
        assert_eq!(json["riskScore"], 100);
        assert_eq!(json["cbcData"]["sex"], "female");
    }

    #[test]
    fn test_cancel_flag_is_shared() {
        let flag = CancelFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_cancelled());
        flag.cancel();
        assert!(clone.is_cancelled());
    }
}
