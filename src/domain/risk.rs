//! Composite risk scoring.

use serde::{Deserialize, Serialize};

use super::assessment::{ParameterAssessment, ParameterStatus};
use super::classification::Severity;

/// Points added for each parameter outside its reference range.
pub const ABNORMAL_PARAMETER_POINTS: i32 = 12;

/// Upper bound of the risk score.
pub const MAX_RISK_SCORE: i32 = 100;

/// Discrete risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Score below 20
    Low,
    /// Score 20 to 44
    Moderate,
    /// Score 45 to 69
    High,
    /// Score 70 and above
    Critical,
}

impl RiskLevel {
    /// Band for a clamped score.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        if score < 20 {
            Self::Low
        } else if score < 45 {
            Self::Moderate
        } else if score < 70 {
            Self::High
        } else {
            Self::Critical
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - No significant abnormalities",
            Self::Moderate => "Moderate risk - Follow-up recommended",
            Self::High => "High risk - Clinical evaluation advised",
            Self::Critical => "Critical risk - Urgent intervention advised",
        }
    }

    /// Lowercase wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Clamped score and its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Risk {
    pub score: u8,
    pub level: RiskLevel,
}

/// Score a panel from its parameter assessments and anemia severity.
#[must_use]
pub fn score(parameters: &[ParameterAssessment], severity: Severity) -> Risk {
    let abnormal = parameters
        .iter()
        .filter(|p| p.status != ParameterStatus::Normal)
        .count() as i32;

    let raw = abnormal * ABNORMAL_PARAMETER_POINTS + severity.risk_bonus();
    let score = raw.clamp(0, MAX_RISK_SCORE) as u8;

    Risk {
        score,
        level: RiskLevel::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(abnormal: usize) -> Vec<ParameterAssessment> {
        (0..11)
            .map(|i| ParameterAssessment {
                name: format!("p{i}"),
                value: 1.0,
                unit: String::new(),
                status: if i < abnormal {
                    ParameterStatus::Low
                } else {
                    ParameterStatus::Normal
                },
                ref_min: 0.0,
                ref_max: 2.0,
            })
            .collect()
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(19), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(20), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(44), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(45), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(69), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Critical);
    }

    #[test]
    fn test_score_accumulates() {
        assert_eq!(score(&params(0), Severity::Normal).score, 0);
        assert_eq!(score(&params(1), Severity::Normal).score, 12);
        assert_eq!(score(&params(2), Severity::Mild).score, 34);
        assert_eq!(score(&params(1), Severity::Moderate).score, 37);
        assert_eq!(score(&params(0), Severity::Severe).score, 40);
    }

    #[test]
    fn test_score_is_clamped() {
        let risk = score(&params(11), Severity::Severe);
        assert_eq!(risk.score, 100);
        assert_eq!(risk.level, RiskLevel::Critical);
    }

    #[test]
    fn test_high_counts_as_abnormal() {
        let mut p = params(0);
        p[3].status = ParameterStatus::High;
        assert_eq!(score(&p, Severity::Normal).score, 12);
    }
}
