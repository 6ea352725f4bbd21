//! Per-parameter evaluation against reference ranges.

use serde::{Deserialize, Serialize};

use super::cbc::{CbcInput, Parameter};

/// Position of a value relative to its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterStatus {
    Normal,
    Low,
    High,
}

impl ParameterStatus {
    /// Status of `value` against `[min, max]`.
    #[must_use]
    pub fn of(value: f64, min: f64, max: f64) -> Self {
        if value < min {
            Self::Low
        } else if value > max {
            Self::High
        } else {
            Self::Normal
        }
    }
}

impl std::fmt::Display for ParameterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// One evaluated parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterAssessment {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub status: ParameterStatus,
    pub ref_min: f64,
    pub ref_max: f64,
}

/// Evaluate all 11 parameters in display order.
#[must_use]
pub fn evaluate(input: &CbcInput) -> Vec<ParameterAssessment> {
    Parameter::ALL
        .iter()
        .map(|p| {
            let value = input.value(*p);
            let range = p.reference_range(input.sex);
            ParameterAssessment {
                name: p.label().to_string(),
                value,
                unit: p.unit().to_string(),
                status: ParameterStatus::of(value, range.min, range.max),
                ref_min: range.min,
                ref_max: range.max,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::samples;

    #[test]
    fn test_status_bounds_are_inclusive() {
        assert_eq!(ParameterStatus::of(12.0, 12.0, 15.5), ParameterStatus::Normal);
        assert_eq!(ParameterStatus::of(15.5, 12.0, 15.5), ParameterStatus::Normal);
        assert_eq!(ParameterStatus::of(11.9, 12.0, 15.5), ParameterStatus::Low);
        assert_eq!(ParameterStatus::of(15.6, 12.0, 15.5), ParameterStatus::High);
    }

    #[test]
    fn test_evaluate_returns_eleven_in_order() {
        let input = samples::find("normal").expect("Sample exists").data;
        let params = evaluate(&input);

        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Hemoglobin", "Hematocrit", "RBC Count", "MCV", "MCH", "MCHC", "RDW", "WBC",
                "Platelets", "Serum Iron", "Ferritin",
            ]
        );
        assert!(params.iter().all(|p| p.status == ParameterStatus::Normal));
    }

    #[test]
    fn test_evaluate_uses_patient_sex() {
        let mut input = samples::find("normal").expect("Sample exists").data;
        input.hemoglobin = 13.0;

        let female = evaluate(&input);
        assert_eq!(female[0].status, ParameterStatus::Normal);
        assert!((female[0].ref_min - 12.0).abs() < f64::EPSILON);

        input.sex = crate::domain::Sex::Male;
        let male = evaluate(&input);
        assert_eq!(male[0].status, ParameterStatus::Low);
        assert!((male[0].ref_min - 13.5).abs() < f64::EPSILON);
    }
}
