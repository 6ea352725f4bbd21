//! Analysis result assembly.

use serde::{Deserialize, Serialize};

use super::assessment::{evaluate, ParameterAssessment};
use super::cbc::CbcInput;
use super::classification::{classify, Classification};
use super::recommendation::recommend;
use super::risk::{score, RiskLevel};

/// Nominal model performance figures shown alongside every result.
///
/// Fixed constants; no model is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetrics {
    pub svm_accuracy: f64,
    pub lr_accuracy: f64,
    pub svm_precision: f64,
    pub lr_precision: f64,
    pub svm_recall: f64,
    pub lr_recall: f64,
    pub svm_f1: f64,
    pub lr_f1: f64,
}

impl ModelMetrics {
    pub const NOMINAL: ModelMetrics = ModelMetrics {
        svm_accuracy: 0.934,
        lr_accuracy: 0.912,
        svm_precision: 0.941,
        lr_precision: 0.908,
        svm_recall: 0.927,
        lr_recall: 0.919,
        svm_f1: 0.934,
        lr_f1: 0.913,
    };
}

/// Complete output of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub classification: Classification,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub parameters: Vec<ParameterAssessment>,
    pub model_metrics: ModelMetrics,
    pub recommendations: Vec<String>,
}

/// Analyze a CBC panel.
///
/// Total over any input: out-of-range values are evaluated, not rejected.
#[must_use]
pub fn analyze(input: &CbcInput) -> AnalysisResult {
    let parameters = evaluate(input);
    let classification = classify(input);
    let risk = score(&parameters, classification.severity);
    let recommendations = recommend(classification.anemia_type, classification.severity);

    AnalysisResult {
        classification,
        risk_score: risk.score,
        risk_level: risk.level,
        parameters,
        model_metrics: ModelMetrics::NOMINAL,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{samples, AnemiaType, Severity};

    fn run(id: &str) -> AnalysisResult {
        analyze(&samples::find(id).expect("Sample exists").data)
    }

    #[test]
    fn test_normal_panel() {
        let result = run("normal");
        assert_eq!(result.classification.anemia_type, AnemiaType::NoAnemia);
        assert_eq!(result.classification.severity, Severity::Normal);
        assert_eq!(result.risk_score, 0);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.recommendations.len(), 2);
    }

    #[test]
    fn test_iron_deficiency_panel() {
        let result = run("iron-def");
        assert_eq!(result.classification.anemia_type, AnemiaType::IronDeficiency);
        assert_eq!(result.classification.severity, Severity::Moderate);
        assert!((result.classification.confidence - 0.94).abs() < f64::EPSILON);
        // 8 abnormal parameters + moderate bonus, clamped
        assert_eq!(result.risk_score, 100);
        assert_eq!(result.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_b12_panel() {
        let result = run("b12-def");
        assert_eq!(result.classification.anemia_type, AnemiaType::Megaloblastic);
        assert!((result.classification.confidence - 0.89).abs() < f64::EPSILON);
        assert_eq!(result.recommendations[1], "Check Vitamin B12 and folate serum levels.");
    }

    #[test]
    fn test_thalassemia_panel() {
        let result = run("thalassemia");
        assert_eq!(result.classification.anemia_type, AnemiaType::ThalassemiaTrait);
        assert!((result.classification.confidence - 0.82).abs() < f64::EPSILON);
        // 6 abnormal * 12 + 25
        assert_eq!(result.risk_score, 97);
    }

    #[test]
    fn test_chronic_panel_score() {
        let result = run("chronic");
        // 5 abnormal * 12 + 10 lands exactly on the critical boundary
        assert_eq!(result.risk_score, 70);
        assert_eq!(result.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_metrics_are_constant() {
        assert_eq!(run("normal").model_metrics, run("severe").model_metrics);
        assert!((run("normal").model_metrics.svm_precision - 0.941).abs() < f64::EPSILON);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let input = samples::find("thalassemia").expect("Sample exists").data;
        let a = serde_json::to_string(&analyze(&input)).expect("Should serialize");
        let b = serde_json::to_string(&analyze(&input)).expect("Should serialize");
        assert_eq!(a, b);
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(run("normal")).expect("Should serialize");
        assert_eq!(json["riskScore"], 0);
        assert_eq!(json["riskLevel"], "low");
        assert_eq!(json["classification"]["type"], "No Anemia Detected");
        assert_eq!(json["parameters"][0]["refMin"], 12.0);
        assert_eq!(json["modelMetrics"]["svmAccuracy"], 0.934);
    }
}
