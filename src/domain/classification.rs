//! Anemia classification.
//!
//! A first-match decision tree over hemoglobin, MCV, ferritin and RDW.
//! Confidence values are fixed per branch.

use serde::{Deserialize, Serialize};

use super::cbc::{CbcInput, Parameter};

/// Closed set of classification outcomes.
///
/// Serializes as the display label so stored results keep the
/// free-text `type` field consumers expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnemiaType {
    #[serde(rename = "No Anemia Detected")]
    NoAnemia,
    #[serde(rename = "Iron Deficiency Anemia")]
    IronDeficiency,
    #[serde(rename = "Megaloblastic Anemia (B12/Folate)")]
    Megaloblastic,
    #[serde(rename = "Anemia of Chronic Disease")]
    ChronicDisease,
    #[serde(rename = "Thalassemia Trait")]
    ThalassemiaTrait,
    #[serde(rename = "Unclassified Anemia")]
    Unclassified,
}

impl AnemiaType {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoAnemia => "No Anemia Detected",
            Self::IronDeficiency => "Iron Deficiency Anemia",
            Self::Megaloblastic => "Megaloblastic Anemia (B12/Folate)",
            Self::ChronicDisease => "Anemia of Chronic Disease",
            Self::ThalassemiaTrait => "Thalassemia Trait",
            Self::Unclassified => "Unclassified Anemia",
        }
    }

    /// Fixed confidence reported for this branch.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        match self {
            Self::NoAnemia => 0.92,
            Self::IronDeficiency => 0.94,
            Self::Megaloblastic => 0.89,
            Self::ChronicDisease => 0.85,
            Self::ThalassemiaTrait => 0.82,
            Self::Unclassified => 0.74,
        }
    }
}

impl std::fmt::Display for AnemiaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Anemia depth tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// Severity bonus added to the risk score.
    #[must_use]
    pub fn risk_bonus(&self) -> i32 {
        match self {
            Self::Normal => 0,
            Self::Mild => 10,
            Self::Moderate => 25,
            Self::Severe => 40,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Mild => write!(f, "mild"),
            Self::Moderate => write!(f, "moderate"),
            Self::Severe => write!(f, "severe"),
        }
    }
}

/// Classification outcome for one panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(rename = "type")]
    pub anemia_type: AnemiaType,
    pub severity: Severity,
    pub confidence: f64,
}

/// Classify a CBC panel.
///
/// Hemoglobin at or above the sex-specific minimum means no anemia.
/// Otherwise the first matching rule wins:
/// 1. MCV < 80 and ferritin < 30: iron deficiency
/// 2. MCV > 100: megaloblastic
/// 3. 80 <= MCV <= 100 and RDW < 15: chronic disease
/// 4. MCV < 80 and ferritin >= 30: thalassemia trait
/// 5. anything else: unclassified
#[must_use]
pub fn classify(input: &CbcInput) -> Classification {
    let hb_min = Parameter::Hemoglobin.reference_range(input.sex).min;
    let hb = input.hemoglobin;

    if hb >= hb_min {
        return Classification {
            anemia_type: AnemiaType::NoAnemia,
            severity: Severity::Normal,
            confidence: AnemiaType::NoAnemia.confidence(),
        };
    }

    let (mcv, ferritin, rdw) = (input.mcv, input.ferritin, input.rdw);

    let anemia_type = if mcv < 80.0 && ferritin < 30.0 {
        AnemiaType::IronDeficiency
    } else if mcv > 100.0 {
        AnemiaType::Megaloblastic
    } else if (80.0..=100.0).contains(&mcv) && rdw < 15.0 {
        AnemiaType::ChronicDisease
    } else if mcv < 80.0 && ferritin >= 30.0 {
        AnemiaType::ThalassemiaTrait
    } else {
        AnemiaType::Unclassified
    };

    let severity = if hb >= hb_min - 2.0 {
        Severity::Mild
    } else if hb >= hb_min - 4.0 {
        Severity::Moderate
    } else {
        Severity::Severe
    };

    Classification {
        anemia_type,
        severity,
        confidence: anemia_type.confidence(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{samples, Sex};

    fn sample(id: &str) -> CbcInput {
        samples::find(id).expect("Sample exists").data
    }

    #[test]
    fn test_hemoglobin_at_minimum_is_not_anemic() {
        let mut input = sample("iron-def");
        input.hemoglobin = 12.0;
        let c = classify(&input);
        assert_eq!(c.anemia_type, AnemiaType::NoAnemia);
        assert_eq!(c.severity, Severity::Normal);
        assert!((c.confidence - 0.92).abs() < f64::EPSILON);

        input.sex = Sex::Male;
        assert_eq!(classify(&input).anemia_type, AnemiaType::IronDeficiency);
    }

    #[test]
    fn test_sample_classifications() {
        let cases = [
            ("normal", AnemiaType::NoAnemia, Severity::Normal, 0.92),
            ("iron-def", AnemiaType::IronDeficiency, Severity::Moderate, 0.94),
            ("b12-def", AnemiaType::Megaloblastic, Severity::Severe, 0.89),
            ("thalassemia", AnemiaType::ThalassemiaTrait, Severity::Moderate, 0.82),
            ("chronic", AnemiaType::ChronicDisease, Severity::Mild, 0.85),
            ("severe", AnemiaType::IronDeficiency, Severity::Severe, 0.94),
        ];

        for (id, ty, severity, confidence) in cases {
            let c = classify(&sample(id));
            assert_eq!(c.anemia_type, ty, "{id}");
            assert_eq!(c.severity, severity, "{id}");
            assert!((c.confidence - confidence).abs() < f64::EPSILON, "{id}");
        }
    }

    #[test]
    fn test_normocytic_with_wide_rdw_is_unclassified() {
        let mut input = sample("chronic");
        input.rdw = 16.0;
        let c = classify(&input);
        assert_eq!(c.anemia_type, AnemiaType::Unclassified);
        assert!((c.confidence - 0.74).abs() < f64::EPSILON);
    }

    #[test]
    fn test_branch_order_on_mcv_boundaries() {
        let mut input = sample("chronic");

        // MCV exactly 100 is normocytic, not megaloblastic
        input.mcv = 100.0;
        assert_eq!(classify(&input).anemia_type, AnemiaType::ChronicDisease);

        // MCV exactly 80 with low ferritin is not iron deficiency
        input.mcv = 80.0;
        input.ferritin = 5.0;
        assert_eq!(classify(&input).anemia_type, AnemiaType::ChronicDisease);

        // Ferritin exactly 30 with microcytosis is thalassemia trait
        input.mcv = 70.0;
        input.ferritin = 30.0;
        assert_eq!(classify(&input).anemia_type, AnemiaType::ThalassemiaTrait);
    }

    #[test]
    fn test_severity_thresholds() {
        let mut input = sample("chronic");
        input.sex = Sex::Female;

        input.hemoglobin = 10.0;
        assert_eq!(classify(&input).severity, Severity::Mild);
        input.hemoglobin = 9.99;
        assert_eq!(classify(&input).severity, Severity::Moderate);
        input.hemoglobin = 8.0;
        assert_eq!(classify(&input).severity, Severity::Moderate);
        input.hemoglobin = 7.99;
        assert_eq!(classify(&input).severity, Severity::Severe);
    }

    #[test]
    fn test_negative_hemoglobin_is_accepted() {
        let mut input = sample("normal");
        input.hemoglobin = -1.0;
        let c = classify(&input);
        assert_eq!(c.severity, Severity::Severe);
        assert_eq!(c.anemia_type, AnemiaType::ChronicDisease);
    }

    #[test]
    fn test_type_serializes_as_label() {
        let c = classify(&sample("b12-def"));
        let json = serde_json::to_value(c).expect("Should serialize");
        assert_eq!(json["type"], "Megaloblastic Anemia (B12/Folate)");
        assert_eq!(json["severity"], "severe");
    }
}
