//! Advisory recommendations keyed by anemia type and severity.

use super::classification::{AnemiaType, Severity};

const CONSULT: &str = "Consult a hematologist for further evaluation.";
const FOLLOW_UP: &str = "Schedule follow-up CBC in 4-6 weeks.";

/// Ordered recommendations for display.
///
/// Non-normal results always open with the hematologist referral and
/// close with the follow-up CBC; type-specific advice sits in between.
#[must_use]
pub fn recommend(anemia_type: AnemiaType, severity: Severity) -> Vec<String> {
    if severity == Severity::Normal {
        return vec![
            "All parameters within normal reference ranges.".to_string(),
            "Continue routine monitoring as per guidelines.".to_string(),
        ];
    }

    let mut out = vec![CONSULT.to_string()];

    if anemia_type == AnemiaType::IronDeficiency {
        out.push("Consider iron supplementation and dietary modifications.".to_string());
        out.push("Evaluate for possible gastrointestinal blood loss.".to_string());
    }
    if anemia_type == AnemiaType::Megaloblastic {
        out.push("Check Vitamin B12 and folate serum levels.".to_string());
        out.push("Consider supplementation therapy.".to_string());
    }
    if anemia_type == AnemiaType::ThalassemiaTrait {
        out.push("Recommend hemoglobin electrophoresis for confirmation.".to_string());
    }

    out.push(FOLLOW_UP.to_string());
    out
}
