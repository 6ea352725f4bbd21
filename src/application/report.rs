//! Plain-text analysis reports.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::diet::diet_plan;
use crate::domain::{AnalysisResult, CbcInput, Severity};
use crate::HemoscanError;

const RULE: &str =
    "======================================================================";
const THIN_RULE: &str =
    "----------------------------------------------------------------------";

const DISCLAIMER: &str = "Disclaimer: This report is for educational and decision-support purposes only. Always consult a qualified healthcare professional.";

/// Render a report for one analyzed panel.
#[must_use]
pub fn render_report(
    input: &CbcInput,
    result: &AnalysisResult,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    let classification = &result.classification;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "HemoScan: Anemia Detection & Risk Analysis Report");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "Generated: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "Patient:   {}, Age {}", input.sex, input.age);
    let _ = writeln!(out);

    let _ = writeln!(out, "CLASSIFICATION");
    let _ = writeln!(out, "{THIN_RULE}");
    let _ = writeln!(out, "Type:       {}", classification.anemia_type);
    let _ = writeln!(
        out,
        "Severity:   {}",
        classification.severity.to_string().to_uppercase()
    );
    let _ = writeln!(
        out,
        "Confidence: {:.1}%",
        classification.confidence * 100.0
    );
    let _ = writeln!(
        out,
        "Risk:       {}/100 ({})",
        result.risk_score,
        result.risk_level.as_str()
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "CBC PARAMETERS");
    let _ = writeln!(out, "{THIN_RULE}");
    let _ = writeln!(
        out,
        "{:<12} {:>8}  {:<6} {:<15} {}",
        "Parameter", "Value", "Unit", "Ref Range", "Status"
    );
    for p in &result.parameters {
        let _ = writeln!(
            out,
            "{:<12} {:>8}  {:<6} {:<15} {}",
            p.name,
            p.value,
            p.unit,
            format!("{} – {}", p.ref_min, p.ref_max),
            p.status
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "CLINICAL RECOMMENDATIONS");
    let _ = writeln!(out, "{THIN_RULE}");
    for (i, rec) in result.recommendations.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, rec);
    }

    if classification.severity != Severity::Normal {
        let plan = diet_plan(classification.anemia_type);
        let _ = writeln!(out);
        let _ = writeln!(out, "PERSONALIZED DIET PLAN: {}", plan.title);
        let _ = writeln!(out, "{THIN_RULE}");
        let _ = writeln!(out, "Recommended Foods:");
        for food in &plan.foods {
            let _ = writeln!(out, "  • {}: {}", food.name, food.benefit);
        }
        let _ = writeln!(out, "Foods to Avoid:");
        for item in &plan.avoid {
            let _ = writeln!(out, "  • {item}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{THIN_RULE}");
    let _ = writeln!(out, "{DISCLAIMER}");
    out
}

/// Write a report into `dir`, creating it if needed.
///
/// # Errors
/// Returns error if the directory or file cannot be written.
pub fn write_report(
    dir: &Path,
    input: &CbcInput,
    result: &AnalysisResult,
    generated_at: DateTime<Utc>,
) -> Result<PathBuf, HemoscanError> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join(format!(
        "hemoscan-report-{}.txt",
        generated_at.format("%Y%m%d-%H%M%S")
    ));
    std::fs::write(&path, render_report(input, result, generated_at))?;

    tracing::info!("Report written to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{analyze, samples};
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
            .single()
            .expect("Valid timestamp")
    }

    #[test]
    fn test_report_for_iron_deficiency() {
        let input = samples::find("iron-def").expect("Sample exists").data;
        let result = analyze(&input);
        let report = render_report(&input, &result, fixed_time());

        assert!(report.contains("Generated: 2026-03-14 09:30:00 UTC"));
        assert!(report.contains("Patient:   Female, Age 28"));
        assert!(report.contains("Type:       Iron Deficiency Anemia"));
        assert!(report.contains("Severity:   MODERATE"));
        assert!(report.contains("Confidence: 94.0%"));
        assert!(report.contains("Risk:       100/100 (critical)"));
        assert!(report.contains("12 – 15.5"));
        assert!(report.contains("LOW"));
        assert!(report.contains("1. "));
        assert!(report.contains("PERSONALIZED DIET PLAN: Iron-Rich Recovery Diet"));
        assert!(report.contains("Red Meat & Liver"));
        assert!(report.ends_with(&format!("{DISCLAIMER}\n")));
    }

    #[test]
    fn test_normal_report_has_no_diet_plan() {
        let input = samples::find("normal").expect("Sample exists").data;
        let report = render_report(&input, &analyze(&input), fixed_time());

        assert!(report.contains("Type:       No Anemia Detected"));
        assert!(report.contains("Risk:       0/100 (low)"));
        assert!(!report.contains("DIET PLAN"));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let target = dir.path().join("reports");
        let input = samples::find("thalassemia").expect("Sample exists").data;
        let result = analyze(&input);

        let path = write_report(&target, &input, &result, fixed_time()).expect("Should write");
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("hemoscan-report-20260314-093000.txt")
        );

        let content = std::fs::read_to_string(&path).expect("Should read");
        assert_eq!(content, render_report(&input, &result, fixed_time()));
    }
}
