//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Reports keep input order unless explicitly sorted
//! - Byte-for-byte identical output across runs

use crate::aggregates::PopulationSummary;
use crate::assessment::Assessment;
use crate::metrics::{VitalSigns, VitalStatus};
use crate::risk::{RiskTier, TierProbabilities};
use crate::scoring::FactorContribution;
use serde::{Deserialize, Serialize};

/// Complete risk report for one patient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct PatientRiskReport {
    /// Position in the input, starting at 1
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    pub risk_score: u8,
    pub risk_tier: RiskTier,
    pub tier_probabilities: TierProbabilities,
    pub bmi: f64,
    pub vitals: VitalSigns,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub factors: Vec<FactorContribution>,
    pub recommendations: Vec<RecommendationReport>,
}

/// Recommendation in report format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationReport {
    pub id: String,
    pub message: String,
}

impl PatientRiskReport {
    /// Create a new patient risk report
    pub fn new(index: usize, patient_id: Option<String>, assessment: &Assessment) -> Self {
        PatientRiskReport {
            index,
            patient_id,
            risk_score: assessment.risk_score,
            risk_tier: assessment.risk_tier,
            tier_probabilities: assessment.tier_probabilities,
            bmi: assessment.bmi,
            vitals: assessment.vitals,
            factors: assessment.factors.clone(),
            recommendations: assessment
                .recommendations
                .iter()
                .map(|r| RecommendationReport {
                    id: r.id().to_string(),
                    message: r.message().to_string(),
                })
                .collect(),
        }
    }

    /// Label used in text output
    pub fn label(&self) -> String {
        match &self.patient_id {
            Some(id) => format!("{} (#{})", id, self.index),
            None => format!("#{}", self.index),
        }
    }
}

/// Sort reports by urgency
pub fn sort_reports(mut reports: Vec<PatientRiskReport>) -> Vec<PatientRiskReport> {
    reports.sort_by(|a, b| {
        // 1. Score descending
        b.risk_score
            .cmp(&a.risk_score)
            // 2. Input position ascending
            .then_with(|| a.index.cmp(&b.index))
    });
    reports
}

fn status_str(status: VitalStatus) -> &'static str {
    match status {
        VitalStatus::Normal => "Normal",
        VitalStatus::High => "High",
        VitalStatus::Check => "Check",
    }
}

fn percent(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

/// Render reports as text output
pub fn render_text(reports: &[PatientRiskReport]) -> String {
    let mut output = String::new();

    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        output.push_str(&format!("Patient {}\n", report.label()));
        output.push_str(&format!(
            "  {:<16} {} ({}/100)\n",
            "Risk:",
            report.risk_tier.as_str().to_uppercase(),
            report.risk_score
        ));
        output.push_str(&format!(
            "  {:<16} {:.1} ({})\n",
            "BMI:",
            report.bmi,
            status_str(report.vitals.bmi)
        ));
        output.push_str(&format!(
            "  {:<16} BP {}, Glucose {}, Pulse {}\n",
            "Vitals:",
            status_str(report.vitals.blood_pressure),
            status_str(report.vitals.glucose),
            status_str(report.vitals.pulse)
        ));
        output.push_str(&format!(
            "  {:<16} Low {}  Medium {}  High {}\n",
            "Probabilities:",
            percent(report.tier_probabilities.low),
            percent(report.tier_probabilities.medium),
            percent(report.tier_probabilities.high)
        ));

        let factors = if report.factors.is_empty() {
            "-".to_string()
        } else {
            report
                .factors
                .iter()
                .map(|f| format!("{} +{}", f.factor.as_str(), f.points))
                .collect::<Vec<_>>()
                .join(", ")
        };
        output.push_str(&format!("  {:<16} {}\n", "Factors:", factors));

        output.push_str("  Recommendations:\n");
        for (n, rec) in report.recommendations.iter().enumerate() {
            output.push_str(&format!("    {}. {}\n", n + 1, rec.message));
        }
    }

    output
}

/// Render reports as JSON output
pub fn render_json(reports: &[PatientRiskReport]) -> String {
    serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
}

/// Render reports as JSON Lines (one compact object per line)
pub fn render_jsonl(reports: &[PatientRiskReport]) -> String {
    let mut output = String::new();
    for report in reports {
        if let Ok(line) = serde_json::to_string(report) {
            output.push_str(&line);
            output.push('\n');
        }
    }
    output
}

/// Render a population summary as text
pub fn render_summary_text(summary: &PopulationSummary) -> String {
    let mut output = String::new();
    output.push_str("Population summary\n");
    output.push_str(&format!("  {:<16} {}\n", "Patients:", summary.patients));
    output.push_str(&format!(
        "  {:<16} Low {}  Medium {}  High {}\n",
        "Tiers:", summary.tiers.low, summary.tiers.medium, summary.tiers.high
    ));
    output.push_str(&format!("  {:<16} {:.1}\n", "Mean score:", summary.mean_score));
    output.push_str(&format!("  {:<16} {:.1}\n", "Mean BMI:", summary.mean_bmi));
    if !summary.top_factors.is_empty() {
        output.push_str("  Top factors:\n");
        for entry in &summary.top_factors {
            output.push_str(&format!(
                "    {:<24} {}\n",
                entry.factor.as_str(),
                entry.count
            ));
        }
    }
    output
}

/// Render a population summary as JSON
pub fn render_summary_json(summary: &PopulationSummary) -> String {
    serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
}

/// Render a population summary as a single JSON line
pub fn render_summary_jsonl(summary: &PopulationSummary) -> String {
    let mut line = serde_json::to_string(summary).unwrap_or_else(|_| "{}".to_string());
    line.push('\n');
    line
}
