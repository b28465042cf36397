//! Population aggregates over a batch of assessments
//!
//! Global invariants enforced:
//! - Aggregates are strictly derived (never stored, always computed)
//! - Deterministic ordering

use crate::metrics::round_one_decimal;
use crate::report::PatientRiskReport;
use crate::risk::RiskTier;
use crate::scoring::Factor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of factors listed in a summary
pub const TOP_FACTORS: usize = 5;

/// Patients per tier
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct TierCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl TierCounts {
    fn record(&mut self, tier: RiskTier) {
        match tier {
            RiskTier::Low => self.low += 1,
            RiskTier::Medium => self.medium += 1,
            RiskTier::High => self.high += 1,
        }
    }
}

/// How often one factor fired across the batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct FactorFrequency {
    pub factor: Factor,
    pub count: usize,
}

/// Batch-level view of a set of assessments
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct PopulationSummary {
    pub patients: usize,
    pub tiers: TierCounts,
    pub mean_score: f64,
    pub mean_bmi: f64,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub top_factors: Vec<FactorFrequency>,
}

/// Summarize a batch of reports; an empty batch yields zeros
pub fn summarize(reports: &[PatientRiskReport]) -> PopulationSummary {
    let mut tiers = TierCounts::default();
    let mut score_sum: u64 = 0;
    let mut bmi_sum = 0.0;
    // BTreeMap keeps factors in table order for tie-breaking
    let mut frequencies: BTreeMap<Factor, usize> = BTreeMap::new();

    for report in reports {
        tiers.record(report.risk_tier);
        score_sum += report.risk_score as u64;
        bmi_sum += report.bmi;
        for contribution in &report.factors {
            *frequencies.entry(contribution.factor).or_default() += 1;
        }
    }

    let patients = reports.len();
    let (mean_score, mean_bmi) = if patients == 0 {
        (0.0, 0.0)
    } else {
        (
            round_one_decimal(score_sum as f64 / patients as f64),
            round_one_decimal(bmi_sum / patients as f64),
        )
    };

    let mut top_factors: Vec<FactorFrequency> = frequencies
        .into_iter()
        .map(|(factor, count)| FactorFrequency { factor, count })
        .collect();
    // Stable sort: equal counts stay in table order
    top_factors.sort_by(|a, b| b.count.cmp(&a.count));
    top_factors.truncate(TOP_FACTORS);

    PopulationSummary {
        patients,
        tiers,
        mean_score,
        mean_bmi,
        top_factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{run_assessment, EngineConfig};
    use crate::record::PatientRecord;

    fn assess(record: PatientRecord) -> PatientRiskReport {
        PatientRiskReport::new(1, None, &run_assessment(&record, &EngineConfig::default()))
    }

    #[test]
    fn test_empty_batch() {
        let summary = summarize(&[]);
        assert_eq!(summary.patients, 0);
        assert_eq!(summary.tiers, TierCounts::default());
        assert_eq!(summary.mean_score, 0.0);
        assert!(summary.top_factors.is_empty());
    }

    #[test]
    fn test_counts_and_means() {
        let batch = vec![
            // 10 (bmi)
            assess(PatientRecord::default()),
            // 10 (bmi) + 10 (smoking) + 25 (bp) = 45
            assess(PatientRecord {
                smoking: true,
                systolic_bp: 150,
                ..PatientRecord::default()
            }),
            // 20 + 10 + 25 + 25 = 80
            assess(PatientRecord {
                age: 70,
                systolic_bp: 150,
                fasting_glucose: 150,
                ..PatientRecord::default()
            }),
        ];
        let summary = summarize(&batch);
        assert_eq!(summary.patients, 3);
        assert_eq!(
            summary.tiers,
            TierCounts {
                low: 1,
                medium: 1,
                high: 1
            }
        );
        assert_eq!(summary.mean_score, 45.0);
        assert_eq!(summary.mean_bmi, 25.7);
    }

    #[test]
    fn test_top_factors_by_count_then_table_order() {
        let batch = vec![
            assess(PatientRecord {
                smoking: true,
                chest_pain: true,
                ..PatientRecord::default()
            }),
            assess(PatientRecord {
                chest_pain: true,
                ..PatientRecord::default()
            }),
        ];
        let summary = summarize(&batch);
        let factors: Vec<(Factor, usize)> = summary
            .top_factors
            .iter()
            .map(|f| (f.factor, f.count))
            .collect();
        assert_eq!(
            factors,
            vec![
                (Factor::Bmi, 2),
                (Factor::ChestPain, 2),
                (Factor::Smoking, 1)
            ]
        );
    }
}
