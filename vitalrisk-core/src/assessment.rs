//! Single-record assessment pipeline
//!
//! metrics -> factor scoring -> tier and recommendations

use crate::metrics::{round_one_decimal, BodyMassIndex, VitalSigns};
use crate::recommend::{
    derive_recommendations, Recommendation, RecommendationContext, MAX_RECOMMENDATIONS,
};
use crate::record::PatientRecord;
use crate::risk::{assign_risk_tier_with_thresholds, RiskTier, TierProbabilities, TierThresholds};
use crate::scoring::{compute_risk_score, FactorContribution, ScoringInput};

/// Tunable parts of the engine; the scoring table itself is fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub thresholds: TierThresholds,
    /// Values above `MAX_RECOMMENDATIONS` act as `MAX_RECOMMENDATIONS`
    pub max_recommendations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            thresholds: TierThresholds::default(),
            max_recommendations: MAX_RECOMMENDATIONS,
        }
    }
}

/// Result of assessing one record
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub risk_score: u8,
    pub risk_tier: RiskTier,
    pub tier_probabilities: TierProbabilities,
    /// Rounded to one decimal
    pub bmi: f64,
    pub recommendations: Vec<Recommendation>,
    /// Fired rules in table order; sums to the pre-clamp total
    pub factors: Vec<FactorContribution>,
    pub vitals: VitalSigns,
}

impl Assessment {
    pub fn recommendation_messages(&self) -> Vec<&'static str> {
        self.recommendations.iter().map(|r| r.message()).collect()
    }

    pub fn total_points(&self) -> u32 {
        crate::scoring::total_points(&self.factors)
    }
}

/// Run the three stages over one record
pub fn run_assessment(record: &PatientRecord, config: &EngineConfig) -> Assessment {
    let bmi = BodyMassIndex::from_record(record);

    let (risk_score, factors) = compute_risk_score(&ScoringInput { record, bmi });

    let risk_tier = assign_risk_tier_with_thresholds(risk_score, &config.thresholds);
    let recommendations = derive_recommendations(
        &RecommendationContext {
            record,
            bmi,
            tier: risk_tier,
        },
        config.max_recommendations.min(MAX_RECOMMENDATIONS),
    );

    log::debug!(
        "assessed {}: score={} tier={} bmi={:.1} factors={}",
        record.patient_id.as_deref().unwrap_or("<unnamed>"),
        risk_score,
        risk_tier,
        bmi.raw(),
        factors.len()
    );

    Assessment {
        risk_score,
        risk_tier,
        tier_probabilities: risk_tier.probabilities(),
        bmi: round_one_decimal(bmi.raw()),
        recommendations,
        factors,
        vitals: VitalSigns::evaluate(record, &bmi),
    }
}
