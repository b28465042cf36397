//! Recommendation derivation
//!
//! An ordered list of (predicate, recommendations) rules. Every rule is
//! evaluated in priority order and the full list is generated before the cap
//! is applied, so entries past the cap are dropped rather than re-ranked.

use crate::metrics::BodyMassIndex;
use crate::record::{ActivityLevel, DietQuality, PatientRecord};
use crate::risk::RiskTier;
use serde::{Deserialize, Serialize};

/// Default cap on the number of recommendations returned
pub const MAX_RECOMMENDATIONS: usize = 6;

/// A fixed recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    PhcVisit,
    FollowUp,
    BpMonitoring,
    DiabetesScreening,
    WeightManagement,
    SmokingCessation,
    PhysicalActivity,
    Diet,
    HealthEducation,
}

impl Recommendation {
    pub fn id(&self) -> &'static str {
        match self {
            Recommendation::PhcVisit => "phc-visit",
            Recommendation::FollowUp => "follow-up",
            Recommendation::BpMonitoring => "bp-monitoring",
            Recommendation::DiabetesScreening => "diabetes-screening",
            Recommendation::WeightManagement => "weight-management",
            Recommendation::SmokingCessation => "smoking-cessation",
            Recommendation::PhysicalActivity => "physical-activity",
            Recommendation::Diet => "diet",
            Recommendation::HealthEducation => "health-education",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::PhcVisit => {
                "Visit nearest Primary Health Center for detailed screening"
            }
            Recommendation::FollowUp => "Schedule follow-up within 2 weeks",
            Recommendation::BpMonitoring => "High blood pressure detected - monitor BP daily",
            Recommendation::DiabetesScreening => {
                "High blood sugar - consult doctor for diabetes screening"
            }
            Recommendation::WeightManagement => {
                "Weight management recommended - aim for BMI < 25"
            }
            Recommendation::SmokingCessation => {
                "Quit smoking - major risk factor for chronic diseases"
            }
            Recommendation::PhysicalActivity => "Start with 30 minutes daily walking",
            Recommendation::Diet => "Improve diet - more fruits, vegetables, whole grains",
            Recommendation::HealthEducation => {
                "Attend health education session at community center"
            }
        }
    }
}

/// Everything a recommendation rule may look at
pub struct RecommendationContext<'a> {
    pub record: &'a PatientRecord,
    pub bmi: BodyMassIndex,
    pub tier: RiskTier,
}

type Trigger = fn(&RecommendationContext) -> bool;

fn elevated_tier(ctx: &RecommendationContext) -> bool {
    ctx.tier.is_elevated()
}

fn high_blood_pressure(ctx: &RecommendationContext) -> bool {
    ctx.record.systolic_bp > 140
}

fn high_glucose(ctx: &RecommendationContext) -> bool {
    ctx.record.fasting_glucose > 126
}

fn overweight(ctx: &RecommendationContext) -> bool {
    ctx.bmi.raw() > 25.0
}

fn smoker(ctx: &RecommendationContext) -> bool {
    ctx.record.smoking
}

fn inactive(ctx: &RecommendationContext) -> bool {
    ctx.record.physical_activity == ActivityLevel::None
}

fn poor_diet(ctx: &RecommendationContext) -> bool {
    ctx.record.diet_quality == DietQuality::Poor
}

fn always(_: &RecommendationContext) -> bool {
    true
}

/// Rules in priority order
const RULES: &[(Trigger, &[Recommendation])] = &[
    (
        elevated_tier,
        &[Recommendation::PhcVisit, Recommendation::FollowUp],
    ),
    (high_blood_pressure, &[Recommendation::BpMonitoring]),
    (high_glucose, &[Recommendation::DiabetesScreening]),
    (overweight, &[Recommendation::WeightManagement]),
    (smoker, &[Recommendation::SmokingCessation]),
    (inactive, &[Recommendation::PhysicalActivity]),
    (poor_diet, &[Recommendation::Diet]),
    (always, &[Recommendation::HealthEducation]),
];

/// Every recommendation whose trigger holds, in priority order, uncapped
pub fn generate_recommendations(ctx: &RecommendationContext) -> Vec<Recommendation> {
    RULES
        .iter()
        .filter(|(trigger, _)| trigger(ctx))
        .flat_map(|(_, recommendations)| recommendations.iter().copied())
        .collect()
}

/// Generate then keep the first `cap` entries
pub fn derive_recommendations(ctx: &RecommendationContext, cap: usize) -> Vec<Recommendation> {
    let mut recommendations = generate_recommendations(ctx);
    recommendations.truncate(cap);
    recommendations
}
