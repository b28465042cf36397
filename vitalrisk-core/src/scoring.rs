//! Weighted factor scoring
//!
//! Maps a patient record onto an integer risk score in [0, 100] via
//! independent additive rules. Each rule sees only the record and the raw
//! BMI, so rules commute and evaluation order cannot change the total.
//!
//! Global invariants enforced:
//! - No rule contributes negative points
//! - Banded factors contribute at most one band (the highest that matches)
//! - The final score is clamped to `MAX_SCORE`

use crate::metrics::BodyMassIndex;
use crate::record::{ActivityLevel, DietQuality, PatientRecord};
use serde::{Deserialize, Serialize};

/// Upper bound of the risk score
pub const MAX_SCORE: u32 = 100;

/// A scoring rule identifier, in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Factor {
    Age,
    Bmi,
    SystolicBp,
    FastingGlucose,
    Smoking,
    Alcohol,
    PhysicalInactivity,
    PoorDiet,
    FamilyDiabetes,
    FamilyHypertension,
    FamilyHeartDisease,
    Fatigue,
    Breathlessness,
    ChestPain,
}

impl Factor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Age => "age",
            Factor::Bmi => "bmi",
            Factor::SystolicBp => "systolic-bp",
            Factor::FastingGlucose => "fasting-glucose",
            Factor::Smoking => "smoking",
            Factor::Alcohol => "alcohol",
            Factor::PhysicalInactivity => "physical-inactivity",
            Factor::PoorDiet => "poor-diet",
            Factor::FamilyDiabetes => "family-diabetes",
            Factor::FamilyHypertension => "family-hypertension",
            Factor::FamilyHeartDisease => "family-heart-disease",
            Factor::Fatigue => "fatigue",
            Factor::Breathlessness => "breathlessness",
            Factor::ChestPain => "chest-pain",
        }
    }
}

/// A rule that fired and the points it added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FactorContribution {
    pub factor: Factor,
    pub points: u32,
}

/// Inputs visible to every rule
pub struct ScoringInput<'a> {
    pub record: &'a PatientRecord,
    pub bmi: BodyMassIndex,
}

/// Bands are (exclusive lower bound, points), highest threshold first
const AGE_BANDS: &[(f64, u32)] = &[(60.0, 20), (45.0, 10)];
const BMI_BANDS: &[(f64, u32)] = &[(30.0, 20), (25.0, 10)];
const SYSTOLIC_BANDS: &[(f64, u32)] = &[(140.0, 25), (130.0, 12)];
const GLUCOSE_BANDS: &[(f64, u32)] = &[(126.0, 25), (100.0, 12)];

/// Points for the first band whose threshold `value` exceeds, else 0
fn banded(value: f64, bands: &[(f64, u32)]) -> u32 {
    bands
        .iter()
        .find(|(threshold, _)| value > *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

fn flag(set: bool, points: u32) -> u32 {
    if set {
        points
    } else {
        0
    }
}

type Rule = fn(&ScoringInput) -> u32;

fn age_rule(i: &ScoringInput) -> u32 {
    banded(i.record.age as f64, AGE_BANDS)
}

fn bmi_rule(i: &ScoringInput) -> u32 {
    banded(i.bmi.raw(), BMI_BANDS)
}

fn systolic_rule(i: &ScoringInput) -> u32 {
    banded(i.record.systolic_bp as f64, SYSTOLIC_BANDS)
}

fn glucose_rule(i: &ScoringInput) -> u32 {
    banded(i.record.fasting_glucose as f64, GLUCOSE_BANDS)
}

fn smoking_rule(i: &ScoringInput) -> u32 {
    flag(i.record.smoking, 10)
}

fn alcohol_rule(i: &ScoringInput) -> u32 {
    flag(i.record.alcohol, 5)
}

fn inactivity_rule(i: &ScoringInput) -> u32 {
    flag(i.record.physical_activity == ActivityLevel::None, 8)
}

fn diet_rule(i: &ScoringInput) -> u32 {
    flag(i.record.diet_quality == DietQuality::Poor, 8)
}

fn family_diabetes_rule(i: &ScoringInput) -> u32 {
    flag(i.record.family_diabetes, 8)
}

fn family_hypertension_rule(i: &ScoringInput) -> u32 {
    flag(i.record.family_hypertension, 8)
}

fn family_heart_disease_rule(i: &ScoringInput) -> u32 {
    flag(i.record.family_heart_disease, 10)
}

fn fatigue_rule(i: &ScoringInput) -> u32 {
    flag(i.record.fatigue, 5)
}

fn breathlessness_rule(i: &ScoringInput) -> u32 {
    flag(i.record.breathlessness, 8)
}

fn chest_pain_rule(i: &ScoringInput) -> u32 {
    flag(i.record.chest_pain, 10)
}

/// The scoring table
const RULES: &[(Factor, Rule)] = &[
    (Factor::Age, age_rule),
    (Factor::Bmi, bmi_rule),
    (Factor::SystolicBp, systolic_rule),
    (Factor::FastingGlucose, glucose_rule),
    (Factor::Smoking, smoking_rule),
    (Factor::Alcohol, alcohol_rule),
    (Factor::PhysicalInactivity, inactivity_rule),
    (Factor::PoorDiet, diet_rule),
    (Factor::FamilyDiabetes, family_diabetes_rule),
    (Factor::FamilyHypertension, family_hypertension_rule),
    (Factor::FamilyHeartDisease, family_heart_disease_rule),
    (Factor::Fatigue, fatigue_rule),
    (Factor::Breathlessness, breathlessness_rule),
    (Factor::ChestPain, chest_pain_rule),
];

/// Evaluate every rule and keep the ones that fired, in table order
pub fn score_factors(input: &ScoringInput) -> Vec<FactorContribution> {
    RULES
        .iter()
        .map(|(factor, rule)| FactorContribution {
            factor: *factor,
            points: rule(input),
        })
        .filter(|c| c.points > 0)
        .collect()
}

/// Sum of contributions before clamping
pub fn total_points(contributions: &[FactorContribution]) -> u32 {
    contributions.iter().map(|c| c.points).sum()
}

/// Clamp a raw total into [0, MAX_SCORE]
pub fn clamp_score(total: u32) -> u8 {
    total.min(MAX_SCORE) as u8
}

/// Compute the clamped risk score and its breakdown
pub fn compute_risk_score(input: &ScoringInput) -> (u8, Vec<FactorContribution>) {
    let contributions = score_factors(input);
    let score = clamp_score(total_points(&contributions));
    (score, contributions)
}
