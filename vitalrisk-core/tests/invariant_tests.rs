//! Property tests for engine invariants
//!
//! Records are generated inside the intake form ranges, so every one of
//! them is valid input for the engine.

use proptest::prelude::*;
use vitalrisk_core::record::{ActivityLevel, DietQuality, Gender, LocationType};
use vitalrisk_core::risk::{assign_risk_tier, RiskTier};
use vitalrisk_core::scoring::Factor;
use vitalrisk_core::{assess, validate_record, PatientRecord, ValidationLimits};

fn activity() -> impl Strategy<Value = ActivityLevel> {
    prop_oneof![
        Just(ActivityLevel::None),
        Just(ActivityLevel::Low),
        Just(ActivityLevel::Moderate),
        Just(ActivityLevel::High),
    ]
}

fn diet() -> impl Strategy<Value = DietQuality> {
    prop_oneof![
        Just(DietQuality::Poor),
        Just(DietQuality::Average),
        Just(DietQuality::Good),
    ]
}

prop_compose! {
    fn vitals()(
        age in 18u32..=100,
        height_cm in 100.0f64..=250.0,
        weight_kg in 30.0f64..=200.0,
        systolic_bp in 70u32..=220,
        diastolic_bp in 40u32..=140,
        pulse_rate in 40u32..=150,
        fasting_glucose in 50u32..=300,
    ) -> (u32, f64, f64, u32, u32, u32, u32) {
        (age, height_cm, weight_kg, systolic_bp, diastolic_bp, pulse_rate, fasting_glucose)
    }
}

prop_compose! {
    fn record()(
        (age, height_cm, weight_kg, systolic_bp, diastolic_bp, pulse_rate, fasting_glucose) in vitals(),
        female in any::<bool>(),
        physical_activity in activity(),
        diet_quality in diet(),
        flags in prop::array::uniform10(any::<bool>()),
    ) -> PatientRecord {
        PatientRecord {
            patient_id: None,
            age,
            gender: if female { Gender::Female } else { Gender::Male },
            location: LocationType::Rural,
            height_cm,
            weight_kg,
            systolic_bp,
            diastolic_bp,
            pulse_rate,
            fasting_glucose,
            smoking: flags[0],
            alcohol: flags[1],
            physical_activity,
            diet_quality,
            family_diabetes: flags[2],
            family_hypertension: flags[3],
            family_heart_disease: flags[4],
            fatigue: flags[5],
            breathlessness: flags[6],
            chest_pain: flags[7],
            frequent_urination: flags[8],
            blurred_vision: flags[9],
        }
    }
}

proptest! {
    #[test]
    fn generated_records_pass_validation(r in record()) {
        prop_assert!(validate_record(&r, &ValidationLimits::default()).is_ok());
    }

    #[test]
    fn score_is_clamped_total(r in record()) {
        let a = assess(&r);
        prop_assert!(a.risk_score <= 100);
        prop_assert_eq!(a.risk_score as u32, a.total_points().min(100));
    }

    #[test]
    fn tier_matches_score(r in record()) {
        let a = assess(&r);
        prop_assert_eq!(a.risk_tier, assign_risk_tier(a.risk_score));
    }

    #[test]
    fn probabilities_sum_to_one(r in record()) {
        let p = assess(&r).tier_probabilities;
        prop_assert!((p.sum() - 1.0).abs() < 1e-9);
        prop_assert!(p.low >= 0.0 && p.medium >= 0.0 && p.high >= 0.0);
    }

    #[test]
    fn assessment_is_deterministic(r in record()) {
        prop_assert_eq!(assess(&r), assess(&r.clone()));
    }

    #[test]
    fn recommendations_are_capped_and_lead_with_visit_when_elevated(r in record()) {
        let a = assess(&r);
        prop_assert!(!a.recommendations.is_empty());
        prop_assert!(a.recommendations.len() <= 6);
        let has_visit = a.recommendations.first().map(|rec| rec.id()) == Some("phc-visit");
        prop_assert_eq!(has_visit, a.risk_tier != RiskTier::Low);
    }

    #[test]
    fn banded_factors_fire_at_most_once(r in record()) {
        let a = assess(&r);
        for factor in [Factor::Age, Factor::Bmi, Factor::SystolicBp, Factor::FastingGlucose] {
            let hits = a.factors.iter().filter(|c| c.factor == factor).count();
            prop_assert!(hits <= 1);
        }
    }

    #[test]
    fn setting_a_flag_never_lowers_score(r in record()) {
        let base = assess(&r).risk_score;
        let worse = PatientRecord {
            smoking: true,
            chest_pain: true,
            family_heart_disease: true,
            ..r
        };
        prop_assert!(assess(&worse).risk_score >= base);
    }

    #[test]
    fn raising_a_vital_never_lowers_score(r in record(), bump in 0u32..50) {
        let base = assess(&r).risk_score;
        let worse = PatientRecord {
            age: (r.age + bump).min(100),
            systolic_bp: (r.systolic_bp + bump).min(220),
            fasting_glucose: (r.fasting_glucose + bump).min(300),
            ..r.clone()
        };
        prop_assert!(assess(&worse).risk_score >= base);
    }

    #[test]
    fn raising_weight_never_lowers_score(r in record(), gain in 0.0f64..=170.0) {
        let base = assess(&r);
        let heavier = PatientRecord {
            weight_kg: (r.weight_kg + gain).min(200.0),
            ..r.clone()
        };
        let worse = assess(&heavier);
        prop_assert!(worse.bmi >= base.bmi);
        prop_assert!(worse.risk_score >= base.risk_score);
    }

    #[test]
    fn unused_symptoms_do_not_score(r in record()) {
        let toggled = PatientRecord {
            frequent_urination: !r.frequent_urination,
            blurred_vision: !r.blurred_vision,
            gender: Gender::Female,
            location: LocationType::Urban,
            diastolic_bp: 80,
            pulse_rate: 75,
            ..r.clone()
        };
        prop_assert_eq!(assess(&toggled).risk_score, assess(&r).risk_score);
    }
}
