//! Built-in reference profiles, one per tier band

use crate::record::{ActivityLevel, DietQuality, Gender, LocationType, PatientRecord};

/// A named reference patient
pub struct ReferenceProfile {
    pub name: &'static str,
    pub record: PatientRecord,
}

/// Healthy young adult, middle-aged with factors, senior with multiple conditions
pub fn reference_profiles() -> Vec<ReferenceProfile> {
    vec![
        ReferenceProfile {
            name: "Healthy Young Adult",
            record: PatientRecord {
                patient_id: Some("demo-low".to_string()),
                age: 28,
                gender: Gender::Female,
                location: LocationType::Urban,
                height_cm: 165.0,
                weight_kg: 58.0,
                systolic_bp: 115,
                diastolic_bp: 75,
                pulse_rate: 70,
                fasting_glucose: 92,
                smoking: false,
                alcohol: false,
                physical_activity: ActivityLevel::High,
                diet_quality: DietQuality::Good,
                family_diabetes: false,
                family_hypertension: false,
                family_heart_disease: false,
                fatigue: false,
                breathlessness: false,
                chest_pain: false,
                frequent_urination: false,
                blurred_vision: false,
            },
        },
        ReferenceProfile {
            name: "Middle-aged with Factors",
            record: PatientRecord {
                patient_id: Some("demo-medium".to_string()),
                age: 48,
                gender: Gender::Male,
                location: LocationType::SemiUrban,
                height_cm: 172.0,
                weight_kg: 82.0,
                systolic_bp: 138,
                diastolic_bp: 88,
                pulse_rate: 80,
                fasting_glucose: 115,
                smoking: true,
                alcohol: false,
                physical_activity: ActivityLevel::Low,
                diet_quality: DietQuality::Average,
                family_diabetes: true,
                family_hypertension: false,
                family_heart_disease: false,
                fatigue: true,
                breathlessness: false,
                chest_pain: false,
                frequent_urination: false,
                blurred_vision: false,
            },
        },
        ReferenceProfile {
            name: "Senior with Multiple Conditions",
            record: PatientRecord {
                patient_id: Some("demo-high".to_string()),
                age: 62,
                gender: Gender::Male,
                location: LocationType::Rural,
                height_cm: 168.0,
                weight_kg: 88.0,
                systolic_bp: 158,
                diastolic_bp: 98,
                pulse_rate: 88,
                fasting_glucose: 142,
                smoking: true,
                alcohol: true,
                physical_activity: ActivityLevel::None,
                diet_quality: DietQuality::Poor,
                family_diabetes: true,
                family_hypertension: true,
                family_heart_disease: true,
                fatigue: true,
                breathlessness: true,
                chest_pain: false,
                frequent_urination: true,
                blurred_vision: true,
            },
        },
    ]
}
