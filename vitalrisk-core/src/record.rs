//! Patient record model
//!
//! Global invariants enforced:
//! - A record is plain data; nothing here scores or validates
//! - Ordered categories derive `Ord` in severity-neutral declaration order
//! - Parsing preserves input order, unreadable entries included

use crate::validate::ValidationError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Biological sex as captured on the intake form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// Residential setting of the patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationType {
    Rural,
    #[serde(rename = "Semi-Urban")]
    SemiUrban,
    Urban,
}

/// Weekly physical activity, least to most active
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    None,
    Low,
    Moderate,
    High,
}

/// Overall diet quality, worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DietQuality {
    Poor,
    Average,
    Good,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::None => "None",
            ActivityLevel::Low => "Low",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::High => "High",
        }
    }
}

impl DietQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietQuality::Poor => "Poor",
            DietQuality::Average => "Average",
            DietQuality::Good => "Good",
        }
    }
}

/// One patient's intake record
///
/// Flags (lifestyle, family history, symptoms) default to `false` when
/// omitted from JSON input. Measurements are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatientRecord {
    /// Caller-supplied identifier, passed through to reports untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,

    // Demographics
    pub age: u32,
    pub gender: Gender,
    pub location: LocationType,
    pub height_cm: f64,
    pub weight_kg: f64,

    // Vitals
    pub systolic_bp: u32,
    pub diastolic_bp: u32,
    pub pulse_rate: u32,
    pub fasting_glucose: u32,

    // Lifestyle
    #[serde(default)]
    pub smoking: bool,
    #[serde(default)]
    pub alcohol: bool,
    pub physical_activity: ActivityLevel,
    pub diet_quality: DietQuality,

    // Family history
    #[serde(default)]
    pub family_diabetes: bool,
    #[serde(default)]
    pub family_hypertension: bool,
    #[serde(default)]
    pub family_heart_disease: bool,

    // Symptoms
    #[serde(default)]
    pub fatigue: bool,
    #[serde(default)]
    pub breathlessness: bool,
    #[serde(default)]
    pub chest_pain: bool,
    #[serde(default)]
    pub frequent_urination: bool,
    #[serde(default)]
    pub blurred_vision: bool,
}

impl Default for PatientRecord {
    /// Intake form defaults: a 45 year old with unremarkable vitals and no flags set
    fn default() -> Self {
        PatientRecord {
            patient_id: None,
            age: 45,
            gender: Gender::Male,
            location: LocationType::Rural,
            height_cm: 165.0,
            weight_kg: 70.0,
            systolic_bp: 120,
            diastolic_bp: 80,
            pulse_rate: 75,
            fasting_glucose: 100,
            smoking: false,
            alcohol: false,
            physical_activity: ActivityLevel::Moderate,
            diet_quality: DietQuality::Average,
            family_diabetes: false,
            family_hypertension: false,
            family_heart_disease: false,
            fatigue: false,
            breathlessness: false,
            chest_pain: false,
            frequent_urination: false,
            blurred_vision: false,
        }
    }
}

/// One input entry: a record, or why it could not be read as one
pub type ParsedRecord = Result<PatientRecord, ValidationError>;

fn record_from_value(value: Value) -> ParsedRecord {
    serde_json::from_value(value).map_err(|e| ValidationError::Malformed {
        message: e.to_string(),
    })
}

/// Parse one or more records from JSON text
///
/// Accepted shapes:
/// - a single JSON object
/// - a JSON array of objects
/// - JSON Lines (one object per non-blank line)
///
/// Entries are read independently: one that is valid JSON but not a record
/// (negative age, missing field, unknown category) becomes an `Err` entry
/// in its input position, as does a JSON Lines line that is not JSON at all.
/// Only input with no readable shape fails as a whole.
pub fn parse_records(content: &str) -> Result<Vec<ParsedRecord>> {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        let values: Vec<Value> =
            serde_json::from_str(trimmed).context("failed to parse JSON array of records")?;
        return Ok(values.into_iter().map(record_from_value).collect());
    }

    // A single object may span several lines; try that before JSON Lines
    let single_err = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => return Ok(vec![record_from_value(value)]),
        Err(e) => e,
    };

    // JSON Lines only if the first entry stands on its own line
    let first_line = trimmed.lines().next().unwrap_or_default();
    if serde_json::from_str::<Value>(first_line).is_err() {
        return Err(single_err).context("failed to parse JSON record");
    }

    let mut records = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = serde_json::from_str::<PatientRecord>(line).map_err(|e| {
            ValidationError::Malformed {
                message: format!("line {}: {}", idx + 1, e),
            }
        });
        records.push(record);
    }
    Ok(records)
}
