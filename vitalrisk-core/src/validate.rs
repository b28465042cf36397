//! Boundary validation for patient records
//!
//! The scoring engine assumes physically valid input. This module is the
//! layer callers run first; scoring code never calls it.

use crate::record::PatientRecord;
use thiserror::Error;

/// Why a record was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The entry could not be read as a record (wrong type, missing field, bad JSON)
    #[error("malformed record: {message}")]
    Malformed { message: String },
}

/// Inclusive accepted range for one measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Bounds { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Accepted ranges per measurement; `None` disables the range check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationLimits {
    pub age: Option<Bounds>,
    pub height_cm: Option<Bounds>,
    pub weight_kg: Option<Bounds>,
    pub systolic_bp: Option<Bounds>,
    pub diastolic_bp: Option<Bounds>,
    pub pulse_rate: Option<Bounds>,
    pub fasting_glucose: Option<Bounds>,
}

pub const DEFAULT_AGE: Bounds = Bounds::new(18.0, 100.0);
pub const DEFAULT_HEIGHT_CM: Bounds = Bounds::new(100.0, 250.0);
pub const DEFAULT_WEIGHT_KG: Bounds = Bounds::new(30.0, 200.0);
pub const DEFAULT_SYSTOLIC_BP: Bounds = Bounds::new(70.0, 220.0);
pub const DEFAULT_DIASTOLIC_BP: Bounds = Bounds::new(40.0, 140.0);
pub const DEFAULT_PULSE_RATE: Bounds = Bounds::new(40.0, 150.0);
pub const DEFAULT_FASTING_GLUCOSE: Bounds = Bounds::new(50.0, 300.0);

impl Default for ValidationLimits {
    /// Intake form ranges
    fn default() -> Self {
        ValidationLimits {
            age: Some(DEFAULT_AGE),
            height_cm: Some(DEFAULT_HEIGHT_CM),
            weight_kg: Some(DEFAULT_WEIGHT_KG),
            systolic_bp: Some(DEFAULT_SYSTOLIC_BP),
            diastolic_bp: Some(DEFAULT_DIASTOLIC_BP),
            pulse_rate: Some(DEFAULT_PULSE_RATE),
            fasting_glucose: Some(DEFAULT_FASTING_GLUCOSE),
        }
    }
}

impl ValidationLimits {
    /// Only the physical checks (height and weight positive)
    pub fn physical() -> Self {
        ValidationLimits {
            age: None,
            height_cm: None,
            weight_kg: None,
            systolic_bp: None,
            diastolic_bp: None,
            pulse_rate: None,
            fasting_glucose: None,
        }
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    // NaN fails this comparison too
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonPositive { field, value })
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    bounds: Option<Bounds>,
) -> Result<(), ValidationError> {
    match bounds {
        Some(b) if !b.contains(value) => Err(ValidationError::OutOfRange {
            field,
            value,
            min: b.min,
            max: b.max,
        }),
        _ => Ok(()),
    }
}

/// Reject records the engine is not defined over
///
/// Checks run in field order and the first failure is returned.
pub fn validate_record(
    record: &PatientRecord,
    limits: &ValidationLimits,
) -> Result<(), ValidationError> {
    check_positive("height_cm", record.height_cm)?;
    check_positive("weight_kg", record.weight_kg)?;

    check_range("age", record.age as f64, limits.age)?;
    check_range("height_cm", record.height_cm, limits.height_cm)?;
    check_range("weight_kg", record.weight_kg, limits.weight_kg)?;
    check_range("systolic_bp", record.systolic_bp as f64, limits.systolic_bp)?;
    check_range(
        "diastolic_bp",
        record.diastolic_bp as f64,
        limits.diastolic_bp,
    )?;
    check_range("pulse_rate", record.pulse_rate as f64, limits.pulse_rate)?;
    check_range(
        "fasting_glucose",
        record.fasting_glucose as f64,
        limits.fasting_glucose,
    )?;

    Ok(())
}
