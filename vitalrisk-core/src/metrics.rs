//! Derived metrics
//!
//! Global invariants enforced:
//! - BMI is always computed from height and weight
//! - Threshold comparisons use the raw value; rounding is display-only

use crate::record::PatientRecord;
use serde::{Deserialize, Serialize};

/// Body-mass index derived from a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMassIndex {
    raw: f64,
}

impl BodyMassIndex {
    /// BMI = weight / (height / 100)^2
    ///
    /// Undefined (non-finite) for `height_cm <= 0`; callers validate first.
    pub fn from_measurements(height_cm: f64, weight_kg: f64) -> Self {
        let height_m = height_cm / 100.0;
        BodyMassIndex {
            raw: weight_kg / (height_m * height_m),
        }
    }

    pub fn from_record(record: &PatientRecord) -> Self {
        Self::from_measurements(record.height_cm, record.weight_kg)
    }

    /// Unrounded value used for every threshold comparison
    pub fn raw(&self) -> f64 {
        self.raw
    }

    /// Value rounded to one decimal place for display
    pub fn rounded(&self) -> f64 {
        round_one_decimal(self.raw)
    }
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Display status of a single vital sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VitalStatus {
    Normal,
    High,
    Check,
}

/// Summary flags shown alongside an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VitalSigns {
    pub bmi: VitalStatus,
    pub blood_pressure: VitalStatus,
    pub glucose: VitalStatus,
    pub pulse: VitalStatus,
}

impl VitalSigns {
    /// Normal ranges: BMI < 25, systolic < 130, glucose < 100, pulse 60..=100
    pub fn evaluate(record: &PatientRecord, bmi: &BodyMassIndex) -> Self {
        let flag = |normal: bool, otherwise: VitalStatus| {
            if normal {
                VitalStatus::Normal
            } else {
                otherwise
            }
        };

        VitalSigns {
            bmi: flag(bmi.rounded() < 25.0, VitalStatus::High),
            blood_pressure: flag(record.systolic_bp < 130, VitalStatus::High),
            glucose: flag(record.fasting_glucose < 100, VitalStatus::High),
            pulse: flag((60..=100).contains(&record.pulse_rate), VitalStatus::Check),
        }
    }
}
