//! vitalrisk core library - deterministic chronic-disease risk scoring

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Assessment is strictly per-record
// - No global mutable state
// - No randomness, clocks, or I/O in the engine
// - Rule evaluation order is explicit and fixed
// - Identical input yields byte-for-byte identical output

pub mod aggregates;
pub mod assessment;
pub mod config;
pub mod demo;
pub mod metrics;
pub mod recommend;
pub mod record;
pub mod report;
pub mod risk;
pub mod scoring;
pub mod validate;

pub use aggregates::{summarize, PopulationSummary};
pub use assessment::{Assessment, EngineConfig};
pub use config::ResolvedConfig;
pub use record::{parse_records, ParsedRecord, PatientRecord};
pub use report::{render_json, render_jsonl, render_text, sort_reports, PatientRiskReport};
pub use risk::RiskTier;
pub use validate::{validate_record, ValidationError, ValidationLimits};

use rayon::prelude::*;

/// A rejected record: its 1-based input position and why it failed
pub type RejectedRecord = (usize, ValidationError);

/// Assess a record with default engine settings
///
/// The record must already be physically valid (see [`validate_record`]).
pub fn assess(record: &PatientRecord) -> Assessment {
    assess_with_config(record, &EngineConfig::default())
}

/// Assess a record with custom tier thresholds or recommendation cap
pub fn assess_with_config(record: &PatientRecord, config: &EngineConfig) -> Assessment {
    assessment::run_assessment(record, config)
}

/// Validate, then assess
pub fn assess_checked(
    record: &PatientRecord,
    config: &EngineConfig,
    limits: &ValidationLimits,
) -> Result<Assessment, ValidationError> {
    validate_record(record, limits)?;
    Ok(assess_with_config(record, config))
}

/// Validate and assess many records in parallel
///
/// Results are returned in input order; an invalid record yields its
/// validation error without affecting the others.
pub fn assess_batch(
    records: &[PatientRecord],
    config: &EngineConfig,
    limits: &ValidationLimits,
) -> Vec<Result<Assessment, ValidationError>> {
    records
        .par_iter()
        .map(|record| assess_checked(record, config, limits))
        .collect()
}

/// Assess parsed entries and build reports for the valid records
///
/// Returns the reports plus `(index, error)` pairs for entries that could
/// not be read or failed validation. Indices start at `first_index` so
/// chunked callers keep global positions.
pub fn assess_into_reports(
    entries: &[ParsedRecord],
    first_index: usize,
    resolved: &ResolvedConfig,
) -> (Vec<PatientRiskReport>, Vec<RejectedRecord>) {
    let engine = resolved.engine();
    let results: Vec<Result<PatientRiskReport, ValidationError>> = entries
        .par_iter()
        .enumerate()
        .map(|(offset, entry)| -> Result<PatientRiskReport, ValidationError> {
            let record = entry.as_ref().map_err(Clone::clone)?;
            let assessment = assess_checked(record, &engine, &resolved.limits)?;
            Ok(PatientRiskReport::new(
                first_index + offset,
                record.patient_id.clone(),
                &assessment,
            ))
        })
        .collect();

    let mut reports = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();
    for (offset, result) in results.into_iter().enumerate() {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                let index = first_index + offset;
                log::warn!("skipping record #{}: {}", index, e);
                rejected.push((index, e));
            }
        }
    }

    (reports, rejected)
}
