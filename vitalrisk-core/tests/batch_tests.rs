//! Batch assessment tests over fixture files

use std::path::PathBuf;
use vitalrisk_core::scoring::Factor;
use vitalrisk_core::{
    assess, assess_batch, assess_into_reports, parse_records, render_jsonl, sort_reports,
    summarize, EngineConfig, ParsedRecord, PatientRecord, ResolvedConfig, RiskTier,
    ValidationError, ValidationLimits,
};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join("records")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
}

fn entries(name: &str) -> Vec<ParsedRecord> {
    parse_records(&fixture(name)).unwrap()
}

/// Fixture entries that must all be readable
fn records(name: &str) -> Vec<PatientRecord> {
    entries(name)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn test_single_object_fixture() {
    let records = records("scenario-low.json");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].patient_id.as_deref(), Some("P-001"));

    let assessment = assess(&records[0]);
    assert_eq!(assessment.risk_score, 0);
    assert_eq!(assessment.risk_tier, RiskTier::Low);
}

#[test]
fn test_cohort_skips_blank_lines() {
    let records = records("cohort.jsonl");
    let ids: Vec<&str> = records
        .iter()
        .filter_map(|r| r.patient_id.as_deref())
        .collect();
    assert_eq!(ids, vec!["C-1", "C-2", "C-3", "C-4", "C-5"]);
}

#[test]
fn test_batch_keeps_input_order_and_isolates_failures() {
    let records = records("cohort.jsonl");
    let results = assess_batch(
        &records,
        &EngineConfig::default(),
        &ValidationLimits::default(),
    );

    assert_eq!(results.len(), 5);
    let scores: Vec<Option<u8>> = results
        .iter()
        .map(|r| r.as_ref().ok().map(|a| a.risk_score))
        .collect();
    assert_eq!(scores, vec![Some(0), Some(67), None, Some(40), Some(100)]);

    match &results[2] {
        Err(ValidationError::OutOfRange { field, value, .. }) => {
            assert_eq!(*field, "age");
            assert_eq!(*value, 12.0);
        }
        other => panic!("expected age rejection, got {:?}", other),
    }
}

#[test]
fn test_physical_limits_accept_minor() {
    let records = records("cohort.jsonl");
    let results = assess_batch(
        &records,
        &EngineConfig::default(),
        &ValidationLimits::physical(),
    );
    assert!(results.iter().all(|r| r.is_ok()));
    // age 12 scores nothing for age; BMI 17.8 scores nothing either
    assert_eq!(results[2].as_ref().unwrap().risk_score, 0);
}

#[test]
fn test_reports_carry_global_indices() {
    let records = entries("cohort.jsonl");
    let resolved = ResolvedConfig::defaults().unwrap();

    let (reports, rejected) = assess_into_reports(&records, 1, &resolved);
    let indices: Vec<usize> = reports.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![1, 2, 4, 5]);
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].0, 3);

    // A later chunk keeps counting from its offset
    let (tail, tail_rejected) = assess_into_reports(&records[3..], 4, &resolved);
    let tail_indices: Vec<usize> = tail.iter().map(|r| r.index).collect();
    assert_eq!(tail_indices, vec![4, 5]);
    assert!(tail_rejected.is_empty());
}

#[test]
fn test_sorted_reports_highest_first() {
    let records = entries("cohort.jsonl");
    let resolved = ResolvedConfig::defaults().unwrap();
    let (reports, _) = assess_into_reports(&records, 1, &resolved);

    let sorted = sort_reports(reports);
    let ids: Vec<&str> = sorted
        .iter()
        .filter_map(|r| r.patient_id.as_deref())
        .collect();
    assert_eq!(ids, vec!["C-5", "C-2", "C-4", "C-1"]);
}

#[test]
fn test_cohort_summary() {
    let records = entries("cohort.jsonl");
    let resolved = ResolvedConfig::defaults().unwrap();
    let (reports, _) = assess_into_reports(&records, 1, &resolved);

    let summary = summarize(&reports);
    assert_eq!(summary.patients, 4);
    assert_eq!(summary.tiers.low, 1);
    assert_eq!(summary.tiers.medium, 1);
    assert_eq!(summary.tiers.high, 2);
    assert_eq!(summary.mean_score, 51.8);
    assert_eq!(summary.mean_bmi, 26.9);

    let top: Vec<(Factor, usize)> = summary
        .top_factors
        .iter()
        .map(|f| (f.factor, f.count))
        .collect();
    assert_eq!(
        top,
        vec![
            (Factor::Age, 3),
            (Factor::Bmi, 3),
            (Factor::FastingGlucose, 3),
            (Factor::SystolicBp, 2),
            (Factor::Smoking, 2),
        ]
    );
}

#[test]
fn test_custom_thresholds_shift_tiers() {
    let records = entries("cohort.jsonl");
    let mut resolved = ResolvedConfig::defaults().unwrap();
    resolved.medium_threshold = 50;
    resolved.high_threshold = 80;

    let (reports, _) = assess_into_reports(&records, 1, &resolved);
    let tiers: Vec<RiskTier> = reports.iter().map(|r| r.risk_tier).collect();
    assert_eq!(
        tiers,
        vec![RiskTier::Low, RiskTier::Medium, RiskTier::Low, RiskTier::High]
    );
}

#[test]
fn test_jsonl_output_is_reproducible() {
    let records = entries("cohort.jsonl");
    let resolved = ResolvedConfig::defaults().unwrap();

    let (first, _) = assess_into_reports(&records, 1, &resolved);
    let (second, _) = assess_into_reports(&records, 1, &resolved);
    assert_eq!(render_jsonl(&first), render_jsonl(&second));
}

#[test]
fn test_negative_age_is_rejected_without_losing_neighbors() {
    let records = entries("negative-age.jsonl");
    assert_eq!(records.len(), 3);

    let resolved = ResolvedConfig::defaults().unwrap();
    let (reports, rejected) = assess_into_reports(&records, 1, &resolved);

    let ids: Vec<&str> = reports
        .iter()
        .filter_map(|r| r.patient_id.as_deref())
        .collect();
    assert_eq!(ids, vec!["M-1", "M-3"]);
    assert_eq!(reports[1].index, 3);
    assert_eq!(reports[1].risk_score, 40);

    assert_eq!(rejected.len(), 1);
    let (index, err) = &rejected[0];
    assert_eq!(*index, 2);
    assert!(matches!(err, ValidationError::Malformed { .. }));
    assert!(err.to_string().contains("line 2"));
}
