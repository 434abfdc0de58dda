//! Validator tests: each check exercised against planted bad rows

mod common;

use hazfin_common::types::{Severity, ValidationStatus};
use hazfin_store::open_memory_store;
use hazfin_store::validate::validate_all;

#[tokio::test]
async fn test_empty_store_validates_clean() {
    let pool = open_memory_store().await.unwrap();
    let report = validate_all(&pool).await.unwrap();
    assert_eq!(report.status, ValidationStatus::Pass);
}

#[tokio::test]
async fn test_orphan_step_assignment_reported() {
    let pool = open_memory_store().await.unwrap();
    common::disable_foreign_keys(&pool).await;

    common::insert_sft_step(&pool, 1, "SFT0001", "Clean").await;
    // finish_code_id 42 does not exist
    common::insert_step_assignment(&pool, 42, 1, 1).await;

    let report = validate_all(&pool).await.unwrap();
    assert_eq!(report.status, ValidationStatus::Errors);

    let orphan = report
        .errors
        .iter()
        .find(|f| f.issue == "orphan_fk" && f.table == "finish_code_steps")
        .expect("orphan finding");
    assert_eq!(orphan.column, "finish_code_id");
    assert!(orphan.details.contains("finish_codes"));
}

#[tokio::test]
async fn test_invalid_cas_is_an_error() {
    let pool = open_memory_store().await.unwrap();
    common::insert_chemical(&pool, 1, "Mystery solvent", Some("not-a-cas"), None, Some(2)).await;

    let report = validate_all(&pool).await.unwrap();
    let finding = report
        .errors
        .iter()
        .find(|f| f.issue == "invalid_cas_format")
        .expect("CAS finding");
    assert_eq!(finding.severity, Severity::Error);
    assert!(finding.details.contains("Mystery solvent"));
    assert!(finding.details.contains("not-a-cas"));
}

#[tokio::test]
async fn test_hazard_level_out_of_range_is_an_error() {
    let pool = open_memory_store().await.unwrap();
    common::insert_chemical(&pool, 1, "Overrated", Some("1333-82-0"), None, Some(6)).await;

    let report = validate_all(&pool).await.unwrap();
    let finding = report
        .errors
        .iter()
        .find(|f| f.issue == "out_of_range" && f.table == "chemicals")
        .expect("level finding");
    assert!(finding.details.contains("6"));
}

#[tokio::test]
async fn test_malformed_hazard_flags_is_an_error() {
    let pool = open_memory_store().await.unwrap();
    common::insert_chemical(
        &pool,
        1,
        "Bad payload",
        Some("1333-82-0"),
        Some("{not json"),
        Some(3),
    )
    .await;

    let report = validate_all(&pool).await.unwrap();
    assert!(report.errors.iter().any(|f| f.issue == "invalid_hazard_flags"));
}

#[tokio::test]
async fn test_wrong_shape_hazard_flags_is_an_error() {
    let pool = open_memory_store().await.unwrap();
    // valid JSON, wrong shape: codes must be a list
    common::insert_chemical(
        &pool,
        1,
        "Wrong shape",
        Some("1333-82-0"),
        Some(r#"{"codes": "H350"}"#),
        Some(3),
    )
    .await;

    let report = validate_all(&pool).await.unwrap();
    assert!(report.errors.iter().any(|f| f.issue == "invalid_hazard_flags"));
}

#[tokio::test]
async fn test_inverted_weight_range_is_an_error() {
    let pool = open_memory_store().await.unwrap();
    common::insert_material(&pool, 1, "M-100", None).await;
    common::insert_chemical(&pool, 1, "Chromium trioxide", Some("1333-82-0"), None, Some(5)).await;
    common::insert_composition(&pool, 1, 1, Some(30.0), Some(10.0)).await;

    let report = validate_all(&pool).await.unwrap();
    let finding = report
        .errors
        .iter()
        .find(|f| f.issue == "invalid_range")
        .expect("range finding");
    assert!(finding.details.contains("M-100"));
}

#[tokio::test]
async fn test_weight_out_of_bounds_is_an_error() {
    let pool = open_memory_store().await.unwrap();
    common::insert_material(&pool, 1, "M-100", None).await;
    common::insert_chemical(&pool, 1, "Chromium trioxide", Some("1333-82-0"), None, Some(5)).await;
    common::insert_composition(&pool, 1, 1, Some(-1.0), Some(120.0)).await;

    let report = validate_all(&pool).await.unwrap();
    let out_of_range: Vec<_> = report
        .errors
        .iter()
        .filter(|f| f.issue == "out_of_range" && f.table == "material_chemicals")
        .collect();
    assert_eq!(out_of_range.len(), 2);
}

#[tokio::test]
async fn test_weight_sum_over_100_is_a_warning_only() {
    let pool = open_memory_store().await.unwrap();
    common::insert_material(&pool, 1, "M-100", None).await;
    common::insert_chemical(&pool, 1, "Chromium trioxide", Some("1333-82-0"), None, Some(5)).await;
    common::insert_chemical(&pool, 2, "Nickel sulfate", Some("7786-81-4"), None, Some(4)).await;
    common::insert_composition(&pool, 1, 1, Some(40.0), Some(60.0)).await;
    common::insert_composition(&pool, 1, 2, Some(30.0), Some(55.0)).await;

    let report = validate_all(&pool).await.unwrap();
    assert_eq!(report.status, ValidationStatus::Warnings);
    assert_eq!(report.error_count, 0);

    let warning = report
        .warnings
        .iter()
        .find(|f| f.issue == "exceeds_100_percent")
        .expect("sum warning");
    assert_eq!(warning.severity, Severity::Warning);
    assert!(warning.details.contains("115.0%"));
}

#[tokio::test]
async fn test_composite_code_mismatch_is_an_error() {
    let pool = open_memory_store().await.unwrap();
    common::insert_substrate(&pool, 1, "B", "Beryllium copper").await;
    common::insert_finish_applied(&pool, 1, "P", "Nickel plate").await;
    // code says XZ99 but the components say BP27
    common::insert_finish_code(&pool, 1, "XZ99", 1, 1, 27).await;

    let report = validate_all(&pool).await.unwrap();
    let finding = report
        .errors
        .iter()
        .find(|f| f.issue == "code_mismatch")
        .expect("composition finding");
    assert!(finding.details.contains("XZ99"));
    assert!(finding.details.contains("BP27"));
}

#[tokio::test]
async fn test_zero_padded_sequence_accepted() {
    let pool = open_memory_store().await.unwrap();
    common::insert_substrate(&pool, 1, "B", "Beryllium copper").await;
    common::insert_finish_applied(&pool, 1, "P", "Nickel plate").await;
    common::insert_finish_code(&pool, 1, "BP07", 1, 1, 7).await;
    common::insert_finish_code(&pool, 2, "BP7", 1, 1, 7).await;

    let report = validate_all(&pool).await.unwrap();
    assert!(!report.errors.iter().any(|f| f.issue == "code_mismatch"));
}

#[tokio::test]
async fn test_step_order_gap_is_an_error() {
    let pool = open_memory_store().await.unwrap();
    common::insert_substrate(&pool, 1, "B", "Beryllium copper").await;
    common::insert_finish_applied(&pool, 1, "P", "Nickel plate").await;
    common::insert_finish_code(&pool, 1, "BP27", 1, 1, 27).await;
    common::insert_sft_step(&pool, 1, "SFT0001", "Clean").await;
    common::insert_sft_step(&pool, 2, "SFT0002", "Plate").await;
    common::insert_step_assignment(&pool, 1, 1, 1).await;
    common::insert_step_assignment(&pool, 1, 2, 3).await;

    let report = validate_all(&pool).await.unwrap();
    let finding = report
        .errors
        .iter()
        .find(|f| f.issue == "non_contiguous_order")
        .expect("ordering finding");
    assert!(finding.details.contains("BP27"));
}

#[tokio::test]
async fn test_duplicate_step_order_is_an_error() {
    let pool = open_memory_store().await.unwrap();
    common::insert_substrate(&pool, 1, "B", "Beryllium copper").await;
    common::insert_finish_applied(&pool, 1, "P", "Nickel plate").await;
    common::insert_finish_code(&pool, 1, "BP27", 1, 1, 27).await;
    common::insert_sft_step(&pool, 1, "SFT0001", "Clean").await;
    common::insert_sft_step(&pool, 2, "SFT0002", "Plate").await;
    common::insert_step_assignment(&pool, 1, 1, 1).await;
    common::insert_step_assignment(&pool, 1, 2, 1).await;

    let report = validate_all(&pool).await.unwrap();
    assert!(report.errors.iter().any(|f| f.issue == "duplicate_step_order"));
}

#[tokio::test]
async fn test_missing_chemical_registry_id_is_a_completeness_error() {
    let pool = open_memory_store().await.unwrap();
    common::insert_chemical(&pool, 1, "Proprietary blend", None, None, Some(2)).await;

    let report = validate_all(&pool).await.unwrap();
    let finding = report
        .errors
        .iter()
        .find(|f| f.issue == "missing_value" && f.table == "chemicals" && f.column == "cas")
        .expect("completeness finding");
    assert_eq!(finding.severity, Severity::Error);
}
