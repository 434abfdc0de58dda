//! Query engine tests over directly-inserted fixture rows

mod common;

use hazfin_store::open_memory_store;
use hazfin_store::query::{
    chemicals_by_min_level, get_finish_code_tree, list_finish_codes, TreeLookup,
};
use hazfin_store::DbError;

#[tokio::test]
async fn test_tree_orders_chemicals_by_severity_then_name() {
    let pool = open_memory_store().await.unwrap();

    common::insert_substrate(&pool, 1, "B", "Beryllium copper").await;
    common::insert_finish_applied(&pool, 1, "P", "Nickel plate").await;
    common::insert_finish_code(&pool, 1, "BP27", 1, 1, 27).await;
    common::insert_sft_step(&pool, 1, "SFT0001", "Plating bath").await;
    common::insert_step_assignment(&pool, 1, 1, 1).await;
    common::insert_material(&pool, 1, "M-100", None).await;
    common::insert_material_link(&pool, 1, 1).await;

    // same severity resolves alphabetically; higher severity wins overall
    common::insert_chemical(&pool, 1, "Sodium hydroxide", Some("1310-73-2"), None, Some(3)).await;
    common::insert_chemical(&pool, 2, "Chromium trioxide", Some("1333-82-0"), None, Some(5)).await;
    common::insert_chemical(&pool, 3, "Nickel sulfate", Some("7786-81-4"), None, Some(5)).await;
    common::insert_composition(&pool, 1, 1, Some(5.0), Some(10.0)).await;
    common::insert_composition(&pool, 1, 2, Some(1.0), Some(3.0)).await;
    common::insert_composition(&pool, 1, 3, Some(20.0), Some(30.0)).await;

    let TreeLookup::Found(tree) = get_finish_code_tree(&pool, "BP27").await.unwrap() else {
        panic!("BP27 should be found");
    };

    let names: Vec<&str> = tree.steps[0].materials[0]
        .chemicals
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Chromium trioxide", "Nickel sulfate", "Sodium hydroxide"]);
}

#[tokio::test]
async fn test_tree_attaches_provenance() {
    let pool = open_memory_store().await.unwrap();

    common::insert_substrate(&pool, 1, "B", "Beryllium copper").await;
    common::insert_finish_applied(&pool, 1, "P", "Nickel plate").await;
    common::insert_finish_code(&pool, 1, "BP27", 1, 1, 27).await;
    common::insert_lineage(&pool, "substrates.csv", "aa11", "2026-08-01T10:00:00+00:00").await;
    common::insert_lineage(&pool, "finish_codes.csv", "bb22", "2026-08-02T10:00:00+00:00").await;

    let TreeLookup::Found(tree) = get_finish_code_tree(&pool, "BP27").await.unwrap() else {
        panic!("BP27 should be found");
    };

    assert_eq!(tree.provenance.csv_shas["substrates.csv"], "aa11");
    assert_eq!(tree.provenance.csv_shas["finish_codes.csv"], "bb22");
    assert_eq!(
        tree.provenance.loaded_at.as_deref(),
        Some("2026-08-02T10:00:00+00:00")
    );
}

#[tokio::test]
async fn test_tree_with_no_steps_is_empty_not_missing() {
    let pool = open_memory_store().await.unwrap();

    common::insert_substrate(&pool, 1, "B", "Beryllium copper").await;
    common::insert_finish_applied(&pool, 1, "P", "Nickel plate").await;
    common::insert_finish_code(&pool, 1, "BP27", 1, 1, 27).await;

    let TreeLookup::Found(tree) = get_finish_code_tree(&pool, "BP27").await.unwrap() else {
        panic!("BP27 should be found");
    };
    assert!(tree.steps.is_empty());
}

#[tokio::test]
async fn test_not_found_lists_available_codes() {
    let pool = open_memory_store().await.unwrap();

    common::insert_substrate(&pool, 1, "B", "Beryllium copper").await;
    common::insert_finish_applied(&pool, 1, "P", "Nickel plate").await;
    for (id, code, seq) in [(1, "BP01", 1), (2, "BP02", 2), (3, "BP03", 3)] {
        common::insert_finish_code(&pool, id, code, 1, 1, seq).await;
    }

    let lookup = get_finish_code_tree(&pool, "ZZ99").await.unwrap();
    let TreeLookup::NotFound {
        available_codes, ..
    } = lookup
    else {
        panic!("ZZ99 should not be found");
    };
    assert_eq!(available_codes, vec!["BP01", "BP02", "BP03"]);
}

#[tokio::test]
async fn test_list_finish_codes_sorted() {
    let pool = open_memory_store().await.unwrap();

    common::insert_substrate(&pool, 1, "B", "Beryllium copper").await;
    common::insert_finish_applied(&pool, 1, "P", "Nickel plate").await;
    common::insert_finish_code(&pool, 1, "BP02", 1, 1, 2).await;
    common::insert_finish_code(&pool, 2, "BP01", 1, 1, 1).await;

    let codes = list_finish_codes(&pool).await.unwrap();
    let listed: Vec<&str> = codes.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(listed, vec!["BP01", "BP02"]);
}

#[tokio::test]
async fn test_chemicals_by_min_level_filters_and_sorts() {
    let pool = open_memory_store().await.unwrap();

    common::insert_chemical(&pool, 1, "Acetone substitute", Some("1234-56-7"), None, Some(2)).await;
    common::insert_chemical(&pool, 2, "Chromium trioxide", Some("1333-82-0"), None, Some(5)).await;
    common::insert_chemical(&pool, 3, "Nickel sulfate", Some("7786-81-4"), None, Some(4)).await;
    common::insert_chemical(&pool, 4, "Unrated solvent", Some("7664-93-9"), None, None).await;

    let chemicals = chemicals_by_min_level(&pool, 4).await.unwrap();
    let names: Vec<&str> = chemicals.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Chromium trioxide", "Nickel sulfate"]);
}

#[tokio::test]
async fn test_chemicals_min_level_out_of_range_rejected() {
    let pool = open_memory_store().await.unwrap();

    let err = chemicals_by_min_level(&pool, 6).await.unwrap_err();
    assert!(matches!(err, DbError::InvalidInput(_)));
    let err = chemicals_by_min_level(&pool, 0).await.unwrap_err();
    assert!(matches!(err, DbError::InvalidInput(_)));
}
