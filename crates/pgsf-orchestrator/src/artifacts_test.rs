use super::*;

use pgsf_core::model::{Constraints, Schema, TableKind, Volumetrics};

fn analysis() -> AnalysisRun {
    AnalysisRun {
        run_id: uuid::Uuid::new_v4(),
        source_db: "app".to_string(),
        host: "localhost".to_string(),
        timestamp: chrono::Utc::now(),
        schemas: vec![Schema {
            name: "public".to_string(),
            owner: "app".to_string(),
            tables: vec![Table {
                name: "orders".to_string(),
                kind: TableKind::Base,
                size_bytes: 0,
                approx_rows: 0,
                comment: None,
                columns: vec![],
                constraints: Constraints::default(),
                indexes: vec![],
                triggers: vec![],
            }],
            sequences: vec![],
            views: vec![],
            functions: vec![],
            special_types: vec![],
        }],
        extensions: vec![],
        volumetrics: Volumetrics::default(),
        compatibility_flags: vec![],
    }
}

#[test]
fn load_plan_has_one_entry_per_base_table() {
    let plan = build_load_plan(&analysis(), DataFormat::Csv, 100_000);
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].table, "orders");
}

#[test]
fn copy_commands_reference_chunk_0001() {
    let plan = build_load_plan(&analysis(), DataFormat::Csv, 100_000);
    let sql = render_copy_commands(&plan, "MIGRATION_STAGE", "PG2SF_CSV", CaseStyle::Upper);
    assert!(sql.contains("public_orders_chunk_0001.csv.gz"));
}

#[test]
fn copy_commands_quote_identifiers_per_case_style() {
    let plan = build_load_plan(&analysis(), DataFormat::Csv, 100_000);
    let sql = render_copy_commands(&plan, "MIGRATION_STAGE", "PG2SF_CSV", CaseStyle::Upper);
    assert!(sql.contains("COPY INTO PUBLIC.ORDERS"));
}

#[test]
fn summary_mentions_status() {
    let text = render_summary(&analysis(), "COMPLETED", &[], &[]);
    assert!(text.contains("**COMPLETED**"));
}
