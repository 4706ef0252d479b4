use super::*;

use pgsf_core::config::SnowflakeConfig;
use pgsf_core::model::{Constraints, KeyConstraint, TableKind};

fn snowflake_cfg() -> SnowflakeConfig {
    SnowflakeConfig {
        account: "xy12345".to_string(),
        warehouse: "COMPUTE_WH".to_string(),
        database: "app".to_string(),
        default_role: "SYSADMIN".to_string(),
        schema: "public".to_string(),
        stage: "migration_stage".to_string(),
        file_format: "pg2sf_csv".to_string(),
    }
}

fn bare_column(name: &str, source_type: &str, nullable: bool) -> Column {
    Column {
        position: 1,
        name: name.to_string(),
        source_type: source_type.to_string(),
        udt_name: source_type.to_string(),
        char_max_len: None,
        numeric_precision: None,
        numeric_scale: None,
        nullable,
        default_expr: None,
        identity: IdentityKind::None,
        identity_start: None,
        identity_increment: None,
        generated: false,
        serial_sequence_fqn: None,
        comment: None,
    }
}

#[test]
fn database_and_stage_use_configured_case_style() {
    let mut ddl = String::new();
    emit_database_and_stage(&mut ddl, &snowflake_cfg(), CaseStyle::Upper);
    assert!(ddl.contains("CREATE DATABASE IF NOT EXISTS APP;"));
    assert!(ddl.contains("CREATE STAGE IF NOT EXISTS MIGRATION_STAGE"));
}

#[test]
fn sequence_from_nextval_extracts_name() {
    assert_eq!(
        sequence_from_nextval("nextval('public.orders_id_seq'::regclass)"),
        Some("public.orders_id_seq".to_string())
    );
    assert_eq!(sequence_from_nextval("'hello'"), None);
}

#[test]
fn identity_column_emits_identity_clause_when_enabled() {
    let mut col = bare_column("id", "integer", false);
    col.identity = IdentityKind::Always;
    col.identity_start = Some(1);
    col.identity_increment = Some(1);
    let default = emit_column_default(&col, CaseStyle::Upper, true);
    assert_eq!(default, Some("IDENTITY(1, 1)".to_string()));
}

#[test]
fn identity_falls_back_to_passthrough_default_when_disabled() {
    let mut col = bare_column("id", "integer", false);
    col.identity = IdentityKind::Always;
    col.default_expr = Some("nextval('public.orders_id_seq'::regclass)".to_string());
    let default = emit_column_default(&col, CaseStyle::Upper, false);
    assert_eq!(default, Some("DEFAULT \"PUBLIC\".\"ORDERS_ID_SEQ\".NEXTVAL".to_string()));
}

#[test]
fn foreign_keys_render_as_comments_not_constraints() {
    let mut ddl = String::new();
    let mut mapping = Vec::new();
    let mut recs = Vec::new();
    let schema = Schema {
        name: "public".to_string(),
        owner: "postgres".to_string(),
        tables: Vec::new(),
        sequences: Vec::new(),
        views: Vec::new(),
        functions: Vec::new(),
        special_types: Vec::new(),
    };
    let mut table = Table {
        name: "orders".to_string(),
        kind: TableKind::Base,
        size_bytes: 0,
        approx_rows: 0,
        comment: None,
        columns: vec![bare_column("id", "integer", false)],
        constraints: Constraints::default(),
        indexes: Vec::new(),
        triggers: Vec::new(),
    };
    table.constraints.foreign_keys.push(pgsf_core::model::ForeignKey {
        name: "fk_customer".to_string(),
        columns: vec!["customer_id".to_string()],
        ref_schema: "public".to_string(),
        ref_table: "customers".to_string(),
        ref_columns: vec!["id".to_string()],
        on_update: "NO ACTION".to_string(),
        on_delete: "CASCADE".to_string(),
    });

    let prefs = Preferences::default();
    emit_table(&mut ddl, &mut mapping, &mut recs, &schema, &table, &prefs, CaseStyle::Upper);

    assert!(ddl.contains("-- Foreign keys on public.orders"));
    assert!(!ddl.contains("FOREIGN KEY"));
    assert!(recs.iter().any(|r| r.contains("fk_customer")));
}

#[test]
fn primary_key_emits_inline_constraint() {
    let mut ddl = String::new();
    let mut mapping = Vec::new();
    let mut recs = Vec::new();
    let schema = Schema {
        name: "public".to_string(),
        owner: "postgres".to_string(),
        tables: Vec::new(),
        sequences: Vec::new(),
        views: Vec::new(),
        functions: Vec::new(),
        special_types: Vec::new(),
    };
    let mut table = Table {
        name: "orders".to_string(),
        kind: TableKind::Base,
        size_bytes: 0,
        approx_rows: 0,
        comment: None,
        columns: vec![bare_column("id", "integer", false)],
        constraints: Constraints::default(),
        indexes: Vec::new(),
        triggers: Vec::new(),
    };
    table.constraints.primary_keys.push(KeyConstraint {
        name: "orders_pkey".to_string(),
        columns: vec!["id".to_string()],
    });

    let prefs = Preferences::default();
    emit_table(&mut ddl, &mut mapping, &mut recs, &schema, &table, &prefs, CaseStyle::Upper);

    assert!(ddl.contains("CONSTRAINT \"ORDERS_PKEY\" PRIMARY KEY (\"ID\")"));
}

#[test]
fn large_table_without_cluster_hint_earns_recommendation_not_ddl() {
    let mut ddl = String::new();
    let mut mapping = Vec::new();
    let mut recs = Vec::new();
    let schema = Schema {
        name: "public".to_string(),
        owner: "postgres".to_string(),
        tables: Vec::new(),
        sequences: Vec::new(),
        views: Vec::new(),
        functions: Vec::new(),
        special_types: Vec::new(),
    };
    let table = Table {
        name: "events".to_string(),
        kind: TableKind::Base,
        size_bytes: CLUSTER_RECOMMENDATION_THRESHOLD_BYTES + 1,
        approx_rows: 0,
        comment: None,
        columns: vec![bare_column("id", "integer", false)],
        constraints: Constraints::default(),
        indexes: Vec::new(),
        triggers: Vec::new(),
    };

    let prefs = Preferences::default();
    emit_table(&mut ddl, &mut mapping, &mut recs, &schema, &table, &prefs, CaseStyle::Upper);

    assert!(!ddl.contains("CLUSTER BY"));
    assert!(recs.iter().any(|r| r.contains("CLUSTER BY key")));
}
