//! Normalized schema model produced by the catalog introspector and
//! consumed by every downstream component (type mapper, DDL emitter,
//! extractor, validator).

use serde::{Deserialize, Serialize};

/// Root artifact of the analyze phase. Persisted once per run as
/// `analysis_report.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRun {
    pub run_id: uuid::Uuid,
    pub source_db: String,
    pub host: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub schemas: Vec<Schema>,
    pub extensions: Vec<String>,
    pub volumetrics: Volumetrics,
    pub compatibility_flags: Vec<CompatibilityFlag>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Volumetrics {
    pub total_size_bytes: u64,
    pub total_approx_rows: u64,
    pub largest_tables: Vec<TableSize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSize {
    pub schema: String,
    pub table: String,
    pub size_bytes: u64,
}

/// Advisory, never-fatal flag raised during introspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityFlag {
    pub schema: String,
    pub table: Option<String>,
    pub column: Option<String>,
    pub kind: CompatibilityFlagKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompatibilityFlagKind {
    ReservedIdentifier,
    WideTable,
    OversizedVarchar,
    Bytea,
    HasTriggers,
    HasFunctions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub owner: String,
    pub tables: Vec<Table>,
    pub sequences: Vec<Sequence>,
    pub views: Vec<View>,
    pub functions: Vec<Function>,
    pub special_types: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableKind {
    Base,
    View,
    Matview,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub kind: TableKind,
    pub size_bytes: u64,
    pub approx_rows: i64,
    pub comment: Option<String>,
    pub columns: Vec<Column>,
    pub constraints: Constraints,
    pub indexes: Vec<Index>,
    pub triggers: Vec<Trigger>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityKind {
    None,
    ByDefault,
    Always,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// 1-based, dense, contiguous per table.
    pub position: i32,
    pub name: String,
    pub source_type: String,
    pub udt_name: String,
    pub char_max_len: Option<i32>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
    pub nullable: bool,
    pub default_expr: Option<String>,
    pub identity: IdentityKind,
    pub identity_start: Option<i64>,
    pub identity_increment: Option<i64>,
    pub generated: bool,
    pub serial_sequence_fqn: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Constraints {
    pub primary_keys: Vec<KeyConstraint>,
    pub unique_keys: Vec<KeyConstraint>,
    pub foreign_keys: Vec<ForeignKey>,
    pub checks: Vec<CheckConstraint>,
}

/// Column list preserves declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyConstraint {
    pub name: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignKey {
    pub name: String,
    pub columns: Vec<String>,
    pub ref_schema: String,
    pub ref_table: String,
    pub ref_columns: Vec<String>,
    pub on_update: String,
    pub on_delete: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConstraint {
    pub name: String,
    pub expression: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
    pub is_unique: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trigger {
    pub name: String,
    pub timing: String,
    pub event: String,
    pub function_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    pub name: String,
    pub start_value: i64,
    pub increment_by: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct View {
    pub name: String,
    pub is_materialized: bool,
    pub definition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub return_type: String,
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationCheck {
    RowCount,
    NotNull,
    PkDuplicates,
    JsonValidity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationStatus {
    Pass,
    Fail,
    Skip,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub schema: String,
    pub table: String,
    pub check: ValidationCheck,
    pub status: ValidationStatus,
    pub details: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MigrationStatus {
    Completed,
    Failed,
    UploadFailed,
    Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationResult {
    pub schema: String,
    pub table: String,
    pub status: MigrationStatus,
    pub rows_loaded: u64,
    pub file_count: u32,
    pub duration_ms: u64,
    pub retries: u32,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingDecision {
    pub schema: String,
    pub table: String,
    pub column: String,
    pub source_type: String,
    pub target_type: String,
    pub rationale: String,
    pub nullable: bool,
    pub has_default: bool,
    pub is_identity: bool,
}
