//! Mapping manifest and improvement-recommendations rendering.
//!
//! Kept as explicit return values from [`crate::ddl::emit`] rather
//! than accumulated on a shared generator object, so emission stays a
//! pure walk over the model with no implicit side effects.

use pgsf_core::model::MappingDecision;
use pgsf_core::PgsfResult;

/// One row of the mapping manifest, in emission order. Converts 1:1
/// into [`MappingDecision`]; kept distinct so the emitter doesn't need
/// to depend on the full `AnalysisRun` shape to build one.
#[derive(Debug, Clone)]
pub struct MappingRecord {
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

impl From<MappingRecord> for MappingDecision {
    fn from(r: MappingRecord) -> Self {
        MappingDecision {
            schema: r.schema,
            table: r.table,
            column: r.column,
            source_type: r.source_type,
            target_type: r.target_type,
            rationale: r.rationale,
            nullable: r.nullable,
            has_default: r.has_default,
            is_identity: r.is_identity,
        }
    }
}

/// Render the mapping manifest as YAML, preserving emission order.
pub fn render_manifest(records: Vec<MappingRecord>) -> PgsfResult<String> {
    let decisions: Vec<MappingDecision> = records.into_iter().map(Into::into).collect();
    Ok(serde_yaml::to_string(&decisions)?)
}

/// Render the improvement-recommendations markdown document from the
/// flat list of advisory strings collected during emission.
pub fn render_recommendations(recommendations: &[String]) -> String {
    let mut out = String::from("# Improvement Recommendations\n\n");
    if recommendations.is_empty() {
        out.push_str("No recommendations; the schema maps cleanly onto the target.\n");
        return out;
    }
    for rec in recommendations {
        out.push_str(&format!("- {rec}\n"));
    }
    out
}

#[cfg(test)]
#[path = "manifest_test.rs"]
mod tests;
