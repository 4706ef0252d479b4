//! DDL emitter: walks an [`pgsf_core::model::AnalysisRun`]
//! into a Snowflake DDL script, a mapping manifest, and an improvement
//! recommendations document.

pub mod ddl;
pub mod manifest;

use pgsf_core::config::{Preferences, SnowflakeConfig};
use pgsf_core::model::{AnalysisRun, MappingDecision};
use pgsf_core::PgsfResult;

pub use manifest::MappingRecord;

/// Everything the plan phase produces from one analysis run.
pub struct EmissionArtifacts {
    pub ddl_script: String,
    pub mapping_decisions: Vec<MappingDecision>,
    pub mapping_manifest_yaml: String,
    pub improvement_recommendations: String,
}

pub fn emit(
    analysis: &AnalysisRun,
    snowflake: &SnowflakeConfig,
    prefs: &Preferences,
) -> PgsfResult<EmissionArtifacts> {
    let output = ddl::emit(&analysis.schemas, snowflake, prefs);
    let mapping_manifest_yaml = manifest::render_manifest(output.mapping_records.clone())?;
    let improvement_recommendations = manifest::render_recommendations(&output.recommendations);
    let mapping_decisions = output.mapping_records.into_iter().map(Into::into).collect();

    Ok(EmissionArtifacts {
        ddl_script: output.ddl_script,
        mapping_decisions,
        mapping_manifest_yaml,
        improvement_recommendations,
    })
}
