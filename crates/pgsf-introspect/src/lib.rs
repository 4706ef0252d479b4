//! Catalog introspector: connects to the source
//! PostgreSQL database, reads its catalog into a normalized
//! [`pgsf_core::model::AnalysisRun`], and raises advisory
//! compatibility flags along the way.

pub mod compat;
pub mod connect;
pub mod error;
pub mod queries;

use pgsf_core::config::PostgresConfig;
use pgsf_core::model::{AnalysisRun, Schema, TableSize, Volumetrics};
use pgsf_core::PgsfResult;

pub use error::{IntrospectError, IntrospectResult};

/// Run the full analyze phase against `cfg`, returning the populated
/// [`AnalysisRun`]. The connection is closed before returning.
pub async fn introspect(cfg: &PostgresConfig, source_db: String) -> PgsfResult<AnalysisRun> {
    let conn = connect::connect(cfg).await?;
    let result = introspect_with_client(&conn.client, cfg, source_db).await;
    conn.close();
    result.map_err(Into::into)
}

async fn introspect_with_client(
    client: &tokio_postgres::Client,
    cfg: &PostgresConfig,
    source_db: String,
) -> IntrospectResult<AnalysisRun> {
    let extensions = queries::fetch_extensions(client).await?;
    let schema_rows = queries::fetch_schemas(client, &cfg.schemas).await?;

    let mut schemas = Vec::with_capacity(schema_rows.len());
    let mut compatibility_flags = Vec::new();
    let mut total_size_bytes: u64 = 0;
    let mut total_approx_rows: u64 = 0;
    let mut table_sizes: Vec<TableSize> = Vec::new();

    for (name, owner) in schema_rows {
        let tables = queries::fetch_tables_for_schema(client, &name).await?;
        let sequences = queries::fetch_sequences(client, &name).await?;
        let views = queries::fetch_views(client, &name).await?;
        let functions = queries::fetch_functions(client, &name).await?;

        for table in &tables {
            total_size_bytes += table.size_bytes;
            total_approx_rows += table.approx_rows.max(0) as u64;
            table_sizes.push(TableSize {
                schema: name.clone(),
                table: table.name.clone(),
                size_bytes: table.size_bytes,
            });
        }

        let mut schema = Schema {
            name,
            owner,
            tables,
            sequences,
            views,
            functions,
            special_types: Vec::new(),
        };

        schema.special_types = compat::special_types_for_schema(&schema);
        compatibility_flags.extend(compat::scan_schema(&schema));
        schemas.push(schema);
    }

    table_sizes.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
    table_sizes.truncate(20);

    Ok(AnalysisRun {
        run_id: uuid::Uuid::new_v4(),
        source_db,
        host: cfg.host.clone(),
        timestamp: chrono::Utc::now(),
        schemas,
        extensions,
        volumetrics: Volumetrics {
            total_size_bytes,
            total_approx_rows,
            largest_tables: table_sizes,
        },
        compatibility_flags,
    })
}
