//! Extractor: streams a base table from PostgreSQL into a
//! sequence of chunk files on local scratch storage, either gzipped
//! CSV or Snappy Parquet depending on the run's configured format.

pub mod csv_writer;
pub mod error;
pub mod parquet_writer;
pub mod value;

use std::path::{Path, PathBuf};

use pgsf_core::config::DataFormat;
use pgsf_core::identifier::quote_identifier;
use pgsf_core::model::Column;
use tokio_postgres::Client;

use crate::csv_writer::CsvChunkWriter;
use crate::error::{ExtractError, ExtractResult};
use crate::parquet_writer::ParquetChunkWriter;

/// Row-count trigger for rolling to a new chunk file. The source
/// implementation this was distilled from drives chunking off row
/// count rather than the advertised megabyte knob; `max_chunk_mb`
/// stays advisory (surfaced only in recommendations, never enforced
/// here).
pub const DEFAULT_CHUNK_ROWS: u32 = 100_000;

fn select_sql(schema: &str, table: &str, columns: &[Column]) -> String {
    let quoted_source_cols: Vec<String> = columns
        .iter()
        .map(|c| format!("{}::text", quote_identifier(&c.name, pgsf_core::config::CaseStyle::Preserve)))
        .collect();
    format!(
        "SELECT {} FROM {}.{}",
        quoted_source_cols.join(", "),
        quote_identifier(schema, pgsf_core::config::CaseStyle::Preserve),
        quote_identifier(table, pgsf_core::config::CaseStyle::Preserve),
    )
}

/// Cursor name for the transaction-scoped server-side cursor opened by
/// [`extract_table`]. One extraction runs at a time per connection
/// (each worker owns its own), so a fixed name never collides.
const CURSOR_NAME: &str = "pgsf_extract_cursor";

/// Stream `schema.table` through `client` and write chunk files under
/// `out_dir`. Returns the ordered list of produced file paths.
///
/// Opens a `DECLARE CURSOR ... FOR <select>` inside a transaction and
/// `FETCH FORWARD <chunk_rows>`s from it in a loop, so the server
/// never materializes more than one chunk's worth of rows at a time
/// (the non-materializing, chunked cursor §4.4 calls for).
pub async fn extract_table(
    client: &mut Client,
    schema: &str,
    table: &str,
    columns: &[Column],
    out_dir: &Path,
    format: DataFormat,
    chunk_rows: u32,
) -> ExtractResult<Vec<PathBuf>> {
    let sql = select_sql(schema, table, columns);
    let column_names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
    let udt_names: Vec<String> = columns.iter().map(|c| c.udt_name.clone()).collect();

    let transaction = client.transaction().await?;
    transaction
        .batch_execute(&format!("DECLARE {CURSOR_NAME} CURSOR FOR {sql}"))
        .await?;

    let mut csv_writer = (format == DataFormat::Csv).then(|| {
        CsvChunkWriter::new(
            schema,
            table,
            out_dir,
            column_names.clone(),
            udt_names.clone(),
            chunk_rows,
        )
    });
    let mut parquet_writer = (format == DataFormat::Parquet).then(|| {
        ParquetChunkWriter::new(schema, table, out_dir, column_names.clone(), chunk_rows)
    });

    loop {
        let rows = transaction
            .query(
                &format!("FETCH FORWARD {chunk_rows} FROM {CURSOR_NAME}"),
                &[],
            )
            .await?;
        if rows.is_empty() {
            break;
        }

        for row in &rows {
            let values: Vec<Option<String>> = (0..columns.len()).map(|i| row.get(i)).collect();

            match (&mut csv_writer, &mut parquet_writer) {
                (Some(w), _) => w.write_row(&values)?,
                (_, Some(w)) => w.write_row(values)?,
                _ => unreachable!("exactly one writer is constructed per format"),
            }
        }
    }

    transaction.batch_execute(&format!("CLOSE {CURSOR_NAME}")).await?;
    transaction.commit().await?;

    if let Some(w) = &mut csv_writer {
        w.flush()?;
        return Ok(w.files.clone());
    }
    if let Some(w) = &mut parquet_writer {
        w.flush()?;
        return Ok(w.files.clone());
    }
    Ok(Vec::new())
}

pub fn map_error(err: ExtractError, schema: &str, table: &str) -> pgsf_core::PgsfError {
    err.into_pgsf(schema, table)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
