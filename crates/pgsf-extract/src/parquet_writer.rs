//! Snappy-compressed Parquet chunk writer.
//!
//! Every column is written as Arrow `Utf8` since the source cursor
//! already hands us text-cast values (the same representation the CSV
//! path encodes); this keeps one extractor shape for both formats
//! instead of reconstructing native Arrow types per Postgres OID.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema as ArrowSchema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::error::ExtractResult;

pub struct ParquetChunkWriter {
    schema: String,
    table: String,
    out_dir: PathBuf,
    columns: Vec<String>,
    arrow_schema: Arc<ArrowSchema>,
    chunk_index: u32,
    pending: Vec<Vec<Option<String>>>,
    chunk_size: u32,
    pub files: Vec<PathBuf>,
}

impl ParquetChunkWriter {
    pub fn new(
        schema: &str,
        table: &str,
        out_dir: &Path,
        columns: Vec<String>,
        chunk_size: u32,
    ) -> Self {
        let fields: Vec<Field> = columns
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect();

        ParquetChunkWriter {
            schema: schema.to_string(),
            table: table.to_string(),
            out_dir: out_dir.to_path_buf(),
            columns,
            arrow_schema: Arc::new(ArrowSchema::new(fields)),
            chunk_index: 0,
            pending: Vec::new(),
            chunk_size,
            files: Vec::new(),
        }
    }

    fn chunk_path(&self) -> PathBuf {
        self.out_dir.join(format!(
            "{}_{}_chunk_{:04}.parquet",
            self.schema, self.table, self.chunk_index
        ))
    }

    pub fn write_row(&mut self, values: Vec<Option<String>>) -> ExtractResult<()> {
        self.pending.push(values);
        if self.pending.len() as u32 >= self.chunk_size {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> ExtractResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        self.chunk_index += 1;
        let path = self.chunk_path();

        let mut columns: Vec<ArrayRef> = Vec::with_capacity(self.columns.len());
        for col_idx in 0..self.columns.len() {
            let values: Vec<Option<String>> = self
                .pending
                .iter()
                .map(|row| row[col_idx].clone())
                .collect();
            columns.push(Arc::new(StringArray::from(values)));
        }

        let batch = RecordBatch::try_new(self.arrow_schema.clone(), columns)?;

        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();
        let file = std::fs::File::create(&path)?;
        let mut writer = ArrowWriter::try_new(file, self.arrow_schema.clone(), Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        self.files.push(path);
        self.pending.clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "parquet_writer_test.rs"]
mod tests;
