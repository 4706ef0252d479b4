//! Gzipped CSV chunk writer.

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::ExtractResult;
use crate::value::encode_csv_value;

pub struct CsvChunkWriter {
    schema: String,
    table: String,
    out_dir: PathBuf,
    columns: Vec<String>,
    udt_names: Vec<String>,
    chunk_index: u32,
    buffer: String,
    rows_in_chunk: u32,
    chunk_size: u32,
    pub files: Vec<PathBuf>,
}

impl CsvChunkWriter {
    pub fn new(
        schema: &str,
        table: &str,
        out_dir: &Path,
        columns: Vec<String>,
        udt_names: Vec<String>,
        chunk_size: u32,
    ) -> Self {
        CsvChunkWriter {
            schema: schema.to_string(),
            table: table.to_string(),
            out_dir: out_dir.to_path_buf(),
            columns,
            udt_names,
            chunk_index: 0,
            buffer: String::new(),
            rows_in_chunk: 0,
            chunk_size,
            files: Vec::new(),
        }
    }

    fn chunk_path(&self) -> PathBuf {
        self.out_dir.join(format!(
            "{}_{}_chunk_{:04}.csv.gz",
            self.schema, self.table, self.chunk_index
        ))
    }

    fn start_chunk_if_needed(&mut self) {
        if self.rows_in_chunk == 0 && self.buffer.is_empty() {
            self.chunk_index += 1;
            self.buffer.push_str(&self.columns.join(","));
            self.buffer.push('\n');
        }
    }

    /// Feed one row's already-text values, in column order.
    pub fn write_row(&mut self, values: &[Option<String>]) -> ExtractResult<()> {
        self.start_chunk_if_needed();

        let encoded: Vec<String> = values
            .iter()
            .zip(self.udt_names.iter())
            .map(|(v, udt)| encode_csv_value(v.as_deref(), udt))
            .collect();
        self.buffer.push_str(&encoded.join(","));
        self.buffer.push('\n');
        self.rows_in_chunk += 1;

        if self.rows_in_chunk >= self.chunk_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Flush the in-progress chunk, if any rows were written.
    pub fn flush(&mut self) -> ExtractResult<()> {
        if self.rows_in_chunk == 0 {
            self.buffer.clear();
            return Ok(());
        }

        let path = self.chunk_path();
        let file = std::fs::File::create(&path)?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(self.buffer.as_bytes())?;
        encoder.finish()?;

        self.files.push(path);
        self.buffer.clear();
        self.rows_in_chunk = 0;
        Ok(())
    }
}

#[cfg(test)]
#[path = "csv_writer_test.rs"]
mod tests;
