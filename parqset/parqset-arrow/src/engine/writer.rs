use std::{
    fs::{self, File},
    path::Path,
    sync::Arc,
};

use arrow::datatypes::SchemaRef;
use parquet::{arrow::ArrowWriter, file::properties::WriterProperties};
use parqset_core::{EngineError, EngineFileWriter, Schema, Value};
use tracing::{debug, trace, warn};

use crate::{arrow_convert::RowBuffer, schema_convert::schema_to_arrow};

// upper bound on builder preallocation
const DEFAULT_CAPACITY: usize = 1024;

/// Streams rows into a new parquet file.
///
/// Rows are coerced against the schema, buffered column-wise, and written
/// out as one row group each time `row_group_size` rows have accumulated.
/// The footer is written by [`close`](EngineFileWriter::close); a writer
/// dropped without closing leaves an unreadable file, and
/// [`abort`](EngineFileWriter::abort) removes it.
pub struct ParquetFileWriter {
    path: String,
    schema: Schema,
    writer: Option<ArrowWriter<File>>,
    buffer: RowBuffer,
    row_group_size: usize,
    rows_written: u64,
    row_groups: usize,
}

impl ParquetFileWriter {
    pub fn create(
        schema: &Schema,
        path: impl AsRef<Path>,
        row_group_size: usize,
    ) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();
        let arrow_schema: SchemaRef = Arc::new(schema_to_arrow(schema));
        let row_group_size = row_group_size.max(1);
        let buffer = RowBuffer::try_new(arrow_schema.clone(), row_group_size.min(DEFAULT_CAPACITY))
            .map_err(|e| encode_error(&path_str, e))?;

        let file = File::create(path).map_err(|source| EngineError::Io {
            path: path_str.clone(),
            source,
        })?;
        // row groups are cut explicitly by flush()
        let props = WriterProperties::builder()
            .set_max_row_group_size(usize::MAX)
            .build();
        let writer = ArrowWriter::try_new(file, arrow_schema, Some(props))
            .map_err(|e| encode_error(&path_str, e))?;

        debug!(path = %path_str, row_group_size, "parquet file created");

        Ok(Self {
            path: path_str,
            schema: schema.clone(),
            writer: Some(writer),
            buffer,
            row_group_size,
            rows_written: 0,
            row_groups: 0,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Rows accepted so far, including rows still buffered.
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    fn flush_row_group(&mut self) -> Result<(), EngineError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let rows = self.buffer.len();
        let batch = self.buffer.finish().map_err(|e| encode_error(&self.path, e))?;
        let Some(writer) = self.writer.as_mut() else {
            return Err(EngineError::Closed {
                path: self.path.clone(),
            });
        };
        let result = writer.write(&batch).and_then(|()| writer.flush());
        result.map_err(|e| encode_error(&self.path, e))?;
        self.row_groups += 1;
        trace!(path = %self.path, rows, row_group = self.row_groups, "row group written");
        Ok(())
    }
}

fn encode_error(path: &str, e: impl std::error::Error + Send + Sync + 'static) -> EngineError {
    EngineError::Encode {
        path: path.to_string(),
        source: Box::new(e),
    }
}

impl EngineFileWriter for ParquetFileWriter {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn append_row_array(&mut self, row: &[Value]) -> Result<(), EngineError> {
        if self.writer.is_none() {
            return Err(EngineError::Closed {
                path: self.path.clone(),
            });
        }
        let row = self.schema.coerce_row(row)?;
        self.buffer.push(&row).map_err(|e| encode_error(&self.path, e))?;
        self.rows_written += 1;
        if self.buffer.len() >= self.row_group_size {
            self.flush_row_group()?;
        }
        Ok(())
    }

    fn set_row_group_size(&mut self, rows: usize) {
        self.row_group_size = rows.max(1);
    }

    fn close(&mut self) -> Result<(), EngineError> {
        if self.writer.is_none() {
            return Ok(());
        }
        self.flush_row_group()?;
        if let Some(writer) = self.writer.take() {
            writer.close().map_err(|e| encode_error(&self.path, e))?;
        }
        debug!(
            path = %self.path,
            rows = self.rows_written,
            row_groups = self.row_groups,
            "parquet file closed"
        );
        Ok(())
    }

    fn abort(&mut self) -> Result<(), EngineError> {
        // dropping the ArrowWriter skips the footer
        let Some(writer) = self.writer.take() else {
            return Ok(());
        };
        drop(writer);
        warn!(
            path = %self.path,
            rows = self.rows_written,
            "parquet file abandoned"
        );
        fs::remove_file(&self.path).map_err(|source| EngineError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
