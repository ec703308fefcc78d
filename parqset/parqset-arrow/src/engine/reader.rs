use std::{fs::File, path::Path};

use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parqset_core::{
    ArrayRow, EngineError, EngineFileReader, ObjectRow, RowCodec, RowIndex, Schema,
};
use tracing::debug;

use crate::{arrow_convert::record_batch_row, schema_convert::arrow_to_schema};

/// One parquet file, fully decoded into memory.
///
/// Rows are located by resolving the logical row to `(batch, offset)` over
/// the decoded record batches.
#[derive(Debug)]
pub struct ParquetFileReader {
    path: String,
    column_names: Vec<String>,
    schema: Option<Schema>,
    batches: Vec<RecordBatch>,
    index: RowIndex,
    closed: bool,
}

impl ParquetFileReader {
    pub fn open(path: impl AsRef<Path>, batch_size: usize) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let file = File::open(path).map_err(|source| EngineError::Io {
            path: path_str.clone(),
            source,
        })?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| {
            EngineError::UnrecognizedFormat {
                path: path_str.clone(),
                source: Box::new(e),
            }
        })?;

        let footer_rows = builder.metadata().file_metadata().num_rows();
        let row_groups = builder.metadata().num_row_groups();
        let arrow_schema = builder.schema().clone();
        let column_names: Vec<String> = arrow_schema
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        let schema = arrow_to_schema(&arrow_schema).ok();

        let corrupt = |detail: String| EngineError::Corrupt {
            path: path_str.clone(),
            detail,
        };
        let batches = builder
            .with_batch_size(batch_size.max(1))
            .build()
            .map_err(|e| corrupt(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| corrupt(e.to_string()))?;

        let index = RowIndex::from_counts(batches.iter().map(|b| b.num_rows() as u64));
        if i64::try_from(index.total()).ok() != Some(footer_rows) {
            return Err(corrupt(format!(
                "footer declares {footer_rows} rows but {} were decoded",
                index.total()
            )));
        }

        debug!(
            path = %path_str,
            rows = index.total(),
            row_groups,
            batches = batches.len(),
            columns = column_names.len(),
            "parquet file opened"
        );

        Ok(Self {
            path: path_str,
            column_names,
            schema,
            batches,
            index,
            closed: false,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl EngineFileReader for ParquetFileReader {
    fn column_names(&self) -> &[String] {
        &self.column_names
    }

    fn row_count(&self) -> u64 {
        self.index.total()
    }

    fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    fn read_row(&self, index: u64) -> Result<ObjectRow, EngineError> {
        let row = self.read_row_as_array(index)?;
        Ok(RowCodec::from_names(&self.column_names).to_object(row)?)
    }

    fn read_row_as_array(&self, index: u64) -> Result<ArrayRow, EngineError> {
        if self.closed {
            return Err(EngineError::Closed {
                path: self.path.clone(),
            });
        }
        let (batch, offset) =
            self.index
                .resolve(index)
                .ok_or(EngineError::IndexOutOfRange {
                    index,
                    row_count: self.index.total(),
                })?;
        // offset < batch rows, which fit in usize
        Ok(record_batch_row(&self.batches[batch], offset as usize))
    }

    fn close(&mut self) -> Result<(), EngineError> {
        if !self.closed {
            self.closed = true;
            self.batches.clear();
            debug!(path = %self.path, "parquet file closed");
        }
        Ok(())
    }
}
