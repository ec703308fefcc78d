//! [`Engine`] implementation over parquet files.

mod reader;
mod writer;

use std::path::Path;

use parqset_core::{Engine, EngineError, EngineFileReader, EngineFileWriter, Schema, TypeCatalog};

pub use reader::ParquetFileReader;
pub use writer::ParquetFileWriter;

/// Rows per record batch decoded when a file is opened.
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Parquet file engine.
///
/// Readers load every record batch into memory when opened; writers buffer
/// rows in Arrow builders and cut one row group per `row_group_size` rows.
#[derive(Debug, Clone)]
pub struct ParquetEngine {
    batch_size: usize,
}

impl Default for ParquetEngine {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ParquetEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ParquetEngineBuilder {
        ParquetEngineBuilder::default()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl Engine for ParquetEngine {
    fn type_catalog(&self) -> &TypeCatalog {
        crate::catalog::type_catalog()
    }

    fn open_reader(&self, path: &Path) -> Result<Box<dyn EngineFileReader>, EngineError> {
        Ok(Box::new(ParquetFileReader::open(path, self.batch_size)?))
    }

    fn open_writer(
        &self,
        schema: &Schema,
        path: &Path,
        row_group_size: usize,
    ) -> Result<Box<dyn EngineFileWriter>, EngineError> {
        Ok(Box::new(ParquetFileWriter::create(
            schema,
            path,
            row_group_size,
        )?))
    }
}

#[derive(Debug, Clone)]
pub struct ParquetEngineBuilder {
    batch_size: usize,
}

impl Default for ParquetEngineBuilder {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ParquetEngineBuilder {
    /// Rows per decoded record batch. Zero is treated as one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn build(self) -> ParquetEngine {
        ParquetEngine {
            batch_size: self.batch_size,
        }
    }
}
