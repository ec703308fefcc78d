//! Traits implemented by a columnar file engine.

use std::path::Path;

use crate::{
    catalog::TypeCatalog,
    error::EngineError,
    row::{ArrayRow, ObjectRow, RowCodec},
    schema::Schema,
    value::Value,
};

/// Open handle on one physical file.
///
/// Implementations own any decoding buffers; callers may read rows from
/// several threads once the handle is open.
pub trait EngineFileReader: Send + Sync {
    fn column_names(&self) -> &[String];

    fn column_count(&self) -> usize {
        self.column_names().len()
    }

    fn row_count(&self) -> u64;

    /// Schema of the file, when every column maps onto a [`FieldType`](crate::FieldType).
    fn schema(&self) -> Option<&Schema>;

    /// Decode one row keyed by column name.
    fn read_row(&self, index: u64) -> Result<ObjectRow, EngineError>;

    /// Decode one row in column order.
    fn read_row_as_array(&self, index: u64) -> Result<ArrayRow, EngineError>;

    fn close(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Open sink for one physical file.
pub trait EngineFileWriter: Send {
    fn schema(&self) -> &Schema;

    /// Encode one row given in schema field order.
    fn append_row_array(&mut self, row: &[Value]) -> Result<(), EngineError>;

    fn append_row_object(&mut self, row: &ObjectRow) -> Result<(), EngineError> {
        let array = RowCodec::new(self.schema()).to_array(row);
        self.append_row_array(&array)
    }

    /// Maximum rows per row group, effective from the next row-group boundary.
    fn set_row_group_size(&mut self, rows: usize);

    /// Flush buffered rows, write file metadata and release the sink.
    ///
    /// A failed close leaves the sink open so the call can be retried.
    fn close(&mut self) -> Result<(), EngineError>;

    /// Release the sink without finalising it and remove the partial output.
    /// A sink that was already closed is left as it is.
    fn abort(&mut self) -> Result<(), EngineError>;
}

/// Factory for file readers and writers plus the engine's type table.
pub trait Engine: Send + Sync {
    fn type_catalog(&self) -> &TypeCatalog;

    fn open_reader(&self, path: &Path) -> Result<Box<dyn EngineFileReader>, EngineError>;

    fn open_writer(
        &self,
        schema: &Schema,
        path: &Path,
        row_group_size: usize,
    ) -> Result<Box<dyn EngineFileWriter>, EngineError>;
}
