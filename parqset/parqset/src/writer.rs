//! Schema-checked writer producing one columnar file.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use parqset_arrow::ParquetEngine;
use parqset_core::{Engine, EngineFileWriter, ObjectRow, RowCodec, Schema, Value};
use tracing::{debug, warn};

use crate::{error::DatasetError, state::State};

/// Rows per row group unless configured otherwise.
pub const DEFAULT_ROW_GROUP_SIZE: usize = 1024 * 1024;

/// Writes rows conforming to a [`Schema`] into a single file.
///
/// The output file is created by [`open`](Self::open) and finalised by
/// [`close`](Self::close). Every row is checked for arity and coerced to the
/// schema's types before it reaches the engine, so a rejected row leaves the
/// writer open and the file unchanged. A writer dropped while open is closed
/// on drop with a warning; use [`abort`](Self::abort) to discard the output.
pub struct DatasetWriter {
    schema: Schema,
    path: PathBuf,
    engine: Arc<dyn Engine>,
    row_group_size: usize,
    rows_appended: u64,
    state: WriterState,
}

enum WriterState {
    Unopened,
    Open(Box<dyn EngineFileWriter>),
    Closed,
}

/// Builder for configuring [`DatasetWriter`].
pub struct DatasetWriterBuilder {
    schema: Schema,
    path: PathBuf,
    engine: Option<Arc<dyn Engine>>,
    row_group_size: usize,
}

impl DatasetWriterBuilder {
    /// Engine used to create the file. Defaults to [`ParquetEngine`].
    pub fn with_engine(mut self, engine: Arc<dyn Engine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn with_row_group_size(mut self, rows: usize) -> Self {
        self.row_group_size = rows;
        self
    }

    pub fn build(self) -> Result<DatasetWriter, DatasetError> {
        if self.row_group_size == 0 {
            return Err(DatasetError::InvalidRowGroupSize);
        }
        Ok(DatasetWriter {
            schema: self.schema,
            path: self.path,
            engine: self
                .engine
                .unwrap_or_else(|| Arc::new(ParquetEngine::new())),
            row_group_size: self.row_group_size,
            rows_appended: 0,
            state: WriterState::Unopened,
        })
    }
}

impl fmt::Debug for DatasetWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetWriter")
            .field("path", &self.path)
            .field("state", &self.state())
            .field("row_group_size", &self.row_group_size)
            .field("rows_appended", &self.rows_appended)
            .finish()
    }
}

impl DatasetWriter {
    pub fn builder(schema: Schema, path: impl Into<PathBuf>) -> DatasetWriterBuilder {
        DatasetWriterBuilder {
            schema,
            path: path.into(),
            engine: None,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    /// Writer with the default configuration, not yet opened.
    pub fn new(schema: Schema, path: impl Into<PathBuf>) -> Self {
        Self {
            schema,
            path: path.into(),
            engine: Arc::new(ParquetEngine::new()),
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
            rows_appended: 0,
            state: WriterState::Unopened,
        }
    }

    /// Construct and open in one step.
    pub fn create(schema: Schema, path: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        let mut writer = Self::new(schema, path);
        writer.open()?;
        Ok(writer)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn get_filepath(&self) -> &Path {
        &self.path
    }

    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    /// Rows accepted since the writer was opened.
    pub fn rows_appended(&self) -> u64 {
        self.rows_appended
    }

    pub fn state(&self) -> State {
        match self.state {
            WriterState::Unopened => State::Unopened,
            WriterState::Open(_) => State::Open,
            WriterState::Closed => State::Closed,
        }
    }

    /// Create the output file.
    pub fn open(&mut self) -> Result<(), DatasetError> {
        if !matches!(self.state, WriterState::Unopened) {
            return Err(DatasetError::illegal_state("open writer", self.state()));
        }
        let sink = self
            .engine
            .open_writer(&self.schema, &self.path, self.row_group_size)?;
        debug!(
            path = %self.path.display(),
            fields = self.schema.field_count(),
            row_group_size = self.row_group_size,
            "dataset writer opened"
        );
        self.state = WriterState::Open(sink);
        Ok(())
    }

    fn sink(&mut self, operation: &'static str) -> Result<&mut dyn EngineFileWriter, DatasetError> {
        let state = self.state();
        match &mut self.state {
            WriterState::Open(sink) => Ok(sink.as_mut()),
            _ => Err(DatasetError::illegal_state(operation, state)),
        }
    }

    /// Append a row whose values follow the schema's field order.
    pub fn append_row(&mut self, row: &[Value]) -> Result<(), DatasetError> {
        self.sink("append row")?;
        let coerced = self.schema.coerce_row(row)?;
        self.sink("append row")?.append_row_array(&coerced)?;
        self.rows_appended += 1;
        Ok(())
    }

    /// Append a row keyed by field name.
    ///
    /// Fields missing from `row` are written as null, which is accepted only
    /// for nullable fields. Keys that are not schema fields are ignored.
    pub fn append_row_object(&mut self, row: &ObjectRow) -> Result<(), DatasetError> {
        let values = RowCodec::new(&self.schema).to_array(row);
        self.append_row(&values)
    }

    /// Set the rows-per-row-group hint. Takes effect at the next row group
    /// boundary when the writer is already open.
    pub fn set_row_group_size(&mut self, rows: usize) -> Result<(), DatasetError> {
        if let WriterState::Closed = self.state {
            return Err(DatasetError::illegal_state(
                "set row group size",
                State::Closed,
            ));
        }
        if rows == 0 {
            return Err(DatasetError::InvalidRowGroupSize);
        }
        self.row_group_size = rows;
        if let WriterState::Open(sink) = &mut self.state {
            sink.set_row_group_size(rows);
        }
        Ok(())
    }

    /// Flush buffered rows and finalise the file. Closing again, or closing
    /// an unopened writer, is a no-op.
    ///
    /// If finalising fails the writer stays open and `close` may be retried.
    pub fn close(&mut self) -> Result<(), DatasetError> {
        let WriterState::Open(sink) = &mut self.state else {
            return Ok(());
        };
        sink.close()?;
        self.state = WriterState::Closed;
        debug!(
            path = %self.path.display(),
            rows = self.rows_appended,
            "dataset writer closed"
        );
        Ok(())
    }

    /// Discard the output instead of finalising it.
    ///
    /// An open writer releases its sink and removes the partial file. The
    /// writer ends up closed in every case, except that a writer that was
    /// already closed keeps its finished file.
    pub fn abort(&mut self) -> Result<(), DatasetError> {
        match std::mem::replace(&mut self.state, WriterState::Closed) {
            WriterState::Open(mut sink) => {
                sink.abort()?;
                debug!(path = %self.path.display(), "dataset writer aborted");
                Ok(())
            }
            WriterState::Unopened | WriterState::Closed => Ok(()),
        }
    }
}

impl Drop for DatasetWriter {
    fn drop(&mut self) {
        if let WriterState::Open(_) = self.state {
            warn!(
                path = %self.path.display(),
                "dataset writer dropped while open; finalising"
            );
            if let Err(e) = self.close() {
                warn!(path = %self.path.display(), error = %e, "failed to finalise on drop");
            }
        }
    }
}
