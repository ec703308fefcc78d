use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use parqset_core::{ArrayRow, Engine, EngineFileReader, ObjectRow, Schema};
use tracing::debug;

use crate::{error::DatasetError, state::State};

/// One physical file of a dataset.
///
/// Accessors are valid only between [`open`](Self::open) and
/// [`close`](Self::close); rows are decoded by the engine on every call.
pub struct FileUnit {
    path: PathBuf,
    engine: Arc<dyn Engine>,
    handle: Option<Box<dyn EngineFileReader>>,
    closed: bool,
}

impl fmt::Debug for FileUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUnit")
            .field("path", &self.path)
            .field("state", &self.state())
            .finish()
    }
}

impl FileUnit {
    pub fn new(path: impl Into<PathBuf>, engine: Arc<dyn Engine>) -> Self {
        Self {
            path: path.into(),
            engine,
            handle: None,
            closed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> State {
        match (&self.handle, self.closed) {
            (Some(_), _) => State::Open,
            (None, true) => State::Closed,
            (None, false) => State::Unopened,
        }
    }

    /// Open the file through the engine. A unit opens at most once.
    pub fn open(&mut self) -> Result<(), DatasetError> {
        let state = self.state();
        if state != State::Unopened {
            return Err(DatasetError::illegal_state("open file unit", state));
        }
        let handle = self.engine.open_reader(&self.path)?;
        debug!(
            path = %self.path.display(),
            rows = handle.row_count(),
            columns = handle.column_count(),
            "file unit opened"
        );
        self.handle = Some(handle);
        Ok(())
    }

    fn handle(&self, operation: &'static str) -> Result<&dyn EngineFileReader, DatasetError> {
        self.handle
            .as_deref()
            .ok_or_else(|| DatasetError::illegal_state(operation, self.state()))
    }

    pub fn column_names(&self) -> Result<&[String], DatasetError> {
        Ok(self.handle("get column names")?.column_names())
    }

    pub fn column_count(&self) -> Result<usize, DatasetError> {
        Ok(self.handle("get column count")?.column_count())
    }

    pub fn row_count(&self) -> Result<u64, DatasetError> {
        Ok(self.handle("get row count")?.row_count())
    }

    /// Schema derived from the file's column types, if all are representable.
    pub fn schema(&self) -> Result<Option<&Schema>, DatasetError> {
        Ok(self.handle("get schema")?.schema())
    }

    pub fn read_row(&self, local_index: u64) -> Result<ArrayRow, DatasetError> {
        let handle = self.checked(local_index)?;
        Ok(handle.read_row_as_array(local_index)?)
    }

    /// Read a row in the engine's keyed form.
    pub fn read_row_object(&self, local_index: u64) -> Result<ObjectRow, DatasetError> {
        let handle = self.checked(local_index)?;
        Ok(handle.read_row(local_index)?)
    }

    fn checked(&self, local_index: u64) -> Result<&dyn EngineFileReader, DatasetError> {
        let handle = self.handle("read row")?;
        let row_count = handle.row_count();
        if local_index >= row_count {
            return Err(DatasetError::IndexOutOfRange {
                index: local_index,
                row_count,
            });
        }
        Ok(handle)
    }

    /// Release the engine handle. Closing an unopened or closed unit is a no-op.
    pub fn close(&mut self) -> Result<(), DatasetError> {
        if let Some(mut handle) = self.handle.take() {
            self.closed = true;
            handle.close()?;
            debug!(path = %self.path.display(), "file unit closed");
        }
        Ok(())
    }
}
