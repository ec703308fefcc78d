//! Read-only view of one or more shards as a single logical table.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use parqset_arrow::ParquetEngine;
use parqset_core::{ArrayRow, Engine, ObjectRow, RowIndex, Schema};
use tracing::{debug, warn};

use crate::{error::DatasetError, file_unit::FileUnit, state::State};

/// Reads a file or a directory of files as one dataset.
///
/// Units are opened together by [`open`](Self::open); row accessors are valid
/// only while the reader is open. Logical row `i` is row `i - start` of the
/// unit whose range contains it, in unit enumeration order.
pub struct DatasetReader {
    path: PathBuf,
    engine: Arc<dyn Engine>,
    sort_entries: bool,
    skip_hidden: bool,
    state: ReaderState,
}

enum ReaderState {
    Unopened,
    Open(OpenDataset),
    Closed,
}

struct OpenDataset {
    units: Vec<FileUnit>,
    column_names: Vec<String>,
    index: RowIndex,
}

/// Builder for configuring [`DatasetReader`].
pub struct DatasetReaderBuilder {
    path: PathBuf,
    engine: Option<Arc<dyn Engine>>,
    sort_entries: bool,
    skip_hidden: bool,
}

impl DatasetReaderBuilder {
    /// Engine used to open every unit. Defaults to [`ParquetEngine`].
    pub fn with_engine(mut self, engine: Arc<dyn Engine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Sort directory entries by file name (default `true`). When disabled
    /// units follow the platform's enumeration order.
    pub fn sort_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }

    /// Ignore directory entries whose names start with `.` or `_`
    /// (default `false`).
    pub fn skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    pub fn build(self) -> DatasetReader {
        DatasetReader {
            path: self.path,
            engine: self
                .engine
                .unwrap_or_else(|| Arc::new(ParquetEngine::new())),
            sort_entries: self.sort_entries,
            skip_hidden: self.skip_hidden,
            state: ReaderState::Unopened,
        }
    }
}

impl fmt::Debug for DatasetReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetReader")
            .field("path", &self.path)
            .field("state", &self.state())
            .finish()
    }
}

impl DatasetReader {
    pub fn builder(path: impl Into<PathBuf>) -> DatasetReaderBuilder {
        DatasetReaderBuilder {
            path: path.into(),
            engine: None,
            sort_entries: true,
            skip_hidden: false,
        }
    }

    /// Reader over `path` with the default configuration, not yet opened.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::builder(path).build()
    }

    /// Construct and open in one step.
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        let mut reader = Self::new(path);
        reader.open()?;
        Ok(reader)
    }

    /// The root path exactly as given.
    pub fn get_filepath(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> State {
        match self.state {
            ReaderState::Unopened => State::Unopened,
            ReaderState::Open(_) => State::Open,
            ReaderState::Closed => State::Closed,
        }
    }

    /// Open every unit and build the logical row index.
    ///
    /// Either every unit opens and all units share unit 0's column names,
    /// or the reader stays unopened with every unit released.
    pub fn open(&mut self) -> Result<(), DatasetError> {
        if !matches!(self.state, ReaderState::Unopened) {
            return Err(DatasetError::illegal_state("open reader", self.state()));
        }

        let paths = self.unit_paths_on_disk()?;
        let mut units = Vec::with_capacity(paths.len());
        for path in paths {
            let mut unit = FileUnit::new(path, self.engine.clone());
            if let Err(e) = unit.open() {
                release(&mut units);
                return Err(e);
            }
            units.push(unit);
        }

        let opened = OpenDataset::try_new(units)?;
        debug!(
            path = %self.path.display(),
            units = opened.units.len(),
            rows = opened.index.total(),
            columns = opened.column_names.len(),
            "dataset opened"
        );
        self.state = ReaderState::Open(opened);
        Ok(())
    }

    fn unit_paths_on_disk(&self) -> Result<Vec<PathBuf>, DatasetError> {
        let root = &self.path;
        let root_str = || root.display().to_string();
        let meta = fs::metadata(root).map_err(|e| DatasetError::io(root_str(), e))?;

        if meta.is_file() {
            return Ok(vec![root.clone()]);
        }
        if !meta.is_dir() {
            return Err(DatasetError::io(root_str(), "unsupported node type"));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(root).map_err(|e| DatasetError::io(root_str(), e))? {
            let entry = entry.map_err(|e| DatasetError::io(root_str(), e))?;
            if self.skip_hidden && is_hidden(&entry.file_name().to_string_lossy()) {
                continue;
            }
            entries.push(entry.path());
        }
        if self.sort_entries {
            entries.sort();
        }
        Ok(entries)
    }

    fn opened(&self, operation: &'static str) -> Result<&OpenDataset, DatasetError> {
        match &self.state {
            ReaderState::Open(opened) => Ok(opened),
            _ => Err(DatasetError::illegal_state(operation, self.state())),
        }
    }

    /// Total rows across every unit.
    pub fn get_row_count(&self) -> Result<u64, DatasetError> {
        Ok(self.opened("get row count")?.index.total())
    }

    /// Column names shared by every unit; empty for an empty directory.
    pub fn get_column_names(&self) -> Result<&[String], DatasetError> {
        Ok(&self.opened("get column names")?.column_names)
    }

    pub fn get_column_count(&self) -> Result<usize, DatasetError> {
        Ok(self.opened("get column count")?.column_names.len())
    }

    pub fn unit_count(&self) -> Result<usize, DatasetError> {
        Ok(self.opened("get unit count")?.units.len())
    }

    pub fn unit_paths(&self) -> Result<Vec<&Path>, DatasetError> {
        Ok(self
            .opened("get unit paths")?
            .units
            .iter()
            .map(FileUnit::path)
            .collect())
    }

    /// Row count of each unit, in unit order.
    pub fn unit_row_counts(&self) -> Result<Vec<u64>, DatasetError> {
        let opened = self.opened("get unit row counts")?;
        Ok((0..opened.index.part_count())
            .filter_map(|unit| opened.index.count_of(unit))
            .collect())
    }

    /// Typed schema of unit 0, when all of its column types are representable.
    pub fn schema(&self) -> Result<Option<&Schema>, DatasetError> {
        match self.opened("get schema")?.units.first() {
            Some(unit) => unit.schema(),
            None => Ok(None),
        }
    }

    /// Resolve a logical row to `(unit_index, local_offset)`.
    pub fn resolve(&self, index: u64) -> Result<(usize, u64), DatasetError> {
        self.opened("resolve row")?.resolve(index)
    }

    /// Read a logical row keyed by column name.
    pub fn read_row(&self, index: u64) -> Result<ObjectRow, DatasetError> {
        let opened = self.opened("read row")?;
        let (unit, offset) = opened.resolve(index)?;
        opened.units[unit].read_row_object(offset)
    }

    /// Read a logical row in column order.
    pub fn read_row_as_array(&self, index: u64) -> Result<ArrayRow, DatasetError> {
        let opened = self.opened("read row")?;
        let (unit, offset) = opened.resolve(index)?;
        opened.units[unit].read_row(offset)
    }

    /// Every logical row in order, as array rows.
    pub fn rows(&self) -> Result<Rows<'_>, DatasetError> {
        let opened = self.opened("iterate rows")?;
        Ok(Rows {
            reader: self,
            next: 0,
            end: opened.index.total(),
        })
    }

    /// Release every unit. Closing twice, or before opening, is a no-op.
    pub fn close(&mut self) -> Result<(), DatasetError> {
        match std::mem::replace(&mut self.state, ReaderState::Closed) {
            ReaderState::Open(mut opened) => {
                let mut first_error = None;
                for unit in &mut opened.units {
                    if let Err(e) = unit.close() {
                        warn!(path = %unit.path().display(), error = %e, "failed to close unit");
                        first_error.get_or_insert(e);
                    }
                }
                debug!(path = %self.path.display(), "dataset closed");
                first_error.map_or(Ok(()), Err)
            }
            ReaderState::Unopened => {
                self.state = ReaderState::Unopened;
                Ok(())
            }
            ReaderState::Closed => Ok(()),
        }
    }
}

impl OpenDataset {
    fn try_new(mut units: Vec<FileUnit>) -> Result<Self, DatasetError> {
        let checked = check_uniform(&units).and_then(|column_names| {
            let counts = units
                .iter()
                .map(FileUnit::row_count)
                .collect::<Result<Vec<_>, _>>()?;
            Ok((column_names, counts))
        });
        match checked {
            Ok((column_names, counts)) => Ok(Self {
                units,
                column_names,
                index: RowIndex::from_counts(counts),
            }),
            Err(e) => {
                release(&mut units);
                Err(e)
            }
        }
    }

    fn resolve(&self, index: u64) -> Result<(usize, u64), DatasetError> {
        self.index
            .resolve(index)
            .ok_or(DatasetError::IndexOutOfRange {
                index,
                row_count: self.index.total(),
            })
    }
}

/// Column names of unit 0, after checking every other unit against them.
fn check_uniform(units: &[FileUnit]) -> Result<Vec<String>, DatasetError> {
    let Some(first) = units.first() else {
        return Ok(Vec::new());
    };
    let expected = first.column_names()?;

    for (unit_index, unit) in units.iter().enumerate().skip(1) {
        let names = unit.column_names()?;
        let detail = if names.len() != expected.len() {
            format!(
                "expected {} columns, found {}",
                expected.len(),
                names.len()
            )
        } else if names != expected {
            format!("expected columns {expected:?}, found {names:?}")
        } else {
            continue;
        };
        return Err(DatasetError::SchemaMismatch {
            path: unit.path().display().to_string(),
            unit_index,
            detail,
        });
    }
    Ok(expected.to_vec())
}

fn release(units: &mut [FileUnit]) {
    for unit in units {
        if let Err(e) = unit.close() {
            warn!(path = %unit.path().display(), error = %e, "failed to release unit");
        }
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

/// Iterator over a reader's rows, from [`DatasetReader::rows`].
pub struct Rows<'a> {
    reader: &'a DatasetReader,
    next: u64,
    end: u64,
}

impl Iterator for Rows<'_> {
    type Item = Result<ArrayRow, DatasetError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let row = self.reader.read_row_as_array(self.next);
        self.next += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}

impl Drop for DatasetReader {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(path = %self.path.display(), error = %e, "failed to close dataset on drop");
        }
    }
}
