use std::{
    collections::HashMap,
    fs,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use parqset::{
    ArrayRow, DatasetError, DatasetReader, Engine, EngineError, EngineFileReader,
    EngineFileWriter, ObjectRow, RowCodec, Schema, State, TypeCatalog, Value, type_catalog,
};

// ---------------------------------------------------------------------------
// In-memory engine: files on disk are placeholders, contents live here
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryEngine {
    files: HashMap<String, (Vec<String>, Vec<ArrayRow>)>,
    live: Arc<AtomicUsize>,
}

impl MemoryEngine {
    fn with_file(mut self, name: &str, columns: &[&str], rows: Vec<ArrayRow>) -> Self {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        self.files.insert(name.to_string(), (columns, rows));
        self
    }

    fn live_handles(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

struct MemoryReader {
    columns: Vec<String>,
    rows: Vec<ArrayRow>,
    live: Arc<AtomicUsize>,
    closed: bool,
}

impl EngineFileReader for MemoryReader {
    fn column_names(&self) -> &[String] {
        &self.columns
    }

    fn row_count(&self) -> u64 {
        self.rows.len() as u64
    }

    fn schema(&self) -> Option<&Schema> {
        None
    }

    fn read_row(&self, index: u64) -> Result<ObjectRow, EngineError> {
        let row = self.read_row_as_array(index)?;
        Ok(RowCodec::from_names(&self.columns).to_object(row)?)
    }

    fn read_row_as_array(&self, index: u64) -> Result<ArrayRow, EngineError> {
        self.rows
            .get(index as usize)
            .cloned()
            .ok_or(EngineError::IndexOutOfRange {
                index,
                row_count: self.row_count(),
            })
    }

    fn close(&mut self) -> Result<(), EngineError> {
        if !self.closed {
            self.closed = true;
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

impl Drop for MemoryReader {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

impl Engine for MemoryEngine {
    fn type_catalog(&self) -> &TypeCatalog {
        type_catalog()
    }

    fn open_reader(&self, path: &Path) -> Result<Box<dyn EngineFileReader>, EngineError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (columns, rows) = self.files.get(&name).cloned().ok_or_else(|| {
            EngineError::UnrecognizedFormat {
                path: path.display().to_string(),
                source: "not a known file".into(),
            }
        })?;
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryReader {
            columns,
            rows,
            live: self.live.clone(),
            closed: false,
        }))
    }

    fn open_writer(
        &self,
        _schema: &Schema,
        path: &Path,
        _row_group_size: usize,
    ) -> Result<Box<dyn EngineFileWriter>, EngineError> {
        Err(EngineError::Io {
            path: path.display().to_string(),
            source: std::io::Error::other("read-only engine"),
        })
    }
}

fn rows(ids: std::ops::Range<i32>) -> Vec<ArrayRow> {
    ids.map(|i| vec![Value::I32(i), Value::string(format!("n{i}"))])
        .collect()
}

/// Directory with one empty placeholder file per name.
fn dataset_dir(names: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in names {
        fs::write(dir.path().join(name), b"").unwrap();
    }
    dir
}

fn reader(dir: &Path, engine: &Arc<MemoryEngine>) -> DatasetReader {
    DatasetReader::builder(dir)
        .with_engine(engine.clone())
        .build()
}

fn two_shards() -> MemoryEngine {
    MemoryEngine::default()
        .with_file("a.parquet", &["id", "name"], rows(0..3))
        .with_file("b.parquet", &["id", "name"], rows(3..5))
}

#[test]
fn logical_rows_span_shards() {
    let dir = dataset_dir(&["b.parquet", "a.parquet"]);
    let engine = Arc::new(two_shards());
    let mut reader = reader(dir.path(), &engine);
    reader.open().unwrap();

    assert_eq!(reader.get_row_count().unwrap(), 5);
    assert_eq!(reader.get_column_names().unwrap(), ["id", "name"]);
    assert_eq!(reader.get_column_count().unwrap(), 2);
    assert_eq!(reader.unit_count().unwrap(), 2);
    assert_eq!(reader.unit_row_counts().unwrap(), vec![3, 2]);

    assert_eq!(reader.resolve(0).unwrap(), (0, 0));
    assert_eq!(reader.resolve(2).unwrap(), (0, 2));
    assert_eq!(reader.resolve(3).unwrap(), (1, 0));
    assert_eq!(reader.resolve(4).unwrap(), (1, 1));

    for i in 0..5 {
        assert_eq!(
            reader.read_row_as_array(i).unwrap(),
            vec![Value::I32(i as i32), Value::string(format!("n{i}"))]
        );
    }
    let row = reader.read_row(3).unwrap();
    assert_eq!(row.get("id"), Some(&Value::I32(3)));

    assert!(matches!(
        reader.read_row(5),
        Err(DatasetError::IndexOutOfRange {
            index: 5,
            row_count: 5
        })
    ));
    // per-row errors leave the reader open
    assert_eq!(reader.state(), State::Open);
    assert!(reader.read_row(4).is_ok());
}

#[test]
fn rows_iterates_every_logical_row() {
    let dir = dataset_dir(&["a.parquet", "b.parquet"]);
    let engine = Arc::new(two_shards());
    let mut reader = reader(dir.path(), &engine);
    reader.open().unwrap();

    let ids: Vec<Value> = reader
        .rows()
        .unwrap()
        .map(|row| row.unwrap()[0].clone())
        .collect();
    assert_eq!(ids, (0..5).map(Value::I32).collect::<Vec<_>>());
    assert_eq!(reader.rows().unwrap().len(), 5);
}

#[test]
fn empty_shards_are_skipped_during_resolution() {
    let dir = dataset_dir(&["a", "b", "c"]);
    let engine = Arc::new(
        MemoryEngine::default()
            .with_file("a", &["id", "name"], vec![])
            .with_file("b", &["id", "name"], rows(0..2))
            .with_file("c", &["id", "name"], vec![]),
    );
    let mut reader = reader(dir.path(), &engine);
    reader.open().unwrap();

    assert_eq!(reader.get_row_count().unwrap(), 2);
    assert_eq!(reader.resolve(0).unwrap(), (1, 0));
    assert_eq!(reader.resolve(1).unwrap(), (1, 1));
    assert!(reader.resolve(2).is_err());
}

#[test]
fn state_machine_is_enforced() {
    let dir = dataset_dir(&["a.parquet", "b.parquet"]);
    let engine = Arc::new(two_shards());
    let mut reader = reader(dir.path(), &engine);

    assert!(matches!(
        reader.read_row(0),
        Err(DatasetError::IllegalState {
            state: State::Unopened,
            ..
        })
    ));
    assert!(reader.get_row_count().is_err());
    assert!(reader.get_column_names().is_err());

    reader.open().unwrap();
    assert!(matches!(
        reader.open(),
        Err(DatasetError::IllegalState {
            state: State::Open,
            ..
        })
    ));

    reader.close().unwrap();
    reader.close().unwrap();
    assert_eq!(reader.state(), State::Closed);
    assert_eq!(engine.live_handles(), 0);
    assert!(matches!(
        reader.read_row_as_array(0),
        Err(DatasetError::IllegalState {
            state: State::Closed,
            ..
        })
    ));
    assert!(matches!(
        reader.open(),
        Err(DatasetError::IllegalState { .. })
    ));
}

#[test]
fn column_count_mismatch_fails_atomically() {
    let dir = dataset_dir(&["a.parquet", "b.parquet", "c.parquet"]);
    let engine = Arc::new(
        MemoryEngine::default()
            .with_file("a.parquet", &["id", "name"], rows(0..3))
            .with_file("b.parquet", &["id"], vec![vec![Value::I32(9)]])
            .with_file("c.parquet", &["id", "name"], rows(3..5)),
    );
    let mut reader = reader(dir.path(), &engine);

    let err = reader.open().unwrap_err();
    assert!(matches!(
        err,
        DatasetError::SchemaMismatch { unit_index: 1, ref path, .. } if path.ends_with("b.parquet")
    ));
    assert_eq!(engine.live_handles(), 0);
    assert_eq!(reader.state(), State::Unopened);
    assert!(reader.get_row_count().is_err());
}

#[test]
fn column_name_mismatch_is_reported() {
    let dir = dataset_dir(&["a.parquet", "b.parquet"]);
    let engine = Arc::new(
        MemoryEngine::default()
            .with_file("a.parquet", &["id", "name"], rows(0..1))
            .with_file("b.parquet", &["name", "id"], rows(0..1)),
    );
    let err = reader(dir.path(), &engine).open().unwrap_err();
    assert!(matches!(err, DatasetError::SchemaMismatch { unit_index: 1, .. }));
    assert_eq!(engine.live_handles(), 0);
}

#[test]
fn unit_open_failure_releases_opened_units() {
    let dir = dataset_dir(&["a.parquet", "b.parquet", "zz-unknown"]);
    let engine = Arc::new(two_shards());
    let mut reader = reader(dir.path(), &engine);

    let err = reader.open().unwrap_err();
    assert!(matches!(err, DatasetError::Io { ref path, .. } if path.ends_with("zz-unknown")));
    assert_eq!(engine.live_handles(), 0);
    assert_eq!(reader.state(), State::Unopened);
}

#[test]
fn hidden_entries_can_be_skipped() {
    let dir = dataset_dir(&["a.parquet", "b.parquet", "_SUCCESS", ".crc"]);
    let engine = Arc::new(two_shards());

    let err = reader(dir.path(), &engine).open().unwrap_err();
    assert!(matches!(err, DatasetError::Io { .. }));

    let mut reader = DatasetReader::builder(dir.path())
        .with_engine(engine.clone())
        .skip_hidden(true)
        .build();
    reader.open().unwrap();
    assert_eq!(reader.unit_count().unwrap(), 2);
}

#[test]
fn sorted_entries_define_row_order() {
    let dir = dataset_dir(&["b.parquet", "a.parquet"]);
    let engine = Arc::new(two_shards());
    let mut reader = reader(dir.path(), &engine);
    reader.open().unwrap();

    let units: Vec<String> = reader
        .unit_paths()
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(units, ["a.parquet", "b.parquet"]);
    assert_eq!(reader.read_row_as_array(0).unwrap()[0], Value::I32(0));
}

#[test]
fn single_file_root_is_one_unit() {
    let dir = dataset_dir(&["a.parquet", "b.parquet"]);
    let engine = Arc::new(two_shards());
    let file = dir.path().join("b.parquet");
    let mut reader = reader(&file, &engine);
    reader.open().unwrap();

    assert_eq!(reader.get_filepath(), file.as_path());
    assert_eq!(reader.unit_count().unwrap(), 1);
    assert_eq!(reader.get_row_count().unwrap(), 2);
    assert_eq!(reader.read_row_as_array(0).unwrap()[0], Value::I32(3));
}

#[test]
fn empty_directory_is_an_empty_dataset() {
    let dir = dataset_dir(&[]);
    let engine = Arc::new(MemoryEngine::default());
    let mut reader = reader(dir.path(), &engine);
    reader.open().unwrap();

    assert_eq!(reader.get_row_count().unwrap(), 0);
    assert!(reader.get_column_names().unwrap().is_empty());
    assert!(reader.schema().unwrap().is_none());
    assert!(matches!(
        reader.read_row(0),
        Err(DatasetError::IndexOutOfRange { .. })
    ));
}

#[test]
fn missing_root_is_an_io_error() {
    let dir = dataset_dir(&[]);
    let engine = Arc::new(MemoryEngine::default());
    let err = reader(&dir.path().join("nope"), &engine)
        .open()
        .unwrap_err();
    assert!(matches!(err, DatasetError::Io { .. }));
}

#[test]
fn dropping_an_open_reader_releases_units() {
    let dir = dataset_dir(&["a.parquet", "b.parquet"]);
    let engine = Arc::new(two_shards());
    {
        let mut reader = reader(dir.path(), &engine);
        reader.open().unwrap();
        assert_eq!(engine.live_handles(), 2);
    }
    assert_eq!(engine.live_handles(), 0);
}
