//! Logical multi-file columnar datasets.
//!
//! A dataset is either a single parquet file or a directory of parquet files
//! sharing one column layout. [`DatasetReader`] presents the shards as one
//! table addressed by a logical row index; [`DatasetWriter`] writes rows
//! checked against a [`Schema`] into a single file.
//!
//! ```rust,no_run
//! use parqset::{DatasetReader, DatasetWriter, RawFieldSpec, Schema, Value, type_catalog};
//!
//! # fn main() -> Result<(), parqset::DatasetError> {
//! let schema = Schema::try_new(
//!     type_catalog(),
//!     [("id", RawFieldSpec::new("INT32")), ("name", RawFieldSpec::new("UTF8"))],
//! )?;
//! let mut writer = DatasetWriter::create(schema, "data/part-0.parquet")?;
//! writer.append_row(&[Value::I32(1), Value::string("oatmeal")])?;
//! writer.close()?;
//!
//! let reader = DatasetReader::open_path("data")?;
//! for row in reader.rows()? {
//!     println!("{:?}", row?);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod file_unit;
mod reader;
mod state;
mod writer;

pub use error::DatasetError;
pub use file_unit::FileUnit;
pub use parqset_arrow::{ParquetEngine, type_catalog};
pub use parqset_core::{
    ArrayRow, CoercionError, Engine, EngineError, EngineFileReader, EngineFileWriter, FieldKind,
    FieldSpec, FieldType, ObjectRow, RawFieldSpec, RowCodec, Schema, SchemaError, TimeUnit,
    TypeCatalog, Value,
};
pub use reader::{DatasetReader, DatasetReaderBuilder, Rows};
pub use state::State;
pub use writer::{DEFAULT_ROW_GROUP_SIZE, DatasetWriter, DatasetWriterBuilder};
