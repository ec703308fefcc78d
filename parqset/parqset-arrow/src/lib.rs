//! Arrow/Parquet engine for `parqset`.
//!
//! This crate realises the [`parqset_core::Engine`] boundary on top of the
//! `arrow` and `parquet` crates:
//! - [`type_catalog`] exposes the engine's symbolic type and unit table.
//! - [`schema_to_arrow`] / [`arrow_to_schema`] convert between schema forms.
//! - [`ParquetEngine`] opens [`ParquetFileReader`]s and [`ParquetFileWriter`]s.
//!
//! # Typical Flow
//! ```rust,no_run
//! use parqset_arrow::{ParquetEngine, type_catalog};
//! use parqset_core::{Engine, RawFieldSpec, Schema, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::try_new(
//!     type_catalog(),
//!     [("id", RawFieldSpec::new("INT32")), ("name", RawFieldSpec::new("UTF8"))],
//! )?;
//! let engine = ParquetEngine::new();
//! let mut writer = engine.open_writer(&schema, "part-0.parquet".as_ref(), 1024)?;
//! writer.append_row_array(&[Value::I32(1), Value::string("a")])?;
//! writer.close()?;
//!
//! let reader = engine.open_reader("part-0.parquet".as_ref())?;
//! assert_eq!(reader.row_count(), 1);
//! # Ok(())
//! # }
//! ```
pub mod arrow_convert;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod schema_convert;

pub use arrow_convert::{RowBuffer, record_batch_row, rows_to_record_batch, value_at};
pub use catalog::{FIELD_TYPES, TIME_UNITS, type_catalog};
pub use engine::{DEFAULT_BATCH_SIZE, ParquetEngine, ParquetEngineBuilder, ParquetFileReader, ParquetFileWriter};
pub use error::ArrowConvertError;
pub use schema_convert::{arrow_to_schema, field_spec_to_datatype, schema_to_arrow};
