//! Engine-independent core types for `parqset`.
//!
//! This crate provides the symbolic type vocabulary ([`FieldType`] /
//! [`TimeUnit`] / [`TypeCatalog`]), the validated [`Schema`], the row
//! representations ([`ArrayRow`] / [`ObjectRow`] / [`RowCodec`]) and the
//! [`Engine`] traits a columnar file engine implements.

mod catalog;
mod coerce;
mod engine;
mod error;
mod index;
mod row;
mod schema;
mod value;

pub use catalog::TypeCatalog;
pub use coerce::coerce;
pub use engine::{Engine, EngineFileReader, EngineFileWriter};
pub use error::{CatalogError, CoercionError, EngineError, RowError, SchemaError};
pub use index::RowIndex;
pub use row::{ArrayRow, ObjectRow, RowCodec};
pub use schema::{FieldKind, FieldSpec, FieldType, RawFieldSpec, Schema, TimeUnit, format_schema};
pub use value::Value;
