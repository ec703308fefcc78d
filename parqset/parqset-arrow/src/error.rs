use arrow::{datatypes::DataType, error::ArrowError};
use parqset_core::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrowConvertError {
    #[error("row has {actual} values but the batch schema has {expected} columns")]
    Arity { expected: usize, actual: usize },
    #[error("value type mismatch: expected {expected}, found {found}")]
    ValueType { expected: String, found: String },
    #[error("unsupported Arrow data type for column '{column}': {data_type}")]
    UnsupportedType { column: String, data_type: DataType },
    #[error("expected builder type: {0}")]
    BuilderMismatch(&'static str),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Arrow(#[from] ArrowError),
}
