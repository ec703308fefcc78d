//! Error types for dataset readers and writers.

use parqset_core::{CoercionError, EngineError, RowError, SchemaError};

use crate::state::State;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced by [`DatasetReader`](crate::DatasetReader),
/// [`DatasetWriter`](crate::DatasetWriter) and [`FileUnit`](crate::FileUnit).
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Schema construction failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A path could not be opened, enumerated or created, or is not a
    /// recognized columnar file.
    #[error("cannot open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: BoxError,
    },

    /// File metadata or data could not be read.
    #[error("corrupt file '{path}': {detail}")]
    CorruptFile { path: String, detail: String },

    /// A shard's column layout differs from the first shard's.
    #[error("schema mismatch in unit {unit_index} ('{path}'): {detail}")]
    SchemaMismatch {
        path: String,
        unit_index: usize,
        detail: String,
    },

    #[error("row index {index} out of range for {row_count} rows")]
    IndexOutOfRange { index: u64, row_count: u64 },

    #[error("row has {actual} values but the schema declares {expected} fields")]
    Arity { expected: usize, actual: usize },

    #[error("type coercion failed: {0}")]
    TypeCoercion(#[from] CoercionError),

    /// A method was called in a state that does not allow it.
    #[error("cannot {operation} while {state}")]
    IllegalState {
        operation: &'static str,
        state: State,
    },

    #[error("row group size must be positive")]
    InvalidRowGroupSize,

    /// Encoding or finalising the output file failed.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: BoxError,
    },
}

impl DatasetError {
    pub(crate) fn illegal_state(operation: &'static str, state: State) -> Self {
        Self::IllegalState { operation, state }
    }

    pub(crate) fn io(path: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Io {
            path: path.into(),
            source: source.into(),
        }
    }
}

impl From<RowError> for DatasetError {
    fn from(e: RowError) -> Self {
        match e {
            RowError::Arity { expected, actual } => Self::Arity { expected, actual },
            RowError::Coercion(e) => Self::TypeCoercion(e),
        }
    }
}

impl From<EngineError> for DatasetError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io { path, source } => Self::io(path, source),
            EngineError::UnrecognizedFormat { path, source } => Self::Io { path, source },
            EngineError::Corrupt { path, detail } => Self::CorruptFile { path, detail },
            EngineError::IndexOutOfRange { index, row_count } => {
                Self::IndexOutOfRange { index, row_count }
            }
            EngineError::Row(e) => e.into(),
            EngineError::Encode { path, source } => Self::Write { path, source },
            EngineError::Closed { .. } => Self::illegal_state("use engine handle", State::Closed),
        }
    }
}
