//! Error types for the schema, row and engine layers.

/// Lookup failure against a [`TypeCatalog`](crate::TypeCatalog).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown field type '{name}'")]
    UnknownType { name: String },

    #[error("unknown time unit '{name}'")]
    UnknownUnit { name: String },
}

/// Error returned while constructing a [`Schema`](crate::Schema).
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The field's type name is not registered in the catalog.
    #[error("field '{field}': unknown type '{type_name}'")]
    UnknownType { field: String, type_name: String },

    /// The field's unit name is not registered in the catalog.
    #[error("field '{field}': unknown time unit '{unit}'")]
    UnknownUnit { field: String, unit: String },

    /// A temporal type was declared without a resolution unit.
    #[error("field '{field}': type {field_type} requires a time unit")]
    MissingUnit { field: String, field_type: String },

    /// The unit is known but the temporal type cannot carry it.
    #[error("field '{field}': type {field_type} does not support unit {unit}")]
    UnsupportedUnit {
        field: String,
        field_type: String,
        unit: String,
    },

    #[error("field '{field}': type {field_type} does not take a time unit")]
    UnexpectedUnit { field: String, field_type: String },

    /// A fixed-size binary type was declared without a positive width.
    #[error("field '{field}': type {field_type} requires a positive width")]
    MissingWidth { field: String, field_type: String },

    #[error("field '{field}': type {field_type} does not take a width")]
    UnexpectedWidth { field: String, field_type: String },

    #[error("duplicate field '{field}'")]
    DuplicateField { field: String },

    #[error("schema must declare at least one field")]
    Empty,

    /// Schema text could not be parsed.
    #[error("failed to parse schema: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A value that cannot be converted to its field's declared type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("field '{field}': expected {expected}, found {found}")]
pub struct CoercionError {
    pub field: String,
    pub expected: String,
    pub found: String,
}

impl CoercionError {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Error raised by row-shape conversions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("row has {actual} values but the schema declares {expected} fields")]
    Arity { expected: usize, actual: usize },

    #[error(transparent)]
    Coercion(#[from] CoercionError),
}

/// Error returned by [`Engine`](crate::Engine) implementations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The file could not be opened or created.
    #[error("failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not in a format the engine recognizes.
    #[error("'{path}' is not a recognized columnar file: {source}")]
    UnrecognizedFormat {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// File metadata or column data could not be read.
    #[error("corrupt file '{path}': {detail}")]
    Corrupt { path: String, detail: String },

    #[error("row index {index} out of range for {row_count} rows")]
    IndexOutOfRange { index: u64, row_count: u64 },

    #[error(transparent)]
    Row(#[from] RowError),

    /// Encoding or flushing rows to the sink failed.
    #[error("failed to write '{path}': {source}")]
    Encode {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("handle for '{path}' is already closed")]
    Closed { path: String },
}
