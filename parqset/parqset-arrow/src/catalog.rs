//! The engine's exposed type table.

use std::sync::OnceLock;

use parqset_core::{FieldType, TimeUnit, TypeCatalog};

/// Symbolic type names registered by the parquet engine.
///
/// `STRING` and `BOOLEAN` are aliases kept for schemas written against the
/// Arrow naming.
pub const FIELD_TYPES: &[(&str, FieldType)] = &[
    ("BOOL", FieldType::Bool),
    ("BOOLEAN", FieldType::Bool),
    ("UINT8", FieldType::UInt8),
    ("INT8", FieldType::Int8),
    ("UINT16", FieldType::UInt16),
    ("INT16", FieldType::Int16),
    ("UINT32", FieldType::UInt32),
    ("INT32", FieldType::Int32),
    ("UINT64", FieldType::UInt64),
    ("INT64", FieldType::Int64),
    ("FLOAT", FieldType::Float),
    ("DOUBLE", FieldType::Double),
    ("UTF8", FieldType::Utf8),
    ("STRING", FieldType::Utf8),
    ("BINARY", FieldType::Binary),
    ("FIXED_SIZE_BINARY", FieldType::FixedSizeBinary),
    ("DATE32", FieldType::Date32),
    ("TIMESTAMP", FieldType::Timestamp),
    ("TIME32", FieldType::Time32),
    ("TIME64", FieldType::Time64),
];

/// Time units accepted in schemas. Second resolution only appears on read.
pub const TIME_UNITS: &[(&str, TimeUnit)] = &[
    ("MILLI", TimeUnit::Milli),
    ("MICRO", TimeUnit::Micro),
    ("NANO", TimeUnit::Nano),
];

/// Process-wide catalog built from [`FIELD_TYPES`] and [`TIME_UNITS`].
pub fn type_catalog() -> &'static TypeCatalog {
    static CATALOG: OnceLock<TypeCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        TypeCatalog::new(FIELD_TYPES.iter().copied(), TIME_UNITS.iter().copied())
    })
}
