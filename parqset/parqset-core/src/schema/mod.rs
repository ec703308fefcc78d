//! Ordered, validated dataset schema.

mod format;
mod raw;
mod types;

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
};

pub use format::format_schema;
pub use raw::RawFieldSpec;
use raw::RawFields;
pub use types::{FieldKind, FieldSpec, FieldType, TimeUnit};

use crate::{
    catalog::TypeCatalog,
    coerce::coerce,
    error::{RowError, SchemaError},
    row::ArrayRow,
    value::Value,
};

/// Ordered mapping from field name to [`FieldSpec`].
///
/// Field order is fixed at construction and defines the array-row layout.
/// A `Schema` is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    names: Vec<String>,
    specs: Vec<FieldSpec>,
    positions: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema from symbolic field descriptions, resolving every type
    /// and unit name through `catalog`.
    pub fn try_new<I, N>(catalog: &TypeCatalog, fields: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (N, RawFieldSpec)>,
        N: Into<String>,
    {
        let mut specs = Vec::new();
        for (name, raw) in fields {
            let name = name.into();
            let spec = resolve_raw(catalog, &name, &raw)?;
            specs.push((name, spec));
        }
        Self::from_specs(specs)
    }

    /// Build a schema from already validated field specs.
    pub fn from_specs<I, N>(fields: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (N, FieldSpec)>,
        N: Into<String>,
    {
        let mut names = Vec::new();
        let mut specs = Vec::new();
        let mut positions = HashMap::new();

        for (name, spec) in fields {
            let name = name.into();
            if positions.insert(name.clone(), names.len()).is_some() {
                return Err(SchemaError::DuplicateField { field: name });
            }
            names.push(name);
            specs.push(spec);
        }

        if names.is_empty() {
            return Err(SchemaError::Empty);
        }

        Ok(Self {
            names,
            specs,
            positions,
        })
    }

    /// Parse a JSON object of `field -> {type, unit?, width?, nullable?}`.
    ///
    /// Object key order becomes field order. A key that appears twice is a
    /// [`SchemaError::DuplicateField`].
    pub fn from_json(catalog: &TypeCatalog, text: &str) -> Result<Self, SchemaError> {
        let RawFields(fields) = serde_json::from_str(text)?;
        Self::try_new(catalog, fields)
    }

    pub fn field_order(&self) -> &[String] {
        &self.names
    }

    pub fn field_count(&self) -> usize {
        self.names.len()
    }

    pub fn spec_of(&self, name: &str) -> Option<&FieldSpec> {
        self.index_of(name).map(|i| &self.specs[i])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.names.iter().map(String::as_str).zip(self.specs.iter())
    }

    /// Check arity and coerce every value of an array row to its field type.
    ///
    /// The input is left untouched on error, so a failed row never reaches
    /// the engine half-converted.
    pub fn coerce_row(&self, row: &[Value]) -> Result<ArrayRow, RowError> {
        if row.len() != self.field_count() {
            return Err(RowError::Arity {
                expected: self.field_count(),
                actual: row.len(),
            });
        }
        self.fields()
            .zip(row)
            .map(|((name, spec), value)| coerce(name, value, spec).map_err(RowError::from))
            .collect()
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_schema(self))
    }
}

fn resolve_raw(
    catalog: &TypeCatalog,
    field: &str,
    raw: &RawFieldSpec,
) -> Result<FieldSpec, SchemaError> {
    let field_type =
        catalog
            .resolve(&raw.type_name)
            .map_err(|_| SchemaError::UnknownType {
                field: field.to_string(),
                type_name: raw.type_name.clone(),
            })?;
    let unit = raw
        .unit
        .as_deref()
        .map(|unit| {
            catalog
                .resolve_unit(unit)
                .map_err(|_| SchemaError::UnknownUnit {
                    field: field.to_string(),
                    unit: unit.to_string(),
                })
        })
        .transpose()?;

    Ok(FieldSpec::try_new(field, field_type, unit, raw.width)?.with_nullable(raw.nullable))
}
