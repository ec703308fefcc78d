//! Positional and keyed row representations and the codec between them.

use std::collections::BTreeMap;

use crate::{error::RowError, schema::Schema, value::Value};

/// Values aligned 1:1 with a schema's field order.
pub type ArrayRow = Vec<Value>;

/// Values keyed by field name; key order carries no meaning.
pub type ObjectRow = BTreeMap<String, Value>;

/// Converts between [`ArrayRow`] and [`ObjectRow`] using a field order.
#[derive(Debug, Clone, Copy)]
pub struct RowCodec<'a> {
    names: &'a [String],
}

impl<'a> RowCodec<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self::from_names(schema.field_order())
    }

    /// Codec over a bare column-name sequence, e.g. a file's column list.
    pub fn from_names(names: &'a [String]) -> Self {
        Self { names }
    }

    pub fn field_count(&self) -> usize {
        self.names.len()
    }

    /// Lay out an object row in field order.
    ///
    /// Missing keys become [`Value::Null`]; keys not in the field order are ignored.
    pub fn to_array(&self, row: &ObjectRow) -> ArrayRow {
        self.names
            .iter()
            .map(|name| row.get(name).cloned().unwrap_or(Value::Null))
            .collect()
    }

    pub fn to_object(&self, row: ArrayRow) -> Result<ObjectRow, RowError> {
        if row.len() != self.names.len() {
            return Err(RowError::Arity {
                expected: self.names.len(),
                actual: row.len(),
            });
        }
        Ok(self.names.iter().cloned().zip(row).collect())
    }
}
