//! Read-only mapping from symbolic type and unit names to engine codes.

use std::collections::BTreeMap;

use crate::{
    error::CatalogError,
    schema::{FieldType, TimeUnit},
};

/// Type and time-unit table exposed by a columnar engine.
///
/// Built once from the engine's table and passed explicitly into
/// [`Schema`](crate::Schema) construction. Name lookups ignore ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeCatalog {
    types: BTreeMap<String, FieldType>,
    units: BTreeMap<String, TimeUnit>,
}

impl TypeCatalog {
    pub fn new<'a, T, U>(types: T, units: U) -> Self
    where
        T: IntoIterator<Item = (&'a str, FieldType)>,
        U: IntoIterator<Item = (&'a str, TimeUnit)>,
    {
        Self {
            types: types
                .into_iter()
                .map(|(name, t)| (name.to_ascii_uppercase(), t))
                .collect(),
            units: units
                .into_iter()
                .map(|(name, u)| (name.to_ascii_uppercase(), u))
                .collect(),
        }
    }

    pub fn resolve(&self, name: &str) -> Result<FieldType, CatalogError> {
        self.types
            .get(&name.to_ascii_uppercase())
            .copied()
            .ok_or_else(|| CatalogError::UnknownType {
                name: name.to_string(),
            })
    }

    pub fn resolve_unit(&self, name: &str) -> Result<TimeUnit, CatalogError> {
        self.units
            .get(&name.to_ascii_uppercase())
            .copied()
            .ok_or_else(|| CatalogError::UnknownUnit {
                name: name.to_string(),
            })
    }

    /// Engine code registered under a symbolic type name.
    pub fn code_of(&self, name: &str) -> Result<i32, CatalogError> {
        self.resolve(name).map(FieldType::code)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn unit_names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    /// `(symbolic_name, engine_code)` pairs of every registered type.
    pub fn entries(&self) -> impl Iterator<Item = (&str, i32)> {
        self.types.iter().map(|(name, t)| (name.as_str(), t.code()))
    }
}
