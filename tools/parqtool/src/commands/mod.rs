pub mod cat;
pub mod info;
pub mod schema;
pub mod types;
pub mod write;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use parqset::{Schema, type_catalog};

pub(crate) fn load_schema(path: &Path) -> Result<Schema> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema file {}", path.display()))?;
    Schema::from_json(type_catalog(), &text)
        .with_context(|| format!("invalid schema in {}", path.display()))
}
