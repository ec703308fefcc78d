use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::load_schema;

#[derive(Args)]
pub struct SchemaArgs {
    /// JSON schema file: an object of field name to {type, unit?, width?, nullable?}
    input: PathBuf,
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let schema = load_schema(&self.input)?;
        print!("{schema}");
        Ok(())
    }
}
