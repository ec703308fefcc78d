use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::Args;
use parqset::DatasetReader;
use serde_json::Value as Json;

use crate::json::{row_to_object, value_to_json};

#[derive(Args)]
pub struct CatArgs {
    /// Dataset file or directory
    input: PathBuf,

    /// Print rows as JSON arrays instead of objects
    #[arg(long)]
    array: bool,

    /// First logical row to print
    #[arg(long, default_value_t = 0)]
    offset: u64,

    /// Maximum number of rows to print
    #[arg(short = 'n', long)]
    limit: Option<u64>,

    /// Include files whose names start with '.' or '_'
    #[arg(long)]
    include_hidden: bool,
}

impl CatArgs {
    pub fn run(self) -> Result<()> {
        let mut reader = DatasetReader::builder(&self.input)
            .skip_hidden(!self.include_hidden)
            .build();
        reader.open()?;

        let total = reader.get_row_count()?;
        let start = self.offset.min(total);
        let end = match self.limit {
            Some(limit) => start.saturating_add(limit).min(total),
            None => total,
        };

        let columns = reader.get_column_names()?.to_vec();
        let mut out = BufWriter::new(io::stdout().lock());
        for index in start..end {
            let row = reader.read_row_as_array(index)?;
            let json = if self.array {
                Json::Array(row.iter().map(value_to_json).collect())
            } else {
                row_to_object(&columns, &row)
            };
            serde_json::to_writer(&mut out, &json)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;

        reader.close()?;
        Ok(())
    }
}
