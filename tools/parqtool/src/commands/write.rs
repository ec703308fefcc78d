use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use clap::Args;
use parqset::{DEFAULT_ROW_GROUP_SIZE, DatasetWriter, ObjectRow, Schema, Value};
use serde_json::Value as Json;
use tracing::{info, warn};

use super::load_schema;
use crate::json::json_to_value;

#[derive(Args)]
pub struct WriteArgs {
    /// JSON schema file
    #[arg(short, long)]
    schema: PathBuf,

    /// JSON Lines input, one array or object row per line (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output parquet file
    #[arg(short, long)]
    output: PathBuf,

    /// Rows per row group
    #[arg(long, default_value_t = DEFAULT_ROW_GROUP_SIZE)]
    row_group_size: usize,
}

impl WriteArgs {
    pub fn run(self) -> Result<()> {
        let schema = load_schema(&self.schema)?;
        let input: Box<dyn BufRead> = match &self.input {
            Some(path) => Box::new(BufReader::new(
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
            )),
            None => Box::new(io::stdin().lock()),
        };

        let mut writer = DatasetWriter::builder(schema.clone(), &self.output)
            .with_row_group_size(self.row_group_size)
            .build()?;
        writer.open()?;

        // a failed run must not leave a readable partial file behind
        if let Err(e) = append_lines(&mut writer, &schema, input) {
            if let Err(abort_err) = writer.abort() {
                warn!(
                    path = %self.output.display(),
                    error = %abort_err,
                    "failed to remove partial output"
                );
            }
            return Err(e);
        }

        writer.close()?;
        info!(
            path = %self.output.display(),
            rows = writer.rows_appended(),
            "parquet file written"
        );
        Ok(())
    }
}

fn append_lines(writer: &mut DatasetWriter, schema: &Schema, input: impl BufRead) -> Result<()> {
    for (line_no, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        append_line(writer, schema, &line).with_context(|| format!("line {}", line_no + 1))?;
    }
    Ok(())
}

fn append_line(writer: &mut DatasetWriter, schema: &Schema, line: &str) -> Result<()> {
    match serde_json::from_str::<Json>(line)? {
        Json::Array(items) => {
            let mut row = Vec::with_capacity(items.len());
            for ((name, spec), item) in schema.fields().zip(&items) {
                row.push(json_to_value(name, item, spec)?);
            }
            // extra items are kept so the arity check reports them
            row.extend(items.iter().skip(row.len()).map(|_| Value::Null));
            writer.append_row(&row)?;
        }
        Json::Object(map) => {
            let mut row = ObjectRow::new();
            for (name, spec) in schema.fields() {
                if let Some(item) = map.get(name) {
                    row.insert(name.to_string(), json_to_value(name, item, spec)?);
                }
            }
            writer.append_row_object(&row)?;
        }
        other => bail!("expected a JSON array or object, found {other}"),
    }
    Ok(())
}
