use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use parqset::DatasetReader;

#[derive(Args)]
pub struct InfoArgs {
    /// Dataset file or directory
    input: PathBuf,

    /// Include files whose names start with '.' or '_'
    #[arg(long)]
    include_hidden: bool,
}

impl InfoArgs {
    pub fn run(self) -> Result<()> {
        let mut reader = DatasetReader::builder(&self.input)
            .skip_hidden(!self.include_hidden)
            .build();
        reader.open()?;

        println!("path: {}", reader.get_filepath().display());
        println!("units: {}", reader.unit_count()?);
        for (path, rows) in reader.unit_paths()?.iter().zip(reader.unit_row_counts()?) {
            println!("  {} ({rows} rows)", path.display());
        }
        println!("rows: {}", reader.get_row_count()?);
        println!("columns: {}", reader.get_column_names()?.join(", "));
        match reader.schema()? {
            Some(schema) => print!("schema:\n{schema}"),
            None => println!("schema: <not representable>"),
        }

        reader.close()?;
        Ok(())
    }
}
