mod commands;
mod json;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{
    cat::CatArgs, info::InfoArgs, schema::SchemaArgs, types::TypesArgs, write::WriteArgs,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parqtool", about = "Inspect and write sharded parquet datasets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print units, row counts, columns and schema of a dataset
    Info(InfoArgs),
    /// Print dataset rows as JSON Lines
    Cat(CatArgs),
    /// Write JSON Lines rows into a parquet file
    Write(WriteArgs),
    /// Validate and print a JSON schema file
    Schema(SchemaArgs),
    /// List the type and time-unit names the engine accepts
    Types(TypesArgs),
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info(args) => args.run(),
        Commands::Cat(args) => args.run(),
        Commands::Write(args) => args.run(),
        Commands::Schema(args) => args.run(),
        Commands::Types(args) => args.run(),
    }
}
