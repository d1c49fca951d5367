//! Dialect Conversion CLI
//!
//! Command-line front end for converting metadata documents between
//! dialects using the registered mapping tables.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use rocrate_dialect::{convert, lookup, tables, DialectError};

#[derive(Parser)]
#[command(name = "rocrate-dialect")]
#[command(about = "Translate dataset metadata between D4D and RO-Crate dialects")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document using a named mapping table
    Convert(ConvertArgs),
    /// List the registered mapping tables
    Tables,
}

#[derive(Args)]
struct ConvertArgs {
    /// Mapping table name (see `tables`)
    #[arg(short, long)]
    table: String,

    /// Path to the source JSON document
    source: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

/// Load a source document from a JSON file
fn load_document(path: &PathBuf) -> Result<Value, DialectError> {
    let content = fs::read_to_string(path).map_err(|e| DialectError::LoadError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Write output to file or stdout
fn write_output(content: &str, output: Option<&PathBuf>) -> Result<(), DialectError> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!("Wrote converted document to {}", path.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

fn run_convert(args: ConvertArgs) -> Result<(), DialectError> {
    let table =
        lookup(&args.table).ok_or_else(|| DialectError::UnknownTable(args.table.clone()))?;

    let source = load_document(&args.source)?;
    let target = convert(table, &source)?;

    eprintln!(
        "Applied table '{}': {} of {} target fields resolved",
        table.name(),
        target.as_object().map(|obj| obj.len()).unwrap_or(0),
        table.entries().len()
    );

    let output = if args.pretty {
        serde_json::to_string_pretty(&target)?
    } else {
        serde_json::to_string(&target)?
    };
    write_output(&output, args.output.as_ref())
}

fn run_tables() {
    for table in tables::all() {
        println!("{} ({} entries)", table.name(), table.entries().len());
    }
}

fn main() {
    // Table-construction lints (duplicate target keys) land on stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match Cli::parse().command {
        Commands::Convert(args) => run_convert(args),
        Commands::Tables => {
            run_tables();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
