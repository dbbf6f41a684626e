//! nilmap demo - Command-line walkthrough of record mapping
//!
//! This binary maps a fixed set of source records into differently shaped
//! destination records and prints the result:
//! - single: one record, including a nested record into an optional field
//! - batch: a sequence of records
//! - all: both

use clap::{Parser, Subcommand, ValueEnum};
use nilmap::{to_optional, MapOptions, Mapper, Record};
use serde::Serialize;
use std::error::Error;
use std::io::{self, Write};

#[derive(Parser)]
#[command(name = "nilmap-demo")]
#[command(about = "Map sample records between differently shaped types")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Output format (text, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,
    /// Maximum record nesting depth
    #[arg(long, global = true)]
    max_depth: Option<usize>,
    /// Log every field decision to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Map one record with a nested object
    Single,
    /// Map a sequence of two records
    Batch,
    /// Run both walkthroughs
    All,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Record)]
#[serde(rename_all = "PascalCase")]
struct Object {
    #[nilmap(rename = "Name")]
    name: String,
}

#[derive(Debug, Clone, Default, Serialize, Record)]
#[serde(rename_all = "PascalCase")]
struct SourceStruct {
    #[nilmap(rename = "FieldA")]
    field_a: String,
    #[nilmap(rename = "FieldB")]
    field_b: i64,
    #[nilmap(rename = "FieldC")]
    field_c: Option<String>,
    #[nilmap(rename = "Object")]
    object: Object,
}

#[derive(Debug, Clone, Default, Serialize, Record)]
#[serde(rename_all = "PascalCase")]
struct DestStruct {
    #[nilmap(rename = "FieldA")]
    field_a: Option<String>,
    #[nilmap(rename = "FieldB")]
    field_b: i64,
    #[nilmap(rename = "FieldC")]
    field_c: String,
    #[nilmap(rename = "Object")]
    object: Option<Object>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(io::stderr)
            .init();
    }

    let mut opts = MapOptions::default();
    opts.max_depth = cli.max_depth;
    let mapper = Mapper::new(opts);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Single => run_single(&mapper, cli.format, &mut out)?,
        Commands::Batch => run_batch(&mapper, cli.format, &mut out)?,
        Commands::All => {
            run_single(&mapper, cli.format, &mut out)?;
            run_batch(&mapper, cli.format, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn run_single<W: Write>(
    mapper: &Mapper,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let source = SourceStruct {
        field_a: "Test1".into(),
        field_b: 123,
        field_c: None,
        object: Object {
            name: "NilMapper".into(),
        },
    };

    let mut dest = DestStruct::default();
    mapper.map_one(&source, &mut dest);

    match format {
        OutputFormat::Text => writeln!(out, "{}", describe(&dest))?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&dest)?)?,
    }
    Ok(())
}

fn run_batch<W: Write>(
    mapper: &Mapper,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let sources = vec![
        SourceStruct {
            field_a: "Test1".into(),
            field_b: 123,
            field_c: None,
            ..SourceStruct::default()
        },
        SourceStruct {
            field_a: "Test2".into(),
            field_b: 456,
            field_c: to_optional("Value".into()),
            ..SourceStruct::default()
        },
    ];

    let mut dests: Vec<DestStruct> = Vec::new();
    mapper.map_many(&sources, &mut dests);

    match format {
        OutputFormat::Text => {
            for dest in &dests {
                writeln!(out, "{}", describe(dest))?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&dests)?)?,
    }
    Ok(())
}

fn describe(dest: &DestStruct) -> String {
    let field_a = dest.field_a.as_deref().unwrap_or("<nil>");
    let object = dest
        .object
        .as_ref()
        .map(|o| format!("{:?}", o.name))
        .unwrap_or_else(|| "<nil>".to_string());
    format!("{} {} {:?} {}", field_a, dest.field_b, dest.field_c, object)
}
