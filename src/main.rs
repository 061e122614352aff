use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use launchpad::ingest::{self, UploadFile};
use launchpad::launch::LaunchFlow;
use launchpad::logging;

#[derive(Parser)]
#[command(name = "launchpad")]
#[command(about = "Asset launch orchestration and batch metadata ingestion")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Write logs to timestamped files in this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a batch file drop and print the normalized records
    Ingest {
        /// Manifest and asset files (one .csv or .json manifest expected)
        files: Vec<PathBuf>,

        /// Print raw JSON records instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// List the built-in launch flows and their steps
    Flows,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    let _logging = logging::init_logging(level, cli.log_dir.as_deref())?;

    match cli.command {
        Commands::Ingest { files, json } => cmd_ingest(&files, json),
        Commands::Flows => {
            cmd_flows();
            Ok(())
        }
    }
}

fn cmd_ingest(paths: &[PathBuf], json: bool) -> Result<()> {
    let files = paths
        .iter()
        .map(|path| UploadFile::from_path(path))
        .collect::<Result<Vec<_>>>()?;

    let records = match ingest::ingest(files) {
        Ok(records) => records,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!("{} record(s)", records.len());
    for record in &records {
        let issues = ingest::validate_record(record);
        let marker = if issues.is_clean() { "ok" } else { "INVALID" };
        println!(
            "  [{}] {} (price {}, supply {})",
            marker, record.name, record.price_amount, record.supply
        );
    }
    Ok(())
}

fn cmd_flows() {
    for flow in LaunchFlow::all() {
        println!("{}", flow.key());
        for (id, label) in flow.steps() {
            println!("  {} - {}", id, label);
        }
    }
}
