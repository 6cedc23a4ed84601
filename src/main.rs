// src/main.rs
mod commands;
mod logger;

use clap::{ArgAction, Parser, Subcommand};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "huffpack", version)]
#[command(about = "Compress and decompress files with Huffman coding.", long_about = None)]
struct Cli {
    /// Log more detail (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    Compress { input: PathBuf, output: PathBuf },
    /// Decompress a file produced by `compress`
    Decompress { input: PathBuf, output: PathBuf },
    /// Show the header and code table of a compressed file
    Inspect {
        input: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let span = tracing::info_span!("command_execution", command = ?std::env::args().collect::<Vec<_>>());
    let _enter = span.enter();

    let result = match cli.command {
        Commands::Compress { input, output } => commands::compress_file(&input, &output),
        Commands::Decompress { input, output } => commands::decompress_file(&input, &output),
        Commands::Inspect { input, json } => commands::inspect_file(&input, json),
    };
    if let Err(e) = &result {
        tracing::error!(error = %e, "command failed");
    }
    result
}
