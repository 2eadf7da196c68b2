//! List the instructions in a compiled `.tst` file as protocol source.
//!
//! Usage:
//!   tst_dump [--hex] FILE.tst

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tst_dump")]
#[command(about = "Disassemble a component tester .tst file")]
struct Cli {
    #[arg(help = "Compiled .tst file")]
    input: PathBuf,

    #[arg(long, help = "Prefix each line with its byte offset and raw bytes")]
    hex: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let program = ctp::read_file(&cli.input)
        .with_context(|| format!("Failed to read artifact {}", cli.input.display()))?;
    tracing::debug!(instructions = program.len(), "decoded artifact");

    let listing = if cli.hex {
        ctp::dump::render_program_hex(&program)
    } else {
        ctp::dump::render_program(&program)
    };
    print!("{}", listing);
    Ok(())
}
