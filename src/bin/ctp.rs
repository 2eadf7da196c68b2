//! Compile a protocol file to a `.tst` binary for the component tester's SD card.
//!
//! Usage:
//!   ctp [-o FILE] [-t] [-l] INFILE
//!   ctp [-o FILE] [-t] [-l] -c < protocol.txt
//!
//! Warnings go to stderr. On a compilation error the message is printed, nothing is
//! written, and the exit status is 1.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ctp", version)]
#[command(about = "Compile a component tester protocol to a binary file")]
#[command(group(ArgGroup::new("source").required(true).args(["input", "code"])))]
struct Cli {
    #[arg(help = "Protocol source file")]
    input: Option<PathBuf>,

    #[arg(short, long, help = "Read the protocol from stdin instead of a file")]
    code: bool,

    #[arg(short, long, default_value = "./out.tst", help = "Output file")]
    output: PathBuf,

    #[arg(
        short,
        long,
        help = "Only report whether compilation succeeds; write no output file"
    )]
    test: bool,

    #[arg(short, long, help = "Print a listing of the compiled instructions")]
    listing: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let source = match &cli.input {
        Some(path) if !cli.code => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => {
            let mut src = String::new();
            io::stdin()
                .read_to_string(&mut src)
                .context("Failed to read protocol from stdin")?;
            src
        }
    };

    let compilation = match ctp::compile_source(&source) {
        Ok(c) => c,
        Err(err) => {
            println!("{}", err);
            if cli.test {
                println!("compilation failed");
            }
            std::process::exit(1);
        }
    };

    for warning in &compilation.warnings {
        eprintln!("{}", warning);
    }
    if cli.listing {
        print!("{}", ctp::dump::render_program(&compilation.program));
    }

    if cli.test {
        println!("compilation successful");
    } else {
        ctp::make_file(&cli.output, &compilation.program)
            .with_context(|| format!("Failed to write output to {}", cli.output.display()))?;
        tracing::info!(
            output = %cli.output.display(),
            instructions = compilation.program.len(),
            "wrote artifact"
        );
    }

    Ok(())
}
