//! `enigma` command-line tool.
//!
//! ```text
//! enigma CONFIG [INPUT] [OUTPUT]
//! ```
//!
//! Reads a machine configuration from `CONFIG`, then converts the messages
//! in `INPUT` (standard input by default) and writes them to `OUTPUT`
//! (standard output by default). Any error is reported as a single
//! `Error: ...` line on standard error with exit status 1.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use enigma::config::MachineConfig;
use enigma::message;

#[derive(Parser)]
#[command(name = "enigma", version)]
#[command(about = "Encrypt and decrypt messages on a simulated rotor cipher machine", long_about = None)]
struct Cli {
    /// Machine configuration file.
    config: PathBuf,
    /// Message file; standard input if omitted.
    input: Option<PathBuf>,
    /// Output file; standard output if omitted.
    output: Option<PathBuf>,
    /// Log more to standard error (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let text = fs::read_to_string(&cli.config)
        .with_context(|| format!("could not open {}", cli.config.display()))?;
    let mut machine = MachineConfig::parse(&text)?.build()?;

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    message::process(&mut machine, input, output)?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
