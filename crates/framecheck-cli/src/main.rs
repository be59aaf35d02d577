//! framecheck command line.
//!
//! Usage:
//!   framecheck fetch --host localhost --port 28333
//!   framecheck validate --dir testdata --count 10 --strict

mod fetch;
mod validate;

use std::{io, path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use framecheck_core::{BatchConfig, FrameReader};
use tokio::net::TcpStream;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "framecheck")]
#[command(about = "Length-prefixed word client and TCP checksum validator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect to a word server and print every word it sends
    Fetch(FetchArgs),
    /// Validate the checksums of captured TCP segments
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Server host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = 28333)]
    port: u16,

    /// Print payloads as hex instead of text
    #[arg(long)]
    hex: bool,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Directory holding tcp_addrs_{i}.txt and tcp_data_{i}.dat
    #[arg(short, long, default_value = "testdata")]
    dir: PathBuf,

    /// Number of cases to check, starting at 0
    #[arg(short, long, default_value_t = 10)]
    count: u32,

    /// Exit non-zero if any case fails or errors
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    match cli.command {
        Command::Fetch(args) => {
            let stream = TcpStream::connect((args.host.as_str(), args.port)).await?;
            info!(host = %args.host, port = args.port, "connected");

            let mut reader = FrameReader::new(stream);
            let mut out = io::stdout().lock();
            let count = fetch::print_messages(&mut reader, &mut out, args.hex).await?;
            debug!(count, "server closed connection");

            Ok(ExitCode::SUCCESS)
        },
        Command::Validate(args) => {
            let config = BatchConfig { data_dir: args.dir, case_count: args.count };

            let mut out = io::stdout().lock();
            let report = validate::print_report(&config, &mut out).await?;

            if args.strict && !report.all_passed() { Ok(ExitCode::FAILURE) } else { Ok(ExitCode::SUCCESS) }
        },
    }
}
