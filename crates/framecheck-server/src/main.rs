//! Word server binary.
//!
//! Usage:
//!   framecheck-server --port 28333
//!   framecheck-server --min-words 3 --max-words 5 --seed 42

use clap::Parser;
use framecheck_core::TcpTransport;
use framecheck_server::{DEFAULT_PORT, ServerConfig, WordServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "framecheck-server")]
#[command(about = "Send random batches of length-prefixed words to every client")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Fewest words per connection
    #[arg(long, default_value_t = 1)]
    min_words: usize,

    /// Most words per connection
    #[arg(long, default_value_t = 9)]
    max_words: usize,

    /// Seed for reproducible word choice
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&args.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig {
        listen_addr: format!("0.0.0.0:{}", args.port),
        min_words: args.min_words,
        max_words: args.max_words,
        seed: args.seed,
    };
    config.validate()?;

    let transport = TcpTransport::bind(config.listen_addr.as_str()).await?;
    info!(addr = %config.listen_addr, "word server bound");

    WordServer::new(transport, config)?.run().await?;
    Ok(())
}
