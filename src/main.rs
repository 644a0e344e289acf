//! Command-line entry point: `stock-info AAPL,MSFT,GOOG`.

use clap::Parser;
use std::time::Duration;
use stock_info::{BatchBuilder, YahooClient};
use tracing_subscriber::EnvFilter;

/// Fetch company metadata and recent dividends for a list of ticker symbols,
/// printing one JSON object to stdout with one entry per symbol.
#[derive(Parser)]
#[command(name = "stock-info", version, about)]
struct Cli {
    /// Comma-separated ticker symbols, e.g. AAPL,MSFT,GOOG
    symbols: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Diagnostics go to stderr; stdout carries only the result JSON.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let symbols: Vec<String> = cli.symbols.split(',').map(str::to_string).collect();

    let client = YahooClient::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    let results = BatchBuilder::new(&client, symbols).fetch().await;
    println!("{}", serde_json::to_string(&results)?);

    Ok(())
}
