use clap::Parser;
use vocab_cards::app;
use vocab_cards::config::{ServerConfig, init_logging};

/// Main entry point for the web application
///
/// Parses the bind address and log level (flags or `VOCAB_CARDS_*`
/// environment variables), initializes logging and serves the card viewer.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    app::run(&config).await
}
