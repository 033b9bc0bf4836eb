use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Web server settings
#[derive(Parser, Debug, Clone)]
#[clap(name = "vocab-web", version, about = "Vocabulary flashcard viewer")]
pub struct ServerConfig {
    #[clap(long, env = "VOCAB_CARDS_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    #[clap(long, short, env = "VOCAB_CARDS_LOG", default_value = "info")]
    pub log_level: String,
}

/// Terminal front end settings
#[derive(Parser, Debug, Clone)]
#[clap(name = "vocab-cli", version, about = "Vocabulary flashcards in the terminal")]
pub struct CliConfig {
    #[clap(long, short, env = "VOCAB_CARDS_LOG", default_value = "warn")]
    pub log_level: String,

    #[clap(long, help = "CSV or Excel file to load as custom cards on startup")]
    pub import: Option<PathBuf>,
}

/// Initializes `env_logger`; `RUST_LOG` wins over `level`
pub fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults() {
        let config = ServerConfig::parse_from(["vocab-web"]);
        assert_eq!(config.bind, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn cli_takes_import_path() {
        let config = CliConfig::parse_from(["vocab-cli", "--import", "cards.csv", "-l", "debug"]);
        assert_eq!(config.import, Some(PathBuf::from("cards.csv")));
        assert_eq!(config.log_level, "debug");
    }
}
