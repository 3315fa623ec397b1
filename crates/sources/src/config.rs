//! Framework-level flags shared by every event source binary.

use std::net::SocketAddr;

use clap::{Args, ValueEnum};

/// Run-loop configuration.
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address the feed lifecycle API listens on (or set `EVENT_SOURCE_BIND`).
    #[arg(long, env = "EVENT_SOURCE_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Log output format (or set `EVENT_SOURCE_LOG_FORMAT`).
    #[arg(
        long,
        env = "EVENT_SOURCE_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_format: LogFormat::Text,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        server: ServerConfig,
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_parse_flags() {
        let cli = TestCli::parse_from([
            "test",
            "--bind",
            "127.0.0.1:9000",
            "--log-format",
            "json",
        ]);
        assert_eq!(cli.server.bind, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(cli.server.log_format, LogFormat::Json);
    }
}
