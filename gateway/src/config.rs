//! Gateway configuration, read from flags or environment.

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "rowgate-gateway", version, about)]
pub struct Config {
    /// Address to bind the HTTP listener on.
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8000")]
    pub listen: String,

    /// Database connection URL (postgres:// or sqlite:).
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Log level filter used when RUST_LOG is not set.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
}
