//! rowgate gateway binary.
//!
//! A generic CRUD REST surface over whatever relational database
//! `DATABASE_URL` points at. Tables are reflected live; conditions arrive
//! as JSON trees and are compiled into parameterized predicates.
//!
//! ```text
//! DATABASE_URL=postgres://localhost/app LISTEN=0.0.0.0:8000 rowgate-gateway
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rowgate_gateway::config::Config;
use rowgate_gateway::routes;

/// Initialize the tracing subscriber. `RUST_LOG` wins when set, otherwise
/// the configured log level applies.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(&config.log_level)?;

    let client = rowgate_sqlx::Client::connect(&config.database_url)
        .await
        .context("connecting to database")?;
    info!(dialect = ?client.dialect(), "database connected");

    let app = routes::router(client, Duration::from_secs(config.request_timeout_secs));

    let listener = TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("binding {}", config.listen))?;
    info!(addr = %config.listen, "rowgate gateway listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
