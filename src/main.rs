//! Shopdesk
//!
//! Operations console core for small-business inventory, orders, and notes.
//!
//! This binary wires the console screens against in-memory collaborators and
//! runs the demo cycle. A deployment swaps the collaborators for real record
//! and object stores.

use anyhow::Result;
use shopdesk_console::ConsoleConfig;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "shopdesk.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConsoleConfig::load_or_default(Path::new(CONFIG_PATH));

    // Initialize logging; RUST_LOG wins over the configured filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone())),
        )
        .with_target(false)
        .init();

    tracing::info!("shopdesk {} starting", shopdesk_console::VERSION);
    shopdesk_console::demo::run(&config).await?;
    tracing::info!("demo cycle finished");

    Ok(())
}
