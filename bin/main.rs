use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use schema_mcp_runtime::{Config, read_config, read_config_from_env};
use schema_mcp_server::schema_source::SchemaSource;
use schema_mcp_server::server::Server;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Clap styling
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Arguments to the MCP server
#[derive(Debug, Parser)]
#[command(
    version,
    styles = STYLES,
    about = "GraphQL Schema MCP Server - search a GraphQL schema from an AI agent",
)]
struct Args {
    /// Path to the config file. Without one, configuration is read from `SCHEMA_MCP_*`
    /// environment variables.
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config: Config = match Args::parse().config {
        Some(path) => read_config(&path)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?,
        None => read_config_from_env().context("Invalid configuration from environment")?,
    };

    let (layer, _guard) = config.logging.layer();
    tracing_subscriber::registry()
        .with(layer)
        .with(config.logging.env_filter()?)
        .try_init()?;

    info!(
        "GraphQL Schema MCP Server v{} // searching the {} schema at {}",
        env!("CARGO_PKG_VERSION"),
        config.api_name,
        config.schema.display(),
    );

    Server::builder()
        .transport(config.transport)
        .schema_source(SchemaSource::new(config.schema))
        .api_name(config.api_name)
        .search(config.search)
        .prompt(config.prompt)
        .server_info(config.server_info)
        .build()
        .start()
        .await?;

    Ok(())
}
