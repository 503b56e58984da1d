use tracing::{error, info};

use crate::errors::ServerError;
use crate::prompts::PromptConfig;
use crate::schema_source::SchemaSource;
use crate::server_info::ServerInfoConfig;
use crate::tools::introspect_schema::SearchConfig;

use super::{Server, Transport};

mod running;
mod starting;

use running::Running;
use starting::Starting;

pub(super) struct StateMachine {}

/// Settings handed from the [`Server`] to the startup state
pub(super) struct Config {
    pub(super) transport: Transport,
    pub(super) schema_source: SchemaSource,
    pub(super) api_name: String,
    pub(super) search: SearchConfig,
    pub(super) prompt: PromptConfig,
    pub(super) server_info: ServerInfoConfig,
}

impl StateMachine {
    pub(crate) async fn start(self, server: Server) -> Result<(), ServerError> {
        let starting = Starting {
            config: Config {
                transport: server.transport,
                schema_source: server.schema_source,
                api_name: server.api_name,
                search: server.search,
                prompt: server.prompt,
                server_info: server.server_info,
            },
        };
        let running: Running = starting.start().await?;
        running.cancellation_token.cancelled().await;
        info!("MCP server stopped");
        Ok(())
    }
}

/// Resolves once the process receives Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl-C handler: {e}");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
