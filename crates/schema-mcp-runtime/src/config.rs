use std::path::PathBuf;

use schema_mcp_server::prompts::PromptConfig;
use schema_mcp_server::server::Transport;
use schema_mcp_server::server_info::ServerInfoConfig;
use schema_mcp_server::tools::introspect_schema::SearchConfig;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::logging::Logging;

/// Configuration for the MCP server
#[derive(Debug, Deserialize, JsonSchema)]
pub struct Config {
    /// Path to the GraphQL introspection result (JSON). When the file is missing but
    /// `<schema>.gz` exists, the compressed copy is unpacked next to it on first use.
    pub schema: PathBuf,

    /// Name of the API the schema describes, used in tool and prompt text
    #[serde(default = "defaults::api_name")]
    pub api_name: String,

    /// The type of server transport to use
    #[serde(default)]
    pub transport: Transport,

    /// Schema search limits and root type names
    #[serde(default)]
    pub search: SearchConfig,

    /// Settings for the GraphQL operation prompt
    #[serde(default)]
    pub prompt: PromptConfig,

    /// Metadata reported to MCP clients
    #[serde(default)]
    pub server_info: ServerInfoConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: Logging,
}

mod defaults {
    pub(super) fn api_name() -> String {
        "Adobe Commerce".to_string()
    }
}
