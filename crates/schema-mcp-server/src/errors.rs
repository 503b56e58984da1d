use std::io;
use std::net::SocketAddr;

use rmcp::service::ServerInitializeError;
use tokio::task::JoinError;

/// A failure to bring the MCP server up or keep it running
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Could not listen on {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: io::Error,
    },

    #[error("MCP service task failed: {0}")]
    Service(#[from] JoinError),

    #[error("Failed to initialize the MCP session: {0}")]
    McpInitialize(#[from] Box<ServerInitializeError>),
}

/// An MCP protocol error returned to the client
pub type McpError = rmcp::model::ErrorData;
