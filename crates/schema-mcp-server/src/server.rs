use std::net::{IpAddr, Ipv4Addr};

use bon::bon;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::errors::ServerError;
use crate::prompts::PromptConfig;
use crate::schema_source::SchemaSource;
use crate::server_info::ServerInfoConfig;
use crate::tools::introspect_schema::SearchConfig;

mod states;

use states::StateMachine;

/// An MCP server that searches a GraphQL introspection schema
pub struct Server {
    transport: Transport,
    schema_source: SchemaSource,
    api_name: String,
    search: SearchConfig,
    prompt: PromptConfig,
    server_info: ServerInfoConfig,
}

#[derive(Debug, Clone, Deserialize, Default, JsonSchema, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transport {
    /// Use standard IO for server <> client communication
    #[default]
    Stdio,

    /// Host the MCP server on the configuration, using streamable HTTP messages.
    StreamableHttp {
        /// The IP address to bind to
        #[serde(default = "Transport::default_address")]
        address: IpAddr,

        /// The port to bind to
        #[serde(default = "Transport::default_port")]
        port: u16,

        /// Enable stateful mode for session management
        #[serde(default = "Transport::default_stateful_mode")]
        stateful_mode: bool,
    },
}

impl Transport {
    fn default_address() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    fn default_port() -> u16 {
        8000
    }

    fn default_stateful_mode() -> bool {
        false
    }
}

#[bon]
impl Server {
    #[builder]
    pub fn new(
        #[builder(default)] transport: Transport,
        schema_source: SchemaSource,
        #[builder(into)] api_name: String,
        #[builder(default)] search: SearchConfig,
        #[builder(default)] prompt: PromptConfig,
        #[builder(default)] server_info: ServerInfoConfig,
    ) -> Self {
        Self {
            transport,
            schema_source,
            api_name,
            search,
            prompt,
            server_info,
        }
    }

    pub async fn start(self) -> Result<(), ServerError> {
        StateMachine {}.start(self).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Transport;

    #[test]
    fn stdio_is_the_default_transport() {
        assert_eq!(Transport::default(), Transport::Stdio);
        let transport: Transport = serde_json::from_value(json!({ "type": "stdio" })).unwrap();
        assert_eq!(transport, Transport::Stdio);
    }

    #[test]
    fn streamable_http_defaults_to_a_stateless_localhost_server() {
        let transport: Transport =
            serde_json::from_value(json!({ "type": "streamable_http" })).unwrap();

        assert_eq!(
            transport,
            Transport::StreamableHttp {
                address: "127.0.0.1".parse().unwrap(),
                port: 8000,
                stateful_mode: false,
            }
        );
    }

    #[test]
    fn streamable_http_settings_can_be_overridden() {
        let transport: Transport = serde_json::from_value(json!({
            "type": "streamable_http",
            "address": "0.0.0.0",
            "port": 9090,
            "stateful_mode": true
        }))
        .unwrap();

        assert_eq!(
            transport,
            Transport::StreamableHttp {
                address: "0.0.0.0".parse().unwrap(),
                port: 9090,
                stateful_mode: true,
            }
        );
    }
}
