use std::net::SocketAddr;

use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::{StreamableHttpServerConfig, StreamableHttpService};
use rmcp::{ServiceExt as _, transport::stdio};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::errors::ServerError;
use crate::prompts::GraphqlPrompt;
use crate::server::Transport;
use crate::tools::introspect_schema::IntrospectSchema;

use super::{Config, Running, shutdown_signal};

pub(super) struct Starting {
    pub(super) config: Config,
}

impl Starting {
    pub(super) async fn start(self) -> Result<Running, ServerError> {
        let cancellation_token = CancellationToken::new();

        let running = Running {
            introspect_tool: IntrospectSchema::new(
                self.config.schema_source,
                self.config.search,
                self.config.api_name.clone(),
            ),
            prompt: GraphqlPrompt::new(&self.config.prompt, self.config.api_name),
            server_info: self.config.server_info,
            cancellation_token: cancellation_token.clone(),
        };

        match self.config.transport {
            Transport::StreamableHttp {
                address,
                port,
                stateful_mode,
            } => {
                info!(%address, port, stateful_mode, "Starting MCP server in Streamable HTTP mode");
                let service_state = running.clone();
                let service = StreamableHttpService::new(
                    move || Ok(service_state.clone()),
                    LocalSessionManager::default().into(),
                    StreamableHttpServerConfig {
                        stateful_mode,
                        ..Default::default()
                    },
                );
                let router = axum::Router::new().nest_service("/mcp", service);

                let address = SocketAddr::new(address, port);
                let tcp_listener = tokio::net::TcpListener::bind(address)
                    .await
                    .map_err(|source| ServerError::Bind { address, source })?;
                if let Ok(local) = tcp_listener.local_addr() {
                    info!("Listening on http://{local}/mcp");
                }

                tokio::spawn(async move {
                    if let Err(e) = axum::serve(tcp_listener, router)
                        .with_graceful_shutdown(shutdown_signal())
                        .await
                    {
                        error!("Failed to serve MCP over HTTP: {e:?}");
                    }
                    cancellation_token.cancel();
                });
            }
            Transport::Stdio => {
                info!("Starting MCP server in stdio mode");
                let service = running
                    .clone()
                    .serve(stdio())
                    .await
                    .inspect_err(|e| {
                        error!("serving error: {:?}", e);
                    })
                    .map_err(Box::new)?;
                service.waiting().await?;
                cancellation_token.cancel();
            }
        }

        Ok(running)
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use crate::prompts::PromptConfig;
    use crate::schema_source::SchemaSource;
    use crate::server_info::ServerInfoConfig;
    use crate::tools::introspect_schema::SearchConfig;

    use super::*;

    fn config(transport: Transport) -> Config {
        Config {
            transport,
            schema_source: SchemaSource::new("schema.json"),
            api_name: "Adobe Commerce".to_string(),
            search: SearchConfig::default(),
            prompt: PromptConfig::default(),
            server_info: ServerInfoConfig::default(),
        }
    }

    #[tokio::test]
    async fn starts_a_streamable_http_server() {
        let starting = Starting {
            config: config(Transport::StreamableHttp {
                address: IpAddr::V4(Ipv4Addr::LOCALHOST),
                port: 0,
                stateful_mode: false,
            }),
        };

        let running = starting.start().await.unwrap();

        assert!(!running.cancellation_token.is_cancelled());
        running.cancellation_token.cancel();
    }

    #[tokio::test]
    async fn reports_a_port_that_is_already_taken() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();
        let starting = Starting {
            config: config(Transport::StreamableHttp {
                address: IpAddr::V4(Ipv4Addr::LOCALHOST),
                port,
                stateful_mode: true,
            }),
        };

        let result = starting.start().await;

        assert!(matches!(
            result,
            Err(ServerError::Bind { address, .. }) if address.port() == port
        ));
    }
}
