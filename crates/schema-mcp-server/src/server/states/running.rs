use rmcp::model::{
    CallToolRequestParam, CallToolResult, ErrorCode, GetPromptRequestParam, GetPromptResult,
    Implementation, JsonObject, ListPromptsResult, ListToolsResult, PaginatedRequestParam,
    PromptsCapability, ServerCapabilities, ServerInfo, SetLevelRequestParam, ToolsCapability,
};
use rmcp::{RoleServer, ServerHandler, service::RequestContext};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::McpError;
use crate::prompts::GraphqlPrompt;
use crate::server_info::ServerInfoConfig;
use crate::tools::introspect_schema::{INTROSPECT_SCHEMA_TOOL_NAME, IntrospectSchema};

#[derive(Clone)]
pub(super) struct Running {
    pub(super) introspect_tool: IntrospectSchema,
    pub(super) prompt: GraphqlPrompt,
    pub(super) server_info: ServerInfoConfig,
    pub(super) cancellation_token: CancellationToken,
}

impl Running {
    fn list_tools_impl(&self) -> ListToolsResult {
        ListToolsResult {
            meta: None,
            next_cursor: None,
            tools: vec![self.introspect_tool.tool.clone()],
        }
    }

    async fn call_tool_impl(
        &self,
        tool_name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        if tool_name == INTROSPECT_SCHEMA_TOOL_NAME {
            self.introspect_tool
                .execute(convert_arguments(arguments)?)
                .await
        } else {
            Err(tool_not_found(tool_name))
        }
    }

    fn list_prompts_impl(&self) -> ListPromptsResult {
        ListPromptsResult {
            meta: None,
            next_cursor: None,
            prompts: vec![self.prompt.prompt.clone()],
        }
    }

    fn get_prompt_impl(
        &self,
        prompt_name: &str,
        arguments: Option<&JsonObject>,
    ) -> Result<GetPromptResult, McpError> {
        if prompt_name == self.prompt.name() {
            self.prompt.get(arguments)
        } else {
            Err(McpError::new(
                ErrorCode::INVALID_PARAMS,
                format!("Prompt {prompt_name} not found"),
                None,
            ))
        }
    }
}

impl ServerHandler for Running {
    #[tracing::instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .call_tool_impl(&request.name, request.arguments)
            .await;
        debug!(
            success = result.as_ref().is_ok_and(|r| r.is_error != Some(true)),
            "Tool call finished"
        );
        result
    }

    #[tracing::instrument(skip_all)]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(self.list_tools_impl())
    }

    #[tracing::instrument(skip_all)]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(self.list_prompts_impl())
    }

    #[tracing::instrument(skip_all, fields(prompt = %request.name))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.get_prompt_impl(&request.name, request.arguments.as_ref())
    }

    async fn set_level(
        &self,
        request: SetLevelRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<(), McpError> {
        debug!(level = ?request.level, "Client requested a log level");
        Ok(())
    }

    fn get_info(&self) -> ServerInfo {
        let capabilities = ServerCapabilities {
            logging: Some(JsonObject::new()),
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
            prompts: Some(PromptsCapability {
                list_changed: Some(false),
            }),
            ..Default::default()
        };

        ServerInfo {
            server_info: Implementation {
                name: self.server_info.name(),
                description: None,
                icons: None,
                title: self.server_info.title(),
                version: self.server_info.version(),
                website_url: self.server_info.website_url(),
            },
            capabilities,
            ..Default::default()
        }
    }
}

fn tool_not_found(name: &str) -> McpError {
    McpError::new(
        ErrorCode::METHOD_NOT_FOUND,
        format!("Tool {name} not found"),
        None,
    )
}

fn convert_arguments<T: serde::de::DeserializeOwned>(
    arguments: Option<JsonObject>,
) -> Result<T, McpError> {
    serde_json::from_value(Value::from(arguments))
        .map_err(|_| McpError::new(ErrorCode::INVALID_PARAMS, "Invalid input".to_string(), None))
}
