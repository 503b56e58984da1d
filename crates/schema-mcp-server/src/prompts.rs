//! The prompt asking the model to write a GraphQL operation for the configured API.

use rmcp::model::{
    ErrorCode, GetPromptResult, JsonObject, Prompt, PromptArgument, PromptMessage,
    PromptMessageRole,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::McpError;

/// Name of the prompt's only argument
const QUERY_ARGUMENT: &str = "query";

/// Prompt settings
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PromptConfig {
    /// The name the prompt is listed under
    pub name: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            name: "adobe_commerce_graphql".to_string(),
        }
    }
}

/// A prompt that turns a plain-language request into a request for a GraphQL operation.
#[derive(Clone)]
pub struct GraphqlPrompt {
    api_name: String,
    pub prompt: Prompt,
}

impl GraphqlPrompt {
    pub fn new(config: &PromptConfig, api_name: impl Into<String>) -> Self {
        let api_name = api_name.into();
        let prompt = Prompt::new(
            config.name.clone(),
            Some(format!("Help writing a GraphQL operation for the {api_name} API")),
            Some(vec![PromptArgument {
                name: QUERY_ARGUMENT.to_string(),
                title: None,
                description: Some(format!(
                    "The specific {api_name} API question or request"
                )),
                required: Some(true),
            }]),
        );
        Self { api_name, prompt }
    }

    pub fn name(&self) -> &str {
        &self.prompt.name
    }

    /// Render the prompt for the given arguments.
    pub fn get(&self, arguments: Option<&JsonObject>) -> Result<GetPromptResult, McpError> {
        let query = match arguments.and_then(|arguments| arguments.get(QUERY_ARGUMENT)) {
            Some(Value::String(query)) => query,
            Some(_) => {
                return Err(McpError::new(
                    ErrorCode::INVALID_PARAMS,
                    format!("Prompt argument '{QUERY_ARGUMENT}' must be a string"),
                    None,
                ));
            }
            None => {
                return Err(McpError::new(
                    ErrorCode::INVALID_PARAMS,
                    format!("Missing required prompt argument '{QUERY_ARGUMENT}'"),
                    None,
                ));
            }
        };

        Ok(GetPromptResult {
            description: self.prompt.description.clone(),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                self.message(query),
            )],
        })
    }

    fn message(&self, query: &str) -> String {
        let api = &self.api_name;
        format!(
            "I need help writing a GraphQL operation for the {api} API.

Here is my specific request: {query}

Please help me create a complete and correct GraphQL operation (query or mutation) for the {api} API that accomplishes this task. Include:
1. The full GraphQL operation with proper syntax
2. A brief explanation of what each part of the operation does
3. Any variables needed for the operation
4. How to handle the response data
5. Relevant documentation links if applicable

When formulating your response, make sure to:
- Use the latest {api} API best practices
- Structure the query efficiently, requesting only necessary fields
- Follow proper naming conventions for the GraphQL operation
- Handle error cases appropriately
- Ensure the query is optimized for performance

The GraphQL operation should be ready to use with minimal modification."
        )
    }
}
