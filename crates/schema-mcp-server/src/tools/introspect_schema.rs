use enumset::EnumSet;
use rmcp::model::{CallToolResult, Content, Tool};
use schema_search::{
    DEFAULT_MAX_FIELDS_PER_TYPE, DEFAULT_MAX_RESULTS, DEFAULT_MUTATION_TYPE, DEFAULT_QUERY_TYPE,
    SearchOptions, Section, search,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::McpError;
use crate::schema_source::SchemaSource;
use crate::tools::description::append_description_hint;
use crate::tools::input_schema;

/// The name of the tool to search the GraphQL schema
pub const INTROSPECT_SCHEMA_TOOL_NAME: &str = "introspect_admin_schema";

/// Schema search settings
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of types, queries and mutations listed per section
    pub max_results: usize,

    /// Maximum number of fields listed for a single type
    pub max_fields_per_type: usize,

    /// Name of the query root type
    pub query_type: String,

    /// Name of the mutation root type
    pub mutation_type: String,

    /// Extra guidance appended to the tool description
    pub hint: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            max_fields_per_type: DEFAULT_MAX_FIELDS_PER_TYPE,
            query_type: DEFAULT_QUERY_TYPE.to_string(),
            mutation_type: DEFAULT_MUTATION_TYPE.to_string(),
            hint: None,
        }
    }
}

impl SearchConfig {
    fn options(&self, sections: EnumSet<Section>) -> SearchOptions {
        SearchOptions::builder()
            .max_results(self.max_results)
            .max_fields_per_type(self.max_fields_per_type)
            .sections(sections)
            .query_type(self.query_type.clone())
            .mutation_type(self.mutation_type.clone())
            .build()
    }
}

/// Input for the schema search tool.
#[derive(JsonSchema, Deserialize)]
pub struct Input {
    /// Search term to filter schema elements by name. Only pass simple terms like 'product', 'category', etc.
    query: String,

    /// Filter results to show specific sections. Can include 'types', 'queries', 'mutations', or 'all' (default)
    #[serde(default = "default_filter")]
    filter: Vec<Section>,
}

fn default_filter() -> Vec<Section> {
    vec![Section::All]
}

/// A tool to search the GraphQL schema for types, queries and mutations by name.
#[derive(Clone)]
pub struct IntrospectSchema {
    source: SchemaSource,
    config: SearchConfig,
    api_name: String,
    pub tool: Tool,
}

impl IntrospectSchema {
    pub fn new(source: SchemaSource, config: SearchConfig, api_name: impl Into<String>) -> Self {
        let api_name = api_name.into();
        let description = format!(
            "This tool introspects and returns the portion of the {api_name} GraphQL schema relevant to the user prompt. Only use this for the {api_name} API.\n\n\
             It takes two arguments: query and filter. The query argument is the string search term to filter schema elements by name. \
             The filter argument is an array of strings to filter results to show specific sections."
        );
        let tool = Tool::new(
            INTROSPECT_SCHEMA_TOOL_NAME,
            append_description_hint(&description, config.hint.as_deref()).into_owned(),
            input_schema::<Input>(),
        );
        Self {
            source,
            config,
            api_name,
            tool,
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        let sections: EnumSet<Section> = input.filter.into_iter().collect();
        debug!(query = %input.query, ?sections, "Searching schema");

        match self.source.load().await {
            Ok(document) => {
                let report = search(&document, &input.query, &self.config.options(sections));
                Ok(CallToolResult::success(vec![Content::text(report.text)]))
            }
            Err(error) => {
                warn!("Failed to load schema: {error}");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error processing {} GraphQL schema: {error}. Make sure the schema file exists.",
                    self.api_name
                ))]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    const SCHEMA: &str = r#"{
        "data": { "__schema": { "types": [
            {
                "kind": "OBJECT",
                "name": "Product",
                "description": "A product in the shop",
                "fields": [{
                    "name": "id",
                    "args": [],
                    "type": { "kind": "SCALAR", "name": "ID" }
                }]
            },
            {
                "kind": "OBJECT",
                "name": "QueryRoot",
                "fields": [{
                    "name": "products",
                    "args": [],
                    "type": { "kind": "OBJECT", "name": "ProductConnection" }
                }]
            },
            {
                "kind": "OBJECT",
                "name": "Mutation",
                "fields": [{
                    "name": "productCreate",
                    "args": [],
                    "type": { "kind": "OBJECT", "name": "Product" }
                }]
            }
        ] } }
    }"#;

    struct Fixture {
        _dir: TempDir,
        tool: IntrospectSchema,
    }

    #[fixture]
    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, SCHEMA).unwrap();
        Fixture {
            tool: IntrospectSchema::new(
                SchemaSource::new(path),
                SearchConfig::default(),
                "Adobe Commerce",
            ),
            _dir: dir,
        }
    }

    fn input(value: serde_json::Value) -> Input {
        serde_json::from_value(value).unwrap()
    }

    fn text(result: &CallToolResult) -> &str {
        result
            .content
            .first()
            .and_then(|content| content.as_text())
            .map(|text| text.text.as_str())
            .unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn searches_every_section_by_default(fixture: Fixture) {
        let result = fixture
            .tool
            .execute(input(json!({ "query": "products" })))
            .await
            .unwrap();

        assert_ne!(result.is_error, Some(true));
        insta::assert_snapshot!(text(&result), @r"
        ## Matching GraphQL Types:
        OBJECT Product
          Description: A product in the shop
          Fields:
          id: ID

        ## Matching GraphQL Queries:
        products
          Returns: ProductConnection

        ## Matching GraphQL Mutations:
        productCreate
          Returns: Product
        ");
    }

    #[rstest]
    #[tokio::test]
    async fn filters_sections(fixture: Fixture) {
        let result = fixture
            .tool
            .execute(input(json!({ "query": "product", "filter": ["mutations"] })))
            .await
            .unwrap();

        assert_eq!(
            text(&result),
            "## Matching GraphQL Mutations:\nproductCreate\n  Returns: Product"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn no_matches_is_still_a_success(fixture: Fixture) {
        let result = fixture
            .tool
            .execute(input(json!({ "query": "customer", "filter": ["types"] })))
            .await
            .unwrap();

        assert_ne!(result.is_error, Some(true));
        assert_eq!(
            text(&result),
            "## Matching GraphQL Types:\nNo matching types found.\n\n"
        );
    }

    #[tokio::test]
    async fn missing_schema_is_reported_as_a_tool_error() {
        let dir = tempfile::tempdir().unwrap();
        let tool = IntrospectSchema::new(
            SchemaSource::new(dir.path().join("missing.json")),
            SearchConfig::default(),
            "Adobe Commerce",
        );

        let result = tool
            .execute(input(json!({ "query": "product" })))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        let message = text(&result);
        assert!(message.starts_with("Error processing Adobe Commerce GraphQL schema: "));
        assert!(message.ends_with(". Make sure the schema file exists."));
    }

    #[test]
    fn filter_defaults_to_all_sections() {
        let input = input(json!({ "query": "product" }));
        assert_eq!(input.filter, vec![Section::All]);
    }

    #[test]
    fn rejects_unknown_sections() {
        let result =
            serde_json::from_value::<Input>(json!({ "query": "product", "filter": ["fields"] }));
        assert!(result.is_err());
    }

    #[test]
    fn tool_describes_the_configured_api() {
        let tool = IntrospectSchema::new(
            SchemaSource::new("schema.json"),
            SearchConfig {
                hint: Some("Prefer the storefront types".to_string()),
                ..Default::default()
            },
            "Shopify Admin",
        );

        assert_eq!(tool.tool.name, INTROSPECT_SCHEMA_TOOL_NAME);
        let description = tool.tool.description.as_deref().unwrap_or_default();
        assert!(description.starts_with(
            "This tool introspects and returns the portion of the Shopify Admin GraphQL schema"
        ));
        assert!(description.ends_with("\nHint: Prefer the storefront types"));
    }

    #[test]
    fn input_schema_requires_only_the_query() {
        let tool = IntrospectSchema::new(
            SchemaSource::new("schema.json"),
            SearchConfig::default(),
            "Adobe Commerce",
        );

        let schema = serde_json::Value::Object(tool.tool.input_schema.as_ref().clone());
        assert_eq!(schema["required"], json!(["query"]));
        assert_eq!(schema["properties"]["query"]["type"], json!("string"));
        assert_eq!(schema["properties"]["filter"]["default"], json!(["all"]));
    }

    #[test]
    fn search_config_maps_to_search_options() {
        let config = SearchConfig {
            max_results: 3,
            max_fields_per_type: 7,
            query_type: "Query".to_string(),
            mutation_type: "Mutations".to_string(),
            hint: None,
        };

        let options = config.options(Section::Types | Section::Queries);

        assert_eq!(options.max_results, 3);
        assert_eq!(options.max_fields_per_type, 7);
        assert_eq!(options.query_type, "Query");
        assert_eq!(options.mutation_type, "Mutations");
        assert!(options.includes(Section::Queries));
        assert!(!options.includes(Section::Mutations));
    }
}
