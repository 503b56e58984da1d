use rmcp::model::JsonObject;
use schemars::JsonSchema;
use schemars::generate::SchemaSettings;
use serde_json::Value;

pub(crate) mod description;
pub mod introspect_schema;

/// The draft-07 JSON Schema of a tool's input type, for use as the tool's `inputSchema`.
pub(crate) fn input_schema<T: JsonSchema>() -> JsonObject {
    let schema = SchemaSettings::draft07()
        .into_generator()
        .into_root_schema_for::<T>();
    match serde_json::to_value(schema) {
        Ok(Value::Object(schema)) => schema,
        _ => JsonObject::new(),
    }
}

#[cfg(test)]
mod tests {
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::{Value, json};

    use super::input_schema;

    /// Lookup input
    #[derive(JsonSchema, Deserialize)]
    #[allow(dead_code)]
    struct Lookup {
        /// Name to look up
        name: String,
        limit: Option<u32>,
    }

    #[test]
    fn input_schema_uses_draft_07() {
        let schema = Value::Object(input_schema::<Lookup>());

        assert_eq!(
            schema["$schema"],
            json!("http://json-schema.org/draft-07/schema#")
        );
        assert_eq!(schema["description"], json!("Lookup input"));
        assert_eq!(schema["required"], json!(["name"]));
        assert_eq!(
            schema["properties"]["name"],
            json!({ "description": "Name to look up", "type": "string" })
        );
        assert!(schema["properties"]["limit"].is_object());
    }
}
