use schemars::JsonSchema;
use serde::Deserialize;

/// Log output format style. Maps to a format from tracing-subscriber.
#[derive(Debug, Default, Deserialize, JsonSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormatStyle {
    /// Human-readable, single-line logs
    #[default]
    Full,
    /// Shorter single-line logs
    Compact,
    /// Newline-delimited JSON
    Json,
    /// Multi-line logs with source locations
    Pretty,
}
