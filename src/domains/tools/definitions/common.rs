//! Helpers shared by all tool definitions.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Content, RawContent, Tool},
};
use schemars::JsonSchema;

/// Build a tool descriptor whose input schema is derived from `P`.
///
/// Required fields in the schema are exactly the non-optional fields of `P`.
pub fn describe<P: JsonSchema + 'static>(name: &'static str, description: &'static str) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: cached_schema_for_type::<P>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Create a success result with a single text block.
pub fn success_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Concatenated text of every text block in a result.
pub fn result_text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
