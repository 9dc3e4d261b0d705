//! Extraction tools
//!
//! Each tool takes typed, schema-described parameters and runs against one
//! parsed document. The [`ToolRegistry`] dispatches JSON parameters by name,
//! which is how the CLI drives everything.

pub mod count;
pub mod hierarchy;
pub mod strategies;
pub mod text;

pub use count::{CountMatchesParams, CountMatchesTool};
pub use hierarchy::{ExtractHierarchyParams, ExtractHierarchyTool};
pub use strategies::{StrategiesParams, StrategiesTool};
pub use text::{ExtractTextParams, ExtractTextTool};

use crate::document::HtmlDocument;
use crate::dom::ExtractOptions;
use crate::error::{ForgeError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State shared by tools during one request
pub struct ToolContext<'a> {
    pub document: &'a HtmlDocument,
    pub options: &'a ExtractOptions,
}

impl<'a> ToolContext<'a> {
    pub fn new(document: &'a HtmlDocument, options: &'a ExtractOptions) -> Self {
        Self { document, options }
    }
}

/// Outcome of a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success_with(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// A named operation over a parsed document
pub trait Tool {
    type Params: DeserializeOwned + JsonSchema;

    fn name(&self) -> &str;

    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;

    /// JSON schema of the parameters
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or(Value::Null)
    }

    /// Deserialize JSON parameters and execute
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let typed = serde_json::from_value(params).map_err(|e| ForgeError::InvalidParams {
            tool: self.name().to_string(),
            reason: e.to_string(),
        })?;
        self.execute_typed(typed, context)
    }
}

/// Object-safe view of [`Tool`] used by the registry
trait DynTool {
    fn parameters_schema(&self) -> Value;
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool> DynTool for T {
    fn parameters_schema(&self) -> Value {
        Tool::parameters_schema(self)
    }

    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        Tool::execute(self, params, context)
    }
}

/// Registry of tools, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ExtractHierarchyTool);
        registry.register(ExtractTextTool);
        registry.register(CountMatchesTool);
        registry.register(StrategiesTool);
        registry
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(Tool::name(&tool).to_string(), Box::new(tool));
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Parameter schemas keyed by tool name
    pub fn schemas(&self) -> Value {
        let schemas: serde_json::Map<String, Value> = self
            .tools
            .iter()
            .map(|(name, tool)| (name.clone(), tool.parameters_schema()))
            .collect();
        Value::Object(schemas)
    }

    /// Execute a tool by name with JSON parameters
    pub fn execute(
        &self,
        name: &str,
        params: Value,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ForgeError::ToolNotFound(name.to_string()))?;
        log::debug!("Executing tool '{}'", name);
        tool.execute(params, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_defaults() {
        let registry = ToolRegistry::with_defaults();
        assert_eq!(registry.len(), 4);
        assert!(registry.has("extract_hierarchy"));
        assert!(registry.has("extract_text_elements"));
        assert!(registry.has("count_matches"));
        assert!(registry.has("strategies"));
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["extract_hierarchy", "extract_text_elements", "count_matches", "strategies"]
        );
    }

    #[test]
    fn test_registry_schemas() {
        let schemas = ToolRegistry::with_defaults().schemas();
        assert!(schemas["count_matches"].is_object());
        assert!(schemas["extract_hierarchy"].is_object());
    }

    #[test]
    fn test_unknown_tool() {
        let doc = HtmlDocument::parse("<p>x</p>");
        let options = ExtractOptions::default();
        let mut context = ToolContext::new(&doc, &options);

        let result = ToolRegistry::with_defaults().execute("click", json!({}), &mut context);
        assert!(matches!(result, Err(ForgeError::ToolNotFound(name)) if name == "click"));
    }

    #[test]
    fn test_invalid_params() {
        let doc = HtmlDocument::parse("<p>x</p>");
        let options = ExtractOptions::default();
        let mut context = ToolContext::new(&doc, &options);

        let result = ToolRegistry::with_defaults().execute(
            "count_matches",
            json!({"selector": 1}),
            &mut context,
        );
        assert!(matches!(result, Err(ForgeError::InvalidParams { .. })));
    }

    #[test]
    fn test_tool_result_success() {
        let ok = ToolResult::success_with(json!({"count": 1}));
        assert!(ok.success);
        assert_eq!(ok.data, Some(json!({"count": 1})));

        let encoded = serde_json::to_value(&ok).unwrap();
        assert!(encoded.get("error").is_none());
    }
}
