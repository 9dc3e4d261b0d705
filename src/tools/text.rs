use crate::dom::extract_text_elements;
use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the extract_text_elements tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractTextParams {
    /// Minimum trimmed text length (overrides configuration)
    #[serde(default)]
    pub min_length: Option<usize>,

    /// Maximum trimmed text length (overrides configuration)
    #[serde(default)]
    pub max_length: Option<usize>,
}

/// Tool listing text-bearing elements with best-effort locators
#[derive(Default)]
pub struct ExtractTextTool;

impl Tool for ExtractTextTool {
    type Params = ExtractTextParams;

    fn name(&self) -> &str {
        "extract_text_elements"
    }

    fn execute_typed(
        &self,
        params: ExtractTextParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let mut options = context.options.clone();
        if let Some(min) = params.min_length {
            options.min_text_length = min;
        }
        if let Some(max) = params.max_length {
            options.max_text_length = max;
        }
        options.validate()?;

        let elements = extract_text_elements(context.document, &options);

        Ok(ToolResult::success_with(serde_json::json!({
            "count": elements.len(),
            "elements": elements
        })))
    }
}
