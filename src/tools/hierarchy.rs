use crate::dom::extract_hierarchy;
use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the extract_hierarchy tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractHierarchyParams {
    /// Include the pre-order flat list (default: true)
    #[serde(default = "default_include_flat")]
    pub include_flat: bool,

    /// Override the configured depth cap
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_include_flat() -> bool {
    true
}

/// Tool producing the annotated element tree, flat list and stats
#[derive(Default)]
pub struct ExtractHierarchyTool;

impl Tool for ExtractHierarchyTool {
    type Params = ExtractHierarchyParams;

    fn name(&self) -> &str {
        "extract_hierarchy"
    }

    fn execute_typed(
        &self,
        params: ExtractHierarchyParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let mut options = context.options.clone();
        if let Some(depth) = params.max_depth {
            options.max_depth = depth;
        }
        options.validate()?;

        let extraction = extract_hierarchy(context.document, &options);
        if extraction.is_empty() {
            log::debug!("Document yielded no retained elements");
        }

        let mut data = serde_json::json!({
            "tree": extraction.tree,
            "stats": extraction.stats,
        });
        if params.include_flat {
            data["flat"] = serde_json::to_value(extraction.flat_view())?;
        }

        Ok(ToolResult::success_with(data))
    }
}
