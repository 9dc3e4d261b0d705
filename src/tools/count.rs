use crate::document::DocumentAdapter;
use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the count_matches tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CountMatchesParams {
    /// CSS locator to evaluate against the whole document
    pub locator: String,
}

/// Tool reporting how many elements a locator matches
#[derive(Default)]
pub struct CountMatchesTool;

impl Tool for CountMatchesTool {
    type Params = CountMatchesParams;

    fn name(&self) -> &str {
        "count_matches"
    }

    fn execute_typed(
        &self,
        params: CountMatchesParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let count = context.document.count_matches(&params.locator);

        Ok(ToolResult::success_with(serde_json::json!({
            "locator": params.locator,
            "count": count,
            "unique": count == 1
        })))
    }
}
