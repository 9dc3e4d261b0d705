use crate::document::DocumentAdapter;
use crate::dom::position::compute_position;
use crate::dom::strategies_for;
use crate::dom::strategy::{primary_locator, unique_locator};
use crate::error::{ForgeError, Result};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the strategies tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StrategiesParams {
    /// Locator that must match exactly one element
    pub locator: String,
}

/// Tool ranking every locator strategy for a single element
#[derive(Default)]
pub struct StrategiesTool;

impl Tool for StrategiesTool {
    type Params = StrategiesParams;

    fn name(&self) -> &str {
        "strategies"
    }

    fn execute_typed(
        &self,
        params: StrategiesParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let document = context.document;
        let matches = document.select(&params.locator);

        let [node] = matches[..] else {
            return Err(ForgeError::LocatorNotUnique {
                locator: params.locator,
                count: matches.len(),
            });
        };

        let strategies = strategies_for(document, node);
        if strategies.is_empty() {
            return Err(ForgeError::ToolExecutionFailed {
                tool: self.name().to_string(),
                reason: format!("no stamped token on the element matched by '{}'", params.locator),
            });
        }
        let tag = document.node(node).map(|n| n.tag_name.as_str()).unwrap_or("");

        Ok(ToolResult::success_with(serde_json::json!({
            "locator": params.locator,
            "tag": tag,
            "id": document.token(node),
            "position": compute_position(document, node),
            "selector": primary_locator(&strategies),
            "unique_locator": unique_locator(&strategies),
            "strategies": strategies
        })))
    }
}
