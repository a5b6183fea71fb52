//! MCP `open_nodes` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `open_nodes` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct OpenNodesParams {
    #[schemars(description = "An array of entity names to retrieve")]
    pub names: Vec<String>,
}
