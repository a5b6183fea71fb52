//! MCP `search_nodes` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `search_nodes` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchNodesParams {
    #[schemars(
        description = "The search query to match against entity names, types, and observation content"
    )]
    pub query: String,
}
