//! MCP `delete_entities` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `delete_entities` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEntitiesParams {
    #[schemars(description = "An array of entity names to delete")]
    pub entity_names: Vec<String>,
}
