//! MCP `create_entities` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::graph::types::Entity;

/// Parameters for the `create_entities` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateEntitiesParams {
    #[schemars(description = "An array of entities to create")]
    pub entities: Vec<Entity>,
}
