//! MCP `create_relations` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::graph::types::Relation;

/// Parameters for the `create_relations` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateRelationsParams {
    #[schemars(description = "An array of relations to create")]
    pub relations: Vec<Relation>,
}
