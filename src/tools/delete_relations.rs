//! MCP `delete_relations` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::graph::types::Relation;

/// Parameters for the `delete_relations` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteRelationsParams {
    #[schemars(description = "An array of relations to delete")]
    pub relations: Vec<Relation>,
}
