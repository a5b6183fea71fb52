//! MCP `delete_observations` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::graph::types::ObservationDeletion;

/// Parameters for the `delete_observations` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteObservationsParams {
    #[schemars(description = "An array of {entityName, observations} items to delete")]
    pub deletions: Vec<ObservationDeletion>,
}
