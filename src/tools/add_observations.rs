//! MCP `add_observations` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::graph::types::ObservationAddition;

/// Parameters for the `add_observations` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddObservationsParams {
    #[schemars(description = "An array of {entityName, contents} items to add")]
    pub observations: Vec<ObservationAddition>,
}
