//! Core knowledge-graph type definitions.
//!
//! Defines [`Entity`] (a named node), [`Relation`] (a directed typed edge), and
//! [`KnowledgeGraph`] (a full dump), plus the per-operation record shapes for
//! observation batches. The camelCase JSON field names (`entityType`,
//! `relationType`, `entityName`, `addedObservations`, `from`, `to`) are part of
//! the wire contract and must not change.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named node in the knowledge graph, carrying a free-form type label and
/// its attached observations. Names are globally unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// The name of the entity
    #[schemars(description = "The name of the entity")]
    pub name: String,
    /// The type of the entity
    #[schemars(description = "The type of the entity")]
    pub entity_type: String,
    /// Observation contents associated with the entity, in insertion order.
    #[schemars(description = "An array of observation contents associated with the entity")]
    pub observations: Vec<String>,
}

/// A directed typed edge between two entities, identified by name.
/// The `(from, to, relationType)` triple is unique; self-edges are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    /// The name of the entity where the relation starts
    #[schemars(description = "The name of the entity where the relation starts")]
    pub from: String,
    /// The name of the entity where the relation ends
    #[schemars(description = "The name of the entity where the relation ends")]
    pub to: String,
    /// The type of the relation
    #[schemars(description = "The type of the relation")]
    pub relation_type: String,
}

/// A full or filtered graph dump: entities sorted by name, relations sorted by
/// from-name then to-name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
}

impl KnowledgeGraph {
    pub fn empty() -> Self {
        Self {
            entities: Vec::new(),
            relations: Vec::new(),
        }
    }
}

/// One item of an `add_observations` batch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObservationAddition {
    #[schemars(description = "The name of the entity to add the observations to")]
    pub entity_name: String,
    #[schemars(description = "An array of observation contents to add")]
    pub contents: Vec<String>,
}

/// Per-entity result of an `add_observations` batch: only the contents that
/// were actually inserted (duplicates are skipped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedObservations {
    pub entity_name: String,
    pub added_observations: Vec<String>,
}

/// One item of a `delete_observations` batch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObservationDeletion {
    #[schemars(description = "The name of the entity containing the observations")]
    pub entity_name: String,
    #[schemars(description = "An array of observations to delete")]
    pub observations: Vec<String>,
}

/// Errors with contractual messages surfaced to the MCP client.
#[derive(Debug, Error)]
pub enum GraphError {
    /// `add_observations` referenced an entity that does not exist.
    #[error("entity with name {name} not found")]
    EntityNotFound { name: String },
}
