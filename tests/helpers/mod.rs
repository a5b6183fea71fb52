#![allow(dead_code)]

use graphmem::db;
use graphmem::graph::types::{Entity, Relation};
use rusqlite::Connection;

/// Open a fresh in-memory database with schema and migrations applied.
pub fn test_db() -> Connection {
    db::open_memory_database().unwrap()
}

/// Build an entity descriptor from string slices.
pub fn entity(name: &str, entity_type: &str, observations: &[&str]) -> Entity {
    Entity {
        name: name.into(),
        entity_type: entity_type.into(),
        observations: observations.iter().map(|s| s.to_string()).collect(),
    }
}

/// Build a relation triple from string slices.
pub fn relation(from: &str, to: &str, relation_type: &str) -> Relation {
    Relation {
        from: from.into(),
        to: to.into(),
        relation_type: relation_type.into(),
    }
}

/// Names of all entities in a graph, in returned order.
pub fn entity_names(graph: &graphmem::graph::types::KnowledgeGraph) -> Vec<&str> {
    graph.entities.iter().map(|e| e.name.as_str()).collect()
}
