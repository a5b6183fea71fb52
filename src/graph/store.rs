//! Write path — entity, observation, and relation creation.
//!
//! Each public function runs its whole batch inside one transaction: if any step
//! fails, the batch rolls back and no partial effects remain. Creates are
//! idempotent — existing names and existing `(from, to, relationType)` triples
//! are skipped silently, and observation contents already attached to an entity
//! are not inserted again.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;

use crate::graph::types::{AddedObservations, Entity, GraphError, ObservationAddition, Relation};

/// Create the entities that don't already exist, along with their initial
/// observations. Returns exactly the input descriptors for which a new entity
/// row was created; descriptors whose name is taken are skipped silently.
pub fn create_entities(conn: &mut Connection, entities: &[Entity]) -> Result<Vec<Entity>> {
    let tx = conn.transaction()?;
    let mut created = Vec::new();

    for entity in entities {
        if entity_id_by_name(&tx, &entity.name)?.is_some() {
            tracing::debug!(name = %entity.name, "entity already exists — skipping");
            continue;
        }

        let now = now();
        tx.execute(
            "INSERT INTO entities (name, entity_type, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?3)",
            params![entity.name, entity.entity_type, now],
        )?;
        let entity_id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO entities_fts(rowid, name) VALUES (?1, ?2)",
            params![entity_id, entity.name],
        )?;

        // Initial observations are inserted as-is, in input order. Contents are
        // not deduplicated within one descriptor — that is the caller's job.
        for content in &entity.observations {
            insert_observation(&tx, entity_id, content, &now)?;
        }

        created.push(entity.clone());
    }

    tx.commit()?;
    Ok(created)
}

/// Create the relations whose triple doesn't already exist. A relation whose
/// endpoint is unknown is skipped with a log line, not an error. Returns the
/// triples that were actually inserted.
pub fn create_relations(conn: &mut Connection, relations: &[Relation]) -> Result<Vec<Relation>> {
    let tx = conn.transaction()?;
    let mut created = Vec::new();

    for relation in relations {
        let from_id = entity_id_by_name(&tx, &relation.from)?;
        let to_id = entity_id_by_name(&tx, &relation.to)?;

        let (Some(from_id), Some(to_id)) = (from_id, to_id) else {
            tracing::warn!(
                from = %relation.from,
                to = %relation.to,
                "skipping relation: entity not found"
            );
            continue;
        };

        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM relations \
             WHERE from_entity_id = ?1 AND to_entity_id = ?2 AND relation_type = ?3)",
            params![from_id, to_id, relation.relation_type],
            |row| row.get(0),
        )?;
        if exists {
            continue;
        }

        tx.execute(
            "INSERT INTO relations (from_entity_id, to_entity_id, relation_type, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
            params![from_id, to_id, relation.relation_type, now()],
        )?;
        created.push(relation.clone());
    }

    tx.commit()?;
    Ok(created)
}

/// Add observations to existing entities. Contents already attached to the
/// entity are skipped; the result reports, per entity, only what was inserted.
///
/// Unlike the other operations, an unknown `entityName` fails the whole batch.
pub fn add_observations(
    conn: &mut Connection,
    additions: &[ObservationAddition],
) -> Result<Vec<AddedObservations>> {
    let tx = conn.transaction()?;
    let mut results = Vec::new();

    for addition in additions {
        let entity_id = entity_id_by_name(&tx, &addition.entity_name)?.ok_or_else(|| {
            GraphError::EntityNotFound {
                name: addition.entity_name.clone(),
            }
        })?;

        let mut existing: HashSet<String> = {
            let mut stmt =
                tx.prepare("SELECT content FROM observations WHERE entity_id = ?1")?;
            let existing = stmt
                .query_map(params![entity_id], |row| row.get(0))?
                .collect::<Result<_, _>>()?;
            existing
        };

        let now = now();
        let mut added = Vec::new();
        for content in &addition.contents {
            // Tracking inserts in the set keeps repeated contents within one
            // call from producing duplicate rows.
            if existing.insert(content.clone()) {
                insert_observation(&tx, entity_id, content, &now)?;
                added.push(content.clone());
            }
        }

        results.push(AddedObservations {
            entity_name: addition.entity_name.clone(),
            added_observations: added,
        });
    }

    tx.commit()?;
    Ok(results)
}

/// Insert one observation row and its FTS5 shadow row.
pub(crate) fn insert_observation(
    conn: &Connection,
    entity_id: i64,
    content: &str,
    now: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO observations (entity_id, content, created_at) VALUES (?1, ?2, ?3)",
        params![entity_id, content, now],
    )?;
    let rowid = conn.last_insert_rowid();
    conn.execute(
        "INSERT INTO observations_fts(rowid, content) VALUES (?1, ?2)",
        params![rowid, content],
    )?;
    Ok(())
}

/// Look up an entity id by name. Returns `None` if no such entity exists.
pub(crate) fn entity_id_by_name(conn: &Connection, name: &str) -> Result<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM entities WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

/// ISO 8601 timestamp for created_at / updated_at columns.
pub(crate) fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn entity(name: &str, entity_type: &str, observations: &[&str]) -> Entity {
        Entity {
            name: name.into(),
            entity_type: entity_type.into(),
            observations: observations.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn relation(from: &str, to: &str, relation_type: &str) -> Relation {
        Relation {
            from: from.into(),
            to: to.into(),
            relation_type: relation_type.into(),
        }
    }

    #[test]
    fn create_entities_returns_only_new_descriptors() {
        let mut conn = db::open_memory_database().unwrap();

        let first = create_entities(
            &mut conn,
            &[
                entity("Alice", "Person", &["likes tea"]),
                entity("Bob", "Person", &[]),
            ],
        )
        .unwrap();
        assert_eq!(first.len(), 2);

        // Second run creates nothing and returns nothing
        let second = create_entities(
            &mut conn,
            &[
                entity("Alice", "Person", &["likes tea"]),
                entity("Bob", "Person", &[]),
            ],
        )
        .unwrap();
        assert!(second.is_empty());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM entities", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn create_entities_partial_skip() {
        let mut conn = db::open_memory_database().unwrap();
        create_entities(&mut conn, &[entity("Alice", "Person", &[])]).unwrap();

        let created = create_entities(
            &mut conn,
            &[
                entity("Alice", "Robot", &[]),
                entity("Carol", "Person", &[]),
            ],
        )
        .unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "Carol");

        // The existing entity keeps its original type
        let entity_type: String = conn
            .query_row(
                "SELECT entity_type FROM entities WHERE name = 'Alice'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(entity_type, "Person");
    }

    #[test]
    fn create_relations_skips_missing_endpoints_and_duplicates() {
        let mut conn = db::open_memory_database().unwrap();
        create_entities(
            &mut conn,
            &[entity("Alice", "Person", &[]), entity("Bob", "Person", &[])],
        )
        .unwrap();

        let created =
            create_relations(&mut conn, &[relation("Alice", "Bob", "knows")]).unwrap();
        assert_eq!(created.len(), 1);

        // Duplicate triple — skipped
        let again = create_relations(&mut conn, &[relation("Alice", "Bob", "knows")]).unwrap();
        assert!(again.is_empty());

        // Unknown endpoint — skipped, no insert
        let ghost = create_relations(&mut conn, &[relation("Zed", "Bob", "knows")]).unwrap();
        assert!(ghost.is_empty());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM relations", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn create_relations_allows_self_edges_and_distinct_types() {
        let mut conn = db::open_memory_database().unwrap();
        create_entities(&mut conn, &[entity("Alice", "Person", &[])]).unwrap();

        let created = create_relations(
            &mut conn,
            &[
                relation("Alice", "Alice", "knows"),
                relation("Alice", "Alice", "trusts"),
            ],
        )
        .unwrap();
        assert_eq!(created.len(), 2);
    }

    #[test]
    fn add_observations_skips_existing_contents() {
        let mut conn = db::open_memory_database().unwrap();
        create_entities(&mut conn, &[entity("Alice", "Person", &["likes tea"])]).unwrap();

        let results = add_observations(
            &mut conn,
            &[ObservationAddition {
                entity_name: "Alice".into(),
                contents: vec!["likes tea".into(), "drinks coffee".into()],
            }],
        )
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entity_name, "Alice");
        assert_eq!(results[0].added_observations, vec!["drinks coffee"]);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM observations", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn add_observations_dedupes_within_one_call() {
        let mut conn = db::open_memory_database().unwrap();
        create_entities(&mut conn, &[entity("Alice", "Person", &[])]).unwrap();

        let results = add_observations(
            &mut conn,
            &[ObservationAddition {
                entity_name: "Alice".into(),
                contents: vec!["likes tea".into(), "likes tea".into()],
            }],
        )
        .unwrap();
        assert_eq!(results[0].added_observations, vec!["likes tea"]);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM observations", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn add_observations_unknown_entity_fails_whole_batch() {
        let mut conn = db::open_memory_database().unwrap();
        create_entities(&mut conn, &[entity("Alice", "Person", &[])]).unwrap();

        let result = add_observations(
            &mut conn,
            &[
                ObservationAddition {
                    entity_name: "Alice".into(),
                    contents: vec!["likes tea".into()],
                },
                ObservationAddition {
                    entity_name: "Ghost".into(),
                    contents: vec!["boo".into()],
                },
            ],
        );

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "entity with name Ghost not found");

        // Whole batch rolled back — Alice's observation is gone too
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM observations", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
