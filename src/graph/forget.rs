//! Delete path — entities (with cascade), observations, and relations.
//!
//! Entity deletion relies on the `ON DELETE CASCADE` foreign keys to remove the
//! entity's observations and every relation touching it; the FTS5 shadow rows
//! are removed in the same transaction. Unknown names, contents, and endpoints
//! are no-ops, never errors.

use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

use super::store::entity_id_by_name;
use crate::graph::types::{ObservationDeletion, Relation};

/// Delete entities by name. Cascades to their observations and to every
/// relation where they appear as an endpoint. Missing names are no-ops.
pub fn delete_entities(conn: &mut Connection, entity_names: &[String]) -> Result<()> {
    let tx = conn.transaction()?;

    for name in entity_names {
        let Some(entity_id) = entity_id_by_name(&tx, name)? else {
            continue;
        };

        // FTS5 external-content tables need explicit 'delete' rows with the old
        // values; the FK cascade only removes the base rows.
        tx.execute(
            "INSERT INTO entities_fts(entities_fts, rowid, name) VALUES ('delete', ?1, ?2)",
            params![entity_id, name],
        )?;
        delete_observation_fts_for_entity(&tx, entity_id)?;

        tx.execute("DELETE FROM entities WHERE id = ?1", params![entity_id])?;
        tracing::debug!(name = %name, "entity deleted");
    }

    tx.commit()?;
    Ok(())
}

/// Delete specific observations by exact content. A missing entity or a
/// content that isn't attached is a no-op.
pub fn delete_observations(conn: &mut Connection, deletions: &[ObservationDeletion]) -> Result<()> {
    let tx = conn.transaction()?;

    for deletion in deletions {
        let Some(entity_id) = entity_id_by_name(&tx, &deletion.entity_name)? else {
            continue;
        };

        for content in &deletion.observations {
            let ids: Vec<i64> = {
                let mut stmt = tx.prepare(
                    "SELECT id FROM observations WHERE entity_id = ?1 AND content = ?2",
                )?;
                let ids = stmt
                    .query_map(params![entity_id, content], |row| row.get(0))?
                    .collect::<Result<_, _>>()?;
                ids
            };

            for id in ids {
                tx.execute(
                    "INSERT INTO observations_fts(observations_fts, rowid, content) \
                     VALUES ('delete', ?1, ?2)",
                    params![id, content],
                )?;
                tx.execute("DELETE FROM observations WHERE id = ?1", params![id])?;
            }
        }
    }

    tx.commit()?;
    Ok(())
}

/// Delete relations by their `(from, to, relationType)` triple. Missing
/// endpoints or triples are no-ops.
pub fn delete_relations(conn: &mut Connection, relations: &[Relation]) -> Result<()> {
    let tx = conn.transaction()?;

    for relation in relations {
        let from_id = entity_id_by_name(&tx, &relation.from)?;
        let to_id = entity_id_by_name(&tx, &relation.to)?;

        let (Some(from_id), Some(to_id)) = (from_id, to_id) else {
            continue;
        };

        tx.execute(
            "DELETE FROM relations \
             WHERE from_entity_id = ?1 AND to_entity_id = ?2 AND relation_type = ?3",
            params![from_id, to_id, relation.relation_type],
        )?;
    }

    tx.commit()?;
    Ok(())
}

/// Emit FTS5 'delete' rows for every observation owned by an entity, ahead of
/// the cascade removing the base rows.
fn delete_observation_fts_for_entity(tx: &Transaction, entity_id: i64) -> Result<()> {
    let rows: Vec<(i64, String)> = {
        let mut stmt =
            tx.prepare("SELECT id, content FROM observations WHERE entity_id = ?1")?;
        let rows = stmt
            .query_map(params![entity_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<_, _>>()?;
        rows
    };

    for (id, content) in rows {
        tx.execute(
            "INSERT INTO observations_fts(observations_fts, rowid, content) \
             VALUES ('delete', ?1, ?2)",
            params![id, content],
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::graph::store::{create_entities, create_relations};
    use crate::graph::types::Entity;

    fn seed(conn: &mut Connection) {
        create_entities(
            conn,
            &[
                Entity {
                    name: "Alice".into(),
                    entity_type: "Person".into(),
                    observations: vec!["likes tea".into(), "drinks coffee".into()],
                },
                Entity {
                    name: "Bob".into(),
                    entity_type: "Person".into(),
                    observations: vec![],
                },
            ],
        )
        .unwrap();
        create_relations(
            conn,
            &[Relation {
                from: "Alice".into(),
                to: "Bob".into(),
                relation_type: "knows".into(),
            }],
        )
        .unwrap();
    }

    #[test]
    fn delete_entities_cascades_to_observations_and_relations() {
        let mut conn = db::open_memory_database().unwrap();
        seed(&mut conn);

        delete_entities(&mut conn, &["Alice".to_string()]).unwrap();

        let entities: i64 = conn
            .query_row("SELECT COUNT(*) FROM entities", [], |r| r.get(0))
            .unwrap();
        let observations: i64 = conn
            .query_row("SELECT COUNT(*) FROM observations", [], |r| r.get(0))
            .unwrap();
        let relations: i64 = conn
            .query_row("SELECT COUNT(*) FROM relations", [], |r| r.get(0))
            .unwrap();

        assert_eq!(entities, 1); // Bob remains
        assert_eq!(observations, 0);
        assert_eq!(relations, 0);
    }

    #[test]
    fn delete_entities_missing_name_is_noop() {
        let mut conn = db::open_memory_database().unwrap();
        seed(&mut conn);

        delete_entities(&mut conn, &["Ghost".to_string()]).unwrap();

        let entities: i64 = conn
            .query_row("SELECT COUNT(*) FROM entities", [], |r| r.get(0))
            .unwrap();
        assert_eq!(entities, 2);
    }

    #[test]
    fn delete_observations_removes_exact_content_only() {
        let mut conn = db::open_memory_database().unwrap();
        seed(&mut conn);

        delete_observations(
            &mut conn,
            &[ObservationDeletion {
                entity_name: "Alice".into(),
                observations: vec!["likes tea".into(), "never existed".into()],
            }],
        )
        .unwrap();

        let contents: Vec<String> = conn
            .prepare("SELECT content FROM observations ORDER BY id")
            .unwrap()
            .query_map([], |r| r.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(contents, vec!["drinks coffee"]);
    }

    #[test]
    fn delete_observations_missing_entity_is_noop() {
        let mut conn = db::open_memory_database().unwrap();
        seed(&mut conn);

        delete_observations(
            &mut conn,
            &[ObservationDeletion {
                entity_name: "Ghost".into(),
                observations: vec!["likes tea".into()],
            }],
        )
        .unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM observations", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn delete_relations_removes_matching_triple() {
        let mut conn = db::open_memory_database().unwrap();
        seed(&mut conn);

        // Wrong type — no-op
        delete_relations(
            &mut conn,
            &[Relation {
                from: "Alice".into(),
                to: "Bob".into(),
                relation_type: "hates".into(),
            }],
        )
        .unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM relations", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);

        delete_relations(
            &mut conn,
            &[Relation {
                from: "Alice".into(),
                to: "Bob".into(),
                relation_type: "knows".into(),
            }],
        )
        .unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM relations", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn delete_relations_missing_endpoint_is_noop() {
        let mut conn = db::open_memory_database().unwrap();
        seed(&mut conn);

        delete_relations(
            &mut conn,
            &[Relation {
                from: "Ghost".into(),
                to: "Bob".into(),
                relation_type: "knows".into(),
            }],
        )
        .unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM relations", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
