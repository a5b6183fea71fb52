//! Read path — full dumps, search, and targeted opens.
//!
//! All three operations return a [`KnowledgeGraph`] with entities sorted by
//! name (observations in insertion order) and relations sorted by from-name
//! then to-name. `search_nodes` and `open_nodes` only return relations whose
//! both endpoints are in the returned entity set.

use anyhow::Result;
use rusqlite::{params, params_from_iter, Connection};

use crate::graph::types::{Entity, KnowledgeGraph, Relation};

/// Return the entire graph: every entity with its observations, every relation.
pub fn read_graph(conn: &Connection) -> Result<KnowledgeGraph> {
    let rows = select_entity_rows(
        conn,
        "SELECT id, name, entity_type FROM entities ORDER BY name",
        params![],
    )?;
    let entities = hydrate_observations(conn, rows)?;

    let mut stmt = conn.prepare(
        "SELECT ef.name, et.name, r.relation_type \
         FROM relations r \
         JOIN entities ef ON r.from_entity_id = ef.id \
         JOIN entities et ON r.to_entity_id = et.id \
         ORDER BY ef.name, et.name",
    )?;
    let relations = stmt
        .query_map([], |row| {
            Ok(Relation {
                from: row.get(0)?,
                to: row.get(1)?,
                relation_type: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(KnowledgeGraph {
        entities,
        relations,
    })
}

/// Search for entities matching the query, by case-insensitive substring over
/// names and type labels, or by stemmed full-text match over names and
/// observation contents. Matched entities carry *all* their observations;
/// relations are restricted to edges between matched entities.
pub fn search_nodes(conn: &Connection, query: &str) -> Result<KnowledgeGraph> {
    let pattern = like_pattern(query);
    let fts = fts_match_query(query);

    let rows = match &fts {
        Some(fts) => select_entity_rows(
            conn,
            r#"SELECT id, name, entity_type FROM entities e
               WHERE e.name LIKE ?1 ESCAPE '\'
                  OR e.entity_type LIKE ?1 ESCAPE '\'
                  OR e.id IN (SELECT rowid FROM entities_fts WHERE entities_fts MATCH ?2)
                  OR EXISTS (
                    SELECT 1 FROM observations o
                    WHERE o.entity_id = e.id
                      AND (o.content LIKE ?1 ESCAPE '\'
                           OR o.id IN (SELECT rowid FROM observations_fts
                                       WHERE observations_fts MATCH ?2))
                  )
               ORDER BY e.name"#,
            params![pattern, fts],
        )?,
        // Query with no indexable tokens — substring clauses only
        None => select_entity_rows(
            conn,
            r#"SELECT id, name, entity_type FROM entities e
               WHERE e.name LIKE ?1 ESCAPE '\'
                  OR e.entity_type LIKE ?1 ESCAPE '\'
                  OR EXISTS (
                    SELECT 1 FROM observations o
                    WHERE o.entity_id = e.id AND o.content LIKE ?1 ESCAPE '\'
                  )
               ORDER BY e.name"#,
            params![pattern],
        )?,
    };

    graph_from_rows(conn, rows)
}

/// Return the existing entities among `names` plus the relations closed over
/// that subset. Duplicates and unknown names are ignored; empty input returns
/// an empty graph.
pub fn open_nodes(conn: &Connection, names: &[String]) -> Result<KnowledgeGraph> {
    if names.is_empty() {
        return Ok(KnowledgeGraph::empty());
    }

    let placeholders = vec!["?"; names.len()].join(", ");
    let sql = format!(
        "SELECT id, name, entity_type FROM entities \
         WHERE name IN ({placeholders}) ORDER BY name"
    );
    let rows = select_entity_rows(conn, &sql, params_from_iter(names.iter()))?;

    graph_from_rows(conn, rows)
}

/// (id, name, entity_type) rows for a set of matched entities.
type EntityRows = Vec<(i64, String, String)>;

fn select_entity_rows<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<EntityRows> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Attach observations to each entity row, then the relations between them.
fn graph_from_rows(conn: &Connection, rows: EntityRows) -> Result<KnowledgeGraph> {
    let ids: Vec<i64> = rows.iter().map(|(id, _, _)| *id).collect();
    let entities = hydrate_observations(conn, rows)?;
    let relations = relations_between(conn, &ids)?;
    Ok(KnowledgeGraph {
        entities,
        relations,
    })
}

/// Load each entity's observations in insertion order.
fn hydrate_observations(conn: &Connection, rows: EntityRows) -> Result<Vec<Entity>> {
    let mut stmt = conn.prepare(
        "SELECT content FROM observations WHERE entity_id = ?1 ORDER BY created_at, id",
    )?;

    let mut entities = Vec::with_capacity(rows.len());
    for (id, name, entity_type) in rows {
        let observations = stmt
            .query_map(params![id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        entities.push(Entity {
            name,
            entity_type,
            observations,
        });
    }
    Ok(entities)
}

/// Relations whose both endpoints lie in `ids`, sorted by from-name then to-name.
fn relations_between(conn: &Connection, ids: &[i64]) -> Result<Vec<Relation>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT ef.name, et.name, r.relation_type \
         FROM relations r \
         JOIN entities ef ON r.from_entity_id = ef.id \
         JOIN entities et ON r.to_entity_id = et.id \
         WHERE r.from_entity_id IN ({placeholders}) \
           AND r.to_entity_id IN ({placeholders}) \
         ORDER BY ef.name, et.name"
    );

    let mut stmt = conn.prepare(&sql)?;
    let relations = stmt
        .query_map(params_from_iter(ids.iter().chain(ids.iter())), |row| {
            Ok(Relation {
                from: row.get(0)?,
                to: row.get(1)?,
                relation_type: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(relations)
}

/// Escape `%`, `_`, and `\` so the query matches literally, then wrap in `%`
/// wildcards for a contains match. SQLite LIKE is case-insensitive for ASCII.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("%{escaped}%")
}

/// Build an FTS5 match expression from the query's alphanumeric tokens, each
/// quoted so FTS5 syntax in user input is inert. Returns `None` when the query
/// has no indexable tokens.
fn fts_match_query(query: &str) -> Option<String> {
    let tokens: Vec<String> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| format!("\"{t}\""))
        .collect();
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}
