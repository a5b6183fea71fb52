use anyhow::Result;

use crate::config::GraphmemConfig;
use crate::graph::query;

/// Export the entire knowledge graph as JSON to stdout.
pub fn export(config: &GraphmemConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = crate::db::open_database(&db_path)?;

    let graph = query::read_graph(&conn)?;

    let json = serde_json::to_string_pretty(&graph)?;
    println!("{json}");

    eprintln!(
        "Exported {} entities and {} relations.",
        graph.entities.len(),
        graph.relations.len()
    );

    Ok(())
}
