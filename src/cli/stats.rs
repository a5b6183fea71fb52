use anyhow::Result;

use crate::config::GraphmemConfig;

/// Display knowledge-graph statistics in the terminal.
pub fn stats(config: &GraphmemConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = crate::db::open_database(&db_path)?;

    let entities: i64 = conn.query_row("SELECT COUNT(*) FROM entities", [], |r| r.get(0))?;
    let observations: i64 =
        conn.query_row("SELECT COUNT(*) FROM observations", [], |r| r.get(0))?;
    let relations: i64 = conn.query_row("SELECT COUNT(*) FROM relations", [], |r| r.get(0))?;

    let db_size_bytes = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

    println!("Knowledge Graph Statistics");
    println!("{}", "=".repeat(40));
    println!("  Entities:       {entities}");
    println!("  Observations:   {observations}");
    println!("  Relations:      {relations}");
    println!();

    println!("Entity types:");
    let mut stmt = conn.prepare(
        "SELECT entity_type, COUNT(*) FROM entities GROUP BY entity_type ORDER BY COUNT(*) DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;
    for row in rows {
        let (entity_type, count) = row?;
        println!("  {:<16} {}", entity_type, count);
    }
    println!();

    println!("Database size:    {db_size_bytes} bytes");

    Ok(())
}
