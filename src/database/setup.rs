use anyhow::{Context, Result};
use rusqlite::Connection;

const DATA_TABLES: [&str; 4] = ["match_players", "matches", "last_teams", "players"];

pub fn ensure_schema(conn: &Connection) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    log::debug!("Database schema ready");
    Ok(())
}

/// Removes every player, match and team snapshot. The schema stays.
pub fn clear_database(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    for table in DATA_TABLES {
        execute_sql(&tx, &format!("DELETE FROM {table}"))
            .with_context(|| format!("Failed to clear table {table}"))?;
    }
    tx.commit().context("Failed to commit database clear")?;

    log::info!("Database cleared");
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &Connection, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}
