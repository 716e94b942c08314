use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;

use super::setup;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

pub fn create_pool(database_path: &str) -> Result<DbPool> {
    let manager = build_manager(database_path);
    build_pool(manager, None)
}

/// Single-connection pool over a private in-memory database.
pub fn create_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory().with_init(enable_foreign_keys);
    build_pool(manager, Some(1))
}

/// Pool with the schema in place, ready for use.
pub fn open(database_path: &str) -> Result<DbPool> {
    let pool = create_pool(database_path)?;
    let conn = get_connection(&pool)?;
    setup::ensure_schema(&conn)?;
    Ok(pool)
}

pub fn open_in_memory() -> Result<DbPool> {
    let pool = create_memory_pool()?;
    let conn = get_connection(&pool)?;
    setup::ensure_schema(&conn)?;
    Ok(pool)
}

fn build_manager(path: &str) -> SqliteConnectionManager {
    SqliteConnectionManager::file(path).with_init(enable_foreign_keys)
}

fn enable_foreign_keys(conn: &mut rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
}

fn build_pool(manager: SqliteConnectionManager, max_size: Option<u32>) -> Result<DbPool> {
    let mut builder = r2d2::Pool::builder();
    if let Some(size) = max_size {
        builder = builder.max_size(size);
    }
    builder
        .build(manager)
        .context("Failed to create database connection pool")
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .context("Failed to get database connection from pool")
}
