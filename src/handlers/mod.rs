//! Command handlers: open the store, call a service and print the outcome.

pub mod database;
pub mod player;
pub mod teams;

use anyhow::Result;

use crate::config::AppConfig;
use crate::database::{get_connection, open, DbConn, DbPool};

pub use database::handle_database;
pub use player::handle_player;
pub use teams::handle_teams;

/// Keeps the pool alive for as long as the connection is used.
struct Store {
    _pool: DbPool,
    conn: DbConn,
}

fn open_store(config: &AppConfig) -> Result<Store> {
    let pool = open(&config.database_path)?;
    let conn = get_connection(&pool)?;
    Ok(Store { _pool: pool, conn })
}
