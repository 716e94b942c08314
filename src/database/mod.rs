pub mod connection;
pub mod last_teams;
pub mod matches;
pub mod models;
pub mod players;
pub mod setup;

pub use connection::{create_pool, get_connection, open, open_in_memory, DbConn, DbPool};
pub use models::*;
