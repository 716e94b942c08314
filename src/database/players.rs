use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{Attribute, AttributeSet, Player, PlayerRecord};
use crate::errors::RosterError;

const PLAYER_COLUMNS: &str =
    "id, name, shooting, dribbling, passing, tackling, fitness, goalkeeping, form";

/// Fails with `DuplicatePlayer` when the name is taken; the existing row is
/// left as it was.
pub fn insert_player(conn: &Connection, player: &Player) -> Result<PlayerRecord> {
    if find_by_name(conn, &player.name)?.is_some() {
        return Err(RosterError::DuplicatePlayer(player.name.clone()).into());
    }

    let sql = format!(
        "INSERT INTO players (name, shooting, dribbling, passing, tackling, fitness, goalkeeping, form) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING {PLAYER_COLUMNS}"
    );
    let [shooting, dribbling, passing, tackling, fitness, goalkeeping] = player.attributes.scores();

    conn.query_row(
        &sql,
        params![
            player.name,
            shooting,
            dribbling,
            passing,
            tackling,
            fitness,
            goalkeeping,
            player.form
        ],
        parse_player_row,
    )
    .context("Failed to insert new player")
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<PlayerRecord> {
    let scores = [
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ];

    Ok(PlayerRecord {
        id: row.get(0)?,
        player: Player::with_form(
            row.get::<_, String>(1)?,
            AttributeSet::from_stored(scores),
            row.get(8)?,
        ),
    })
}

pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<PlayerRecord>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE name = ?1");

    conn.query_row(&sql, params![name], parse_player_row)
        .optional()
        .context("Failed to query player by name")
}

/// Like `find_by_name`, but a missing player is a `NotFound` error.
pub fn get_by_name(conn: &Connection, name: &str) -> Result<PlayerRecord> {
    find_by_name(conn, name)?.ok_or_else(|| RosterError::not_found(name).into())
}

pub fn list_all(conn: &Connection) -> Result<Vec<PlayerRecord>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn delete_by_name(conn: &Connection, name: &str) -> Result<()> {
    let deleted = conn
        .execute("DELETE FROM players WHERE name = ?1", params![name])
        .context("Failed to delete player")?;
    ensure_found(deleted, name)
}

pub fn update_form(conn: &Connection, name: &str, form: i32) -> Result<()> {
    let updated = conn
        .execute(
            "UPDATE players SET form = ?1 WHERE name = ?2",
            params![form, name],
        )
        .context("Failed to update player form")?;
    ensure_found(updated, name)
}

pub fn update_attribute(
    conn: &Connection,
    name: &str,
    attribute: Attribute,
    value: f64,
) -> Result<()> {
    // Column names come from the closed `Attribute` set, never from input.
    let sql = format!(
        "UPDATE players SET {} = ?1 WHERE name = ?2",
        attribute.as_str()
    );
    let updated = conn
        .execute(&sql, params![value, name])
        .with_context(|| format!("Failed to update {attribute}"))?;
    ensure_found(updated, name)
}

fn ensure_found(affected: usize, name: &str) -> Result<()> {
    if affected == 0 {
        return Err(RosterError::not_found(name).into());
    }
    Ok(())
}
