use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use super::models::{MatchParticipant, MatchRecord};
use crate::domain::TeamLabel;

pub fn record(
    conn: &Connection,
    winner: TeamLabel,
    played_at: NaiveDateTime,
    participants: &[MatchParticipant],
) -> Result<MatchRecord> {
    let id: i64 = conn
        .query_row(
            "INSERT INTO matches (winner, played_at) VALUES (?1, ?2) RETURNING id",
            params![winner.as_str(), played_at],
            |row| row.get(0),
        )
        .context("Failed to insert match")?;

    for participant in participants {
        conn.execute(
            "INSERT INTO match_players (match_id, player_name, team, form_before, form_after) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id,
                participant.player_name,
                participant.team.as_str(),
                participant.form_before,
                participant.form_after
            ],
        )
        .with_context(|| format!("Failed to record {} in match {}", participant.player_name, id))?;
    }

    Ok(MatchRecord {
        id,
        winner,
        played_at,
    })
}

pub fn list_all(conn: &Connection) -> Result<Vec<MatchRecord>> {
    let mut stmt = conn.prepare("SELECT id, winner, played_at FROM matches ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, NaiveDateTime>(2)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|(id, winner, played_at)| -> Result<MatchRecord> {
            Ok(MatchRecord {
                id,
                winner: winner.parse()?,
                played_at,
            })
        })
        .collect()
}

pub fn participants(conn: &Connection, match_id: i64) -> Result<Vec<MatchParticipant>> {
    let mut stmt = conn.prepare(
        "SELECT player_name, team, form_before, form_after FROM match_players WHERE match_id = ?1 ORDER BY team, player_name",
    )?;
    let rows = stmt
        .query_map(params![match_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i32>(2)?,
                row.get::<_, i32>(3)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|(player_name, team, form_before, form_after)| -> Result<MatchParticipant> {
            Ok(MatchParticipant {
                player_name,
                team: team.parse()?,
                form_before,
                form_after,
            })
        })
        .collect()
}
