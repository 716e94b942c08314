use anyhow::{Context, Result};
use log::warn;
use rusqlite::{params, Connection};

use super::models::SnapshotEntry;
use super::players;
use crate::domain::{Team, TeamLabel};

/// Replaces the snapshot with the given pair. Callers wrap this in a
/// transaction together with whatever produced the teams.
pub fn save(conn: &Connection, team1: &Team, team2: &Team) -> Result<()> {
    clear(conn)?;

    for (label, team) in [(TeamLabel::Team1, team1), (TeamLabel::Team2, team2)] {
        for player in &team.players {
            conn.execute(
                "INSERT INTO last_teams (player_name, team, bonus) VALUES (?1, ?2, ?3)",
                params![player.name, label.as_str(), team.bonus],
            )
            .with_context(|| format!("Failed to save {} to the team snapshot", player.name))?;
        }
    }

    Ok(())
}

pub fn entries(conn: &Connection) -> Result<Vec<SnapshotEntry>> {
    let mut stmt =
        conn.prepare("SELECT player_name, team, bonus FROM last_teams ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|(player_name, team, bonus)| -> Result<SnapshotEntry> {
            Ok(SnapshotEntry {
                player_name,
                team: team.parse()?,
                bonus,
            })
        })
        .collect()
}

/// Rebuilds the last pair from current player records, or `None` when no
/// snapshot exists. Players removed since the snapshot was taken are skipped.
pub fn load(conn: &Connection) -> Result<Option<(Team, Team)>> {
    let entries = entries(conn)?;
    if entries.is_empty() {
        return Ok(None);
    }

    let mut team1 = Team::new(Vec::new());
    let mut team2 = Team::new(Vec::new());

    for entry in entries {
        let team = match entry.team {
            TeamLabel::Team1 => &mut team1,
            TeamLabel::Team2 => &mut team2,
        };
        team.bonus = entry.bonus;

        match players::find_by_name(conn, &entry.player_name)? {
            Some(record) => team.players.push(record.player),
            None => warn!(
                "Player '{}' from the last teams no longer exists, skipping",
                entry.player_name
            ),
        }
    }

    Ok(Some((team1, team2)))
}

pub fn clear(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM last_teams", [])
        .context("Failed to clear the team snapshot")
        .map(|_| ())
}
