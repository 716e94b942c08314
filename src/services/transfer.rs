use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::config::AppConfig;
use crate::database::{players, setup};
use crate::domain::{AttributeSet, Player};
use crate::errors::RosterError;
use crate::services::roster::{validate_name, RosterService};

/// One exported player. Field order is the file's column order.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: i64,
    name: &'a str,
    shooting: f64,
    dribbling: f64,
    passing: f64,
    tackling: f64,
    fitness: f64,
    goalkeeping: f64,
    form: i32,
}

/// Imported cells stay text until validated so a bad number is reported as
/// a validation error on its row. The `id` column is not read.
#[derive(Debug, Deserialize)]
struct ImportRow {
    name: String,
    shooting: String,
    dribbling: String,
    passing: String,
    tackling: String,
    fitness: String,
    goalkeeping: String,
    form: String,
}

pub struct TransferService {
    config: AppConfig,
    roster: RosterService,
}

impl TransferService {
    pub fn new(config: AppConfig) -> Self {
        let roster = RosterService::new(config.clone());
        Self { config, roster }
    }

    /// Writes every player as CSV with header
    /// `id,name,shooting,dribbling,passing,tackling,fitness,goalkeeping,form`.
    pub fn export<P: AsRef<Path>>(&self, conn: &Connection, path: P) -> Result<usize> {
        let path = path.as_ref();
        let records = players::list_all(conn)?;

        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        for record in &records {
            let [shooting, dribbling, passing, tackling, fitness, goalkeeping] =
                record.player.attributes.scores();
            writer.serialize(ExportRow {
                id: record.id,
                name: &record.player.name,
                shooting,
                dribbling,
                passing,
                tackling,
                fitness,
                goalkeeping,
                form: record.player.form,
            })?;
        }
        writer.flush().context("Failed to flush CSV export")?;

        info!("Exported {} players to {}", records.len(), path.display());
        Ok(records.len())
    }

    /// Reads players from CSV. The `id` column is ignored. Every row is
    /// validated first; the rows are then inserted in one transaction, so a
    /// bad row means nothing is imported.
    pub fn import<P: AsRef<Path>>(&self, conn: &mut Connection, path: P) -> Result<usize> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let mut incoming = Vec::new();
        let mut seen = HashSet::new();
        for (idx, row) in reader.deserialize::<ImportRow>().enumerate() {
            let line = idx + 2;
            let row = row.with_context(|| format!("Failed to read CSV row {line}"))?;
            let player = self.validate_row(&row).map_err(|e| on_row(line, e))?;

            if !seen.insert(player.name.clone()) {
                return Err(on_row(line, RosterError::DuplicatePlayer(player.name)).into());
            }
            incoming.push(player);
        }

        let tx = conn.transaction()?;
        for player in &incoming {
            players::insert_player(&tx, player)?;
        }
        tx.commit().context("Failed to commit CSV import")?;

        info!("Imported {} players from {}", incoming.len(), path.display());
        Ok(incoming.len())
    }

    pub fn clear(&self, conn: &mut Connection) -> Result<()> {
        setup::clear_database(conn)
    }

    fn validate_row(&self, row: &ImportRow) -> Result<Player, RosterError> {
        let name = validate_name(&row.name)?;
        let attributes = AttributeSet::parse(
            [
                &row.shooting,
                &row.dribbling,
                &row.passing,
                &row.tackling,
                &row.fitness,
                &row.goalkeeping,
            ],
            &self.config.attributes,
        )?;
        let form = self.roster.parse_form(&row.form)?;
        Ok(Player::with_form(name, attributes, form))
    }
}

fn on_row(line: usize, err: RosterError) -> RosterError {
    match err {
        RosterError::Validation(message) => {
            RosterError::validation(format!("Line {line}: {message}"))
        }
        other => other,
    }
}
