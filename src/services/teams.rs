use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use rusqlite::{Connection, TransactionBehavior};
use std::collections::HashSet;

use crate::balancing;
use crate::config::AppConfig;
use crate::database::{last_teams, matches, players, MatchParticipant, MatchRecord};
use crate::domain::{Attribute, Player, Team, TeamLabel};
use crate::errors::RosterError;
use crate::rating::{FormTracker, RatingModel};

/// A recorded match together with the form changes it caused.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub record: MatchRecord,
    pub participants: Vec<MatchParticipant>,
}

pub struct TeamService {
    config: AppConfig,
    model: RatingModel,
    tracker: FormTracker,
}

impl TeamService {
    pub fn new(config: AppConfig) -> Self {
        let model = RatingModel::new(&config.rating);
        let tracker = FormTracker::new(&config.rating);
        Self {
            config,
            model,
            tracker,
        }
    }

    pub fn model(&self) -> &RatingModel {
        &self.model
    }

    /// Builds two balanced teams from the named players and stores them as
    /// the last teams, replacing any earlier pair.
    ///
    /// Team 1 gets `team1_size` players, or the larger half when not given.
    pub fn create_teams(
        &self,
        conn: &mut Connection,
        names: &[String],
        team1_size: Option<usize>,
    ) -> Result<(Team, Team)> {
        reject_repeated_names(names)?;
        let roster = self.fetch_players(conn, names)?;
        let (size1, size2) = self.team_sizes(roster.len(), team1_size)?;

        let (team1, team2) = balancing::create_balanced_teams(
            roster,
            size1,
            size2,
            &self.model,
            self.config.teams.size_bonus,
        )?;

        let tx = conn.transaction()?;
        last_teams::save(&tx, &team1, &team2)?;
        tx.commit().context("Failed to store the new teams")?;

        info!(
            "Created teams {}v{}: {:.2} vs {:.2}",
            team1.len(),
            team2.len(),
            team1.overall_rating(&self.model),
            team2.overall_rating(&self.model)
        );
        Ok((team1, team2))
    }

    /// Consumes the last teams: every winner gains form, every loser drops
    /// form, the match is stored and the snapshot is cleared. All of it
    /// commits together or not at all, so the same snapshot can never be
    /// recorded twice.
    pub fn record_result(&self, conn: &mut Connection, winner: TeamLabel) -> Result<MatchOutcome> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let (team1, team2) = match last_teams::load(&tx)? {
            Some((team1, team2)) if !team1.is_empty() && !team2.is_empty() => (team1, team2),
            _ => return Err(RosterError::NoLastTeams.into()),
        };

        let mut participants = Vec::with_capacity(team1.len() + team2.len());
        for (label, team) in [(TeamLabel::Team1, team1), (TeamLabel::Team2, team2)] {
            let won = label == winner;
            for mut player in team.players {
                let form_before = player.form;
                self.tracker.update_form(&mut player, won);
                players::update_form(&tx, &player.name, player.form)?;
                participants.push(MatchParticipant {
                    player_name: player.name,
                    team: label,
                    form_before,
                    form_after: player.form,
                });
            }
        }

        let record = matches::record(&tx, winner, Utc::now().naive_utc(), &participants)?;
        last_teams::clear(&tx)?;
        tx.commit().context("Failed to commit match result")?;

        info!(
            "Recorded match {}: {} won, {} players updated",
            record.id,
            winner,
            participants.len()
        );
        Ok(MatchOutcome {
            record,
            participants,
        })
    }

    pub fn last_team(&self, conn: &Connection, label: TeamLabel) -> Result<Team> {
        let (team1, team2) = last_teams::load(conn)?.ok_or(RosterError::NoLastTeams)?;
        Ok(match label {
            TeamLabel::Team1 => team1,
            TeamLabel::Team2 => team2,
        })
    }

    pub fn team_attributes(&self, conn: &Connection, label: TeamLabel) -> Result<Vec<(Attribute, f64)>> {
        let team = self.last_team(conn, label)?;
        Ok(team.attribute_averages()?)
    }

    pub fn team_rating(&self, conn: &Connection, label: TeamLabel) -> Result<f64> {
        let team = self.last_team(conn, label)?;
        Ok(team.overall_rating(&self.model))
    }

    /// Most recent matches first.
    pub fn history(&self, conn: &Connection, limit: usize) -> Result<Vec<MatchOutcome>> {
        let mut records = matches::list_all(conn)?;
        records.reverse();
        records
            .into_iter()
            .take(limit)
            .map(|record| -> Result<MatchOutcome> {
                let participants = matches::participants(conn, record.id)?;
                Ok(MatchOutcome {
                    record,
                    participants,
                })
            })
            .collect()
    }

    /// Every unknown name is reported at once; nothing is filtered silently.
    fn fetch_players(&self, conn: &Connection, names: &[String]) -> Result<Vec<Player>> {
        let mut found = Vec::with_capacity(names.len());
        let mut missing = Vec::new();

        for name in names {
            match players::find_by_name(conn, name)? {
                Some(record) => found.push(record.player),
                None => missing.push(name.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(RosterError::NotFound { names: missing }.into());
        }
        Ok(found)
    }

    fn team_sizes(&self, count: usize, team1_size: Option<usize>) -> Result<(usize, usize), RosterError> {
        let size1 = team1_size.unwrap_or(count - count / 2);
        let size2 = count.saturating_sub(size1);
        let invalid = RosterError::InvalidTeamSize {
            size_a: size1,
            size_b: size2,
            count,
        };

        if count < self.config.teams.min_players || size1 > count || size1 == 0 || size2 == 0 {
            return Err(invalid);
        }
        Ok((size1, size2))
    }
}

fn reject_repeated_names(names: &[String]) -> Result<(), RosterError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(RosterError::validation(format!(
                "Player '{name}' is listed more than once"
            )));
        }
    }
    Ok(())
}
