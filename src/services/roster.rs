use anyhow::Result;
use log::info;
use rusqlite::Connection;
use std::str::FromStr;

use crate::config::AppConfig;
use crate::database::players;
use crate::domain::attributes::parse_score;
use crate::domain::{Attribute, AttributeSet, Player, PlayerRecord};
use crate::errors::RosterError;
use crate::rating::{FormTracker, RatingModel};

/// What `player update` may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateTarget {
    Attribute(Attribute),
    Form,
}

impl FromStr for UpdateTarget {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("form") {
            return Ok(UpdateTarget::Form);
        }
        s.parse().map(UpdateTarget::Attribute)
    }
}

/// What players can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankKey {
    Overall,
    Attribute(Attribute),
}

impl RankKey {
    /// Overall first, then every attribute.
    pub fn all() -> Vec<RankKey> {
        std::iter::once(RankKey::Overall)
            .chain(Attribute::ALL.into_iter().map(RankKey::Attribute))
            .collect()
    }

    pub fn title(self) -> &'static str {
        match self {
            RankKey::Overall => "Overall Rating",
            RankKey::Attribute(attribute) => attribute.label(),
        }
    }
}

impl FromStr for RankKey {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overall" | "rating" => Ok(RankKey::Overall),
            other => other.parse().map(RankKey::Attribute),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    pub name: String,
    pub value: f64,
}

/// Result of a successful `update_player`.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Attribute { attribute: Attribute, value: f64 },
    Form(i32),
}

pub struct RosterService {
    config: AppConfig,
    model: RatingModel,
    tracker: FormTracker,
}

impl RosterService {
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

    pub fn add_player(
        &self,
        conn: &Connection,
        name: &str,
        attributes: AttributeSet,
    ) -> Result<PlayerRecord> {
        let name = validate_name(name)?;
        let player = Player::with_form(name, attributes, self.config.rating.neutral_form);
        let record = players::insert_player(conn, &player)?;
        info!("Added player '{}' (id {})", record.player.name, record.id);
        Ok(record)
    }

    /// Adds a player from raw textual scores, in attribute order.
    pub fn add_player_from_input(
        &self,
        conn: &Connection,
        name: &str,
        scores: [&str; 6],
    ) -> Result<PlayerRecord> {
        let attributes = AttributeSet::parse(scores, &self.config.attributes)?;
        self.add_player(conn, name, attributes)
    }

    pub fn remove_player(&self, conn: &Connection, name: &str) -> Result<()> {
        players::delete_by_name(conn, name)?;
        info!("Removed player '{}'", name);
        Ok(())
    }

    /// Validates both the key and the value before anything is written.
    pub fn update_player(
        &self,
        conn: &Connection,
        name: &str,
        key: &str,
        value: &str,
    ) -> Result<UpdateOutcome> {
        let target: UpdateTarget = key.parse()?;
        let current = players::get_by_name(conn, name)?.player;

        let outcome = match target {
            UpdateTarget::Attribute(attribute) => {
                let score = parse_score(attribute, value)?;
                let updated =
                    current
                        .attributes
                        .with_score(attribute, score, &self.config.attributes)?;
                players::update_attribute(conn, name, attribute, updated.score(attribute))?;
                UpdateOutcome::Attribute {
                    attribute,
                    value: score,
                }
            }
            UpdateTarget::Form => {
                let form = self.parse_form(value)?;
                players::update_form(conn, name, form)?;
                UpdateOutcome::Form(form)
            }
        };

        info!("Updated '{}': {:?}", name, outcome);
        Ok(outcome)
    }

    pub fn player(&self, conn: &Connection, name: &str) -> Result<PlayerRecord> {
        players::get_by_name(conn, name)
    }

    pub fn rating(&self, conn: &Connection, name: &str) -> Result<f64> {
        let record = players::get_by_name(conn, name)?;
        Ok(record.player.overall_rating(&self.model))
    }

    pub fn list(&self, conn: &Connection) -> Result<Vec<PlayerRecord>> {
        players::list_all(conn)
    }

    /// Highest first; equal values keep roster order.
    pub fn rank(&self, conn: &Connection, key: RankKey) -> Result<Vec<RankEntry>> {
        let records = players::list_all(conn)?;
        Ok(rank_players(&records, key, &self.model))
    }

    pub fn parse_form(&self, raw: &str) -> Result<i32, RosterError> {
        let form: i32 = raw.trim().parse().map_err(|_| {
            RosterError::validation(format!("Invalid form '{raw}'. Must be a whole number."))
        })?;
        if !self.tracker.contains(form) {
            let (min, max) = self.tracker.bounds();
            return Err(RosterError::validation(format!(
                "Invalid form {form}. Must be between {min} and {max}."
            )));
        }
        Ok(form)
    }
}

pub fn rank_players(records: &[PlayerRecord], key: RankKey, model: &RatingModel) -> Vec<RankEntry> {
    let mut entries: Vec<RankEntry> = records
        .iter()
        .map(|record| RankEntry {
            name: record.player.name.clone(),
            value: match key {
                RankKey::Overall => record.player.overall_rating(model),
                RankKey::Attribute(attribute) => record.player.attributes.score(attribute),
            },
        })
        .collect();
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    entries
}

/// Names are stored exactly as given, so lookups never need normalising.
/// Surrounding whitespace is rejected rather than trimmed.
pub fn validate_name(name: &str) -> Result<&str, RosterError> {
    if name.trim().is_empty() {
        return Err(RosterError::validation("Player name must not be empty"));
    }
    if name.trim() != name {
        return Err(RosterError::validation(format!(
            "Player name '{name}' must not start or end with whitespace"
        )));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{get_connection, open_in_memory};
    use crate::errors::roster_error;

    fn service() -> RosterService {
        RosterService::new(AppConfig::new())
    }

    #[test]
    fn test_add_player_starts_at_neutral_form() {
        let pool = open_in_memory().unwrap();
        let conn = get_connection(&pool).unwrap();
        let roster = service();

        let record = roster
            .add_player_from_input(&conn, "Alice", ["80", "70", "60", "50", "40", "30"])
            .unwrap();

        assert_eq!(record.player.form, 5);
        assert_eq!(record.player.attributes.score(Attribute::Passing), 60.0);
    }

    #[test]
    fn test_add_player_rejects_bad_input_before_writing() {
        let pool = open_in_memory().unwrap();
        let conn = get_connection(&pool).unwrap();
        let roster = service();

        assert!(roster
            .add_player_from_input(&conn, "Bob", ["80", "x", "60", "50", "40", "30"])
            .is_err());
        assert!(roster
            .add_player_from_input(&conn, "Bob", ["80", "70", "60", "50", "40", "300"])
            .is_err());
        assert!(roster
            .add_player_from_input(&conn, "  ", ["80", "70", "60", "50", "40", "30"])
            .is_err());
        assert!(roster.list(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_update_player_by_alias_and_form() {
        let pool = open_in_memory().unwrap();
        let conn = get_connection(&pool).unwrap();
        let roster = service();
        roster
            .add_player_from_input(&conn, "Cara", ["50", "50", "50", "50", "50", "50"])
            .unwrap();

        let outcome = roster.update_player(&conn, "Cara", "s", "95").unwrap();
        assert_eq!(
            outcome,
            UpdateOutcome::Attribute {
                attribute: Attribute::Shooting,
                value: 95.0
            }
        );
        assert_eq!(roster.update_player(&conn, "Cara", "form", "8").unwrap(), UpdateOutcome::Form(8));

        let stored = roster.player(&conn, "Cara").unwrap().player;
        assert_eq!(stored.attributes.score(Attribute::Shooting), 95.0);
        assert_eq!(stored.form, 8);
    }

    #[test]
    fn test_update_player_validation() {
        let pool = open_in_memory().unwrap();
        let conn = get_connection(&pool).unwrap();
        let roster = service();
        roster
            .add_player_from_input(&conn, "Dan", ["50", "50", "50", "50", "50", "50"])
            .unwrap();

        for (key, value) in [("heading", "50"), ("shooting", "abc"), ("shooting", "101"), ("form", "11"), ("form", "2.5")] {
            let err = roster.update_player(&conn, "Dan", key, value).unwrap_err();
            assert!(matches!(roster_error(&err), Some(RosterError::Validation(_))), "{key}={value}");
        }

        let err = roster.update_player(&conn, "Nobody", "shooting", "50").unwrap_err();
        assert_eq!(roster_error(&err), Some(&RosterError::not_found("Nobody")));

        let stored = roster.player(&conn, "Dan").unwrap().player;
        assert_eq!(stored.attributes.score(Attribute::Shooting), 50.0);
        assert_eq!(stored.form, 5);
    }

    #[test]
    fn test_name_with_surrounding_whitespace_is_rejected() {
        let pool = open_in_memory().unwrap();
        let conn = get_connection(&pool).unwrap();
        let roster = service();

        for name in [" Ann ", "Ann ", "\tAnn"] {
            let err = roster
                .add_player_from_input(&conn, name, ["50", "50", "50", "50", "50", "50"])
                .unwrap_err();
            assert!(matches!(roster_error(&err), Some(RosterError::Validation(_))), "{name:?}");
        }
        assert!(roster.list(&conn).unwrap().is_empty());

        let record = roster
            .add_player_from_input(&conn, "Ann Lee", ["50", "50", "50", "50", "50", "50"])
            .unwrap();
        assert_eq!(record.player.name, "Ann Lee");
        assert_eq!(roster.player(&conn, "Ann Lee").unwrap().id, record.id);
    }

    #[test]
    fn test_remove_missing_player_is_not_found() {
        let pool = open_in_memory().unwrap();
        let conn = get_connection(&pool).unwrap();
        let err = service().remove_player(&conn, "Ghost").unwrap_err();
        assert_eq!(roster_error(&err), Some(&RosterError::not_found("Ghost")));
    }

    #[test]
    fn test_rank_orders_descending_with_stable_ties() {
        let pool = open_in_memory().unwrap();
        let conn = get_connection(&pool).unwrap();
        let roster = service();
        roster.add_player_from_input(&conn, "Low", ["40", "90", "40", "40", "40", "40"]).unwrap();
        roster.add_player_from_input(&conn, "High", ["90", "40", "90", "90", "90", "90"]).unwrap();
        roster.add_player_from_input(&conn, "Tie", ["40", "90", "40", "40", "40", "40"]).unwrap();

        let overall: Vec<String> = roster
            .rank(&conn, RankKey::Overall)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(overall, vec!["High", "Low", "Tie"]);

        let dribbling = roster.rank(&conn, "d".parse().unwrap()).unwrap();
        assert_eq!(dribbling[0].name, "Low");
        assert_eq!(dribbling[0].value, 90.0);
        assert_eq!(dribbling[2].name, "High");
    }

    #[test]
    fn test_rank_key_parsing() {
        assert_eq!("overall".parse::<RankKey>().unwrap(), RankKey::Overall);
        assert_eq!("Passing".parse::<RankKey>().unwrap(), RankKey::Attribute(Attribute::Passing));
        assert!("invalid_attr".parse::<RankKey>().is_err());
        assert_eq!(RankKey::all().len(), 7);
    }
}
