use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::RosterError;

pub const DATABASE_PATH_VAR: &str = "FOOTBALL_DB";
pub const CONFIG_PATH_VAR: &str = "FOOTBALL_CONFIG";
const DEFAULT_DATABASE_PATH: &str = "football.db";

/// Weights are listed in attribute order:
/// shooting, dribbling, passing, tackling, fitness, goalkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    pub weights: [f64; 6],
    pub neutral_form: i32,
    pub form_factor: f64,
    pub min_form: i32,
    pub max_form: i32,
    pub form_step: i32,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            weights: [0.30, 0.30, 0.15, 0.15, 0.05, 0.05],
            neutral_form: 5,
            form_factor: 0.05,
            min_form: 0,
            max_form: 10,
            form_step: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSettings {
    pub min_score: f64,
    pub max_score: f64,
}

impl Default for AttributeSettings {
    fn default() -> Self {
        Self {
            min_score: 0.0,
            max_score: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamSettings {
    /// Multiplier applied to the smaller side of an uneven split.
    pub size_bonus: f64,
    pub min_players: usize,
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self {
            size_bonus: 1.2,
            min_players: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: String,
    pub rating: RatingSettings,
    pub attributes: AttributeSettings,
    pub teams: TeamSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            rating: RatingSettings::default(),
            attributes: AttributeSettings::default(),
            teams: TeamSettings::default(),
        }
    }

    /// Defaults, overridden by the JSON file named in `FOOTBALL_CONFIG` and
    /// then by `FOOTBALL_DB` for the database location.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::new(),
        };

        if let Ok(path) = std::env::var(DATABASE_PATH_VAR) {
            config.database_path = path;
        }

        log::debug!("Using database at {}", config.database_path);
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the rating, form and balancing code cannot work with.
    pub fn validate(&self) -> Result<(), RosterError> {
        let rating = &self.rating;
        if rating.min_form > rating.max_form {
            return Err(invalid(format!(
                "min_form {} is above max_form {}",
                rating.min_form, rating.max_form
            )));
        }
        if !(rating.min_form..=rating.max_form).contains(&rating.neutral_form) {
            return Err(invalid(format!(
                "neutral_form {} is outside [{}, {}]",
                rating.neutral_form, rating.min_form, rating.max_form
            )));
        }
        if rating.form_step < 0 {
            return Err(invalid(format!("form_step {} is negative", rating.form_step)));
        }
        if !rating.form_factor.is_finite() || rating.weights.iter().any(|w| !w.is_finite()) {
            return Err(invalid("weights and form_factor must be finite numbers"));
        }

        let scores = &self.attributes;
        if !scores.min_score.is_finite()
            || !scores.max_score.is_finite()
            || scores.min_score > scores.max_score
        {
            return Err(invalid(format!(
                "score range [{}, {}] is not valid",
                scores.min_score, scores.max_score
            )));
        }

        // NaN fails this comparison too.
        if !(self.teams.size_bonus > 1.0 && self.teams.size_bonus.is_finite()) {
            return Err(invalid(format!(
                "size_bonus {} must be a finite number above 1",
                self.teams.size_bonus
            )));
        }
        if self.teams.min_players < 2 {
            return Err(invalid(format!(
                "min_players {} must be at least 2",
                self.teams.min_players
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> RosterError {
    RosterError::validation(format!("Invalid configuration: {}", message.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let total: f64 = RatingSettings::default().weights.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"teams": {"size_bonus": 1.5}}"#).unwrap();

        assert_eq!(config.teams.size_bonus, 1.5);
        assert_eq!(config.teams.min_players, 2);
        assert_eq!(config.rating, RatingSettings::default());
        assert_eq!(config.database_path, "football.db");
    }

    #[test]
    fn test_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"rating": {"neutral_form": 4}}"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.rating.neutral_form, 4);
        assert_eq!(config.rating.max_form, 10);
    }

    #[test]
    fn test_malformed_config_fails() {
        assert!(AppConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(AppConfig::new().validate(), Ok(()));
    }

    #[test]
    fn test_inconsistent_settings_are_rejected() {
        let rejected = [
            r#"{"rating": {"min_form": 10, "max_form": 0}}"#,
            r#"{"rating": {"neutral_form": 11}}"#,
            r#"{"rating": {"min_form": 6}}"#,
            r#"{"rating": {"form_step": -1}}"#,
            r#"{"attributes": {"min_score": 50, "max_score": 10}}"#,
            r#"{"teams": {"size_bonus": 0.5}}"#,
            r#"{"teams": {"size_bonus": 1.0}}"#,
            r#"{"teams": {"min_players": 1}}"#,
        ];

        for raw in rejected {
            let err = AppConfig::from_json(raw).unwrap_err();
            assert!(
                matches!(err.downcast_ref::<RosterError>(), Some(RosterError::Validation(_))),
                "{raw} was accepted"
            );
        }
    }

    #[test]
    fn test_nan_size_bonus_is_rejected() {
        let mut config = AppConfig::new();
        config.teams.size_bonus = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_config_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"rating": {"min_form": 10, "max_form": 0}}"#).unwrap();

        assert!(AppConfig::from_file(&path).is_err());
    }
}
