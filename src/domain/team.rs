use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

use crate::domain::attributes::Attribute;
use crate::domain::player::Player;
use crate::errors::RosterError;
use crate::rating::RatingModel;

pub const BASE_BONUS: f64 = 1.0;

/// Which side of the last created pair a team is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum TeamLabel {
    #[value(name = "team1")]
    Team1,
    #[value(name = "team2")]
    Team2,
}

impl TeamLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            TeamLabel::Team1 => "team1",
            TeamLabel::Team2 => "team2",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TeamLabel::Team1 => "Team 1",
            TeamLabel::Team2 => "Team 2",
        }
    }
}

impl fmt::Display for TeamLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamLabel {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "team1" => Ok(TeamLabel::Team1),
            "team2" => Ok(TeamLabel::Team2),
            other => Err(RosterError::validation(format!("Invalid team '{other}'"))),
        }
    }
}

/// A transient grouping of players plus the multiplier applied to its
/// aggregate rating.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub players: Vec<Player>,
    pub bonus: f64,
}

impl Team {
    pub fn new(players: Vec<Player>) -> Self {
        Self::with_bonus(players, BASE_BONUS)
    }

    pub fn with_bonus(players: Vec<Player>, bonus: f64) -> Self {
        Self { players, bonus }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Sum of member ratings, before the bonus.
    pub fn raw_rating(&self, model: &RatingModel) -> f64 {
        self.players.iter().map(|p| p.overall_rating(model)).sum()
    }

    pub fn overall_rating(&self, model: &RatingModel) -> f64 {
        self.bonus * self.raw_rating(model)
    }

    /// Mean raw score of one attribute. The bonus does not apply here.
    pub fn attribute_average(&self, attribute: Attribute) -> Result<f64, RosterError> {
        if self.is_empty() {
            return Err(RosterError::EmptyTeam);
        }
        let total: f64 = self
            .players
            .iter()
            .map(|p| p.attributes.score(attribute))
            .sum();
        Ok(total / self.len() as f64)
    }

    pub fn attribute_averages(&self) -> Result<Vec<(Attribute, f64)>, RosterError> {
        Attribute::ALL
            .into_iter()
            .map(|attribute| {
                self.attribute_average(attribute)
                    .map(|average| (attribute, average))
            })
            .collect()
    }

    pub fn player_names(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AttributeSettings;
    use crate::domain::attributes::AttributeSet;

    fn player(name: &str, scores: [f64; 6], form: i32) -> Player {
        let attributes = AttributeSet::new(scores, &AttributeSettings::default()).unwrap();
        Player::with_form(name, attributes, form)
    }

    #[test]
    fn test_overall_rating_multiplies_sum_by_bonus() {
        let model = RatingModel::default();
        let team = Team::with_bonus(
            vec![player("A", [70.0; 6], 5), player("B", [50.0; 6], 5)],
            1.2,
        );

        assert!((team.raw_rating(&model) - 120.0).abs() < 1e-9);
        assert!((team.overall_rating(&model) - 144.0).abs() < 1e-9);
    }

    #[test]
    fn test_attribute_average_ignores_bonus() {
        let team = Team::with_bonus(
            vec![
                player("A", [80.0, 10.0, 10.0, 10.0, 10.0, 10.0], 5),
                player("B", [60.0, 10.0, 10.0, 10.0, 10.0, 10.0], 9),
            ],
            1.2,
        );
        assert_eq!(team.attribute_average(Attribute::Shooting).unwrap(), 70.0);
    }

    #[test]
    fn test_attribute_average_of_empty_team_fails() {
        let team = Team::new(Vec::new());
        assert_eq!(
            team.attribute_average(Attribute::Passing),
            Err(RosterError::EmptyTeam)
        );
        assert!(team.attribute_averages().is_err());
    }

    #[test]
    fn test_attribute_averages_cover_every_attribute() {
        let team = Team::new(vec![player("A", [10.0, 20.0, 30.0, 40.0, 50.0, 60.0], 5)]);
        let averages = team.attribute_averages().unwrap();
        assert_eq!(averages.len(), 6);
        assert_eq!(averages[5], (Attribute::Goalkeeping, 60.0));
    }

    #[test]
    fn test_team_label_parses_stored_values() {
        assert_eq!("team1".parse::<TeamLabel>().unwrap(), TeamLabel::Team1);
        assert_eq!("team2".parse::<TeamLabel>().unwrap(), TeamLabel::Team2);
        assert!("team3".parse::<TeamLabel>().is_err());
    }
}
