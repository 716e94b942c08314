use std::fmt;
use std::str::FromStr;

use crate::config::AttributeSettings;
use crate::errors::RosterError;

/// One of the six skills every player is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Shooting,
    Dribbling,
    Passing,
    Tackling,
    Fitness,
    Goalkeeping,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Shooting,
        Attribute::Dribbling,
        Attribute::Passing,
        Attribute::Tackling,
        Attribute::Fitness,
        Attribute::Goalkeeping,
    ];

    /// Slot of this attribute in an `AttributeSet` and in the weight table.
    pub fn index(self) -> usize {
        match self {
            Attribute::Shooting => 0,
            Attribute::Dribbling => 1,
            Attribute::Passing => 2,
            Attribute::Tackling => 3,
            Attribute::Fitness => 4,
            Attribute::Goalkeeping => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::Shooting => "shooting",
            Attribute::Dribbling => "dribbling",
            Attribute::Passing => "passing",
            Attribute::Tackling => "tackling",
            Attribute::Fitness => "fitness",
            Attribute::Goalkeeping => "goalkeeping",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Attribute::Shooting => "Shooting",
            Attribute::Dribbling => "Dribbling",
            Attribute::Passing => "Passing",
            Attribute::Tackling => "Tackling",
            Attribute::Fitness => "Fitness",
            Attribute::Goalkeeping => "Goalkeeping",
        }
    }

    fn alias(self) -> &'static str {
        &self.as_str()[..1]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the full name or the one-letter alias, in any case.
impl FromStr for Attribute {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Attribute::ALL
            .into_iter()
            .find(|attr| attr.as_str() == key || attr.alias() == key)
            .ok_or_else(|| RosterError::validation(format!("Invalid attribute '{s}'")))
    }
}

/// The six scores of one player. Immutable once built; updates go through
/// `with_score`, which validates and returns a new set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeSet {
    scores: [f64; 6],
}

impl AttributeSet {
    pub fn new(scores: [f64; 6], bounds: &AttributeSettings) -> Result<Self, RosterError> {
        for attribute in Attribute::ALL {
            validate_score(attribute, scores[attribute.index()], bounds)?;
        }
        Ok(Self { scores })
    }

    /// Rows already validated when they were written. Range settings may have
    /// changed since, and a stored player must stay readable.
    pub(crate) fn from_stored(scores: [f64; 6]) -> Self {
        Self { scores }
    }

    /// Same score for every attribute.
    pub fn uniform(score: f64, bounds: &AttributeSettings) -> Result<Self, RosterError> {
        Self::new([score; 6], bounds)
    }

    /// Build from textual input (CLI arguments, CSV cells), rejecting anything
    /// that is not a number.
    pub fn parse(raw: [&str; 6], bounds: &AttributeSettings) -> Result<Self, RosterError> {
        let mut scores = [0.0; 6];
        for attribute in Attribute::ALL {
            scores[attribute.index()] = parse_score(attribute, raw[attribute.index()])?;
        }
        Self::new(scores, bounds)
    }

    pub fn score(&self, attribute: Attribute) -> f64 {
        self.scores[attribute.index()]
    }

    pub fn scores(&self) -> [f64; 6] {
        self.scores
    }

    pub fn with_score(
        &self,
        attribute: Attribute,
        value: f64,
        bounds: &AttributeSettings,
    ) -> Result<Self, RosterError> {
        validate_score(attribute, value, bounds)?;
        let mut scores = self.scores;
        scores[attribute.index()] = value;
        Ok(Self { scores })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        Attribute::ALL
            .into_iter()
            .map(|attribute| (attribute, self.score(attribute)))
    }
}

pub fn parse_score(attribute: Attribute, raw: &str) -> Result<f64, RosterError> {
    raw.trim().parse::<f64>().map_err(|_| {
        RosterError::validation(format!(
            "Invalid value for {attribute}: '{raw}'. Must be numeric."
        ))
    })
}

fn validate_score(
    attribute: Attribute,
    value: f64,
    bounds: &AttributeSettings,
) -> Result<(), RosterError> {
    if !value.is_finite() {
        return Err(RosterError::validation(format!(
            "Invalid value for {attribute}: {value}. Must be numeric."
        )));
    }
    if value < bounds.min_score || value > bounds.max_score {
        return Err(RosterError::validation(format!(
            "Invalid value for {attribute}: {value}. Must be between {} and {}.",
            bounds.min_score, bounds.max_score
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> AttributeSettings {
        AttributeSettings::default()
    }

    #[test]
    fn test_attribute_parses_names_and_aliases() {
        assert_eq!("shooting".parse::<Attribute>().unwrap(), Attribute::Shooting);
        assert_eq!("Goalkeeping".parse::<Attribute>().unwrap(), Attribute::Goalkeeping);
        assert_eq!("t".parse::<Attribute>().unwrap(), Attribute::Tackling);
        assert_eq!("F".parse::<Attribute>().unwrap(), Attribute::Fitness);
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let err = "heading".parse::<Attribute>().unwrap_err();
        assert_eq!(err, RosterError::validation("Invalid attribute 'heading'"));
    }

    #[test]
    fn test_indices_follow_declaration_order() {
        for (position, attribute) in Attribute::ALL.into_iter().enumerate() {
            assert_eq!(attribute.index(), position);
        }
    }

    #[test]
    fn test_non_numeric_score_is_rejected() {
        let err = AttributeSet::parse(["70", "70", "fast", "70", "70", "70"], &bounds()).unwrap_err();
        assert!(matches!(err, RosterError::Validation(msg) if msg.contains("passing")));
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        assert!(AttributeSet::new([70.0, 70.0, 70.0, 70.0, 101.0, 70.0], &bounds()).is_err());
        assert!(AttributeSet::new([-1.0, 70.0, 70.0, 70.0, 70.0, 70.0], &bounds()).is_err());
        assert!(AttributeSet::uniform(f64::NAN, &bounds()).is_err());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(AttributeSet::new([0.0, 100.0, 50.0, 50.0, 50.0, 50.0], &bounds()).is_ok());
    }

    #[test]
    fn test_with_score_replaces_without_touching_original() {
        let original = AttributeSet::uniform(60.0, &bounds()).unwrap();
        let updated = original.with_score(Attribute::Dribbling, 90.0, &bounds()).unwrap();

        assert_eq!(original.score(Attribute::Dribbling), 60.0);
        assert_eq!(updated.score(Attribute::Dribbling), 90.0);
        assert_eq!(updated.score(Attribute::Shooting), 60.0);
        assert!(original.with_score(Attribute::Dribbling, 150.0, &bounds()).is_err());
    }
}
