use thiserror::Error;

/// Failures a single roster or team command can end with.
///
/// None of these leave persisted state half-written: every write happens
/// after validation has passed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    #[error("{0}")]
    Validation(String),

    #[error("Cannot split {count} player(s) into teams of {size_a} and {size_b}")]
    InvalidTeamSize {
        size_a: usize,
        size_b: usize,
        count: usize,
    },

    #[error("Player(s) not found: {}", .names.join(", "))]
    NotFound { names: Vec<String> },

    #[error("No previous teams found, create teams first")]
    NoLastTeams,

    #[error("Player '{0}' already exists")]
    DuplicatePlayer(String),

    #[error("Team has no players")]
    EmptyTeam,
}

impl RosterError {
    pub fn validation(message: impl Into<String>) -> Self {
        RosterError::Validation(message.into())
    }

    pub fn not_found(name: &str) -> Self {
        RosterError::NotFound {
            names: vec![name.to_string()],
        }
    }
}

/// Recover the domain error carried inside an `anyhow::Error`, if any.
pub fn roster_error(err: &anyhow::Error) -> Option<&RosterError> {
    err.downcast_ref::<RosterError>()
}
