use chrono::NaiveDateTime;

use crate::domain::TeamLabel;

/// One row of the last-teams snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    pub player_name: String,
    pub team: TeamLabel,
    pub bonus: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub id: i64,
    pub winner: TeamLabel,
    pub played_at: NaiveDateTime,
}

/// A player's part in a recorded match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchParticipant {
    pub player_name: String,
    pub team: TeamLabel,
    pub form_before: i32,
    pub form_after: i32,
}
