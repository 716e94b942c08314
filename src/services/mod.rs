pub mod roster;
pub mod teams;
pub mod transfer;

pub use roster::{RankEntry, RankKey, RosterService, UpdateOutcome, UpdateTarget};
pub use teams::{MatchOutcome, TeamService};
pub use transfer::TransferService;
