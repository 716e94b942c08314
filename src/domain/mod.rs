pub mod attributes;
pub mod player;
pub mod team;

pub use attributes::{Attribute, AttributeSet};
pub use player::{Player, PlayerRecord};
pub use team::{Team, TeamLabel};
