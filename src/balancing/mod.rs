pub mod bonus;
pub mod optimizer;
pub mod seed;

pub use bonus::apply_bonus;
pub use optimizer::{balance, best_swap, imbalance, Swap};
pub use seed::seed_split;

use log::info;

use crate::domain::{Player, Team};
use crate::errors::RosterError;
use crate::rating::RatingModel;

/// Seed split, size bonus, then local search.
pub fn create_balanced_teams(
    players: Vec<Player>,
    size_a: usize,
    size_b: usize,
    model: &RatingModel,
    size_bonus: f64,
) -> Result<(Team, Team), RosterError> {
    let (mut team_a, mut team_b) = seed_split(players, size_a, size_b, model)?;
    apply_bonus(&mut team_a, &mut team_b, size_bonus);
    info!(
        "Seed split {}v{}, imbalance {:.2}",
        team_a.len(),
        team_b.len(),
        imbalance(&team_a, &team_b, model)
    );

    Ok(balance(team_a, team_b, model))
}
