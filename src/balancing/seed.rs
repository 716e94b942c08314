use crate::domain::{Player, Team};
use crate::errors::RosterError;
use crate::rating::RatingModel;

/// Snake-draft split: players ordered by rating (highest first, ties kept in
/// input order) are dealt alternately, team A taking even positions until
/// either side is full.
pub fn seed_split(
    players: Vec<Player>,
    size_a: usize,
    size_b: usize,
    model: &RatingModel,
) -> Result<(Team, Team), RosterError> {
    if players.len() != size_a + size_b {
        return Err(RosterError::InvalidTeamSize {
            size_a,
            size_b,
            count: players.len(),
        });
    }

    let mut team_a = Vec::with_capacity(size_a);
    let mut team_b = Vec::with_capacity(size_b);

    for (position, player) in sort_by_rating(players, model).into_iter().enumerate() {
        if team_a.len() < size_a && (position % 2 == 0 || team_b.len() >= size_b) {
            team_a.push(player);
        } else {
            team_b.push(player);
        }
    }

    Ok((Team::new(team_a), Team::new(team_b)))
}

/// Stable descending sort on the overall rating.
fn sort_by_rating(players: Vec<Player>, model: &RatingModel) -> Vec<Player> {
    let mut rated: Vec<(f64, Player)> = players
        .into_iter()
        .map(|p| (p.overall_rating(model), p))
        .collect();
    rated.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    rated.into_iter().map(|(_, p)| p).collect()
}
