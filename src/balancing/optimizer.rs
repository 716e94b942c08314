use log::debug;

use crate::domain::Team;
use crate::rating::RatingModel;

/// A swap must shrink the imbalance by more than this to be committed, so
/// floating-point noise between equally rated players never causes a move.
pub const IMPROVEMENT_TOLERANCE: f64 = 1e-9;

/// Exchange of `team_a.players[index_a]` with `team_b.players[index_b]` and
/// the imbalance it leads to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swap {
    pub index_a: usize,
    pub index_b: usize,
    pub imbalance: f64,
}

/// `|rating(A) - rating(B)|`, bonuses included.
pub fn imbalance(team_a: &Team, team_b: &Team, model: &RatingModel) -> f64 {
    (team_a.overall_rating(model) - team_b.overall_rating(model)).abs()
}

/// Hill-climbs on single cross-team swaps until none improves the imbalance.
///
/// Each pass rates every player once and scores all `|A| x |B|` pairs with
/// O(1) arithmetic on the running sums. The best pair (first one in row-major
/// order on ties) is committed only if it strictly improves. Team sizes and
/// bonuses never change, only membership. The result is a 1-swap local
/// optimum, not necessarily the global one.
pub fn balance(mut team_a: Team, mut team_b: Team, model: &RatingModel) -> (Team, Team) {
    let mut swaps = 0usize;

    while let Some(swap) = best_swap(&team_a, &team_b, model) {
        std::mem::swap(
            &mut team_a.players[swap.index_a],
            &mut team_b.players[swap.index_b],
        );
        swaps += 1;
        debug!(
            "Swap {}: {} <-> {}, imbalance now {:.4}",
            swaps,
            team_b.players[swap.index_b].name,
            team_a.players[swap.index_a].name,
            swap.imbalance
        );
    }

    debug!(
        "Balancing converged after {} swap(s), imbalance {:.4}",
        swaps,
        imbalance(&team_a, &team_b, model)
    );
    (team_a, team_b)
}

/// The swap with the lowest resulting imbalance, if it beats the current one.
pub fn best_swap(team_a: &Team, team_b: &Team, model: &RatingModel) -> Option<Swap> {
    let ratings_a = member_ratings(team_a, model);
    let ratings_b = member_ratings(team_b, model);
    let sum_a: f64 = ratings_a.iter().sum();
    let sum_b: f64 = ratings_b.iter().sum();

    let current = (team_a.bonus * sum_a - team_b.bonus * sum_b).abs();
    let mut best: Option<Swap> = None;
    let mut best_imbalance = current;

    for (index_a, &rating_a) in ratings_a.iter().enumerate() {
        for (index_b, &rating_b) in ratings_b.iter().enumerate() {
            let new_a = sum_a - rating_a + rating_b;
            let new_b = sum_b - rating_b + rating_a;
            let candidate = (team_a.bonus * new_a - team_b.bonus * new_b).abs();

            if candidate < best_imbalance {
                best_imbalance = candidate;
                best = Some(Swap {
                    index_a,
                    index_b,
                    imbalance: candidate,
                });
            }
        }
    }

    best.filter(|swap| swap.imbalance < current - IMPROVEMENT_TOLERANCE)
}

fn member_ratings(team: &Team, model: &RatingModel) -> Vec<f64> {
    team.players.iter().map(|p| p.overall_rating(model)).collect()
}
