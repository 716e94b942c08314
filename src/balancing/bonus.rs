use std::cmp::Ordering;

use crate::domain::team::{BASE_BONUS, Team};

/// Gives the smaller team `boost` and resets the other to the base bonus.
/// Equal sizes leave both at the base bonus.
pub fn apply_bonus(team_a: &mut Team, team_b: &mut Team, boost: f64) {
    team_a.bonus = BASE_BONUS;
    team_b.bonus = BASE_BONUS;

    match team_a.len().cmp(&team_b.len()) {
        Ordering::Less => team_a.bonus = boost,
        Ordering::Greater => team_b.bonus = boost,
        Ordering::Equal => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AttributeSettings;
    use crate::domain::{AttributeSet, Player};

    fn team(size: usize) -> Team {
        let attributes = AttributeSet::uniform(50.0, &AttributeSettings::default()).unwrap();
        Team::new(
            (0..size)
                .map(|i| Player::with_form(format!("p{i}"), attributes, 5))
                .collect(),
        )
    }

    #[test]
    fn test_smaller_team_gets_the_boost() {
        let (mut a, mut b) = (team(5), team(4));
        apply_bonus(&mut a, &mut b, 1.2);
        assert_eq!(a.bonus, 1.0);
        assert_eq!(b.bonus, 1.2);

        let (mut a, mut b) = (team(3), team(6));
        apply_bonus(&mut a, &mut b, 1.2);
        assert_eq!(a.bonus, 1.2);
        assert_eq!(b.bonus, 1.0);
    }

    #[test]
    fn test_equal_sizes_keep_base_bonus() {
        let (mut a, mut b) = (team(4), team(4));
        a.bonus = 1.2;
        apply_bonus(&mut a, &mut b, 1.2);
        assert_eq!(a.bonus, 1.0);
        assert_eq!(b.bonus, 1.0);
    }
}
