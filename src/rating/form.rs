use crate::config::RatingSettings;
use crate::domain::player::Player;

/// Moves a player's form one step per match result, within fixed bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormTracker {
    step: i32,
    min_form: i32,
    max_form: i32,
}

impl Default for FormTracker {
    fn default() -> Self {
        Self::new(&RatingSettings::default())
    }
}

impl FormTracker {
    pub fn new(settings: &RatingSettings) -> Self {
        Self {
            step: settings.form_step,
            min_form: settings.min_form,
            max_form: settings.max_form,
        }
    }

    pub fn next_form(&self, form: i32, won: bool) -> i32 {
        let delta = if won { self.step } else { -self.step };
        self.clamp(form.saturating_add(delta))
    }

    /// Applies one match result. Calling it twice records two matches.
    pub fn update_form(&self, player: &mut Player, won: bool) {
        player.form = self.next_form(player.form, won);
    }

    pub fn clamp(&self, form: i32) -> i32 {
        form.clamp(self.min_form, self.max_form)
    }

    pub fn contains(&self, form: i32) -> bool {
        (self.min_form..=self.max_form).contains(&form)
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.min_form, self.max_form)
    }
}
