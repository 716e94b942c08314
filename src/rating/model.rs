use log::warn;

use crate::config::RatingSettings;
use crate::domain::attributes::{Attribute, AttributeSet};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Weighted-sum rating with a linear form adjustment:
/// `rating = Σ weight[a] * score[a] * (1 + form_factor * (form - neutral_form))`
#[derive(Debug, Clone, PartialEq)]
pub struct RatingModel {
    weights: [f64; 6],
    neutral_form: i32,
    form_factor: f64,
}

impl Default for RatingModel {
    fn default() -> Self {
        Self::new(&RatingSettings::default())
    }
}

impl RatingModel {
    pub fn new(settings: &RatingSettings) -> Self {
        let total: f64 = settings.weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            warn!("Attribute weights sum to {total}, ratings will not be on the score scale");
        }

        Self {
            weights: settings.weights,
            neutral_form: settings.neutral_form,
            form_factor: settings.form_factor,
        }
    }

    pub fn weight(&self, attribute: Attribute) -> f64 {
        self.weights[attribute.index()]
    }

    pub fn base_rating(&self, attributes: &AttributeSet) -> f64 {
        attributes
            .iter()
            .map(|(attribute, score)| self.weight(attribute) * score)
            .sum()
    }

    pub fn form_multiplier(&self, form: i32) -> f64 {
        1.0 + self.form_factor * f64::from(form - self.neutral_form)
    }

    pub fn overall_rating(&self, attributes: &AttributeSet, form: i32) -> f64 {
        self.base_rating(attributes) * self.form_multiplier(form)
    }
}
