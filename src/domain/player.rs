use crate::domain::attributes::AttributeSet;
use crate::rating::RatingModel;

/// A roster entry. The name is the external key and is case-sensitive.
///
/// The overall rating is never stored; it is recomputed from the attributes
/// and form whenever it is asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub attributes: AttributeSet,
    pub form: i32,
}

impl Player {
    pub fn with_form(name: impl Into<String>, attributes: AttributeSet, form: i32) -> Self {
        Self {
            name: name.into(),
            attributes,
            form,
        }
    }

    pub fn overall_rating(&self, model: &RatingModel) -> f64 {
        model.overall_rating(&self.attributes, self.form)
    }
}

/// A player as stored, together with its row id.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub id: i64,
    pub player: Player,
}
