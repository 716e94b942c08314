pub mod form;
pub mod model;

pub use form::FormTracker;
pub use model::RatingModel;
