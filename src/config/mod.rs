pub mod settings;

pub use settings::{AppConfig, AttributeSettings, RatingSettings, TeamSettings};
