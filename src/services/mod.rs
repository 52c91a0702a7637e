pub mod analytics;
pub mod clock;
pub mod coach;
pub mod streak;
