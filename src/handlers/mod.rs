pub mod ai;
pub mod analytics;
pub mod habits;
pub mod health;
