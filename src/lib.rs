pub mod config;
pub mod database;
pub mod export;
pub mod models;
pub mod trainer;

pub use config::Config;
pub use models::{IntervalSchedule, Language, ReviewState, Scheduler, StudySession, Word};
pub use trainer::Trainer;
