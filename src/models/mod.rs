pub mod language;
pub mod practice;
pub mod progress;
pub mod review_state;
pub mod schedule;
pub mod scheduler;
pub mod study_session;
pub mod word;

pub use language::Language;
pub use practice::{AnswerFeedback, PracticeItem, check_answer, select_practice_batch};
pub use progress::ProgressSummary;
pub use review_state::ReviewState;
pub use schedule::{IntervalSchedule, ScheduleError};
pub use scheduler::{PracticeOutcome, Scheduler, update_progress};
pub use study_session::StudySession;
pub use word::{Difficulty, Word};
