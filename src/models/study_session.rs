//! Study session bookkeeping: how many words were practiced in one sitting
//! and how many of them were answered correctly.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StudySession {
    pub id: i64,
    pub learner: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub words_practiced: u32,
    pub correct_answers: u32,
}

impl StudySession {
    pub fn new(id: i64, learner: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            learner: learner.to_string(),
            started_at,
            ended_at: None,
            words_practiced: 0,
            correct_answers: 0,
        }
    }

    pub fn record(&mut self, is_correct: bool) {
        self.words_practiced += 1;
        if is_correct {
            self.correct_answers += 1;
        }
    }

    pub fn finish(&mut self, now: DateTime<Utc>) {
        self.ended_at = Some(now);
    }

    pub fn is_finished(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Percentage of correct answers in this session, rounded down.
    pub fn accuracy(&self) -> u32 {
        if self.words_practiced == 0 {
            return 0;
        }
        (u64::from(self.correct_answers) * 100 / u64::from(self.words_practiced)) as u32
    }

    pub fn summary(&self) -> String {
        format!(
            "{} - {}: {} words, {}% correct",
            self.learner,
            self.started_at.format("%Y-%m-%d %H:%M"),
            self.words_practiced,
            self.accuracy()
        )
    }
}
