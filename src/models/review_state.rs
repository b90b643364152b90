//! Per-learner progress record for a single word.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    pub word_id: i64,
    pub mastery_level: u8,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub last_reviewed_at: DateTime<Utc>,
    pub next_review_at: DateTime<Utc>,
}

impl ReviewState {
    /// State of a word the learner has never answered: level 0, no attempts,
    /// due immediately.
    pub fn fresh(word_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            word_id,
            mastery_level: 0,
            correct_count: 0,
            incorrect_count: 0,
            last_reviewed_at: now,
            next_review_at: now,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.correct_count + self.incorrect_count
    }

    /// Percentage of correct answers, rounded down. Zero before the first answer.
    pub fn success_rate(&self) -> u32 {
        let total = self.attempts();
        if total == 0 {
            return 0;
        }
        (u64::from(self.correct_count) * 100 / u64::from(total)) as u32
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }
}
