//! Picking the words for a practice batch and judging answers.

use super::{PracticeOutcome, ReviewState, Word};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Number of words offered in one practice batch.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// A word queued for practice together with the state its answer will update.
#[derive(Clone, Debug)]
pub struct PracticeItem {
    pub word_id: i64,
    pub word: Word,
    pub review: ReviewState,
    /// True when the learner has never answered this word; `review` is then
    /// a fresh state that is only stored after the first answer.
    pub is_new: bool,
}

/// Builds a practice batch of at most `batch_size` words.
///
/// Due words come first, earliest due date first. Words the learner has never
/// answered fill the remaining slots in word list order (difficulty, then
/// term, then id).
pub fn select_practice_batch(
    due: Vec<(i64, Word, ReviewState)>,
    unseen: Vec<(i64, Word)>,
    batch_size: usize,
    now: DateTime<Utc>,
) -> Vec<PracticeItem> {
    let mut due: Vec<_> = due
        .into_iter()
        .filter(|(_, _, review)| review.is_due(now))
        .collect();
    due.sort_by(|a, b| {
        a.2.next_review_at
            .cmp(&b.2.next_review_at)
            .then(a.0.cmp(&b.0))
    });
    due.truncate(batch_size);

    let mut batch: Vec<PracticeItem> = due
        .into_iter()
        .map(|(word_id, word, review)| PracticeItem {
            word_id,
            word,
            review,
            is_new: false,
        })
        .collect();

    let remaining = batch_size - batch.len();
    if remaining > 0 {
        let mut unseen = unseen;
        unseen.sort_by(|a, b| a.1.canonical_cmp(&b.1).then(a.0.cmp(&b.0)));

        batch.extend(
            unseen
                .into_iter()
                .take(remaining)
                .map(|(word_id, word)| PracticeItem {
                    word_id,
                    word,
                    review: ReviewState::fresh(word_id, now),
                    is_new: true,
                }),
        );
    }

    batch
}

/// The answer is trimmed, then compared to the translation ignoring case.
pub fn check_answer(word: &Word, answer: &str) -> bool {
    answer.trim().to_lowercase() == word.translation.to_lowercase()
}

/// Reply to a submitted answer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_answer: String,
    pub mastery_level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub next_review_at: DateTime<Utc>,
}

impl AnswerFeedback {
    pub fn new(word: &Word, outcome: &PracticeOutcome) -> Self {
        let example = if word.example_sentence.is_empty() {
            None
        } else {
            Some(word.example_sentence.clone())
        };

        Self {
            correct: outcome.is_correct,
            correct_answer: word.translation.clone(),
            mastery_level: outcome.mastery_level,
            example,
            next_review_at: outcome.next_review_at,
        }
    }
}
