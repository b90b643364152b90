//! Simplified spaced repetition scheduler.
//!
//! Every word carries a mastery level between 0 and the schedule's top level:
//! - A correct answer raises the level by one (capped at the top) and the
//!   word comes back after the interval listed for the new level
//! - An incorrect answer lowers the level by one (floored at 0) and the word
//!   comes back after the retry interval, whatever the new level is
//!
//! With the default schedule the waits are 1, 3, 7, 14, 30 and 60 days for
//! levels 0 to 5, and one day after a mistake.

use super::{IntervalSchedule, ReviewState};
use chrono::{DateTime, Utc};
use log::debug;

/// What a single answer did to a word's schedule.
#[derive(Clone, Debug, PartialEq)]
pub struct PracticeOutcome {
    pub is_correct: bool,
    pub mastery_level: u8,
    pub next_review_at: DateTime<Utc>,
}

impl PracticeOutcome {
    pub fn from_state(state: &ReviewState, is_correct: bool) -> Self {
        Self {
            is_correct,
            mastery_level: state.mastery_level,
            next_review_at: state.next_review_at,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    schedule: IntervalSchedule,
}

impl Scheduler {
    pub fn new(schedule: IntervalSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &IntervalSchedule {
        &self.schedule
    }

    /// Calculates the review state after one answer given at `now`.
    pub fn update(&self, state: &ReviewState, is_correct: bool, now: DateTime<Utc>) -> ReviewState {
        let mut next = state.clone();

        let interval = if is_correct {
            next.correct_count += 1;
            next.mastery_level = state
                .mastery_level
                .saturating_add(1)
                .min(self.schedule.max_level());
            self.schedule.interval_for(next.mastery_level)
        } else {
            next.incorrect_count += 1;
            next.mastery_level = state.mastery_level.saturating_sub(1);
            self.schedule.retry()
        };

        next.last_reviewed_at = now;
        next.next_review_at = now + interval;

        debug!(
            "word {}: {} answer, level {} -> {}, next review in {} days",
            state.word_id,
            if is_correct { "correct" } else { "incorrect" },
            state.mastery_level,
            next.mastery_level,
            interval.num_days()
        );

        next
    }
}

/// Calculates the next review state using the default schedule.
pub fn update_progress(state: &ReviewState, is_correct: bool, now: DateTime<Utc>) -> ReviewState {
    Scheduler::default().update(state, is_correct, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    fn state_at(level: u8) -> ReviewState {
        let mut state = ReviewState::fresh(1, now());
        state.mastery_level = level;
        state
    }

    #[test]
    fn test_first_correct_answer() {
        let next = update_progress(&state_at(0), true, now());

        assert_eq!(next.mastery_level, 1);
        assert_eq!(next.correct_count, 1);
        assert_eq!(next.incorrect_count, 0);
        assert_eq!(next.next_review_at - now(), Duration::days(3));
        assert_eq!(next.last_reviewed_at, now());
    }

    #[test]
    fn test_incorrect_at_floor() {
        let next = update_progress(&state_at(0), false, now());

        assert_eq!(next.mastery_level, 0);
        assert_eq!(next.incorrect_count, 1);
        assert_eq!(next.next_review_at - now(), Duration::days(1));
    }

    #[test]
    fn test_correct_at_ceiling() {
        let next = update_progress(&state_at(5), true, now());

        assert_eq!(next.mastery_level, 5);
        assert_eq!(next.next_review_at - now(), Duration::days(60));
    }

    #[test]
    fn test_incorrect_always_retries_next_day() {
        for level in 1..=5 {
            let next = update_progress(&state_at(level), false, now());
            assert_eq!(next.mastery_level, level - 1);
            assert_eq!(next.next_review_at - now(), Duration::days(1));
        }
    }

    #[test]
    fn test_level_stays_in_range_and_moves_monotonically() {
        for level in 0..=5 {
            let state = state_at(level);

            let up = update_progress(&state, true, now());
            assert!(up.mastery_level <= 5);
            assert!(up.mastery_level >= state.mastery_level);

            let down = update_progress(&state, false, now());
            assert!(down.mastery_level <= state.mastery_level);

            assert!(up.next_review_at > up.last_reviewed_at);
            assert!(down.next_review_at > down.last_reviewed_at);
        }
    }

    #[test]
    fn test_update_is_not_idempotent() {
        let state = state_at(0);

        let once = update_progress(&state, true, now());
        let twice = update_progress(&once, true, now());

        assert_ne!(once, twice);
        assert_eq!(once.mastery_level, 1);
        assert_eq!(twice.mastery_level, 2);
        assert_eq!(twice.correct_count, 2);
    }

    #[test]
    fn test_input_state_is_left_untouched() {
        let state = state_at(2);
        let _ = update_progress(&state, true, now());
        assert_eq!(state, state_at(2));
    }

    #[test]
    fn test_practice_sequence() {
        let fresh = ReviewState::fresh(1, now());

        let first = update_progress(&fresh, true, now());
        assert_eq!(first.mastery_level, 1);
        assert_eq!(first.next_review_at - now(), Duration::days(3));

        let later = now() + Duration::days(3);
        let second = update_progress(&first, false, later);
        assert_eq!(second.mastery_level, 0);
        assert_eq!(second.next_review_at - later, Duration::days(1));

        let last = later + Duration::days(1);
        let third = update_progress(&second, true, last);
        assert_eq!(third.mastery_level, 1);
        assert_eq!(third.next_review_at - last, Duration::days(3));

        assert_eq!(third.correct_count, 2);
        assert_eq!(third.incorrect_count, 1);
        assert_eq!(third.success_rate(), 66);
    }

    #[test]
    fn test_custom_schedule() {
        let schedule = IntervalSchedule::from_days(&[2, 5], 3).unwrap();
        let scheduler = Scheduler::new(schedule);

        let up = scheduler.update(&state_at(0), true, now());
        assert_eq!(up.mastery_level, 1);
        assert_eq!(up.next_review_at - now(), Duration::days(5));

        let capped = scheduler.update(&up, true, now());
        assert_eq!(capped.mastery_level, 1);

        let down = scheduler.update(&capped, false, now());
        assert_eq!(down.mastery_level, 0);
        assert_eq!(down.next_review_at - now(), Duration::days(3));
    }

    #[test]
    fn test_outcome_reports_new_state() {
        let next = update_progress(&state_at(3), true, now());
        let outcome = PracticeOutcome::from_state(&next, true);

        assert!(outcome.is_correct);
        assert_eq!(outcome.mastery_level, 4);
        assert_eq!(outcome.next_review_at, now() + Duration::days(30));
    }
}
