//! Aggregate statistics over a learner's review states.

use super::{ReviewState, StudySession};
use serde::Serialize;

/// How many of the most recent sessions a progress report lists.
pub const RECENT_SESSIONS: usize = 10;

#[derive(Clone, Debug, Serialize)]
pub struct ProgressSummary {
    pub total_words: usize,
    /// Mean mastery level rounded to one decimal place, halves to even.
    pub average_mastery: f64,
    /// Number of words at each mastery level, index = level.
    pub mastery_distribution: Vec<usize>,
    pub recent_sessions: Vec<StudySession>,
}

impl ProgressSummary {
    /// `max_level` sizes the distribution; states above it are counted at the top level.
    pub fn from_states(
        states: &[ReviewState],
        max_level: u8,
        mut sessions: Vec<StudySession>,
    ) -> Self {
        let mut mastery_distribution = vec![0; usize::from(max_level) + 1];
        for state in states {
            let level = usize::from(state.mastery_level.min(max_level));
            mastery_distribution[level] += 1;
        }

        let average_mastery = if states.is_empty() {
            0.0
        } else {
            let sum: u64 = states.iter().map(|s| u64::from(s.mastery_level)).sum();
            let mean = sum as f64 / states.len() as f64;
            (mean * 10.0).round_ties_even() / 10.0
        };

        sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at).then(b.id.cmp(&a.id)));
        sessions.truncate(RECENT_SESSIONS);

        Self {
            total_words: states.len(),
            average_mastery,
            mastery_distribution,
            recent_sessions: sessions,
        }
    }

    /// Share of tracked words at `level`, as a whole percentage.
    pub fn level_share(&self, level: usize) -> u32 {
        match self.mastery_distribution.get(level) {
            Some(&count) if self.total_words > 0 => (count * 100 / self.total_words) as u32,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap()
    }

    fn state(level: u8) -> ReviewState {
        let mut state = ReviewState::fresh(1, now());
        state.mastery_level = level;
        state
    }

    #[test]
    fn test_empty_progress() {
        let summary = ProgressSummary::from_states(&[], 5, Vec::new());

        assert_eq!(summary.total_words, 0);
        assert_eq!(summary.average_mastery, 0.0);
        assert_eq!(summary.mastery_distribution, vec![0; 6]);
        assert_eq!(summary.level_share(0), 0);
    }

    #[test]
    fn test_distribution_and_average() {
        let states = vec![state(0), state(1), state(1), state(5)];
        let summary = ProgressSummary::from_states(&states, 5, Vec::new());

        assert_eq!(summary.total_words, 4);
        assert_eq!(summary.mastery_distribution, vec![1, 2, 0, 0, 0, 1]);
        // 7 / 4 = 1.75
        assert_eq!(summary.average_mastery, 1.8);
        assert_eq!(summary.level_share(1), 50);
        assert_eq!(summary.level_share(9), 0);
    }

    #[test]
    fn test_average_rounds_halves_to_even() {
        let states = vec![state(0), state(0), state(0), state(1)];
        let summary = ProgressSummary::from_states(&states, 5, Vec::new());

        // 0.25 -> 0.2, while 1.75 -> 1.8 above
        assert_eq!(summary.average_mastery, 0.2);
    }

    #[test]
    fn test_recent_sessions_newest_first_and_capped() {
        let sessions: Vec<_> = (0..12)
            .map(|i| StudySession::new(i, "ola", now() + Duration::hours(i)))
            .collect();

        let summary = ProgressSummary::from_states(&[], 5, sessions);

        assert_eq!(summary.recent_sessions.len(), RECENT_SESSIONS);
        assert_eq!(summary.recent_sessions[0].id, 11);
        assert_eq!(summary.recent_sessions[9].id, 2);
    }
}
