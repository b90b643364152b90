//! Review interval table used by the scheduler.
//!
//! Index `n` holds the wait after a correct answer that lands on mastery
//! level `n`, so the table length is always `max_level + 1`. A separate retry
//! interval applies after every incorrect answer. All intervals are whole days.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Intervals (in days) for mastery levels 0-5.
pub const DEFAULT_STEPS_DAYS: [u32; 6] = [1, 3, 7, 14, 30, 60];
pub const DEFAULT_RETRY_DAYS: u32 = 1;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("interval table must contain at least one step")]
    Empty,

    #[error("interval table has {0} steps, at most 256 mastery levels are supported")]
    TooManyLevels(usize),

    #[error("interval for level {0} must be longer than zero")]
    NonPositiveStep(usize),

    #[error("retry interval must be longer than zero")]
    NonPositiveRetry,

    #[error("interval for level {0} must be a whole number of days")]
    PartialDayStep(usize),

    #[error("retry interval must be a whole number of days")]
    PartialDayRetry,
}

/// Serialized schedules store `u32` day counts.
fn is_whole_days(interval: Duration) -> bool {
    let days = interval.num_days();
    days <= i64::from(u32::MAX) && interval == Duration::days(days)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleDays", into = "ScheduleDays")]
pub struct IntervalSchedule {
    steps: Vec<Duration>,
    retry: Duration,
}

/// Serialized form: plain day counts.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct ScheduleDays {
    steps_days: Vec<u32>,
    #[serde(default = "default_retry_days")]
    retry_days: u32,
}

fn default_retry_days() -> u32 {
    DEFAULT_RETRY_DAYS
}

impl IntervalSchedule {
    pub fn new(steps: Vec<Duration>, retry: Duration) -> Result<Self, ScheduleError> {
        if steps.is_empty() {
            return Err(ScheduleError::Empty);
        }
        if steps.len() > usize::from(u8::MAX) + 1 {
            return Err(ScheduleError::TooManyLevels(steps.len()));
        }
        if let Some(level) = steps.iter().position(|step| *step <= Duration::zero()) {
            return Err(ScheduleError::NonPositiveStep(level));
        }
        if retry <= Duration::zero() {
            return Err(ScheduleError::NonPositiveRetry);
        }
        if let Some(level) = steps.iter().position(|step| !is_whole_days(*step)) {
            return Err(ScheduleError::PartialDayStep(level));
        }
        if !is_whole_days(retry) {
            return Err(ScheduleError::PartialDayRetry);
        }
        Ok(Self { steps, retry })
    }

    pub fn from_days(steps_days: &[u32], retry_days: u32) -> Result<Self, ScheduleError> {
        let steps = steps_days
            .iter()
            .map(|&days| Duration::days(i64::from(days)))
            .collect();
        Self::new(steps, Duration::days(i64::from(retry_days)))
    }

    /// Highest reachable mastery level.
    pub fn max_level(&self) -> u8 {
        // new() caps the table at 256 entries
        (self.steps.len() - 1) as u8
    }

    /// Wait after a correct answer that leaves the word at `level`.
    /// Levels above the table are treated as the top level.
    pub fn interval_for(&self, level: u8) -> Duration {
        let index = usize::from(level.min(self.max_level()));
        self.steps[index]
    }

    /// Wait after an incorrect answer.
    pub fn retry(&self) -> Duration {
        self.retry
    }
}

impl Default for IntervalSchedule {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS_DAYS
                .iter()
                .map(|&days| Duration::days(i64::from(days)))
                .collect(),
            retry: Duration::days(i64::from(DEFAULT_RETRY_DAYS)),
        }
    }
}

impl TryFrom<ScheduleDays> for IntervalSchedule {
    type Error = ScheduleError;

    fn try_from(days: ScheduleDays) -> Result<Self, Self::Error> {
        Self::from_days(&days.steps_days, days.retry_days)
    }
}

impl From<IntervalSchedule> for ScheduleDays {
    fn from(schedule: IntervalSchedule) -> Self {
        Self {
            steps_days: schedule
                .steps
                .iter()
                .map(|step| step.num_days() as u32)
                .collect(),
            retry_days: schedule.retry.num_days() as u32,
        }
    }
}
