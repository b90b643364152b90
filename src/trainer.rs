//! Practice workflow on top of the database: picking a batch, grading
//! answers, and reporting progress.

use crate::config::Config;
use crate::database::db;
use crate::database::{Result, StoreError};
use crate::models::progress::RECENT_SESSIONS;
use crate::models::{
    AnswerFeedback, Difficulty, PracticeItem, PracticeOutcome, ProgressSummary, ReviewState,
    Scheduler, StudySession, Word, check_answer, select_practice_batch,
};
use chrono::{DateTime, Utc};
use log::{debug, info};
use rusqlite::Connection;

/// A started study session and the words chosen for it.
#[derive(Clone, Debug)]
pub struct PracticeBatch {
    pub session: StudySession,
    pub items: Vec<PracticeItem>,
}

/// A word from the word list with the learner's progress on it, if any.
#[derive(Clone, Debug)]
pub struct WordProgress {
    pub word_id: i64,
    pub word: Word,
    pub review: Option<ReviewState>,
}

pub struct Trainer {
    conn: Connection,
    scheduler: Scheduler,
    batch_size: usize,
}

fn check_learner(learner: &str) -> Result<()> {
    if learner.trim().is_empty() {
        return Err(StoreError::EmptyLearner);
    }
    Ok(())
}

impl Trainer {
    pub fn new(conn: Connection, config: &Config) -> Self {
        Self {
            conn,
            scheduler: Scheduler::new(config.schedule.clone()),
            batch_size: config.batch_size.max(1),
        }
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn today(&self) -> Result<DateTime<Utc>> {
        db::get_current_date(&self.conn)
    }

    pub fn advance_day(&self) -> Result<DateTime<Utc>> {
        db::advance_day(&self.conn)
    }

    /// Picks the words to practice and opens a study session for them.
    ///
    /// Returns `None` without creating a session when nothing is due and the
    /// learner has already seen every word.
    pub fn start_practice(&self, learner: &str) -> Result<Option<PracticeBatch>> {
        check_learner(learner)?;
        let now = self.today()?;

        let due = db::get_due_words(learner, now, self.batch_size, &self.conn)?;
        let unseen = if due.len() < self.batch_size {
            db::get_unseen_words(learner, &self.conn)?
        } else {
            Vec::new()
        };
        debug!(
            "'{}' has {} due and {} unseen words",
            learner,
            due.len(),
            unseen.len()
        );

        let items = select_practice_batch(due, unseen, self.batch_size, now);
        if items.is_empty() {
            info!("nothing to practice for '{}'", learner);
            return Ok(None);
        }

        let session = db::create_study_session(learner, now, &self.conn)?;
        Ok(Some(PracticeBatch { session, items }))
    }

    /// Grades one answer, reschedules the word and counts it in the session.
    ///
    /// The review state is read, updated and written back inside a single
    /// transaction, so answers for the same word are applied one at a time.
    /// Answers to a finished session are rejected.
    pub fn submit_answer(
        &mut self,
        learner: &str,
        session_id: i64,
        word_id: i64,
        answer: &str,
    ) -> Result<AnswerFeedback> {
        check_learner(learner)?;
        let tx = self.conn.transaction()?;

        let now = db::get_current_date(&tx)?;
        let word = db::get_word(word_id, &tx)?;

        let mut session = db::get_study_session(session_id, &tx)?;
        if session.learner != learner {
            return Err(StoreError::SessionLearnerMismatch { session_id });
        }
        if session.is_finished() {
            return Err(StoreError::SessionFinished(session_id));
        }

        let is_correct = check_answer(&word, answer);
        let current = db::get_review_state(learner, word_id, &tx)?
            .unwrap_or_else(|| ReviewState::fresh(word_id, now));
        let updated = self.scheduler.update(&current, is_correct, now);
        db::save_review_state(learner, &updated, &tx)?;

        session.record(is_correct);
        db::update_study_session(&session, &tx)?;

        tx.commit()?;

        let outcome = PracticeOutcome::from_state(&updated, is_correct);
        Ok(AnswerFeedback::new(&word, &outcome))
    }

    pub fn finish_session(&self, session_id: i64) -> Result<StudySession> {
        let mut session = db::get_study_session(session_id, &self.conn)?;
        if !session.is_finished() {
            session.finish(self.today()?);
            db::update_study_session(&session, &self.conn)?;
        }
        info!("study session {} finished: {}", session.id, session.summary());
        Ok(session)
    }

    pub fn progress(&self, learner: &str) -> Result<ProgressSummary> {
        check_learner(learner)?;
        let states = db::get_review_states(learner, &self.conn)?;
        let sessions = db::get_recent_sessions(learner, RECENT_SESSIONS, &self.conn)?;
        Ok(ProgressSummary::from_states(
            &states,
            self.scheduler.schedule().max_level(),
            sessions,
        ))
    }

    /// Lists words in word list order, each with the learner's review state.
    pub fn word_list(
        &self,
        learner: Option<&str>,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<WordProgress>> {
        let words = db::get_words(difficulty, &self.conn)?;

        words
            .into_iter()
            .map(|(word_id, word)| -> Result<WordProgress> {
                let review = match learner {
                    Some(learner) => db::get_review_state(learner, word_id, &self.conn)?,
                    None => None,
                };
                Ok(WordProgress {
                    word_id,
                    word,
                    review,
                })
            })
            .collect()
    }
}
