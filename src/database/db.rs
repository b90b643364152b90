//! Database operations for the vocabulary trainer
//!
//! Handles SQLite database initialization, CRUD operations for languages and words,
//! and persistence of per-learner review states and study sessions.
//! Timestamps are stored as Unix seconds.

use crate::models::{Difficulty, Language, ReviewState, StudySession, Word};
use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("word not found: {0}")]
    WordNotFound(i64),

    #[error("language not found: {0}")]
    LanguageNotFound(String),

    #[error("study session not found: {0}")]
    SessionNotFound(i64),

    #[error("study session {session_id} belongs to another learner")]
    SessionLearnerMismatch { session_id: i64 },

    #[error("study session {0} is already finished")]
    SessionFinished(i64),

    #[error("learner name must not be empty")]
    EmptyLearner,

    #[error("stored current date is not a valid timestamp: {0}")]
    InvalidCurrentDate(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl ToSql for Difficulty {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Difficulty {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

fn timestamp_from_sql(column: usize, secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or(rusqlite::Error::IntegralValueOutOfRange(column, secs))
}

/// Reads `id, term, translation, pronunciation, example_sentence, difficulty`
/// starting at column 0.
fn word_from_row(row: &Row<'_>) -> rusqlite::Result<(i64, Word)> {
    Ok((
        row.get(0)?,
        Word {
            term: row.get(1)?,
            translation: row.get(2)?,
            pronunciation: row.get(3)?,
            example_sentence: row.get(4)?,
            difficulty: row.get(5)?,
        },
    ))
}

/// Reads `word_id, mastery_level, correct_count, incorrect_count,
/// last_reviewed_at, next_review_at` starting at column `offset`.
fn review_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<ReviewState> {
    Ok(ReviewState {
        word_id: row.get(offset)?,
        mastery_level: row.get(offset + 1)?,
        correct_count: row.get(offset + 2)?,
        incorrect_count: row.get(offset + 3)?,
        last_reviewed_at: timestamp_from_sql(offset + 4, row.get(offset + 4)?)?,
        next_review_at: timestamp_from_sql(offset + 5, row.get(offset + 5)?)?,
    })
}

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<StudySession> {
    let ended_at = match row.get::<_, Option<i64>>(3)? {
        Some(secs) => Some(timestamp_from_sql(3, secs)?),
        None => None,
    };

    Ok(StudySession {
        id: row.get(0)?,
        learner: row.get(1)?,
        started_at: timestamp_from_sql(2, row.get(2)?)?,
        ended_at,
        words_practiced: row.get(4)?,
        correct_answers: row.get(5)?,
    })
}

/// Opens (or creates) the database file and makes sure all tables exist.
///
/// Sets the current date to now if it was not initialized before.
pub fn init_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    create_schema(&conn)?;
    info!("opened database at {}", path.display());
    Ok(conn)
}

/// Same schema as [`init_database`], kept in memory.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS languages (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS words (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            language_code TEXT NOT NULL,
            term TEXT NOT NULL,
            translation TEXT NOT NULL,
            pronunciation TEXT NOT NULL DEFAULT '',
            example_sentence TEXT NOT NULL DEFAULT '',
            difficulty TEXT NOT NULL DEFAULT 'beginner',
            created_at INTEGER NOT NULL,
            FOREIGN KEY (language_code) REFERENCES languages(code) ON DELETE CASCADE,
            UNIQUE(language_code, term)
        )",
        (),
    )?;

    // One row per (learner, word); created on the learner's first answer
    conn.execute(
        "CREATE TABLE IF NOT EXISTS review_states (
            learner TEXT NOT NULL,
            word_id INTEGER NOT NULL,
            mastery_level INTEGER NOT NULL DEFAULT 0,
            correct_count INTEGER NOT NULL DEFAULT 0,
            incorrect_count INTEGER NOT NULL DEFAULT 0,
            last_reviewed_at INTEGER NOT NULL,
            next_review_at INTEGER NOT NULL,
            PRIMARY KEY (learner, word_id),
            FOREIGN KEY (word_id) REFERENCES words(id) ON DELETE CASCADE
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS study_sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            learner TEXT NOT NULL,
            started_at INTEGER NOT NULL,
            ended_at INTEGER,
            words_practiced INTEGER NOT NULL DEFAULT 0,
            correct_answers INTEGER NOT NULL DEFAULT 0
        )",
        (),
    )?;

    // Clock state: days skipped with advance_day, and an optional pinned base date
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO app_state (key, value) VALUES ('day_offset', '0')",
        (),
    )?;

    Ok(())
}

fn get_app_state(key: &str, conn: &Connection) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM app_state WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

fn set_app_state(key: &str, value: &str, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT INTO app_state (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

fn get_day_offset(conn: &Connection) -> Result<i64> {
    match get_app_state("day_offset", conn)? {
        Some(value) => value
            .parse::<i64>()
            .map_err(|_| StoreError::InvalidCurrentDate(value)),
        None => Ok(0),
    }
}

/// Retrieves the current date: the wall clock (or the pinned date, if one is
/// set) plus the days skipped with [`advance_day`]. Truncated to whole seconds.
pub fn get_current_date(conn: &Connection) -> Result<DateTime<Utc>> {
    let base = match get_app_state("pinned_date", conn)? {
        Some(value) => value
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or(StoreError::InvalidCurrentDate(value))?,
        None => {
            let secs = Utc::now().timestamp();
            DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| StoreError::InvalidCurrentDate(secs.to_string()))?
        }
    };

    let offset = get_day_offset(conn)?;
    Ok(base + Duration::days(offset))
}

/// Pins the current date to `date`, stopping it from following the wall clock,
/// and clears skipped days.
pub fn set_current_date(date: DateTime<Utc>, conn: &Connection) -> Result<()> {
    set_app_state("pinned_date", &date.timestamp().to_string(), conn)?;
    set_app_state("day_offset", "0", conn)?;
    Ok(())
}

/// Moves the current date one day forward (for exercising due dates)
pub fn advance_day(conn: &Connection) -> Result<DateTime<Utc>> {
    let offset = get_day_offset(conn)? + 1;
    set_app_state("day_offset", &offset.to_string(), conn)?;

    let today = get_current_date(conn)?;
    info!("current date advanced to {}", today.format("%Y-%m-%d"));
    Ok(today)
}

/// Creates a language, or renames it when the code already exists
pub fn add_language(code: &str, name: &str, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT INTO languages (code, name) VALUES (?1, ?2)
         ON CONFLICT(code) DO UPDATE SET name = excluded.name",
        params![code, name],
    )?;
    info!("language '{}' ({}) saved", name, code);
    Ok(())
}

/// Retrieves all languages without their words
pub fn get_languages(conn: &Connection) -> Result<Vec<Language>> {
    let mut stmt = conn.prepare("SELECT code, name FROM languages ORDER BY code")?;
    let languages = stmt
        .query_map([], |row| {
            Ok(Language {
                code: row.get(0)?,
                name: row.get(1)?,
                words: Vec::new(),
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(languages)
}

/// Loads one language with all of its words in word list order
pub fn load_language(code: &str, conn: &Connection) -> Result<Language> {
    let name: String = conn
        .query_row(
            "SELECT name FROM languages WHERE code = ?1",
            params![code],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| StoreError::LanguageNotFound(code.to_string()))?;

    let mut stmt = conn.prepare(
        "SELECT id, term, translation, pronunciation, example_sentence, difficulty
         FROM words WHERE language_code = ?1",
    )?;
    let mut words = stmt
        .query_map(params![code], word_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    words.sort_by(|a, b| a.1.canonical_cmp(&b.1).then(a.0.cmp(&b.0)));

    Ok(Language {
        code: code.to_string(),
        name,
        words: words.into_iter().map(|(_, word)| word).collect(),
    })
}

/// Adds a word to a language and returns its ID.
///
/// If a word with the same term already exists in the language it is left
/// unchanged and its ID is returned.
pub fn add_word(language_code: &str, word: &Word, conn: &Connection) -> Result<i64> {
    let language_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM languages WHERE code = ?1)",
        params![language_code],
        |row| row.get(0),
    )?;
    if !language_exists {
        return Err(StoreError::LanguageNotFound(language_code.to_string()));
    }

    let created_at = get_current_date(conn)?.timestamp();
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO words
            (language_code, term, translation, pronunciation, example_sentence, difficulty, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            language_code,
            word.term,
            word.translation,
            word.pronunciation,
            word.example_sentence,
            word.difficulty,
            created_at
        ],
    )?;
    if inserted == 0 {
        warn!(
            "word '{}' already exists in '{}', keeping the stored entry",
            word.term, language_code
        );
    }

    let word_id: i64 = conn.query_row(
        "SELECT id FROM words WHERE language_code = ?1 AND term = ?2",
        params![language_code, word.term],
        |row| row.get(0),
    )?;

    Ok(word_id)
}

pub fn get_word(word_id: i64, conn: &Connection) -> Result<Word> {
    conn.query_row(
        "SELECT id, term, translation, pronunciation, example_sentence, difficulty
         FROM words WHERE id = ?1",
        params![word_id],
        word_from_row,
    )
    .optional()?
    .map(|(_, word)| word)
    .ok_or(StoreError::WordNotFound(word_id))
}

/// Retrieves all words, optionally restricted to one difficulty, in word list order
///
/// Returns vector of (word_id, Word) tuples
pub fn get_words(difficulty: Option<Difficulty>, conn: &Connection) -> Result<Vec<(i64, Word)>> {
    let mut stmt = conn.prepare(
        "SELECT id, term, translation, pronunciation, example_sentence, difficulty
         FROM words WHERE ?1 IS NULL OR difficulty = ?1",
    )?;

    let mut words = stmt
        .query_map(params![difficulty], word_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    words.sort_by(|a, b| a.1.canonical_cmp(&b.1).then(a.0.cmp(&b.0)));

    Ok(words)
}

pub fn delete_word(word_id: i64, conn: &Connection) -> Result<()> {
    let deleted = conn.execute("DELETE FROM words WHERE id = ?1", params![word_id])?;
    if deleted == 0 {
        return Err(StoreError::WordNotFound(word_id));
    }
    Ok(())
}

/// Retrieves the learner's review state for a word, if the learner has answered it before
pub fn get_review_state(
    learner: &str,
    word_id: i64,
    conn: &Connection,
) -> Result<Option<ReviewState>> {
    let state = conn
        .query_row(
            "SELECT word_id, mastery_level, correct_count, incorrect_count, last_reviewed_at, next_review_at
             FROM review_states WHERE learner = ?1 AND word_id = ?2",
            params![learner, word_id],
            |row| review_from_row(row, 0),
        )
        .optional()?;
    Ok(state)
}

/// Inserts or overwrites the learner's review state for a word
pub fn save_review_state(learner: &str, state: &ReviewState, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT INTO review_states
            (learner, word_id, mastery_level, correct_count, incorrect_count, last_reviewed_at, next_review_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(learner, word_id) DO UPDATE SET
            mastery_level = excluded.mastery_level,
            correct_count = excluded.correct_count,
            incorrect_count = excluded.incorrect_count,
            last_reviewed_at = excluded.last_reviewed_at,
            next_review_at = excluded.next_review_at",
        params![
            learner,
            state.word_id,
            state.mastery_level,
            state.correct_count,
            state.incorrect_count,
            state.last_reviewed_at.timestamp(),
            state.next_review_at.timestamp()
        ],
    )?;
    Ok(())
}

/// Retrieves every review state of a learner, earliest due first
pub fn get_review_states(learner: &str, conn: &Connection) -> Result<Vec<ReviewState>> {
    let mut stmt = conn.prepare(
        "SELECT word_id, mastery_level, correct_count, incorrect_count, last_reviewed_at, next_review_at
         FROM review_states WHERE learner = ?1
         ORDER BY next_review_at ASC, word_id ASC",
    )?;
    let states = stmt
        .query_map(params![learner], |row| review_from_row(row, 0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(states)
}

/// Retrieves words due for review for a learner
///
/// Returns words where next_review_at <= now, ordered by next_review_at
/// (oldest first), at most `limit` of them.
pub fn get_due_words(
    learner: &str,
    now: DateTime<Utc>,
    limit: usize,
    conn: &Connection,
) -> Result<Vec<(i64, Word, ReviewState)>> {
    let mut stmt = conn.prepare(
        "SELECT w.id, w.term, w.translation, w.pronunciation, w.example_sentence, w.difficulty,
                r.word_id, r.mastery_level, r.correct_count, r.incorrect_count, r.last_reviewed_at, r.next_review_at
         FROM words w
         JOIN review_states r ON w.id = r.word_id
         WHERE r.learner = ?1 AND r.next_review_at <= ?2
         ORDER BY r.next_review_at ASC, w.id ASC
         LIMIT ?3",
    )?;

    let due = stmt
        .query_map(params![learner, now.timestamp(), limit as i64], |row| {
            let (id, word) = word_from_row(row)?;
            Ok((id, word, review_from_row(row, 6)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(due)
}

/// Retrieves words the learner has never answered, in word list order
pub fn get_unseen_words(learner: &str, conn: &Connection) -> Result<Vec<(i64, Word)>> {
    let mut stmt = conn.prepare(
        "SELECT w.id, w.term, w.translation, w.pronunciation, w.example_sentence, w.difficulty
         FROM words w
         WHERE NOT EXISTS (
            SELECT 1 FROM review_states r WHERE r.learner = ?1 AND r.word_id = w.id
         )",
    )?;

    let mut words = stmt
        .query_map(params![learner], word_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    words.sort_by(|a, b| a.1.canonical_cmp(&b.1).then(a.0.cmp(&b.0)));

    Ok(words)
}

/// Starts a new study session for a learner
pub fn create_study_session(
    learner: &str,
    started_at: DateTime<Utc>,
    conn: &Connection,
) -> Result<StudySession> {
    conn.execute(
        "INSERT INTO study_sessions (learner, started_at) VALUES (?1, ?2)",
        params![learner, started_at.timestamp()],
    )?;
    let id = conn.last_insert_rowid();
    info!("study session {} started for '{}'", id, learner);
    Ok(StudySession::new(id, learner, started_at))
}

pub fn get_study_session(session_id: i64, conn: &Connection) -> Result<StudySession> {
    conn.query_row(
        "SELECT id, learner, started_at, ended_at, words_practiced, correct_answers
         FROM study_sessions WHERE id = ?1",
        params![session_id],
        session_from_row,
    )
    .optional()?
    .ok_or(StoreError::SessionNotFound(session_id))
}

/// Writes the session counters and end time back to the database
pub fn update_study_session(session: &StudySession, conn: &Connection) -> Result<()> {
    let updated = conn.execute(
        "UPDATE study_sessions
         SET ended_at = ?1, words_practiced = ?2, correct_answers = ?3
         WHERE id = ?4",
        params![
            session.ended_at.map(|t| t.timestamp()),
            session.words_practiced,
            session.correct_answers,
            session.id
        ],
    )?;
    if updated == 0 {
        return Err(StoreError::SessionNotFound(session.id));
    }
    Ok(())
}

/// Retrieves the learner's most recent study sessions, newest first
pub fn get_recent_sessions(
    learner: &str,
    limit: usize,
    conn: &Connection,
) -> Result<Vec<StudySession>> {
    let mut stmt = conn.prepare(
        "SELECT id, learner, started_at, ended_at, words_practiced, correct_answers
         FROM study_sessions WHERE learner = ?1
         ORDER BY started_at DESC, id DESC
         LIMIT ?2",
    )?;
    let sessions = stmt
        .query_map(params![learner, limit as i64], session_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn today() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 7, 0, 0).unwrap()
    }

    fn setup() -> Connection {
        let conn = open_in_memory().unwrap();
        set_current_date(today(), &conn).unwrap();
        add_language("pl", "Polish", &conn).unwrap();
        conn
    }

    #[test]
    fn test_current_date_roundtrip_and_advance() {
        let conn = setup();
        assert_eq!(get_current_date(&conn).unwrap(), today());

        let next = advance_day(&conn).unwrap();
        assert_eq!(next, today() + Duration::days(1));
        assert_eq!(get_current_date(&conn).unwrap(), next);
    }

    #[test]
    fn test_corrupted_current_date() {
        let conn = setup();
        conn.execute(
            "UPDATE app_state SET value = 'yesterday' WHERE key = 'pinned_date'",
            [],
        )
        .unwrap();

        assert!(matches!(
            get_current_date(&conn),
            Err(StoreError::InvalidCurrentDate(_))
        ));
    }

    #[test]
    fn test_current_date_follows_wall_clock() {
        let conn = open_in_memory().unwrap();

        let before = Utc::now() - Duration::seconds(1);
        let current = get_current_date(&conn).unwrap();
        assert!(current >= before);
        assert!(current <= Utc::now());

        let advanced = advance_day(&conn).unwrap();
        assert!(advanced >= before + Duration::days(1));
        assert!(advanced <= Utc::now() + Duration::days(1));
    }

    #[test]
    fn test_pinning_date_resets_skipped_days() {
        let conn = setup();
        advance_day(&conn).unwrap();
        advance_day(&conn).unwrap();

        set_current_date(today(), &conn).unwrap();
        assert_eq!(get_current_date(&conn).unwrap(), today());
    }

    #[test]
    fn test_add_word_is_idempotent_per_term() {
        let conn = setup();
        let first = add_word("pl", &Word::new("kot", "cat"), &conn).unwrap();
        let second = add_word("pl", &Word::new("kot", "kitty"), &conn).unwrap();

        assert_eq!(first, second);
        assert_eq!(get_word(first, &conn).unwrap().translation, "cat");
    }

    #[test]
    fn test_add_word_to_missing_language() {
        let conn = setup();
        let result = add_word("de", &Word::new("Katze", "cat"), &conn);
        assert!(matches!(result, Err(StoreError::LanguageNotFound(code)) if code == "de"));
    }

    #[test]
    fn test_get_word_missing() {
        let conn = setup();
        assert!(matches!(get_word(42, &conn), Err(StoreError::WordNotFound(42))));
    }

    #[test]
    fn test_get_words_filters_and_orders() {
        let conn = setup();
        add_word("pl", &Word::new("zamek", "castle").with_difficulty(Difficulty::Advanced), &conn)
            .unwrap();
        add_word("pl", &Word::new("pies", "dog"), &conn).unwrap();
        add_word("pl", &Word::new("kot", "cat"), &conn).unwrap();

        let all: Vec<_> = get_words(None, &conn)
            .unwrap()
            .into_iter()
            .map(|(_, w)| w.term)
            .collect();
        assert_eq!(all, vec!["kot", "pies", "zamek"]);

        let advanced = get_words(Some(Difficulty::Advanced), &conn).unwrap();
        assert_eq!(advanced.len(), 1);
        assert_eq!(advanced[0].1.difficulty, Difficulty::Advanced);
    }

    #[test]
    fn test_load_language_with_words() {
        let conn = setup();
        add_word("pl", &Word::new("pies", "dog").with_example("Pies szczeka."), &conn).unwrap();

        let language = load_language("pl", &conn).unwrap();
        assert_eq!(language.name, "Polish");
        assert_eq!(language.words.len(), 1);
        assert_eq!(language.words[0].example_sentence, "Pies szczeka.");

        assert!(matches!(
            load_language("xx", &conn),
            Err(StoreError::LanguageNotFound(_))
        ));
    }

    #[test]
    fn test_review_state_upsert() {
        let conn = setup();
        let id = add_word("pl", &Word::new("kot", "cat"), &conn).unwrap();
        assert_eq!(get_review_state("ola", id, &conn).unwrap(), None);

        let mut state = ReviewState::fresh(id, today());
        save_review_state("ola", &state, &conn).unwrap();

        state.mastery_level = 3;
        state.correct_count = 4;
        state.next_review_at = today() + Duration::days(14);
        save_review_state("ola", &state, &conn).unwrap();

        assert_eq!(get_review_state("ola", id, &conn).unwrap(), Some(state));
        assert_eq!(get_review_state("jan", id, &conn).unwrap(), None);
        assert_eq!(get_review_states("ola", &conn).unwrap().len(), 1);
    }

    #[test]
    fn test_due_words_respect_date_order_and_limit() {
        let conn = setup();
        for (term, offset) in [("a", 0), ("b", -3), ("c", 2), ("d", -1)] {
            let id = add_word("pl", &Word::new(term, term), &conn).unwrap();
            let mut state = ReviewState::fresh(id, today());
            state.next_review_at = today() + Duration::days(offset);
            save_review_state("ola", &state, &conn).unwrap();
        }

        let due: Vec<_> = get_due_words("ola", today(), 10, &conn)
            .unwrap()
            .into_iter()
            .map(|(_, w, _)| w.term)
            .collect();
        assert_eq!(due, vec!["b", "d", "a"]);

        let capped = get_due_words("ola", today(), 2, &conn).unwrap();
        assert_eq!(capped.len(), 2);

        assert!(get_due_words("jan", today(), 10, &conn).unwrap().is_empty());
    }

    #[test]
    fn test_unseen_words_exclude_answered_ones() {
        let conn = setup();
        let kot = add_word("pl", &Word::new("kot", "cat"), &conn).unwrap();
        add_word("pl", &Word::new("pies", "dog"), &conn).unwrap();
        save_review_state("ola", &ReviewState::fresh(kot, today()), &conn).unwrap();

        let unseen = get_unseen_words("ola", &conn).unwrap();
        assert_eq!(unseen.len(), 1);
        assert_eq!(unseen[0].1.term, "pies");

        assert_eq!(get_unseen_words("jan", &conn).unwrap().len(), 2);
    }

    #[test]
    fn test_deleting_word_removes_review_states() {
        let conn = setup();
        let id = add_word("pl", &Word::new("kot", "cat"), &conn).unwrap();
        save_review_state("ola", &ReviewState::fresh(id, today()), &conn).unwrap();

        delete_word(id, &conn).unwrap();

        assert!(get_review_states("ola", &conn).unwrap().is_empty());
        assert!(matches!(delete_word(id, &conn), Err(StoreError::WordNotFound(_))));
    }

    #[test]
    fn test_study_session_lifecycle() {
        let conn = setup();
        let mut session = create_study_session("ola", today(), &conn).unwrap();
        session.record(true);
        session.record(false);
        session.finish(today() + Duration::minutes(5));
        update_study_session(&session, &conn).unwrap();

        let stored = get_study_session(session.id, &conn).unwrap();
        assert_eq!(stored, session);
        assert_eq!(stored.accuracy(), 50);

        assert!(matches!(
            get_study_session(999, &conn),
            Err(StoreError::SessionNotFound(999))
        ));
    }

    #[test]
    fn test_recent_sessions_newest_first() {
        let conn = setup();
        for hour in 0..3 {
            create_study_session("ola", today() + Duration::hours(hour), &conn).unwrap();
        }
        create_study_session("jan", today(), &conn).unwrap();

        let sessions = get_recent_sessions("ola", 2, &conn).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].started_at, today() + Duration::hours(2));
        assert!(sessions.iter().all(|s| s.learner == "ola"));
    }

    #[test]
    fn test_init_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.sqlite3");

        {
            let conn = init_database(&path).unwrap();
            add_language("pl", "Polish", &conn).unwrap();
        }

        let conn = init_database(&path).unwrap();
        assert_eq!(get_languages(&conn).unwrap().len(), 1);
    }
}
