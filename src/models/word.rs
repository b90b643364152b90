//! Word is a vocabulary entry: a term in the studied language and its translation.
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub term: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pronunciation: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub example_sentence: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Word {
    pub fn new(term: &str, translation: &str) -> Self {
        Self {
            term: term.to_string(),
            translation: translation.to_string(),
            pronunciation: String::new(),
            example_sentence: String::new(),
            difficulty: Difficulty::default(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_example(mut self, example: &str) -> Self {
        self.example_sentence = example.to_string();
        self
    }

    pub fn with_pronunciation(mut self, pronunciation: &str) -> Self {
        self.pronunciation = pronunciation.to_string();
        self
    }

    /// Word list order: easiest difficulty first, then alphabetical by term.
    pub fn canonical_cmp(&self, other: &Word) -> Ordering {
        self.difficulty
            .cmp(&other.difficulty)
            .then_with(|| self.term.cmp(&other.term))
    }
}
