//! Error types for the pick-duel tracker

use thiserror::Error;


pub type Result<T> = std::result::Result<T, PickError>;

/// One failed attempt while fetching a CSV source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    pub source: String,
    pub reason: String,
}

impl std::fmt::Display for FailedAttempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.source, self.reason)
    }
}

fn list_attempts(attempts: &[FailedAttempt]) -> String {
    if attempts.is_empty() {
        return "no candidates configured".to_string();
    }
    attempts
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum PickError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No CSV source could be loaded: {}", list_attempts(.attempts))]
    SourceUnavailable { attempts: Vec<FailedAttempt> },

    #[error("Failed to save picks under '{key}': {message}")]
    SaveFailure { key: String, message: String },

    #[error("Unknown picker: {name} (expected 'mat' or 'nikki')")]
    InvalidPicker { name: String },

    #[error("Exactly one of --spread or --total is required")]
    SelectionRequired,

    #[error("Invalid week: {value}")]
    InvalidWeek { value: String },

    #[error("Invalid season: {value}")]
    InvalidSeason { value: String },

    #[error("Game not found: {key}")]
    GameNotFound { key: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Required column missing: {column}")]
    MissingColumn { column: String },

    #[error("No picks JSON found in input")]
    NoPicksJson,
}

impl From<anyhow::Error> for PickError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<rusqlite::Error>() {
            Ok(db) => PickError::Database(db),
            Err(other) => PickError::Storage {
                message: other.to_string(),
            },
        }
    }
}
