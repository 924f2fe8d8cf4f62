//! Schedule model: games derived from odds rows, consensus selection and
//! kickoff ordering.
//!
//! Odds feeds carry one row per sportsbook per game plus, usually, a
//! consensus row. Only consensus rows are shown and graded; when a feed has
//! no consensus rows at all, every row is used instead.

pub mod key;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::{
    cli::types::Week,
    core::csv::{CsvTable, Record},
    error::{PickError, Result},
};

pub use key::{key_of, GameKey};

/// True when a row is a consensus line: `is_consensus` is `1`, or `book`
/// is `CONSENSUS` (case-insensitive). Either column may be absent.
pub fn is_consensus(record: &Record<'_>) -> bool {
    let flagged = record.has_column("is_consensus") && record.get("is_consensus").trim() == "1";
    let consensus_book = record.has_column("book")
        && record.get("book").trim().to_uppercase() == "CONSENSUS";
    flagged || consensus_book
}

/// Consensus rows of a table, or every row when none qualify.
pub fn select_consensus(table: &CsvTable) -> Vec<Record<'_>> {
    let all: Vec<Record<'_>> = table.records().collect();
    let consensus: Vec<Record<'_>> = all.iter().copied().filter(is_consensus).collect();

    if consensus.is_empty() {
        debug!(rows = all.len(), "no consensus rows, using every row");
        all
    } else {
        debug!(
            rows = all.len(),
            consensus = consensus.len(),
            "using consensus rows"
        );
        consensus
    }
}

/// One scheduled matchup with its betting lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    pub season: String,
    pub week: String,
    pub game_id: String,
    pub away_team: String,
    pub home_team: String,
    pub kickoff_utc: String,
    pub spread_home: String,
    pub total: String,
}

impl Game {
    pub fn from_record(record: &Record<'_>) -> Self {
        Self {
            season: record.get("season").trim().to_string(),
            week: record.get("week").trim().to_string(),
            game_id: record.get("game_id").trim().to_string(),
            away_team: record.get("away_team").to_string(),
            home_team: record.get("home_team").to_string(),
            kickoff_utc: record.get("commence_time_utc").to_string(),
            spread_home: record.get("spread_home").trim().to_string(),
            total: record.get("total").trim().to_string(),
        }
    }

    pub fn key(&self) -> GameKey {
        GameKey::new(&self.away_team, &self.home_team, &self.kickoff_utc)
    }

    /// `Away @ Home`
    pub fn title(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }

    pub fn kickoff(&self) -> Option<DateTime<Utc>> {
        key::kickoff_instant(&self.kickoff_utc)
    }

    pub fn spread_home_value(&self) -> Option<f64> {
        self.spread_home.parse().ok().filter(|v: &f64| v.is_finite())
    }

    pub fn total_value(&self) -> Option<f64> {
        self.total.parse().ok().filter(|v: &f64| v.is_finite())
    }

    /// NFL week after translating the raw schedule week.
    pub fn nfl_week(&self) -> Option<Week> {
        self.week
            .parse::<u16>()
            .ok()
            .and_then(Week::from_schedule_week)
    }
}

/// Signed display of a line: `+3.5`, `-7`, empty stays empty, anything
/// non-numeric is shown as-is.
pub fn format_signed(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    match raw.parse::<f64>() {
        Ok(v) if v > 0.0 => format!("+{v}"),
        Ok(v) => format!("{v}"),
        Err(_) => raw.to_string(),
    }
}

/// The games of one odds feed, one entry per game, in kickoff order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schedule {
    games: Vec<Game>,
}

impl Schedule {
    /// Consensus selection, then de-duplication by key (first row wins),
    /// then kickoff ordering. Unparsable kickoffs sort last by raw text.
    pub fn from_table(table: &CsvTable) -> Self {
        let mut seen = std::collections::HashSet::new();
        let mut games: Vec<Game> = select_consensus(table)
            .iter()
            .map(Game::from_record)
            .filter(|g| seen.insert(g.key()))
            .collect();

        games.sort_by_cached_key(|g| {
            let instant = g.kickoff();
            (instant.is_none(), instant, g.kickoff_utc.clone())
        });

        Self { games }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn find(&self, key: &GameKey) -> Option<&Game> {
        self.games.iter().find(|g| &g.key() == key)
    }

    /// Find a game whose canonical key matches the canonical form of `key`.
    pub fn find_canonical(&self, key: &GameKey) -> Option<&Game> {
        let wanted = key.canonical()?;
        self.games
            .iter()
            .find(|g| g.key().canonical().as_ref() == Some(&wanted))
    }

    /// Resolve a game reference: an exact key, a key in another timestamp
    /// format, or a 1-based position in kickoff order.
    pub fn resolve(&self, reference: &str) -> Result<&Game> {
        let reference = reference.trim();
        if let Ok(n) = reference.parse::<usize>() {
            if let Some(game) = n.checked_sub(1).and_then(|i| self.games.get(i)) {
                return Ok(game);
            }
        }

        let key = GameKey::from(reference);
        self.find(&key)
            .or_else(|| self.find_canonical(&key))
            .ok_or_else(|| PickError::GameNotFound {
                key: reference.to_string(),
            })
    }

    /// Header label such as `2025 • Week 5`, taken from the first game.
    pub fn label(&self) -> Option<String> {
        let first = self.games.first()?;
        let week = first.nfl_week()?;
        Some(format!("{} • Week {}", first.season, week))
    }
}
