//! Game identity.
//!
//! A game is identified by `"{away}@{home}_{kickoff}"`. The same key is
//! derived for schedule display, pick storage and grading; derivation uses
//! the CSV values verbatim so that every subsystem agrees byte for byte.

use std::borrow::Borrow;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::csv::Record;

/// Stable identifier of one scheduled matchup.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameKey(String);

impl GameKey {
    /// Build a key from its parts.
    ///
    /// ```rust
    /// use pick_duel::GameKey;
    ///
    /// let key = GameKey::new("Team B", "Team A", "2025-10-05T17:00:00Z");
    /// assert_eq!(key.as_str(), "Team B@Team A_2025-10-05T17:00:00Z");
    /// ```
    pub fn new(away: &str, home: &str, kickoff_utc: &str) -> Self {
        Self(format!("{away}@{home}_{kickoff_utc}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into `(away, home, kickoff)`. The kickoff starts after the last
    /// `_`, the away team ends at the first `@`.
    pub fn parts(&self) -> Option<(&str, &str, &str)> {
        let (teams, kickoff) = self.0.rsplit_once('_')?;
        let (away, home) = teams.split_once('@')?;
        Some((away, home, kickoff))
    }

    /// Key with trimmed team names and the kickoff rewritten as
    /// `YYYY-MM-DDTHH:MM:SS+00:00`. Used to match keys produced elsewhere.
    pub fn canonical(&self) -> Option<GameKey> {
        let (away, home, kickoff) = self.parts()?;
        let kickoff = canonical_kickoff(kickoff)?;
        Some(GameKey::new(away.trim(), home.trim(), &kickoff))
    }
}

impl fmt::Display for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GameKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GameKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Borrow<str> for GameKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Derive the key of the game a schedule or results row describes.
pub fn key_of(record: &Record<'_>) -> GameKey {
    GameKey::new(
        record.get("away_team"),
        record.get("home_team"),
        record.get("commence_time_utc"),
    )
}

/// Parse a kickoff timestamp into a UTC instant.
///
/// Accepts RFC 3339 (`Z` or numeric offsets), timestamps without seconds,
/// and offset-less timestamps, which are taken as UTC.
pub fn kickoff_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let with_offset = match raw.strip_suffix('Z') {
        Some(stripped) => format!("{stripped}+00:00"),
        None => raw.to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_str(&with_offset, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Rewrite a kickoff timestamp as `YYYY-MM-DDTHH:MM:SS+00:00`.
///
/// ```rust
/// use pick_duel::schedule::key::canonical_kickoff;
///
/// assert_eq!(
///     canonical_kickoff("2025-09-14T13:00-04:00").as_deref(),
///     Some("2025-09-14T17:00:00+00:00")
/// );
/// ```
pub fn canonical_kickoff(raw: &str) -> Option<String> {
    kickoff_instant(raw).map(|dt| dt.format("%Y-%m-%dT%H:%M:%S+00:00").to_string())
}
