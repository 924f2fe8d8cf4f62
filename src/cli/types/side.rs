//! The sides a picker can take against the spread and the total.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a spread pick.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SpreadSide {
    Home,
    Away,
}

impl SpreadSide {
    /// Lenient parse used at every read boundary: accepts `home`/`away`
    /// and `h`/`a`, any case, surrounding whitespace ignored.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "home" | "h" => Some(SpreadSide::Home),
            "away" | "a" => Some(SpreadSide::Away),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpreadSide::Home => "home",
            SpreadSide::Away => "away",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpreadSide::Home => "Home",
            SpreadSide::Away => "Away",
        }
    }
}

impl fmt::Display for SpreadSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Side of a total pick.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TotalSide {
    Over,
    Under,
}

impl TotalSide {
    /// Lenient parse: accepts `over`/`under` and `o`/`u`, any case.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "over" | "o" => Some(TotalSide::Over),
            "under" | "u" => Some(TotalSide::Under),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TotalSide::Over => "over",
            TotalSide::Under => "under",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TotalSide::Over => "Over",
            TotalSide::Under => "Under",
        }
    }
}

impl fmt::Display for TotalSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single button press: one dimension and the side chosen in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Spread(SpreadSide),
    Total(TotalSide),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Spread(side) => write!(f, "spread {side}"),
            Selection::Total(side) => write!(f, "total {side}"),
        }
    }
}
