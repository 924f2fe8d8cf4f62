//! Season and week types, including schedule-week translation and week labels.

use crate::error::{PickError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Last regular-season week.
pub const REGULAR_SEASON_WEEKS: u16 = 18;

/// Highest week index the tracker knows about (Super Bowl).
pub const LAST_POSTSEASON_WEEK: u16 = 22;

/// Raw schedule week that corresponds to NFL Week 1.
const ISO_WEEK_OF_WEEK_ONE: i32 = 36;

/// Type-safe wrapper for Season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(2025)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = PickError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| PickError::InvalidSeason {
                value: s.to_string(),
            })
    }
}

/// Type-safe wrapper for NFL week numbers.
///
/// Weeks 1-18 are the regular season; 19-22 are Wild Card, Divisional,
/// Conference and Super Bowl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Translate a raw schedule week into an NFL week.
    ///
    /// Raw values 1..=22 are already NFL weeks. Larger values are ISO
    /// weeks of the year, where ISO week 36 is NFL Week 1 and the count
    /// wraps every 18 weeks.
    ///
    /// ```rust
    /// use pick_duel::Week;
    ///
    /// assert_eq!(Week::from_schedule_week(5), Some(Week::new(5)));
    /// assert_eq!(Week::from_schedule_week(36), Some(Week::new(1)));
    /// assert_eq!(Week::from_schedule_week(40), Some(Week::new(5)));
    /// assert_eq!(Week::from_schedule_week(0), None);
    /// ```
    pub fn from_schedule_week(raw: u16) -> Option<Week> {
        match raw {
            0 => None,
            1..=LAST_POSTSEASON_WEEK => Some(Week(raw)),
            _ => {
                let offset = (i32::from(raw) - ISO_WEEK_OF_WEEK_ONE)
                    .rem_euclid(i32::from(REGULAR_SEASON_WEEKS));
                Some(Week(offset as u16 + 1))
            }
        }
    }

    pub fn is_postseason(&self) -> bool {
        self.0 > REGULAR_SEASON_WEEKS
    }

    /// Display label: `Week N`, or `WC`/`DIV`/`CONF`/`SB` for 19-22.
    pub fn label(&self) -> String {
        match self.0 {
            19 => "WC".to_string(),
            20 => "DIV".to_string(),
            21 => "CONF".to_string(),
            22 => "SB".to_string(),
            n => format!("Week {n}"),
        }
    }
}

impl Default for Week {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = PickError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| PickError::InvalidWeek {
                value: s.to_string(),
            })
    }
}
