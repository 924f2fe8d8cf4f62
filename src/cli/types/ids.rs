//! Picker identities.

use crate::error::{PickError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two fixed participants whose picks are tracked.
///
/// The tracker is built around exactly two pickers; there is no dynamic
/// participant list.
///
/// # Examples
///
/// ```rust
/// use pick_duel::PickerId;
///
/// let picker: PickerId = "Nikki".parse().unwrap();
/// assert_eq!(picker, PickerId::Nikki);
/// assert_eq!(picker.storage_key(), "picks_nikki");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PickerId {
    Mat,
    Nikki,
}

impl PickerId {
    /// Both pickers, in display order.
    pub const ALL: [PickerId; 2] = [PickerId::Mat, PickerId::Nikki];

    /// Lowercase name used in column prefixes and JSON keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            PickerId::Mat => "mat",
            PickerId::Nikki => "nikki",
        }
    }

    /// Display name used in tables and breakdown files.
    pub fn label(&self) -> &'static str {
        match self {
            PickerId::Mat => "Mat",
            PickerId::Nikki => "Nikki",
        }
    }

    /// Key under which this picker's mapping is persisted.
    pub fn storage_key(&self) -> String {
        format!("picks_{}", self.as_str())
    }

    /// Results column holding this picker's spread side (`mat_spread`).
    pub fn spread_column(&self) -> String {
        format!("{}_spread", self.as_str())
    }

    /// Results column holding this picker's total side (`mat_total`).
    pub fn total_column(&self) -> String {
        format!("{}_total", self.as_str())
    }
}

impl fmt::Display for PickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PickerId {
    type Err = PickError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mat" => Ok(PickerId::Mat),
            "nikki" => Ok(PickerId::Nikki),
            _ => Err(PickError::InvalidPicker {
                name: s.to_string(),
            }),
        }
    }
}
