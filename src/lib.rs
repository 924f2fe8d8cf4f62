//! Pick Duel Library
//!
//! Tracks two players' weekly NFL picks against the spread (ATS) and on the
//! over/under (O/U), and grades them against final scores.
//!
//! ## Features
//!
//! - **Schedule**: consensus-line selection from an odds CSV, one entry per game
//! - **Picks**: a toggleable two-slot pick (spread side, total side) per game per picker
//! - **Grading**: win/loss/push tallies by week and season, plus team and side breakdowns
//! - **Storage**: picks persisted locally behind a small key-value interface
//! - **Export**: the flat weekly picks CSV and the picks + scores join
//!
//! ## Quick Start
//!
//! ```rust
//! use pick_duel::{
//!     core::CsvTable,
//!     grading::grade,
//!     report::format_tally,
//!     PickerId, Week,
//! };
//!
//! let results = CsvTable::parse(
//!     "season,week,home_score,away_score,spread_home,total,mat_spread,mat_total\n\
//!      2025,5,24,20,-3.5,47.5,home,over",
//! );
//! let records: Vec<_> = results.records().collect();
//! let report = grade(&records, PickerId::Mat);
//!
//! let week5 = report.week(Week::new(5)).unwrap();
//! assert_eq!(format_tally(&week5.ats), "1-0");
//! assert_eq!(format_tally(&week5.ou), "0-1");
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export PICK_DUEL_DB=~/picks.db
//! export PICK_DUEL_SCHEDULE=https://example.com/latest.csv,data/weekly/latest.csv
//! export PICK_DUEL_TIMEOUT_SECS=10
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod export;
pub mod grading;
pub mod logging;
pub mod picks;
pub mod report;
pub mod schedule;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{PickerId, Season, Selection, SpreadSide, TotalSide, Week};
pub use error::{PickError, Result};
pub use picks::{Pick, PickBook, PickStore};
pub use schedule::{Game, GameKey, Schedule};

/// Environment variable for the picks database path
pub const DB_ENV_VAR: &str = "PICK_DUEL_DB";

/// Environment variable for the default schedule sources (comma separated)
pub const SCHEDULE_ENV_VAR: &str = "PICK_DUEL_SCHEDULE";

/// Environment variable for the per-source fetch timeout in seconds
pub const TIMEOUT_ENV_VAR: &str = "PICK_DUEL_TIMEOUT_SECS";
