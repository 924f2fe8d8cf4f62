//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use types::{PickerId, Season, SpreadSide, TotalSide, Week};

/// Where to read the weekly odds schedule from.
#[derive(Debug, Clone, Args)]
pub struct ScheduleSource {
    /// Schedule CSV URL or path, tried in order (repeatable). Falls back to
    /// `PICK_DUEL_SCHEDULE`, then the bundled default paths.
    #[clap(long = "source", short = 'S')]
    pub sources: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum PicksCmd {
    /// Show stored picks for both pickers (or one).
    List {
        #[clap(long, short, value_enum)]
        picker: Option<PickerId>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,

        /// Show the stored rows as saved, with their update times.
        #[clap(long)]
        raw: bool,
    },

    /// Remove every stored pick for a picker.
    Clear {
        #[clap(long, short, value_enum)]
        picker: PickerId,
    },

    /// Import picks from a submission body (file or stdin).
    ///
    /// Accepts a fenced ```json block or bare JSON in either the
    /// game-centric or the picker-centric shape. Each picker's stored picks
    /// are replaced by the imported ones.
    Import {
        /// File holding the submission text; reads stdin when omitted.
        #[clap(long, short)]
        file: Option<PathBuf>,

        #[clap(flatten)]
        schedule: ScheduleSource,

        /// Print what would be stored without saving.
        #[clap(long)]
        dry_run: bool,
    },

    /// Write the flat picks CSV for the current schedule.
    Export {
        #[clap(flatten)]
        schedule: ScheduleSource,

        /// Output path; prints to stdout when omitted.
        #[clap(long, short)]
        out: Option<PathBuf>,

        /// History CSV to add this week's games to. Games already recorded
        /// (same season, week and game_id) are left as they are.
        #[clap(long)]
        history: Option<PathBuf>,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "pick-duel",
    version,
    about = "Weekly NFL ATS and O/U picks for two players"
)]
pub struct PickDuel {
    /// Log debug diagnostics to stderr.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show this week's consensus games with both pickers' picks.
    Schedule {
        #[clap(flatten)]
        schedule: ScheduleSource,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Toggle one pick: choosing the side already held clears it.
    Pick {
        #[clap(long, short, value_enum)]
        picker: PickerId,

        /// Game key (`Away@Home_kickoff`) or its 1-based position in the schedule.
        #[clap(long, short)]
        game: String,

        #[clap(long, value_enum, conflicts_with = "total", required_unless_present = "total")]
        spread: Option<SpreadSide>,

        #[clap(long, value_enum)]
        total: Option<TotalSide>,

        #[clap(flatten)]
        schedule: ScheduleSource,
    },

    /// Inspect, reset, import or export stored picks.
    Picks {
        #[clap(subcommand)]
        cmd: PicksCmd,
    },

    /// Join a picks CSV with a scores CSV on `game_id`.
    Combine {
        #[clap(long)]
        picks: PathBuf,

        #[clap(long)]
        scores: PathBuf,

        #[clap(long, short)]
        out: PathBuf,

        /// Overwrite the `season` column.
        #[clap(long, short)]
        season: Option<Season>,

        /// Overwrite the `week` column.
        #[clap(long, short)]
        week: Option<Week>,
    },

    /// Week-by-week ATS and O/U records from final results files.
    Record {
        /// Final results CSVs (scores plus embedded picks).
        #[clap(long, short, required = true, num_args = 1..)]
        results: Vec<PathBuf>,

        /// Only this picker.
        #[clap(long, short, value_enum)]
        picker: Option<PickerId>,

        /// Season to grade; defaults to the latest season in the results.
        #[clap(long, short)]
        season: Option<Season>,

        /// Add a season total row above the weeks.
        #[clap(long)]
        season_row: bool,

        /// Output results as JSON instead of a table.
        #[clap(long)]
        json: bool,
    },

    /// Write per-team and per-side breakdown CSVs from final results files.
    Insights {
        #[clap(long, short, required = true, num_args = 1..)]
        results: Vec<PathBuf>,

        #[clap(long)]
        out_dir: PathBuf,

        /// Season to break down; defaults to the latest season in the results.
        #[clap(long, short)]
        season: Option<Season>,
    },
}
