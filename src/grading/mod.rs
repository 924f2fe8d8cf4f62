//! Grading of picks against final scores.
//!
//! Each graded row contributes at most one outcome per dimension (ATS and
//! O/U) to both its week and the season, so the season record is always the
//! sum of the weekly records. Rows that cannot be graded (bad week, missing
//! score) are skipped and counted, never treated as losses.
//!
//! Multi-file grading is scoped to one season: rows whose `season` cell names
//! another year are skipped, so week 5 of one year never adds to week 5 of
//! the next.

pub mod breakdown;


use std::collections::BTreeMap;
use std::fmt;
use std::ops::AddAssign;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::{
    cli::types::{PickerId, Season, SpreadSide, TotalSide, Week},
    core::csv::{CsvTable, Record},
    picks::{Pick, PickBook},
    schedule::{key_of, select_consensus},
};

pub use breakdown::Breakdown;

/// Lines are quoted in half points; anything closer than this is a push.
pub const PUSH_TOLERANCE: f64 = 1e-9;

/// Result of one pick in one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Push,
}

impl Outcome {
    /// The outcome of taking the opposite side.
    pub fn inverted(self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Push => Outcome::Push,
        }
    }
}

/// Which side of the spread covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadResult {
    Covered(SpreadSide),
    Push,
}

/// Which side of the total hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalResult {
    Hit(TotalSide),
    Push,
}

/// Spread result from the home team's point of view:
/// `margin + spread_home` decides the cover.
pub fn spread_result(home_score: f64, away_score: f64, spread_home: f64) -> SpreadResult {
    let covered = (home_score - away_score) + spread_home;
    if covered.abs() < PUSH_TOLERANCE {
        SpreadResult::Push
    } else if covered > 0.0 {
        SpreadResult::Covered(SpreadSide::Home)
    } else {
        SpreadResult::Covered(SpreadSide::Away)
    }
}

pub fn total_result(home_score: f64, away_score: f64, total: f64) -> TotalResult {
    let diff = (home_score + away_score) - total;
    if diff.abs() < PUSH_TOLERANCE {
        TotalResult::Push
    } else if diff > 0.0 {
        TotalResult::Hit(TotalSide::Over)
    } else {
        TotalResult::Hit(TotalSide::Under)
    }
}

/// Grade one spread pick. A push is a push whichever side was taken.
pub fn grade_spread(home_score: f64, away_score: f64, spread_home: f64, side: SpreadSide) -> Outcome {
    match spread_result(home_score, away_score, spread_home) {
        SpreadResult::Push => Outcome::Push,
        SpreadResult::Covered(winner) if winner == side => Outcome::Win,
        SpreadResult::Covered(_) => Outcome::Loss,
    }
}

/// Grade one total pick.
pub fn grade_total(home_score: f64, away_score: f64, total: f64, side: TotalSide) -> Outcome {
    match total_result(home_score, away_score, total) {
        TotalResult::Push => Outcome::Push,
        TotalResult::Hit(winner) if winner == side => Outcome::Win,
        TotalResult::Hit(_) => Outcome::Loss,
    }
}

/// Win/loss/push counts. Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
}

impl Tally {
    pub fn new(wins: u32, losses: u32, pushes: u32) -> Self {
        Self {
            wins,
            losses,
            pushes,
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Push => self.pushes += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.pushes
    }

    pub fn is_empty(&self) -> bool {
        self.games() == 0
    }

    /// Wins as a percentage of all graded games, one decimal place.
    /// Pushes count as games. Zero when nothing was graded.
    pub fn win_pct(&self) -> f64 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }
        (1000.0 * f64::from(self.wins) / f64::from(games)).round() / 10.0
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Self) {
        self.wins += rhs.wins;
        self.losses += rhs.losses;
        self.pushes += rhs.pushes;
    }
}

/// One tally per dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DimensionTally {
    pub ats: Tally,
    pub ou: Tally,
}

impl AddAssign for DimensionTally {
    fn add_assign(&mut self, rhs: Self) {
        self.ats += rhs.ats;
        self.ou += rhs.ou;
    }
}

/// A picker's record by week plus the season total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GradeReport {
    pub by_week: BTreeMap<Week, DimensionTally>,
    pub season: DimensionTally,
}

impl GradeReport {
    pub fn week(&self, week: Week) -> Option<&DimensionTally> {
        self.by_week.get(&week)
    }

    /// Record one ATS outcome in `week` and the season together.
    pub fn record_ats(&mut self, week: Week, outcome: Outcome) {
        self.by_week.entry(week).or_default().ats.record(outcome);
        self.season.ats.record(outcome);
    }

    pub fn record_ou(&mut self, week: Week, outcome: Outcome) {
        self.by_week.entry(week).or_default().ou.record(outcome);
        self.season.ou.record(outcome);
    }

    /// Add another report's counts into this one.
    pub fn merge(&mut self, other: GradeReport) {
        for (week, tally) in other.by_week {
            *self.by_week.entry(week).or_default() += tally;
        }
        self.season += other.season;
    }
}

/// Why a row was left out of grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    InvalidWeek,
    MissingScore,
    OtherSeason,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidWeek => write!(f, "invalid week"),
            SkipReason::MissingScore => write!(f, "missing score"),
            SkipReason::OtherSeason => write!(f, "other season"),
        }
    }
}

/// Row accounting for one grading pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GradeSummary {
    /// Rows with a valid week and both scores.
    pub graded: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl GradeSummary {
    fn skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_default() += 1;
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn merge(&mut self, other: GradeSummary) {
        self.graded += other.graded;
        for (reason, count) in other.skipped {
            *self.skipped.entry(reason).or_default() += count;
        }
    }
}

impl fmt::Display for GradeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graded rows:   {}", self.graded)?;
        write!(f, "Skipped rows:  {}", self.total_skipped())?;
        if !self.skipped.is_empty() {
            let reasons = self
                .skipped
                .iter()
                .map(|(reason, count)| format!("{reason}: {count}"))
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "\nSkip reasons:  {reasons}")?;
        }
        Ok(())
    }
}

/// Season of a results row, `None` when the cell is blank or not a year.
pub fn row_season(record: &Record<'_>) -> Option<Season> {
    record.get_non_empty("season")?.parse().ok()
}

/// Consensus rows of `table` that belong to `season`, plus the number of
/// rows dropped for naming another season. Rows with no season are kept.
pub fn season_records(table: &CsvTable, season: Season) -> (Vec<Record<'_>>, usize) {
    let (kept, other): (Vec<_>, Vec<_>) = select_consensus(table)
        .into_iter()
        .partition(|r| row_season(r).map_or(true, |s| s == season));
    (kept, other.len())
}

/// Most recent season named by any row, used when none is requested.
pub fn latest_season(tables: &[CsvTable]) -> Option<Season> {
    tables
        .iter()
        .flat_map(|t| t.records())
        .filter_map(|r| row_season(&r))
        .max()
}

/// Week of a results row, after schedule-week translation. `None` for
/// blank, non-integer or zero weeks.
pub fn row_week(record: &Record<'_>) -> Option<Week> {
    record
        .get("week")
        .trim()
        .parse::<u16>()
        .ok()
        .and_then(Week::from_schedule_week)
}

/// Final scores of a row as `(home, away)`, when both are numeric.
pub fn final_scores(record: &Record<'_>) -> Option<(f64, f64)> {
    Some((record.get_f64("home_score")?, record.get_f64("away_score")?))
}

/// A picker's pick as embedded in a results row (`mat_spread`, `mat_total`).
pub fn embedded_pick(record: &Record<'_>, picker: PickerId) -> Pick {
    Pick::from_sides(
        Some(record.get(&picker.spread_column())),
        Some(record.get(&picker.total_column())),
    )
}

/// Grade rows with picks supplied by `pick_of`.
pub fn grade_records_with<F>(records: &[Record<'_>], pick_of: F) -> (GradeReport, GradeSummary)
where
    F: Fn(&Record<'_>) -> Pick,
{
    let mut report = GradeReport::default();
    let mut summary = GradeSummary::default();

    for record in records {
        let Some(week) = row_week(record) else {
            summary.skip(SkipReason::InvalidWeek);
            continue;
        };
        let Some((home, away)) = final_scores(record) else {
            summary.skip(SkipReason::MissingScore);
            continue;
        };
        summary.graded += 1;

        let pick = pick_of(record);
        if let (Some(side), Some(line)) = (pick.spread, record.get_f64("spread_home")) {
            report.record_ats(week, grade_spread(home, away, line, side));
        }
        if let (Some(side), Some(line)) = (pick.total, record.get_f64("total")) {
            report.record_ou(week, grade_total(home, away, line, side));
        }
    }

    debug!(
        graded = summary.graded,
        skipped = summary.total_skipped(),
        reasons = ?summary.skipped,
        "graded rows"
    );
    (report, summary)
}

/// Grade a picker using the picks embedded in each row.
pub fn grade(records: &[Record<'_>], picker: PickerId) -> GradeReport {
    grade_records_with(records, |r| embedded_pick(r, picker)).0
}

/// Grade a stored pick book against results rows, joining on the key
/// derived from each row.
pub fn grade_with_book(records: &[Record<'_>], book: &PickBook) -> GradeReport {
    grade_records_with(records, |r| book.get(&key_of(r)).copied().unwrap_or_default()).0
}

/// Grade one results table for `picker`. Consensus rows are used when the
/// table marks any.
pub fn grade_table(table: &CsvTable, picker: PickerId) -> (GradeReport, GradeSummary) {
    let records = select_consensus(table);
    grade_records_with(&records, |r| embedded_pick(r, picker))
}

fn grade_season_table<F>(table: &CsvTable, season: Season, pick_of: F) -> (GradeReport, GradeSummary)
where
    F: Fn(&Record<'_>) -> Pick,
{
    let (records, other_season) = season_records(table, season);
    let (report, mut summary) = grade_records_with(&records, pick_of);
    if other_season > 0 {
        summary.skipped.insert(SkipReason::OtherSeason, other_season);
    }
    (report, summary)
}

/// Row accounting for one season across several results tables. Counts do
/// not depend on the picker.
pub fn season_summary(tables: &[CsvTable], season: Season) -> GradeSummary {
    tables
        .par_iter()
        .map(|table| grade_season_table(table, season, |_| Pick::default()).1)
        .reduce(GradeSummary::default, |mut acc, other| {
            acc.merge(other);
            acc
        })
}

/// Grade one season across several results tables, in parallel, and merge
/// them. Rows from other seasons are skipped.
pub fn grade_tables(
    tables: &[CsvTable],
    picker: PickerId,
    season: Season,
) -> (GradeReport, GradeSummary) {
    tables
        .par_iter()
        .map(|table| grade_season_table(table, season, |r| embedded_pick(r, picker)))
        .reduce(
            || (GradeReport::default(), GradeSummary::default()),
            |(mut report, mut summary), (other_report, other_summary)| {
                report.merge(other_report);
                summary.merge(other_summary);
                (report, summary)
            },
        )
}
