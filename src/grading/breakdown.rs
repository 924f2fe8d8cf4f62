//! Per-picker breakdowns across a season of results: by team picked, by
//! team faded, by home/away side, by total side and by home team + total side.
//!
//! Picker and side cells are written with display labels (`Mat`, `Home`,
//! `Over`), the form the published metrics files use.

use std::collections::BTreeMap;

use rayon::prelude::*;

use super::{embedded_pick, final_scores, grade_spread, grade_total, season_records, Tally};
use crate::{
    cli::types::{PickerId, Season, SpreadSide, TotalSide},
    core::csv::{CsvTable, Record},
};

/// Output file name of each breakdown table.
pub const TEAM_ATS_FILE: &str = "team_ats_by_picker.csv";
pub const TEAM_FADE_FILE: &str = "team_fade_ats_by_picker.csv";
pub const HOME_AWAY_FILE: &str = "home_away_ats_by_picker.csv";
pub const TOTALS_FILE: &str = "totals_by_picker.csv";
pub const TEAM_TOTALS_FILE: &str = "team_totals_by_picker.csv";

const TALLY_COLUMNS: [&str; 5] = ["wins", "losses", "pushes", "games", "win_pct"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Breakdown {
    /// (team picked, picker)
    pub team_ats: BTreeMap<(String, PickerId), Tally>,
    /// (opponent of the team picked, picker), outcome inverted
    pub team_fade: BTreeMap<(String, PickerId), Tally>,
    pub home_away: BTreeMap<(PickerId, SpreadSide), Tally>,
    pub totals: BTreeMap<(PickerId, TotalSide), Tally>,
    /// (home team, picker, side); totals are not team specific so the home
    /// team anchors the row
    pub team_totals: BTreeMap<(String, PickerId, TotalSide), Tally>,
}

impl Breakdown {
    /// Accumulate every gradable pick in `records` for both pickers.
    pub fn add_records(&mut self, records: &[Record<'_>]) {
        for record in records {
            let Some((home, away)) = final_scores(record) else {
                continue;
            };
            let home_team = record.get("home_team").trim();
            let away_team = record.get("away_team").trim();

            for picker in PickerId::ALL {
                let pick = embedded_pick(record, picker);

                if let (Some(side), Some(line)) = (pick.spread, record.get_f64("spread_home")) {
                    let outcome = grade_spread(home, away, line, side);
                    let (team, opponent) = match side {
                        SpreadSide::Home => (home_team, away_team),
                        SpreadSide::Away => (away_team, home_team),
                    };
                    self.team_ats
                        .entry((team.to_string(), picker))
                        .or_default()
                        .record(outcome);
                    self.team_fade
                        .entry((opponent.to_string(), picker))
                        .or_default()
                        .record(outcome.inverted());
                    self.home_away
                        .entry((picker, side))
                        .or_default()
                        .record(outcome);
                }

                if let (Some(side), Some(line)) = (pick.total, record.get_f64("total")) {
                    let outcome = grade_total(home, away, line, side);
                    self.totals.entry((picker, side)).or_default().record(outcome);
                    self.team_totals
                        .entry((home_team.to_string(), picker, side))
                        .or_default()
                        .record(outcome);
                }
            }
        }
    }

    pub fn merge(&mut self, other: Breakdown) {
        merge_into(&mut self.team_ats, other.team_ats);
        merge_into(&mut self.team_fade, other.team_fade);
        merge_into(&mut self.home_away, other.home_away);
        merge_into(&mut self.totals, other.totals);
        merge_into(&mut self.team_totals, other.team_totals);
    }

    /// Breakdown of one results table, limited to `season`.
    pub fn from_table(table: &CsvTable, season: Season) -> Self {
        let mut breakdown = Breakdown::default();
        breakdown.add_records(&season_records(table, season).0);
        breakdown
    }

    /// Breakdowns of several results tables, built in parallel and merged.
    pub fn from_tables(tables: &[CsvTable], season: Season) -> Self {
        tables
            .par_iter()
            .map(|table| Breakdown::from_table(table, season))
            .reduce(Breakdown::default, |mut acc, other| {
                acc.merge(other);
                acc
            })
    }

    /// The five breakdown tables with their file names, rows in key order.
    pub fn to_tables(&self, season: Season) -> Vec<(&'static str, CsvTable)> {
        let season = season.to_string();

        let team_ats = build_table(
            &["season", "team", "picker"],
            self.team_ats.iter().map(|((team, picker), tally)| {
                (vec![season.clone(), team.clone(), picker.label().to_string()], tally)
            }),
        );
        let team_fade = build_table(
            &["season", "opponent", "picker"],
            self.team_fade.iter().map(|((team, picker), tally)| {
                (vec![season.clone(), team.clone(), picker.label().to_string()], tally)
            }),
        );
        let home_away = build_table(
            &["season", "picker", "side"],
            self.home_away.iter().map(|((picker, side), tally)| {
                (vec![season.clone(), picker.label().to_string(), side.label().to_string()], tally)
            }),
        );
        let totals = build_table(
            &["season", "picker", "side"],
            self.totals.iter().map(|((picker, side), tally)| {
                (vec![season.clone(), picker.label().to_string(), side.label().to_string()], tally)
            }),
        );
        let team_totals = build_table(
            &["season", "team", "picker", "side"],
            self.team_totals.iter().map(|((team, picker, side), tally)| {
                (
                    vec![
                        season.clone(),
                        team.clone(),
                        picker.label().to_string(),
                        side.label().to_string(),
                    ],
                    tally,
                )
            }),
        );

        vec![
            (TEAM_ATS_FILE, team_ats),
            (TEAM_FADE_FILE, team_fade),
            (HOME_AWAY_FILE, home_away),
            (TOTALS_FILE, totals),
            (TEAM_TOTALS_FILE, team_totals),
        ]
    }
}

fn merge_into<K: Ord>(target: &mut BTreeMap<K, Tally>, source: BTreeMap<K, Tally>) {
    for (key, tally) in source {
        *target.entry(key).or_default() += tally;
    }
}

fn build_table<'a>(
    key_columns: &[&str],
    rows: impl Iterator<Item = (Vec<String>, &'a Tally)>,
) -> CsvTable {
    let header = key_columns.iter().chain(TALLY_COLUMNS.iter()).copied();
    let mut table = CsvTable::new(header);
    for (mut cells, tally) in rows {
        cells.extend([
            tally.wins.to_string(),
            tally.losses.to_string(),
            tally.pushes.to_string(),
            tally.games().to_string(),
            format!("{:.1}", tally.win_pct()),
        ]);
        table.push_row(cells);
    }
    table
}
