//! Flat CSV exports: the weekly picks sheet, the running picks history, the
//! picks + scores join that feeds grading and the stacked season file.


use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, warn};

use crate::{
    cli::types::{PickerId, Season, Week},
    core::csv::{CsvTable, Record},
    error::{PickError, Result},
    grading::row_season,
    picks::PickBook,
    schedule::Schedule,
};

/// Columns of the exported picks sheet.
pub const PICKS_HEADER: [&str; 12] = [
    "season",
    "week",
    "game_id",
    "commence_time_utc",
    "home_team",
    "away_team",
    "spread_home",
    "total",
    "mat_spread",
    "mat_total",
    "nikki_spread",
    "nikki_total",
];

/// One row per scheduled game, in kickoff order, with each picker's sides.
/// Missing picks are empty cells; `week` is the translated NFL week.
pub fn picks_table(schedule: &Schedule, books: &BTreeMap<PickerId, PickBook>) -> CsvTable {
    let mut table = CsvTable::new(PICKS_HEADER);

    for game in schedule.games() {
        let key = game.key();
        let week = game
            .nfl_week()
            .map(|w| w.as_u16().to_string())
            .unwrap_or_else(|| game.week.clone());

        let mut row = vec![
            game.season.clone(),
            week,
            game.game_id.clone(),
            game.kickoff_utc.clone(),
            game.home_team.clone(),
            game.away_team.clone(),
            game.spread_home.clone(),
            game.total.clone(),
        ];
        for picker in PickerId::ALL {
            let pick = books
                .get(&picker)
                .and_then(|book| book.get(&key))
                .copied()
                .unwrap_or_default();
            row.push(pick.spread.map(|s| s.to_string()).unwrap_or_default());
            row.push(pick.total.map(|s| s.to_string()).unwrap_or_default());
        }
        table.push_row(row);
    }

    table
}

/// Join a picks sheet with a scores sheet on `game_id`.
///
/// Output columns are the picks columns plus `home_score`, `away_score`,
/// `season` and `week` (each appended only when missing). Picks rows with no
/// matching score row are dropped. `season`/`week` are overwritten when given.
pub fn combine(
    picks: &CsvTable,
    scores: &CsvTable,
    season: Option<Season>,
    week: Option<Week>,
) -> Result<CsvTable> {
    for (name, table) in [("picks", picks), ("scores", scores)] {
        if !table.has_column("game_id") {
            warn!(table = name, "game_id column missing");
            return Err(PickError::MissingColumn {
                column: "game_id".to_string(),
            });
        }
    }

    let scores_by_id: HashMap<&str, (&str, &str)> = scores
        .records()
        .map(|r| {
            (
                r.get("game_id").trim(),
                (r.get("home_score"), r.get("away_score")),
            )
        })
        .collect();

    let mut header: Vec<String> = picks.header().to_vec();
    for extra in ["home_score", "away_score", "season", "week"] {
        if !header.iter().any(|h| h == extra) {
            header.push(extra.to_string());
        }
    }
    let position = |name: &str| header.iter().position(|h| h == name);
    let (home_at, away_at) = (position("home_score"), position("away_score"));
    let (season_at, week_at) = (position("season"), position("week"));

    let mut out = CsvTable::new(header.clone());
    let mut dropped = 0usize;

    for record in picks.records() {
        let Some(&(home, away)) = scores_by_id.get(record.get("game_id").trim()) else {
            dropped += 1;
            continue;
        };

        let mut row = record.to_aligned();
        row.resize(header.len(), String::new());
        let mut put = |at: Option<usize>, value: String| {
            if let Some(i) = at {
                row[i] = value;
            }
        };
        put(home_at, home.to_string());
        put(away_at, away.to_string());
        if let Some(season) = season {
            put(season_at, season.to_string());
        }
        if let Some(week) = week {
            put(week_at, week.as_u16().to_string());
        }
        out.push_row(row);
    }

    debug!(rows = out.len(), dropped, "combined picks and scores");
    Ok(out)
}

/// Columns identifying one game in the picks history.
pub const HISTORY_KEY: [&str; 3] = ["season", "week", "game_id"];

/// Column naming the results file each stacked row came from.
pub const SOURCE_FILE_COLUMN: &str = "source_file";

fn history_key(record: &Record<'_>) -> [String; 3] {
    HISTORY_KEY.map(|column| record.get(column).trim().to_string())
}

/// Header holding every column of `tables`, in first-seen order.
fn union_header<'a>(tables: impl IntoIterator<Item = &'a CsvTable>) -> Vec<String> {
    let mut header: Vec<String> = Vec::new();
    for table in tables {
        for name in table.header() {
            if !header.contains(name) {
                header.push(name.clone());
            }
        }
    }
    header
}

fn cells_by_name(record: &Record<'_>, header: &[String]) -> Vec<String> {
    header.iter().map(|name| record.get(name).to_string()).collect()
}

/// Add the rows of `latest` whose `(season, week, game_id)` is not in
/// `history` yet. Rows already recorded are kept unchanged. Returns the
/// merged table and the number of rows added.
pub fn upsert_history(history: &CsvTable, latest: &CsvTable) -> (CsvTable, usize) {
    let header = union_header([history, latest]);
    let mut seen: HashSet<[String; 3]> = history.records().map(|r| history_key(&r)).collect();

    let mut out = CsvTable::new(header.clone());
    for record in history.records() {
        out.push_row(cells_by_name(&record, &header));
    }

    let mut added = 0usize;
    for record in latest.records() {
        if seen.insert(history_key(&record)) {
            out.push_row(cells_by_name(&record, &header));
            added += 1;
        }
    }

    debug!(rows = out.len(), added, "upserted picks history");
    (out, added)
}

/// Stack one season's results files into a single table, tagging each row
/// with its file name. Rows naming another season are left out.
pub fn season_metrics(files: &[(String, &CsvTable)], season: Season) -> CsvTable {
    let columns = union_header(files.iter().map(|(_, table)| *table));
    let mut header = columns.clone();
    header.push(SOURCE_FILE_COLUMN.to_string());

    let mut out = CsvTable::new(header);
    for (name, table) in files {
        for record in table.records() {
            if row_season(&record).is_some_and(|s| s != season) {
                continue;
            }
            let mut row = cells_by_name(&record, &columns);
            row.push(name.clone());
            out.push_row(row);
        }
    }
    out
}
