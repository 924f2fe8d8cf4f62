//! Record and insights command implementations

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::{
    cli::types::PickerId,
    core::CsvTable,
    export::season_metrics,
    grading::{grade_tables, latest_season, season_summary, Breakdown, GradeReport, GradeSummary},
    report::{render_table, week_rows, WeekRow},
    Result, Season,
};

use super::common::{read_tables, write_table};

/// The requested season, else the latest one the results name.
pub fn resolve_season(tables: &[CsvTable], season: Option<Season>) -> Season {
    season
        .or_else(|| latest_season(tables))
        .unwrap_or_default()
}

/// Grade one season of results for the selected pickers.
pub fn build_reports(
    tables: &[CsvTable],
    picker: Option<PickerId>,
    season: Season,
) -> BTreeMap<PickerId, GradeReport> {
    let pickers = picker.map(|p| vec![p]).unwrap_or_else(|| PickerId::ALL.to_vec());
    pickers
        .into_iter()
        .map(|p| {
            let (report, summary) = grade_tables(tables, p, season);
            debug!(
                picker = %p,
                %season,
                graded = summary.graded,
                skipped = summary.total_skipped(),
                "graded results"
            );
            (p, report)
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct RecordOutput {
    season: Season,
    summary: GradeSummary,
    records: BTreeMap<PickerId, Vec<WeekRow>>,
}

/// Handle the record command
pub fn handle_record(
    results: &[PathBuf],
    picker: Option<PickerId>,
    season: Option<Season>,
    season_row: bool,
    as_json: bool,
) -> Result<()> {
    let tables = read_tables(results)?;
    let season = resolve_season(&tables, season);
    let reports = build_reports(&tables, picker, season);
    let summary = season_summary(&tables, season);

    if as_json {
        let output = RecordOutput {
            season,
            summary,
            records: reports
                .iter()
                .map(|(p, report)| (*p, week_rows(report, season_row)))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Season: {season}");
        println!("{}", render_table(&reports, season_row));
        println!();
        println!("{summary}");
    }
    Ok(())
}

/// Name recorded for a results file in the stacked season table.
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Write the breakdown CSVs and the stacked `{season}_metrics.csv` into
/// `out_dir`. Returns each written path with its row count.
pub fn write_insights(
    tables: &[CsvTable],
    names: &[String],
    out_dir: &Path,
    season: Season,
) -> Result<Vec<(PathBuf, usize)>> {
    let mut outputs: Vec<(String, CsvTable)> = Breakdown::from_tables(tables, season)
        .to_tables(season)
        .into_iter()
        .map(|(name, table)| (name.to_string(), table))
        .collect();

    let files: Vec<(String, &CsvTable)> = names.iter().cloned().zip(tables).collect();
    outputs.push((format!("{season}_metrics.csv"), season_metrics(&files, season)));

    let mut written = Vec::with_capacity(outputs.len());
    for (name, table) in outputs {
        let path = out_dir.join(name);
        write_table(&path, &table)?;
        written.push((path, table.len()));
    }
    Ok(written)
}

/// Handle the insights command
pub fn handle_insights(results: &[PathBuf], out_dir: &Path, season: Option<Season>) -> Result<()> {
    let tables = read_tables(results)?;
    let names: Vec<String> = results.iter().map(|p| file_label(p)).collect();
    let season = resolve_season(&tables, season);

    println!("=== Metrics Summary ===");
    println!("Season: {season}");
    println!("{}", season_summary(&tables, season));
    for (path, rows) in write_insights(&tables, &names, out_dir, season)? {
        println!("{} -> rows: {rows}", path.display());
    }
    Ok(())
}
