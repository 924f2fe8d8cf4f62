//! Rendering of graded records: tally strings, week ordering and the
//! week-by-week table for both pickers.


use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    cli::types::{time::REGULAR_SEASON_WEEKS, PickerId, Week},
    grading::{DimensionTally, GradeReport, Tally},
};

/// Shown for a week (or dimension) with nothing graded yet.
pub const PLACEHOLDER: &str = "—";

/// Label of the season-aggregate row.
pub const SEASON_LABEL: &str = "Season";

/// `W-L`, or `W-L-P` when there are pushes.
///
/// ```rust
/// use pick_duel::grading::Tally;
/// use pick_duel::report::format_tally;
///
/// assert_eq!(format_tally(&Tally::new(3, 1, 0)), "3-1");
/// assert_eq!(format_tally(&Tally::new(3, 1, 2)), "3-1-2");
/// ```
pub fn format_tally(tally: &Tally) -> String {
    if tally.pushes == 0 {
        format!("{}-{}", tally.wins, tally.losses)
    } else {
        format!("{}-{}-{}", tally.wins, tally.losses, tally.pushes)
    }
}

/// Formatted tally, or the placeholder when nothing was graded.
pub fn format_cell(tally: Option<&Tally>) -> String {
    match tally {
        Some(t) if !t.is_empty() => format_tally(t),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Weeks to display: every regular-season week, then the postseason weeks
/// that appear in any of `reports`.
pub fn display_weeks<'a>(reports: impl IntoIterator<Item = &'a GradeReport>) -> Vec<Week> {
    let mut weeks: Vec<Week> = (1..=REGULAR_SEASON_WEEKS).map(Week::new).collect();
    let mut postseason: Vec<Week> = reports
        .into_iter()
        .flat_map(|r| r.by_week.keys().copied())
        .filter(Week::is_postseason)
        .collect();
    postseason.sort();
    postseason.dedup();
    weeks.extend(postseason);
    weeks
}

/// One display row for one picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekRow {
    pub label: String,
    pub ats: String,
    pub ou: String,
}

impl WeekRow {
    fn new(label: String, tally: Option<&DimensionTally>) -> Self {
        Self {
            label,
            ats: format_cell(tally.map(|t| &t.ats)),
            ou: format_cell(tally.map(|t| &t.ou)),
        }
    }
}

/// Display rows for one picker: the season row first when requested, then
/// weeks in [`display_weeks`] order.
pub fn week_rows(report: &GradeReport, include_season: bool) -> Vec<WeekRow> {
    let mut rows = Vec::new();
    if include_season {
        rows.push(WeekRow::new(SEASON_LABEL.to_string(), Some(&report.season)));
    }
    rows.extend(
        display_weeks([report])
            .into_iter()
            .map(|week| WeekRow::new(week.label(), report.week(week))),
    );
    rows
}

/// Plain-text table with one ATS and one O/U column per picker.
pub fn render_table(reports: &BTreeMap<PickerId, GradeReport>, include_season: bool) -> String {
    let mut header = vec!["Week".to_string()];
    for picker in reports.keys() {
        let name = picker.label();
        header.push(format!("{name} ATS"));
        header.push(format!("{name} O/U"));
    }

    let mut lines: Vec<Vec<String>> = vec![header];
    if include_season {
        let mut line = vec![SEASON_LABEL.to_string()];
        for report in reports.values() {
            line.push(format_cell(Some(&report.season.ats)));
            line.push(format_cell(Some(&report.season.ou)));
        }
        lines.push(line);
    }
    for week in display_weeks(reports.values()) {
        let mut line = vec![week.label()];
        for report in reports.values() {
            let tally = report.week(week);
            line.push(format_cell(tally.map(|t| &t.ats)));
            line.push(format_cell(tally.map(|t| &t.ou)));
        }
        lines.push(line);
    }

    let widths: Vec<usize> = (0..lines[0].len())
        .map(|col| {
            lines
                .iter()
                .map(|l| l[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    lines
        .iter()
        .map(|line| {
            line.iter()
                .zip(&widths)
                .map(|(cell, width)| pad(cell, *width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// pads by chars, so the placeholder counts as one column
fn pad(cell: &str, width: usize) -> String {
    format!("{cell:<width$}")
}
