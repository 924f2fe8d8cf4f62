//! Combine command implementation

use std::path::Path;

use crate::{export::combine, Result, Season, Week};

use super::common::{read_table, write_table};

/// Handle the combine command
pub fn handle_combine(
    picks: &Path,
    scores: &Path,
    out: &Path,
    season: Option<Season>,
    week: Option<Week>,
) -> Result<()> {
    let picks_table = read_table(picks)?;
    let scores_table = read_table(scores)?;

    let combined = combine(&picks_table, &scores_table, season, week)?;
    write_table(out, &combined)?;

    println!("Final CSV written: {}", out.display());
    println!("  Rows:   {}", combined.len());
    Ok(())
}
