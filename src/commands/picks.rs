//! Stored-picks commands: list, clear, import and export

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::{
    cli::types::PickerId,
    core::CsvTable,
    export::{picks_table, upsert_history},
    picks::{
        import::{parse_submission, rekey_to_schedule},
        PickBook, PickStore,
    },
    schedule::Schedule,
    storage::{KeyValueStore, StoredValue},
    Result,
};

use super::common::{read_table, write_table, CommandContext};

/// Per-picker result of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub stored: usize,
    pub unmatched: usize,
}

/// Parse a submission, re-key it onto the schedule and replace each
/// picker's stored picks. Nothing is written when `dry_run` is set.
pub fn import_into<S: KeyValueStore>(
    store: &mut PickStore<S>,
    schedule: &Schedule,
    body: &str,
    dry_run: bool,
) -> Result<BTreeMap<PickerId, ImportOutcome>> {
    let submitted = parse_submission(body)?;
    let mut outcomes = BTreeMap::new();

    for (picker, book) in submitted {
        let (rekeyed, unmatched) = rekey_to_schedule(&book, schedule);
        if !dry_run {
            store.save(picker, &rekeyed)?;
        }
        info!(%picker, stored = rekeyed.len(), unmatched, dry_run, "imported picks");
        outcomes.insert(
            picker,
            ImportOutcome {
                stored: rekeyed.len(),
                unmatched,
            },
        );
    }
    Ok(outcomes)
}

fn selected_pickers(picker: Option<PickerId>) -> Vec<PickerId> {
    picker.map(|p| vec![p]).unwrap_or_else(|| PickerId::ALL.to_vec())
}

/// Text listing of stored picks.
pub fn render_books(books: &BTreeMap<PickerId, PickBook>) -> String {
    let mut out = String::new();
    for (picker, book) in books {
        out.push_str(&format!("{picker} ({} picks)\n", book.len()));
        for (key, pick) in book {
            out.push_str(&format!(
                "  {key}  spread={} total={}\n",
                pick.spread.map(|s| s.as_str()).unwrap_or("-"),
                pick.total.map(|s| s.as_str()).unwrap_or("-"),
            ));
        }
    }
    out
}

/// Stored rows as they sit in the database, one line each.
pub fn render_raw(values: &[StoredValue]) -> String {
    let mut out = String::new();
    for value in values {
        let updated = i64::try_from(value.updated_at)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .map(|at| at.to_rfc3339())
            .unwrap_or_else(|| value.updated_at.to_string());
        out.push_str(&format!("{}  (updated {updated})\n  {}\n", value.key, value.value));
    }
    out
}

/// Handle `picks list`
pub fn handle_list(
    ctx: &CommandContext,
    picker: Option<PickerId>,
    as_json: bool,
    raw: bool,
) -> Result<()> {
    let store = ctx.open_store()?;

    if raw {
        let keys: Vec<String> = selected_pickers(picker).iter().map(|p| p.storage_key()).collect();
        let values: Vec<StoredValue> = store
            .backend()
            .list_values()?
            .into_iter()
            .filter(|v| keys.contains(&v.key))
            .collect();
        if as_json {
            println!("{}", serde_json::to_string_pretty(&values)?);
        } else {
            print!("{}", render_raw(&values));
        }
        return Ok(());
    }

    let books: BTreeMap<PickerId, PickBook> = selected_pickers(picker)
        .into_iter()
        .map(|p| (p, store.load(p)))
        .collect();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&books)?);
    } else {
        print!("{}", render_books(&books));
    }
    Ok(())
}

/// Handle `picks clear`
pub fn handle_clear(ctx: &CommandContext, picker: PickerId) -> Result<()> {
    let mut store = ctx.open_store()?;
    store.clear(picker)?;
    println!("✓ Cleared all picks for {picker}");
    Ok(())
}

/// Handle `picks import`
pub async fn handle_import(
    ctx: &CommandContext,
    file: Option<&Path>,
    sources: &[String],
    dry_run: bool,
) -> Result<()> {
    let body = match file {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let schedule = ctx.load_schedule(sources).await?;
    let mut store = ctx.open_store()?;
    let outcomes = import_into(&mut store, &schedule, &body, dry_run)?;

    for (picker, outcome) in &outcomes {
        println!(
            "{} {picker}: {} picks, {} not on the schedule",
            if dry_run { "(dry run)" } else { "✓" },
            outcome.stored,
            outcome.unmatched
        );
    }
    Ok(())
}

/// Merge `latest` into the history file at `path`, creating it when absent.
/// Returns the number of rows added.
pub fn update_history_file(path: &Path, latest: &CsvTable) -> Result<usize> {
    let history = if path.exists() {
        read_table(path)?
    } else {
        CsvTable::default()
    };
    let (merged, added) = upsert_history(&history, latest);
    write_table(path, &merged)?;
    Ok(added)
}

/// Handle `picks export`
pub async fn handle_export(
    ctx: &CommandContext,
    sources: &[String],
    out: Option<&Path>,
    history: Option<&Path>,
) -> Result<()> {
    let schedule = ctx.load_schedule(sources).await?;
    let store = ctx.open_store()?;
    let table = picks_table(&schedule, &store.load_all());

    match out {
        Some(path) => {
            write_table(path, &table)?;
            println!("✓ Picks CSV written: {} ({} rows)", path.display(), table.len());
        }
        None => print!("{}", table.to_csv_string()?),
    }

    if let Some(path) = history {
        let added = update_history_file(path, &table)?;
        println!("✓ Upserted {} ({added} new rows)", path.display());
    }
    Ok(())
}
