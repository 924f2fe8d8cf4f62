//! Pick toggle command implementation

use crate::{
    cli::types::{PickerId, Selection, SpreadSide, TotalSide},
    error::PickError,
    picks::{Pick, PickStore},
    schedule::Schedule,
    storage::KeyValueStore,
    Result,
};

use super::common::CommandContext;

/// Build the selection from the mutually exclusive `--spread`/`--total` flags.
pub fn selection_from_flags(spread: Option<SpreadSide>, total: Option<TotalSide>) -> Result<Selection> {
    match (spread, total) {
        (Some(side), None) => Ok(Selection::Spread(side)),
        (None, Some(side)) => Ok(Selection::Total(side)),
        _ => Err(PickError::SelectionRequired),
    }
}

/// Resolve `game` against the schedule and toggle the selection.
pub fn toggle_on_schedule<S: KeyValueStore>(
    store: &mut PickStore<S>,
    schedule: &Schedule,
    picker: PickerId,
    game: &str,
    selection: Selection,
) -> Result<(String, Pick)> {
    let game = schedule.resolve(game)?;
    let pick = store.toggle_pick(picker, &game.key(), selection)?;
    Ok((game.title(), pick))
}

/// Handle the pick command
pub async fn handle_pick(
    ctx: &CommandContext,
    picker: PickerId,
    game: &str,
    spread: Option<SpreadSide>,
    total: Option<TotalSide>,
    sources: &[String],
) -> Result<()> {
    let selection = selection_from_flags(spread, total)?;
    let schedule = ctx.load_schedule(sources).await?;
    let mut store = ctx.open_store()?;

    let (title, pick) = toggle_on_schedule(&mut store, &schedule, picker, game, selection)?;
    if pick.is_empty() {
        println!("✓ {picker}: cleared pick for {title}");
    } else {
        println!(
            "✓ {picker}: {title} spread={} total={}",
            pick.spread.map(|s| s.as_str()).unwrap_or("-"),
            pick.total.map(|s| s.as_str()).unwrap_or("-"),
        );
    }
    Ok(())
}
