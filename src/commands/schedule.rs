//! Schedule command implementation

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    cli::types::PickerId,
    picks::{Pick, PickBook, PickStore},
    schedule::{format_signed, Game, Schedule},
    storage::KeyValueStore,
    Result,
};

use super::common::CommandContext;

/// One game with both pickers' current picks, as shown or serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameView {
    pub index: usize,
    pub key: String,
    #[serde(flatten)]
    pub game: Game,
    pub picks: BTreeMap<PickerId, Pick>,
}

/// Pair every game with each picker's stored pick (empty when none).
pub fn build_views(schedule: &Schedule, books: &BTreeMap<PickerId, PickBook>) -> Vec<GameView> {
    schedule
        .games()
        .iter()
        .enumerate()
        .map(|(i, game)| {
            let key = game.key();
            let picks = PickerId::ALL
                .iter()
                .map(|&picker| {
                    let pick = books
                        .get(&picker)
                        .and_then(|b| b.get(&key))
                        .copied()
                        .unwrap_or_default();
                    (picker, pick)
                })
                .collect();
            GameView {
                index: i + 1,
                key: key.to_string(),
                game: game.clone(),
                picks,
            }
        })
        .collect()
}

fn side_or_dash(side: Option<impl ToString>) -> String {
    side.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Text listing of the schedule with picks.
pub fn render_schedule(schedule: &Schedule, views: &[GameView]) -> String {
    let mut out = String::new();
    if let Some(label) = schedule.label() {
        out.push_str(&label);
        out.push('\n');
    }

    for view in views {
        let game = &view.game;
        let kickoff = game
            .kickoff()
            .map(|k| k.format("%a %b %-d %H:%M UTC").to_string())
            .unwrap_or_else(|| game.kickoff_utc.clone());
        out.push_str(&format!(
            "{:>2}. {:<40} {:<22} spread {:<6} total {:<6}",
            view.index,
            game.title(),
            kickoff,
            format_signed(&game.spread_home),
            game.total,
        ));
        for (picker, pick) in &view.picks {
            out.push_str(&format!(
                "  {picker}: {}/{}",
                side_or_dash(pick.spread),
                side_or_dash(pick.total)
            ));
        }
        out.push('\n');
    }
    out
}

/// Handle the schedule command
pub async fn handle_schedule(ctx: &CommandContext, sources: &[String], as_json: bool) -> Result<()> {
    let schedule = ctx.load_schedule(sources).await?;
    let store = ctx.open_store()?;
    show_schedule(&schedule, &store, as_json)
}

pub fn show_schedule<S: KeyValueStore>(
    schedule: &Schedule,
    store: &PickStore<S>,
    as_json: bool,
) -> Result<()> {
    let views = build_views(schedule, &store.load_all());

    if as_json {
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else if views.is_empty() {
        println!("No games found in the schedule.");
    } else {
        print!("{}", render_schedule(schedule, &views));
    }
    Ok(())
}
