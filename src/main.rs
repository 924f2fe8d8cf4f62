//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use pick_duel::{
    cli::{Commands, PickDuel, PicksCmd},
    commands::{
        combine::handle_combine,
        pick::handle_pick,
        picks::{handle_clear, handle_export, handle_import, handle_list},
        record::{handle_insights, handle_record},
        schedule::handle_schedule,
        CommandContext,
    },
    logging::init_logging,
    Result,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    let app = PickDuel::parse();
    init_logging(app.verbose);

    let ctx = CommandContext::from_env();

    match app.command {
        Commands::Schedule { schedule, json } => {
            handle_schedule(&ctx, &schedule.sources, json).await?
        }

        Commands::Pick {
            picker,
            game,
            spread,
            total,
            schedule,
        } => handle_pick(&ctx, picker, &game, spread, total, &schedule.sources).await?,

        Commands::Picks { cmd } => match cmd {
            PicksCmd::List { picker, json, raw } => handle_list(&ctx, picker, json, raw)?,

            PicksCmd::Clear { picker } => handle_clear(&ctx, picker)?,

            PicksCmd::Import {
                file,
                schedule,
                dry_run,
            } => handle_import(&ctx, file.as_deref(), &schedule.sources, dry_run).await?,

            PicksCmd::Export {
                schedule,
                out,
                history,
            } => {
                handle_export(&ctx, &schedule.sources, out.as_deref(), history.as_deref()).await?
            }
        },

        Commands::Combine {
            picks,
            scores,
            out,
            season,
            week,
        } => handle_combine(&picks, &scores, &out, season, week)?,

        Commands::Record {
            results,
            picker,
            season,
            season_row,
            json,
        } => handle_record(&results, picker, season, season_row, json)?,

        Commands::Insights {
            results,
            out_dir,
            season,
        } => handle_insights(&results, &out_dir, season)?,
    }

    Ok(())
}
