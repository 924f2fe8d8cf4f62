//! Unit tests for schedule selection and game keys

use super::*;
use crate::schedule::key::{canonical_kickoff, kickoff_instant};

const ODDS_HEADER: &str =
    "season,week,game_id,commence_time_utc,home_team,away_team,book,spread_home,total,is_consensus";

fn odds_table(rows: &[&str]) -> CsvTable {
    let mut text = String::from(ODDS_HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    CsvTable::parse(&text)
}

#[test]
fn test_single_consensus_row_and_key() {
    let table = CsvTable::parse(
        "season,week,home_team,away_team,commence_time_utc,spread_home,total,book\n\
         2025,5,Team A,Team B,2025-10-05T17:00:00Z,-3.5,47.5,CONSENSUS",
    );

    let selected = select_consensus(&table);
    assert_eq!(selected.len(), 1);
    assert_eq!(
        key_of(&selected[0]).as_str(),
        "Team B@Team A_2025-10-05T17:00:00Z"
    );
}

#[test]
fn test_consensus_fallback_returns_all_rows() {
    let table = odds_table(&[
        "2025,40,g1,2025-10-05T17:00:00Z,Team A,Team B,DraftKings,-3.5,47.5,0",
        "2025,40,g1,2025-10-05T17:00:00Z,Team A,Team B,FanDuel,-3,47,0",
        "2025,40,g2,2025-10-05T20:25:00Z,Team C,Team D,FanDuel,2.5,41,0",
    ]);

    let selected = select_consensus(&table);
    assert_eq!(selected.len(), 3);
}

#[test]
fn test_consensus_subset_only() {
    let table = odds_table(&[
        "2025,40,g1,2025-10-05T17:00:00Z,Team A,Team B,DraftKings,-3.5,47.5,0",
        "2025,40,g1,2025-10-05T17:00:00Z,Team A,Team B,CONSENSUS,-3.5,47.5,1",
        "2025,40,g2,2025-10-05T20:25:00Z,Team C,Team D,FanDuel,2.5,41,0",
        "2025,40,g2,2025-10-05T20:25:00Z,Team C,Team D,Median,2.5,41,1",
    ]);

    let selected = select_consensus(&table);
    assert_eq!(selected.len(), 2);
    assert_eq!(selected[0].get("book"), "CONSENSUS");
    assert_eq!(selected[1].get("book"), "Median");
}

#[test]
fn test_consensus_predicate_is_lenient_on_case_and_whitespace() {
    let table = CsvTable::parse("book,home_team\n consensus ,A\nFanDuel,B\n");
    let selected = select_consensus(&table);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].get("home_team"), "A");
}

#[test]
fn test_consensus_flag_without_book_column() {
    let table = CsvTable::parse("is_consensus,home_team\n 1 ,A\n0,B\ntrue,C\n");
    let selected = select_consensus(&table);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].get("home_team"), "A");
}

#[test]
fn test_consensus_on_empty_table() {
    let table = CsvTable::parse("");
    assert!(select_consensus(&table).is_empty());
}

#[test]
fn test_key_is_order_sensitive() {
    let a = GameKey::new("Team B", "Team A", "2025-10-05T17:00:00Z");
    let b = GameKey::new("Team A", "Team B", "2025-10-05T17:00:00Z");
    assert_ne!(a, b);
}

#[test]
fn test_key_matches_between_game_and_record() {
    let table = odds_table(&["2025,40,g1,2025-10-05T17:00:00Z,Team A,Team B,CONSENSUS,-3.5,47.5,1"]);
    let record = table.records().next().unwrap();
    assert_eq!(Game::from_record(&record).key(), key_of(&record));
}

#[test]
fn test_key_parts() {
    let key = GameKey::from("Team B@Team A_2025-10-05T17:00:00Z");
    assert_eq!(
        key.parts(),
        Some(("Team B", "Team A", "2025-10-05T17:00:00Z"))
    );
    assert_eq!(GameKey::from("no-separators").parts(), None);
}

#[test]
fn test_canonical_key() {
    let key = GameKey::from("Team B @Team A_2025-10-05T17:00Z");
    assert_eq!(
        key.canonical().unwrap().as_str(),
        "Team B@Team A_2025-10-05T17:00:00+00:00"
    );
}

#[test]
fn test_canonical_kickoff_variants() {
    let expected = Some("2025-10-05T17:00:00+00:00".to_string());
    assert_eq!(canonical_kickoff("2025-10-05T17:00:00Z"), expected);
    assert_eq!(canonical_kickoff("2025-10-05T17:00:00+00:00"), expected);
    assert_eq!(canonical_kickoff("2025-10-05T13:00:00-04:00"), expected);
    assert_eq!(canonical_kickoff("2025-10-05T17:00+00:00"), expected);
    assert_eq!(canonical_kickoff("2025-10-05T17:00:00"), expected);
    assert_eq!(canonical_kickoff("not a time"), None);
    assert_eq!(canonical_kickoff(""), None);
}

#[test]
fn test_kickoff_instant_orders_offsets() {
    let early = kickoff_instant("2025-10-05T13:00:00-04:00").unwrap();
    let late = kickoff_instant("2025-10-05T17:30:00Z").unwrap();
    assert!(early < late);
}

#[test]
fn test_schedule_dedupes_and_orders_by_kickoff() {
    let table = odds_table(&[
        "2025,40,g2,2025-10-05T20:25:00Z,Team C,Team D,CONSENSUS,2.5,41,1",
        "2025,40,g1,2025-10-05T17:00:00Z,Team A,Team B,CONSENSUS,-3.5,47.5,1",
        "2025,40,g1,2025-10-05T17:00:00Z,Team A,Team B,CONSENSUS,-4,48,1",
        "2025,40,g3,TBD,Team E,Team F,CONSENSUS,1,40,1",
    ]);

    let schedule = Schedule::from_table(&table);
    let ids: Vec<&str> = schedule.games().iter().map(|g| g.game_id.as_str()).collect();
    assert_eq!(ids, vec!["g1", "g2", "g3"]);
    // First row for a key wins
    assert_eq!(schedule.games()[0].spread_home, "-3.5");
}

#[test]
fn test_schedule_resolve_by_index_and_key() {
    let table = odds_table(&[
        "2025,40,g1,2025-10-05T17:00:00Z,Team A,Team B,CONSENSUS,-3.5,47.5,1",
        "2025,40,g2,2025-10-05T20:25:00Z,Team C,Team D,CONSENSUS,2.5,41,1",
    ]);
    let schedule = Schedule::from_table(&table);

    assert_eq!(schedule.resolve("2").unwrap().game_id, "g2");
    assert_eq!(
        schedule
            .resolve("Team B@Team A_2025-10-05T17:00:00Z")
            .unwrap()
            .game_id,
        "g1"
    );
    assert_eq!(
        schedule
            .resolve("Team D@Team C_2025-10-05T20:25:00+00:00")
            .unwrap()
            .game_id,
        "g2"
    );
    assert!(matches!(
        schedule.resolve("3"),
        Err(PickError::GameNotFound { .. })
    ));
    assert!(schedule.resolve("0").is_err());
}

#[test]
fn test_schedule_label_uses_translated_week() {
    let table = odds_table(&["2025,40,g1,2025-10-05T17:00:00Z,Team A,Team B,CONSENSUS,-3.5,47.5,1"]);
    let schedule = Schedule::from_table(&table);
    assert_eq!(schedule.label().as_deref(), Some("2025 • Week 5"));
}

#[test]
fn test_game_numeric_lines() {
    let table = odds_table(&["2025,5,g1,2025-10-05T17:00:00Z,Team A,Team B,CONSENSUS,,pk,1"]);
    let game = Game::from_record(&table.records().next().unwrap());
    assert_eq!(game.spread_home_value(), None);
    assert_eq!(game.total_value(), None);
    assert_eq!(game.title(), "Team B @ Team A");
}

#[test]
fn test_format_signed() {
    assert_eq!(format_signed("3.5"), "+3.5");
    assert_eq!(format_signed("-7"), "-7");
    assert_eq!(format_signed("0"), "0");
    assert_eq!(format_signed(""), "");
    assert_eq!(format_signed("PK"), "PK");
}
