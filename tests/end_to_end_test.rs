//! End-to-end flow: schedule CSV, picks, export, combine with scores,
//! grade and report.

use pick_duel::{
    core::{fetch_first, CsvTable, Source},
    export::{combine, picks_table},
    grading::{grade_table, grade_with_book, Tally},
    report::{format_tally, week_rows},
    schedule::{key_of, select_consensus},
    storage::MemoryStore,
    GameKey, PickStore, PickerId, Schedule, Selection, SpreadSide, TotalSide, Week,
};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ODDS: &str = "\
season,week,game_id,home_team,away_team,commence_time_utc,spread_home,total,book
2025,5,g1,Team A,Team B,2025-10-05T17:00:00Z,-3.5,47.5,CONSENSUS
2025,5,g1,Team A,Team B,2025-10-05T17:00:00Z,-4,48,BookX
2025,5,g2,Team C,Team D,2025-10-05T20:25:00Z,-3,41,CONSENSUS";

const SCORES: &str = "\
game_id,home_score,away_score
g1,24,20
g2,20,17";

#[test]
fn test_consensus_row_and_key() {
    let table = CsvTable::parse(
        "season,week,home_team,away_team,commence_time_utc,spread_home,total,book\n\
         2025,5,Team A,Team B,2025-10-05T17:00:00Z,-3.5,47.5,CONSENSUS",
    );
    let rows = select_consensus(&table);
    assert_eq!(rows.len(), 1);
    assert_eq!(key_of(&rows[0]).as_str(), "Team B@Team A_2025-10-05T17:00:00Z");
}

#[test]
fn test_pick_export_combine_grade() {
    let schedule = Schedule::from_table(&CsvTable::parse(ODDS));
    assert_eq!(schedule.len(), 2);

    let mut store = PickStore::new(MemoryStore::new());
    let g1 = GameKey::from("Team B@Team A_2025-10-05T17:00:00Z");
    let g2 = schedule.resolve("2").unwrap().key();

    store
        .toggle_pick(PickerId::Mat, &g1, Selection::Spread(SpreadSide::Home))
        .unwrap();
    store
        .toggle_pick(PickerId::Mat, &g1, Selection::Total(TotalSide::Over))
        .unwrap();
    store
        .toggle_pick(PickerId::Mat, &g2, Selection::Spread(SpreadSide::Away))
        .unwrap();
    store
        .toggle_pick(PickerId::Nikki, &g1, Selection::Spread(SpreadSide::Away))
        .unwrap();
    store
        .toggle_pick(PickerId::Nikki, &g2, Selection::Total(TotalSide::Under))
        .unwrap();

    let picks = picks_table(&schedule, &store.load_all());
    let scores = CsvTable::parse(SCORES);
    let combined = combine(&picks, &scores, None, Some(Week::new(5))).unwrap();
    assert_eq!(combined.len(), 2);

    // Written and read back as text, the way the files travel
    let reparsed = CsvTable::parse(&combined.to_csv_string().unwrap());
    let (mat, summary) = grade_table(&reparsed, PickerId::Mat);
    assert_eq!(summary.graded, 2);

    // g1: 24-20 with -3.5 covers home, 44 is under 47.5
    // g2: 20-17 with -3 is a push
    let week5 = mat.week(Week::new(5)).unwrap();
    assert_eq!(week5.ats, Tally::new(1, 0, 1));
    assert_eq!(week5.ou, Tally::new(0, 1, 0));
    assert_eq!(format_tally(&week5.ats), "1-0-1");

    let (nikki, _) = grade_table(&reparsed, PickerId::Nikki);
    assert_eq!(nikki.season.ats, Tally::new(0, 1, 0));
    // 37 under 41
    assert_eq!(nikki.season.ou, Tally::new(1, 0, 0));

    let rows = week_rows(&nikki, true);
    assert_eq!(rows[0].ats, "0-1");
    assert_eq!(rows[5].label, "Week 5");
    assert_eq!(rows[5].ou, "1-0");
}

#[test]
fn test_joined_grading_matches_embedded() {
    let schedule = Schedule::from_table(&CsvTable::parse(ODDS));
    let mut store = PickStore::new(MemoryStore::new());
    for game in schedule.games() {
        store
            .toggle_pick(PickerId::Mat, &game.key(), Selection::Spread(SpreadSide::Home))
            .unwrap();
    }

    let picks = picks_table(&schedule, &store.load_all());
    let combined = combine(&picks, &CsvTable::parse(SCORES), None, None).unwrap();
    let records: Vec<_> = combined.records().collect();

    let joined = grade_with_book(&records, &store.load(PickerId::Mat));
    let (embedded, _) = grade_table(&combined, PickerId::Mat);
    assert_eq!(joined, embedded);
    assert_eq!(joined.season.ats, Tally::new(1, 0, 1));
}

#[tokio::test]
async fn test_schedule_fetched_with_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.csv"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/latest.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ODDS))
        .mount(&server)
        .await;

    let sources = vec![
        Source::parse(&format!("{}/missing.csv", server.uri())),
        Source::parse(&format!("{}/latest.csv", server.uri())),
    ];
    let client = pick_duel::core::build_client().unwrap();
    let (source, body) = fetch_first(&client, &sources, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(source, sources[1]);
    let schedule = Schedule::from_table(&CsvTable::parse(&body));
    assert_eq!(schedule.label().as_deref(), Some("2025 • Week 5"));
}
