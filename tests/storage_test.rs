//! Integration tests for pick persistence

use pick_duel::{
    storage::{KeyValueStore, PickDatabase},
    GameKey, Pick, PickStore, PickerId, Selection, SpreadSide, TotalSide,
};

fn key(n: u32) -> GameKey {
    GameKey::new(&format!("Away {n}"), &format!("Home {n}"), "2025-10-05T17:00:00Z")
}

#[test]
fn test_picks_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("picks.db");

    {
        let mut store = PickStore::new(PickDatabase::open(&path).unwrap());
        store
            .toggle_pick(PickerId::Mat, &key(1), Selection::Spread(SpreadSide::Home))
            .unwrap();
        store
            .toggle_pick(PickerId::Nikki, &key(2), Selection::Total(TotalSide::Under))
            .unwrap();
    }

    let store = PickStore::new(PickDatabase::open(&path).unwrap());
    assert_eq!(
        store.load(PickerId::Mat)[&key(1)],
        Pick::new(Some(SpreadSide::Home), None)
    );
    assert_eq!(
        store.load(PickerId::Nikki)[&key(2)],
        Pick::new(None, Some(TotalSide::Under))
    );
}

#[test]
fn test_corrupt_row_reads_as_empty() {
    let mut db = PickDatabase::new_in_memory().unwrap();
    db.set("picks_mat", "definitely not json").unwrap();

    let mut store = PickStore::new(db);
    assert!(store.load(PickerId::Mat).is_empty());

    // the next toggle starts over from an empty book
    store
        .toggle_pick(PickerId::Mat, &key(3), Selection::Total(TotalSide::Over))
        .unwrap();
    assert_eq!(store.load(PickerId::Mat).len(), 1);
}

#[test]
fn test_toggle_sequence_on_disk() {
    let mut store = PickStore::new(PickDatabase::new_in_memory().unwrap());
    let k = key(4);

    let steps = [
        Selection::Spread(SpreadSide::Home),
        Selection::Spread(SpreadSide::Away),
        Selection::Total(TotalSide::Over),
        Selection::Spread(SpreadSide::Away),
        Selection::Total(TotalSide::Over),
    ];
    for step in steps {
        store.toggle_pick(PickerId::Nikki, &k, step).unwrap();
    }

    assert!(!store.load(PickerId::Nikki).contains_key(&k));
    let raw = store.backend().get("picks_nikki").unwrap();
    assert_eq!(raw.as_deref(), Some("{}"));
}

#[test]
fn test_clear_then_list_values() {
    let mut store = PickStore::new(PickDatabase::new_in_memory().unwrap());
    for picker in PickerId::ALL {
        store
            .toggle_pick(picker, &key(5), Selection::Spread(SpreadSide::Away))
            .unwrap();
    }
    store.clear(PickerId::Nikki).unwrap();

    let keys: Vec<String> = store
        .backend()
        .list_values()
        .unwrap()
        .into_iter()
        .map(|v| v.key)
        .collect();
    assert_eq!(keys, vec!["picks_mat".to_string()]);
}
