//! Import picks submitted as JSON text (for example an issue body).
//!
//! Two shapes are accepted:
//! - game-centric: `{ "<key>": { "mat": {..}, "nikki": {..} } }`
//! - picker-centric: `{ "mat": { "<key>": {..} }, "nikki": { .. } }`
//!
//! Keys are canonicalized (trimmed team names, UTC `+00:00` kickoff) so
//! that submissions made with a different timestamp format still match.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{book_from_value, PickBook};
use crate::{
    cli::types::PickerId,
    error::{PickError, Result},
    schedule::Schedule,
};

/// The JSON payload of a text body: the first fenced `json` code block, or the
/// whole body when it is a bare object.
pub fn extract_json_block(body: &str) -> Option<&str> {
    let lower = body.to_ascii_lowercase();
    if let Some(start) = lower.find("```json") {
        let content_start = start + "```json".len();
        let end = lower[content_start..].find("```")? + content_start;
        return Some(body[content_start..end].trim());
    }

    let trimmed = body.trim();
    trimmed.starts_with('{').then_some(trimmed)
}

fn is_picker_centric(obj: &Map<String, Value>) -> bool {
    let has_picker = PickerId::ALL.iter().any(|p| obj.contains_key(p.as_str()));
    has_picker && !obj.keys().any(|k| k.contains('@'))
}

/// Parse submitted picks into one canonical-keyed book per picker.
pub fn parse_submission(body: &str) -> Result<BTreeMap<PickerId, PickBook>> {
    let raw = extract_json_block(body).ok_or(PickError::NoPicksJson)?;
    let value: Value = serde_json::from_str(raw)?;
    let obj = value.as_object().ok_or(PickError::NoPicksJson)?;

    let mut books: BTreeMap<PickerId, PickBook> =
        PickerId::ALL.iter().map(|&p| (p, PickBook::new())).collect();

    if is_picker_centric(obj) {
        debug!("picker-centric submission");
        for picker in PickerId::ALL {
            if let Some(entries) = obj.get(picker.as_str()) {
                books.insert(picker, canonicalize(book_from_value(entries)));
            }
        }
    } else {
        debug!("game-centric submission");
        for (raw_key, per_picker) in obj {
            for picker in PickerId::ALL {
                let Some(pick_value) = per_picker.get(picker.as_str()) else {
                    continue;
                };
                let single = book_from_value(&Value::Object(Map::from_iter([(
                    raw_key.clone(),
                    pick_value.clone(),
                )])));
                if let Some(book) = books.get_mut(&picker) {
                    book.extend(canonicalize(single));
                }
            }
        }
    }

    Ok(books)
}

fn canonicalize(book: PickBook) -> PickBook {
    book.into_iter()
        .filter_map(|(key, pick)| match key.canonical() {
            Some(canonical) => Some((canonical, pick)),
            None => {
                warn!(game = %key, "skipping pick with unrecognized game key");
                None
            }
        })
        .collect()
}

/// Re-key a canonical book onto the schedule's own keys so stored picks
/// line up with displayed games. Returns the re-keyed book and the number
/// of picks that matched no scheduled game.
pub fn rekey_to_schedule(book: &PickBook, schedule: &Schedule) -> (PickBook, usize) {
    let mut rekeyed = PickBook::new();
    let mut unmatched = 0;

    for (key, pick) in book {
        match schedule.find_canonical(key) {
            Some(game) => {
                rekeyed.insert(game.key(), *pick);
            }
            None => {
                warn!(game = %key, "submitted pick matches no scheduled game");
                unmatched += 1;
            }
        }
    }

    (rekeyed, unmatched)
}
