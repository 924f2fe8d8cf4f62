//! Pick state per picker: a two-slot pick (spread side, total side) per game.
//!
//! Every read boundary goes through [`normalize_pick`], so malformed stored
//! values collapse to an empty pick instead of failing. Empty picks are never
//! stored: a key is present in a [`PickBook`] only while at least one slot
//! is set.

pub mod import;


use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    cli::types::{PickerId, Selection, SpreadSide, TotalSide},
    error::{PickError, Result},
    schedule::GameKey,
    storage::KeyValueStore,
};

/// One picker's choice for one game. Both slots are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pick {
    pub spread: Option<SpreadSide>,
    pub total: Option<TotalSide>,
}

impl Pick {
    pub fn new(spread: Option<SpreadSide>, total: Option<TotalSide>) -> Self {
        Self { spread, total }
    }

    /// Pick from loose side strings (`home`, `H`, `o`, ...). Unrecognized
    /// or missing values leave that slot empty.
    pub fn from_sides(spread: Option<&str>, total: Option<&str>) -> Self {
        Self {
            spread: spread.and_then(SpreadSide::parse_lenient),
            total: total.and_then(TotalSide::parse_lenient),
        }
    }

    /// No side chosen in either dimension.
    pub fn is_empty(&self) -> bool {
        self.spread.is_none() && self.total.is_none()
    }

    /// Apply one button press: choosing the side already held clears it,
    /// any other side replaces it. The other dimension is untouched.
    pub fn toggled(self, selection: Selection) -> Pick {
        match selection {
            Selection::Spread(side) => Pick {
                spread: if self.spread == Some(side) {
                    None
                } else {
                    Some(side)
                },
                ..self
            },
            Selection::Total(side) => Pick {
                total: if self.total == Some(side) {
                    None
                } else {
                    Some(side)
                },
                ..self
            },
        }
    }
}

/// Coerce any stored JSON value into a pick.
///
/// Non-objects, missing keys and unrecognized side strings all read as
/// "no pick" for that slot.
pub fn normalize_pick(value: &Value) -> Pick {
    let Some(obj) = value.as_object() else {
        return Pick::default();
    };
    let slot = |name: &str| obj.get(name).and_then(Value::as_str);
    Pick::from_sides(slot("spread"), slot("total"))
}

/// A picker's picks keyed by game.
pub type PickBook = BTreeMap<GameKey, Pick>;

/// Build a book from a JSON value, normalizing each entry and dropping
/// empty picks. Anything other than an object yields an empty book.
pub fn book_from_value(value: &Value) -> PickBook {
    let Some(obj) = value.as_object() else {
        return PickBook::new();
    };
    obj.iter()
        .map(|(key, raw)| (GameKey::from(key.as_str()), normalize_pick(raw)))
        .filter(|(_, pick)| !pick.is_empty())
        .collect()
}

/// Parse a persisted book. Corrupt text reads as an empty book.
pub fn parse_book(raw: &str) -> PickBook {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => book_from_value(&value),
        Err(err) => {
            warn!(%err, "stored picks are not valid JSON, treating as empty");
            PickBook::new()
        }
    }
}

/// Pick persistence for both pickers over an injected backend.
pub struct PickStore<S> {
    backend: S,
}

impl<S: KeyValueStore> PickStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Current picks for `picker`. Absent, unreadable or corrupt state
    /// yields an empty book.
    pub fn load(&self, picker: PickerId) -> PickBook {
        let key = picker.storage_key();
        match self.backend.get(&key) {
            Ok(Some(raw)) => parse_book(&raw),
            Ok(None) => PickBook::new(),
            Err(err) => {
                warn!(%picker, %err, "could not read stored picks, treating as empty");
                PickBook::new()
            }
        }
    }

    /// Both pickers' books.
    pub fn load_all(&self) -> BTreeMap<PickerId, PickBook> {
        PickerId::ALL.iter().map(|&p| (p, self.load(p))).collect()
    }

    /// Replace the stored book for `picker`. Empty picks are pruned first.
    pub fn save(&mut self, picker: PickerId, book: &PickBook) -> Result<()> {
        let key = picker.storage_key();
        let pruned: PickBook = book
            .iter()
            .filter(|(_, pick)| !pick.is_empty())
            .map(|(k, p)| (k.clone(), *p))
            .collect();

        let save_failure = |message: String| PickError::SaveFailure {
            key: key.clone(),
            message,
        };
        let json = serde_json::to_string(&pruned).map_err(|e| save_failure(e.to_string()))?;
        self.backend
            .set(&key, &json)
            .map_err(|e| save_failure(e.to_string()))?;

        debug!(%picker, picks = pruned.len(), "saved picks");
        Ok(())
    }

    /// Toggle one side for one game and persist the result. Returns the
    /// game's pick after the toggle (empty when it was removed).
    pub fn toggle_pick(
        &mut self,
        picker: PickerId,
        key: &GameKey,
        selection: Selection,
    ) -> Result<Pick> {
        let mut book = self.load(picker);
        let current = book.get(key).copied().unwrap_or_default();
        let updated = current.toggled(selection);

        if updated.is_empty() {
            book.remove(key);
        } else {
            book.insert(key.clone(), updated);
        }

        self.save(picker, &book)?;
        debug!(%picker, game = %key, %selection, ?updated, "toggled pick");
        Ok(updated)
    }

    /// Write a whole pick for one game; an empty pick removes the entry.
    pub fn set_pick(&mut self, picker: PickerId, key: &GameKey, pick: Pick) -> Result<()> {
        let mut book = self.load(picker);
        if pick.is_empty() {
            book.remove(key);
        } else {
            book.insert(key.clone(), pick);
        }
        self.save(picker, &book)
    }

    /// Remove every pick for `picker`.
    pub fn clear(&mut self, picker: PickerId) -> Result<()> {
        self.backend
            .remove(&picker.storage_key())
            .map_err(|e| PickError::SaveFailure {
                key: picker.storage_key(),
                message: e.to_string(),
            })
    }
}
