//! Sparse (state, action) value table with an implicit zero default.

use std::collections::HashMap;

use crate::game::{Action, GameState};

/// Value assumed for any key never written.
pub const DEFAULT_VALUE: f64 = 0.0;

/// Mapping from `(GameState, Action)` to a real-valued estimate.
///
/// Reads never insert: [`ValueTable::get`] falls back to [`DEFAULT_VALUE`]
/// for unknown keys and only [`ValueTable::set`] creates entries. Entries are
/// never removed, so the table grows monotonically over a training run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueTable {
    values: HashMap<(GameState, Action), f64>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value for the key, or [`DEFAULT_VALUE`].
    pub fn get(&self, state: &GameState, action: Action) -> f64 {
        self.values
            .get(&(*state, action))
            .copied()
            .unwrap_or(DEFAULT_VALUE)
    }

    /// Creates or overwrites the entry for the key.
    pub fn set(&mut self, state: GameState, action: Action, value: f64) {
        self.values.insert((state, action), value);
    }

    /// Returns true if the key has been written.
    pub fn contains(&self, state: &GameState, action: Action) -> bool {
        self.values.contains_key(&(*state, action))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of entries holding NaN or an infinity.
    pub fn non_finite_count(&self) -> usize {
        self.values.values().filter(|v| !v.is_finite()).count()
    }

    /// Iterates over stored entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&GameState, Action, f64)> {
        self.values
            .iter()
            .map(|((state, action), value)| (state, *action, *value))
    }

    /// Largest value among `actions` in `state`.
    ///
    /// Returns [`DEFAULT_VALUE`] when `actions` is empty.
    pub fn max_over<I>(&self, state: &GameState, actions: I) -> f64
    where
        I: IntoIterator<Item = Action>,
    {
        actions
            .into_iter()
            .map(|action| self.get(state, action))
            .fold(None, |best: Option<f64>, v| {
                Some(best.map_or(v, |b| b.max(v)))
            })
            .unwrap_or(DEFAULT_VALUE)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    //! Serialises the table as a list of `{state, action, value}` entries,
    //! sorted by key so that output is stable.

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::ValueTable;
    use crate::game::{Action, GameState};

    #[derive(Serialize)]
    struct EntryRef<'a> {
        state: &'a GameState,
        action: Action,
        value: f64,
    }

    #[derive(Deserialize)]
    struct Entry {
        state: GameState,
        action: Action,
        value: f64,
    }

    impl Serialize for ValueTable {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut entries: Vec<EntryRef<'_>> = self
                .iter()
                .map(|(state, action, value)| EntryRef {
                    state,
                    action,
                    value,
                })
                .collect();
            entries.sort_by(|a, b| (a.state.cells(), a.action).cmp(&(b.state.cells(), b.action)));
            serializer.collect_seq(entries)
        }
    }

    impl<'de> Deserialize<'de> for ValueTable {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let entries = Vec::<Entry>::deserialize(deserializer)?;
            let mut table = ValueTable::new();
            for entry in entries {
                table.set(entry.state, entry.action, entry.value);
            }
            Ok(table)
        }
    }
}
