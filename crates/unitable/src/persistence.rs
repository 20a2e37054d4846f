//! Saving and restoring view state.
//!
//! The persisted form is a JSON document:
//!
//! ```json
//! {"searchTerm":"","pageSize":10,"sort":{"column":"name","direction":"asc"},
//!  "currentPage":1,"hiddenCols":["office"],"externalFilters":null}
//! ```
//!
//! Every field is optional on read. Missing fields fall back to the
//! config-derived defaults, so a snapshot written by an older grid (or
//! edited by hand) still restores what it can.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{GridError, Result};
use crate::state::{SortDirection, ViewState};
use crate::store::{MemoryStore, StateStore};

/// Sort entry of a persisted snapshot.
///
/// `column` is `None` when the key is missing and `Some(None)` when it is an
/// explicit `null` (the sort was cleared).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedSort {
    #[serde(
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub column: Option<Option<String>>,
    pub direction: Option<SortDirection>,
}

fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// The durable subset of [`ViewState`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedSnapshot {
    pub search_term: Option<String>,
    pub page_size: Option<usize>,
    pub sort: Option<PersistedSort>,
    pub current_page: Option<usize>,
    pub hidden_cols: Option<Vec<String>>,
    pub external_filters: Option<serde_json::Value>,
}

impl PersistedSnapshot {
    pub fn from_state(state: &ViewState) -> Self {
        PersistedSnapshot {
            search_term: Some(state.search_term.clone()),
            page_size: Some(state.page_size),
            sort: Some(PersistedSort {
                column: Some(state.sort_column.clone()),
                direction: Some(state.sort_direction),
            }),
            current_page: Some(state.current_page),
            hidden_cols: Some(state.hidden_columns.iter().cloned().collect()),
            external_filters: state.external_filters.clone(),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(GridError::Snapshot)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(GridError::Snapshot)
    }

    /// Overlays the snapshot on `defaults`.
    ///
    /// Fields the snapshot lacks keep their default. A zero page size or page
    /// number is treated as missing. Sort column and direction fall back
    /// independently; an explicit `null` column restores as unsorted.
    pub fn restore_onto(&self, defaults: &ViewState) -> ViewState {
        let sort = self.sort.clone().unwrap_or_default();

        ViewState {
            search_term: self
                .search_term
                .clone()
                .unwrap_or_else(|| defaults.search_term.clone()),
            page_size: self
                .page_size
                .filter(|n| *n > 0)
                .unwrap_or(defaults.page_size),
            sort_column: sort
                .column
                .unwrap_or_else(|| defaults.sort_column.clone()),
            sort_direction: sort.direction.unwrap_or(defaults.sort_direction),
            current_page: self.current_page.filter(|n| *n > 0).unwrap_or(1),
            hidden_columns: match &self.hidden_cols {
                Some(keys) => keys.iter().cloned().collect(),
                None => defaults.hidden_columns.clone(),
            },
            external_filters: self.external_filters.clone(),
        }
    }

    /// External filters worth announcing to the host.
    ///
    /// `null`, `false`, `0` and `""` are restored into the state but not
    /// announced.
    pub fn restored_filters(&self) -> Option<&serde_json::Value> {
        self.external_filters.as_ref().filter(|value| is_truthy(value))
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reads and writes snapshots through a [`StateStore`].
pub struct Persistence {
    store: Box<dyn StateStore>,
}

impl fmt::Debug for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Default for Persistence {
    fn default() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl Persistence {
    pub fn new(store: impl StateStore + 'static) -> Self {
        Persistence {
            store: Box::new(store),
        }
    }

    /// Reads the snapshot under `key`.
    ///
    /// Unparseable text is logged and treated as absent.
    pub fn load(&self, key: &str) -> Option<PersistedSnapshot> {
        let text = self.store.get(key)?;
        match PersistedSnapshot::parse(&text) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!("ignoring malformed snapshot under '{}': {}", key, e);
                None
            }
        }
    }

    /// Writes the full snapshot of `state` under `key`.
    pub fn save(&mut self, key: &str, state: &ViewState) -> Result<()> {
        let text = PersistedSnapshot::from_state(state).to_json()?;
        self.store.set(key, &text)?;
        Ok(())
    }

    pub fn clear(&mut self, key: &str) -> Result<()> {
        self.store.remove(key)?;
        Ok(())
    }
}
