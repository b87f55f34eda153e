//! Autocomplete history for the meeting form's people and location pickers.
//!
//! The only state kept across sessions: the ten most recent distinct e-mail
//! addresses and locations, saved as `{ "emails": [...], "locations": [...] }`
//! under a single key.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::settings::GridSettings;

mod storage;

pub use storage::{FileStore, KeyValueStore, MemoryStore};

pub const HISTORY_KEY: &str = "meeting-scheduler.autocomplete";
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteHistory {
    pub emails: Vec<String>,
    pub locations: Vec<String>,
}

impl AutocompleteHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the history stored under `key`. Missing or unreadable entries
    /// give an empty history.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Self {
        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                log::warn!("Failed to read autocomplete history: {:#}", e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Self>(&raw) {
            Ok(mut history) => {
                history.emails = normalize(history.emails, Matching::IgnoreCase);
                history.locations = normalize(history.locations, Matching::Exact);
                history
            }
            Err(e) => {
                log::warn!("Discarding corrupt autocomplete history under '{}': {}", key, e);
                Self::default()
            }
        }
    }

    /// Load from the key configured in `settings`.
    pub fn load_for(store: &dyn KeyValueStore, settings: &GridSettings) -> Self {
        Self::load(store, &settings.history_key)
    }

    pub fn save_for(&self, store: &mut dyn KeyValueStore, settings: &GridSettings) -> Result<()> {
        self.save(store, &settings.history_key)
    }

    pub fn save(&self, store: &mut dyn KeyValueStore, key: &str) -> Result<()> {
        let data = serde_json::to_string(self).context("failed to serialize autocomplete history")?;
        store
            .set(key, &data)
            .with_context(|| format!("failed to store autocomplete history under '{}'", key))?;
        log::debug!(
            "Saved autocomplete history ({} emails, {} locations)",
            self.emails.len(),
            self.locations.len()
        );
        Ok(())
    }

    /// Record an address as most recent. Returns false for blank input.
    pub fn remember_email(&mut self, email: &str) -> bool {
        remember(&mut self.emails, email, Matching::IgnoreCase)
    }

    /// Record a location as most recent. Returns false for blank input.
    /// Locations differing only in case are kept apart.
    pub fn remember_location(&mut self, location: &str) -> bool {
        remember(&mut self.locations, location, Matching::Exact)
    }

    pub fn suggest_emails(&self, prefix: &str) -> Vec<&str> {
        suggest(&self.emails, prefix)
    }

    pub fn suggest_locations(&self, prefix: &str) -> Vec<&str> {
        suggest(&self.locations, prefix)
    }
}

/// How two history entries are compared for duplicates.
#[derive(Clone, Copy)]
enum Matching {
    /// E-mail addresses compare case-insensitively.
    IgnoreCase,
    Exact,
}

impl Matching {
    fn same(self, a: &str, b: &str) -> bool {
        match self {
            Matching::IgnoreCase => a.eq_ignore_ascii_case(b),
            Matching::Exact => a == b,
        }
    }
}

fn remember(entries: &mut Vec<String>, value: &str, matching: Matching) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }

    entries.retain(|existing| !matching.same(existing, value));
    entries.insert(0, value.to_string());
    entries.truncate(HISTORY_LIMIT);
    true
}

fn suggest<'a>(entries: &'a [String], prefix: &str) -> Vec<&'a str> {
    let prefix = prefix.trim().to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.to_lowercase().starts_with(&prefix))
        .map(String::as_str)
        .collect()
}

/// Drop blanks and later duplicates, keep the ten most recent.
fn normalize(entries: Vec<String>, matching: Matching) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(entries.len().min(HISTORY_LIMIT));
    for entry in entries {
        let entry = entry.trim();
        if entry.is_empty() || kept.iter().any(|k| matching.same(k, entry)) {
            continue;
        }
        kept.push(entry.to_string());
        if kept.len() == HISTORY_LIMIT {
            break;
        }
    }
    kept
}
