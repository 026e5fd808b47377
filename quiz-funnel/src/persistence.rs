use std::{collections::BTreeMap, sync::Arc};

use quiz_funnel_types::{AnswerValue, Answers, KeyValueStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "emagrecenter-quiz";

/// The blob mirrored to storage after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub answers: Answers,

    #[serde(default)]
    pub step: usize,

    /// Set once the quiz was completed; lets the result route survive reloads.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub completed: bool,
}

/// The blob as read back, with each answer still raw JSON.
#[derive(Deserialize)]
struct StoredState {
    #[serde(default)]
    answers: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    step: usize,
    #[serde(default)]
    completed: bool,
}

/// Reads and writes the persisted state under a single key.
///
/// Never fails its caller: a missing, unreadable or undecodable blob loads as
/// the default state, and failed writes are logged and dropped.
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl Persistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load(&self) -> PersistedState {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return PersistedState::default(),
            Err(e) => {
                warn!(key = %self.key, "Failed to read persisted quiz state: {e}");
                return PersistedState::default();
            }
        };

        let stored: StoredState = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(key = %self.key, "Discarding undecodable quiz state: {e}");
                return PersistedState::default();
            }
        };

        // A bad answer costs only that answer.
        let mut answers = Answers::new();
        for (name, value) in stored.answers {
            match serde_json::from_value::<AnswerValue>(value) {
                Ok(value) => answers.insert(name, value),
                Err(e) => {
                    warn!(key = %self.key, answer = %name, "Dropping undecodable answer: {e}");
                }
            }
        }

        PersistedState {
            answers,
            step: stored.step,
            completed: stored.completed,
        }
    }

    pub fn save(&self, state: &PersistedState) {
        let raw = match serde_json::to_string(state) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.key, "Failed to encode quiz state: {e}");
                return;
            }
        };

        match self.store.set(&self.key, &raw) {
            Ok(()) => debug!(key = %self.key, step = state.step, "saved quiz state"),
            Err(e) => warn!(key = %self.key, "Failed to save quiz state: {e}"),
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            warn!(key = %self.key, "Failed to clear quiz state: {e}");
        }
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").field("key", &self.key).finish_non_exhaustive()
    }
}
