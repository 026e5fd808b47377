use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AnswerKey, AnswerValue};

/// Error type for answer access operations.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("Missing answer for key: {0}")]
    Missing(AnswerKey),

    #[error("Type mismatch at key '{key}': expected {expected}, got {actual}")]
    TypeMismatch {
        key: AnswerKey,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Answers collected across all visited steps.
///
/// Ordered by key so the persisted form is stable between writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    values: BTreeMap<AnswerKey, AnswerValue>,
}

impl Answers {
    /// Create a new empty answer map.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Builder-style insert, handy for seeding answers.
    pub fn with(mut self, key: impl Into<AnswerKey>, value: impl Into<AnswerValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an answer, replacing any previous value for the key.
    ///
    /// The key is stored in its canonical form.
    pub fn insert(&mut self, key: impl Into<AnswerKey>, value: impl Into<AnswerValue>) {
        let key = key.into().canonical();
        self.values.remove(&key);
        self.values.insert(key, value.into());
    }

    /// Get the answer for the given key.
    pub fn get(&self, key: &AnswerKey) -> Option<&AnswerValue> {
        self.values.get(key)
    }

    /// Check if an answer exists for the given key.
    pub fn contains(&self, key: &AnswerKey) -> bool {
        self.values.contains_key(key)
    }

    /// Remove the answer for the given key.
    pub fn remove(&mut self, key: &AnswerKey) -> Option<AnswerValue> {
        self.values.remove(key)
    }

    /// Get an iterator over all key-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&AnswerKey, &AnswerValue)> {
        self.values.iter()
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge another answer map into this one. Keys present in `other` win;
    /// keys only present here are left untouched.
    pub fn merge(&mut self, other: Answers) {
        for (key, value) in other.values {
            self.insert(key, value);
        }
    }

    /// Drop every answer.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    // === Convenience accessors ===

    /// Get a text answer.
    pub fn get_text(&self, key: &AnswerKey) -> Result<&str, AnswerError> {
        match self.get(key) {
            Some(AnswerValue::Text(s)) => Ok(s),
            Some(other) => Err(AnswerError::TypeMismatch {
                key: key.clone(),
                expected: "Text",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::Missing(key.clone())),
        }
    }

    /// Get a numeric answer.
    pub fn get_number(&self, key: &AnswerKey) -> Result<f64, AnswerError> {
        match self.get(key) {
            Some(AnswerValue::Number(n)) => Ok(*n),
            Some(other) => Err(AnswerError::TypeMismatch {
                key: key.clone(),
                expected: "Number",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::Missing(key.clone())),
        }
    }

    /// Get a boolean answer.
    pub fn get_bool(&self, key: &AnswerKey) -> Result<bool, AnswerError> {
        match self.get(key) {
            Some(AnswerValue::Bool(b)) => Ok(*b),
            Some(other) => Err(AnswerError::TypeMismatch {
                key: key.clone(),
                expected: "Bool",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::Missing(key.clone())),
        }
    }

    /// Get a list answer.
    pub fn get_list(&self, key: &AnswerKey) -> Result<&[String], AnswerError> {
        match self.get(key) {
            Some(AnswerValue::List(items)) => Ok(items),
            Some(other) => Err(AnswerError::TypeMismatch {
                key: key.clone(),
                expected: "List",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::Missing(key.clone())),
        }
    }

    /// Text answer or `None`, ignoring type mismatches.
    pub fn text(&self, key: &AnswerKey) -> Option<&str> {
        self.get(key).and_then(AnswerValue::as_str)
    }

    /// Numeric answer or `None`, ignoring type mismatches.
    pub fn number(&self, key: &AnswerKey) -> Option<f64> {
        self.get(key).and_then(AnswerValue::as_number)
    }

    /// Check if the answer for a key is present and not blank.
    ///
    /// An empty string or empty selection counts as "not answered".
    pub fn has_value(&self, key: &AnswerKey) -> bool {
        self.get(key).is_some_and(|value| !value.is_blank())
    }
}

impl FromIterator<(AnswerKey, AnswerValue)> for Answers {
    fn from_iter<I: IntoIterator<Item = (AnswerKey, AnswerValue)>>(iter: I) -> Self {
        let mut answers = Self::new();
        for (key, value) in iter {
            answers.insert(key, value);
        }
        answers
    }
}

impl IntoIterator for Answers {
    type Item = (AnswerKey, AnswerValue);
    type IntoIter = std::collections::btree_map::IntoIter<AnswerKey, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Answers {
    type Item = (&'a AnswerKey, &'a AnswerValue);
    type IntoIter = std::collections::btree_map::Iter<'a, AnswerKey, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
