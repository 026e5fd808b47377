use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::StepDefinition;

/// Error type for catalog construction.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog has no steps")]
    Empty,

    #[error("Duplicate step id: {0}")]
    DuplicateStepId(String),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The ordered, immutable list of steps that makes up a funnel.
///
/// Catalog order is the default traversal order. A catalog always holds at
/// least one step and every step id is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StepDefinition>", into = "Vec<StepDefinition>")]
pub struct StepCatalog {
    steps: Vec<StepDefinition>,
}

impl StepCatalog {
    /// Create a catalog, checking that it is non-empty and ids are unique.
    pub fn new(steps: Vec<StepDefinition>) -> Result<Self, CatalogError> {
        if steps.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(steps.len());
        for step in &steps {
            if !seen.insert(step.id.as_str()) {
                return Err(CatalogError::DuplicateStepId(step.id.clone()));
            }
        }

        Ok(Self { steps })
    }

    /// Parse a catalog from its JSON form (an array of steps).
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let steps: Vec<StepDefinition> = serde_json::from_str(json)?;
        Self::new(steps)
    }

    /// Serialize the catalog to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.steps)?)
    }

    /// Get the step at `index`.
    pub fn get(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    /// Number of steps. Always at least one.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Index of the last step.
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Index of the step with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepDefinition> {
        self.steps.iter()
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }
}

impl TryFrom<Vec<StepDefinition>> for StepCatalog {
    type Error = CatalogError;

    fn try_from(steps: Vec<StepDefinition>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

impl From<StepCatalog> for Vec<StepDefinition> {
    fn from(catalog: StepCatalog) -> Self {
        catalog.steps
    }
}

impl<'a> IntoIterator for &'a StepCatalog {
    type Item = &'a StepDefinition;
    type IntoIter = std::slice::Iter<'a, StepDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnswerKey, InfoScreen, Phase, Question, QuestionKind, SkipRule};

    fn step(id: &str) -> StepDefinition {
        StepDefinition::new(
            id,
            Phase::Onboarding,
            Question::new(AnswerKey::from(id), QuestionKind::Interstitial(InfoScreen::default())),
        )
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(StepCatalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = StepCatalog::new(vec![step("a"), step("b"), step("a")]);
        assert!(matches!(result, Err(CatalogError::DuplicateStepId(id)) if id == "a"));
    }

    #[test]
    fn lookup_by_index_and_id() {
        let catalog = StepCatalog::new(vec![step("a"), step("b"), step("c")]).unwrap();

        assert_eq!(catalog.step_count(), 3);
        assert_eq!(catalog.last_index(), 2);
        assert_eq!(catalog.position("b"), Some(1));
        assert_eq!(catalog.position("z"), None);
        assert_eq!(catalog.get(2).map(|s| s.id.as_str()), Some("c"));
        assert!(catalog.get(3).is_none());
    }

    #[test]
    fn json_round_trip_keeps_skip_rules() {
        let catalog = StepCatalog::new(vec![
            step("a"),
            step("b").skip_when(SkipRule::answer_equals(AnswerKey::Sex, "male")),
        ])
        .unwrap();

        let json = catalog.to_json().unwrap();
        let back = StepCatalog::from_json(&json).unwrap();
        assert_eq!(back, catalog);
        assert!(back.get(1).unwrap().skip.is_some());
    }

    #[test]
    fn from_json_validates() {
        assert!(matches!(StepCatalog::from_json("[]"), Err(CatalogError::Empty)));
        assert!(matches!(StepCatalog::from_json("{"), Err(CatalogError::Json(_))));
    }
}
