use serde::{Deserialize, Serialize};

use crate::{Answers, Phase, Question, SkipRule};

/// One screen of the funnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Unique identifier within the catalog.
    pub id: String,

    pub phase: Phase,

    pub question: Question,

    /// Traversal bypasses this step while the rule holds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<SkipRule>,
}

impl StepDefinition {
    pub fn new(id: impl Into<String>, phase: Phase, question: Question) -> Self {
        Self {
            id: id.into(),
            phase,
            question,
            skip: None,
        }
    }

    /// Attach a skip rule.
    pub fn skip_when(mut self, rule: SkipRule) -> Self {
        self.skip = Some(rule);
        self
    }

    /// Check if traversal should bypass this step given `answers`.
    pub fn should_skip(&self, answers: &Answers) -> bool {
        self.skip.as_ref().is_some_and(|rule| rule.applies(answers))
    }
}
