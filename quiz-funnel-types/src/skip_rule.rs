use serde::{Deserialize, Serialize};

use crate::{AnswerKey, AnswerValue, Answers};

/// A serializable predicate over the answers.
///
/// Attached to a step, it makes traversal bypass that step whenever it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum SkipRule {
    /// Holds when the answer under `key` equals `value`.
    AnswerEquals { key: AnswerKey, value: AnswerValue },

    /// Holds when `key` has a non-blank answer.
    Answered { key: AnswerKey },

    /// Holds when any nested rule holds. An empty list never holds.
    Any { rules: Vec<SkipRule> },
}

impl SkipRule {
    pub fn answer_equals(key: impl Into<AnswerKey>, value: impl Into<AnswerValue>) -> Self {
        Self::AnswerEquals {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn answered(key: impl Into<AnswerKey>) -> Self {
        Self::Answered { key: key.into() }
    }

    pub fn any(rules: Vec<SkipRule>) -> Self {
        Self::Any { rules }
    }

    /// Evaluate the rule against the current answers.
    pub fn applies(&self, answers: &Answers) -> bool {
        match self {
            Self::AnswerEquals { key, value } => answers.get(key) == Some(value),
            Self::Answered { key } => answers.has_value(key),
            Self::Any { rules } => rules.iter().any(|rule| rule.applies(answers)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_equals_matches_exact_value() {
        let rule = SkipRule::answer_equals(AnswerKey::Sex, "male");

        assert!(rule.applies(&Answers::new().with(AnswerKey::Sex, "male")));
        assert!(!rule.applies(&Answers::new().with(AnswerKey::Sex, "female")));
        assert!(!rule.applies(&Answers::new()));
    }

    #[test]
    fn answered_ignores_blank_values() {
        let rule = SkipRule::answered(AnswerKey::MedicationPreference);

        assert!(rule.applies(&Answers::new().with(AnswerKey::MedicationPreference, "wegovy")));
        assert!(!rule.applies(&Answers::new().with(AnswerKey::MedicationPreference, "")));
    }

    #[test]
    fn any_combines_rules() {
        let rule = SkipRule::any(vec![
            SkipRule::answer_equals(AnswerKey::Sex, "male"),
            SkipRule::answered(AnswerKey::BariatricSurgery),
        ]);

        assert!(rule.applies(&Answers::new().with(AnswerKey::BariatricSurgery, "no")));
        assert!(!rule.applies(&Answers::new().with(AnswerKey::Sex, "female")));
        assert!(!SkipRule::any(Vec::new()).applies(&Answers::new()));
    }

    #[test]
    fn serialized_form() {
        let rule = SkipRule::answer_equals(AnswerKey::Sex, "male");
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"rule": "answer-equals", "key": "sex", "value": "male"})
        );

        let back: SkipRule = serde_json::from_value(json).unwrap();
        assert_eq!(back, rule);
    }
}
