//! Values derived from the answers to tailor later screens.

use quiz_funnel_types::{AnswerKey, Answers};
use serde::{Deserialize, Serialize};

/// Weight assumed when none was recorded, in kilograms.
pub const DEFAULT_WEIGHT_KG: f64 = 80.0;

/// Height assumed when none was recorded, in centimetres.
pub const DEFAULT_HEIGHT_CM: f64 = 170.0;

/// Expected relative loss on tirzepatide.
const MOUNJARO_LOSS: f64 = 0.25;

/// Expected relative loss on anything else.
const DEFAULT_LOSS: f64 = 0.17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    ObesityI,
    ObesityII,
    ObesityIII,
}

impl BmiCategory {
    pub fn classify(bmi: f64) -> Self {
        match bmi {
            b if b < 18.5 => Self::Underweight,
            b if b < 25.0 => Self::Normal,
            b if b < 30.0 => Self::Overweight,
            b if b < 35.0 => Self::ObesityI,
            b if b < 40.0 => Self::ObesityII,
            _ => Self::ObesityIII,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal weight",
            Self::Overweight => "Overweight",
            Self::ObesityI => "Obesity class I",
            Self::ObesityII => "Obesity class II",
            Self::ObesityIII => "Obesity class III",
        }
    }
}

/// A body-mass index and its band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bmi {
    pub value: f64,
    pub category: BmiCategory,
}

impl Bmi {
    /// Compute from weight in kilograms and height in centimetres.
    ///
    /// Returns `None` for non-positive inputs.
    pub fn compute(weight_kg: f64, height_cm: f64) -> Option<Self> {
        if weight_kg <= 0.0 || height_cm <= 0.0 {
            return None;
        }
        let height_m = height_cm / 100.0;
        let value = weight_kg / (height_m * height_m);
        Some(Self {
            value,
            category: BmiCategory::classify(value),
        })
    }

    /// Compute from the recorded measures, falling back to 80 kg and 170 cm.
    pub fn from_answers(answers: &Answers) -> Self {
        let weight = positive(answers.number(&AnswerKey::Weight)).unwrap_or(DEFAULT_WEIGHT_KG);
        let height = positive(answers.number(&AnswerKey::Height)).unwrap_or(DEFAULT_HEIGHT_CM);
        let value = weight / (height / 100.0).powi(2);
        Self {
            value,
            category: BmiCategory::classify(value),
        }
    }

    /// Position on a 15..45 gauge as a percentage in `[0, 100]`.
    pub fn gauge_position(&self) -> f64 {
        ((self.value - 15.0) / 30.0 * 100.0).clamp(0.0, 100.0)
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// Suggested goal weight in kilograms.
///
/// Assumes a 25% loss when the respondent explicitly prefers mounjaro and 17%
/// otherwise, rounded to whole kilograms.
pub fn suggested_goal_weight(answers: &Answers) -> f64 {
    let weight = positive(answers.number(&AnswerKey::Weight)).unwrap_or(DEFAULT_WEIGHT_KG);
    let loss = match answers.text(&AnswerKey::MedicationPreference) {
        Some("mounjaro") => MOUNJARO_LOSS,
        _ => DEFAULT_LOSS,
    };
    (weight * (1.0 - loss)).round()
}

/// The goal weight to preselect: the recorded one, or the suggestion.
pub fn goal_weight(answers: &Answers) -> f64 {
    positive(answers.number(&AnswerKey::GoalWeight)).unwrap_or_else(|| suggested_goal_weight(answers))
}

/// Copy with a masculine and a feminine variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderedText {
    #[serde(rename = "m")]
    pub male: String,
    #[serde(rename = "f")]
    pub female: String,
}

impl GenderedText {
    pub fn new(male: impl Into<String>, female: impl Into<String>) -> Self {
        Self {
            male: male.into(),
            female: female.into(),
        }
    }

    /// Pick the variant; the masculine form is used unless `female` is set.
    pub fn pick(&self, female: bool) -> &str {
        if female { &self.female } else { &self.male }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_bands() {
        let cases = [
            (17.0, BmiCategory::Underweight),
            (18.5, BmiCategory::Normal),
            (24.9, BmiCategory::Normal),
            (25.0, BmiCategory::Overweight),
            (30.0, BmiCategory::ObesityI),
            (35.0, BmiCategory::ObesityII),
            (40.0, BmiCategory::ObesityIII),
        ];
        for (value, expected) in cases {
            assert_eq!(BmiCategory::classify(value), expected, "bmi {value}");
        }
    }

    #[test]
    fn bmi_from_measures() {
        let bmi = Bmi::compute(92.0, 170.0).unwrap();
        assert!((bmi.value - 31.83).abs() < 0.01);
        assert_eq!(bmi.category, BmiCategory::ObesityI);
        assert!(Bmi::compute(80.0, 0.0).is_none());
    }

    #[test]
    fn bmi_defaults_when_unanswered() {
        let bmi = Bmi::from_answers(&Answers::new());
        assert!((bmi.value - 27.68).abs() < 0.01);
        assert_eq!(bmi.category, BmiCategory::Overweight);
    }

    #[test]
    fn gauge_is_clamped() {
        assert_eq!(Bmi::compute(30.0, 200.0).unwrap().gauge_position(), 0.0);
        assert_eq!(Bmi::compute(200.0, 150.0).unwrap().gauge_position(), 100.0);
    }

    #[test]
    fn goal_weight_suggestion() {
        let mounjaro = Answers::new()
            .with(AnswerKey::Weight, 100)
            .with(AnswerKey::MedicationPreference, "mounjaro");
        assert_eq!(suggested_goal_weight(&mounjaro), 75.0);

        let wegovy = Answers::new()
            .with(AnswerKey::Weight, 100)
            .with(AnswerKey::MedicationPreference, "wegovy");
        assert_eq!(suggested_goal_weight(&wegovy), 83.0);

        // 80 * 0.83 = 66.4
        assert_eq!(suggested_goal_weight(&Answers::new()), 66.0);
    }

    #[test]
    fn recorded_goal_weight_wins() {
        let answers = Answers::new()
            .with(AnswerKey::Weight, 100)
            .with(AnswerKey::GoalWeight, 70);
        assert_eq!(goal_weight(&answers), 70.0);
    }

    #[test]
    fn gendered_text() {
        let text = GenderedText::new("Pronto", "Pronta");
        assert_eq!(text.pick(true), "Pronta");
        assert_eq!(text.pick(false), "Pronto");
    }
}
