use std::fmt;

use quiz_funnel_types::{AnswerKey, Answers};
use serde::{Deserialize, Serialize};

/// The medication a respondent leans towards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicationPreference {
    /// Tirzepatide. The default when nothing else was chosen.
    #[default]
    Mounjaro,
    /// Semaglutide.
    Wegovy,
}

impl MedicationPreference {
    /// The answer value written under `medicationPreference`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mounjaro => "mounjaro",
            Self::Wegovy => "wegovy",
        }
    }

    /// Parse an answer value. Unknown values yield `None`.
    pub fn from_answer(value: &str) -> Option<Self> {
        match value {
            "mounjaro" => Some(Self::Mounjaro),
            "wegovy" => Some(Self::Wegovy),
            _ => None,
        }
    }

    /// The short code used in the `md` deep-link parameter.
    pub fn code(self) -> &'static str {
        match self {
            Self::Mounjaro => "t",
            Self::Wegovy => "s",
        }
    }

    /// Parse an `md` code (`t` for tirzepatide, `s` for semaglutide).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "t" => Some(Self::Mounjaro),
            "s" => Some(Self::Wegovy),
            _ => None,
        }
    }

    /// The preference recorded in `answers`, if it is a known one.
    pub fn recorded(answers: &Answers) -> Option<Self> {
        answers
            .text(&AnswerKey::MedicationPreference)
            .and_then(Self::from_answer)
    }

    /// The preference that drives the offer: wegovy only when explicitly
    /// chosen, mounjaro otherwise.
    pub fn effective(answers: &Answers) -> Self {
        Self::recorded(answers).unwrap_or_default()
    }

    pub fn product(self) -> Product {
        match self {
            Self::Mounjaro => Product::Tirzepatide60mg,
            Self::Wegovy => Product::Semaglutide5mg,
        }
    }
}

impl fmt::Display for MedicationPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product sold at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    Tirzepatide60mg,
    Semaglutide5mg,
}

impl Product {
    /// Product id understood by the checkout service.
    pub fn sku(self) -> &'static str {
        match self {
            Self::Tirzepatide60mg => "tirzepatida-60mg",
            Self::Semaglutide5mg => "semaglutida-5mg",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Tirzepatide60mg => "Tirzepatida 60mg",
            Self::Semaglutide5mg => "Semaglutida 5mg",
        }
    }

    /// Price in BRL.
    pub fn price(self) -> f64 {
        match self {
            Self::Tirzepatide60mg => 1799.99,
            Self::Semaglutide5mg => 399.99,
        }
    }

    pub fn currency(self) -> &'static str {
        "BRL"
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sku())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wegovy_maps_to_semaglutide() {
        let answers = Answers::new().with(AnswerKey::MedicationPreference, "wegovy");
        assert_eq!(
            MedicationPreference::effective(&answers).product().sku(),
            "semaglutida-5mg"
        );
    }

    #[test]
    fn anything_else_maps_to_tirzepatide() {
        for answers in [
            Answers::new(),
            Answers::new().with(AnswerKey::MedicationPreference, "mounjaro"),
            Answers::new().with(AnswerKey::MedicationPreference, "ozempic"),
        ] {
            assert_eq!(
                MedicationPreference::effective(&answers).product(),
                Product::Tirzepatide60mg
            );
        }
    }

    #[test]
    fn codes() {
        assert_eq!(MedicationPreference::from_code("t"), Some(MedicationPreference::Mounjaro));
        assert_eq!(MedicationPreference::from_code("s"), Some(MedicationPreference::Wegovy));
        assert_eq!(MedicationPreference::from_code("x"), None);
        assert_eq!(MedicationPreference::Wegovy.code(), "s");
    }
}
