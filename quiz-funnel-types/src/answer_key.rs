use std::{
    cmp::Ordering,
    convert::Infallible,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

macro_rules! answer_keys {
    ($($(#[$doc:meta])* $variant:ident => $wire:literal,)*) => {
        /// Key of an entry in `Answers`.
        ///
        /// Known fields get their own variant so skip rules and personalization can
        /// match on them without string comparisons. Keys introduced by newer
        /// catalogs that the engine doesn't know about land in `Other`, which keeps
        /// the catalog free to add questions without touching this type.
        ///
        /// Equality, ordering and hashing go by wire name, so `Other("sex")`
        /// and `Sex` are the same key.
        #[derive(Debug, Clone, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum AnswerKey {
            $($(#[$doc])* $variant,)*
            /// A key not known to this version of the engine.
            Other(String),
        }

        impl AnswerKey {
            /// All known keys, in declaration order.
            pub const KNOWN: &'static [AnswerKey] = &[$(AnswerKey::$variant,)*];

            /// The wire name of this key, as used in persisted state and catalogs.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)*
                    Self::Other(key) => key,
                }
            }
        }

        impl From<&str> for AnswerKey {
            fn from(key: &str) -> Self {
                match key {
                    $($wire => Self::$variant,)*
                    other => Self::Other(other.to_string()),
                }
            }
        }
    };
}

answer_keys! {
    /// GLP-1 medications the respondent has used before.
    MedicationsUsed => "medicationsUsed",
    /// Two-letter Brazilian state code.
    State => "state",
    PlanPreference => "planPreference",
    /// `mounjaro` or `wegovy`; may be pre-seeded from a deep link.
    MedicationPreference => "medicationPreference",
    Name => "name",
    FirstName => "firstName",
    BirthDate => "birthDate",
    /// `male` or `female`.
    Sex => "sex",
    PregnancyOrBreastfeeding => "pregnancyOrBreastfeeding",
    /// Height in centimetres.
    Height => "height",
    /// Weight in kilograms.
    Weight => "weight",
    HighestWeight => "highestWeight",
    GoalWeight => "goalWeight",
    HasGoalEvent => "hasGoalEvent",
    GoalEventDate => "goalEventDate",
    GoalEventName => "goalEventName",
    Whatsapp => "whatsapp",
    Email => "email",
    PrivacyConsent => "privacyConsent",
    Diagnoses => "diagnoses",
    BariatricSurgery => "bariatricSurgery",
    TakesRegularMedication => "takesRegularMedication",
    RegularMedications => "regularMedications",
    MedicationAllergies => "medicationAllergies",
    AdditionalNotes => "additionalNotes",
}

impl AnswerKey {
    /// Check if this key is one of the known fields.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Replace an `Other` carrying a known wire name with its variant.
    pub fn canonical(self) -> Self {
        match self {
            Self::Other(key) => Self::from(key),
            known => known,
        }
    }
}

impl PartialEq for AnswerKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for AnswerKey {}

impl PartialOrd for AnswerKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AnswerKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for AnswerKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<String> for AnswerKey {
    fn from(key: String) -> Self {
        match Self::from(key.as_str()) {
            Self::Other(_) => Self::Other(key),
            known => known,
        }
    }
}

impl From<AnswerKey> for String {
    fn from(key: AnswerKey) -> Self {
        match key {
            AnswerKey::Other(key) => key,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for AnswerKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_round_trip_through_wire_names() {
        for key in AnswerKey::KNOWN {
            assert_eq!(&AnswerKey::from(key.as_str()), key);
            assert!(key.is_known());
        }
    }

    #[test]
    fn unknown_key_lands_in_other() {
        let key = AnswerKey::from("favouriteColour");
        assert_eq!(key, AnswerKey::Other("favouriteColour".to_string()));
        assert!(!key.is_known());
        assert_eq!(key.as_str(), "favouriteColour");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&AnswerKey::MedicationPreference).unwrap();
        assert_eq!(json, "\"medicationPreference\"");

        let parsed: AnswerKey = serde_json::from_str("\"sex\"").unwrap();
        assert_eq!(parsed, AnswerKey::Sex);
    }

    #[test]
    fn other_with_known_wire_name_is_the_known_key() {
        let spelled_out = AnswerKey::Other("sex".to_string());
        assert_eq!(spelled_out, AnswerKey::Sex);
        assert_eq!(spelled_out.cmp(&AnswerKey::Sex), Ordering::Equal);
        assert!(matches!(spelled_out.canonical(), AnswerKey::Sex));

        let unknown = AnswerKey::Other("favouriteColour".to_string()).canonical();
        assert!(matches!(unknown, AnswerKey::Other(ref key) if key == "favouriteColour"));
    }
}
