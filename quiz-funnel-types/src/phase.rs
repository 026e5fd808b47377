use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse grouping of steps for progress display and analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Onboarding,
    Preferences,
    Benefits,
    PersonalData,
    MedicalScreening,
    Result,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Onboarding,
        Phase::Preferences,
        Phase::Benefits,
        Phase::PersonalData,
        Phase::MedicalScreening,
        Phase::Result,
    ];

    /// The wire name of this phase, e.g. `personal-data`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Onboarding => "onboarding",
            Self::Preferences => "preferences",
            Self::Benefits => "benefits",
            Self::PersonalData => "personal-data",
            Self::MedicalScreening => "medical-screening",
            Self::Result => "result",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde_name() {
        for phase in Phase::ALL {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{phase}\""));
        }
    }
}
