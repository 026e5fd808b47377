use serde::{Deserialize, Serialize};

use crate::Phase;

/// Events the funnel reports to analytics collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum AnalyticsEvent {
    /// A step was entered.
    StepViewed {
        step_id: String,
        step_index: usize,
        phase: Phase,
    },

    /// The user advanced past a step.
    StepCompleted {
        step_id: String,
        step_index: usize,
        phase: Phase,
        time_on_step_ms: u64,
    },

    /// The user left a step without advancing (back, jump, history).
    StepAbandoned {
        step_id: String,
        step_index: usize,
        time_on_step_ms: u64,
    },

    QuizCompleted { total_steps: usize },

    /// A checkout URL was built for `product`.
    CheckoutStarted { product: String },

    Purchase {
        product: String,
        transaction_id: String,
        value: f64,
        currency: String,
    },
}

impl AnalyticsEvent {
    /// The event name, as used by analytics backends.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StepViewed { .. } => "step-viewed",
            Self::StepCompleted { .. } => "step-completed",
            Self::StepAbandoned { .. } => "step-abandoned",
            Self::QuizCompleted { .. } => "quiz-completed",
            Self::CheckoutStarted { .. } => "checkout-started",
            Self::Purchase { .. } => "purchase",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_matches_tag() {
        let event = AnalyticsEvent::StepCompleted {
            step_id: "sex".into(),
            step_index: 1,
            phase: Phase::Onboarding,
            time_on_step_ms: 1200,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], event.name());
        assert_eq!(json["phase"], "onboarding");
    }
}
