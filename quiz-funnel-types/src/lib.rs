//! Core types for the quiz-funnel crate.
//!
//! This crate provides the foundational types for defining a quiz funnel:
//! - `StepCatalog` and `StepDefinition` - The ordered steps and their phases
//! - `Question` and `QuestionKind` - What each step asks and how it is shown
//! - `SkipRule` - Predicates over answers that make traversal bypass a step
//! - `Answers`, `AnswerKey` and `AnswerValue` - Collected data
//! - `KeyValueStore` and `AnalyticsSink` traits - For storage and event backends

mod answer_key;
pub use answer_key::AnswerKey;

mod answer_value;
pub use answer_value::AnswerValue;

mod answers;
pub use answers::{AnswerError, Answers};

mod phase;
pub use phase::Phase;

mod question;
pub use question::{
    BenefitScreen, ChoiceOption, ChoiceQuestion, DropdownOption, DropdownQuestion, InfoScreen,
    InputField, InputFieldKind, InputQuestion, MeasuresQuestion, OverviewSection, Question,
    QuestionKind, RadioCard, RadioCardQuestion, RangeQuestion,
};

mod skip_rule;
pub use skip_rule::SkipRule;

mod step;
pub use step::StepDefinition;

mod catalog;
pub use catalog::{CatalogError, StepCatalog};

mod event;
pub use event::AnalyticsEvent;

mod error;
pub use error::StorageError;

mod traits;
pub use traits::{AnalyticsSink, KeyValueStore};
