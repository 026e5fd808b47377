use std::{sync::Arc, time::Instant};

use quiz_funnel_types::{
    AnalyticsEvent, AnalyticsSink, AnswerKey, AnswerValue, Answers, StepCatalog, StepDefinition,
};
use tracing::debug;

use crate::{
    Bmi, DeepLink, GenderedText, MedicationPreference, NoopSink, PersistedState, Persistence,
    personalization, regions,
};

/// Outcome of checking whether the result route may be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteGuard {
    /// Persisted state has not been loaded yet; show a placeholder.
    Pending,
    /// The quiz was completed.
    Show,
    /// The quiz was not completed. The engine has been reset; send the
    /// visitor to this link instead.
    Redirect(DeepLink),
}

/// How the visitor left a step.
#[derive(Debug, Clone, Copy)]
enum Departure {
    Completed,
    Abandoned,
}

/// The quiz state machine.
///
/// Holds the current step index, the accumulated answers and the completion
/// flag. Every transition clamps to the catalog bounds and steps over steps
/// whose skip rule holds. Once hydrated, every mutation is mirrored to the
/// persistence adapter.
pub struct QuizEngine {
    catalog: Arc<StepCatalog>,
    persistence: Persistence,
    analytics: Arc<dyn AnalyticsSink>,
    current_index: usize,
    answers: Answers,
    is_complete: bool,
    is_hydrated: bool,
    entered_at: Instant,
}

impl QuizEngine {
    /// Create an engine at step 0 with no answers. Call [`hydrate`] before
    /// trusting its state.
    ///
    /// [`hydrate`]: QuizEngine::hydrate
    pub fn new(catalog: impl Into<Arc<StepCatalog>>, persistence: Persistence) -> Self {
        Self {
            catalog: catalog.into(),
            persistence,
            analytics: Arc::new(NoopSink),
            current_index: 0,
            answers: Answers::new(),
            is_complete: false,
            is_hydrated: false,
            entered_at: Instant::now(),
        }
    }

    /// Report analytics events to `sink`.
    pub fn with_analytics(mut self, sink: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = sink;
        self
    }

    // === State accessors ===

    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_step(&self) -> &StepDefinition {
        &self.catalog.steps()[self.current_index]
    }

    pub fn step_count(&self) -> usize {
        self.catalog.step_count()
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn answer(&self, key: &AnswerKey) -> Option<&AnswerValue> {
        self.answers.get(key)
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn is_hydrated(&self) -> bool {
        self.is_hydrated
    }

    pub fn is_first_step(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.current_index == self.catalog.last_index()
    }

    /// Position in the funnel as a whole percentage.
    pub fn progress(&self) -> u8 {
        let count = self.catalog.step_count();
        if count <= 1 {
            return 100;
        }
        let ratio = self.current_index as f64 / (count - 1) as f64;
        (ratio * 100.0).round() as u8
    }

    // === Answers ===

    /// Record one answer.
    pub fn set_answer(&mut self, key: impl Into<AnswerKey>, value: impl Into<AnswerValue>) {
        self.answers.insert(key, value);
        self.mirror();
    }

    /// Record several answers in one update.
    pub fn set_answers(&mut self, partial: Answers) {
        self.answers.merge(partial);
        self.mirror();
    }

    /// Fill in the `state` answer from a geolocation result.
    ///
    /// Only applies a valid state code, and never overwrites a state the
    /// visitor already picked. Returns whether the answer was written.
    pub fn prefill_state(&mut self, code: Option<String>) -> bool {
        let Some(code) = code else {
            return false;
        };
        if !regions::is_state_code(&code) || self.answers.has_value(&AnswerKey::State) {
            return false;
        }
        debug!(%code, "prefilled state from geolocation");
        self.set_answer(AnswerKey::State, code);
        true
    }

    // === Transitions ===

    /// Advance to the next step that is not skipped. Returns the new index.
    pub fn next_step(&mut self) -> usize {
        let last = self.catalog.last_index();
        let mut candidate = (self.current_index + 1).min(last);
        while candidate < last && self.is_skipped(candidate) {
            candidate += 1;
        }
        self.move_to(candidate, Departure::Completed);
        self.mirror();
        self.current_index
    }

    /// Go back to the previous step that is not skipped. Returns the new index.
    pub fn prev_step(&mut self) -> usize {
        let mut candidate = self.current_index.saturating_sub(1);
        while candidate > 0 && self.is_skipped(candidate) {
            candidate -= 1;
        }
        self.move_to(candidate, Departure::Abandoned);
        self.mirror();
        self.current_index
    }

    /// Jump to `index`, clamped to the catalog and moved forward past skipped
    /// steps. Returns the new index.
    pub fn go_to_step(&mut self, index: usize) -> usize {
        let target = self.resolve(index);
        self.move_to(target, Departure::Abandoned);
        self.mirror();
        self.current_index
    }

    /// Position the engine from a deep link. Same resolution as
    /// [`go_to_step`](QuizEngine::go_to_step), but nothing is persisted.
    pub fn set_initial_step(&mut self, index: usize) -> usize {
        let target = self.resolve(index);
        self.move_to(target, Departure::Abandoned);
        self.current_index
    }

    /// Re-enter a step from browser history. Same resolution as
    /// [`go_to_step`](QuizEngine::go_to_step), but nothing is persisted.
    pub fn restore_from_history(&mut self, index: usize) -> usize {
        let target = self.resolve(index);
        self.move_to(target, Departure::Abandoned);
        self.current_index
    }

    /// Seed answers and the starting step from the entry URL.
    pub fn apply_deep_link(&mut self, link: &DeepLink) {
        if let Some(medication) = link.medication {
            self.set_answer(AnswerKey::MedicationPreference, medication.as_str());
        }
        if let Some(step) = link.step {
            self.set_initial_step(step);
        }
    }

    // === Lifecycle ===

    /// Load persisted state. Only the first call has any effect; from then on
    /// every mutation is mirrored to storage.
    pub fn hydrate(&mut self) {
        if self.is_hydrated {
            return;
        }

        let state = self.persistence.load();
        self.answers = state.answers;
        self.current_index = self.resolve(state.step);
        self.is_complete = state.completed;
        self.is_hydrated = true;
        self.entered_at = Instant::now();

        debug!(
            step = self.current_index,
            answers = self.answers.len(),
            completed = self.is_complete,
            "hydrated quiz state"
        );
        self.emit_viewed();
    }

    /// Mark the quiz as completed.
    pub fn complete_quiz(&mut self) {
        self.is_complete = true;
        self.mirror();
        self.analytics.emit(&AnalyticsEvent::QuizCompleted {
            total_steps: self.catalog.step_count(),
        });
    }

    /// Start over: step 0, no answers, not completed, nothing persisted.
    ///
    /// The discarded session emits no step analytics.
    pub fn reset_quiz(&mut self) {
        self.answers.clear();
        self.is_complete = false;
        self.current_index = 0;
        self.entered_at = Instant::now();
        self.persistence.clear();
        debug!("quiz reset");
    }

    /// Decide what the result route shows.
    ///
    /// Visitors who did not complete the quiz get the quiz reset and a link
    /// back to the start that keeps their medication preference.
    pub fn guard_result_route(&mut self) -> RouteGuard {
        if !self.is_hydrated {
            return RouteGuard::Pending;
        }
        if self.is_complete {
            return RouteGuard::Show;
        }

        let medication = MedicationPreference::recorded(&self.answers);
        self.reset_quiz();
        RouteGuard::Redirect(DeepLink::restart(medication))
    }

    // === Personalization ===

    pub fn is_female(&self) -> bool {
        self.answers.text(&AnswerKey::Sex) == Some("female")
    }

    pub fn is_male(&self) -> bool {
        self.answers.text(&AnswerKey::Sex) == Some("male")
    }

    /// Pick the copy variant matching the recorded sex.
    pub fn gendered<'a>(&self, text: &'a GenderedText) -> &'a str {
        text.pick(self.is_female())
    }

    pub fn medication_preference(&self) -> MedicationPreference {
        MedicationPreference::effective(&self.answers)
    }

    pub fn bmi(&self) -> Bmi {
        Bmi::from_answers(&self.answers)
    }

    pub fn suggested_goal_weight(&self) -> f64 {
        personalization::suggested_goal_weight(&self.answers)
    }

    // === Internals ===

    fn is_skipped(&self, index: usize) -> bool {
        self.catalog
            .get(index)
            .is_some_and(|step| step.should_skip(&self.answers))
    }

    /// Clamp and step forward over skipped steps.
    fn resolve(&self, index: usize) -> usize {
        let last = self.catalog.last_index();
        let mut candidate = index.min(last);
        while candidate < last && self.is_skipped(candidate) {
            candidate += 1;
        }
        candidate
    }

    fn move_to(&mut self, target: usize, departure: Departure) {
        if target == self.current_index {
            return;
        }

        let left = self.current_step();
        let time_on_step_ms = u64::try_from(self.entered_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        let event = match departure {
            Departure::Completed => AnalyticsEvent::StepCompleted {
                step_id: left.id.clone(),
                step_index: self.current_index,
                phase: left.phase,
                time_on_step_ms,
            },
            Departure::Abandoned => AnalyticsEvent::StepAbandoned {
                step_id: left.id.clone(),
                step_index: self.current_index,
                time_on_step_ms,
            },
        };
        self.analytics.emit(&event);

        debug!(from = self.current_index, to = target, "step transition");
        self.current_index = target;
        self.entered_at = Instant::now();
        self.emit_viewed();
    }

    fn emit_viewed(&self) {
        let step = self.current_step();
        self.analytics.emit(&AnalyticsEvent::StepViewed {
            step_id: step.id.clone(),
            step_index: self.current_index,
            phase: step.phase,
        });
    }

    fn mirror(&self) {
        if !self.is_hydrated {
            return;
        }
        self.persistence.save(&PersistedState {
            answers: self.answers.clone(),
            step: self.current_index,
            completed: self.is_complete,
        });
    }
}

impl std::fmt::Debug for QuizEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizEngine")
            .field("current_index", &self.current_index)
            .field("answers", &self.answers)
            .field("is_complete", &self.is_complete)
            .field("is_hydrated", &self.is_hydrated)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use quiz_funnel_types::{
        ChoiceOption, ChoiceQuestion, InfoScreen, Phase, Question, QuestionKind, SkipRule,
    };

    use super::*;
    use crate::{MemoryStore, RecordingSink};

    fn step(id: &str) -> StepDefinition {
        StepDefinition::new(
            id,
            Phase::Onboarding,
            Question::new(id, QuestionKind::Interstitial(InfoScreen::default())),
        )
    }

    fn sex_step() -> StepDefinition {
        StepDefinition::new(
            "sex",
            Phase::Onboarding,
            Question::new(
                AnswerKey::Sex,
                QuestionKind::SingleChoice(ChoiceQuestion::new(vec![
                    ChoiceOption::new("male", "Man"),
                    ChoiceOption::new("female", "Woman"),
                ])),
            ),
        )
    }

    /// welcome, sex, pregnancy (skip when male), extra (skip when male), end
    fn engine() -> (QuizEngine, MemoryStore, RecordingSink) {
        let catalog = StepCatalog::new(vec![
            step("welcome"),
            sex_step(),
            step("pregnancy-check").skip_when(SkipRule::answer_equals(AnswerKey::Sex, "male")),
            step("extra").skip_when(SkipRule::answer_equals(AnswerKey::Sex, "male")),
            step("end"),
        ])
        .unwrap();
        let store = MemoryStore::new();
        let sink = RecordingSink::new();
        let engine = QuizEngine::new(catalog, Persistence::new(Arc::new(store.clone())))
            .with_analytics(Arc::new(sink.clone()));
        (engine, store, sink)
    }

    #[test]
    fn chained_skips_are_resolved_in_one_step() {
        let (mut engine, _, _) = engine();
        engine.hydrate();
        engine.go_to_step(1);
        engine.set_answer(AnswerKey::Sex, "male");

        assert_eq!(engine.next_step(), 4);
        assert_eq!(engine.prev_step(), 1);
    }

    #[test]
    fn skip_rules_only_apply_when_they_hold() {
        let (mut engine, _, _) = engine();
        engine.hydrate();
        engine.go_to_step(1);
        engine.set_answer(AnswerKey::Sex, "female");

        assert_eq!(engine.next_step(), 2);
        assert_eq!(engine.next_step(), 3);
    }

    #[test]
    fn go_to_step_skip_avoids_forward() {
        let (mut engine, _, _) = engine();
        engine.hydrate();
        engine.set_answer(AnswerKey::Sex, "male");

        assert_eq!(engine.go_to_step(2), 4);
        assert_eq!(engine.go_to_step(99), 4);
    }

    #[test]
    fn progress_rounds() {
        let (mut engine, _, _) = engine();
        assert_eq!(engine.progress(), 0);
        engine.go_to_step(1);
        assert_eq!(engine.progress(), 25);
        engine.go_to_step(4);
        assert_eq!(engine.progress(), 100);
    }

    #[test]
    fn events_follow_transitions() {
        let (mut engine, _, sink) = engine();
        engine.hydrate();
        engine.next_step();
        engine.prev_step();
        engine.complete_quiz();

        assert_eq!(
            sink.names(),
            vec![
                "step-viewed",
                "step-completed",
                "step-viewed",
                "step-abandoned",
                "step-viewed",
                "quiz-completed",
            ]
        );
    }

    #[test]
    fn staying_put_emits_nothing() {
        let (mut engine, _, sink) = engine();
        engine.prev_step();
        engine.go_to_step(0);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn prefill_state_never_overwrites() {
        let (mut engine, _, _) = engine();
        engine.hydrate();

        assert!(!engine.prefill_state(None));
        assert!(!engine.prefill_state(Some("XX".into())));
        assert!(engine.prefill_state(Some("SP".into())));
        assert!(!engine.prefill_state(Some("RJ".into())));
        assert_eq!(engine.answers().text(&AnswerKey::State), Some("SP"));
    }

    #[test]
    fn gendered_copy() {
        let (mut engine, _, _) = engine();
        let text = GenderedText::new("Bem-vindo", "Bem-vinda");
        assert_eq!(engine.gendered(&text), "Bem-vindo");
        assert!(!engine.is_male() && !engine.is_female());

        engine.set_answer(AnswerKey::Sex, "female");
        assert!(engine.is_female());
        assert_eq!(engine.gendered(&text), "Bem-vinda");
    }

    #[test]
    fn result_guard() {
        let (mut engine, store, _) = engine();
        assert_eq!(engine.guard_result_route(), RouteGuard::Pending);

        engine.hydrate();
        engine.set_answer(AnswerKey::MedicationPreference, "wegovy");
        engine.go_to_step(3);

        let guard = engine.guard_result_route();
        assert_eq!(
            guard,
            RouteGuard::Redirect(DeepLink::restart(Some(MedicationPreference::Wegovy)))
        );
        assert_eq!(engine.current_index(), 0);
        assert!(engine.answers().is_empty());
        assert!(store.is_empty());

        engine.complete_quiz();
        assert_eq!(engine.guard_result_route(), RouteGuard::Show);
    }
}
