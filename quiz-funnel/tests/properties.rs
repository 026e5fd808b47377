//! Property tests for traversal and progress

use std::sync::Arc;

use proptest::prelude::*;
use quiz_funnel::{
    AnswerKey, Answers, InfoScreen, MemoryStore, Persistence, Phase, Question, QuestionKind,
    QuizEngine, SkipRule, StepCatalog, StepDefinition,
};

/// One step per flag; flagged steps are skipped once `hide` is answered.
fn engine(skipped: &[bool]) -> QuizEngine {
    let steps = skipped
        .iter()
        .enumerate()
        .map(|(i, &skip)| {
            let step = StepDefinition::new(
                format!("step-{i}"),
                Phase::Preferences,
                Question::new(format!("q{i}"), QuestionKind::Interstitial(InfoScreen::default())),
            );
            if skip {
                step.skip_when(SkipRule::answered("hide"))
            } else {
                step
            }
        })
        .collect();

    let mut engine = QuizEngine::new(
        StepCatalog::new(steps).unwrap(),
        Persistence::new(Arc::new(MemoryStore::new())),
    );
    engine.hydrate();
    engine.set_answers(Answers::new().with(AnswerKey::from("hide"), true));
    engine
}

proptest! {
    #[test]
    fn prop_progress_is_bounded_and_monotonic(step_count in 1..40usize) {
        let mut engine = engine(&vec![false; step_count]);
        let mut previous = engine.progress();
        prop_assert_eq!(previous, if step_count == 1 { 100 } else { 0 });

        for _ in 0..step_count {
            engine.next_step();
            let progress = engine.progress();
            prop_assert!(progress >= previous);
            prop_assert!(progress <= 100);
            previous = progress;
        }
        prop_assert_eq!(previous, 100);
    }

    #[test]
    fn prop_jumps_land_in_bounds_on_visible_steps(
        skipped in proptest::collection::vec(any::<bool>(), 1..30),
        target in 0..64usize,
    ) {
        let mut engine = engine(&skipped);
        let last = skipped.len() - 1;
        let landed = engine.go_to_step(target);

        prop_assert!(landed <= last);
        prop_assert!(landed >= target.min(last));
        prop_assert!(landed == last || !skipped[landed]);
    }

    #[test]
    fn prop_next_then_prev_returns(
        skipped in proptest::collection::vec(any::<bool>(), 2..30),
        start in 0..30usize,
    ) {
        let mut engine = engine(&skipped);
        let from = engine.go_to_step(start);
        prop_assume!(from < skipped.len() - 1);

        let forward = engine.next_step();
        prop_assert!(forward > from);
        prop_assert!(skipped[from + 1..forward].iter().all(|&s| s));
        prop_assert_eq!(engine.prev_step(), from);
    }
}
