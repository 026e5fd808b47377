use quiz_funnel::{Phase, Question, QuestionKind, StepDefinition};

pub(crate) fn processing() -> StepDefinition {
    StepDefinition::new(
        "processing",
        Phase::Result,
        Question::new("processing", QuestionKind::Loading)
            .with_title("Preparing your personalised plan..."),
    )
}

pub(crate) fn result() -> StepDefinition {
    StepDefinition::new(
        "result",
        Phase::Result,
        Question::new("result", QuestionKind::Result).with_title("Your plan"),
    )
}
