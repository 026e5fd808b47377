use quiz_funnel::{
    AnswerKey, ChoiceOption, ChoiceQuestion, InfoScreen, Phase, Question, QuestionKind, SkipRule,
    StepDefinition,
};

pub(crate) fn welcome() -> StepDefinition {
    StepDefinition::new(
        "welcome",
        Phase::Onboarding,
        Question::new(
            "welcome",
            QuestionKind::Welcome(InfoScreen::new(
                "Answer a few quick questions and a specialist doctor will check whether you are eligible for treatment.",
            )),
        )
        .with_subtitle("Clinical team")
        .with_title("You are two minutes away from finding your treatment")
        .with_button("Find my treatment"),
    )
}

pub(crate) fn sex() -> StepDefinition {
    StepDefinition::new(
        "sex",
        Phase::Onboarding,
        Question::new(
            AnswerKey::Sex,
            QuestionKind::SingleChoice(
                ChoiceQuestion::new(vec![
                    ChoiceOption::new("male", "Man"),
                    ChoiceOption::new("female", "Woman"),
                ])
                .auto_advance(),
            ),
        )
        .with_title("First, tell me: you are..."),
    )
}

/// Only asked to women.
pub(crate) fn pregnancy_check() -> StepDefinition {
    StepDefinition::new(
        "pregnancy-check",
        Phase::Onboarding,
        Question::new(
            AnswerKey::PregnancyOrBreastfeeding,
            QuestionKind::PregnancyCheck(ChoiceQuestion::new(vec![
                ChoiceOption::new("yes", "Yes"),
                ChoiceOption::new("no", "No, and I am aware"),
            ])),
        )
        .with_title("Are you pregnant, breastfeeding or trying to get pregnant?")
        .with_helper(
            "The plan may include medication that is contraindicated during pregnancy.",
        ),
    )
    .skip_when(SkipRule::answer_equals(AnswerKey::Sex, "male"))
}
