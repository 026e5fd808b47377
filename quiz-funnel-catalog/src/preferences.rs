use quiz_funnel::{
    AnswerKey, ChoiceOption, ChoiceQuestion, DropdownOption, DropdownQuestion, Phase, Question,
    QuestionKind, RadioCard, RadioCardQuestion, SkipRule, StepDefinition, regions::STATES,
};

pub(crate) fn medications_used() -> StepDefinition {
    StepDefinition::new(
        "medications-used",
        Phase::Preferences,
        Question::new(
            AnswerKey::MedicationsUsed,
            QuestionKind::MultipleChoice(ChoiceQuestion::new(vec![
                ChoiceOption::new("never", "I have not had access yet").exclusive(),
                ChoiceOption::new("wegovy", "Wegovy").with_description("Semaglutide"),
                ChoiceOption::new("mounjaro", "Mounjaro").with_description("Tirzepatide"),
                ChoiceOption::new("ozempic", "Ozempic").with_description("Semaglutide"),
            ])),
        )
        .with_title("Have you tried any of these weight-loss medications?")
        .with_button("Continue"),
    )
}

pub(crate) fn location() -> StepDefinition {
    let mut dropdown = DropdownQuestion::new(
        STATES
            .iter()
            .map(|state| DropdownOption::new(state.code, format!("{} ({})", state.name, state.code)))
            .collect(),
    );
    dropdown.placeholder = Some("Select your state".to_string());

    StepDefinition::new(
        "location",
        Phase::Preferences,
        Question::new(AnswerKey::State, QuestionKind::Dropdown(dropdown))
            .with_title("Which state do you live in?")
            .with_helper("We deliver across Brazil with free shipping.")
            .with_button("Check availability"),
    )
}

pub(crate) fn plan_preference() -> StepDefinition {
    StepDefinition::new(
        "plan-preference",
        Phase::Preferences,
        Question::new(
            AnswerKey::PlanPreference,
            QuestionKind::SingleChoice(
                ChoiceQuestion::new(vec![
                    ChoiceOption::new("medication-and-team", "Complete treatment")
                        .with_description("Medication, endocrinologist, nutritionist and daily support."),
                    ChoiceOption::new("medication-only", "Medication only")
                        .with_description("Medical assessment and medication delivered at home."),
                    ChoiceOption::new("undecided", "Help me decide later"),
                ])
                .auto_advance(),
            ),
        )
        .with_title("What makes more sense for you?"),
    )
}

/// Skipped when the preference is already known, e.g. from the `md` link
/// parameter.
pub(crate) fn medication_preference() -> StepDefinition {
    StepDefinition::new(
        "medication-preference",
        Phase::Preferences,
        Question::new(
            AnswerKey::MedicationPreference,
            QuestionKind::RadioCard(RadioCardQuestion {
                cards: vec![
                    RadioCard::new("mounjaro", "Tirzepatide (Mounjaro)")
                        .with_subtitle("Most potent on the market")
                        .with_price("R$ 1.799,99"),
                    RadioCard::new("wegovy", "Semaglutide (Wegovy/Ozempic)")
                        .with_subtitle("The most popular")
                        .with_price("R$ 399,99"),
                ],
            }),
        )
        .with_title("If an injectable is indicated, which do you prefer?")
        .with_helper("The doctor decides what suits your case, but your preference counts."),
    )
    .skip_when(SkipRule::answered(AnswerKey::MedicationPreference))
}
