use quiz_funnel::{
    AnswerKey, InputField, InputFieldKind, InputQuestion, MeasuresQuestion, OverviewSection,
    Phase, Question, QuestionKind, RangeQuestion, StepDefinition,
};

pub(crate) fn overview() -> StepDefinition {
    StepDefinition::new(
        "questionnaire-overview",
        Phase::PersonalData,
        Question::new(
            "questionnaire-overview",
            QuestionKind::Overview {
                sections: vec![
                    OverviewSection::new("personal-data", "Your details", "Name, age, weight and height")
                        .with_duration("1 minute"),
                    OverviewSection::new("medical-screening", "Your health", "Conditions, surgeries and medication")
                        .with_duration("2 minutes"),
                ],
            },
        )
        .with_title("You are almost at your ideal plan")
        .with_subtitle("A few more quick questions so the doctor can get to know you"),
    )
}

pub(crate) fn name() -> StepDefinition {
    StepDefinition::new(
        "name",
        Phase::PersonalData,
        Question::new(
            AnswerKey::Name,
            QuestionKind::Input(InputQuestion::new(vec![
                InputField::new(AnswerKey::Name, "Your full name", InputFieldKind::Text)
                    .with_placeholder("Type your full name"),
            ])),
        )
        .with_title("What should I call you?"),
    )
}

pub(crate) fn birth_date() -> StepDefinition {
    StepDefinition::new(
        "birth-date",
        Phase::PersonalData,
        Question::new(AnswerKey::BirthDate, QuestionKind::BirthDate)
            .with_title("What is your date of birth?"),
    )
}

pub(crate) fn measures() -> StepDefinition {
    StepDefinition::new(
        "measures",
        Phase::PersonalData,
        Question::new(
            "measures",
            QuestionKind::Measures(MeasuresQuestion {
                height: RangeQuestion::new(AnswerKey::Height, 140.0, 220.0, "cm"),
                weight: RangeQuestion::new(AnswerKey::Weight, 40.0, 200.0, "kg"),
            }),
        )
        .with_title("What are your weight and height?"),
    )
}

pub(crate) fn bmi_result() -> StepDefinition {
    StepDefinition::new(
        "bmi-result",
        Phase::PersonalData,
        Question::new("bmi-result", QuestionKind::BmiResult).with_title("This is your current BMI"),
    )
}

pub(crate) fn goal_weight() -> StepDefinition {
    StepDefinition::new(
        "goal-weight",
        Phase::PersonalData,
        Question::new(
            AnswerKey::GoalWeight,
            QuestionKind::GoalWeight(RangeQuestion::new(AnswerKey::GoalWeight, 40.0, 180.0, "kg")),
        )
        .with_title("What weight do you want to reach?"),
    )
}

pub(crate) fn goal_event() -> StepDefinition {
    StepDefinition::new(
        "goal-event",
        Phase::PersonalData,
        Question::new(AnswerKey::HasGoalEvent, QuestionKind::GoalDate)
            .with_title("Is there an important event coming up?"),
    )
}

pub(crate) fn contact() -> StepDefinition {
    StepDefinition::new(
        "contact",
        Phase::PersonalData,
        Question::new(
            "contact",
            QuestionKind::Input(InputQuestion::new(vec![
                InputField::new(AnswerKey::Whatsapp, "WhatsApp", InputFieldKind::Tel)
                    .with_placeholder("(11) 99999-9999"),
                InputField::new(AnswerKey::Email, "E-mail", InputFieldKind::Email)
                    .with_placeholder("you@example.com"),
            ])),
        )
        .with_title("Where do you want to receive your result?"),
    )
}
