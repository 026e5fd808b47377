use quiz_funnel::{BenefitScreen, Phase, Question, QuestionKind, StepDefinition};

fn benefit(id: &str, title: &str, benefits: &[&str]) -> StepDefinition {
    StepDefinition::new(
        id,
        Phase::Benefits,
        Question::new(id, QuestionKind::Benefit(BenefitScreen::new(benefits))).with_title(title),
    )
}

pub(crate) fn care() -> StepDefinition {
    benefit(
        "benefit-care",
        "Forget queues, prescriptions and pharmacies",
        &["Online consultation, digital prescription and delivery to your door"],
    )
}

pub(crate) fn delivery() -> StepDefinition {
    benefit(
        "benefit-delivery",
        "Never run out of medication",
        &[
            "Automatic prescription renewal",
            "Monthly delivery without having to ask",
            "Free shipping across Brazil",
        ],
    )
}

pub(crate) fn support() -> StepDefinition {
    benefit(
        "benefit-support",
        "You will not be alone on this journey",
        &[
            "An endocrinologist following your progress",
            "A nutritionist to adjust your diet",
            "WhatsApp support whenever you need it",
        ],
    )
}

pub(crate) fn reimbursement() -> StepDefinition {
    benefit(
        "reimbursement",
        "You can ask for your consultations to be reimbursed",
        &["We send you the invoice your health plan needs"],
    )
}
