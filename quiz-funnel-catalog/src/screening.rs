use quiz_funnel::{
    AnswerKey, ChoiceOption, ChoiceQuestion, InfoScreen, InputField, InputFieldKind,
    InputQuestion, Phase, Question, QuestionKind, StepDefinition,
};

fn multiple_choice(id: &str, key: AnswerKey, title: &str, options: Vec<ChoiceOption>) -> StepDefinition {
    StepDefinition::new(
        id,
        Phase::MedicalScreening,
        Question::new(key, QuestionKind::MultipleChoice(ChoiceQuestion::new(options)))
            .with_title(title)
            .with_button("Continue"),
    )
}

pub(crate) fn intro() -> StepDefinition {
    StepDefinition::new(
        "screening-intro",
        Phase::MedicalScreening,
        Question::new(
            "screening-intro",
            QuestionKind::Interstitial(InfoScreen::new(
                "Your answers are confidential and only seen by the medical team.",
            )),
        )
        .with_title("Now the doctor needs to know you better"),
    )
}

pub(crate) fn diagnoses() -> StepDefinition {
    multiple_choice(
        "diagnoses",
        AnswerKey::Diagnoses,
        "Do you have, or have you had, any of these diagnoses?",
        vec![
            ChoiceOption::new("type-1-diabetes", "Type 1 diabetes or diabetic retinopathy"),
            ChoiceOption::new("type-2-diabetes", "Type 2 diabetes"),
            ChoiceOption::new("anorexia", "Anorexia"),
            ChoiceOption::new("bulimia", "Bulimia"),
            ChoiceOption::new("psychosis", "Psychosis"),
            ChoiceOption::new("schizophrenia", "Schizophrenia"),
            ChoiceOption::new("pancreatitis", "Pancreatitis"),
            ChoiceOption::new("kidney-or-liver-failure", "Kidney or liver failure"),
            ChoiceOption::new("gallbladder", "Gallbladder problems (no surgery)"),
            ChoiceOption::new("gastrointestinal", "Severe bowel or stomach problems"),
            ChoiceOption::new("cancer", "Cancer (currently in treatment)"),
            ChoiceOption::new("medullary-thyroid-cancer", "Medullary thyroid cancer (personal or family)"),
            ChoiceOption::new("men-2", "MEN 2 syndrome"),
            ChoiceOption::new("cystic-fibrosis", "Cystic fibrosis"),
            ChoiceOption::new("none", "None of these").exclusive(),
        ],
    )
}

pub(crate) fn bariatric_surgery() -> StepDefinition {
    multiple_choice(
        "bariatric-surgery",
        AnswerKey::BariatricSurgery,
        "Have you had bariatric surgery?",
        vec![
            ChoiceOption::new("gastric-balloon", "Gastric balloon"),
            ChoiceOption::new("gastric-bypass", "Gastric bypass"),
            ChoiceOption::new("lap-band", "Gastric band (Lap-Band)"),
            ChoiceOption::new("sleeve", "Sleeve gastrectomy"),
            ChoiceOption::new("other", "Another procedure"),
            ChoiceOption::new("none", "Never had bariatric surgery").exclusive(),
        ],
    )
}

pub(crate) fn regular_medication() -> StepDefinition {
    StepDefinition::new(
        "regular-medication",
        Phase::MedicalScreening,
        Question::new(
            AnswerKey::TakesRegularMedication,
            QuestionKind::SingleChoice(
                ChoiceQuestion::new(vec![
                    ChoiceOption::new("yes", "Yes, I do"),
                    ChoiceOption::new("no", "I take nothing"),
                ])
                .auto_advance(),
            ),
        )
        .with_title("Do you take any medication or supplement regularly?"),
    )
}

pub(crate) fn which_medications() -> StepDefinition {
    StepDefinition::new(
        "which-medications",
        Phase::MedicalScreening,
        Question::new(
            AnswerKey::RegularMedications,
            QuestionKind::Textarea(InputQuestion::new(vec![
                InputField::new(
                    AnswerKey::RegularMedications,
                    "Your medication and supplements",
                    InputFieldKind::Textarea,
                )
                .with_placeholder("e.g. Losartan 50mg once a day, Vitamin D 2000IU once a day"),
            ])),
        )
        .with_title("Which medication or supplements do you take?"),
    )
}

pub(crate) fn medication_allergies() -> StepDefinition {
    multiple_choice(
        "medication-allergies",
        AnswerKey::MedicationAllergies,
        "Are you allergic to any of these medications?",
        vec![
            ChoiceOption::new("tirzepatide", "Mounjaro (Tirzepatide)"),
            ChoiceOption::new("liraglutide", "Saxenda (Liraglutide)"),
            ChoiceOption::new("semaglutide", "Ozempic/Wegovy (Semaglutide)"),
            ChoiceOption::new("contrave", "Contrave (Bupropion + Naltrexone)"),
            ChoiceOption::new("none", "None of these").exclusive(),
        ],
    )
}

pub(crate) fn additional_notes() -> StepDefinition {
    StepDefinition::new(
        "additional-notes",
        Phase::MedicalScreening,
        Question::new(
            AnswerKey::AdditionalNotes,
            QuestionKind::Textarea(InputQuestion::new(vec![
                InputField::new(AnswerKey::AdditionalNotes, "Your notes", InputFieldKind::Textarea)
                    .optional(),
            ])),
        )
        .with_title("Anything else you want to tell the doctor?")
        .with_button("Finish and see my plan"),
    )
}
