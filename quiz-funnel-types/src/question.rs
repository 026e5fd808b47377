use serde::{Deserialize, Serialize};

use crate::AnswerKey;

/// What a single step asks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The answer key this question writes to (informational screens still
    /// carry one so analytics can name them).
    answer_key: AnswerKey,

    /// Headline shown above the inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    subtitle: Option<String>,

    /// Small print below the inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    helper: Option<String>,

    /// Label of the primary button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    button_text: Option<String>,

    /// The kind of question (determines input type and payload).
    #[serde(flatten)]
    kind: QuestionKind,
}

impl Question {
    /// Create a new question.
    pub fn new(answer_key: impl Into<AnswerKey>, kind: QuestionKind) -> Self {
        Self {
            answer_key: answer_key.into(),
            title: None,
            subtitle: None,
            helper: None,
            button_text: None,
            kind,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_helper(mut self, helper: impl Into<String>) -> Self {
        self.helper = Some(helper.into());
        self
    }

    pub fn with_button(mut self, button_text: impl Into<String>) -> Self {
        self.button_text = Some(button_text.into());
        self
    }

    /// Get the answer key this question writes to.
    pub fn answer_key(&self) -> &AnswerKey {
        &self.answer_key
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn helper(&self) -> Option<&str> {
        self.helper.as_deref()
    }

    pub fn button_text(&self) -> Option<&str> {
        self.button_text.as_deref()
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }
}

/// The kind of question, determining input type and payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Landing screen of the funnel.
    Welcome(InfoScreen),

    /// Outline of the remaining sections.
    Overview { sections: Vec<OverviewSection> },

    /// Pick exactly one option.
    SingleChoice(ChoiceQuestion),

    /// Pick any number of options; exclusive options clear the rest.
    MultipleChoice(ChoiceQuestion),

    /// Pick one value from a long list.
    Dropdown(DropdownQuestion),

    /// Pick one of a few large cards (product choice).
    RadioCard(RadioCardQuestion),

    /// One or more typed input fields.
    Input(InputQuestion),

    /// Free text.
    Textarea(InputQuestion),

    /// Informational break between sections.
    Interstitial(InfoScreen),

    /// Selling point screen.
    Benefit(BenefitScreen),

    /// Anticipation screen shown before the result.
    Loading,

    /// Height and weight pickers.
    Measures(MeasuresQuestion),

    /// Body-mass index computed from the measures.
    BmiResult,

    /// Target weight picker.
    GoalWeight(RangeQuestion),

    /// Optional event date the goal is tied to.
    GoalDate,

    BirthDate,

    /// Pregnancy or breastfeeding screening question.
    PregnancyCheck(ChoiceQuestion),

    /// Terminal result screen.
    Result,
}

impl QuestionKind {
    /// The `type` discriminant of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Welcome(_) => "welcome",
            Self::Overview { .. } => "overview",
            Self::SingleChoice(_) => "single-choice",
            Self::MultipleChoice(_) => "multiple-choice",
            Self::Dropdown(_) => "dropdown",
            Self::RadioCard(_) => "radio-card",
            Self::Input(_) => "input",
            Self::Textarea(_) => "textarea",
            Self::Interstitial(_) => "interstitial",
            Self::Benefit(_) => "benefit",
            Self::Loading => "loading",
            Self::Measures(_) => "measures",
            Self::BmiResult => "bmi-result",
            Self::GoalWeight(_) => "goal-weight",
            Self::GoalDate => "goal-date",
            Self::BirthDate => "birth-date",
            Self::PregnancyCheck(_) => "pregnancy-check",
            Self::Result => "result",
        }
    }

    /// Check if this kind collects no data.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            Self::Welcome(_)
                | Self::Overview { .. }
                | Self::Interstitial(_)
                | Self::Benefit(_)
                | Self::Loading
                | Self::BmiResult
                | Self::Result
        )
    }

    /// Check if the progress bar is shown for this kind.
    pub fn shows_progress(&self) -> bool {
        !matches!(
            self,
            Self::Welcome(_)
                | Self::Interstitial(_)
                | Self::Benefit(_)
                | Self::Loading
                | Self::Overview { .. }
                | Self::Result
        )
    }

    /// Check if a back button is offered for this kind.
    pub fn allows_back(&self) -> bool {
        !matches!(self, Self::Welcome(_) | Self::Loading | Self::Result)
    }
}

/// An option of a choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Value written to the answer map when picked.
    pub id: String,

    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Picking this option deselects every other one ("none of these").
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exclusive: bool,
}

impl ChoiceOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            exclusive: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark this option as exclusive.
    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }
}

/// Configuration for single and multiple choice questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceQuestion {
    pub options: Vec<ChoiceOption>,

    /// Advance as soon as an option is picked.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub auto_advance: bool,
}

impl ChoiceQuestion {
    /// Create a new choice question with the given options.
    pub fn new(options: Vec<ChoiceOption>) -> Self {
        Self {
            options,
            auto_advance: false,
        }
    }

    /// Advance immediately on selection.
    pub fn auto_advance(mut self) -> Self {
        self.auto_advance = true;
        self
    }

    /// Get an option by id.
    pub fn option(&self, id: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|option| option.id == id)
    }

    /// Toggle `id` in a multi-select `selection`, honouring exclusive options.
    ///
    /// Selecting an exclusive option replaces the selection with just that
    /// option; selecting a regular option drops any exclusive ones. Unknown ids
    /// leave the selection untouched.
    pub fn toggle(&self, selection: &[String], id: &str) -> Vec<String> {
        let Some(option) = self.option(id) else {
            return selection.to_vec();
        };

        if selection.iter().any(|selected| selected == id) {
            return selection
                .iter()
                .filter(|selected| *selected != id)
                .cloned()
                .collect();
        }

        if option.exclusive {
            return vec![option.id.clone()];
        }

        let mut next: Vec<String> = selection
            .iter()
            .filter(|selected| !self.option(selected).is_some_and(|o| o.exclusive))
            .cloned()
            .collect();
        next.push(option.id.clone());
        next
    }
}

/// A value of a dropdown question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropdownQuestion {
    pub options: Vec<DropdownOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl DropdownQuestion {
    pub fn new(options: Vec<DropdownOption>) -> Self {
        Self {
            options,
            placeholder: None,
        }
    }
}

/// A large selectable card, used for the product choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioCard {
    pub id: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl RadioCard {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            description: None,
            price: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadioCardQuestion {
    pub cards: Vec<RadioCard>,
}

/// HTML-ish input type of an input field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFieldKind {
    #[default]
    Text,
    Number,
    Date,
    Email,
    Tel,
    Textarea,
}

/// A single field of an input question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputField {
    /// Answer key written by this field.
    pub key: AnswerKey,

    pub label: String,

    #[serde(default)]
    pub kind: InputFieldKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl InputField {
    /// Create a required field.
    pub fn new(key: impl Into<AnswerKey>, label: impl Into<String>, kind: InputFieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            placeholder: None,
            required: true,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Mark this field as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Configuration for input and textarea questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputQuestion {
    pub fields: Vec<InputField>,
}

impl InputQuestion {
    pub fn new(fields: Vec<InputField>) -> Self {
        Self { fields }
    }

    /// Keys of the required fields.
    pub fn required_keys(&self) -> impl Iterator<Item = &AnswerKey> {
        self.fields
            .iter()
            .filter(|field| field.required)
            .map(|field| &field.key)
    }
}

/// Copy for informational screens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoScreen {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullet_points: Vec<String>,
}

impl InfoScreen {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            bullet_points: Vec::new(),
        }
    }

    pub fn with_bullets(mut self, bullets: &[&str]) -> Self {
        self.bullet_points = bullets.iter().map(|b| b.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenefitScreen {
    pub benefits: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl BenefitScreen {
    pub fn new(benefits: &[&str]) -> Self {
        Self {
            benefits: benefits.iter().map(|b| b.to_string()).collect(),
            image: None,
        }
    }
}

/// A section listed on the overview screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewSection {
    pub id: String,
    pub title: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl OverviewSection {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            duration: None,
        }
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }
}

/// A bounded numeric picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeQuestion {
    /// Answer key the picked value is written to.
    pub key: AnswerKey,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub unit: String,
}

impl RangeQuestion {
    pub fn new(key: impl Into<AnswerKey>, min: f64, max: f64, unit: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            min,
            max,
            step: 1.0,
            unit: unit.into(),
        }
    }

    /// Check if `value` is within the bounds.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamp `value` to the bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Height and weight pickers shown together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuresQuestion {
    pub height: RangeQuestion,
    pub weight: RangeQuestion,
}
