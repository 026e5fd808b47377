//! The weight-loss funnel: 28 steps from the welcome screen to the result.
//!
//! Steps are grouped by the section of the funnel they belong to. The order
//! below is the traversal order.

use quiz_funnel::{CatalogError, StepCatalog};

mod benefits;
mod onboarding;
mod personal_data;
mod preferences;
mod result;
mod screening;

/// Build the weight-loss catalog.
pub fn weight_loss_catalog() -> Result<StepCatalog, CatalogError> {
    StepCatalog::new(vec![
        onboarding::welcome(),
        onboarding::sex(),
        onboarding::pregnancy_check(),
        preferences::medications_used(),
        preferences::location(),
        preferences::plan_preference(),
        benefits::care(),
        benefits::delivery(),
        benefits::support(),
        preferences::medication_preference(),
        benefits::reimbursement(),
        personal_data::overview(),
        personal_data::name(),
        personal_data::birth_date(),
        personal_data::measures(),
        personal_data::bmi_result(),
        personal_data::goal_weight(),
        personal_data::goal_event(),
        personal_data::contact(),
        screening::intro(),
        screening::diagnoses(),
        screening::bariatric_surgery(),
        screening::regular_medication(),
        screening::which_medications(),
        screening::medication_allergies(),
        screening::additional_notes(),
        result::processing(),
        result::result(),
    ])
}
