use std::borrow::Cow;

use url::{Url, form_urlencoded};

use crate::MedicationPreference;

/// Query parameters the funnel understands on its entry URL.
///
/// `step` is an index into the catalog (clamped by the engine, negative values
/// read as 0) and `md` seeds the medication preference. Anything unparsable is
/// ignored rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepLink {
    pub step: Option<usize>,
    pub medication: Option<MedicationPreference>,
}

impl DeepLink {
    /// Read the parameters from a raw query string (with or without `?`).
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()))
    }

    /// Read the parameters from a full URL.
    pub fn from_url(url: &Url) -> Self {
        Self::from_pairs(url.query_pairs())
    }

    fn from_pairs<'a>(pairs: impl Iterator<Item = (Cow<'a, str>, Cow<'a, str>)>) -> Self {
        let mut link = Self::default();
        for (name, value) in pairs {
            match name.as_ref() {
                "step" => {
                    if let Ok(step) = value.trim().parse::<i64>() {
                        link.step = Some(usize::try_from(step).unwrap_or(0));
                    }
                }
                "md" => {
                    if let Some(medication) = MedicationPreference::from_code(value.trim()) {
                        link.medication = Some(medication);
                    }
                }
                _ => {}
            }
        }
        link
    }

    /// Link back to the funnel start carrying only the medication code.
    pub fn restart(medication: Option<MedicationPreference>) -> Self {
        Self {
            step: None,
            medication,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.step.is_none() && self.medication.is_none()
    }

    /// Render as a root-relative path, e.g. `/?md=t`.
    pub fn to_path(&self) -> String {
        if self.is_empty() {
            return "/".to_string();
        }

        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(step) = self.step {
            query.append_pair("step", &step.to_string());
        }
        if let Some(medication) = self.medication {
            query.append_pair("md", medication.code());
        }
        format!("/?{}", query.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_step_and_md() {
        let link = DeepLink::from_query("?step=7&md=s&utm_source=ads");
        assert_eq!(link.step, Some(7));
        assert_eq!(link.medication, Some(MedicationPreference::Wegovy));
    }

    #[test]
    fn negative_step_reads_as_zero() {
        assert_eq!(DeepLink::from_query("step=-4").step, Some(0));
    }

    #[test]
    fn garbage_is_ignored() {
        let link = DeepLink::from_query("step=abc&md=z");
        assert!(link.is_empty());
    }

    #[test]
    fn from_full_url() {
        let url = Url::parse("https://quiz.example.com/?md=t").unwrap();
        let link = DeepLink::from_url(&url);
        assert_eq!(link.medication, Some(MedicationPreference::Mounjaro));
        assert_eq!(link.step, None);
    }

    #[test]
    fn restart_path() {
        assert_eq!(DeepLink::restart(None).to_path(), "/");
        assert_eq!(
            DeepLink::restart(Some(MedicationPreference::Mounjaro)).to_path(),
            "/?md=t"
        );
    }
}
