use std::sync::Arc;

use quiz_funnel_types::{AnalyticsEvent, AnalyticsSink, AnswerKey, Answers};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::{CheckoutCipher, MedicationPreference, NoopSink, Product, cipher::Record};

pub const DEFAULT_CHECKOUT_URL: &str = "https://www.helixonlabs.shop/checkout-quiz";

/// Traffic tag appended as the `source` parameter.
pub const DEFAULT_SOURCE: &str = "emagrecenter";

/// The record handed to the checkout service.
///
/// Field names on the wire are the checkout service's own. Address fields are
/// collected at checkout and always go out empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPayload {
    pub product: String,
    #[serde(rename = "nome")]
    pub first_name: String,
    #[serde(rename = "sobrenome")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    pub cpf: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "rua")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
}

impl CheckoutPayload {
    /// Build the payload from the answers.
    ///
    /// The first name comes from `firstName` or else the first word of `name`;
    /// the last name is the rest of `name`.
    pub fn from_answers(answers: &Answers) -> Self {
        let full_name = answers.text(&AnswerKey::Name).unwrap_or_default();
        let mut words = full_name.split_whitespace();
        let first_word = words.next().unwrap_or_default();
        let last_name = words.collect::<Vec<_>>().join(" ");

        let first_name = answers
            .text(&AnswerKey::FirstName)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(first_word);

        let text = |key: AnswerKey| answers.text(&key).unwrap_or_default().to_string();

        Self {
            product: MedicationPreference::effective(answers).product().sku().to_string(),
            first_name: first_name.to_string(),
            last_name,
            email: text(AnswerKey::Email),
            phone: text(AnswerKey::Whatsapp),
            state: text(AnswerKey::State),
            ..Self::default()
        }
    }

    /// Wire name and value of every field, in wire order.
    pub fn fields(&self) -> [(&'static str, &str); 12] {
        [
            ("product", self.product.as_str()),
            ("nome", self.first_name.as_str()),
            ("sobrenome", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("telefone", self.phone.as_str()),
            ("cpf", self.cpf.as_str()),
            ("cep", self.postal_code.as_str()),
            ("rua", self.street.as_str()),
            ("numero", self.number.as_str()),
            ("bairro", self.district.as_str()),
            ("cidade", self.city.as_str()),
            ("estado", self.state.as_str()),
        ]
    }

    pub fn to_record(&self) -> Record {
        self.fields()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }
}

/// Builds outbound checkout URLs and reports checkout analytics.
#[derive(Clone)]
pub struct CheckoutService {
    base_url: Url,
    source: String,
    cipher: Option<CheckoutCipher>,
    analytics: Arc<dyn AnalyticsSink>,
}

impl CheckoutService {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            source: DEFAULT_SOURCE.to_string(),
            cipher: None,
            analytics: Arc::new(NoopSink),
        }
    }

    /// Attach the cipher used for the `data` parameter.
    pub fn with_cipher(mut self, cipher: CheckoutCipher) -> Self {
        self.cipher = Some(cipher);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_analytics(mut self, sink: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = sink;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The product the answers lead to.
    pub fn product(&self, answers: &Answers) -> Product {
        MedicationPreference::effective(answers).product()
    }

    /// Build the checkout URL for `answers`.
    ///
    /// Every payload field goes out as a plain parameter, followed by `source`
    /// and the encrypted `data` token. When there is no cipher or encryption
    /// fails, `data` is left out.
    pub fn checkout_url(&self, answers: &Answers) -> Url {
        let payload = CheckoutPayload::from_answers(answers);
        let token = self.encrypt(&payload);

        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in payload.fields() {
                query.append_pair(name, value);
            }
            query.append_pair("source", &self.source);
            if let Some(token) = &token {
                query.append_pair("data", token);
            }
        }

        debug!(product = %payload.product, encrypted = token.is_some(), "built checkout url");
        self.analytics.emit(&AnalyticsEvent::CheckoutStarted {
            product: payload.product,
        });
        url
    }

    /// Report a completed purchase of the product the answers lead to.
    pub fn record_purchase(&self, answers: &Answers, transaction_id: impl Into<String>) {
        let product = self.product(answers);
        self.analytics.emit(&AnalyticsEvent::Purchase {
            product: product.sku().to_string(),
            transaction_id: transaction_id.into(),
            value: product.price(),
            currency: product.currency().to_string(),
        });
    }

    fn encrypt(&self, payload: &CheckoutPayload) -> Option<String> {
        let Some(cipher) = &self.cipher else {
            warn!("No checkout cipher configured, sending checkout without data token");
            return None;
        };
        match cipher.encrypt(&payload.to_record()) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("Failed to encrypt checkout payload, sending without data token: {e}");
                None
            }
        }
    }
}

impl std::fmt::Debug for CheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutService")
            .field("base_url", &self.base_url.as_str())
            .field("source", &self.source)
            .field("encrypts", &self.cipher.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn name_is_split() {
        let answers = Answers::new().with(AnswerKey::Name, "  Maria   da Silva ");
        let payload = CheckoutPayload::from_answers(&answers);
        assert_eq!(payload.first_name, "Maria");
        assert_eq!(payload.last_name, "da Silva");
    }

    #[test]
    fn first_name_answer_wins() {
        let answers = Answers::new()
            .with(AnswerKey::Name, "Maria da Silva")
            .with(AnswerKey::FirstName, "Mari");
        let payload = CheckoutPayload::from_answers(&answers);
        assert_eq!(payload.first_name, "Mari");
        assert_eq!(payload.last_name, "da Silva");
    }

    #[test]
    fn empty_answers_give_default_product_and_blank_fields() {
        let payload = CheckoutPayload::from_answers(&Answers::new());
        assert_eq!(payload.product, "tirzepatida-60mg");
        assert!(payload.fields().iter().skip(1).all(|(_, value)| value.is_empty()));
    }

    #[test]
    fn serialized_with_wire_names() {
        let payload = CheckoutPayload {
            product: "semaglutida-5mg".into(),
            phone: "11999990000".into(),
            ..CheckoutPayload::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["telefone"], "11999990000");
        assert_eq!(json.as_object().unwrap().len(), 12);
        assert_eq!(payload.to_record().len(), 12);
    }

    #[test]
    fn url_without_cipher_has_no_data() {
        let service = CheckoutService::new(Url::parse(DEFAULT_CHECKOUT_URL).unwrap());
        let url = service.checkout_url(&Answers::new().with(AnswerKey::MedicationPreference, "wegovy"));

        let names: Vec<String> = url.query_pairs().map(|(name, _)| name.into_owned()).collect();
        assert_eq!(names.first().map(String::as_str), Some("product"));
        assert_eq!(names.last().map(String::as_str), Some("source"));
        assert!(url.as_str().contains("product=semaglutida-5mg"));
    }
}
