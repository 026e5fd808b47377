//! Integration tests for the geolocation lookup against a mock IP-info service

use std::{sync::Arc, time::Duration};

use quiz_funnel::{
    AnswerKey, GeoLocator, GeolocationError, InfoScreen, MemoryStore, Persistence, Phase,
    Question, QuestionKind, QuizEngine, StepCatalog, StepDefinition,
};
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup_locator(body: ResponseTemplate, timeout: Duration) -> (MockServer, GeoLocator) {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(body)
        .mount(&mock_server)
        .await;

    let endpoint = Url::parse(&format!("{}/json", mock_server.uri())).unwrap();
    (mock_server, GeoLocator::with_timeout(endpoint, timeout))
}

fn ok(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

#[tokio::test]
async fn test_brazilian_region_resolves_to_state() {
    let (_server, locator) = setup_locator(
        ok(json!({"ip": "177.0.0.1", "country": "BR", "region": "Rio Grande do Sul"})),
        Duration::from_secs(5),
    )
    .await;

    assert_eq!(locator.locate().await.as_deref(), Some("RS"));
}

#[tokio::test]
async fn test_other_countries_yield_nothing() {
    let (_server, locator) = setup_locator(
        ok(json!({"country": "PT", "region": "Lisbon"})),
        Duration::from_secs(5),
    )
    .await;

    assert_eq!(locator.locate().await, None);
}

#[tokio::test]
async fn test_unknown_region_yields_nothing() {
    let (_server, locator) = setup_locator(
        ok(json!({"country": "BR", "region": "Atlantis"})),
        Duration::from_secs(5),
    )
    .await;

    assert_eq!(locator.locate().await, None);
}

#[tokio::test]
async fn test_http_errors_yield_nothing() {
    let (_server, locator) =
        setup_locator(ResponseTemplate::new(429), Duration::from_secs(5)).await;

    assert!(matches!(
        locator.lookup().await,
        Err(GeolocationError::Status(status)) if status.as_u16() == 429
    ));
    assert_eq!(locator.locate().await, None);
}

#[tokio::test]
async fn test_malformed_body_yields_nothing() {
    let (_server, locator) = setup_locator(
        ResponseTemplate::new(200).set_body_string("<html>nope</html>"),
        Duration::from_secs(5),
    )
    .await;

    assert!(matches!(locator.lookup().await, Err(GeolocationError::Http(_))));
    assert_eq!(locator.locate().await, None);
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let (_server, locator) = setup_locator(
        ok(json!({"country": "BR", "region": "Bahia"})).set_delay(Duration::from_millis(500)),
        Duration::from_millis(50),
    )
    .await;

    assert!(matches!(
        locator.lookup().await,
        Err(GeolocationError::Timeout(_))
    ));
}

#[tokio::test]
async fn test_spawned_lookup_prefills_engine() {
    let (_server, locator) = setup_locator(
        ok(json!({"country": "BR", "region": "Pernambuco"})),
        Duration::from_secs(5),
    )
    .await;

    let catalog = StepCatalog::new(vec![StepDefinition::new(
        "location",
        Phase::Preferences,
        Question::new(AnswerKey::State, QuestionKind::Interstitial(InfoScreen::default())),
    )])
    .unwrap();
    let mut engine = QuizEngine::new(catalog, Persistence::new(Arc::new(MemoryStore::new())));
    engine.hydrate();

    let lookup = locator.spawn();
    assert!(engine.prefill_state(lookup.wait().await));
    assert_eq!(engine.answers().text(&AnswerKey::State), Some("PE"));
}

#[tokio::test]
async fn test_cancelled_lookup_yields_nothing() {
    let (_server, locator) = setup_locator(
        ok(json!({"country": "BR", "region": "Bahia"})).set_delay(Duration::from_secs(2)),
        Duration::from_secs(5),
    )
    .await;

    let lookup = locator.spawn();
    lookup.cancel();
    assert_eq!(lookup.wait().await, None);
}
