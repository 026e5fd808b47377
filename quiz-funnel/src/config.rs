use std::{env, fmt::Display, path::PathBuf, str::FromStr, sync::Arc, time::Duration};

use quiz_funnel_types::{AnalyticsSink, KeyValueStore};
use tracing::{info, warn};
use url::Url;

use crate::{
    CheckoutCipher, CheckoutService, FileStore, GeoLocator, MemoryStore, Persistence,
    checkout::{DEFAULT_CHECKOUT_URL, DEFAULT_SOURCE},
    geolocation::{DEFAULT_GEO_ENDPOINT, DEFAULT_GEO_TIMEOUT},
    persistence::DEFAULT_STORAGE_KEY,
};

/// Passphrase shared with the checkout service when none is configured.
pub const DEFAULT_CHECKOUT_SECRET: &str = "emagrecenter-checkout-2024-secret-key";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {key} value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read from `FUNNEL_*` environment variables.
#[derive(Clone)]
pub struct FunnelConfig {
    /// Key the quiz state is stored under.
    pub storage_key: String,
    /// Directory for the file store; in-memory storage when unset.
    pub storage_dir: Option<PathBuf>,
    pub checkout_url: Url,
    pub checkout_secret: String,
    pub checkout_source: String,
    pub geo_endpoint: Url,
    pub geo_timeout: Duration,
}

impl FunnelConfig {
    /// Load a `.env` file if there is one, then read the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = lookup("FUNNEL_CHECKOUT_SECRET").filter(|s| !s.is_empty());
        if secret.is_none() {
            warn!("FUNNEL_CHECKOUT_SECRET not set, using the built-in checkout passphrase");
        }

        let timeout_secs: u64 = try_load(
            &lookup,
            "FUNNEL_GEO_TIMEOUT_SECS",
            &DEFAULT_GEO_TIMEOUT.as_secs().to_string(),
        )?;

        Ok(Self {
            storage_key: try_load(&lookup, "FUNNEL_STORAGE_KEY", DEFAULT_STORAGE_KEY)?,
            storage_dir: lookup("FUNNEL_STORAGE_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
            checkout_url: try_load(&lookup, "FUNNEL_CHECKOUT_URL", DEFAULT_CHECKOUT_URL)?,
            checkout_secret: secret.unwrap_or_else(|| DEFAULT_CHECKOUT_SECRET.to_string()),
            checkout_source: try_load(&lookup, "FUNNEL_CHECKOUT_SOURCE", DEFAULT_SOURCE)?,
            geo_endpoint: try_load(&lookup, "FUNNEL_GEO_ENDPOINT", DEFAULT_GEO_ENDPOINT)?,
            geo_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// The configured store: files under `storage_dir`, or memory.
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        match &self.storage_dir {
            Some(dir) => Arc::new(FileStore::new(dir)),
            None => Arc::new(MemoryStore::new()),
        }
    }

    pub fn persistence(&self) -> Persistence {
        Persistence::with_key(self.store(), self.storage_key.clone())
    }

    /// Derive the checkout cipher. Runs the full key derivation.
    pub fn cipher(&self) -> CheckoutCipher {
        CheckoutCipher::new(&self.checkout_secret)
    }

    pub fn checkout_service(&self, analytics: Arc<dyn AnalyticsSink>) -> CheckoutService {
        CheckoutService::new(self.checkout_url.clone())
            .with_source(self.checkout_source.clone())
            .with_cipher(self.cipher())
            .with_analytics(analytics)
    }

    pub fn geo_locator(&self) -> GeoLocator {
        GeoLocator::with_timeout(self.geo_endpoint.clone(), self.geo_timeout)
    }
}

impl std::fmt::Debug for FunnelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunnelConfig")
            .field("storage_key", &self.storage_key)
            .field("storage_dir", &self.storage_dir)
            .field("checkout_url", &self.checkout_url.as_str())
            .field("checkout_secret", &"<redacted>")
            .field("checkout_source", &self.checkout_source)
            .field("geo_endpoint", &self.geo_endpoint.as_str())
            .field("geo_timeout", &self.geo_timeout)
            .finish()
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value,
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = FunnelConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.storage_key, "emagrecenter-quiz");
        assert_eq!(config.storage_dir, None);
        assert_eq!(config.checkout_url.as_str(), DEFAULT_CHECKOUT_URL);
        assert_eq!(config.checkout_secret, DEFAULT_CHECKOUT_SECRET);
        assert_eq!(config.checkout_source, "emagrecenter");
        assert_eq!(config.geo_timeout, Duration::from_secs(5));
    }

    #[test]
    fn overrides() {
        let config = FunnelConfig::from_lookup(lookup(&[
            ("FUNNEL_STORAGE_KEY", "quiz-v2"),
            ("FUNNEL_STORAGE_DIR", "/var/lib/quiz"),
            ("FUNNEL_CHECKOUT_URL", "https://checkout.example.com/pay"),
            ("FUNNEL_CHECKOUT_SECRET", "s3cret"),
            ("FUNNEL_GEO_TIMEOUT_SECS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.storage_key, "quiz-v2");
        assert_eq!(config.storage_dir, Some(PathBuf::from("/var/lib/quiz")));
        assert_eq!(config.checkout_url.host_str(), Some("checkout.example.com"));
        assert_eq!(config.checkout_secret, "s3cret");
        assert_eq!(config.geo_timeout, Duration::from_secs(2));
        assert!(!format!("{config:?}").contains("s3cret"));
    }

    #[test]
    fn invalid_values_are_errors() {
        let result = FunnelConfig::from_lookup(lookup(&[("FUNNEL_GEO_TIMEOUT_SECS", "soon")]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "FUNNEL_GEO_TIMEOUT_SECS", .. })
        ));

        let result = FunnelConfig::from_lookup(lookup(&[("FUNNEL_CHECKOUT_URL", "not a url")]));
        assert!(matches!(result, Err(ConfigError::Invalid { key: "FUNNEL_CHECKOUT_URL", .. })));
    }
}
