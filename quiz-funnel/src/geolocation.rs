//! Best-effort IP geolocation used to prefill the visitor's state.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

use crate::regions;

pub const DEFAULT_GEO_ENDPOINT: &str = "https://ipinfo.io/json";

pub const DEFAULT_GEO_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    #[error("Geolocation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Geolocation service returned {0}")]
    Status(StatusCode),

    #[error("Geolocation lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// The part of the IP-info response the funnel reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IpInfo {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl IpInfo {
    /// The state code, when the address is Brazilian and the region is known.
    pub fn state_code(&self) -> Option<&'static str> {
        if self.country.as_deref() != Some("BR") {
            return None;
        }
        self.region.as_deref().and_then(regions::state_code_for_region)
    }
}

/// Client for the IP-info endpoint.
#[derive(Debug, Clone)]
pub struct GeoLocator {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl GeoLocator {
    pub fn new(endpoint: Url) -> Self {
        Self::with_timeout(endpoint, DEFAULT_GEO_TIMEOUT)
    }

    pub fn with_timeout(endpoint: Url, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            timeout,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the raw response, bounded by the timeout.
    pub async fn lookup(&self) -> Result<IpInfo, GeolocationError> {
        let request = async {
            let response = self.client.get(self.endpoint.clone()).send().await?;
            if !response.status().is_success() {
                return Err(GeolocationError::Status(response.status()));
            }
            Ok(response.json::<IpInfo>().await?)
        };

        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| GeolocationError::Timeout(self.timeout))?
    }

    /// Resolve the visitor's state code. Any failure yields `None`.
    pub async fn locate(&self) -> Option<String> {
        match self.lookup().await {
            Ok(info) => {
                let code = info.state_code();
                debug!(?info, ?code, "geolocation response");
                code.map(str::to_string)
            }
            Err(e) => {
                warn!("Geolocation unavailable: {e}");
                None
            }
        }
    }

    /// Run [`locate`](GeoLocator::locate) on a background task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(&self) -> StateLookup {
        let locator = self.clone();
        StateLookup {
            handle: Some(tokio::spawn(async move { locator.locate().await })),
        }
    }
}

/// A running geolocation lookup. Dropping it cancels the lookup.
#[derive(Debug)]
pub struct StateLookup {
    handle: Option<JoinHandle<Option<String>>>,
}

impl StateLookup {
    /// Abort the lookup. A later [`wait`](StateLookup::wait) yields `None`.
    pub fn cancel(&self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the state code.
    pub async fn wait(mut self) -> Option<String> {
        let handle = self.handle.as_mut()?;
        let result = handle.await;
        self.handle = None;
        result.ok().flatten()
    }
}

impl Drop for StateLookup {
    fn drop(&mut self) {
        self.cancel();
    }
}
