//! External Tracking Lookup Proxy
//!
//! Calls the configured carrier endpoint for a tracking number and
//! normalizes whatever comes back. Provider outages never abort the
//! request by default: an unconfigured or failing provider degrades to a
//! single synthetic event plus a warning, so the storefront stays usable
//! without carrier credentials. The degrade can be switched off via
//! `FALLBACK_ON_PROVIDER_ERROR=false`, in which case failures surface as
//! 502.

use crate::tracking::extract::extract_events;
use crate::tracking::provider::{Provider, ProviderConfig, ProviderRegistry};
use crate::utils::AppError;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::{Value, json};
use shared::models::{TrackLookup, TrackingEvent};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct LookupService {
    client: Client,
    registry: Arc<ProviderRegistry>,
    fallback_on_error: bool,
}

impl LookupService {
    pub fn new(client: Client, registry: Arc<ProviderRegistry>, fallback_on_error: bool) -> Self {
        Self {
            client,
            registry,
            fallback_on_error,
        }
    }

    /// Fetch and normalize shipment events for `tracking` from `provider`.
    pub async fn track(&self, provider: Provider, tracking: &str) -> Result<TrackLookup, AppError> {
        let name = provider.canonical_name();

        let Some(config) = self.registry.get(provider) else {
            return Ok(mocked_lookup(
                name,
                tracking,
                "Mocked",
                format!("Missing {}_TRACK_URL in environment", provider.env_prefix()),
            ));
        };

        match self.request(config, tracking).await {
            Ok(data) => Ok(TrackLookup {
                provider: name.to_string(),
                tracking: tracking.to_string(),
                events: extract_events(&data),
                warning: None,
            }),
            Err(e) => {
                if !self.fallback_on_error {
                    return Err(AppError::ProviderFailed(format!(
                        "{name} request failed: {e}"
                    )));
                }
                tracing::warn!(provider = name, error = %e, "Provider call failed, degrading to mock");
                Ok(mocked_lookup(
                    name,
                    tracking,
                    "Provider unavailable - mocked",
                    format!("Provider error: {e}"),
                ))
            }
        }
    }

    /// Best-effort lookup: any failure (including a disabled fallback)
    /// yields `None` instead of an error. Degraded results are suppressed
    /// too — the public order lookup shows real carrier events or none,
    /// never the synthetic placeholder.
    pub async fn try_track_events(
        &self,
        provider: Provider,
        tracking: &str,
    ) -> Option<Vec<TrackingEvent>> {
        match self.track(provider, tracking).await {
            Ok(lookup) if lookup.warning.is_none() => lookup.events,
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Best-effort provider lookup failed");
                None
            }
        }
    }

    async fn request(&self, config: &ProviderConfig, tracking: &str) -> Result<Value, String> {
        let url = config
            .url_template
            .replace("{tracking}", &urlencoding::encode(tracking));

        let mut request = self
            .client
            .request(config.method.clone(), &url)
            .headers(config.headers.clone());

        if config.method == reqwest::Method::POST || config.method == reqwest::Method::PUT {
            let body = match &config.body_template {
                Some(template) => template.replace("{tracking}", tracking),
                None => json!({ "tracking": tracking }).to_string(),
            };
            if !config.headers.contains_key(CONTENT_TYPE) {
                request = request.header(CONTENT_TYPE, "application/json");
            }
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| e.to_string())?;
        response.json::<Value>().await.map_err(|e| e.to_string())
    }
}

fn mocked_lookup(
    provider: &str,
    tracking: &str,
    status: &str,
    warning: String,
) -> TrackLookup {
    TrackLookup {
        provider: provider.to_string(),
        tracking: tracking.to_string(),
        events: Some(vec![TrackingEvent {
            time: Some(chrono::Utc::now().to_rfc3339()),
            status: Some(status.to_string()),
            location: None,
            raw: Value::Null,
        }]),
        warning: Some(warning),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use reqwest::header::HeaderMap;
    use std::time::Duration;

    fn service(registry: ProviderRegistry, fallback: bool) -> LookupService {
        let client = Client::builder()
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap();
        LookupService::new(client, Arc::new(registry), fallback)
    }

    fn unreachable_config() -> ProviderConfig {
        // Nothing listens on the discard port; the connection fails fast.
        ProviderConfig {
            url_template: "http://127.0.0.1:9/track/{tracking}".to_string(),
            method: Method::GET,
            headers: HeaderMap::new(),
            body_template: None,
        }
    }

    #[tokio::test]
    async fn test_unconfigured_provider_returns_mock() {
        let svc = service(ProviderRegistry::empty(), true);
        let lookup = svc.track(Provider::Flash, "1234567890123").await.unwrap();

        assert_eq!(lookup.provider, "Flash");
        let events = lookup.events.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status.as_deref(), Some("Mocked"));
        assert!(events[0].time.is_some());
        assert!(lookup.warning.unwrap().contains("FLASH_TRACK_URL"));
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_to_mock() {
        let registry =
            ProviderRegistry::with_configs([(Provider::Kerry, unreachable_config())]);
        let svc = service(registry, true);
        let lookup = svc.track(Provider::Kerry, "SHP123456789").await.unwrap();

        let events = lookup.events.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status.as_deref(), Some("Provider unavailable - mocked"));
        assert!(lookup.warning.unwrap().starts_with("Provider error:"));
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_when_fallback_disabled() {
        let registry =
            ProviderRegistry::with_configs([(Provider::Kerry, unreachable_config())]);
        let svc = service(registry, false);
        let err = svc.track(Provider::Kerry, "SHP123456789").await.unwrap_err();
        assert!(matches!(err, AppError::ProviderFailed(_)));
    }

    #[tokio::test]
    async fn test_best_effort_lookup_swallows_failures() {
        let registry =
            ProviderRegistry::with_configs([(Provider::Kerry, unreachable_config())]);
        let svc = service(registry, false);
        assert!(svc.try_track_events(Provider::Kerry, "SHP123456789").await.is_none());
    }

    #[tokio::test]
    async fn test_best_effort_lookup_hides_mocked_events() {
        // Unconfigured provider: track() returns a synthetic event, but
        // the best-effort path must not expose it
        let svc = service(ProviderRegistry::empty(), true);
        assert!(svc.try_track_events(Provider::Flash, "1234567890123").await.is_none());

        // Same for a configured provider that fails and degrades
        let registry =
            ProviderRegistry::with_configs([(Provider::Kerry, unreachable_config())]);
        let svc = service(registry, true);
        assert!(svc.try_track_events(Provider::Kerry, "SHP123456789").await.is_none());
    }
}
