//! Tracking Providers
//!
//! The external carrier systems the lookup proxy can call, and their
//! per-carrier request configuration.
//!
//! # 环境变量
//!
//! 每个物流商一组，前缀见 [`Provider::env_prefix`]：
//!
//! | 环境变量 | 说明 |
//! |----------|------|
//! | {PREFIX}_TRACK_URL | 查询地址模板，必须包含 `{tracking}` 占位符 |
//! | {PREFIX}_TRACK_METHOD | HTTP 方法，默认 GET |
//! | {PREFIX}_TRACK_HEADERS | 额外请求头 (JSON 对象) |
//! | {PREFIX}_TRACK_BODY | POST/PUT 请求体模板 (可含 `{tracking}`) |
//! | THAI_API_KEY | 泰国邮政 Bearer 令牌 |
//!
//! Configuration is loaded and validated once at startup so a bad method
//! or malformed header JSON fails the boot instead of the first request.

use anyhow::{Context, bail};
use regex::Regex;
use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

/// Carriers with an external tracking integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    ThaiPost,
    Flash,
    Jnt,
    Kerry,
    NinjaVan,
}

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::ThaiPost,
        Provider::Flash,
        Provider::Jnt,
        Provider::Kerry,
        Provider::NinjaVan,
    ];

    /// Canonical name returned in lookup responses
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Provider::ThaiPost => "ไปรษณีย์ไทย",
            Provider::Flash => "Flash",
            Provider::Jnt => "J&T",
            Provider::Kerry => "Kerry",
            Provider::NinjaVan => "Ninjavan",
        }
    }

    /// Environment-variable prefix for this provider's configuration
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Provider::ThaiPost => "THAI_POST",
            Provider::Flash => "FLASH",
            Provider::Jnt => "JNT",
            Provider::Kerry => "KERRY",
            Provider::NinjaVan => "NINJA",
        }
    }

    /// Normalize a free-text carrier name by keyword (case-insensitive)
    pub fn normalize(name: &str) -> Option<Self> {
        let n = name.to_lowercase();
        if n.contains("flash") {
            Some(Provider::Flash)
        } else if n.contains("j&t") || n.contains("jnt") {
            Some(Provider::Jnt)
        } else if n.contains("kerry") {
            Some(Provider::Kerry)
        } else if n.contains("ninjavan") {
            Some(Provider::NinjaVan)
        } else if n.contains("ไปรษณีย์") || n.contains("post") {
            Some(Provider::ThaiPost)
        } else {
            None
        }
    }

    /// Guess the provider from the shape of a tracking code alone.
    ///
    /// Best-effort heuristic for the public lookup, where the order may
    /// predate carrier persistence.
    pub fn guess_from_code(code: &str) -> Option<Self> {
        static THAI_SHAPE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"[A-Z]{2}\d{9}[A-Z]{2}").expect("pattern must compile"));

        let t = code.to_uppercase();
        if t.ends_with("TH") || t.starts_with("EG") || t.starts_with("TH") {
            Some(Provider::ThaiPost)
        } else if t.starts_with("JNT") || t.starts_with("J&T") {
            Some(Provider::Jnt)
        } else if t.starts_with("KERRY") || t.starts_with("KRY") || t.starts_with("KY") {
            Some(Provider::Kerry)
        } else if t.len() >= 10 && THAI_SHAPE.is_match(&t) {
            Some(Provider::ThaiPost)
        } else {
            None
        }
    }
}

/// Request configuration for one provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// URL template containing a `{tracking}` placeholder
    pub url_template: String,
    pub method: Method,
    pub headers: HeaderMap,
    /// POST/PUT body template; `{"tracking": ...}` JSON when absent
    pub body_template: Option<String>,
}

/// Per-provider configuration map, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    configs: HashMap<Provider, ProviderConfig>,
}

impl ProviderRegistry {
    /// Load and validate provider configuration from the environment.
    ///
    /// Providers without a `{PREFIX}_TRACK_URL` stay unconfigured (the
    /// lookup degrades to a mocked response for them); a configured
    /// provider with an invalid method, malformed header JSON or a URL
    /// missing the placeholder aborts startup.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut configs = HashMap::new();

        for provider in Provider::ALL {
            let prefix = provider.env_prefix();
            let Ok(url_template) = std::env::var(format!("{prefix}_TRACK_URL")) else {
                continue;
            };
            if !url_template.contains("{tracking}") {
                bail!("{prefix}_TRACK_URL must contain a {{tracking}} placeholder");
            }

            let method = match std::env::var(format!("{prefix}_TRACK_METHOD")) {
                Ok(raw) => Method::from_str(&raw.to_uppercase())
                    .with_context(|| format!("{prefix}_TRACK_METHOD: invalid method '{raw}'"))?,
                Err(_) => Method::GET,
            };

            let mut headers = HeaderMap::new();
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
            if let Ok(raw) = std::env::var(format!("{prefix}_TRACK_HEADERS")) {
                let extra: HashMap<String, String> = serde_json::from_str(&raw)
                    .with_context(|| format!("{prefix}_TRACK_HEADERS: invalid JSON object"))?;
                for (name, value) in extra {
                    let name = HeaderName::from_str(&name)
                        .with_context(|| format!("{prefix}_TRACK_HEADERS: bad name '{name}'"))?;
                    let value = HeaderValue::from_str(&value)
                        .with_context(|| format!("{prefix}_TRACK_HEADERS: bad value for {name}"))?;
                    headers.insert(name, value);
                }
            }

            // Thailand Post uses a bearer token from its own variable
            if provider == Provider::ThaiPost
                && let Ok(api_key) = std::env::var("THAI_API_KEY")
            {
                let value = HeaderValue::from_str(&format!("Bearer {api_key}"))
                    .context("THAI_API_KEY: not a valid header value")?;
                headers.insert(AUTHORIZATION, value);
            }

            let body_template = std::env::var(format!("{prefix}_TRACK_BODY")).ok();

            configs.insert(
                provider,
                ProviderConfig {
                    url_template,
                    method,
                    headers,
                    body_template,
                },
            );
        }

        if !configs.is_empty() {
            tracing::info!(
                providers = configs.len(),
                "Tracking provider configuration loaded"
            );
        }

        Ok(Self { configs })
    }

    /// Registry with no configured providers (every lookup degrades to mock)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry built from explicit entries (tests)
    pub fn with_configs(entries: impl IntoIterator<Item = (Provider, ProviderConfig)>) -> Self {
        Self {
            configs: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, provider: Provider) -> Option<&ProviderConfig> {
        self.configs.get(&provider)
    }
}
