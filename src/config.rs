use std::time::Duration;

use dioxus::prelude::*;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BANNER_DELAY_MS: u64 = 2000;
const DEFAULT_SCAN_DELAY_MS: u64 = 2000;
const DEFAULT_TOAST_VISIBLE_MS: u64 = 3000;
const DEFAULT_EXIT_ANIMATION_MS: u64 = 300;
const DEFAULT_SIDEBAR_BREAKPOINT_PX: u32 = 1200;

#[cfg(target_arch = "wasm32")]
const CONFIG_PATHS: [&str; 2] = ["/config.json", "/assets/config.json"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("request to {path} failed: {reason}")]
    Request { path: String, reason: String },
    #[error("{path} answered with status {status}")]
    Status { path: String, status: u16 },
    #[error("config is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub banner_delay_ms: u64,
    pub scan_delay_ms: u64,
    pub toast_visible_ms: u64,
    pub exit_animation_ms: u64,
    pub sidebar_breakpoint_px: u32,
    pub default_language: String,
    pub share_title: String,
    pub share_text: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            banner_delay_ms: DEFAULT_BANNER_DELAY_MS,
            scan_delay_ms: DEFAULT_SCAN_DELAY_MS,
            toast_visible_ms: DEFAULT_TOAST_VISIBLE_MS,
            exit_animation_ms: DEFAULT_EXIT_ANIMATION_MS,
            sidebar_breakpoint_px: DEFAULT_SIDEBAR_BREAKPOINT_PX,
            default_language: "it".to_string(),
            share_title: "Cookie Analytics Pro".to_string(),
            share_text: "Scopri tutto sui cookie di terze parti".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Builds a config from `SITE_*` variables resolved by `lookup`; missing,
    /// unparseable or zero values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            banner_delay_ms: parse_positive_u64(
                lookup("SITE_BANNER_DELAY_MS"),
                defaults.banner_delay_ms,
            ),
            scan_delay_ms: parse_positive_u64(lookup("SITE_SCAN_DELAY_MS"), defaults.scan_delay_ms),
            toast_visible_ms: parse_positive_u64(
                lookup("SITE_TOAST_VISIBLE_MS"),
                defaults.toast_visible_ms,
            ),
            exit_animation_ms: parse_positive_u64(
                lookup("SITE_EXIT_ANIMATION_MS"),
                defaults.exit_animation_ms,
            ),
            sidebar_breakpoint_px: parse_positive_u64(
                lookup("SITE_SIDEBAR_BREAKPOINT_PX"),
                u64::from(defaults.sidebar_breakpoint_px),
            )
            .min(u64::from(u32::MAX)) as u32,
            default_language: non_empty(lookup("SITE_DEFAULT_LANGUAGE"))
                .unwrap_or(defaults.default_language),
            share_title: non_empty(lookup("SITE_SHARE_TITLE")).unwrap_or(defaults.share_title),
            share_text: non_empty(lookup("SITE_SHARE_TEXT")).unwrap_or(defaults.share_text),
        };
        config.sanitized()
    }

    /// Decodes a `config.json` body; absent and zero fields take defaults.
    pub fn from_json(body: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(body)?;
        Ok(config.sanitized())
    }

    /// Replaces zero timings, a zero breakpoint and blank strings with their
    /// defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let or_default = |value: u64, default_value: u64| {
            if value == 0 {
                default_value
            } else {
                value
            }
        };
        Self {
            banner_delay_ms: or_default(self.banner_delay_ms, defaults.banner_delay_ms),
            scan_delay_ms: or_default(self.scan_delay_ms, defaults.scan_delay_ms),
            toast_visible_ms: or_default(self.toast_visible_ms, defaults.toast_visible_ms),
            exit_animation_ms: or_default(self.exit_animation_ms, defaults.exit_animation_ms),
            sidebar_breakpoint_px: if self.sidebar_breakpoint_px == 0 {
                defaults.sidebar_breakpoint_px
            } else {
                self.sidebar_breakpoint_px
            },
            default_language: non_empty(Some(self.default_language))
                .unwrap_or(defaults.default_language),
            share_title: non_empty(Some(self.share_title)).unwrap_or(defaults.share_title),
            share_text: non_empty(Some(self.share_text)).unwrap_or(defaults.share_text),
        }
    }

    pub fn banner_delay(&self) -> Duration {
        Duration::from_millis(self.banner_delay_ms)
    }

    pub fn scan_delay(&self) -> Duration {
        Duration::from_millis(self.scan_delay_ms)
    }

    pub fn toast_visible(&self) -> Duration {
        Duration::from_millis(self.toast_visible_ms)
    }

    pub fn exit_animation(&self) -> Duration {
        Duration::from_millis(self.exit_animation_ms)
    }
}

pub fn use_runtime_config() -> Resource<RuntimeConfig> {
    use_resource(|| async move { fetch_runtime_config().await })
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> RuntimeConfig {
    let mut failures = Vec::new();
    for path in CONFIG_PATHS {
        match load_config(path).await {
            Ok(config) => return config,
            Err(err) => failures.push(err.to_string()),
        }
    }
    tracing::warn!("config: using defaults ({})", failures.join("; "));
    RuntimeConfig::default()
}

#[cfg(target_arch = "wasm32")]
async fn load_config(path: &str) -> Result<RuntimeConfig, ConfigError> {
    let request_failed = |err: gloo_net::Error| ConfigError::Request {
        path: path.to_string(),
        reason: err.to_string(),
    };
    let response = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(request_failed)?;
    if !response.ok() {
        return Err(ConfigError::Status {
            path: path.to_string(),
            status: response.status(),
        });
    }
    let body = response.text().await.map_err(request_failed)?;
    RuntimeConfig::from_json(&body)
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> RuntimeConfig {
    RuntimeConfig::from_lookup(|key| std::env::var(key).ok())
}

fn parse_positive_u64(value: Option<String>, default_value: u64) -> u64 {
    value
        .as_deref()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|parsed| *parsed > 0)
        .unwrap_or(default_value)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
