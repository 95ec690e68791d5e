//! Runtime configuration.
//!
//! Defaults match the form as deployed: local backend on port 5001 and a one
//! second pause before the register number is looked up.

use std::{env, fmt::Display, str::FromStr, time::Duration};

use url::Url;

use crate::error::{ErrorKind, Result};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5001";
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base: Url,
    pub debounce_delay: Duration,
    pub request_timeout: Option<Duration>,
    /// Use the digits-only register number check instead of the numeric one.
    pub strict_register_number: bool,
    /// Drop responses that were overtaken by a newer request of the same kind.
    pub discard_stale_responses: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            debounce_delay: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            request_timeout: None,
            strict_register_number: false,
            discard_stale_responses: false,
        }
    }
}

impl Config {
    /// Read overrides from `ELIGIBILITY_*` environment variables. Unset or
    /// malformed values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_base = var("ELIGIBILITY_API_BASE")
            .and_then(|raw| {
                parse_api_base(&raw)
                    .map_err(|e| log::warn!("Invalid ELIGIBILITY_API_BASE value: {e}"))
                    .ok()
            })
            .unwrap_or(defaults.api_base);

        let debounce_ms = try_load("ELIGIBILITY_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS);
        let timeout_ms: Option<u64> = var("ELIGIBILITY_REQUEST_TIMEOUT_MS").and_then(|raw| {
            raw.parse()
                .map_err(|e| log::warn!("Invalid ELIGIBILITY_REQUEST_TIMEOUT_MS value: {e}"))
                .ok()
        });

        Self {
            api_base,
            debounce_delay: Duration::from_millis(debounce_ms),
            request_timeout: timeout_ms.map(Duration::from_millis),
            strict_register_number: try_load("ELIGIBILITY_STRICT_REGISTER_NUMBER", false),
            discard_stale_responses: try_load("ELIGIBILITY_DISCARD_STALE", false),
        }
    }

    pub fn with_api_base(mut self, raw: &str) -> Result<Self> {
        self.api_base = parse_api_base(raw)?;
        Ok(self)
    }

    pub fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = delay;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_strict_register_number(mut self, strict: bool) -> Self {
        self.strict_register_number = strict;
        self
    }

    pub fn with_discard_stale_responses(mut self, discard: bool) -> Self {
        self.discard_stale_responses = discard;
        self
    }

    /// Full URL of a backend endpoint such as `get_student_info`.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.api_base.join(path)?)
    }
}

fn default_api_base() -> Url {
    Url::parse(DEFAULT_API_BASE).expect("default api base is a valid URL")
}

/// Accepts absolute http(s) URLs. A trailing slash is added so that
/// endpoint joins keep any path prefix.
pub fn parse_api_base(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let mut url = Url::parse(raw)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ErrorKind::ConfigError(format!(
            "api base must be http or https, got {}",
            url.scheme()
        ))
        .into());
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_load<T: FromStr + Display>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    match var(key) {
        None => {
            log::info!("{key} not set, using default: {default}");
            default
        }
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            log::warn!("Invalid {key} value: {e}, using default: {default}");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.api_base.as_str(), "http://127.0.0.1:5001/");
        assert_eq!(config.debounce_delay, Duration::from_millis(1000));
        assert!(!config.strict_register_number);
        assert!(!config.discard_stale_responses);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn endpoints_join_onto_base() {
        let config = Config::default();
        assert_eq!(
            config.endpoint("get_student_info").unwrap().as_str(),
            "http://127.0.0.1:5001/get_student_info"
        );

        let prefixed = Config::default()
            .with_api_base("https://campus.example/eligibility")
            .unwrap();
        assert_eq!(
            prefixed.endpoint("check_eligibility").unwrap().as_str(),
            "https://campus.example/eligibility/check_eligibility"
        );
    }

    #[test]
    fn rejects_non_http_base() {
        let err = parse_api_base("ftp://127.0.0.1:5001").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ConfigError(_)));

        let err = parse_api_base("127.0.0.1:5001/").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UrlError(_)));
    }

    #[test]
    fn builder_overrides() {
        let config = Config::default()
            .with_debounce_delay(Duration::from_millis(250))
            .with_request_timeout(Duration::from_secs(3))
            .with_strict_register_number(true)
            .with_discard_stale_responses(true);
        assert_eq!(config.debounce_delay, Duration::from_millis(250));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(3)));
        assert!(config.strict_register_number);
        assert!(config.discard_stale_responses);
    }
}
