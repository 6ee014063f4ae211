//! Configuration loading from environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use fx_repo::{DEFAULT_BASE_URL, DEFAULT_FALLBACK_PATH, DEFAULT_TTL, ProviderConfig, RetryPolicy};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub provider_url: String,
    pub fallback_path: String,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    pub max_attempts: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = parse_or(&lookup, "PORT", 8000)?;
        let provider_url = lookup("FX_PROVIDER_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let fallback_path =
            lookup("FX_FALLBACK_PATH").unwrap_or_else(|| DEFAULT_FALLBACK_PATH.into());
        let cache_ttl = Duration::from_secs(parse_or(
            &lookup,
            "FX_CACHE_TTL_SECS",
            DEFAULT_TTL.as_secs(),
        )?);
        let request_timeout =
            Duration::from_secs(parse_or(&lookup, "FX_REQUEST_TIMEOUT_SECS", 10)?);
        let max_attempts = parse_or(&lookup, "FX_MAX_ATTEMPTS", 3)?;

        if max_attempts == 0 {
            anyhow::bail!("FX_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Self {
            port,
            provider_url,
            fallback_path,
            cache_ttl,
            request_timeout,
            max_attempts,
        })
    }

    pub fn provider(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.provider_url.clone(),
            timeout: self.request_timeout,
            retry: RetryPolicy::new(self.max_attempts, RetryPolicy::default().base_delay),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got {:?}", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.provider_url, "https://api.frankfurter.dev/v1");
        assert_eq!(config.fallback_path, "data/sample_fx.json");
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.max_attempts, 3);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "9100"),
            ("FX_PROVIDER_URL", "http://localhost:9999/v1"),
            ("FX_FALLBACK_PATH", "/tmp/rates.json"),
            ("FX_CACHE_TTL_SECS", "60"),
            ("FX_REQUEST_TIMEOUT_SECS", "2"),
            ("FX_MAX_ATTEMPTS", "5"),
        ])
        .unwrap();

        assert_eq!(config.port, 9100);
        assert_eq!(config.provider_url, "http://localhost:9999/v1");
        assert_eq!(config.fallback_path, "/tmp/rates.json");
        assert_eq!(config.cache_ttl, Duration::from_secs(60));

        let provider = config.provider();
        assert_eq!(provider.timeout, Duration::from_secs(2));
        assert_eq!(provider.retry.max_attempts, 5);
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let err = load(&[("FX_CACHE_TTL_SECS", "five minutes")]).unwrap_err();
        assert!(err.to_string().contains("FX_CACHE_TTL_SECS"));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        assert!(load(&[("FX_MAX_ATTEMPTS", "0")]).is_err());
    }
}
