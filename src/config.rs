//! Server configuration from the environment

use crate::agents::Demo;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_RUNTIME_URL: &str = "http://127.0.0.1:8700";
const DEFAULT_RUNTIME_TIMEOUT: Duration = Duration::from_secs(300);

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Base URL of the agent orchestration runtime
    pub runtime_url: String,
    /// Longest the runtime feed may stay silent before the run is failed.
    /// Runs that keep streaming are not capped.
    pub runtime_timeout: Duration,
    pub demo: Demo,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            runtime_url: DEFAULT_RUNTIME_URL.to_string(),
            runtime_timeout: DEFAULT_RUNTIME_TIMEOUT,
            demo: Demo::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparseable values fall back
    /// to the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = parse_or(&lookup, "CAMPUS_PORT", defaults.port);
        let runtime_timeout = parse_or(
            &lookup,
            "AGENT_RUNTIME_TIMEOUT_SECS",
            defaults.runtime_timeout.as_secs(),
        );
        let demo = parse_or(&lookup, "CAMPUS_DEMO", defaults.demo);
        let runtime_url = lookup("AGENT_RUNTIME_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.runtime_url);

        Self {
            port,
            runtime_url,
            runtime_timeout: Duration::from_secs(runtime_timeout),
            demo,
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring invalid configuration value");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config_from(&[]), AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CAMPUS_PORT", "9001"),
            ("AGENT_RUNTIME_URL", "http://agents.internal:8080"),
            ("AGENT_RUNTIME_TIMEOUT_SECS", "30"),
            ("CAMPUS_DEMO", "weather"),
        ]);
        assert_eq!(config.port, 9001);
        assert_eq!(config.runtime_url, "http://agents.internal:8080");
        assert_eq!(config.runtime_timeout, Duration::from_secs(30));
        assert_eq!(config.demo, Demo::Weather);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("CAMPUS_PORT", "not-a-port"),
            ("CAMPUS_DEMO", "library"),
            ("AGENT_RUNTIME_URL", "  "),
        ]);
        assert_eq!(config, AppConfig::default());
    }
}
