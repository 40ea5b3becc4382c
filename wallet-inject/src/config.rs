//! Detector configuration.
//!
//! Event names and keys default to the conventions injected NEAR wallets
//! follow today; they are configurable so that a host embedding a different
//! wallet ecosystem can reuse the detector unchanged.

use std::time::Duration;

use serde::Deserialize;

/// Event wallets broadcast to announce themselves.
pub const DEFAULT_ANNOUNCE_EVENT: &str = "near-wallet-injected";

/// Legacy ready broadcasts, dispatched before listening for announcements.
pub const DEFAULT_READY_EVENTS: [&str; 3] = [
    "near-selector-ready",
    "near-wallet-selector-ready",
    "near:wallet-selector:ready",
];

/// Global key of the shared array of providers.
pub const DEFAULT_AGGREGATED_LIST_KEY: &str = "nearWallets";

/// Backoff schedule between scan passes, in milliseconds.
pub const DEFAULT_RETRY_DELAYS_MS: [u64; 4] = [100, 250, 500, 1000];

/// Overall detection budget, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Configuration for a [`Detector`](crate::Detector).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectorConfig {
    /// Overall time budget of one `detect` call.
    #[serde(with = "millis")]
    pub timeout: Duration,
    /// Delays between scan passes, walked in order.
    #[serde(with = "millis_list")]
    pub retry_delays: Vec<Duration>,
    /// Event wallets announce themselves on.
    pub announce_event: String,
    /// Ready broadcasts dispatched on every `detect`, once the listener is attached.
    pub ready_events: Vec<String>,
    /// Global key of the aggregated provider array.
    pub aggregated_list_key: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            retry_delays: DEFAULT_RETRY_DELAYS_MS
                .iter()
                .copied()
                .map(Duration::from_millis)
                .collect(),
            announce_event: DEFAULT_ANNOUNCE_EVENT.to_string(),
            ready_events: DEFAULT_READY_EVENTS.iter().map(ToString::to_string).collect(),
            aggregated_list_key: DEFAULT_AGGREGATED_LIST_KEY.to_string(),
        }
    }
}

impl DetectorConfig {
    /// Set the overall detection budget.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the backoff schedule.
    #[must_use]
    pub fn with_retry_delays(mut self, delays: impl IntoIterator<Item = Duration>) -> Self {
        self.retry_delays = delays.into_iter().collect();
        self
    }

    /// Set the announcement event name.
    #[must_use]
    pub fn with_announce_event(mut self, event: impl Into<String>) -> Self {
        self.announce_event = event.into();
        self
    }

    /// Set the aggregated provider array key.
    #[must_use]
    pub fn with_aggregated_list_key(mut self, key: impl Into<String>) -> Self {
        self.aggregated_list_key = key.into();
        self
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

mod millis_list {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Duration>, D::Error> {
        Vec::<u64>::deserialize(d).map(|v| v.into_iter().map(Duration::from_millis).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(
            config.retry_delays,
            vec![
                Duration::from_millis(100),
                Duration::from_millis(250),
                Duration::from_millis(500),
                Duration::from_millis(1000),
            ]
        );
        assert_eq!(config.ready_events.len(), 3);
        assert_eq!(config.announce_event, "near-wallet-injected");
    }

    #[test]
    fn test_deserialize_partial_overrides() {
        let config: DetectorConfig = serde_json::from_str(
            r#"{"timeout": 500, "retryDelays": [10, 20], "announceEvent": "x"}"#,
        )
        .unwrap();
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.retry_delays.len(), 2);
        assert_eq!(config.announce_event, "x");
        assert_eq!(config.aggregated_list_key, DEFAULT_AGGREGATED_LIST_KEY);
    }

    #[test]
    fn test_builder_methods() {
        let config = DetectorConfig::default()
            .with_timeout(Duration::from_millis(50))
            .with_retry_delays([Duration::from_millis(5)])
            .with_announce_event("custom")
            .with_aggregated_list_key("wallets");
        assert_eq!(config.timeout.as_millis(), 50);
        assert_eq!(config.retry_delays, vec![Duration::from_millis(5)]);
        assert_eq!(config.announce_event, "custom");
        assert_eq!(config.aggregated_list_key, "wallets");
    }
}
