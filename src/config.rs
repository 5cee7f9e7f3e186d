/// Tuning values for the background service
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Storage key of the optional overrides object
pub const SETTINGS_KEY: &str = "settings";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WatchConfig {
    /// Other same-domain tabs needed before an alert fires
    pub duplicate_threshold: usize,
    pub ignore_minutes: i64,
    pub retention_days: i64,
    pub sweep_interval_minutes: u32,
    pub prune_interval_hours: u32,
}

impl Default for WatchConfig {
    fn default() -> Self {
        WatchConfig {
            duplicate_threshold: 2,
            ignore_minutes: 30,
            retention_days: 365,
            sweep_interval_minutes: 60,
            prune_interval_hours: 24,
        }
    }
}

impl WatchConfig {
    pub fn ignore_duration(&self) -> Duration {
        Duration::minutes(self.ignore_minutes)
    }

    pub fn sweep_interval_ms(&self) -> i32 {
        to_interval_ms(u64::from(self.sweep_interval_minutes) * 60_000)
    }

    pub fn prune_interval_ms(&self) -> i32 {
        to_interval_ms(u64::from(self.prune_interval_hours) * 3_600_000)
    }
}

// setInterval takes a signed 32-bit delay
fn to_interval_ms(ms: u64) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WatchConfig::default();

        assert_eq!(config.duplicate_threshold, 2);
        assert_eq!(config.ignore_duration(), Duration::minutes(30));
        assert_eq!(config.sweep_interval_ms(), 3_600_000);
        assert_eq!(config.prune_interval_ms(), 86_400_000);
    }

    #[test]
    fn test_partial_overrides_keep_defaults() {
        let config: WatchConfig =
            serde_json::from_str(r#"{"duplicateThreshold": 4, "ignoreMinutes": 5}"#).unwrap();

        assert_eq!(config.duplicate_threshold, 4);
        assert_eq!(config.ignore_minutes, 5);
        assert_eq!(config.retention_days, 365);
    }

    #[test]
    fn test_interval_clamps() {
        let config = WatchConfig {
            prune_interval_hours: 10_000,
            ..WatchConfig::default()
        };

        assert_eq!(config.prune_interval_ms(), i32::MAX);
    }
}
