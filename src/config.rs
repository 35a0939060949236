//! Configuration System
//!
//! Page-level settings for the dashboard glue. Defaults match the plant
//! dashboard; a page can override them with an embedded JSON element:
//!
//! ```html
//! <script type="application/json" id="dashboard-config">
//!   { "poll_interval_ms": 10000, "log_level": "debug" }
//! </script>
//! ```
//!
//! `localStorage` keys override both, which is handy while debugging a
//! deployed page.

use serde::Deserialize;
use web_sys::{Document, Window};

/// Id of the element holding the JSON configuration
pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";

/// `localStorage` key overriding the log directive
pub const STORAGE_LOG_LEVEL: &str = "dashboard.log_level";

/// `localStorage` key overriding the polling interval
pub const STORAGE_POLL_INTERVAL: &str = "dashboard.poll_interval_ms";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardConfig {
    /// Path on which the status poller is active
    #[serde(default = "default_status_route")]
    pub status_route: String,

    /// Selector of the fragment swapped on every poll
    #[serde(default = "default_fragment_selector")]
    pub fragment_selector: String,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u32,

    /// How long a toast stays on screen
    #[serde(default = "default_notification_timeout")]
    pub notification_timeout_ms: u32,

    #[serde(default = "default_reveal_threshold")]
    pub reveal_threshold: f64,

    #[serde(default = "default_reveal_root_margin")]
    pub reveal_root_margin: String,

    /// Label shown next to the spinner on a submitted form
    #[serde(default = "default_busy_label")]
    pub busy_label: String,

    /// `tracing` filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_status_route() -> String {
    "/plant_status".to_string()
}

fn default_fragment_selector() -> String {
    ".plants-grid".to_string()
}

fn default_poll_interval() -> u32 {
    30_000 // 30 seconds
}

fn default_notification_timeout() -> u32 {
    5_000 // 5 seconds
}

fn default_reveal_threshold() -> f64 {
    0.1
}

fn default_reveal_root_margin() -> String {
    "0px 0px -50px 0px".to_string()
}

fn default_busy_label() -> String {
    "Processing...".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            status_route: default_status_route(),
            fragment_selector: default_fragment_selector(),
            poll_interval_ms: default_poll_interval(),
            notification_timeout_ms: default_notification_timeout(),
            reveal_threshold: default_reveal_threshold(),
            reveal_root_margin: default_reveal_root_margin(),
            busy_label: default_busy_label(),
            log_level: default_log_level(),
        }
    }
}

impl DashboardConfig {
    /// Parse configuration from a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse {
                source_name: CONFIG_ELEMENT_ID.to_string(),
                error: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the page's config element, if any
    pub fn from_document(document: &Document) -> Result<Self, ConfigError> {
        let text = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty());

        match text {
            Some(json) => Self::from_json(&json),
            None => Ok(Self::default()),
        }
    }

    /// Load from the page's config element, then apply `localStorage`
    /// overrides
    pub fn load(window: &Window) -> Result<Self, ConfigError> {
        let mut config = match window.document() {
            Some(document) => Self::from_document(&document)?,
            None => Self::default(),
        };
        config.apply_storage_overrides(window);
        Ok(config)
    }

    /// Apply overrides stored in `localStorage`, if it is reachable
    pub fn apply_storage_overrides(&mut self, window: &Window) {
        if let Ok(Some(storage)) = window.local_storage() {
            let log_level = storage.get_item(STORAGE_LOG_LEVEL).ok().flatten();
            let poll_interval = storage.get_item(STORAGE_POLL_INTERVAL).ok().flatten();
            self.apply_overrides(log_level.as_deref(), poll_interval.as_deref());
        }
    }

    /// Apply override values; unparsable numbers are ignored
    pub fn apply_overrides(&mut self, log_level: Option<&str>, poll_interval_ms: Option<&str>) {
        if let Some(level) = log_level.filter(|l| !l.trim().is_empty()) {
            self.log_level = level.trim().to_string();
        }
        if let Some(interval) = poll_interval_ms {
            match interval.trim().parse::<u32>() {
                Ok(ms) if ms > 0 => self.poll_interval_ms = ms,
                _ => tracing::warn!("Ignoring invalid poll interval override: {:?}", interval),
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "poll_interval_ms",
                error: "must be greater than zero".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::Invalid {
                field: "reveal_threshold",
                error: format!("{} is outside 0.0..=1.0", self.reveal_threshold),
            });
        }
        if self.fragment_selector.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "fragment_selector",
                error: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config {source_name}: {error}")]
    Parse { source_name: String, error: String },

    #[error("Invalid config value for {field}: {error}")]
    Invalid { field: &'static str, error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.status_route, "/plant_status");
        assert_eq!(config.fragment_selector, ".plants-grid");
        assert_eq!(config.poll_interval_ms, 30_000);
        assert_eq!(config.notification_timeout_ms, 5_000);
        assert_eq!(config.reveal_root_margin, "0px 0px -50px 0px");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            DashboardConfig::from_json(r#"{ "poll_interval_ms": 10000, "log_level": "debug" }"#)
                .unwrap();
        assert_eq!(config.poll_interval_ms, 10_000);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.status_route, "/plant_status");
        assert_eq!(config.busy_label, "Processing...");
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        let err = DashboardConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_validation() {
        let err = DashboardConfig::from_json(r#"{ "poll_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "poll_interval_ms", .. }));

        let err = DashboardConfig::from_json(r#"{ "reveal_threshold": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "reveal_threshold", .. }));
    }

    #[test]
    fn test_overrides() {
        let mut config = DashboardConfig::default();
        config.apply_overrides(Some(" plant_dashboard=debug "), Some("15000"));
        assert_eq!(config.log_level, "plant_dashboard=debug");
        assert_eq!(config.poll_interval_ms, 15_000);

        config.apply_overrides(Some(""), Some("soon"));
        assert_eq!(config.log_level, "plant_dashboard=debug");
        assert_eq!(config.poll_interval_ms, 15_000);

        config.apply_overrides(None, Some("0"));
        assert_eq!(config.poll_interval_ms, 15_000);
    }
}
