//! Configuration handling for the TUI

use crate::state::{NotificationCenter, DEFAULT_MIN_PHONE_DIGITS};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// User configuration for the kiosk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KioskConfig {
    /// Venue name shown on the welcome banner
    pub venue_name: Option<String>,
    /// Enquiry endpoint URL; submissions are simulated when unset
    pub endpoint: Option<String>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// How long toasts stay on screen, in seconds
    pub notification_timeout_secs: Option<u64>,
    /// Minimum digits a phone number must contain
    pub min_phone_digits: Option<usize>,
    /// Delivery delay of the simulated transport, in milliseconds
    pub simulated_latency_ms: Option<u64>,
    /// Force the simulated transport to fail, for demoing the error path
    pub simulated_failure: Option<bool>,
}

impl KioskConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "foyer", "foyer-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: KioskConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Venue name, defaulting to the product name
    pub fn venue_name(&self) -> &str {
        self.venue_name.as_deref().unwrap_or("Foyer")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(10))
    }

    pub fn notification_timeout(&self) -> Duration {
        self.notification_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(NotificationCenter::DEFAULT_VISIBLE_FOR)
    }

    pub fn min_phone_digits(&self) -> usize {
        self.min_phone_digits.unwrap_or(DEFAULT_MIN_PHONE_DIGITS)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms.unwrap_or(1200))
    }

    pub fn simulated_failure(&self) -> bool {
        self.simulated_failure.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KioskConfig::default();
        assert!(config.venue_name.is_none());
        assert!(config.endpoint.is_none());
        assert!(config.request_timeout_secs.is_none());
        assert!(config.notification_timeout_secs.is_none());
        assert!(config.min_phone_digits.is_none());
        assert!(config.simulated_latency_ms.is_none());
        assert!(config.simulated_failure.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = KioskConfig {
            venue_name: Some("Northside Studio".to_string()),
            endpoint: Some("https://example.com/enquiries".to_string()),
            request_timeout_secs: Some(5),
            notification_timeout_secs: Some(8),
            min_phone_digits: Some(9),
            simulated_latency_ms: Some(300),
            simulated_failure: Some(true),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: KioskConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.venue_name, Some("Northside Studio".to_string()));
        assert_eq!(
            parsed.endpoint,
            Some("https://example.com/enquiries".to_string())
        );
        assert_eq!(parsed.request_timeout_secs, Some(5));
        assert_eq!(parsed.notification_timeout_secs, Some(8));
        assert_eq!(parsed.min_phone_digits, Some(9));
        assert_eq!(parsed.simulated_latency_ms, Some(300));
        assert_eq!(parsed.simulated_failure, Some(true));
    }

    #[test]
    fn test_partial_serialization() {
        let config = KioskConfig {
            venue_name: Some("Northside Studio".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: KioskConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.venue_name, Some("Northside Studio".to_string()));
        assert!(parsed.endpoint.is_none());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let json = "{}";
        let parsed: KioskConfig = serde_json::from_str(json).unwrap();
        assert!(parsed.endpoint.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"venue_name": "Northside Studio", "unknown_field": "value"}"#;
        let parsed: KioskConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.venue_name, Some("Northside Studio".to_string()));
    }

    #[test]
    fn test_accessor_defaults() {
        let config = KioskConfig::default();
        assert_eq!(config.venue_name(), "Foyer");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.notification_timeout(), Duration::from_secs(5));
        assert_eq!(config.min_phone_digits(), DEFAULT_MIN_PHONE_DIGITS);
        assert_eq!(config.simulated_latency(), Duration::from_millis(1200));
        assert!(!config.simulated_failure());
    }

    #[test]
    fn test_accessor_overrides() {
        let config = KioskConfig {
            venue_name: Some("Northside Studio".to_string()),
            request_timeout_secs: Some(3),
            notification_timeout_secs: Some(2),
            min_phone_digits: Some(10),
            simulated_latency_ms: Some(50),
            simulated_failure: Some(true),
            ..Default::default()
        };

        assert_eq!(config.venue_name(), "Northside Studio");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.notification_timeout(), Duration::from_secs(2));
        assert_eq!(config.min_phone_digits(), 10);
        assert_eq!(config.simulated_latency(), Duration::from_millis(50));
        assert!(config.simulated_failure());
    }

    #[test]
    fn test_config_path_returns_option() {
        // Just test that the function doesn't panic
        let _path = KioskConfig::config_path();
    }

    #[test]
    fn test_load_returns_default_when_no_file() {
        let result = KioskConfig::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_debug() {
        let config = KioskConfig::default();
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("KioskConfig"));
    }
}
