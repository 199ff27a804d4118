//! # Dashboard configuration
//!
//! Client-facing settings served by the backend and read by the UI. On the
//! server this struct is the `[dashboard]` section of `relboard.toml`:
//!
//! ```toml
//! [dashboard.selection]
//! max_selection = 50      # omit for no cap
//!
//! [dashboard.notifications]
//! timeout_secs = 5        # 0 keeps notifications until dismissed
//!
//! [dashboard.overview]
//! recent_releases = 5
//! ```
//!
//! Every section has a default, so a missing or empty file is the default
//! configuration.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub overview: OverviewConfig,
}

/// Bulk-selection settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Maximum rows selectable at once. `None` means unlimited.
    #[serde(default)]
    pub max_selection: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Seconds before a notification disappears. 0 disables auto-dismiss.
    #[serde(default = "default_notification_timeout")]
    pub timeout_secs: u32,
}

fn default_notification_timeout() -> u32 {
    5
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_notification_timeout(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverviewConfig {
    /// Number of releases listed on the dashboard.
    #[serde(default = "default_recent_releases")]
    pub recent_releases: usize,
}

fn default_recent_releases() -> usize {
    5
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            recent_releases: default_recent_releases(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = toml::from_str::<DashboardConfig>("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.selection.max_selection, None);
        assert_eq!(config.notifications.timeout_secs, 5);
        assert_eq!(config.overview.recent_releases, 5);
    }

    #[test]
    fn test_partial_file() {
        let config = toml::from_str::<DashboardConfig>(
            r#"
            [selection]
            max_selection = 25
            "#,
        )
        .unwrap();
        assert_eq!(config.selection.max_selection, Some(25));
        assert_eq!(config.notifications.timeout_secs, 5);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = DashboardConfig::default();
        config.selection.max_selection = Some(10);
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(toml::from_str::<DashboardConfig>(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_wrong_types() {
        assert!(toml::from_str::<DashboardConfig>("[selection]\nmax_selection = \"lots\"").is_err());
    }
}
