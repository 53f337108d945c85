//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! navigation service. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

use crate::routing::{MatchMode, RouteSpec};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NavConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Navigable menus (navbar, dashboards).
    pub menus: Vec<MenuConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// One navigable menu and its route tree.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MenuConfig {
    /// Menu name used in lookups ("navbar", "chef-dashboard").
    pub name: String,

    /// Exact (default) or prefix highlighting.
    #[serde(default)]
    pub match_mode: MatchMode,

    /// Route highlighted when nothing else is. Unset means none.
    #[serde(default)]
    pub fallback: Option<String>,

    /// Route declarations in display order.
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
}

impl MenuConfig {
    pub fn new(name: impl Into<String>, routes: Vec<RouteSpec>) -> Self {
        Self {
            name: name.into(),
            match_mode: MatchMode::default(),
            fallback: None,
            routes,
        }
    }
}
