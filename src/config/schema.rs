//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure of the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::versioning::version::ApiVersion;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener and request handling settings.
    pub server: ServerConfig,

    /// How routes are grouped and mounted per version.
    pub versioning: VersioningConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Versioning options.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VersioningConfig {
    /// Template of the version string shown in docs (`{major}`, `{minor}`).
    pub version_format: String,

    /// Template of the mount prefix of each version.
    pub version_prefix: String,

    /// Put the custom prefix before the version prefix (`/admin/v1_0`)
    /// instead of after it (`/v1_0/admin`).
    pub invert_prefix: bool,

    /// Version assigned to routes without a tag.
    pub default_version: ApiVersion,

    /// Also mount the newest routes under `latest_prefix`.
    pub enable_latest: bool,

    /// Mount prefix of the latest alias.
    pub latest_prefix: String,

    /// Settings of the parent application holding the mounts.
    pub parent: ParentAppConfig,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            version_format: "{major}.{minor}".to_string(),
            version_prefix: "/v{major}_{minor}".to_string(),
            invert_prefix: false,
            default_version: ApiVersion::new(1, 0),
            enable_latest: false,
            latest_prefix: "/latest".to_string(),
            parent: ParentAppConfig::default(),
        }
    }
}

/// Parent application settings. Empty URLs disable the endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ParentAppConfig {
    pub description: String,
    pub version: String,
    pub openapi_url: String,
    pub docs_url: String,
}

impl Default for ParentAppConfig {
    fn default() -> Self {
        Self {
            description: String::new(),
            version: "0.1.0".to_string(),
            openapi_url: "/openapi.json".to_string(),
            docs_url: "/docs".to_string(),
        }
    }
}

impl ParentAppConfig {
    pub fn openapi_url(&self) -> Option<String> {
        non_empty(&self.openapi_url)
    }

    pub fn docs_url(&self) -> Option<String> {
        non_empty(&self.docs_url)
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error), overridden by `RUST_LOG`.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.versioning.version_prefix, "/v{major}_{minor}");
        assert_eq!(config.versioning.default_version, ApiVersion::new(1, 0));
        assert!(!config.versioning.enable_latest);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_versioning_table() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [versioning]
            version_prefix = "/api/v{major}"
            default_version = [2, 0]
            enable_latest = true

            [versioning.parent]
            docs_url = ""

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.versioning.version_prefix, "/api/v{major}");
        assert_eq!(config.versioning.version_format, "{major}.{minor}");
        assert_eq!(config.versioning.default_version, ApiVersion::new(2, 0));
        assert!(config.versioning.enable_latest);
        assert_eq!(config.versioning.parent.docs_url(), None);
        assert_eq!(
            config.versioning.parent.openapi_url().as_deref(),
            Some("/openapi.json")
        );
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }
}
