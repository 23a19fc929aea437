//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check version templates render (known placeholders, balanced braces)
//! - Check prefixes and URLs are absolute paths
//! - Check the bind addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::versioning::format::validate_template;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "server.bind_address",
            format!("`{}` is not a socket address", config.server.bind_address),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "server.request_timeout_secs",
            "must be greater than zero",
        ));
    }

    let versioning = &config.versioning;
    if let Err(e) = validate_template(&versioning.version_format) {
        errors.push(ValidationError::new("versioning.version_format", e.to_string()));
    }
    if let Err(e) = validate_template(&versioning.version_prefix) {
        errors.push(ValidationError::new("versioning.version_prefix", e.to_string()));
    }
    if !versioning.version_prefix.starts_with('/') {
        errors.push(ValidationError::new(
            "versioning.version_prefix",
            "must start with `/`",
        ));
    }
    if versioning.enable_latest && !is_mount_path(&versioning.latest_prefix) {
        errors.push(ValidationError::new(
            "versioning.latest_prefix",
            "must start with `/` and not be the root",
        ));
    }

    for (field, url) in [
        ("versioning.parent.openapi_url", &versioning.parent.openapi_url),
        ("versioning.parent.docs_url", &versioning.parent.docs_url),
    ] {
        if !url.is_empty() && !url.starts_with('/') {
            errors.push(ValidationError::new(field, "must be empty or start with `/`"));
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("`{}` is not a socket address", observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_mount_path(path: &str) -> bool {
    path.starts_with('/') && path.len() > 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServiceConfig::default();
        config.server.bind_address = "nowhere".into();
        config.versioning.version_format = "{major}.{patch}".into();
        config.versioning.version_prefix = "v{major}".into();
        config.versioning.parent.docs_url = "docs".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "server.bind_address",
                "versioning.version_format",
                "versioning.version_prefix",
                "versioning.parent.docs_url",
            ]
        );
        assert!(errors[1].message.contains("patch"));
    }

    #[test]
    fn test_latest_prefix_checked_only_when_enabled() {
        let mut config = ServiceConfig::default();
        config.versioning.latest_prefix = "/".into();
        assert!(validate_config(&config).is_ok());

        config.versioning.enable_latest = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "versioning.latest_prefix");
    }
}
