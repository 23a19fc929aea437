//! Errors raised while building a versioned application.

use thiserror::Error;

/// Errors that can occur while formatting prefixes or assembling routers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersioningError {
    /// A version template references a placeholder other than `major`/`minor`.
    #[error("unknown placeholder `{{{placeholder}}}` in version template `{template}`")]
    UnknownPlaceholder {
        placeholder: String,
        template: String,
    },

    /// A version template has unbalanced braces or an unsupported format spec.
    #[error("malformed version template `{template}`: {reason}")]
    MalformedTemplate { template: String, reason: String },

    /// Two version groups resolved to the same mount prefix.
    #[error("more than one version group mounted at `{prefix}`")]
    DuplicateMount { prefix: String },

    /// The same path and method were registered twice in one application.
    #[error("route {method} {path} registered more than once")]
    RouteConflict { path: String, method: String },

    /// Route or mount path that axum cannot accept.
    #[error("invalid path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    /// HTTP method with no axum method filter (custom extension methods).
    #[error("unsupported HTTP method `{method}`")]
    UnsupportedMethod { method: String },
}
