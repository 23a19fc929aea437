//! Version identifiers and the tag attached to routes.
//!
//! # Responsibilities
//! - Represent an API version as a `(major, minor)` pair
//! - Carry the optional custom prefix alongside the version
//! - Stamp both onto a route (`version(2, 1).prefix("/admin").apply(route)`)
//!
//! # Design Decisions
//! - Ordering is lexicographic on `(major, minor)`, which is also the mount order
//! - A route without a tag is resolved to the configured default at grouping time
//! - Applying a tag twice keeps the last one

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::routing::ApiRoute;

/// An API version, ordered by `(major, minor)`.
///
/// Serialized as a two-element array so config files can write
/// `default_version = [1, 0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl ApiVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl From<(u32, u32)> for ApiVersion {
    fn from((major, minor): (u32, u32)) -> Self {
        Self::new(major, minor)
    }
}

impl From<ApiVersion> for (u32, u32) {
    fn from(v: ApiVersion) -> Self {
        (v.major, v.minor)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Version metadata carried by a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionTag {
    pub version: ApiVersion,
    /// Secondary grouping prefix, e.g. `"/admin"`. Empty when unused.
    pub prefix: String,
}

impl VersionTag {
    pub fn new(version: ApiVersion) -> Self {
        Self {
            version,
            prefix: String::new(),
        }
    }

    /// Set the custom prefix used to group routes sharing a version.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Stamp this tag onto a route, replacing any previous tag.
    pub fn apply<S>(self, route: ApiRoute<S>) -> ApiRoute<S> {
        route.with_version(self)
    }
}

/// Tag a route with `major.minor`.
///
/// ```ignore
/// let route = version(2, 1).apply(ApiRoute::get("/items", list_items));
/// ```
pub fn version(major: u32, minor: u32) -> VersionTag {
    VersionTag::new(ApiVersion::new(major, minor))
}

/// Tag a route with `major.0`.
pub fn version_major(major: u32) -> VersionTag {
    version(major, 0)
}
