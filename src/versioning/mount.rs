//! Grouping routes by version and mounting one application per group.
//!
//! # Responsibilities
//! - Resolve each route's `(version, custom prefix)`, defaulting untagged routes
//! - Bucket routes and walk the buckets in ascending order
//! - Carry routes forward: a version serves every earlier route it does not
//!   redeclare (same path and method)
//! - Mount each bucket under its formatted prefix, plus the optional latest alias
//! - List per-version docs links in the parent's OpenAPI document
//!
//! # Design Decisions
//! - Built once at startup; the resulting router is immutable
//! - The carry-forward table keeps first-insertion order and replaces values
//!   in place, so route order is stable across versions
//! - Mount and route conflicts surface as `VersioningError` before axum sees them

use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

use axum::http::Method;
use axum::Router;

use crate::config::schema::VersioningConfig;
use crate::observability::metrics;
use crate::openapi::OperationInfo;
use crate::routing::{ApiApp, ApiRoute};
use crate::versioning::error::VersioningError;
use crate::versioning::format::format_version;
use crate::versioning::version::ApiVersion;

/// One mounted version group.
pub struct MountedVersion<S = ()> {
    prefix: String,
    semver: String,
    version: ApiVersion,
    custom_prefix: String,
    latest: bool,
    app: ApiApp<S>,
}

impl<S> MountedVersion<S> {
    /// Mount prefix, e.g. `/v2_0` or `/v2_0/admin`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Version string shown in the docs, e.g. `2.0` or `/admin2.0`.
    pub fn semver(&self) -> &str {
        &self.semver
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn custom_prefix(&self) -> &str {
        &self.custom_prefix
    }

    pub fn is_latest(&self) -> bool {
        self.latest
    }

    pub fn app(&self) -> &ApiApp<S> {
        &self.app
    }

    /// `(path, method)` pairs served by this group, relative to its prefix.
    pub fn endpoints(&self) -> Vec<(String, Method)> {
        self.app
            .routes()
            .iter()
            .flat_map(|r| r.methods().iter().map(|m| (r.path().to_string(), m.clone())))
            .collect()
    }
}

/// Parent application with its version mounts.
pub struct VersionedApi<S = ()> {
    parent: ApiApp<S>,
    mounts: Vec<MountedVersion<S>>,
}

impl<S> VersionedApi<S> {
    pub fn parent(&self) -> &ApiApp<S> {
        &self.parent
    }

    /// Mounts in ascending version order; the latest alias, if any, comes last.
    pub fn mounts(&self) -> &[MountedVersion<S>] {
        &self.mounts
    }

    pub fn mount(&self, prefix: &str) -> Option<&MountedVersion<S>> {
        self.mounts.iter().find(|m| m.prefix == prefix)
    }
}

impl<S> VersionedApi<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Assemble the parent router with every version nested under its prefix.
    pub fn into_router(self) -> Result<Router<S>, VersioningError> {
        let mut prefixes = HashSet::new();
        for mount in &self.mounts {
            if mount.prefix.is_empty() || mount.prefix == "/" || !mount.prefix.starts_with('/') {
                return Err(VersioningError::InvalidPath {
                    path: mount.prefix.clone(),
                    reason: "mount prefixes must start with `/` and not be the root".to_string(),
                });
            }
            if !prefixes.insert(mount.prefix.clone()) {
                return Err(VersioningError::DuplicateMount {
                    prefix: mount.prefix.clone(),
                });
            }
        }

        let mut served = HashSet::new();
        for mount in &self.mounts {
            let docs = [
                mount.app.openapi_url(),
                mount.app.openapi_url().and(mount.app.docs_url()),
            ];
            let docs = docs.into_iter().flatten().map(|url| (url.to_string(), Method::GET));
            for (path, method) in mount.endpoints().into_iter().chain(docs) {
                let full = if path == "/" {
                    mount.prefix.clone()
                } else {
                    format!("{}{path}", mount.prefix)
                };
                if !served.insert((full.clone(), method.clone())) {
                    return Err(VersioningError::RouteConflict {
                        path: full,
                        method: method.to_string(),
                    });
                }
            }
        }

        let mut router = self.parent.into_router()?;
        metrics::record_mounted_versions(self.mounts.len());

        for mount in self.mounts {
            let endpoints = mount.endpoints().len();
            tracing::info!(
                prefix = %mount.prefix,
                version = %mount.semver,
                endpoints,
                latest = mount.latest,
                "Mounting version"
            );
            metrics::record_mount(&mount.prefix, endpoints);
            router = router.nest(&mount.prefix, mount.app.into_router()?);
        }

        Ok(router)
    }
}

/// Insertion-ordered map; re-inserting a key replaces the value in place.
struct OrderedRoutes<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K: Clone + Eq + Hash, V> OrderedRoutes<K, V> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn insert(&mut self, key: K, value: V) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    fn iter(&self) -> impl Iterator<Item = &(K, V)> {
        self.entries.iter()
    }
}

/// `path|METHOD`
type EndpointKey = (String, Method);

/// Build the parent application mounting one sub-application per version.
///
/// Routes are grouped by `(major, minor, custom_prefix)`. Each group is mounted
/// under `version_prefix` formatted for its version, with the custom prefix
/// appended (or prepended with `invert_prefix`). Untagged routes belong to
/// `default_version`.
pub fn versioned_app<S>(
    app: ApiApp<S>,
    config: &VersioningConfig,
) -> Result<VersionedApi<S>, VersioningError> {
    let mut parent = ApiApp::new(app.title())
        .with_description(config.parent.description.clone())
        .with_version(config.parent.version.clone())
        .with_openapi_url(config.parent.openapi_url())
        .with_docs_url(config.parent.docs_url());

    let mut buckets: BTreeMap<(ApiVersion, String), Vec<&ApiRoute<S>>> = BTreeMap::new();
    for route in app.routes() {
        let (version, custom_prefix) = match route.version_tag() {
            Some(tag) => (tag.version, tag.prefix.clone()),
            None => (config.default_version, String::new()),
        };
        buckets.entry((version, custom_prefix)).or_default().push(route);
    }

    tracing::debug!(
        title = %app.title(),
        routes = app.routes().len(),
        groups = buckets.len(),
        "Grouped routes by version"
    );

    let mut unique: OrderedRoutes<EndpointKey, ApiRoute<S>> = OrderedRoutes::new();
    let mut unique_by_mount: OrderedRoutes<(String, EndpointKey), ApiRoute<S>> =
        OrderedRoutes::new();
    let mut mounts = Vec::with_capacity(buckets.len() + 1);

    for ((version, custom_prefix), routes) in &buckets {
        let version_prefix = format_version(&config.version_prefix, *version)?;
        let prefix = if config.invert_prefix {
            format!("{custom_prefix}{version_prefix}")
        } else {
            format!("{version_prefix}{custom_prefix}")
        };
        let semver = format!(
            "{custom_prefix}{}",
            format_version(&config.version_format, *version)?
        );

        let mut versioned = ApiApp::new(app.title())
            .with_description(app.description())
            .with_version(semver.clone())
            .mounted_at(&prefix);

        if config.invert_prefix {
            for route in routes {
                for method in route.methods() {
                    let key = (route.path().to_string(), method.clone());
                    unique_by_mount.insert((prefix.clone(), key), route.for_method(method));
                }
            }
            let matching = unique_by_mount
                .iter()
                .filter(|((mount, _), _)| mount.starts_with(custom_prefix.as_str()))
                .map(|((_, key), route)| (key.clone(), route.clone()));
            for route in newest_per_endpoint(matching) {
                versioned.add_route(route);
            }
        } else {
            for route in routes {
                for method in route.methods() {
                    let key = (route.path().to_string(), method.clone());
                    unique.insert(key, route.for_method(method));
                }
            }
            for (_, route) in unique.iter() {
                versioned.add_route(route.clone());
            }
        }

        tracing::debug!(
            prefix = %prefix,
            version = %semver,
            declared = routes.len(),
            served = versioned.routes().len(),
            "Built version group"
        );

        parent.document_operation(OperationInfo::alias(
            format!("{prefix}/docs"),
            &semver,
            "Documentations",
        ));
        parent.document_operation(OperationInfo::alias(
            format!("{prefix}/openapi.json"),
            &semver,
            "Versions",
        ));

        mounts.push(MountedVersion {
            prefix,
            semver,
            version: *version,
            custom_prefix: custom_prefix.clone(),
            latest: false,
            app: versioned,
        });
    }

    if config.enable_latest {
        match buckets.keys().next_back() {
            Some((version, _)) => {
                let semver = format_version(&config.version_format, *version)?;
                let prefix = config.latest_prefix.clone();
                let mut latest = ApiApp::new(app.title())
                    .with_description(app.description())
                    .with_version(semver.clone())
                    .mounted_at(&prefix);

                let carried: Vec<ApiRoute<S>> = if config.invert_prefix {
                    newest_per_endpoint(
                        unique_by_mount
                            .iter()
                            .map(|((_, key), route)| (key.clone(), route.clone())),
                    )
                } else {
                    unique.iter().map(|(_, route)| route.clone()).collect()
                };
                for route in carried {
                    latest.add_route(route);
                }

                mounts.push(MountedVersion {
                    prefix,
                    semver,
                    version: *version,
                    custom_prefix: String::new(),
                    latest: true,
                    app: latest,
                });
            }
            None => tracing::warn!("Latest alias requested but the application has no routes"),
        }
    }

    Ok(VersionedApi { parent, mounts })
}

/// Collapse entries sharing an endpoint, keeping the one seen last at the
/// position of the first.
fn newest_per_endpoint<S>(
    entries: impl Iterator<Item = (EndpointKey, ApiRoute<S>)>,
) -> Vec<ApiRoute<S>> {
    let mut collapsed = OrderedRoutes::new();
    for (key, route) in entries {
        collapsed.insert(key, route);
    }
    collapsed.entries.into_iter().map(|(_, route)| route).collect()
}
