//! Application: a titled set of routes with its own OpenAPI document.
//!
//! # Responsibilities
//! - Collect routes and routers
//! - Produce the OpenAPI document of its routes
//! - Assemble an axum `Router` serving the routes and docs endpoints
//!
//! # Design Decisions
//! - Route conflicts are reported as errors instead of axum panics
//! - Routes sharing a path are merged into one `MethodRouter` in declaration order

use std::collections::{HashMap, HashSet};

use axum::http::Method;
use axum::routing::MethodRouter;
use axum::Router;
use serde_json::Value;

use crate::openapi::builder::humanize;
use crate::openapi::{build_spec, openapi_routes, OpenApiConfig, OperationInfo};
use crate::routing::route::ApiRoute;
use crate::routing::router::{ApiRouter, RouteClass};
use crate::versioning::error::VersioningError;

pub const DEFAULT_OPENAPI_URL: &str = "/openapi.json";
pub const DEFAULT_DOCS_URL: &str = "/docs";

/// A titled application holding routes.
pub struct ApiApp<S = ()> {
    title: String,
    description: String,
    version: String,
    openapi_url: Option<String>,
    docs_url: Option<String>,
    root_path: String,
    routes: Vec<ApiRoute<S>>,
    documented: Vec<OperationInfo>,
}

impl<S> ApiApp<S> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            version: "0.1.0".to_string(),
            openapi_url: Some(DEFAULT_OPENAPI_URL.to_string()),
            docs_url: Some(DEFAULT_DOCS_URL.to_string()),
            root_path: String::new(),
            routes: Vec::new(),
            documented: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// `None` disables the spec endpoint, and with it the docs page.
    pub fn with_openapi_url(mut self, url: Option<String>) -> Self {
        self.openapi_url = url;
        self
    }

    pub fn with_docs_url(mut self, url: Option<String>) -> Self {
        self.docs_url = url;
        self
    }

    pub fn route(mut self, route: ApiRoute<S>) -> Self {
        self.routes.push(route);
        self
    }

    pub fn add_route(&mut self, route: ApiRoute<S>) {
        self.routes.push(route);
    }

    /// Copy the routes of `router` into this application.
    pub fn include_router<C: RouteClass>(mut self, router: ApiRouter<S, C>) -> Self {
        self.routes.extend(router.into_routes());
        self
    }

    /// Like [`include_router`](Self::include_router) with an extra path prefix.
    pub fn include_router_at<C: RouteClass>(mut self, prefix: &str, router: ApiRouter<S, C>) -> Self {
        self.routes
            .extend(router.into_routes().into_iter().map(|r| r.prefixed(prefix)));
        self
    }

    /// List an operation in the OpenAPI document without routing it.
    pub fn document_operation(&mut self, operation: OperationInfo) {
        self.documented.push(operation);
    }

    pub(crate) fn mounted_at(mut self, root_path: &str) -> Self {
        self.root_path = root_path.to_string();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn openapi_url(&self) -> Option<&str> {
        self.openapi_url.as_deref()
    }

    pub fn docs_url(&self) -> Option<&str> {
        self.docs_url.as_deref()
    }

    /// Prefix under which this application is mounted; empty at the top level.
    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    pub fn routes(&self) -> &[ApiRoute<S>] {
        &self.routes
    }

    /// Documented operations: routes first, then documentation-only entries.
    pub fn operations(&self) -> Vec<OperationInfo> {
        let mut ops = Vec::new();
        for route in self.routes.iter().filter(|r| r.include_in_schema()) {
            for method in route.methods() {
                ops.push(OperationInfo {
                    path: route.path().to_string(),
                    method: method.to_string(),
                    operation_id: route.operation_id(method),
                    summary: route
                        .summary()
                        .map(str::to_string)
                        .unwrap_or_else(|| humanize(route.name())),
                    description: route.description().map(str::to_string),
                    tags: route.tags().to_vec(),
                    deprecated: route.is_deprecated(),
                });
            }
        }
        ops.extend(self.documented.iter().cloned());
        ops
    }

    pub fn openapi(&self) -> Value {
        let config = OpenApiConfig::new(&self.title, &self.version)
            .with_description(&self.description)
            .with_server_url(&self.root_path);
        build_spec(&config, &self.operations())
    }
}

impl<S> ApiApp<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Assemble the axum router for this application.
    pub fn into_router(self) -> Result<Router<S>, VersioningError> {
        let mut seen: HashSet<(String, Method)> = HashSet::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut paths: Vec<(String, MethodRouter<S>)> = Vec::new();

        for route in &self.routes {
            check_route_path(route.path())?;
            for method in route.methods() {
                if !seen.insert((route.path().to_string(), method.clone())) {
                    return Err(VersioningError::RouteConflict {
                        path: route.path().to_string(),
                        method: method.to_string(),
                    });
                }
                let slot = match index.get(route.path()) {
                    Some(&slot) => slot,
                    None => {
                        paths.push((route.path().to_string(), MethodRouter::new()));
                        index.insert(route.path().to_string(), paths.len() - 1);
                        paths.len() - 1
                    }
                };
                let current = std::mem::replace(&mut paths[slot].1, MethodRouter::new());
                paths[slot].1 = route.endpoint().attach(current, method)?;
            }
        }

        let mut router = Router::new();
        for (path, method_router) in paths {
            router = router.route(&path, method_router);
        }

        if let Some(openapi_url) = self.openapi_url.as_deref() {
            let docs_url = self.docs_url.as_deref();
            for url in std::iter::once(openapi_url).chain(docs_url) {
                check_route_path(url)?;
                if seen.contains(&(url.to_string(), Method::GET)) {
                    return Err(VersioningError::RouteConflict {
                        path: url.to_string(),
                        method: Method::GET.to_string(),
                    });
                }
            }
            let spec = self.openapi();
            let docs_title = format!("{} - {}", self.title, self.version);
            router = router.merge(openapi_routes(
                &spec,
                &docs_title,
                &self.root_path,
                openapi_url,
                docs_url,
            ));
        }

        tracing::debug!(
            title = %self.title,
            version = %self.version,
            root_path = %self.root_path,
            routes = self.routes.len(),
            "Application router assembled"
        );
        Ok(router)
    }
}

fn check_route_path(path: &str) -> Result<(), VersioningError> {
    if !path.starts_with('/') {
        return Err(VersioningError::InvalidPath {
            path: path.to_string(),
            reason: "route paths must start with `/`".to_string(),
        });
    }
    Ok(())
}
