//! Route declarations carrying version metadata.
//!
//! # Responsibilities
//! - Hold a handler together with its path, methods and documentation fields
//! - Carry the optional `VersionTag` read during grouping
//! - Register the handler on an axum `MethodRouter`, one method at a time
//!
//! # Design Decisions
//! - Handlers are type-erased behind a cloneable registration closure so a
//!   multi-method route can be split per method during deduplication
//! - Metadata travels with the route by value; nothing is attached to the
//!   handler function itself

use std::fmt;
use std::sync::Arc;

use axum::handler::Handler;
use axum::http::Method;
use axum::routing::{MethodFilter, MethodRouter};

use crate::versioning::error::VersioningError;
use crate::versioning::version::VersionTag;

type Register<S> = dyn Fn(MethodRouter<S>, MethodFilter) -> MethodRouter<S> + Send + Sync;

/// A type-erased handler that can be attached to any method filter.
pub struct Endpoint<S = ()> {
    register: Arc<Register<S>>,
}

impl<S> Clone for Endpoint<S> {
    fn clone(&self) -> Self {
        Self {
            register: Arc::clone(&self.register),
        }
    }
}

impl<S> Endpoint<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new<H, T>(handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        Self {
            register: Arc::new(move |router: MethodRouter<S>, filter: MethodFilter| {
                router.on(filter, handler.clone())
            }),
        }
    }

    /// Add this handler to `router` for `method`.
    pub(crate) fn attach(
        &self,
        router: MethodRouter<S>,
        method: &Method,
    ) -> Result<MethodRouter<S>, VersioningError> {
        let filter = MethodFilter::try_from(method.clone()).map_err(|_| {
            VersioningError::UnsupportedMethod {
                method: method.to_string(),
            }
        })?;
        Ok((self.register)(router, filter))
    }
}

/// A route declared on an [`ApiApp`](crate::routing::ApiApp).
pub struct ApiRoute<S = ()> {
    path: String,
    methods: Vec<Method>,
    endpoint: Endpoint<S>,
    version: Option<VersionTag>,
    name: String,
    summary: Option<String>,
    description: Option<String>,
    tags: Vec<String>,
    deprecated: bool,
    include_in_schema: bool,
}

impl<S> Clone for ApiRoute<S> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            methods: self.methods.clone(),
            endpoint: self.endpoint.clone(),
            version: self.version.clone(),
            name: self.name.clone(),
            summary: self.summary.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            deprecated: self.deprecated,
            include_in_schema: self.include_in_schema,
        }
    }
}

impl<S> fmt::Debug for ApiRoute<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRoute")
            .field("path", &self.path)
            .field("methods", &self.methods)
            .field("name", &self.name)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl<S> ApiRoute<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Declare a route answering `methods` on `path`.
    ///
    /// The route name defaults to the handler's function name.
    pub fn new<H, T>(
        path: impl Into<String>,
        methods: impl IntoIterator<Item = Method>,
        handler: H,
    ) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let mut unique: Vec<Method> = Vec::new();
        for method in methods {
            if !unique.contains(&method) {
                unique.push(method);
            }
        }

        Self {
            path: path.into(),
            methods: unique,
            endpoint: Endpoint::new(handler),
            version: None,
            name: handler_name::<H>(),
            summary: None,
            description: None,
            tags: Vec::new(),
            deprecated: false,
            include_in_schema: true,
        }
    }

    pub fn get<H: Handler<T, S>, T: 'static>(path: impl Into<String>, handler: H) -> Self {
        Self::new(path, [Method::GET], handler)
    }

    pub fn post<H: Handler<T, S>, T: 'static>(path: impl Into<String>, handler: H) -> Self {
        Self::new(path, [Method::POST], handler)
    }

    pub fn put<H: Handler<T, S>, T: 'static>(path: impl Into<String>, handler: H) -> Self {
        Self::new(path, [Method::PUT], handler)
    }

    pub fn patch<H: Handler<T, S>, T: 'static>(path: impl Into<String>, handler: H) -> Self {
        Self::new(path, [Method::PATCH], handler)
    }

    pub fn delete<H: Handler<T, S>, T: 'static>(path: impl Into<String>, handler: H) -> Self {
        Self::new(path, [Method::DELETE], handler)
    }
}

impl<S> ApiRoute<S> {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn endpoint(&self) -> &Endpoint<S> {
        &self.endpoint
    }

    /// Version metadata, if the route was tagged.
    pub fn version_tag(&self) -> Option<&VersionTag> {
        self.version.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    pub fn include_in_schema(&self) -> bool {
        self.include_in_schema
    }

    /// Replace the version metadata.
    pub fn with_version(mut self, tag: VersionTag) -> Self {
        self.version = Some(tag);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an OpenAPI tag (grouping in the docs UI, unrelated to versions).
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Keep the route out of generated OpenAPI documents.
    pub fn hidden(mut self) -> Self {
        self.include_in_schema = false;
        self
    }

    /// Prepend `prefix` to the route path.
    pub(crate) fn prefixed(mut self, prefix: &str) -> Self {
        if !prefix.is_empty() {
            self.path = format!("{prefix}{}", self.path);
        }
        self
    }

    /// Copy of this route restricted to a single method.
    pub(crate) fn for_method(&self, method: &Method) -> Self {
        let mut route = self.clone();
        route.methods = vec![method.clone()];
        route
    }

    /// Operation id in the `{name}{path}_{method}` form, non-word characters
    /// replaced by `_`.
    pub fn operation_id(&self, method: &Method) -> String {
        unique_operation_id(&self.name, &self.path, method)
    }
}

pub(crate) fn unique_operation_id(name: &str, path: &str, method: &Method) -> String {
    let raw: String = format!("{name}{path}")
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("{raw}_{}", method.as_str().to_lowercase())
}

fn handler_name<H>() -> String {
    let full = std::any::type_name::<H>();
    if full.contains("{{closure}}") {
        return "endpoint".to_string();
    }
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn read_items() -> &'static str {
        "items"
    }

    #[test]
    fn test_name_from_handler() {
        let route: ApiRoute = ApiRoute::get("/items", read_items);
        assert_eq!(route.name(), "read_items");

        let route: ApiRoute = ApiRoute::get("/anon", || async { "anon" });
        assert_eq!(route.name(), "endpoint");
    }

    #[test]
    fn test_methods_deduplicated() {
        let route: ApiRoute =
            ApiRoute::new("/items", [Method::GET, Method::POST, Method::GET], read_items);
        assert_eq!(route.methods(), &[Method::GET, Method::POST]);
    }

    #[test]
    fn test_operation_id() {
        let route: ApiRoute = ApiRoute::get("/items/{id}", read_items);
        assert_eq!(route.operation_id(&Method::GET), "read_items_items__id__get");
    }

    #[test]
    fn test_for_method_and_prefix() {
        let route: ApiRoute = ApiRoute::new("/items", [Method::GET, Method::POST], read_items)
            .prefixed("/shop");
        assert_eq!(route.path(), "/shop/items");

        let post_only = route.for_method(&Method::POST);
        assert_eq!(post_only.methods(), &[Method::POST]);
        assert_eq!(post_only.path(), "/shop/items");
    }

    #[test]
    fn test_doc_fields() {
        let route: ApiRoute = ApiRoute::get("/items", read_items)
            .with_summary("List items")
            .with_tag("items")
            .with_tag("items")
            .deprecated()
            .hidden();
        assert_eq!(route.summary(), Some("List items"));
        assert_eq!(route.tags(), &["items".to_string()]);
        assert!(route.is_deprecated());
        assert!(!route.include_in_schema());
        assert!(route.version_tag().is_none());
    }
}
