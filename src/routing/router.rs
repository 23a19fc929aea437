//! Route classes and route groups.
//!
//! # Responsibilities
//! - `RouteClass`: hook run on every route a router builds
//! - `ApiRouter`: a group of routes sharing a path prefix, tags and route class
//!
//! # Design Decisions
//! - Routes built through `route`/`get`/... pass through the route class;
//!   routes handed over with `add` are taken as they are
//! - Router prefix and tags are applied when the route is added

use axum::handler::Handler;
use axum::http::Method;

use crate::routing::route::ApiRoute;

/// Builds routes, optionally decorating each one after construction.
pub trait RouteClass {
    /// Called on every route built through this class.
    fn finish<S>(&self, route: ApiRoute<S>) -> ApiRoute<S>;

    fn route<S, H, T>(
        &self,
        path: impl Into<String>,
        methods: impl IntoIterator<Item = Method>,
        handler: H,
    ) -> ApiRoute<S>
    where
        S: Clone + Send + Sync + 'static,
        H: Handler<T, S>,
        T: 'static,
    {
        self.finish(ApiRoute::new(path, methods, handler))
    }

    fn get<S, H, T>(&self, path: impl Into<String>, handler: H) -> ApiRoute<S>
    where
        S: Clone + Send + Sync + 'static,
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(path, [Method::GET], handler)
    }

    fn post<S, H, T>(&self, path: impl Into<String>, handler: H) -> ApiRoute<S>
    where
        S: Clone + Send + Sync + 'static,
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(path, [Method::POST], handler)
    }

    fn put<S, H, T>(&self, path: impl Into<String>, handler: H) -> ApiRoute<S>
    where
        S: Clone + Send + Sync + 'static,
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(path, [Method::PUT], handler)
    }

    fn delete<S, H, T>(&self, path: impl Into<String>, handler: H) -> ApiRoute<S>
    where
        S: Clone + Send + Sync + 'static,
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(path, [Method::DELETE], handler)
    }
}

/// Route class that leaves routes untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRouteClass;

impl RouteClass for DefaultRouteClass {
    fn finish<S>(&self, route: ApiRoute<S>) -> ApiRoute<S> {
        route
    }
}

/// A group of routes sharing a prefix, OpenAPI tags and a route class.
pub struct ApiRouter<S = (), C = DefaultRouteClass> {
    prefix: String,
    tags: Vec<String>,
    route_class: C,
    routes: Vec<ApiRoute<S>>,
}

impl<S> ApiRouter<S, DefaultRouteClass> {
    pub fn new() -> Self {
        Self::with_route_class(DefaultRouteClass)
    }
}

impl<S> Default for ApiRouter<S, DefaultRouteClass> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C: RouteClass> ApiRouter<S, C> {
    /// Create a router whose routes are built through `route_class`.
    pub fn with_route_class(route_class: C) -> Self {
        Self {
            prefix: String::new(),
            tags: Vec::new(),
            route_class,
            routes: Vec::new(),
        }
    }

    /// Path prefix applied to routes added afterwards.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// OpenAPI tag applied to routes added afterwards.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add an already built route. The route class is not applied.
    pub fn add(mut self, route: ApiRoute<S>) -> Self {
        self.push(route);
        self
    }

    pub fn route<H, T>(
        mut self,
        path: &str,
        methods: impl IntoIterator<Item = Method>,
        handler: H,
    ) -> Self
    where
        S: Clone + Send + Sync + 'static,
        H: Handler<T, S>,
        T: 'static,
    {
        let route = self.route_class.route(path, methods, handler);
        self.push(route);
        self
    }

    pub fn get<H: Handler<T, S>, T: 'static>(self, path: &str, handler: H) -> Self
    where
        S: Clone + Send + Sync + 'static,
    {
        self.route(path, [Method::GET], handler)
    }

    pub fn post<H: Handler<T, S>, T: 'static>(self, path: &str, handler: H) -> Self
    where
        S: Clone + Send + Sync + 'static,
    {
        self.route(path, [Method::POST], handler)
    }

    pub fn put<H: Handler<T, S>, T: 'static>(self, path: &str, handler: H) -> Self
    where
        S: Clone + Send + Sync + 'static,
    {
        self.route(path, [Method::PUT], handler)
    }

    pub fn patch<H: Handler<T, S>, T: 'static>(self, path: &str, handler: H) -> Self
    where
        S: Clone + Send + Sync + 'static,
    {
        self.route(path, [Method::PATCH], handler)
    }

    pub fn delete<H: Handler<T, S>, T: 'static>(self, path: &str, handler: H) -> Self
    where
        S: Clone + Send + Sync + 'static,
    {
        self.route(path, [Method::DELETE], handler)
    }

    pub fn routes(&self) -> &[ApiRoute<S>] {
        &self.routes
    }

    pub fn into_routes(self) -> Vec<ApiRoute<S>> {
        self.routes
    }

    fn push(&mut self, route: ApiRoute<S>) {
        let mut route = route.prefixed(&self.prefix);
        for tag in &self.tags {
            route = route.with_tag(tag.clone());
        }
        self.routes.push(route);
    }
}
