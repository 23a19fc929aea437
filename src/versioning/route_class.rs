//! Route class stamping a version on every route it builds.

use crate::routing::route::ApiRoute;
use crate::routing::router::{DefaultRouteClass, RouteClass};
use crate::versioning::version::{version, VersionTag};

/// Route class tagging each route after the wrapped class has built it.
#[derive(Debug, Clone)]
pub struct VersionedRouteClass<C = DefaultRouteClass> {
    tag: VersionTag,
    inner: C,
}

impl<C> VersionedRouteClass<C> {
    pub fn tag(&self) -> &VersionTag {
        &self.tag
    }
}

impl<C: RouteClass> RouteClass for VersionedRouteClass<C> {
    fn finish<S>(&self, route: ApiRoute<S>) -> ApiRoute<S> {
        self.tag.clone().apply(self.inner.finish(route))
    }
}

/// Route class whose routes all carry `major.minor` and `prefix`.
///
/// ```ignore
/// let v2 = ApiRouter::with_route_class(versioned_api_route(2, 0, ""))
///     .get("/items", list_items_v2);
/// ```
pub fn versioned_api_route(
    major: u32,
    minor: u32,
    prefix: impl Into<String>,
) -> VersionedRouteClass {
    versioned_api_route_with(major, minor, prefix, DefaultRouteClass)
}

/// Same as [`versioned_api_route`], layered over another route class.
pub fn versioned_api_route_with<C: RouteClass>(
    major: u32,
    minor: u32,
    prefix: impl Into<String>,
    route_class: C,
) -> VersionedRouteClass<C> {
    VersionedRouteClass {
        tag: version(major, minor).prefix(prefix),
        inner: route_class,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::ApiRouter;
    use crate::versioning::version::ApiVersion;

    async fn handler() -> &'static str {
        "ok"
    }

    /// Tags routes as documentation group "audited".
    struct Audited;

    impl RouteClass for Audited {
        fn finish<S>(&self, route: ApiRoute<S>) -> ApiRoute<S> {
            route.with_tag("audited")
        }
    }

    #[test]
    fn test_every_route_is_tagged() {
        let router: ApiRouter<(), _> = ApiRouter::with_route_class(versioned_api_route(2, 1, "/admin"))
            .get("/users", handler)
            .delete("/users/{id}", handler);

        for route in router.routes() {
            let tag = route.version_tag().expect("tagged");
            assert_eq!(tag.version, ApiVersion::new(2, 1));
            assert_eq!(tag.prefix, "/admin");
        }
    }

    #[test]
    fn test_wraps_inner_class() {
        let class = versioned_api_route_with(3, 0, "", Audited);
        let route: ApiRoute = class.get("/ping", handler);
        assert_eq!(route.tags(), &["audited".to_string()]);
        assert_eq!(route.version_tag().unwrap().version, ApiVersion::new(3, 0));
    }

    #[test]
    fn test_add_bypasses_route_class() {
        let router: ApiRouter<(), _> = ApiRouter::with_route_class(versioned_api_route(2, 0, ""))
            .add(ApiRoute::get("/raw", handler));
        assert!(router.routes()[0].version_tag().is_none());
    }
}
