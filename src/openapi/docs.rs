//! Handlers serving the generated spec and the Swagger UI page.

use std::sync::Arc;

use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use serde_json::Value;

struct OpenApiState {
    spec_json: String,
    docs_page: String,
}

/// Build a router serving `openapi_url` and optionally `docs_url`.
///
/// `root_path` is the mount point of the application; the docs page needs it
/// to fetch the spec from the right absolute URL once nested.
pub fn openapi_routes<S>(
    spec: &Value,
    title: &str,
    root_path: &str,
    openapi_url: &str,
    docs_url: Option<&str>,
) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let spec_json = serde_json::to_string(spec).unwrap_or_else(|_| "{}".to_string());
    let state = Arc::new(OpenApiState {
        spec_json,
        docs_page: docs_html(title, &format!("{root_path}{openapi_url}")),
    });

    let spec_state = state.clone();
    let mut router = Router::<S>::new().route(
        openapi_url,
        get(move || {
            let json = spec_state.spec_json.clone();
            async move { ([("content-type", "application/json")], json).into_response() }
        }),
    );

    if let Some(docs_url) = docs_url {
        let page_state = state;
        router = router.route(
            docs_url,
            get(move || {
                let page = page_state.docs_page.clone();
                async move { Html(page).into_response() }
            }),
        );
    }

    router
}

/// Swagger UI page loading the spec from `openapi_url`.
pub fn docs_html(title: &str, openapi_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Swagger UI</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        const ui = SwaggerUIBundle({{
            url: '{openapi_url}',
            dom_id: '#swagger-ui',
            layout: 'BaseLayout',
            deepLinking: true,
            presets: [SwaggerUIBundle.presets.apis, SwaggerUIBundle.SwaggerUIStandalonePreset],
        }})
    </script>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docs_html_points_at_spec() {
        let page = docs_html("Shop - 2.0", "/v2_0/openapi.json");
        assert!(page.contains("<title>Shop - 2.0 - Swagger UI</title>"));
        assert!(page.contains("url: '/v2_0/openapi.json'"));
    }
}
