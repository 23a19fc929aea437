//! Live-server tests: bind a port, serve a versioned app, hit it over HTTP.

use std::net::SocketAddr;
use std::time::Duration;

use route_versioning::config::{ServerConfig, ServiceConfig};
use route_versioning::lifecycle::{self, prepare, Shutdown, StartupError};
use route_versioning::{version, versioned_app, ApiApp, ApiRoute, HttpServer, VersioningConfig};

async fn hello() -> &'static str {
    "hello v1"
}

async fn hello_v2() -> &'static str {
    "hello v2"
}

fn greeter() -> ApiApp {
    ApiApp::new("Greeter")
        .route(ApiRoute::get("/hello", hello))
        .route(version(2, 0).apply(ApiRoute::get("/hello", hello_v2)))
}

#[tokio::test]
async fn test_serves_versions_over_http() {
    let addr: SocketAddr = "127.0.0.1:28391".parse().unwrap();

    let mut config = VersioningConfig::default();
    config.enable_latest = true;
    let router = versioned_app(greeter(), &config).unwrap().into_router().unwrap();

    let server = HttpServer::new(
        router,
        ServerConfig {
            bind_address: addr.to_string(),
            request_timeout_secs: 5,
        },
    );
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    tokio::time::sleep(Duration::from_millis(200)).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client.get(format!("http://{addr}/v1_0/hello")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "hello v1");

    let res = client.get(format!("http://{addr}/v2_0/hello")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "hello v2");

    let res = client.get(format!("http://{addr}/latest/hello")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "hello v2");

    let spec: serde_json::Value = client
        .get(format!("http://{addr}/openapi.json"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(spec["info"]["title"], "Greeter");
    assert!(spec["paths"]["/v2_0/docs"].is_object());

    assert_eq!(shutdown.trigger(), 1);
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_run_rejects_invalid_config() {
    let mut config = ServiceConfig::default();
    config.versioning.version_prefix = "/v{release}".into();

    let shutdown = Shutdown::new();
    let err = lifecycle::run(greeter(), config, shutdown.subscribe())
        .await
        .unwrap_err();
    match err {
        StartupError::Config(errors) => assert_eq!(errors[0].field, "versioning.version_prefix"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_prepare_surfaces_route_conflicts() {
    let app = greeter()
        .route(ApiRoute::get("/admin/hello", hello))
        .route(version(1, 0).prefix("/admin").apply(ApiRoute::get("/hello", hello)));
    let err = prepare(app, &ServiceConfig::default()).err().unwrap();
    assert!(matches!(err, StartupError::Versioning(_)));
}

#[test]
fn test_prepare_keeps_server_config() {
    let mut config = ServiceConfig::default();
    config.server.bind_address = "127.0.0.1:0".into();
    config.server.request_timeout_secs = 7;

    let server = prepare(greeter(), &config).unwrap();
    assert_eq!(server.config().bind_address, "127.0.0.1:0");
    assert_eq!(server.config().request_timeout_secs, 7);
}
