//! Versioned API demo server.
//!
//! Serves a small catalogue API in two versions to show how routes are
//! grouped and mounted:
//!
//! ```text
//!   /openapi.json, /docs          parent docs listing every version
//!   /v1_0/items                   list_items (v1)
//!   /v1_0/items/{id}              get_item
//!   /v2_0/items                   list_items_v2 (paginated)
//!   /v2_0/items/{id}              get_item, carried over from v1
//!   /v2_0/admin/stats             admin group of v2 (v2 routes carried in)
//!   /latest/...                   newest routes, when enabled
//! ```

use std::path::PathBuf;

use axum::extract::{Path, Query};
use axum::Json;
use clap::Parser;
use serde::Deserialize;
use serde_json::{json, Value};

use route_versioning::config::{load_config, ServiceConfig};
use route_versioning::lifecycle::{self, Shutdown};
use route_versioning::observability::logging::init_logging;
use route_versioning::{version, versioned_api_route, ApiApp, ApiRoute, ApiRouter};

#[derive(Parser)]
#[command(name = "versioned-api")]
#[command(about = "Serve an API mounted once per version", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Mount the newest routes under the latest prefix as well.
    #[arg(long)]
    latest: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }
    if cli.latest {
        config.versioning.enable_latest = true;
    }

    init_logging(&config.observability);
    tracing::info!("versioned-api v{} starting", env!("CARGO_PKG_VERSION"));

    let shutdown = Shutdown::new();
    lifecycle::run(catalogue(), config, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn catalogue() -> ApiApp {
    let admin = ApiRouter::with_route_class(versioned_api_route(2, 0, "/admin"))
        .tag("admin")
        .get("/stats", stats);

    ApiApp::new("Catalogue")
        .with_description("Product catalogue")
        .route(ApiRoute::get("/items", list_items).with_tag("items"))
        .route(ApiRoute::get("/items/{id}", get_item).with_tag("items"))
        .route(
            version(2, 0).apply(
                ApiRoute::get("/items", list_items_v2)
                    .with_tag("items")
                    .with_summary("List items, paginated"),
            ),
        )
        .include_router(admin)
}

const ITEMS: [&str; 5] = ["anvil", "bucket", "chisel", "drill", "easel"];

async fn list_items() -> Json<Value> {
    Json(json!({ "items": ITEMS }))
}

async fn get_item(Path(id): Path<usize>) -> Json<Value> {
    match ITEMS.get(id) {
        Some(name) => Json(json!({ "id": id, "name": name })),
        None => Json(json!({ "id": id, "name": null })),
    }
}

#[derive(Deserialize)]
struct Page {
    #[serde(default)]
    offset: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    2
}

async fn list_items_v2(Query(page): Query<Page>) -> Json<Value> {
    let items: Vec<&str> = ITEMS.iter().skip(page.offset).take(page.limit).copied().collect();
    Json(json!({
        "items": items,
        "offset": page.offset,
        "total": ITEMS.len(),
    }))
}

async fn stats() -> Json<Value> {
    Json(json!({ "items": ITEMS.len() }))
}
