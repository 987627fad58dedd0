#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod cache;
mod config;
mod error;
mod fetch;
mod menu;
mod parse;
mod sources;

use std::{sync::Arc, time::Instant};

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    routing::{get, on, MethodFilter},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::{compression::CompressionLayer, cors::Any};

use crate::{
    cache::Registry,
    config::Config,
    fetch::{Fetch, HttpFetcher, Locator},
    menu::Menu,
    parse::Extractor,
    sources::Source,
};

pub use error::Result;

#[cfg(all(target_env = "musl", target_pointer_width = "64"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

async fn menu<F: Fetch>(
    State(registry): State<Arc<Registry<F>>>,
    Path(canteen): Path<String>,
) -> Result<Json<Arc<Menu>>> {
    log::debug!("Serving menu of {canteen}");
    registry.get_current_menu(&canteen).await.map(Json)
}

async fn canteens<F: Fetch>(State(registry): State<Arc<Registry<F>>>) -> Json<Vec<String>> {
    Json(registry.keys().map(str::to_owned).collect())
}

async fn refresh<F: Fetch>(
    State(registry): State<Arc<Registry<F>>>,
    Path(canteen): Path<String>,
) -> Result<(StatusCode, String)> {
    registry.refresh(&canteen).await?;
    let proxy = registry.proxy(&canteen)?;
    let since = proxy.time_since_refresh().await.map_or(0, |d| d.num_seconds());
    let until = proxy.time_until_refresh().await.map_or(0, |d| d.num_seconds());
    Ok((
        StatusCode::CREATED,
        format!(
            "{}\nLast refresh: {since}s ago\nNext refresh: in {until}s",
            proxy.source().info.name
        ),
    ))
}

fn app<F: Fetch>(registry: Arc<Registry<F>>) -> Router {
    let compression_layer: CompressionLayer = CompressionLayer::new()
        .br(true)
        .deflate(true)
        .gzip(true)
        .zstd(true);
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET]) // request-refresh stays same-origin
        .allow_origin(Any);

    Router::new()
        .route("/menu/:canteen", get(menu::<F>))
        .route("/canteens", get(canteens::<F>))
        .route("/request-refresh/:canteen", on(MethodFilter::PUT, refresh::<F>))
        .with_state(registry)
        .layer(cors_layer)
        .layer(compression_layer)
}

/// Points every source at `<dir>/<key>.html`.
fn offline_sources(sources: Vec<Source>, dir: &std::path::Path) -> Vec<Source> {
    sources
        .into_iter()
        .map(|source| Source {
            locator: Locator::Local(dir.join(format!("{}.html", source.key))),
            ..source
        })
        .collect()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let config = Config::from_env()?;
    log::debug!("{config:?}");

    let sources = match &config.page_dir {
        Some(dir) => {
            log::warn!("PAGE_DIR set, reading menus from {}", dir.display());
            offline_sources(sources::known(), dir)
        }
        None => sources::known(),
    };
    let registry = Arc::new(Registry::new(
        sources,
        HttpFetcher::new(config.fetch_timeout)?,
        Extractor::new(config.currency.clone(), config.nutrition),
        config.max_menu_age,
    ));

    let app = app(Arc::clone(&registry));
    tokio::spawn(async move {
        log::info!("Loading all menus");
        let start = Instant::now();
        registry.warm_up().await;
        log::info!("Loading all menus done, took {:?}", start.elapsed());
    });

    let listener = TcpListener::bind(config.addr)
        .await
        .map_err(|e| format!("failed to listen on {}: {e}", config.addr))?;
    log::info!("listening on http://{}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
