#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the LifeCost+ city engine.
//!
//! Serves city search, lookup, comparison, proximity, rating, and trend
//! endpoints under `/api`. The city catalog is loaded once at startup and
//! shared read-only across workers; nearby-city results are memoized in a
//! [`TtlCache`](cache::TtlCache).

pub mod cache;
mod handlers;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, error, middleware, web};
use lifecost_catalog::{CatalogError, CityCatalog, InMemoryCatalog};
use lifecost_engine::proximity::NearbyCity;
use lifecost_server_models::ApiError;
use thiserror::Error;

use crate::cache::{DEFAULT_TTL, TtlCache};

/// Errors that can occur while starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The city catalog could not be loaded.
    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// Binding or running the HTTP server failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state.
pub struct AppState {
    /// The injected city catalog.
    pub catalog: Arc<dyn CityCatalog>,
    /// Nearby-city results keyed by slug, radius, and unit.
    pub nearby_cache: Mutex<TtlCache<String, Vec<NearbyCity>>>,
}

impl AppState {
    /// Creates state around `catalog` with a nearby cache of the given TTL.
    #[must_use]
    pub fn new(catalog: Arc<dyn CityCatalog>, cache_ttl: Duration) -> Self {
        Self {
            catalog,
            nearby_cache: Mutex::new(TtlCache::new(cache_ttl)),
        }
    }
}

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Optional TOML catalog file (`LIFECOST_CATALOG`).
    pub catalog_path: Option<PathBuf>,
    /// Nearby cache TTL (`NEARBY_CACHE_TTL_SECS`).
    pub cache_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            catalog_path: None,
            cache_ttl: DEFAULT_TTL,
        }
    }
}

impl ServerConfig {
    /// Reads settings from the environment, falling back to defaults for
    /// unset or unparseable values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            catalog_path: lookup("LIFECOST_CATALOG")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            cache_ttl: lookup("NEARBY_CACHE_TTL_SECS")
                .and_then(|s| s.parse().ok())
                .map_or(defaults.cache_ttl, Duration::from_secs),
        }
    }

    /// Loads the configured catalog file, or the embedded dataset when no
    /// path is set.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the catalog cannot be read or parsed.
    pub fn load_catalog(&self) -> Result<InMemoryCatalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => InMemoryCatalog::from_path(path),
            None => InMemoryCatalog::embedded(),
        }
    }
}

/// Registers the `/api` routes along with JSON error handlers for malformed
/// query strings and request bodies.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/cities", web::get().to(handlers::cities))
                .route("/cities/{slug}", web::get().to(handlers::city))
                .route("/cities/{slug}/nearby", web::get().to(handlers::nearby))
                .route("/compare", web::get().to(handlers::compare))
                .route("/ratings/{kind}", web::get().to(handlers::rating))
                .route("/trends/safety", web::post().to(handlers::safety_trend))
                .route(
                    "/trends/transportation",
                    web::post().to(handlers::transportation_trend),
                )
                .route(
                    "/trends/air-quality",
                    web::post().to(handlers::air_quality_trend),
                ),
        );
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ApiError::new(format!("Invalid query: {err}"));
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ApiError::new(format!("Invalid request body: {err}"));
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Starts the LifeCost+ API server.
///
/// Loads the catalog named by `config` and serves until shutdown. The caller
/// provides the async runtime and initializes logging.
///
/// # Errors
///
/// Returns [`ServerError`] if the catalog cannot be loaded or the HTTP
/// server fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    log::info!("Loading city catalog...");
    let catalog = config.load_catalog()?;
    log::info!("Loaded {} cities", catalog.len());

    let state = web::Data::new(AppState::new(Arc::new(catalog), config.cache_ttl));

    log::info!(
        "Starting server on {}:{} (nearby cache TTL {}s)",
        config.bind_addr,
        config.port,
        config.cache_ttl.as_secs()
    );

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
