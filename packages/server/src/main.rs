#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the LifeCost+ API server.
//!
//! Configuration comes from `BIND_ADDR`, `PORT`, `LIFECOST_CATALOG`, and
//! `NEARBY_CACHE_TTL_SECS`.

use lifecost_server::{ServerConfig, ServerError};

#[actix_web::main]
async fn main() -> Result<(), ServerError> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    lifecost_server::run_server(ServerConfig::from_env()).await
}
