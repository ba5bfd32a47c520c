//! Compile-time embedded city dataset.
//!
//! The default catalog ships inside the binary so the engine and server run
//! without any external data store. Adding a city means appending a
//! `[[cities]]` entry to `data/cities.toml`.

/// Number of cities in the embedded dataset. Updated when cities are added.
/// Enforced by a test.
#[cfg(test)]
const EXPECTED_CITY_COUNT: usize = 16;

/// Embedded TOML catalog.
pub const EMBEDDED_CATALOG: &str = include_str!("../data/cities.toml");
