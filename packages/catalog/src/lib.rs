#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City catalog access for the LifeCost+ engine.
//!
//! The engine never reaches for a global data source. Callers construct a
//! [`CityCatalog`] implementation and pass it in: [`InMemoryCatalog`] backs
//! both the embedded dataset (see [`registry`]) and test fixtures. Catalog
//! data is TOML, following the same embedded-registry pattern used for other
//! static definitions.

pub mod registry;
pub mod validate;

use std::path::{Path, PathBuf};

use lifecost_city_models::City;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading or reading a city catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading a catalog file failed.
    #[error("Failed to read catalog '{path}': {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The catalog TOML could not be parsed.
    #[error("Catalog parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The backing store failed to produce data.
    #[error("Catalog unavailable: {message}")]
    Unavailable {
        /// Description of what went wrong.
        message: String,
    },
}

/// Read access to the set of known cities.
///
/// `Ok(None)` from [`CityCatalog::city_by_slug`] means the city does not
/// exist; `Err` means the lookup itself failed.
pub trait CityCatalog: Send + Sync {
    /// Returns every city in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the backing store cannot be read.
    fn cities(&self) -> Result<Vec<City>, CatalogError>;

    /// Looks up a single city by slug.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the backing store cannot be read.
    fn city_by_slug(&self, slug: &str) -> Result<Option<City>, CatalogError> {
        Ok(self.cities()?.into_iter().find(|city| city.slug == slug))
    }
}

/// TOML document shape for catalog files: a top-level `[[cities]]` array.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    cities: Vec<City>,
}

/// A catalog held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    cities: Vec<City>,
}

impl InMemoryCatalog {
    /// Wraps an already-loaded city list. Order is preserved.
    #[must_use]
    pub const fn new(cities: Vec<City>) -> Self {
        Self { cities }
    }

    /// Parses a catalog from TOML text.
    ///
    /// Validation issues are logged but do not fail the load.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the TOML is malformed or a city
    /// record is missing required fields.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::de::from_str(toml_str)?;
        let issues = validate::validate_catalog(&file.cities);
        if !issues.is_empty() {
            log::warn!("Catalog loaded with {} validation issue(s)", issues.len());
        }
        Ok(Self::new(file.cities))
    }

    /// Reads and parses a catalog TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, or
    /// [`CatalogError::Parse`] if its contents are invalid.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        log::info!("Loading city catalog from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Loads the dataset embedded in this crate.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the embedded TOML is invalid.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_toml_str(registry::EMBEDDED_CATALOG)
    }

    /// Number of cities in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns `true` if the catalog holds no cities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl CityCatalog for InMemoryCatalog {
    fn cities(&self) -> Result<Vec<City>, CatalogError> {
        Ok(self.cities.clone())
    }

    fn city_by_slug(&self, slug: &str) -> Result<Option<City>, CatalogError> {
        Ok(self.cities.iter().find(|city| city.slug == slug).cloned())
    }
}
