//! Named item footprints.
//!
//! Maps an archetype name (`"sword"`, `"armor"`, ...) to its [`Shape`]. The
//! catalog is an ordinary value built by the host and passed to whoever needs
//! it; there is no global table.
//!
//! JSON format: an object of `name → [[x, y], ...]`.

pub mod error;

pub use error::CatalogError;

use std::collections::HashMap;
use std::path::Path;

use effigy_core::Shape;
use tracing::{debug, info};

/// Footprints shipped with the crate.
const BUILTIN_SHAPES_JSON: &str = include_str!("../data/shapes.json");

#[derive(Debug, Clone, Default)]
pub struct ShapeCatalog {
    by_name: HashMap<String, Shape>,
}

impl ShapeCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the bundled footprints.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_SHAPES_JSON)
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let by_name: HashMap<String, Shape> = serde_json::from_str(json)?;
        Ok(Self { by_name })
    }

    /// Read and parse a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&text)?;
        info!("Loaded {} shape(s) from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Look up a footprint by name.
    pub fn get(&self, name: &str) -> Option<&Shape> {
        self.by_name.get(name)
    }

    /// Register a footprint. The first registration of a name wins; returns
    /// whether `shape` was inserted.
    pub fn register(&mut self, name: impl Into<String>, shape: Shape) -> bool {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            debug!("Shape '{name}' already registered, keeping existing");
            return false;
        }
        self.by_name.insert(name, shape);
        true
    }

    /// All names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
