//! Persistence for the user's custom review order.
//!
//! The custom order is a small, durable user preference: an ordered list of
//! document paths that takes precedence over natural due-order when the queue
//! is rebuilt. It is injected into the navigation engine as an [`OrderStore`]
//! rather than reached through a process-wide singleton, so independent
//! engine instances can carry independent orders.

use std::{
    collections::BTreeMap,
    fs::{read_to_string, write},
    path::PathBuf,
};

use crate::error::MnemaError;

/// Durable storage for the custom review order.
pub trait OrderStore: Send + Sync {
    fn custom_order(&self) -> Result<Vec<String>, MnemaError>;
    fn set_custom_order(&self, order: &[String]) -> Result<(), MnemaError>;
}

/// [`OrderStore`] backed by a TOML file with a single `order` array.
///
/// A missing file reads as an empty order; writes create the file.
#[derive(Debug, Clone)]
pub struct TomlOrderStore {
    path: PathBuf,
}

impl TomlOrderStore {
    pub fn new(path: impl Into<PathBuf>) -> TomlOrderStore {
        TomlOrderStore { path: path.into() }
    }
}

impl OrderStore for TomlOrderStore {
    fn custom_order(&self) -> Result<Vec<String>, MnemaError> {
        tracing::debug!("Attempting to read custom order from: {:?}", &self.path);
        if !self.path.exists() {
            tracing::debug!("Order file not found, returning empty custom order.");
            return Ok(Vec::new());
        }
        let content = read_to_string(&self.path)?;
        let config: BTreeMap<String, Vec<String>> = toml::from_str(&content)?;
        Ok(config.get("order").cloned().unwrap_or_default())
    }

    fn set_custom_order(&self, order: &[String]) -> Result<(), MnemaError> {
        tracing::debug!("Attempting to write custom order to: {:?}", &self.path);
        let mut config = BTreeMap::new();
        config.insert("order".to_string(), order.to_vec());
        let toml_string = toml::to_string(&config)?;
        write(&self.path, toml_string)?;
        Ok(())
    }
}
