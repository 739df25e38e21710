//! Catalog configuration loading from config.toml
//!
//! The shop items and passes are defined in a TOML file and loaded once at startup.
//! The parsed configuration is turned into a validated [`Catalog`](crate::core::catalog::Catalog).

use crate::{
    core::catalog::{CatalogItem, Pass},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Purchasable items, in display order
    pub items: Vec<CatalogItem>,
    /// Informational passes
    #[serde(default)]
    pub passes: Vec<Pass>,
}

/// Loads the catalog configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading catalog from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    parse_config(&contents)
}

/// Parses catalog configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<CatalogConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::catalog::Catalog;

    #[test]
    fn test_parse_catalog_config() {
        let toml_str = r#"
            [[items]]
            name = "Sticker Pack"
            price = 25
            category = "Perks"
            description = "A bundle of server stickers"

            [[items]]
            name = "VIP Role"
            price = 300
            category = "Roles"
            description = "Gold name and VIP lounge access"

            [[passes]]
            name = "Silver Pass"
            price = "$2.99/month"
            monthly_tokens = 150
            entry_bonus = 50
            discount = "5% off the shop"
            role = "Silver"
            description = "Monthly token drip"
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.items.len(), 2);
        assert_eq!(config.items[1].price, 300);
        assert_eq!(config.passes[0].monthly_tokens, 150);

        let catalog = Catalog::from_config(config).unwrap();
        assert_eq!(catalog.categories(), vec!["Perks", "Roles"]);
    }

    #[test]
    fn test_passes_are_optional() {
        let toml_str = r#"
            [[items]]
            name = "Sticker Pack"
            price = 25
            category = "Perks"
            description = "Stickers"
        "#;

        let config = parse_config(toml_str).unwrap();
        assert!(config.passes.is_empty());
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let toml_str = r#"
            [[items]]
            name = "Refund"
            price = -5
            category = "Perks"
            description = "Nope"
        "#;

        assert!(matches!(parse_config(toml_str), Err(Error::Config { .. })));
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let config = load_config(concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml")).unwrap();
        let catalog = Catalog::from_config(config).unwrap();
        assert!(!catalog.categories().is_empty());
        assert!(!catalog.passes().is_empty());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_config("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
