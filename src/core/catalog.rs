//! Catalog - Read-only shop items and informational passes.
//!
//! The catalog is loaded once at startup and never mutated. Items keep their declaration
//! order, which drives both category order and the order within each category. Category
//! listings are paged five items at a time, and page navigation wraps in both directions.

use crate::{
    config::catalog::CatalogConfig,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::collections::HashSet;

/// Number of items shown per shop page.
pub const PAGE_SIZE: usize = 5;

/// A purchasable shop item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogItem {
    /// Unique item name, used as the purchase key
    pub name: String,
    /// Price in tokens, always positive
    pub price: u64,
    /// Category the item is listed under
    pub category: String,
    /// Short description shown in the shop
    pub description: String,
}

/// Informational pass listing. Passes cannot be bought through the bot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pass {
    /// Display name
    pub name: String,
    /// Price text, e.g. `"$4.99/month"`
    pub price: String,
    /// Tokens granted every month
    pub monthly_tokens: u64,
    /// Tokens granted once on joining
    pub entry_bonus: u64,
    /// Shop discount text
    pub discount: String,
    /// Discord role granted to holders
    pub role: String,
    /// Longer description
    pub description: String,
}

/// The shop catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    passes: Vec<Pass>,
}

/// One page of a category listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage<'a> {
    /// Zero-based page index after wrapping
    pub index: usize,
    /// Total number of pages in the category (at least 1)
    pub count: usize,
    /// Items on this page
    pub items: Vec<&'a CatalogItem>,
}

impl Catalog {
    /// Builds a catalog, validating that it has items, that every price is positive,
    /// and that item names are unique.
    ///
    /// # Errors
    /// Returns [`Error::Config`] describing the first violation found.
    pub fn new(items: Vec<CatalogItem>, passes: Vec<Pass>) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::Config {
                message: "Catalog must define at least one item".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for item in &items {
            if item.price == 0 {
                return Err(Error::Config {
                    message: format!("Item '{}' must have a positive price", item.name),
                });
            }
            if !seen.insert(item.name.as_str()) {
                return Err(Error::Config {
                    message: format!("Duplicate item name '{}'", item.name),
                });
            }
        }

        Ok(Self { items, passes })
    }

    /// Builds a catalog from a parsed configuration file.
    pub fn from_config(config: CatalogConfig) -> Result<Self> {
        Self::new(config.items, config.passes)
    }

    /// Looks up an item by its exact name.
    #[must_use]
    pub fn item(&self, name: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// All items in declaration order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// All passes in declaration order.
    #[must_use]
    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    /// Distinct category names in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for item in &self.items {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }
        categories
    }

    /// Items in `category`, in declaration order.
    #[must_use]
    pub fn list_by_category(&self, category: &str) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .collect()
    }

    /// Number of pages for `category`. An empty category still has one (empty) page.
    #[must_use]
    pub fn page_count(&self, category: &str) -> usize {
        self.list_by_category(category).len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Page `index` of `category`, wrapping indexes past the last page back to the start.
    #[must_use]
    pub fn page(&self, category: &str, index: usize) -> CatalogPage<'_> {
        let items = self.list_by_category(category);
        let count = items.len().div_ceil(PAGE_SIZE).max(1);
        let index = index % count;

        CatalogPage {
            index,
            count,
            items: items
                .into_iter()
                .skip(index * PAGE_SIZE)
                .take(PAGE_SIZE)
                .collect(),
        }
    }
}

/// Index of the page after `current`, wrapping from the last page to the first.
#[must_use]
pub const fn next_page(current: usize, count: usize) -> usize {
    if count == 0 { 0 } else { (current + 1) % count }
}

/// Index of the page before `current`, wrapping from the first page to the last.
#[must_use]
pub const fn previous_page(current: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (current % count + count - 1) % count
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_categories_in_declaration_order() {
        let catalog = sample_catalog();
        assert_eq!(catalog.categories(), vec!["Roles", "Perks"]);
    }

    #[test]
    fn test_list_by_category_keeps_order() {
        let catalog = sample_catalog();
        let roles: Vec<&str> = catalog
            .list_by_category("Roles")
            .iter()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(roles.len(), 7);
        assert_eq!(roles[0], "Red Role");
        assert_eq!(roles[6], "VIP Role");
        assert!(catalog.list_by_category("Missing").is_empty());
    }

    #[test]
    fn test_pages_split_by_five() {
        let catalog = sample_catalog();
        assert_eq!(catalog.page_count("Roles"), 2);

        let first = catalog.page("Roles", 0);
        assert_eq!(first.items.len(), 5);
        let second = catalog.page("Roles", 1);
        assert_eq!(second.items.len(), 2);
        assert_eq!(second.items[1].name, "VIP Role");
    }

    #[test]
    fn test_next_from_last_page_wraps_to_first() {
        let catalog = sample_catalog();
        let count = catalog.page_count("Roles");
        let next = next_page(1, count);
        assert_eq!(next, 0);
        assert_eq!(catalog.page("Roles", next).items[0].name, "Red Role");
    }

    #[test]
    fn test_previous_from_first_page_wraps_to_last() {
        assert_eq!(previous_page(0, 2), 1);
        assert_eq!(previous_page(1, 2), 0);
        assert_eq!(previous_page(0, 1), 0);
    }

    #[test]
    fn test_page_index_wraps_modulo_count() {
        let catalog = sample_catalog();
        assert_eq!(catalog.page("Roles", 2).index, 0);
        assert_eq!(catalog.page("Roles", 3).index, 1);
    }

    #[test]
    fn test_empty_category_has_single_empty_page() {
        let catalog = sample_catalog();
        let page = catalog.page("Missing", 4);
        assert_eq!(page.count, 1);
        assert_eq!(page.index, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_item_lookup_is_exact() {
        let catalog = sample_catalog();
        assert_eq!(catalog.item("VIP Role").unwrap().price, 300);
        assert!(catalog.item("vip role").is_none());
    }

    #[test]
    fn test_new_rejects_zero_price() {
        let items = vec![test_item("Free Lunch", 0, "Perks")];
        assert!(matches!(
            Catalog::new(items, Vec::new()),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let items = vec![test_item("Sticker", 5, "Perks"), test_item("Sticker", 6, "Perks")];
        assert!(Catalog::new(items, Vec::new()).is_err());
    }

    #[test]
    fn test_new_rejects_empty_catalog() {
        assert!(Catalog::new(Vec::new(), Vec::new()).is_err());
    }
}
