//! Shared test utilities for `TokenBuddy`.
//!
//! This module provides helpers for setting up throwaway ledgers and a catalog
//! with a predictable layout.

use crate::{
    core::{
        catalog::{Catalog, CatalogItem, Pass},
        ledger::Ledger,
    },
    entities::AccountUpdate,
    errors::Result,
};
use tempfile::TempDir;

/// Opens a ledger in a fresh temp directory.
///
/// The directory is removed when the returned [`TempDir`] is dropped, so keep it alive for
/// the whole test.
pub fn setup_test_ledger() -> Result<(Ledger, TempDir)> {
    let dir = TempDir::new()?;
    let ledger = Ledger::open(dir.path())?;
    Ok((ledger, dir))
}

/// Sets the token and point balances of `user_id`, creating the account if needed.
pub fn seed_account(ledger: &Ledger, user_id: &str, tokens: u64, points: u64) -> Result<()> {
    ledger.update_account(
        user_id,
        AccountUpdate {
            tokens: Some(tokens),
            points: Some(points),
            ..Default::default()
        },
    )?;
    Ok(())
}

/// Creates a catalog item with a generic description.
#[must_use]
pub fn test_item(name: &str, price: u64, category: &str) -> CatalogItem {
    CatalogItem {
        name: name.to_string(),
        price,
        category: category.to_string(),
        description: format!("{name} for testing"),
    }
}

/// A catalog with seven "Roles" items (two pages) followed by two "Perks" items.
///
/// # Layout
/// * Roles: Red, Orange, Yellow, Green, Blue, Purple (50 each), VIP Role (300)
/// * Perks: Sticker Pack (25), Custom Emoji (120)
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn sample_catalog() -> Catalog {
    let mut items: Vec<CatalogItem> = ["Red", "Orange", "Yellow", "Green", "Blue", "Purple"]
        .iter()
        .map(|color| test_item(&format!("{color} Role"), 50, "Roles"))
        .collect();
    items.push(test_item("VIP Role", 300, "Roles"));
    items.push(test_item("Sticker Pack", 25, "Perks"));
    items.push(test_item("Custom Emoji", 120, "Perks"));

    let passes = vec![Pass {
        name: "Silver Pass".to_string(),
        price: "$2.99/month".to_string(),
        monthly_tokens: 150,
        entry_bonus: 50,
        discount: "5% off the shop".to_string(),
        role: "Silver".to_string(),
        description: "Monthly token drip".to_string(),
    }];

    Catalog::new(items, passes).unwrap()
}
