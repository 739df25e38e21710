//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions come straight from the in-memory catalog, so no storage is touched.

use crate::bot::Context;

/// Discord's cap on autocomplete suggestions
const MAX_SUGGESTIONS: usize = 25;

/// Provides autocomplete suggestions for shop item names.
///
/// Matches are case-insensitive substrings of the item name, returned in catalog order.
pub async fn autocomplete_item_name(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    ctx.data()
        .catalog
        .items()
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&partial_lower))
        .map(|item| item.name.clone())
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Provides autocomplete suggestions for shop categories.
pub async fn autocomplete_category(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    ctx.data()
        .catalog
        .categories()
        .into_iter()
        .filter(|category| category.to_lowercase().contains(&partial_lower))
        .map(str::to_string)
        .take(MAX_SUGGESTIONS)
        .collect()
}
