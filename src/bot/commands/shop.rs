//! Shop Discord command - a paginated catalog browser.
//!
//! The shop message carries a category select menu and previous/next buttons. Presses are
//! collected for as long as the message stays open; page navigation wraps around in both
//! directions.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete},
        core::catalog::{Catalog, next_page, previous_page},
        errors::Result,
    };
    use poise::serenity_prelude as serenity;
    use std::time::Duration;

    const SHOP_COLOR: u32 = 0x0058_65F2; // Discord purple
    const SHOP_TIMEOUT: Duration = Duration::from_secs(600);

    /// Browse the shop by category.
    #[poise::command(slash_command, prefix_command)]
    pub async fn shop(
        ctx: Context<'_>,
        #[description = "Category to open (defaults to the first one)"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
    ) -> Result<()> {
        let catalog = &ctx.data().catalog;
        let categories = catalog.categories();

        let Some(first) = categories.first() else {
            ctx.say("🛒 The shop is empty right now.").await?;
            return Ok(());
        };

        let mut category = category
            .filter(|requested| categories.contains(&requested.as_str()))
            .unwrap_or_else(|| (*first).to_string());
        let mut page = 0;

        let ctx_id = ctx.id();
        let prev_id = format!("{ctx_id}prev");
        let next_id = format!("{ctx_id}next");
        let select_id = format!("{ctx_id}category");

        ctx.send(
            poise::CreateReply::default()
                .embed(shop_embed(catalog, &category, page))
                .components(shop_components(catalog, &category, ctx_id)),
        )
        .await?;

        while let Some(press) = serenity::ComponentInteractionCollector::new(ctx.serenity_context())
            .author_id(ctx.author().id)
            .filter(move |press| press.data.custom_id.starts_with(&ctx_id.to_string()))
            .timeout(SHOP_TIMEOUT)
            .await
        {
            let count = catalog.page_count(&category);
            if press.data.custom_id == next_id {
                page = next_page(page, count);
            } else if press.data.custom_id == prev_id {
                page = previous_page(page, count);
            } else if press.data.custom_id == select_id {
                if let serenity::ComponentInteractionDataKind::StringSelect { values } =
                    &press.data.kind
                {
                    if let Some(selected) = values.first() {
                        category.clone_from(selected);
                        page = 0;
                    }
                }
            } else {
                continue;
            }

            press
                .create_response(
                    ctx.serenity_context(),
                    serenity::CreateInteractionResponse::UpdateMessage(
                        serenity::CreateInteractionResponseMessage::new()
                            .embed(shop_embed(catalog, &category, page))
                            .components(shop_components(catalog, &category, ctx_id)),
                    ),
                )
                .await?;
        }

        Ok(())
    }

    fn shop_embed(catalog: &Catalog, category: &str, page_index: usize) -> serenity::CreateEmbed {
        let page = catalog.page(category, page_index);
        let fields = page.items.iter().map(|item| {
            (
                format!("{} - {} tokens", item.name, item.price),
                item.description.clone(),
                false,
            )
        });

        serenity::CreateEmbed::default()
            .title(format!("🛒 Shop - {category}"))
            .description("Use `/buy <item>` to purchase an item.")
            .color(SHOP_COLOR)
            .fields(fields)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Page {}/{}",
                page.index + 1,
                page.count
            )))
    }

    fn shop_components(
        catalog: &Catalog,
        category: &str,
        ctx_id: u64,
    ) -> Vec<serenity::CreateActionRow> {
        let options = catalog
            .categories()
            .into_iter()
            .map(|name| {
                serenity::CreateSelectMenuOption::new(name, name)
                    .default_selection(name == category)
            })
            .collect();

        let select = serenity::CreateSelectMenu::new(
            format!("{ctx_id}category"),
            serenity::CreateSelectMenuKind::String { options },
        )
        .placeholder("Choose a category");

        let buttons = vec![
            serenity::CreateButton::new(format!("{ctx_id}prev"))
                .emoji('◀')
                .style(serenity::ButtonStyle::Secondary),
            serenity::CreateButton::new(format!("{ctx_id}next"))
                .emoji('▶')
                .style(serenity::ButtonStyle::Secondary),
        ];

        vec![
            serenity::CreateActionRow::SelectMenu(select),
            serenity::CreateActionRow::Buttons(buttons),
        ]
    }
}

// Re-export all commands
pub use inner::*;
