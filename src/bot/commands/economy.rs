//! Economy Discord commands - `balance`, `buy`, `transactions`, and `passes`.
//!
//! These commands read and update the caller's own account through the core economy
//! module. Rejected purchases are answered in the channel; only storage failures reach
//! the framework error handler.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete, notify},
        core::economy::{self, CONVERSION_THRESHOLD, PurchaseReceipt},
        entities::Transaction,
        errors::{Error, Result},
    };
    use poise::serenity_prelude::{self as serenity, Mentionable};
    use std::fmt::Write;
    use tracing::warn;

    const BALANCE_COLOR: u32 = 0x00F1_C40F;
    const RECEIPT_COLOR: u32 = 0x0057_F287;

    /// Shows your token balance, points, and progress toward the next conversion.
    #[poise::command(slash_command, prefix_command)]
    pub async fn balance(ctx: Context<'_>) -> Result<()> {
        let user_id = ctx.author().id.to_string();
        let account = ctx.data().ledger.get_account(&user_id)?;

        let passes = if account.passes.is_empty() {
            "None".to_string()
        } else {
            account.passes.join(", ")
        };

        let embed = serenity::CreateEmbed::default()
            .title(format!("💰 {}'s Balance", ctx.author().name))
            .color(BALANCE_COLOR)
            .field("Tokens", account.tokens.to_string(), true)
            .field(
                "Points",
                format!("{} / {CONVERSION_THRESHOLD}", account.points),
                true,
            )
            .field("Words Counted", account.word_count.to_string(), true)
            .field("Passes", passes, false);

        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Buys an item from the shop with tokens.
    ///
    /// The receipt is sent by DM. If DMs are closed, the purchase still goes through and
    /// the reply asks the user to enable them.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn buy(
        ctx: Context<'_>,
        #[description = "Name of the item to buy"]
        #[autocomplete = "autocomplete::autocomplete_item_name"]
        item: String,
    ) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();

        let receipt = match economy::buy(&data.ledger, &data.catalog, &user_id, &item) {
            Ok(receipt) => receipt,
            Err(Error::ItemNotFound { name }) => {
                ctx.say(format!(
                    "❌ Item '{name}' not found. Use `/shop` to see what's available."
                ))
                .await?;
                return Ok(());
            }
            Err(Error::InsufficientFunds {
                required,
                available,
            }) => {
                ctx.say(format!(
                    "❌ Insufficient funds! '{item}' costs {required} tokens, but you only have {available}."
                ))
                .await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let dm = serenity::CreateMessage::new().embed(receipt_embed(&receipt));
        match notify::send_direct_message(ctx.serenity_context(), ctx.author().id, dm).await {
            Ok(()) => {
                ctx.send(
                    poise::CreateReply::default()
                        .content(format!(
                            "✅ You bought **{}**! Your receipt is in your DMs.",
                            receipt.item.name
                        ))
                        .ephemeral(true),
                )
                .await?;
            }
            Err(e) => {
                warn!("{}", e);
                ctx.say(format!(
                    "✅ {} bought **{}** for {} tokens, but I couldn't DM the receipt. \
                     Please enable direct messages from server members.",
                    ctx.author().mention(),
                    receipt.item.name,
                    receipt.item.price
                ))
                .await?;
            }
        }

        log_purchase(ctx, &receipt).await;
        Ok(())
    }

    /// Shows your most recent transactions, newest first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn transactions(
        ctx: Context<'_>,
        #[description = "Number of transactions to show (1-10, default 5)"] limit: Option<i64>,
    ) -> Result<()> {
        let user_id = ctx.author().id.to_string();
        let records = economy::recent_transactions(&ctx.data().ledger, &user_id, limit)?;

        if records.is_empty() {
            ctx.send(
                poise::CreateReply::default()
                    .content("📜 You have no transactions yet.")
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }

        let mut body = String::new();
        for record in &records {
            writeln!(&mut body, "{}", format_transaction(record))?;
        }

        let embed = serenity::CreateEmbed::default()
            .title("📜 Recent Transactions")
            .description(body)
            .color(BALANCE_COLOR)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Showing {} transaction{}",
                records.len(),
                if records.len() == 1 { "" } else { "s" }
            )));

        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Lists the available passes and what they include.
    #[poise::command(slash_command, prefix_command)]
    pub async fn passes(ctx: Context<'_>) -> Result<()> {
        let passes = ctx.data().catalog.passes();

        if passes.is_empty() {
            ctx.say("No passes are available right now.").await?;
            return Ok(());
        }

        let mut embed_fields = Vec::new();
        for pass in passes {
            let mut value = String::new();
            writeln!(&mut value, "{}", pass.description)?;
            writeln!(&mut value, "**Price:** {}", pass.price)?;
            writeln!(&mut value, "**Monthly Tokens:** {}", pass.monthly_tokens)?;
            writeln!(&mut value, "**Entry Bonus:** {}", pass.entry_bonus)?;
            writeln!(&mut value, "**Discount:** {}", pass.discount)?;
            write!(&mut value, "**Role:** {}", pass.role)?;
            embed_fields.push((pass.name.clone(), value, false));
        }

        let embed = serenity::CreateEmbed::default()
            .title("🎟️ Passes")
            .description("Passes are handled by staff. Open a ticket to get one.")
            .color(RECEIPT_COLOR)
            .fields(embed_fields);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    fn receipt_embed(receipt: &PurchaseReceipt) -> serenity::CreateEmbed {
        serenity::CreateEmbed::default()
            .title("🧾 Purchase Confirmation")
            .description(format!("You bought **{}**.", receipt.item.name))
            .color(RECEIPT_COLOR)
            .field("Price", format!("{} tokens", receipt.item.price), true)
            .field("Remaining Balance", format!("{} tokens", receipt.balance), true)
            .field("Item", receipt.item.description.clone(), false)
    }

    async fn log_purchase(ctx: Context<'_>, receipt: &PurchaseReceipt) {
        let Some(channel_id) = ctx.data().settings.log_channel_id else {
            return;
        };

        let line = format!(
            "🛒 {} bought **{}** for {} tokens (balance: {})",
            ctx.author().mention(),
            receipt.item.name,
            receipt.item.price,
            receipt.balance
        );
        if let Err(e) = serenity::ChannelId::new(channel_id)
            .say(ctx.http(), line)
            .await
        {
            warn!("Failed to post purchase log: {}", e);
        }
    }

    /// One line of the transaction history.
    pub(crate) fn format_transaction(record: &Transaction) -> String {
        format!(
            "`{:+}` {} · balance {} · <t:{}:R>",
            record.amount,
            record.reason,
            record.balance,
            record.timestamp.timestamp()
        )
    }
}

// Re-export all commands
pub use inner::*;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::inner::format_transaction;
    use crate::entities::Transaction;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_transaction_signs_amount() {
        let record = Transaction {
            user_id: "1".to_string(),
            amount: -300,
            reason: "Purchased VIP Role".to_string(),
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            balance: 200,
        };
        assert_eq!(
            format_transaction(&record),
            "`-300` Purchased VIP Role · balance 200 · <t:1700000000:R>"
        );

        let credit = Transaction {
            amount: 64,
            ..record
        };
        assert!(format_transaction(&credit).starts_with("`+64`"));
    }
}
