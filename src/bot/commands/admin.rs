//! Administrator Discord commands - balance adjustments and leaderboards.
//!
//! All commands here require the Administrator permission. Token adjustments are recorded
//! as transactions; point adjustments are not.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        core::{
            economy,
            leaderboard::{self, LeaderboardEntry, Ranking},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude::{self as serenity, Mentionable};
    use std::fmt::Write;

    const LEADERBOARD_COLOR: u32 = 0x00E6_7E22;

    /// Gives tokens to a user.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn give(
        ctx: Context<'_>,
        #[description = "User to give tokens to"] user: serenity::User,
        #[description = "Number of tokens to give"] amount: i64,
    ) -> Result<()> {
        match economy::give(&ctx.data().ledger, &user.id.to_string(), amount) {
            Ok(balance) => {
                ctx.say(format!(
                    "✅ Gave {amount} tokens to {}. New balance: {balance} tokens.",
                    user.mention()
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_rejection(ctx, e, "tokens").await,
        }
    }

    /// Removes tokens from a user.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn remove(
        ctx: Context<'_>,
        #[description = "User to remove tokens from"] user: serenity::User,
        #[description = "Number of tokens to remove"] amount: i64,
    ) -> Result<()> {
        match economy::remove(&ctx.data().ledger, &user.id.to_string(), amount) {
            Ok(balance) => {
                ctx.say(format!(
                    "✅ Removed {amount} tokens from {}. New balance: {balance} tokens.",
                    user.mention()
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_rejection(ctx, e, "tokens").await,
        }
    }

    /// Gives points to a user.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn givepoints(
        ctx: Context<'_>,
        #[description = "User to give points to"] user: serenity::User,
        #[description = "Number of points to give"] amount: i64,
    ) -> Result<()> {
        match economy::give_points(&ctx.data().ledger, &user.id.to_string(), amount) {
            Ok(points) => {
                ctx.say(format!(
                    "✅ Gave {amount} points to {}. New total: {points} points.",
                    user.mention()
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_rejection(ctx, e, "points").await,
        }
    }

    /// Removes points from a user.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn removepoints(
        ctx: Context<'_>,
        #[description = "User to remove points from"] user: serenity::User,
        #[description = "Number of points to remove"] amount: i64,
    ) -> Result<()> {
        match economy::remove_points(&ctx.data().ledger, &user.id.to_string(), amount) {
            Ok(points) => {
                ctx.say(format!(
                    "✅ Removed {amount} points from {}. New total: {points} points.",
                    user.mention()
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_rejection(ctx, e, "points").await,
        }
    }

    /// Shows the users with the most points.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn pointslb(
        ctx: Context<'_>,
        #[description = "Number of entries to show (1-25, default 10)"] limit: Option<i64>,
    ) -> Result<()> {
        let entries = leaderboard::top_by_points(&ctx.data().ledger, limit)?;
        send_leaderboard(ctx, "🏆 Points Leaderboard", Ranking::Points, &entries).await
    }

    /// Shows the users with the most tokens.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn tokenslb(
        ctx: Context<'_>,
        #[description = "Number of entries to show (1-25, default 10)"] limit: Option<i64>,
    ) -> Result<()> {
        let entries = leaderboard::top_by_tokens(&ctx.data().ledger, limit)?;
        send_leaderboard(ctx, "🏆 Token Leaderboard", Ranking::Tokens, &entries).await
    }

    /// Answers a rejected adjustment in the channel, or passes other errors on.
    async fn reply_rejection(ctx: Context<'_>, error: Error, unit: &str) -> Result<()> {
        match error {
            Error::InvalidAmount { .. } => {
                ctx.say("❌ Invalid amount: must be greater than zero").await?;
                Ok(())
            }
            Error::InsufficientFunds {
                required,
                available,
            } => {
                ctx.say(format!(
                    "❌ Cannot remove {required} {unit}: the user only has {available}."
                ))
                .await?;
                Ok(())
            }
            Error::BalanceOverflow { current, amount } => {
                ctx.say(format!(
                    "❌ Cannot add {amount} {unit}: the user already has {current}."
                ))
                .await?;
                Ok(())
            }
            e => Err(e),
        }
    }

    async fn send_leaderboard(
        ctx: Context<'_>,
        title: &str,
        ranking: Ranking,
        entries: &[LeaderboardEntry],
    ) -> Result<()> {
        if entries.is_empty() {
            ctx.say("No accounts yet.").await?;
            return Ok(());
        }

        let mut body = String::new();
        for entry in entries {
            let name = display_name(ctx, &entry.user_id).await;
            writeln!(
                &mut body,
                "**{}.** {} - {} {}",
                entry.rank,
                name,
                entry.value,
                ranking.unit()
            )?;
        }

        let embed = serenity::CreateEmbed::default()
            .title(title)
            .description(body)
            .color(LEADERBOARD_COLOR);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Resolves a user ID to a Discord username, falling back to a placeholder.
    async fn display_name(ctx: Context<'_>, user_id: &str) -> String {
        if let Some(id) = user_id.parse::<u64>().ok().filter(|id| *id != 0) {
            if let Ok(user) = serenity::UserId::new(id).to_user(ctx.serenity_context()).await {
                return user.name;
            }
        }
        leaderboard::fallback_name(user_id)
    }
}

// Re-export all commands
pub use inner::*;
