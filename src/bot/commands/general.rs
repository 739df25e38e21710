//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't touch the ledger.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**TokenBuddy Help**\n\
        Chat in the server to earn points: every 5 words is 1 point. \
        Once you reach 150 points they are converted into 60-75 tokens.\n\n\
        **Economy Commands**\n\
        • `/balance` - Shows your tokens, points, and conversion progress.\n\
        • `/shop [category]` - Browse the shop.\n\
        • `/buy <item>` - Buy an item with tokens.\n\
        • `/transactions [limit]` - Shows your most recent transactions.\n\
        • `/passes` - Lists the available passes.\n\n\
        **Admin Commands**\n\
        • `/give <user> <amount>` / `/remove <user> <amount>` - Adjust tokens.\n\
        • `/givepoints <user> <amount>` / `/removepoints <user> <amount>` - Adjust points.\n\
        • `/pointslb [limit]` / `/tokenslb [limit]` - Leaderboards.\n\
        • `/setup_ticket` - Posts the ticket panel.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
