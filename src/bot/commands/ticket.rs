//! Ticket Discord command - posts the "Open Ticket" panel.
//!
//! Everything after the panel is posted (the form, channel creation, closing) is handled
//! by the interaction router.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::interactions},
        errors::Result,
    };
    use poise::serenity_prelude::{self as serenity, Mentionable};
    use tracing::info;

    const PANEL_COLOR: u32 = 0x0057_F287; // Green

    /// Posts the ticket panel to the ticket channel (or this channel if none is configured).
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn setup_ticket(ctx: Context<'_>) -> Result<()> {
        let channel_id = ctx
            .data()
            .settings
            .ticket_channel_id
            .map_or_else(|| ctx.channel_id(), serenity::ChannelId::new);

        let embed = serenity::CreateEmbed::default()
            .title("Create a Ticket")
            .description("Click the button below to open a ticket and get assistance.")
            .color(PANEL_COLOR);

        channel_id
            .send_message(
                ctx.http(),
                serenity::CreateMessage::new()
                    .embed(embed)
                    .components(vec![serenity::CreateActionRow::Buttons(vec![
                        interactions::open_ticket_button(),
                    ])]),
            )
            .await?;

        info!("Ticket panel posted in channel {}", channel_id);
        ctx.send(
            poise::CreateReply::default()
                .content(format!("✅ Ticket panel posted in {}.", channel_id.mention()))
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
