//! Button and modal routing for the ticket flow.
//!
//! Ticket panels outlive the process that posted them, so their buttons cannot rely on
//! in-memory collectors. Every persistent component carries a fixed custom ID, and
//! [`InteractionRoute`] maps that ID to the handler that serves it.

use crate::{
    bot::BotData,
    core::ticket::{self, TicketRequest},
    errors::{Error, Result},
};
use poise::serenity_prelude::{self as serenity, Mentionable};
use tracing::{info, warn};

const TEAM_NAME_FIELD: &str = "team_name";
const ISSUE_FIELD: &str = "issue";
const PROOF_FIELD: &str = "proof";

/// Embed color for ticket details
const TICKET_COLOR: u32 = 0x0034_98DB;

/// Persistent interactions the bot responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionRoute {
    /// "Open Ticket" button on the ticket panel
    OpenTicket,
    /// Submission of the ticket form modal
    SubmitTicket,
    /// "Close Ticket" button inside a ticket channel
    CloseTicket,
}

const ROUTES: &[(&str, InteractionRoute)] = &[
    ("ticket:open", InteractionRoute::OpenTicket),
    ("ticket:form", InteractionRoute::SubmitTicket),
    ("ticket:close", InteractionRoute::CloseTicket),
];

impl InteractionRoute {
    /// Resolves a component or modal custom ID.
    #[must_use]
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        ROUTES
            .iter()
            .find(|(id, _)| *id == custom_id)
            .map(|(_, route)| *route)
    }

    /// Custom ID attached to components for this route.
    #[must_use]
    pub fn custom_id(self) -> &'static str {
        ROUTES
            .iter()
            .find(|(_, route)| *route == self)
            .map_or("", |(id, _)| *id)
    }
}

/// Routes an interaction to its handler. Unknown IDs are ignored so collectors can
/// pick them up.
pub async fn dispatch(
    ctx: &serenity::Context,
    interaction: &serenity::Interaction,
    data: &BotData,
) -> Result<()> {
    match interaction {
        serenity::Interaction::Component(component) => {
            match InteractionRoute::from_custom_id(&component.data.custom_id) {
                Some(InteractionRoute::OpenTicket) => open_ticket_form(ctx, component).await,
                Some(InteractionRoute::CloseTicket) => close_ticket(ctx, component).await,
                Some(InteractionRoute::SubmitTicket) | None => Ok(()),
            }
        }
        serenity::Interaction::Modal(modal) => {
            match InteractionRoute::from_custom_id(&modal.data.custom_id) {
                Some(InteractionRoute::SubmitTicket) => submit_ticket(ctx, modal, data).await,
                _ => Ok(()),
            }
        }
        _ => Ok(()),
    }
}

/// Button that opens the ticket form.
#[must_use]
pub fn open_ticket_button() -> serenity::CreateButton {
    serenity::CreateButton::new(InteractionRoute::OpenTicket.custom_id())
        .label("Open Ticket")
        .style(serenity::ButtonStyle::Success)
}

fn close_ticket_button() -> serenity::CreateButton {
    serenity::CreateButton::new(InteractionRoute::CloseTicket.custom_id())
        .label("Close Ticket")
        .style(serenity::ButtonStyle::Danger)
}

async fn open_ticket_form(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
) -> Result<()> {
    let field = |style, label: &str, id: &str, required| {
        serenity::CreateActionRow::InputText(
            serenity::CreateInputText::new(style, label, id).required(required),
        )
    };

    let modal = serenity::CreateModal::new(InteractionRoute::SubmitTicket.custom_id(), "Open Ticket")
        .components(vec![
            field(
                serenity::InputTextStyle::Short,
                "What is your team name?",
                TEAM_NAME_FIELD,
                true,
            ),
            field(
                serenity::InputTextStyle::Paragraph,
                "What is the issue?",
                ISSUE_FIELD,
                true,
            ),
            field(
                serenity::InputTextStyle::Short,
                "Proof (if any, or say 'Sent screenshot')",
                PROOF_FIELD,
                false,
            ),
        ]);

    component
        .create_response(&ctx.http, serenity::CreateInteractionResponse::Modal(modal))
        .await?;
    Ok(())
}

async fn submit_ticket(
    ctx: &serenity::Context,
    modal: &serenity::ModalInteraction,
    data: &BotData,
) -> Result<()> {
    let components = &modal.data.components;
    let request = TicketRequest::new(
        modal_value(components, TEAM_NAME_FIELD).unwrap_or_default(),
        modal_value(components, ISSUE_FIELD).unwrap_or_default(),
        modal_value(components, PROOF_FIELD),
    );

    let request = match request {
        Ok(request) => request,
        Err(e @ Error::InvalidTicket { .. }) => {
            return reply_ephemeral(ctx, modal, format!("❌ {e}")).await;
        }
        Err(e) => return Err(e),
    };

    let Some(guild_id) = modal.guild_id else {
        return reply_ephemeral(ctx, modal, "❌ Tickets can only be opened inside a server.").await;
    };

    // Channel creation can take longer than the interaction deadline
    modal.defer_ephemeral(&ctx.http).await?;

    let suffix = {
        let mut rng = rand::thread_rng();
        ticket::random_suffix(&mut rng)
    };
    let channel_name = ticket::channel_name(&request.team_name, suffix);

    let view = serenity::Permissions::VIEW_CHANNEL
        | serenity::Permissions::SEND_MESSAGES
        | serenity::Permissions::ATTACH_FILES;
    let mut permissions = vec![
        serenity::PermissionOverwrite {
            allow: serenity::Permissions::empty(),
            deny: serenity::Permissions::VIEW_CHANNEL,
            kind: serenity::PermissionOverwriteType::Role(serenity::RoleId::new(guild_id.get())),
        },
        serenity::PermissionOverwrite {
            allow: view,
            deny: serenity::Permissions::empty(),
            kind: serenity::PermissionOverwriteType::Member(modal.user.id),
        },
    ];

    match find_role(ctx, guild_id, &data.settings.staff_role_name).await? {
        Some(role_id) => permissions.push(serenity::PermissionOverwrite {
            allow: view,
            deny: serenity::Permissions::empty(),
            kind: serenity::PermissionOverwriteType::Role(role_id),
        }),
        None => warn!(
            "Staff role '{}' not found in guild {}",
            data.settings.staff_role_name, guild_id
        ),
    }

    let mut builder = serenity::CreateChannel::new(channel_name)
        .kind(serenity::ChannelType::Text)
        .permissions(permissions);
    if let Some(category_id) = data.settings.ticket_category_id {
        builder = builder.category(serenity::ChannelId::new(category_id));
    }
    let channel = guild_id.create_channel(&ctx.http, builder).await?;

    let embed = serenity::CreateEmbed::new()
        .title(format!("Ticket for {}", request.team_name))
        .description(request.description())
        .color(TICKET_COLOR)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Ticket opened by {}",
            modal.user.name
        )));
    channel
        .id
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
        .await?;

    modal
        .edit_response(
            &ctx.http,
            serenity::EditInteractionResponse::new().content(format!(
                "Your ticket has been created! Please provide your screenshot in {}.",
                channel.id.mention()
            )),
        )
        .await?;

    channel
        .id
        .send_message(
            &ctx.http,
            serenity::CreateMessage::new()
                .content("Ticket is now being processed.")
                .components(vec![serenity::CreateActionRow::Buttons(vec![
                    close_ticket_button(),
                ])]),
        )
        .await?;

    info!(
        "Opened ticket channel {} for team '{}' (user {})",
        channel.name, request.team_name, modal.user.id
    );
    Ok(())
}

async fn close_ticket(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
) -> Result<()> {
    component
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content("Ticket closed.")
                    .ephemeral(true),
            ),
        )
        .await?;

    component.channel_id.delete(&ctx.http).await?;
    info!(
        "Ticket channel {} closed by {}",
        component.channel_id, component.user.id
    );
    Ok(())
}

async fn reply_ephemeral(
    ctx: &serenity::Context,
    modal: &serenity::ModalInteraction,
    content: impl Into<String>,
) -> Result<()> {
    modal
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}

async fn find_role(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
    name: &str,
) -> Result<Option<serenity::RoleId>> {
    let roles = guild_id.roles(&ctx.http).await?;
    Ok(roles
        .into_values()
        .find(|role| role.name == name)
        .map(|role| role.id))
}

/// Value of the text input `field` in a submitted modal, if present.
fn modal_value<'a>(rows: &'a [serenity::ActionRow], field: &str) -> Option<&'a str> {
    rows.iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            serenity::ActionRowComponent::InputText(input) if input.custom_id == field => {
                input.value.as_deref()
            }
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_resolve_custom_ids() {
        assert_eq!(
            InteractionRoute::from_custom_id("ticket:open"),
            Some(InteractionRoute::OpenTicket)
        );
        assert_eq!(
            InteractionRoute::from_custom_id("ticket:close"),
            Some(InteractionRoute::CloseTicket)
        );
        assert_eq!(InteractionRoute::from_custom_id("12345next"), None);
    }

    #[test]
    fn test_custom_id_round_trips_every_route() {
        for route in [
            InteractionRoute::OpenTicket,
            InteractionRoute::SubmitTicket,
            InteractionRoute::CloseTicket,
        ] {
            assert_eq!(InteractionRoute::from_custom_id(route.custom_id()), Some(route));
        }
    }
}
