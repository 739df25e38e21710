//! Gateway event handling.
//!
//! Chat messages feed the points economy; component and modal interactions are handed
//! to the interaction router.

use crate::{
    bot::{BotData, handlers::interactions, notify},
    core::economy::{self, Conversion},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tracing::{debug, warn};

/// Entry point for every gateway event poise forwards to us.
pub async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<()> {
    match event {
        serenity::FullEvent::Message { new_message } => on_message(ctx, new_message, data).await,
        serenity::FullEvent::InteractionCreate { interaction } => {
            interactions::dispatch(ctx, interaction, data).await
        }
        _ => Ok(()),
    }
}

async fn on_message(ctx: &serenity::Context, message: &serenity::Message, data: &BotData) -> Result<()> {
    if message.author.bot || message.guild_id.is_none() {
        return Ok(());
    }

    let user_id = message.author.id.to_string();
    let outcome = {
        let mut rng = rand::thread_rng();
        economy::record_activity(&data.ledger, &user_id, &message.content, &mut rng)?
    };

    if outcome.points_earned > 0 {
        debug!("User {} earned {} points", user_id, outcome.points_earned);
    }

    if let Some(conversion) = outcome.conversion {
        let dm = serenity::CreateMessage::new().content(conversion_message(&conversion));
        // Conversion notices are best effort
        if let Err(e) = notify::send_direct_message(ctx, message.author.id, dm).await {
            warn!("{}", e);
        }
    }

    Ok(())
}

/// Text of the DM sent after a points conversion.
#[must_use]
pub fn conversion_message(conversion: &Conversion) -> String {
    format!(
        "🎉 Your {} points were converted into **{} tokens**! New balance: {} tokens.",
        conversion.points_converted, conversion.tokens_awarded, conversion.balance
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_message() {
        let conversion = Conversion {
            points_converted: 152,
            tokens_awarded: 64,
            balance: 100,
        };
        assert_eq!(
            conversion_message(&conversion),
            "🎉 Your 152 points were converted into **64 tokens**! New balance: 100 tokens."
        );
    }
}
