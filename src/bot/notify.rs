//! Direct-message delivery.
//!
//! Users can turn off DMs from server members, so delivery failures are expected and
//! reported as [`Error::NotificationFailed`]. Each caller decides whether to surface
//! the failure or swallow it.

use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use tracing::debug;

/// Sends `message` to `user_id` as a direct message.
///
/// # Errors
/// Returns [`Error::NotificationFailed`] if Discord refuses the message.
pub async fn send_direct_message(
    cache_http: impl serenity::CacheHttp,
    user_id: serenity::UserId,
    message: serenity::CreateMessage,
) -> Result<()> {
    match user_id.direct_message(cache_http, message).await {
        Ok(_) => Ok(()),
        Err(e) => {
            debug!("Direct message to {} failed: {}", user_id, e);
            Err(Error::NotificationFailed {
                user_id: user_id.to_string(),
            })
        }
    }
}
