//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Administrator balance adjustments and leaderboards
pub mod admin;

/// Balance, purchase, and history commands
pub mod economy;

/// General utility commands
pub mod general;

/// Paginated shop browser
pub mod shop;

/// Ticket panel setup
pub mod ticket;

// Export commands
pub use admin::*;
pub use economy::*;
pub use general::*;
pub use shop::*;
pub use ticket::*;

use crate::{bot::BotData, errors::Error};

/// Every command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        ping(),
        help(),
        balance(),
        shop(),
        buy(),
        transactions(),
        passes(),
        give(),
        remove(),
        givepoints(),
        removepoints(),
        pointslb(),
        tokenslb(),
        setup_ticket(),
    ]
}
