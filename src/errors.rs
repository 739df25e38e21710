//! Unified error types for `TokenBuddy`.
//!
//! Domain errors (unknown items, insufficient balances, bad amounts) are turned into
//! user-facing replies by the bot layer. Infrastructure errors bubble up to the poise
//! `on_error` hook.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bot and its core logic.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested catalog item does not exist
    #[error("Item '{name}' not found in the shop")]
    ItemNotFound {
        /// Name that was looked up
        name: String,
    },

    /// Balance too low for the requested debit
    #[error("Insufficient funds: {required} required, {available} available")]
    InsufficientFunds {
        /// Amount the operation needed
        required: u64,
        /// Amount actually held
        available: u64,
    },

    /// Non-positive amount passed to an adjustment
    #[error("Invalid amount: {amount}. Amount must be greater than zero")]
    InvalidAmount {
        /// The rejected amount
        amount: i64,
    },

    /// Credit would push a balance past the largest storable value
    #[error("Balance overflow: cannot add {amount} to {current}")]
    BalanceOverflow {
        /// Balance before the credit
        current: u64,
        /// Amount that was requested
        amount: u64,
    },

    /// A direct message could not be delivered
    #[error("Could not send a direct message to user {user_id}")]
    NotificationFailed {
        /// Recipient that could not be reached
        user_id: String,
    },

    /// A ledger document could not be parsed
    #[error("Corrupt ledger document {path:?}: {message}")]
    StorageCorruption {
        /// Path of the unreadable document
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Ticket form was missing required fields
    #[error("Invalid ticket: {message}")]
    InvalidTicket {
        /// What was wrong with the form
        message: String,
    },

    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Error formatting a reply
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
