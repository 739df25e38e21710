//! Runtime settings loaded from environment variables.
//!
//! Everything except the bot token lives here. The token is read directly before the
//! client starts so it never sits in shared state.

use crate::errors::{Error, Result};
use std::path::PathBuf;

const DEFAULT_LEDGER_DIR: &str = "data";
const DEFAULT_CATALOG_PATH: &str = "config.toml";
const DEFAULT_STAFF_ROLE: &str = "Ticket Staff";

/// Settings shared with every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding the ledger JSON documents (`LEDGER_DIR`)
    pub ledger_dir: PathBuf,
    /// Path of the catalog TOML file (`CATALOG_PATH`)
    pub catalog_path: PathBuf,
    /// Channel that receives a line per purchase (`LOG_CHANNEL_ID`)
    pub log_channel_id: Option<u64>,
    /// Channel the "Open Ticket" panel is posted to (`TICKET_CHANNEL_ID`)
    pub ticket_channel_id: Option<u64>,
    /// Category new ticket channels are created under (`TICKET_CATEGORY_ID`)
    pub ticket_category_id: Option<u64>,
    /// Name of the role that can see tickets (`STAFF_ROLE_NAME`)
    pub staff_role_name: String,
    /// Guild for fast command registration during development (`DEV_GUILD_ID`)
    pub dev_guild_id: Option<u64>,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if an ID variable is set but not a valid number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            ledger_dir: lookup("LEDGER_DIR")
                .unwrap_or_else(|| DEFAULT_LEDGER_DIR.to_string())
                .into(),
            catalog_path: lookup("CATALOG_PATH")
                .unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string())
                .into(),
            log_channel_id: parse_id("LOG_CHANNEL_ID", lookup("LOG_CHANNEL_ID"))?,
            ticket_channel_id: parse_id("TICKET_CHANNEL_ID", lookup("TICKET_CHANNEL_ID"))?,
            ticket_category_id: parse_id("TICKET_CATEGORY_ID", lookup("TICKET_CATEGORY_ID"))?,
            staff_role_name: lookup("STAFF_ROLE_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STAFF_ROLE.to_string()),
            dev_guild_id: parse_id("DEV_GUILD_ID", lookup("DEV_GUILD_ID"))?,
        })
    }
}

fn parse_id(key: &str, value: Option<String>) -> Result<Option<u64>> {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };

    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(Error::Config {
            message: format!("{key} must be a Discord ID, got '{value}'"),
        }),
        Ok(id) => Ok(Some(id)),
    }
}
