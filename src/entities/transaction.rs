//! Transaction entity - Immutable record of every token balance change.
//!
//! Each transaction carries the signed amount, a human-readable reason, and the
//! account's token balance right after the change was applied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transaction record stored in `transactions.json`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Discord user ID of the account
    pub user_id: String,
    /// Signed token amount (positive for credits, negative for debits)
    pub amount: i64,
    /// Why the balance changed, e.g. `"Purchased VIP Role"`
    pub reason: String,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
    /// Token balance after the change
    pub balance: u64,
}
