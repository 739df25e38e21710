//! Purchase entity - One record per successful shop purchase.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Purchase record stored in `purchases.json`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    /// Discord user ID of the buyer
    pub user_id: String,
    /// Catalog item name
    pub item: String,
    /// Price paid in tokens
    pub price: u64,
    /// When the purchase happened
    pub timestamp: DateTime<Utc>,
}
