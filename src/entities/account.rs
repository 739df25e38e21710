//! Account entity - Per-user balances and activity counters.
//!
//! Accounts are created lazily the first time a user is referenced and are never deleted.
//! `tokens` is the spendable currency, `points` the pending counter earned from chat activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account record stored in `accounts.json`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    /// Spendable token balance
    pub tokens: u64,
    /// Points earned since the last conversion
    pub points: u64,
    /// Cumulative words credited from chat activity
    pub word_count: u64,
    /// Names of passes held by the user
    pub passes: Vec<String>,
    /// When points were last converted and reset
    pub last_reset: Option<DateTime<Utc>>,
    /// When the user last claimed a pass grant
    pub last_claim: Option<DateTime<Utc>>,
}

/// Partial update merged into a stored [`Account`].
///
/// Only the fields set to `Some` are written.
#[derive(Clone, Debug, Default)]
pub struct AccountUpdate {
    /// New token balance
    pub tokens: Option<u64>,
    /// New point balance
    pub points: Option<u64>,
    /// New cumulative word count
    pub word_count: Option<u64>,
    /// Replacement pass list
    pub passes: Option<Vec<String>>,
    /// New last-reset timestamp
    pub last_reset: Option<DateTime<Utc>>,
    /// New last-claim timestamp
    pub last_claim: Option<DateTime<Utc>>,
}

impl Account {
    /// Merges the populated fields of `update` into this account.
    pub fn apply(&mut self, update: AccountUpdate) {
        if let Some(tokens) = update.tokens {
            self.tokens = tokens;
        }
        if let Some(points) = update.points {
            self.points = points;
        }
        if let Some(word_count) = update.word_count {
            self.word_count = word_count;
        }
        if let Some(passes) = update.passes {
            self.passes = passes;
        }
        if update.last_reset.is_some() {
            self.last_reset = update.last_reset;
        }
        if update.last_claim.is_some() {
            self.last_claim = update.last_claim;
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_apply_only_touches_set_fields() {
        let mut account = Account {
            tokens: 40,
            points: 12,
            word_count: 60,
            ..Default::default()
        };

        account.apply(AccountUpdate {
            tokens: Some(10),
            ..Default::default()
        });

        assert_eq!(account.tokens, 10);
        assert_eq!(account.points, 12);
        assert_eq!(account.word_count, 60);
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let account: Account = serde_json::from_str(r#"{"tokens": 5}"#).unwrap();
        assert_eq!(account.tokens, 5);
        assert_eq!(account.points, 0);
        assert!(account.passes.is_empty());
        assert!(account.last_reset.is_none());
    }
}
