//! Leaderboards - Ranking accounts by points or tokens.
//!
//! Rankings are computed over every account in the ledger. Sorting is stable, so accounts
//! with equal values keep the ledger's iteration order, which is the order the accounts
//! were created in.

use crate::{
    core::{economy::clamp_limit, ledger::AccountMap, ledger::Ledger},
    entities::Account,
    errors::Result,
};

/// Default number of leaderboard entries.
pub const DEFAULT_LIMIT: i64 = 10;
/// Maximum number of leaderboard entries.
pub const MAX_LIMIT: i64 = 25;

/// Balance a leaderboard is ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    /// Pending points
    Points,
    /// Spendable tokens
    Tokens,
}

impl Ranking {
    /// Human-readable unit name
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Points => "points",
            Self::Tokens => "tokens",
        }
    }

    const fn value(self, account: &Account) -> u64 {
        match self {
            Self::Points => account.points,
            Self::Tokens => account.tokens,
        }
    }
}

/// A single leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// One-based position
    pub rank: usize,
    /// Discord user ID
    pub user_id: String,
    /// Ranked balance
    pub value: u64,
}

/// Ranks `accounts` by `ranking`, descending, returning at most `limit` entries.
///
/// `limit` is clamped to `1..=25`.
#[must_use]
pub fn rank_accounts(accounts: AccountMap, ranking: Ranking, limit: i64) -> Vec<LeaderboardEntry> {
    let limit = clamp_limit(limit, MAX_LIMIT);
    let mut rows: Vec<(String, u64)> = accounts
        .into_iter()
        .map(|(user_id, account)| {
            let value = ranking.value(&account);
            (user_id, value)
        })
        .collect();

    rows.sort_by(|a, b| b.1.cmp(&a.1));

    rows.into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, (user_id, value))| LeaderboardEntry {
            rank: index + 1,
            user_id,
            value,
        })
        .collect()
}

/// Top accounts by points.
pub fn top_by_points(ledger: &Ledger, limit: Option<i64>) -> Result<Vec<LeaderboardEntry>> {
    Ok(rank_accounts(
        ledger.list_accounts()?,
        Ranking::Points,
        limit.unwrap_or(DEFAULT_LIMIT),
    ))
}

/// Top accounts by tokens.
pub fn top_by_tokens(ledger: &Ledger, limit: Option<i64>) -> Result<Vec<LeaderboardEntry>> {
    Ok(rank_accounts(
        ledger.list_accounts()?,
        Ranking::Tokens,
        limit.unwrap_or(DEFAULT_LIMIT),
    ))
}

/// Display name used when a user ID cannot be resolved.
#[must_use]
pub fn fallback_name(user_id: &str) -> String {
    format!("User {user_id}")
}
