//! Economy business logic - Points from activity, tokens from points, and shop purchases.
//!
//! All functions operate directly on the [`Ledger`] and return typed results. Notifying
//! users about the outcome is left to the bot layer. Randomness is passed in so callers
//! decide between a thread RNG in production and a seeded RNG in tests.

use crate::{
    core::{
        catalog::{Catalog, CatalogItem},
        ledger::{Ledger, WORDS_PER_POINT},
    },
    entities::{AccountUpdate, Purchase, Transaction},
    errors::{Error, Result},
};
use chrono::Utc;
use rand::Rng;
use std::ops::RangeInclusive;
use tracing::info;

/// Point total at which points are converted to tokens.
pub const CONVERSION_THRESHOLD: u64 = 150;

/// Range the conversion token bonus is drawn from, inclusive on both ends.
pub const CONVERSION_BONUS: RangeInclusive<u64> = 60..=75;

/// Transaction reason recorded for a points conversion.
pub const CONVERSION_REASON: &str = "Weekly points conversion";

/// Transaction reason for an administrator grant.
pub const GRANT_REASON: &str = "Admin grant";

/// Transaction reason for an administrator removal.
pub const REMOVAL_REASON: &str = "Admin removal";

/// Default number of entries returned by the history query.
pub const DEFAULT_HISTORY_LIMIT: i64 = 5;
/// Upper bound for the history query limit.
pub const MAX_HISTORY_LIMIT: i64 = 10;

/// Result of crediting a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityOutcome {
    /// Points awarded for the message
    pub points_earned: u64,
    /// Present when the award pushed the user over the conversion threshold
    pub conversion: Option<Conversion>,
}

/// A completed points-to-tokens conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Points that were reset to zero
    pub points_converted: u64,
    /// Tokens credited
    pub tokens_awarded: u64,
    /// Token balance after the credit
    pub balance: u64,
}

/// A completed shop purchase.
#[derive(Debug, Clone)]
pub struct PurchaseReceipt {
    /// The item bought
    pub item: CatalogItem,
    /// Token balance after the debit
    pub balance: u64,
    /// Ledger entry for the debit
    pub transaction: Transaction,
    /// Purchase record
    pub purchase: Purchase,
}

/// Points earned for a message: one point per five whitespace-separated words, rounded down.
#[must_use]
pub fn points_for_message(content: &str) -> u64 {
    let words = u64::try_from(content.split_whitespace().count()).unwrap_or(u64::MAX);
    words / WORDS_PER_POINT
}

/// Credits a chat message to `user_id` and converts points to tokens once the threshold is hit.
///
/// Messages worth zero points leave the ledger untouched.
pub fn record_activity<R: Rng>(
    ledger: &Ledger,
    user_id: &str,
    content: &str,
    rng: &mut R,
) -> Result<ActivityOutcome> {
    let points_earned = points_for_message(content);
    if points_earned == 0 {
        return Ok(ActivityOutcome {
            points_earned,
            conversion: None,
        });
    }

    ledger.add_points(user_id, points_earned)?;
    let conversion = convert_points(ledger, user_id, rng)?;

    Ok(ActivityOutcome {
        points_earned,
        conversion,
    })
}

/// Converts the user's points into a random token bonus if they have reached the threshold.
///
/// On conversion the points reset to zero and a transaction is recorded. Returns `None`
/// when the user is still below the threshold.
pub fn convert_points<R: Rng>(
    ledger: &Ledger,
    user_id: &str,
    rng: &mut R,
) -> Result<Option<Conversion>> {
    let points = ledger.get_points(user_id)?;
    if points < CONVERSION_THRESHOLD {
        return Ok(None);
    }

    let tokens_awarded = rng.gen_range(CONVERSION_BONUS);
    let account = ledger.get_account(user_id)?;
    let balance = account.tokens.saturating_add(tokens_awarded);

    ledger.update_account(
        user_id,
        AccountUpdate {
            tokens: Some(balance),
            points: Some(0),
            last_reset: Some(Utc::now()),
            ..Default::default()
        },
    )?;
    ledger.append_transaction(user_id, signed(tokens_awarded), CONVERSION_REASON)?;

    info!(
        "Converted {} points into {} tokens for user {}",
        points, tokens_awarded, user_id
    );

    Ok(Some(Conversion {
        points_converted: points,
        tokens_awarded,
        balance,
    }))
}

/// Buys `item_name` for `user_id`, debiting the item price from their tokens.
///
/// # Errors
/// - [`Error::ItemNotFound`] if the item is not in the catalog
/// - [`Error::InsufficientFunds`] if the user holds fewer tokens than the price;
///   the ledger is left unchanged
pub fn buy(
    ledger: &Ledger,
    catalog: &Catalog,
    user_id: &str,
    item_name: &str,
) -> Result<PurchaseReceipt> {
    let item = catalog
        .item(item_name)
        .ok_or_else(|| Error::ItemNotFound {
            name: item_name.to_string(),
        })?
        .clone();

    let account = ledger.get_account(user_id)?;
    if account.tokens < item.price {
        return Err(Error::InsufficientFunds {
            required: item.price,
            available: account.tokens,
        });
    }

    let balance = account.tokens - item.price;
    ledger.update_account(
        user_id,
        AccountUpdate {
            tokens: Some(balance),
            ..Default::default()
        },
    )?;
    let transaction = ledger.append_transaction(
        user_id,
        -signed(item.price),
        format!("Purchased {}", item.name),
    )?;
    let purchase = ledger.append_purchase(user_id, &item.name, item.price)?;

    info!(
        "User {} purchased '{}' for {} tokens",
        user_id, item.name, item.price
    );

    Ok(PurchaseReceipt {
        item,
        balance,
        transaction,
        purchase,
    })
}

/// Grants `amount` tokens to `user_id` and returns the new balance.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] if `amount` is not positive, or
/// [`Error::BalanceOverflow`] if the new balance would not fit in a `u64`.
pub fn give(ledger: &Ledger, user_id: &str, amount: i64) -> Result<u64> {
    let amount_u = validate_amount(amount)?;
    let account = ledger.get_account(user_id)?;
    let balance = credit(account.tokens, amount_u)?;

    ledger.update_account(
        user_id,
        AccountUpdate {
            tokens: Some(balance),
            ..Default::default()
        },
    )?;
    ledger.append_transaction(user_id, amount, GRANT_REASON)?;
    Ok(balance)
}

/// Removes `amount` tokens from `user_id` and returns the new balance.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] if `amount` is not positive, or
/// [`Error::InsufficientFunds`] if the user holds fewer tokens than `amount`.
pub fn remove(ledger: &Ledger, user_id: &str, amount: i64) -> Result<u64> {
    let amount_u = validate_amount(amount)?;
    let account = ledger.get_account(user_id)?;
    if account.tokens < amount_u {
        return Err(Error::InsufficientFunds {
            required: amount_u,
            available: account.tokens,
        });
    }

    let balance = account.tokens - amount_u;
    ledger.update_account(
        user_id,
        AccountUpdate {
            tokens: Some(balance),
            ..Default::default()
        },
    )?;
    ledger.append_transaction(user_id, -amount, REMOVAL_REASON)?;
    Ok(balance)
}

/// Grants `amount` points to `user_id` and returns the new point balance.
///
/// Point adjustments do not record a transaction and do not trigger a conversion.
///
/// # Errors
/// Same as [`give`].
pub fn give_points(ledger: &Ledger, user_id: &str, amount: i64) -> Result<u64> {
    let amount_u = validate_amount(amount)?;
    let account = ledger.get_account(user_id)?;
    let points = credit(account.points, amount_u)?;

    ledger.update_account(
        user_id,
        AccountUpdate {
            points: Some(points),
            ..Default::default()
        },
    )?;
    Ok(points)
}

/// Removes `amount` points from `user_id` and returns the new point balance.
pub fn remove_points(ledger: &Ledger, user_id: &str, amount: i64) -> Result<u64> {
    let amount_u = validate_amount(amount)?;
    let account = ledger.get_account(user_id)?;
    if account.points < amount_u {
        return Err(Error::InsufficientFunds {
            required: amount_u,
            available: account.points,
        });
    }

    let points = account.points - amount_u;
    ledger.update_account(
        user_id,
        AccountUpdate {
            points: Some(points),
            ..Default::default()
        },
    )?;
    Ok(points)
}

/// The most recent transactions for `user_id`, newest first.
///
/// `limit` defaults to 5 and is clamped to `1..=10`.
pub fn recent_transactions(
    ledger: &Ledger,
    user_id: &str,
    limit: Option<i64>,
) -> Result<Vec<Transaction>> {
    let limit = clamp_limit(limit.unwrap_or(DEFAULT_HISTORY_LIMIT), MAX_HISTORY_LIMIT);
    let history = ledger.transactions_for(user_id)?;
    Ok(history.into_iter().rev().take(limit).collect())
}

/// Clamps a user-supplied limit into `1..=max`.
#[must_use]
pub fn clamp_limit(limit: i64, max: i64) -> usize {
    usize::try_from(limit.clamp(1, max.max(1))).unwrap_or(1)
}

fn validate_amount(amount: i64) -> Result<u64> {
    if amount <= 0 {
        return Err(Error::InvalidAmount { amount });
    }
    u64::try_from(amount).map_err(|_| Error::InvalidAmount { amount })
}

fn credit(current: u64, amount: u64) -> Result<u64> {
    current
        .checked_add(amount)
        .ok_or(Error::BalanceOverflow { current, amount })
}

fn signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn words(count: usize) -> String {
        vec!["word"; count].join(" ")
    }

    #[test]
    fn test_points_for_message_floors() {
        assert_eq!(points_for_message(&words(23)), 4);
        assert_eq!(points_for_message(&words(4)), 0);
        assert_eq!(points_for_message(&words(5)), 1);
        assert_eq!(points_for_message(""), 0);
        assert_eq!(points_for_message("  spaced \n  out\twords  here and\n"), 1);
    }

    #[test]
    fn test_short_message_does_not_touch_ledger() -> Result<()> {
        let (ledger, _dir) = setup_test_ledger()?;
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = record_activity(&ledger, "1", &words(4), &mut rng)?;

        assert_eq!(outcome.points_earned, 0);
        assert!(outcome.conversion.is_none());
        assert!(ledger.list_accounts()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_activity_adds_points() -> Result<()> {
        let (ledger, _dir) = setup_test_ledger()?;
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = record_activity(&ledger, "1", &words(23), &mut rng)?;

        assert_eq!(outcome.points_earned, 4);
        assert!(outcome.conversion.is_none());
        let account = ledger.get_account("1")?;
        assert_eq!(account.points, 4);
        assert_eq!(account.word_count, 20);
        Ok(())
    }

    #[test]
    fn test_reaching_threshold_converts_points() -> Result<()> {
        let (ledger, _dir) = setup_test_ledger()?;
        seed_account(&ledger, "1", 10, 146)?;
        let mut rng = StdRng::seed_from_u64(7);

        let outcome = record_activity(&ledger, "1", &words(20), &mut rng)?;
        let conversion = outcome.conversion.unwrap();

        assert_eq!(conversion.points_converted, 150);
        assert!(CONVERSION_BONUS.contains(&conversion.tokens_awarded));

        let account = ledger.get_account("1")?;
        assert_eq!(account.points, 0);
        assert_eq!(account.tokens, 10 + conversion.tokens_awarded);
        assert!(account.last_reset.is_some());

        let history = ledger.transactions_for("1")?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].reason, CONVERSION_REASON);
        assert_eq!(history[0].amount, signed(conversion.tokens_awarded));
        assert_eq!(history[0].balance, account.tokens);
        Ok(())
    }

    #[test]
    fn test_below_threshold_does_not_convert() -> Result<()> {
        let (ledger, _dir) = setup_test_ledger()?;
        seed_account(&ledger, "1", 0, 149)?;
        let mut rng = StdRng::seed_from_u64(3);

        assert!(convert_points(&ledger, "1", &mut rng)?.is_none());
        assert_eq!(ledger.get_points("1")?, 149);
        assert!(ledger.transactions_for("1")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_conversion_bonus_stays_in_range() -> Result<()> {
        let (ledger, _dir) = setup_test_ledger()?;
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..50 {
            seed_account(&ledger, "1", 0, CONVERSION_THRESHOLD)?;
            let conversion = convert_points(&ledger, "1", &mut rng)?.unwrap();
            assert!((60..=75).contains(&conversion.tokens_awarded));
        }
        Ok(())
    }

    #[test]
    fn test_buy_debits_price_and_records() -> Result<()> {
        let (ledger, _dir) = setup_test_ledger()?;
        let catalog = sample_catalog();
        seed_account(&ledger, "1", 500, 0)?;

        let receipt = buy(&ledger, &catalog, "1", "VIP Role")?;

        assert_eq!(receipt.balance, 200);
        assert_eq!(ledger.get_account("1")?.tokens, 200);

        let history = ledger.transactions_for("1")?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].amount, -300);
        assert_eq!(history[0].reason, "Purchased VIP Role");
        assert_eq!(history[0].balance, 200);

        let purchases = ledger.purchases_for("1")?;
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].price, 300);
        assert_eq!(purchases[0].item, "VIP Role");
        Ok(())
    }

    #[test]
    fn test_buy_with_insufficient_funds_changes_nothing() -> Result<()> {
        let (ledger, _dir) = setup_test_ledger()?;
        let catalog = sample_catalog();
        seed_account(&ledger, "1", 299, 0)?;

        let result = buy(&ledger, &catalog, "1", "VIP Role");

        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientFunds {
                required: 300,
                available: 299
            }
        ));
        assert_eq!(ledger.get_account("1")?.tokens, 299);
        assert!(ledger.transactions_for("1")?.is_empty());
        assert!(ledger.purchases_for("1")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_buy_unknown_item() -> Result<()> {
        let (ledger, _dir) = setup_test_ledger()?;
        let catalog = sample_catalog();

        let result = buy(&ledger, &catalog, "1", "Golden Toaster");

        assert!(matches!(result.unwrap_err(), Error::ItemNotFound { .. }));
        // Lookup fails before the account is resolved
        assert!(ledger.list_accounts()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_buy_creates_account_lazily() -> Result<()> {
        let (ledger, _dir) = setup_test_ledger()?;
        let catalog = sample_catalog();

        let result = buy(&ledger, &catalog, "new", "Sticker Pack");

        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientFunds { available: 0, .. }
        ));
        assert!(ledger.list_accounts()?.contains_key("new"));
        Ok(())
    }

    #[test]
    fn test_give_records_transaction() -> Result<()> {
        let (ledger, _dir) = setup_test_ledger()?;

        let balance = give(&ledger, "1", 40)?;

        assert_eq!(balance, 40);
        let history = ledger.transactions_for("1")?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].amount, 40);
        assert_eq!(history[0].balance, 40);
        Ok(())
    }

    #[test]
    fn test_give_rejects_non_positive_amount() -> Result<()> {
        let (ledger, _dir) = setup_test_ledger()?;
        seed_account(&ledger, "1", 10, 0)?;

        for amount in [0, -5] {
            let result = give(&ledger, "1", amount);
            assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));
        }

        assert_eq!(ledger.get_account("1")?.tokens, 10);
        assert!(ledger.transactions_for("1")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_give_rejects_overflowing_balance() -> Result<()> {
        let (ledger, _dir) = setup_test_ledger()?;
        seed_account(&ledger, "1", u64::MAX - 10, u64::MAX - 10)?;

        assert!(matches!(
            give(&ledger, "1", 100).unwrap_err(),
            Error::BalanceOverflow {
                current,
                amount: 100
            } if current == u64::MAX - 10
        ));
        assert!(matches!(
            give_points(&ledger, "1", 100).unwrap_err(),
            Error::BalanceOverflow { amount: 100, .. }
        ));

        let account = ledger.get_account("1")?;
        assert_eq!(account.tokens, u64::MAX - 10);
        assert_eq!(account.points, u64::MAX - 10);
        assert!(ledger.transactions_for("1")?.is_empty());

        assert_eq!(give(&ledger, "1", 10)?, u64::MAX);
        Ok(())
    }

    #[test]
    fn test_remove_checks_balance() -> Result<()> {
        let (ledger, _dir) = setup_test_ledger()?;
        seed_account(&ledger, "1", 30, 0)?;

        let result = remove(&ledger, "1", 31);
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientFunds {
                required: 31,
                available: 30
            }
        ));

        assert_eq!(remove(&ledger, "1", 30)?, 0);
        let history = ledger.transactions_for("1")?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].amount, -30);
        assert_eq!(history[0].reason, REMOVAL_REASON);
        Ok(())
    }

    #[test]
    fn test_point_adjustments_skip_transactions() -> Result<()> {
        let (ledger, _dir) = setup_test_ledger()?;

        assert_eq!(give_points(&ledger, "1", 25)?, 25);
        assert_eq!(remove_points(&ledger, "1", 10)?, 15);
        assert!(matches!(
            remove_points(&ledger, "1", 16).unwrap_err(),
            Error::InsufficientFunds { .. }
        ));
        assert!(matches!(
            give_points(&ledger, "1", 0).unwrap_err(),
            Error::InvalidAmount { amount: 0 }
        ));

        assert_eq!(ledger.get_points("1")?, 15);
        assert!(ledger.transactions_for("1")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_recent_transactions_newest_first_and_clamped() -> Result<()> {
        let (ledger, _dir) = setup_test_ledger()?;
        for amount in 1..=12 {
            give(&ledger, "1", amount)?;
        }

        let recent = recent_transactions(&ledger, "1", Some(3))?;
        let amounts: Vec<i64> = recent.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![12, 11, 10]);

        assert_eq!(recent_transactions(&ledger, "1", Some(50))?.len(), 10);
        assert_eq!(recent_transactions(&ledger, "1", Some(0))?.len(), 1);
        assert_eq!(recent_transactions(&ledger, "1", None)?.len(), 5);
        Ok(())
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(-4, 25), 1);
        assert_eq!(clamp_limit(7, 25), 7);
        assert_eq!(clamp_limit(100, 25), 25);
    }
}
