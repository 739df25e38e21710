//! Ledger store - Durable per-user accounts, transactions, and purchases.
//!
//! The ledger is three JSON documents in a single directory:
//! - `accounts.json`: map of user ID to [`Account`]
//! - `transactions.json`: map of user ID to an ordered list of [`Transaction`]
//! - `purchases.json`: map of user ID to an ordered list of [`Purchase`]
//!
//! Every operation reads the whole document, modifies it, and writes it back. There is no
//! locking: two writers racing on the same document can lose an update (last write wins).
//! Callers that need stronger guarantees must serialize access per user themselves.
//!
//! A document that is missing, empty, or fails to parse is treated as an empty mapping.
//! Parse failures are logged as [`Error::StorageCorruption`] and the next write replaces
//! the corrupt file.

use crate::{
    entities::{Account, AccountUpdate, Purchase, Transaction},
    errors::{Error, Result},
};
use chrono::Utc;
use indexmap::IndexMap;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

const ACCOUNTS_FILE: &str = "accounts.json";
const TRANSACTIONS_FILE: &str = "transactions.json";
const PURCHASES_FILE: &str = "purchases.json";

/// Words credited to the cumulative word count per point awarded.
pub const WORDS_PER_POINT: u64 = 5;

/// All accounts keyed by user ID, in the order they were first created
pub type AccountMap = IndexMap<String, Account>;
type TransactionMap = IndexMap<String, Vec<Transaction>>;
type PurchaseMap = IndexMap<String, Vec<Purchase>>;

/// Handle to the ledger directory.
#[derive(Debug, Clone)]
pub struct Ledger {
    dir: PathBuf,
}

impl Ledger {
    /// Opens the ledger rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!("Ledger opened at {:?}", dir);
        Ok(Self { dir })
    }

    /// Directory holding the ledger documents.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read_document<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T> {
        let path = self.path(file);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(T::default());
        }

        match parse_document(&path, &contents) {
            Ok(document) => Ok(document),
            Err(e) => {
                warn!("{e}; treating document as empty");
                Ok(T::default())
            }
        }
    }

    fn write_document<T: Serialize>(&self, file: &str, document: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        fs::write(self.path(file), json)?;
        Ok(())
    }

    /// Returns the account for `user_id`, creating and persisting a zeroed one if absent.
    pub fn get_account(&self, user_id: &str) -> Result<Account> {
        let mut accounts: AccountMap = self.read_document(ACCOUNTS_FILE)?;
        if let Some(account) = accounts.get(user_id) {
            return Ok(account.clone());
        }

        let account = Account::default();
        accounts.insert(user_id.to_string(), account.clone());
        self.write_document(ACCOUNTS_FILE, &accounts)?;
        debug!("Created account for user {}", user_id);
        Ok(account)
    }

    /// Merges `update` into the stored account, creating the account first if absent.
    ///
    /// Returns the account as written.
    pub fn update_account(&self, user_id: &str, update: AccountUpdate) -> Result<Account> {
        let mut accounts: AccountMap = self.read_document(ACCOUNTS_FILE)?;
        let account = accounts.entry(user_id.to_string()).or_default();
        account.apply(update);
        let updated = account.clone();
        self.write_document(ACCOUNTS_FILE, &accounts)?;
        Ok(updated)
    }

    /// Current point balance for `user_id`.
    pub fn get_points(&self, user_id: &str) -> Result<u64> {
        Ok(self.get_account(user_id)?.points)
    }

    /// Adds `delta` points and credits `delta * 5` words to the cumulative word count.
    pub fn add_points(&self, user_id: &str, delta: u64) -> Result<Account> {
        let mut accounts: AccountMap = self.read_document(ACCOUNTS_FILE)?;
        let account = accounts.entry(user_id.to_string()).or_default();
        account.points = account.points.saturating_add(delta);
        account.word_count = account
            .word_count
            .saturating_add(delta.saturating_mul(WORDS_PER_POINT));
        let updated = account.clone();
        self.write_document(ACCOUNTS_FILE, &accounts)?;
        Ok(updated)
    }

    /// Appends a transaction, snapshotting the account's current token balance.
    ///
    /// Call this after the balance change has been persisted so the snapshot reflects it.
    pub fn append_transaction(
        &self,
        user_id: &str,
        amount: i64,
        reason: impl Into<String>,
    ) -> Result<Transaction> {
        let balance = self.get_account(user_id)?.tokens;
        let record = Transaction {
            user_id: user_id.to_string(),
            amount,
            reason: reason.into(),
            timestamp: Utc::now(),
            balance,
        };

        let mut transactions: TransactionMap = self.read_document(TRANSACTIONS_FILE)?;
        transactions
            .entry(user_id.to_string())
            .or_default()
            .push(record.clone());
        self.write_document(TRANSACTIONS_FILE, &transactions)?;
        Ok(record)
    }

    /// Appends a purchase record.
    pub fn append_purchase(&self, user_id: &str, item: &str, price: u64) -> Result<Purchase> {
        let record = Purchase {
            user_id: user_id.to_string(),
            item: item.to_string(),
            price,
            timestamp: Utc::now(),
        };

        let mut purchases: PurchaseMap = self.read_document(PURCHASES_FILE)?;
        purchases
            .entry(user_id.to_string())
            .or_default()
            .push(record.clone());
        self.write_document(PURCHASES_FILE, &purchases)?;
        Ok(record)
    }

    /// All accounts, in document order.
    pub fn list_accounts(&self) -> Result<AccountMap> {
        self.read_document(ACCOUNTS_FILE)
    }

    /// Transactions for `user_id`, oldest first.
    pub fn transactions_for(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let mut transactions: TransactionMap = self.read_document(TRANSACTIONS_FILE)?;
        Ok(transactions.swap_remove(user_id).unwrap_or_default())
    }

    /// Purchases for `user_id`, oldest first.
    pub fn purchases_for(&self, user_id: &str) -> Result<Vec<Purchase>> {
        let mut purchases: PurchaseMap = self.read_document(PURCHASES_FILE)?;
        Ok(purchases.swap_remove(user_id).unwrap_or_default())
    }
}

fn parse_document<T: DeserializeOwned>(path: &Path, contents: &str) -> Result<T> {
    serde_json::from_str(contents).map_err(|e| Error::StorageCorruption {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
