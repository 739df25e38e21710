//! Entity module - Contains the records persisted in the ledger documents.
//! Each entity is a plain serde struct; the ledger stores them keyed by Discord user ID.

pub mod account;
pub mod purchase;
pub mod transaction;

pub use account::{Account, AccountUpdate};
pub use purchase::Purchase;
pub use transaction::Transaction;
