//! Core business logic - framework-agnostic ledger, economy, catalog, and ticket operations.
//!
//! Nothing in this module talks to Discord. The bot layer calls into it and turns the
//! typed results into replies.

/// Shop items, passes, and category paging
pub mod catalog;
/// Points, conversions, purchases, and admin adjustments
pub mod economy;
/// Points and token rankings
pub mod leaderboard;
/// JSON-backed account, transaction, and purchase storage
pub mod ledger;
/// Ticket form validation and channel naming
pub mod ticket;
