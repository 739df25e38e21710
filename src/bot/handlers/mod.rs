//! Discord interaction handlers
//!
//! This module provides handlers for gateway events and non-command interactions such as
//! autocomplete, button clicks, and modal submissions.

/// Autocomplete handlers for item and category names
pub mod autocomplete;
/// Gateway event entry point (messages, interactions)
pub mod events;
/// Button and modal routing for the ticket flow
pub mod interactions;
