/// Runtime settings loaded from environment variables
pub mod settings;

/// Shop catalog loading from config.toml
pub mod catalog;
