use dotenvy::dotenv;
use std::env;
use token_buddy::{
    bot::{self, BotData},
    config::{catalog, settings::Settings},
    core::{catalog::Catalog, ledger::Ledger},
    errors::{Error, Result},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env file first so RUST_LOG can come from it
    dotenv().ok(); // Non-fatal, env vars can be set externally

    // 2. Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    info!("Attempted to load .env file.");

    // 3. Load runtime settings
    let settings = Settings::from_env()
        .inspect_err(|e| error!("Critical error loading settings: {}", e))?;

    // 4. Load the shop catalog
    let catalog = catalog::load_config(&settings.catalog_path)
        .and_then(Catalog::from_config)
        .inspect(|c| info!("Loaded catalog with {} items.", c.items().len()))
        .inspect_err(|e| error!("Failed to load catalog: {}", e))?;

    // 5. Open the ledger
    let ledger = Ledger::open(&settings.ledger_dir)
        .inspect(|l| info!("Ledger opened at {:?}.", l.dir()))
        .inspect_err(|e| error!("Failed to open ledger: {}", e))?;

    // 6. Run the bot
    // DISCORD_BOT_TOKEN is loaded here, directly before use, not stored in Settings
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(ledger, catalog, settings)).await
}
