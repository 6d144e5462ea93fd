use anyhow::Result;
use fetch_translations::{config, store::TranslationStore, sync};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when variables come from the deploy environment)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fetch_translations=info".parse()?),
        )
        .init();

    let config = config::Config::from_args_and_env(std::env::args().skip(1))?;
    info!(
        "Updating translations in {}",
        TranslationStore::for_destination(&config.destination)
            .dir()
            .display()
    );

    match sync::run(&config).await {
        Ok(outcome) => {
            info!("Done: {:?}", outcome);
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e.into())
        }
    }
}
