use tracing_subscriber::EnvFilter;

use llm_relay::server;
use llm_relay::{AppState, Error, ProviderFactory, Settings};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("llm_relay=debug,info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::from_env();
    let provider = ProviderFactory::from_settings(&settings)?;

    server::run(AppState::new(provider, settings)).await
}
