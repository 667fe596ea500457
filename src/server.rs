//! Router assembly and the serve loop.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::error::Error;
use crate::factory::ActiveProvider;
use crate::routes;
use crate::types::Settings;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<ActiveProvider>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(provider: ActiveProvider, settings: Settings) -> Self {
        Self {
            provider: Arc::new(provider),
            settings: Arc::new(settings),
        }
    }
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let ai = Router::new()
        .route("/generate", post(routes::generate_text))
        .route("/provider", get(routes::provider_info))
        .route("/translate", post(routes::translate_text))
        .route("/summarize", post(routes::summarize_text))
        .route("/generate-code", post(routes::generate_code))
        .route("/chat", post(routes::chat_completion));

    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health_check))
        .route("/info", get(routes::api_info))
        .nest("/ai", ai)
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run(state: AppState) -> Result<(), Error> {
    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
