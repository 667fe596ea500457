//! A thin HTTP relay over multiple LLM providers.
//!
//! Forwards text-generation requests (chat, translation, summarization, code
//! generation) to Groq or the Hugging Face Inference API, selecting one
//! provider at startup and falling back to a deterministic mock responder
//! when neither is configured.

pub mod error;
pub mod types;
pub mod provider;
pub mod providers;
pub mod factory;
pub mod routes;
pub mod server;

// Re-export core types for easy usage
pub use error::Error;
pub use types::*;
pub use provider::TextProvider;
pub use providers::*;
pub use factory::{ActiveProvider, ProviderConfig, ProviderFactory, ProviderType};
pub use server::AppState;
