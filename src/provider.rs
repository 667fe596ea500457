use crate::types::GenerationParams;

/// A trait for providers that can generate text for a prompt.
///
/// Every outcome — generated text, upstream failure, exhausted retries — is
/// returned as plain text. Failures are rendered into descriptive strings
/// inside the provider and never surface as errors to the HTTP layer.
#[async_trait::async_trait]
pub trait TextProvider: Send + Sync + 'static {
    /// Generate text for the given parameters.
    async fn generate(&self, params: &GenerationParams) -> String;
}
