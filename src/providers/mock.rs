use crate::provider::TextProvider;
use crate::types::GenerationParams;

/// Deterministic fallback responder used when no real provider is configured.
///
/// Echoes the first 50 characters of the prompt so the service stays usable
/// (and testable) without any credentials.
pub struct MockProvider;

#[async_trait::async_trait]
impl TextProvider for MockProvider {
    async fn generate(&self, params: &GenerationParams) -> String {
        let head: String = params.prompt.chars().take(50).collect();
        format!("[Mock Response] I received your prompt: '{head}...'. Please configure an AI provider.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_echoes_prompt() {
        let text = MockProvider
            .generate(&GenerationParams::new("hi"))
            .await;
        assert!(text.starts_with("[Mock Response] I received your prompt: 'hi...'"));
        assert!(text.ends_with("Please configure an AI provider."));
    }

    #[tokio::test]
    async fn test_mock_truncates_long_prompts() {
        let prompt = "x".repeat(80);
        let text = MockProvider
            .generate(&GenerationParams::new(prompt))
            .await;
        let expected = format!("[Mock Response] I received your prompt: '{}...'.", "x".repeat(50));
        assert!(text.starts_with(&expected));
    }
}
