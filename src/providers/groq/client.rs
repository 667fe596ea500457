use std::time::Duration;

use reqwest::Client;
use tracing::{debug, error, info};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::error::Error;
use crate::provider::TextProvider;
use crate::types::GenerationParams;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// System instruction sent with every request.
const SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant. Provide clear, concise, and helpful responses.";

/// Groq chat-completions client.
///
/// Sends a fixed system instruction plus the prompt to a single configured
/// model, non-streaming. No retries: transient failures are rendered into
/// human-readable text immediately.
pub struct GroqProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqProvider {
    /// Create a new Groq provider.
    pub fn new(api_key: String, model: Option<String>) -> Result<Self, Error> {
        Self::new_with_base_url(api_key, model, DEFAULT_BASE_URL.to_string())
    }

    /// Create a new Groq provider with a custom base URL.
    pub fn new_with_base_url(
        api_key: String,
        model: Option<String>,
        base_url: String,
    ) -> Result<Self, Error> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(Self {
            client,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url,
        })
    }

    /// Build the chat-completions request body for a prompt.
    fn convert_request(&self, params: &GenerationParams) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(params.prompt.clone()),
            ],
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            stream: false,
        }
    }

    /// Issue the upstream call and extract the completion text.
    async fn chat_completion(&self, params: &GenerationParams) -> Result<String, Error> {
        debug!(model = %self.model, "Calling Groq chat completions");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.convert_request(params))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::provider(
                "Groq",
                format!("API error {status}: {error_text}"),
            ));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::provider("Groq", "response contained no choices"))?;

        let content = choice.message.content;
        let preview: String = content.chars().take(50).collect();
        info!(model = %self.model, preview = %preview, "Groq generation succeeded");
        Ok(content)
    }
}

/// Map an upstream failure message to the text returned to callers.
///
/// Case-insensitive substring match, mirroring the messages Groq's API
/// produces for the common failure classes.
pub fn describe_failure(message: &str) -> String {
    let lower = message.to_lowercase();
    if lower.contains("rate limit") {
        "Error: Rate limit exceeded. Please try again in a moment.".to_string()
    } else if lower.contains("authentication") {
        "Error: Invalid API key. Please check your GROQ_API_KEY.".to_string()
    } else if lower.contains("connection") {
        "Error: Connection failed. Please check your internet connection.".to_string()
    } else {
        format!("Error: {message}")
    }
}

#[async_trait::async_trait]
impl TextProvider for GroqProvider {
    async fn generate(&self, params: &GenerationParams) -> String {
        match self.chat_completion(params).await {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "Groq API error");
                describe_failure(&e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = GroqProvider::new("test-key".to_string(), None);
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().model, DEFAULT_MODEL);
    }

    #[test]
    fn test_request_conversion() {
        let provider =
            GroqProvider::new("test-key".to_string(), Some("llama3-70b-8192".to_string())).unwrap();
        let params = GenerationParams::new("Hello")
            .with_max_tokens(150)
            .with_temperature(0.2);

        let request = provider.convert_request(&params);
        assert_eq!(request.model, "llama3-70b-8192");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].content, "Hello");
        assert_eq!(request.max_tokens, 150);
        assert_eq!(request.temperature, 0.2);
        assert!(!request.stream);
    }

    #[test]
    fn test_describe_failure_rate_limit() {
        assert_eq!(
            describe_failure("429 Rate Limit reached for this model"),
            "Error: Rate limit exceeded. Please try again in a moment."
        );
    }

    #[test]
    fn test_describe_failure_authentication() {
        assert_eq!(
            describe_failure("Authentication error: invalid credentials"),
            "Error: Invalid API key. Please check your GROQ_API_KEY."
        );
    }

    #[test]
    fn test_describe_failure_connection() {
        assert_eq!(
            describe_failure("Connection refused by upstream"),
            "Error: Connection failed. Please check your internet connection."
        );
    }

    #[test]
    fn test_describe_failure_generic() {
        assert_eq!(
            describe_failure("something unexpected"),
            "Error: something unexpected"
        );
    }
}
