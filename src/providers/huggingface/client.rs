use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::catalog::{classify_prompt, ModelCatalog};
use crate::error::Error;
use crate::provider::TextProvider;
use crate::types::GenerationParams;

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";
const DEFAULT_MODEL: &str = "microsoft/DialoGPT-medium";

/// Returned when every candidate model failed.
const ALL_MODELS_UNAVAILABLE: &str =
    "Sorry, all models are currently unavailable. Please try again later.";

/// Substrings that mark a result as a failure rather than content.
const ERROR_INDICATORS: &[&str] = &["error", "404", "503", "not found", "unavailable", "loading"];

/// Text fields extracted from responses, in priority order.
const TEXT_FIELDS: &[&str] = &["generated_text", "summary_text", "translation_text"];

/// Hugging Face Inference API client.
///
/// Classifies the prompt into a task category, then walks that category's
/// candidate models (plus the configured default) until one returns a usable
/// result, sleeping a fixed delay between unsuccessful attempts.
pub struct HuggingFaceProvider {
    client: Client,
    api_key: Option<String>,
    default_model: String,
    catalog: ModelCatalog,
    base_url: String,
    retry_delay: Duration,
}

impl HuggingFaceProvider {
    /// Create a new Hugging Face provider.
    ///
    /// A missing API key is not fatal: requests are sent unauthenticated and
    /// a warning is logged.
    pub fn new(api_key: Option<String>, model: Option<String>) -> Result<Self, Error> {
        Self::new_with_base_url(api_key, model, DEFAULT_BASE_URL.to_string())
    }

    /// Create a new Hugging Face provider with a custom base URL.
    pub fn new_with_base_url(
        api_key: Option<String>,
        model: Option<String>,
        base_url: String,
    ) -> Result<Self, Error> {
        if api_key.is_none() {
            warn!("HUGGINGFACE_API_KEY not found, requests will be unauthenticated");
        }

        let client = Client::builder().timeout(Duration::from_secs(25)).build()?;

        Ok(Self {
            client,
            api_key,
            default_model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            catalog: ModelCatalog::default(),
            base_url,
            retry_delay: Duration::from_secs(1),
        })
    }

    /// Override the delay between candidate attempts.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Walk the candidate models for the prompt's category until one succeeds.
    async fn try_candidates(&self, params: &GenerationParams) -> String {
        let category = classify_prompt(&params.prompt);
        // The default model is appended even when the category list already
        // contains it, so it may be tried twice.
        let mut candidates: Vec<String> = self.catalog.candidates(category).to_vec();
        candidates.push(self.default_model.clone());

        debug!(
            category = category.as_str(),
            candidates = candidates.len(),
            "Selecting Hugging Face model"
        );

        for model in &candidates {
            let result = self.call_model(model, params).await;
            if !is_error_text(&result) {
                if *model != self.default_model {
                    return format!("[{} model: {}] {}", category.label(), model, result);
                }
                return result;
            }

            warn!(model = %model, result = %result, "Model attempt failed");
            tokio::time::sleep(self.retry_delay).await;
        }

        ALL_MODELS_UNAVAILABLE.to_string()
    }

    /// Call a single model, flattening every failure into an error string.
    async fn call_model(&self, model: &str, params: &GenerationParams) -> String {
        let payload = json!({
            "inputs": params.prompt,
            "parameters": build_parameters(model, params.max_tokens, params.temperature),
        });

        let mut request = self
            .client
            .post(format!("{}/{}", self.base_url, model))
            .json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return format!("Error: {e}"),
        };

        if response.status() != StatusCode::OK {
            return format!("Error {}", response.status().as_u16());
        }

        match response.json::<Value>().await {
            Ok(value) => extract_text(&value),
            Err(e) => format!("Error: {e}"),
        }
    }
}

#[async_trait::async_trait]
impl TextProvider for HuggingFaceProvider {
    async fn generate(&self, params: &GenerationParams) -> String {
        self.try_candidates(params).await
    }
}

/// Inference parameters vary with the model family, matched by name substring.
fn build_parameters(model: &str, max_tokens: u32, temperature: f32) -> Value {
    let name = model.to_lowercase();
    if name.contains("gpt") {
        json!({ "max_new_tokens": max_tokens })
    } else if name.contains("bart") || name.contains("pegasus") {
        json!({ "max_length": max_tokens, "min_length": 10 })
    } else {
        json!({ "max_length": max_tokens, "temperature": clamp_temperature(temperature) })
    }
}

/// Clamp the sampling temperature to the range the inference API accepts.
fn clamp_temperature(temperature: f32) -> f32 {
    temperature.clamp(0.1, 1.0)
}

/// Whether a result reads as a failure.
///
/// Purely textual: generated content that happens to contain one of the
/// indicators is misclassified as a failure.
fn is_error_text(text: &str) -> bool {
    let lower = text.to_lowercase();
    ERROR_INDICATORS.iter().any(|marker| lower.contains(marker))
}

/// Extract the generated text from the heterogeneous response shapes the
/// inference API produces.
fn extract_text(value: &Value) -> String {
    match value {
        Value::Array(items) => match items.first() {
            Some(item) => {
                if let Some(object) = item.as_object() {
                    for field in TEXT_FIELDS {
                        if let Some(text) = object.get(*field).and_then(Value::as_str) {
                            return text.trim().to_string();
                        }
                    }
                }
                stringify(item)
            }
            None => stringify(value),
        },
        Value::Object(object) => {
            for field in TEXT_FIELDS {
                if let Some(text) = object.get(*field).and_then(Value::as_str) {
                    return text.trim().to_string();
                }
            }
            stringify(value)
        }
        _ => stringify(value),
    }
}

/// String form of an arbitrary JSON value, trimmed; plain strings are
/// rendered without quotes.
fn stringify(value: &Value) -> String {
    match value.as_str() {
        Some(text) => text.trim().to_string(),
        None => value.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = HuggingFaceProvider::new(Some("hf_test".to_string()), None);
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().default_model, DEFAULT_MODEL);
    }

    #[test]
    fn test_gpt_parameters() {
        let params = build_parameters("gpt2", 80, 0.7);
        assert_eq!(params, json!({ "max_new_tokens": 80 }));

        let params = build_parameters("distilGPT2", 80, 0.7);
        assert_eq!(params, json!({ "max_new_tokens": 80 }));
    }

    #[test]
    fn test_summarization_parameters() {
        let params = build_parameters("facebook/bart-large-cnn", 120, 0.7);
        assert_eq!(params, json!({ "max_length": 120, "min_length": 10 }));

        let params = build_parameters("google/pegasus-xsum", 120, 0.7);
        assert_eq!(params, json!({ "max_length": 120, "min_length": 10 }));
    }

    #[test]
    fn test_default_parameters_clamp_temperature() {
        // The payload carries f32 temperatures, so compare through f32.
        let params = build_parameters("google/flan-t5-base", 60, 1.5);
        assert_eq!(params["max_length"], json!(60));
        assert_eq!(params["temperature"].as_f64().map(|t| t as f32), Some(1.0));

        let params = build_parameters("google/flan-t5-base", 60, -0.2);
        assert_eq!(params["temperature"].as_f64().map(|t| t as f32), Some(0.1));
    }

    #[test]
    fn test_error_indicators() {
        assert!(is_error_text("Error 503"));
        assert!(is_error_text("Model is currently LOADING"));
        assert!(is_error_text("404 not found"));
        assert!(!is_error_text("The weather is sunny today."));
        // Content containing an indicator word is (mis)classified as a failure.
        assert!(is_error_text("Loading a truck takes two people."));
    }

    #[test]
    fn test_extract_text_from_sequence() {
        let value = json!([{ "summary_text": "  X  " }]);
        assert_eq!(extract_text(&value), "X");

        let value = json!([{ "generated_text": "hello world" }]);
        assert_eq!(extract_text(&value), "hello world");
    }

    #[test]
    fn test_extract_text_from_object() {
        let value = json!({ "translation_text": "Y" });
        assert_eq!(extract_text(&value), "Y");
    }

    #[test]
    fn test_extract_text_field_priority() {
        let value = json!([{ "summary_text": "summary", "generated_text": "generated" }]);
        assert_eq!(extract_text(&value), "generated");
    }

    #[test]
    fn test_extract_text_unrecognized_shape() {
        let value = json!({ "estimated_time": 20.0 });
        assert_eq!(extract_text(&value), r#"{"estimated_time":20.0}"#);

        let value = json!(["plain string"]);
        assert_eq!(extract_text(&value), "plain string");
    }
}
