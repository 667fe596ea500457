use std::env;

/// Snapshot of the environment variables the service consumes.
///
/// Read once at startup and injected into the router; empty values are
/// treated as unset.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub groq_api_key: Option<String>,
    pub groq_model: Option<String>,
    pub huggingface_api_key: Option<String>,
    pub huggingface_model: Option<String>,
    pub app_env: String,
    pub port: u16,
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self {
            groq_api_key: non_empty_var("GROQ_API_KEY"),
            groq_model: non_empty_var("GROQ_MODEL"),
            huggingface_api_key: non_empty_var("HUGGINGFACE_API_KEY"),
            huggingface_model: non_empty_var("HUGGINGFACE_MODEL"),
            app_env: non_empty_var("APP_ENV").unwrap_or_else(|| "development".to_string()),
            port: non_empty_var("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
        }
    }

    /// Whether any provider credential is configured.
    pub fn credentials_configured(&self) -> bool {
        self.groq_api_key.is_some() || self.huggingface_api_key.is_some()
    }

    /// Model identifier reported in the `/ai/generate` envelope.
    ///
    /// The Groq model takes priority over the Hugging Face one regardless of
    /// which provider is active.
    pub fn reported_model(&self) -> String {
        self.groq_model
            .clone()
            .or_else(|| self.huggingface_model.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Model identifier reported by the task endpoints (`null` when the Groq
    /// model is unset).
    pub fn task_model(&self) -> Option<String> {
        self.groq_model.clone()
    }
}
