//! Task categories, the prompt classifier, and the candidate model catalog.

/// Task category a prompt is classified into.
///
/// Drives which list of candidate models is tried first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskCategory {
    Conversation,
    TextGeneration,
    Summarization,
    TextToText,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Conversation => "conversation",
            TaskCategory::TextGeneration => "text_generation",
            TaskCategory::Summarization => "summarization",
            TaskCategory::TextToText => "text_to_text",
        }
    }

    /// Capitalized rendering used in the result annotation prefix.
    pub fn label(&self) -> &'static str {
        match self {
            TaskCategory::Conversation => "Conversation",
            TaskCategory::TextGeneration => "Text_generation",
            TaskCategory::Summarization => "Summarization",
            TaskCategory::TextToText => "Text_to_text",
        }
    }
}

const CONVERSATION_KEYWORDS: &[&str] = &["hello", "hi", "how are you", "chat", "talk"];
const SUMMARIZATION_KEYWORDS: &[&str] = &["summarize", "summary", "brief", "overview"];
const TEXT_TO_TEXT_KEYWORDS: &[&str] = &["translate", "convert", "transform"];

/// Classify a prompt by case-insensitive keyword membership.
///
/// Checked in fixed priority order; the first matching category wins.
pub fn classify_prompt(prompt: &str) -> TaskCategory {
    let lower = prompt.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if contains_any(CONVERSATION_KEYWORDS) {
        TaskCategory::Conversation
    } else if contains_any(SUMMARIZATION_KEYWORDS) {
        TaskCategory::Summarization
    } else if contains_any(TEXT_TO_TEXT_KEYWORDS) {
        TaskCategory::TextToText
    } else {
        TaskCategory::TextGeneration
    }
}

/// Ordered candidate models per task category.
///
/// Fixed at construction and shared read-only by every request.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    conversation: Vec<String>,
    text_generation: Vec<String>,
    summarization: Vec<String>,
    text_to_text: Vec<String>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        let models = |ids: &[&str]| ids.iter().map(|s| s.to_string()).collect();
        Self {
            conversation: models(&["microsoft/DialoGPT-medium", "microsoft/DialoGPT-large"]),
            text_generation: models(&["gpt2", "distilgpt2"]),
            summarization: models(&["facebook/bart-large-cnn", "google/pegasus-xsum"]),
            text_to_text: models(&["google/t5-v1_1-base", "google/flan-t5-base"]),
        }
    }
}

impl ModelCatalog {
    /// Candidate models for a category, in trial order.
    pub fn candidates(&self, category: TaskCategory) -> &[String] {
        match category {
            TaskCategory::Conversation => &self.conversation,
            TaskCategory::TextGeneration => &self.text_generation,
            TaskCategory::Summarization => &self.summarization,
            TaskCategory::TextToText => &self.text_to_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_keywords() {
        assert_eq!(classify_prompt("Hello there"), TaskCategory::Conversation);
        assert_eq!(classify_prompt("let's chat"), TaskCategory::Conversation);
        assert_eq!(
            classify_prompt("HOW ARE YOU today?"),
            TaskCategory::Conversation
        );
    }

    #[test]
    fn test_summarization_keywords() {
        assert_eq!(
            classify_prompt("Summarize this article"),
            TaskCategory::Summarization
        );
        assert_eq!(
            classify_prompt("give me an overview of the results"),
            TaskCategory::Summarization
        );
    }

    #[test]
    fn test_text_to_text_keywords() {
        assert_eq!(
            classify_prompt("Translate this sentence to French"),
            TaskCategory::TextToText
        );
        assert_eq!(
            classify_prompt("convert the units to metric"),
            TaskCategory::TextToText
        );
    }

    #[test]
    fn test_default_category() {
        assert_eq!(
            classify_prompt("Write a poem about autumn"),
            TaskCategory::TextGeneration
        );
    }

    #[test]
    fn test_priority_order() {
        // Conversation wins when both keyword sets match.
        assert_eq!(
            classify_prompt("hello, please summarize this"),
            TaskCategory::Conversation
        );
        // Summarization wins over text-to-text.
        assert_eq!(
            classify_prompt("summarize and translate this"),
            TaskCategory::Summarization
        );
    }

    #[test]
    fn test_catalog_candidates() {
        let catalog = ModelCatalog::default();
        assert_eq!(
            catalog.candidates(TaskCategory::Conversation),
            &["microsoft/DialoGPT-medium", "microsoft/DialoGPT-large"]
        );
        assert_eq!(
            catalog.candidates(TaskCategory::Summarization),
            &["facebook/bart-large-cnn", "google/pegasus-xsum"]
        );
    }
}
