//! Provider implementations for the supported text-generation services.

pub mod groq;
pub mod huggingface;
pub mod mock;

// Re-export commonly used provider types
pub use groq::GroqProvider;
pub use huggingface::HuggingFaceProvider;
pub use mock::MockProvider;
