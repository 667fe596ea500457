pub mod catalog;
pub mod client;

pub use catalog::{classify_prompt, ModelCatalog, TaskCategory};
pub use client::HuggingFaceProvider;
