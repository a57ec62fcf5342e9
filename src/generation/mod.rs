//! Adapter for the external text/image generation service.

mod client;
mod error;
pub mod prompt;

use async_trait::async_trait;

pub use client::{DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL, GenerationClient};
pub use error::GenerationError;

/// The generation calls the dialog engine depends on.
///
/// Implemented by [`GenerationClient`]; tests substitute deterministic stubs.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Complete a text prompt, returning the first candidate's text.
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Generate an image from a text prompt, returning the image URL.
    async fn generate_image(&self, prompt: &str) -> Result<String, GenerationError>;
}
