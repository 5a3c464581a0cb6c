//! Language model boundary.
//!
//! This module defines the [`LanguageModel`] trait that text-generation
//! backends implement. The rest of the system assumes nothing about a reply
//! beyond it being a string, so a real model integration is a drop-in
//! implementation of this trait. The bundled [`MockLanguageModel`] is a
//! deterministic stand-in that also serves as a test double.

pub mod mock;

pub use mock::MockLanguageModel;

use async_trait::async_trait;

/// The interface every text-generation backend implements
#[async_trait]
pub trait LanguageModel: Send + Sync + std::fmt::Debug {
    /// Generate a reply for the given prompt
    async fn respond(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Errors that can occur when calling a language model backend
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The backend call itself failed
    #[error("Language model call failed: {0}")]
    Backend(String),
}
