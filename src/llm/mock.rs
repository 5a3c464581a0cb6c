//! Deterministic mock language model.

use async_trait::async_trait;
use std::time::Duration;

use crate::llm::{LanguageModel, LlmError};

/// Reply returned when the prompt asks about research gaps
pub const GAP_REPLY: &str = "Based on recent literature, transparency and explainability \
     in AI-assisted decision making remain significant research gaps.";

/// Reply returned when the prompt asks about experiment design
pub const EXPERIMENT_REPLY: &str = "A controlled experiment design is recommended, using A/B \
     testing combined with qualitative and quantitative analysis.";

/// Reply returned for any other prompt
pub const GENERIC_REPLY: &str = "I am ResearchGPT. I can help you analyze research areas, \
     discover research gaps, design experiments and draft papers. Tell me which research \
     area interests you.";

/// Simulated backend latency
const RESPONSE_DELAY: Duration = Duration::from_millis(500);

/// A language model that returns canned replies keyed on prompt content
///
/// Replies are a pure function of the prompt via case-insensitive substring
/// checks. A fixed delay simulates the latency of a real backend call.
#[derive(Debug, Clone, Default)]
pub struct MockLanguageModel;

impl MockLanguageModel {
    /// Create a new mock language model
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn respond(&self, prompt: &str) -> Result<String, LlmError> {
        tracing::debug!(prompt_len = prompt.len(), "calling mock language model");
        tokio::time::sleep(RESPONSE_DELAY).await;

        let lowered = prompt.to_lowercase();
        let reply = if lowered.contains("research gap") {
            GAP_REPLY
        } else if lowered.contains("experiment design") {
            EXPERIMENT_REPLY
        } else {
            GENERIC_REPLY
        };

        Ok(reply.to_string())
    }
}
