//! Scholarly search sources.
//!
//! This module defines the [`ScholarSource`] trait implemented by paper
//! search backends. The [`SemanticScholarSource`] queries the Semantic
//! Scholar REST API; the [`SyntheticSource`] fabricates placeholder results
//! and is used as the fallback whenever the external source is unavailable
//! or fails at the source level.

mod semantic;
mod synthetic;

pub use semantic::SemanticScholarSource;
pub use synthetic::SyntheticSource;

use crate::models::PaperMetadata;
use async_trait::async_trait;

/// The interface for paper search backends
#[async_trait]
pub trait ScholarSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "semantic", "synthetic")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Search for papers matching the query, returning at most `limit` results
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PaperMetadata>, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// API error from the source
    #[error("API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}
