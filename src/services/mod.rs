//! Research services built on the stores, sources and language model.

mod papers;
mod planner;

pub use papers::PaperService;
pub use planner::{PlannerService, PLAN_NOT_FOUND_REPLY};

use crate::llm::LlmError;

/// Errors surfaced by the research services
///
/// The HTTP boundary maps these onto status codes; everything not
/// explicitly `NotFound` or `InvalidRequest` renders as an internal
/// failure.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request was malformed or failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<LlmError> for ServiceError {
    fn from(err: LlmError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}
