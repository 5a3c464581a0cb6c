//! Core data structures shared across services and the HTTP surface.

mod chat;
mod paper;
mod plan;

pub use chat::{ChatMessage, ChatRole, ChatSession};
pub use paper::{PaperAnalysis, PaperMetadata, ResearchGap};
pub use plan::{PlanRecord, ResearchPlan, ResearchPlanDetail, ResearchQuery, TimelinePhase};
