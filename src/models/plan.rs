//! Research plan models: queries, summaries, timelines and expanded details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{PaperMetadata, ResearchGap};

/// Free-text research topic submitted to the plan search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchQuery {
    /// Research field or keywords
    pub query: String,
}

/// A candidate research plan as returned by plan search
///
/// This is the minimal record created when plans are proposed for a topic.
/// Fetching the plan by id expands it into a [`ResearchPlanDetail`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchPlan {
    /// Unique plan identifier, assigned at creation
    pub id: String,

    /// Plan title
    pub title: String,

    /// Short description
    pub description: String,

    /// Topic and method tags
    pub tags: Vec<String>,

    /// When the plan was proposed
    pub created_at: DateTime<Utc>,
}

/// A single phase of a research timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePhase {
    /// Phase name
    pub phase: String,

    /// Expected duration, free text (e.g. "2 months")
    pub duration: String,

    /// Activities carried out during the phase
    pub activities: Vec<String>,
}

impl TimelinePhase {
    /// Create a new timeline phase
    pub fn new(
        phase: impl Into<String>,
        duration: impl Into<String>,
        activities: Vec<String>,
    ) -> Self {
        Self {
            phase: phase.into(),
            duration: duration.into(),
            activities,
        }
    }
}

/// An expanded research plan including background, methodology, timeline and resources
///
/// A detail is a superset of the summary it was expanded from and replaces it
/// in the plan store; the identifier is unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchPlanDetail {
    /// Unique plan identifier, carried over from the summary
    pub id: String,

    /// Plan title
    pub title: String,

    /// Short description
    pub description: String,

    /// Research background
    pub background: String,

    /// Research methodology
    pub methodology: String,

    /// Expected outcomes
    #[serde(rename = "expectedResults")]
    pub expected_results: String,

    /// Timeline phases in execution order
    pub timeline: Vec<TimelinePhase>,

    /// Resources required to carry out the plan
    pub resources: Vec<String>,

    /// Topic and method tags
    pub tags: Vec<String>,

    /// When the plan was proposed
    pub created_at: DateTime<Utc>,

    /// When the plan was last expanded
    pub updated_at: Option<DateTime<Utc>>,

    /// Papers relevant to the plan, if any were attached
    pub related_papers: Option<Vec<PaperMetadata>>,

    /// Research gaps identified for the plan, if any were attached
    pub identified_gaps: Option<Vec<ResearchGap>>,
}

/// A stored plan entry: the initial summary, or the detail that replaced it
///
/// The entry transitions `Summary` to `Detail` in place on first detail
/// fetch and stays `Detail` afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanRecord {
    Summary(ResearchPlan),
    Detail(ResearchPlanDetail),
}

impl PlanRecord {
    /// The plan identifier, regardless of expansion state
    pub fn id(&self) -> &str {
        match self {
            PlanRecord::Summary(plan) => &plan.id,
            PlanRecord::Detail(detail) => &detail.id,
        }
    }

    /// The expanded detail, if this entry has been expanded
    pub fn as_detail(&self) -> Option<&ResearchPlanDetail> {
        match self {
            PlanRecord::Summary(_) => None,
            PlanRecord::Detail(detail) => Some(detail),
        }
    }
}
