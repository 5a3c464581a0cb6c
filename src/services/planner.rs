//! Plan generation, detail expansion and plan-scoped chat.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::llm::LanguageModel;
use crate::models::{
    ChatMessage, ChatSession, PlanRecord, ResearchPlan, ResearchPlanDetail, TimelinePhase,
};
use crate::services::ServiceError;
use crate::store::{PlanStore, SessionStore};

/// Number of candidate plans proposed per topic
const PLANS_PER_TOPIC: usize = 3;

/// Chat reply used when the referenced plan does not exist
pub const PLAN_NOT_FOUND_REPLY: &str = "Sorry, that research plan could not be found.";

/// Service for proposing research plans, expanding them and chatting about them
#[derive(Debug, Clone)]
pub struct PlannerService {
    plans: Arc<dyn PlanStore>,
    sessions: Arc<dyn SessionStore>,
    model: Arc<dyn LanguageModel>,
}

impl PlannerService {
    /// Create a new planner service
    pub fn new(
        plans: Arc<dyn PlanStore>,
        sessions: Arc<dyn SessionStore>,
        model: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            plans,
            sessions,
            model,
        }
    }

    /// Propose candidate research plans for a topic
    ///
    /// Always produces exactly three placeholder plans, each with a fresh
    /// identifier, and stores every one of them so it can be expanded later.
    pub async fn generate_plans(&self, topic: &str) -> Result<Vec<ResearchPlan>, ServiceError> {
        tracing::info!(topic, "generating research plans");

        let mut plans = Vec::with_capacity(PLANS_PER_TOPIC);
        for i in 0..PLANS_PER_TOPIC {
            let plan = ResearchPlan {
                id: Uuid::new_v4().to_string(),
                title: format!("Research plan {} for {}", i + 1, topic),
                description: format!(
                    "An innovative research plan exploring new methods and techniques in {}.",
                    topic
                ),
                tags: vec![
                    topic.to_string(),
                    "innovation".to_string(),
                    "research-method".to_string(),
                ],
                created_at: Utc::now(),
            };

            self.plans.put(PlanRecord::Summary(plan.clone())).await;
            plans.push(plan);
        }

        Ok(plans)
    }

    /// Fetch the expanded detail for a plan, expanding it on first access
    ///
    /// Repeated calls return the stored detail unchanged. The synthesized
    /// detail text embeds the plan title but is otherwise topic-independent.
    pub async fn get_plan_detail(&self, id: &str) -> Result<ResearchPlanDetail, ServiceError> {
        tracing::info!(plan_id = id, "fetching plan detail");

        let summary = match self.plans.get(id).await {
            Some(PlanRecord::Detail(detail)) => return Ok(detail),
            Some(PlanRecord::Summary(summary)) => summary,
            None => {
                return Err(ServiceError::NotFound(format!(
                    "No research plan with id {}",
                    id
                )))
            }
        };

        let detail = ResearchPlanDetail {
            id: summary.id,
            background: format!(
                "The background of {} covers the current problems and challenges in the field.",
                summary.title
            ),
            title: summary.title,
            description: summary.description,
            methodology: "This research will use a mixed-methods approach, combining \
                          quantitative and qualitative analysis."
                .to_string(),
            expected_results: "The research is expected to produce a new theoretical framework \
                               and practical methods."
                .to_string(),
            timeline: fixed_timeline(),
            resources: vec![
                "Computing resources".to_string(),
                "Research software".to_string(),
                "Datasets".to_string(),
                "Research staff".to_string(),
            ],
            tags: summary.tags,
            created_at: summary.created_at,
            updated_at: Some(Utc::now()),
            related_papers: None,
            identified_gaps: None,
        };

        self.plans.put(PlanRecord::Detail(detail.clone())).await;
        Ok(detail)
    }

    /// Answer a chat message scoped to a research plan
    ///
    /// A missing plan produces a fixed apology reply rather than an error.
    /// Every call opens a fresh session holding exactly this exchange.
    pub async fn chat(&self, plan_id: &str, message: &str) -> Result<String, ServiceError> {
        tracing::info!(plan_id, "chat about research plan");

        let detail = match self.get_plan_detail(plan_id).await {
            Ok(detail) => detail,
            Err(ServiceError::NotFound(_)) => return Ok(PLAN_NOT_FOUND_REPLY.to_string()),
            Err(e) => return Err(e),
        };

        let prompt = format!(
            "Here are the details of a research plan:\n\n\
             Title: {}\n\
             Description: {}\n\
             Background: {}\n\
             Methodology: {}\n\n\
             The user's question about this research plan is:\n{}\n\n\
             Answer the user's question in the voice of a research assistant.",
            detail.title, detail.description, detail.background, detail.methodology, message
        );

        let reply = self.model.respond(&prompt).await?;

        let mut session = ChatSession::new(plan_id);
        session.push(ChatMessage::user(message));
        session.push(ChatMessage::assistant(reply.clone()));
        self.sessions.put(session).await;

        Ok(reply)
    }
}

fn fixed_timeline() -> Vec<TimelinePhase> {
    vec![
        TimelinePhase::new(
            "Phase 1: Literature review",
            "2 months",
            vec![
                "Collect literature".to_string(),
                "Analyze existing research".to_string(),
                "Identify research gaps".to_string(),
            ],
        ),
        TimelinePhase::new(
            "Phase 2: Method design",
            "3 months",
            vec![
                "Design research methods".to_string(),
                "Prepare experiment materials".to_string(),
                "Run pilot experiments".to_string(),
            ],
        ),
        TimelinePhase::new(
            "Phase 3: Data collection and analysis",
            "4 months",
            vec![
                "Collect data".to_string(),
                "Analyze data".to_string(),
                "Consolidate results".to_string(),
            ],
        ),
        TimelinePhase::new(
            "Phase 4: Paper writing",
            "3 months",
            vec![
                "Write first draft".to_string(),
                "Revise and polish".to_string(),
                "Submit for publication".to_string(),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLanguageModel;
    use crate::store::{MemoryPlanStore, MemorySessionStore};

    fn planner() -> PlannerService {
        PlannerService::new(
            Arc::new(MemoryPlanStore::new()),
            Arc::new(MemorySessionStore::new()),
            Arc::new(MockLanguageModel::new()),
        )
    }

    #[tokio::test]
    async fn test_generate_plans_returns_three_distinct_stored_plans() {
        let service = planner();
        let plans = service.generate_plans("quantum computing").await.unwrap();

        assert_eq!(plans.len(), 3);
        assert_ne!(plans[0].id, plans[1].id);
        assert_ne!(plans[1].id, plans[2].id);

        for plan in &plans {
            assert!(plan.title.contains("quantum computing"));
            assert!(plan.tags.contains(&"quantum computing".to_string()));
            // Each summary is retrievable immediately
            let detail = service.get_plan_detail(&plan.id).await.unwrap();
            assert_eq!(detail.id, plan.id);
        }
    }

    #[tokio::test]
    async fn test_plan_detail_has_four_phases_and_is_idempotent() {
        let service = planner();
        let plans = service.generate_plans("robotics").await.unwrap();
        let id = &plans[0].id;

        let first = service.get_plan_detail(id).await.unwrap();
        assert_eq!(first.timeline.len(), 4);
        assert_eq!(first.timeline[0].phase, "Phase 1: Literature review");
        assert_eq!(first.timeline[3].phase, "Phase 4: Paper writing");
        assert!(first.updated_at.is_some());

        let second = service.get_plan_detail(id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_plan_detail_unknown_id_is_not_found() {
        let service = planner();
        let err = service.get_plan_detail("nope").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_chat_on_missing_plan_returns_apology() {
        let service = planner();
        let reply = service.chat("nope", "what methodology?").await.unwrap();
        assert_eq!(reply, PLAN_NOT_FOUND_REPLY);
    }

    #[tokio::test]
    async fn test_chat_answers_and_expands_summary() {
        let service = planner();
        let plans = service.generate_plans("robotics").await.unwrap();
        let id = &plans[0].id;

        let reply = service.chat(id, "what is the research gap?").await.unwrap();
        assert!(!reply.is_empty());

        // Chatting forced the expansion
        let detail = service.get_plan_detail(id).await.unwrap();
        assert_eq!(detail.timeline.len(), 4);
    }

    #[tokio::test]
    async fn test_every_chat_call_records_a_fresh_two_message_session() {
        use crate::models::ChatRole;

        let sessions = Arc::new(MemorySessionStore::new());
        let service = PlannerService::new(
            Arc::new(MemoryPlanStore::new()),
            sessions.clone(),
            Arc::new(MockLanguageModel::new()),
        );

        let plans = service.generate_plans("robotics").await.unwrap();
        let id = &plans[0].id;

        service.chat(id, "first question").await.unwrap();
        service.chat(id, "second question").await.unwrap();

        // Sessions are never reused across turns
        let stored = sessions.list().await;
        assert_eq!(stored.len(), 2);
        for session in &stored {
            assert_eq!(session.plan_id, *id);
            assert_eq!(session.messages.len(), 2);
            assert_eq!(session.messages[0].role, ChatRole::User);
            assert_eq!(session.messages[1].role, ChatRole::Assistant);
        }
    }
}
