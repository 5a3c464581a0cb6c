//! In-memory plan and chat-session storage.
//!
//! Handlers talk to storage through the [`PlanStore`] and [`SessionStore`]
//! traits so the backing can vary without touching service logic. The
//! bundled implementations hold everything in process memory for the
//! lifetime of the process: nothing is evicted, nothing is persisted.
//!
//! Concurrent writes to the same key are last-write-wins. Locks are held
//! only across individual map operations, never across await points, so a
//! read-modify-write spanning two calls is not atomic.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::{ChatSession, PlanRecord};

/// Storage for research plans keyed by plan id
#[async_trait]
pub trait PlanStore: Send + Sync + std::fmt::Debug {
    /// Fetch the entry for a plan id
    async fn get(&self, id: &str) -> Option<PlanRecord>;

    /// Insert or replace the entry for a plan id
    async fn put(&self, record: PlanRecord);

    /// All stored entries, in no particular order
    async fn list(&self) -> Vec<PlanRecord>;
}

/// Storage for chat sessions keyed by session id
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Fetch a session by id
    async fn get(&self, id: &str) -> Option<ChatSession>;

    /// Insert or replace a session
    async fn put(&self, session: ChatSession);

    /// All stored sessions, in no particular order
    async fn list(&self) -> Vec<ChatSession>;
}

/// Process-memory plan store
#[derive(Debug, Default)]
pub struct MemoryPlanStore {
    plans: RwLock<HashMap<String, PlanRecord>>,
}

impl MemoryPlanStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanStore for MemoryPlanStore {
    async fn get(&self, id: &str) -> Option<PlanRecord> {
        self.plans.read().await.get(id).cloned()
    }

    async fn put(&self, record: PlanRecord) {
        self.plans
            .write()
            .await
            .insert(record.id().to_string(), record);
    }

    async fn list(&self) -> Vec<PlanRecord> {
        self.plans.read().await.values().cloned().collect()
    }
}

/// Process-memory chat-session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, ChatSession>>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, id: &str) -> Option<ChatSession> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn put(&self, session: ChatSession) {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session);
    }

    async fn list(&self) -> Vec<ChatSession> {
        self.sessions.read().await.values().cloned().collect()
    }
}
