//! Paper search with caching and superficial paper analysis.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::models::{PaperAnalysis, PaperMetadata, ResearchGap};
use crate::services::ServiceError;
use crate::sources::ScholarSource;

/// Simulated duration of an analysis run
const ANALYSIS_DELAY: Duration = Duration::from_secs(2);

/// Service for searching academic papers and surfacing research gaps
///
/// Search results are cached in memory for the lifetime of the process,
/// keyed by query and limit; there is no TTL and no eviction. When the
/// external source errors at the source level the fallback produces
/// synthetic results, and those are cached the same way, so callers cannot
/// tell the provenance of a response.
#[derive(Debug)]
pub struct PaperService {
    external: Option<Arc<dyn ScholarSource>>,
    fallback: Arc<dyn ScholarSource>,
    cache: RwLock<HashMap<String, Vec<PaperMetadata>>>,
}

impl PaperService {
    /// Create a new paper service
    ///
    /// `external` is the scholarly source to consult first, if any;
    /// `fallback` serves whenever the external source is missing or fails.
    pub fn new(
        external: Option<Arc<dyn ScholarSource>>,
        fallback: Arc<dyn ScholarSource>,
    ) -> Self {
        Self {
            external,
            fallback,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Search for papers matching the query, returning at most `limit` results
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<PaperMetadata>, ServiceError> {
        tracing::info!(query, limit, "searching papers");

        let cache_key = format!("{}_{}", query, limit);
        if let Some(papers) = self.cache.read().await.get(&cache_key) {
            tracing::info!(key = %cache_key, "paper cache hit");
            return Ok(papers.clone());
        }

        if let Some(ref external) = self.external {
            match external.search(query, limit).await {
                Ok(papers) => {
                    self.cache
                        .write()
                        .await
                        .insert(cache_key, papers.clone());
                    return Ok(papers);
                }
                Err(e) => {
                    tracing::warn!(
                        source = external.id(),
                        "external paper search failed, using fallback: {}",
                        e
                    );
                }
            }
        }

        let papers = self
            .fallback
            .search(query, limit)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        self.cache.write().await.insert(cache_key, papers.clone());
        Ok(papers)
    }

    /// Analyze a set of papers for research gaps, directions and concepts
    ///
    /// Requires at least one paper identifier. The analysis content is
    /// fixed; nothing is fetched for the referenced papers.
    pub async fn analyze(&self, paper_ids: &[String]) -> Result<PaperAnalysis, ServiceError> {
        if paper_ids.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "at least one paper id is required".to_string(),
            ));
        }

        tracing::info!(count = paper_ids.len(), "analyzing papers");
        tokio::time::sleep(ANALYSIS_DELAY).await;

        let first_prefix: String = paper_ids[0].chars().take(8).collect();
        let related_pair: Vec<String> = paper_ids.iter().take(2).cloned().collect();

        Ok(PaperAnalysis {
            research_gaps: vec![
                ResearchGap {
                    description: format!(
                        "There is no comprehensive study of the problems related to {}",
                        first_prefix
                    ),
                    related_papers: related_pair,
                    potential_impact: "High".to_string(),
                    difficulty_level: "Medium".to_string(),
                },
                ResearchGap {
                    description: "Existing methods have efficiency problems in large-scale \
                                  application scenarios"
                        .to_string(),
                    related_papers: paper_ids.to_vec(),
                    potential_impact: "Medium".to_string(),
                    difficulty_level: "High".to_string(),
                },
            ],
            research_directions: vec![
                "Improve existing algorithms to increase processing efficiency".to_string(),
                "Develop new theoretical frameworks for core problems in the field".to_string(),
                "Explore possibilities for cross-domain applications".to_string(),
            ],
            key_concepts: vec![
                "Deep learning".to_string(),
                "Knowledge graphs".to_string(),
                "Explainable artificial intelligence".to_string(),
            ],
            analysis_timestamp: Utc::now(),
        })
    }
}
