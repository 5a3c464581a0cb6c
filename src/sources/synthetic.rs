//! Synthetic fallback source producing fabricated search results.

use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

use crate::models::PaperMetadata;
use crate::sources::{ScholarSource, SourceError};

/// The fallback never fabricates more than this many papers per search
const MAX_SYNTHETIC_RESULTS: usize = 10;

/// Simulated search latency
const SEARCH_DELAY: Duration = Duration::from_secs(1);

/// A source that fabricates plausible-looking paper metadata
///
/// Used when no external scholarly source is reachable. Titles and
/// abstracts embed the query so results look relevant; nothing is fetched
/// from anywhere.
#[derive(Debug, Clone, Default)]
pub struct SyntheticSource;

impl SyntheticSource {
    /// Create a new synthetic source
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScholarSource for SyntheticSource {
    fn id(&self) -> &str {
        "synthetic"
    }

    fn name(&self) -> &str {
        "Synthetic"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PaperMetadata>, SourceError> {
        tokio::time::sleep(SEARCH_DELAY).await;

        let papers = (0..limit.min(MAX_SYNTHETIC_RESULTS))
            .map(|i| {
                let paper_id = Uuid::new_v4();
                PaperMetadata {
                    title: format!(
                        "A Study of {}: New Perspectives and Methods {}",
                        query,
                        i + 1
                    ),
                    authors: vec![
                        "Alice Zhang".to_string(),
                        "Ben Carter".to_string(),
                        "Wei Wang".to_string(),
                    ],
                    year: Some(2023),
                    venue: Some("Journal of Artificial Intelligence Research".to_string()),
                    doi: None,
                    url: Some(format!("https://example.com/papers/{}", paper_id)),
                    citation_count: Some(10 + i as u32),
                    r#abstract: Some(format!(
                        "This study examines recent advances in {} and proposes new methods \
                         and a theoretical framework for addressing key open problems in the \
                         field.",
                        query
                    )),
                }
            })
            .collect();

        Ok(papers)
    }
}
