//! Semantic Scholar search source implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::PaperMetadata;
use crate::sources::{ScholarSource, SourceError};

const SEMANTIC_API_BASE: &str = "https://api.semanticscholar.org/graph/v1";

/// Fields requested per paper from the search endpoint
const PAPER_FIELDS: &str = "title,authors,year,venue,externalIds,url,citationCount,abstract";

/// The search endpoint caps the page size at 100
const MAX_RESULTS_PER_SEARCH: usize = 100;

/// Semantic Scholar search source
///
/// Uses the Semantic Scholar Graph REST API. Items that fail to translate
/// are skipped individually; only source-level failures surface as errors.
#[derive(Debug, Clone)]
pub struct SemanticScholarSource {
    client: Arc<Client>,
    api_base: String,
    api_key: Option<String>,
}

impl SemanticScholarSource {
    /// Create a new Semantic Scholar source
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_api_base(SEMANTIC_API_BASE, api_key)
    }

    /// Create a source pointed at a custom API base URL
    pub fn with_api_base(api_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Arc::new(
                Client::builder()
                    .user_agent(concat!(
                        env!("CARGO_PKG_NAME"),
                        "/",
                        env!("CARGO_PKG_VERSION")
                    ))
                    .build()
                    .expect("Failed to create HTTP client"),
            ),
            api_base: api_base.into(),
            api_key,
        }
    }

    /// Add the API key to request headers if available
    fn add_api_key_if_present(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref key) = self.api_key {
            builder.header("x-api-key", key)
        } else {
            builder
        }
    }

    /// Translate one Semantic Scholar item into paper metadata
    fn parse_paper(item: serde_json::Value) -> Result<PaperMetadata, SourceError> {
        let data: S2Paper = serde_json::from_value(item)?;

        let authors = data
            .authors
            .unwrap_or_default()
            .into_iter()
            .filter_map(|a| a.name)
            .collect::<Vec<_>>();

        let citation_count = data
            .citation_count
            .and_then(|c| u32::try_from(c).ok());

        Ok(PaperMetadata {
            title: data.title.unwrap_or_else(|| "Unknown Title".to_string()),
            authors,
            year: data.year,
            venue: data.venue,
            doi: data.external_ids.and_then(|ids| ids.doi),
            url: data.url,
            citation_count,
            r#abstract: data.r#abstract,
        })
    }
}

#[async_trait]
impl ScholarSource for SemanticScholarSource {
    fn id(&self) -> &str {
        "semantic"
    }

    fn name(&self) -> &str {
        "Semantic Scholar"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PaperMetadata>, SourceError> {
        let limit = limit.min(MAX_RESULTS_PER_SEARCH);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/paper/search?query={}&limit={}&fields={}",
            self.api_base,
            urlencoding::encode(query),
            limit,
            PAPER_FIELDS
        );

        let response = self
            .add_api_key_if_present(self.client.get(&url))
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search Semantic Scholar: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Semantic Scholar API returned status: {}",
                response.status()
            )));
        }

        let data: S2SearchResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse JSON: {}", e)))?;

        let mut papers = Vec::new();
        for item in data.data.into_iter().take(limit) {
            match Self::parse_paper(item) {
                Ok(paper) => papers.push(paper),
                Err(e) => {
                    tracing::warn!("Skipping untranslatable search result: {}", e);
                }
            }
        }

        Ok(papers)
    }
}

// ===== Semantic Scholar API Types =====

#[derive(Debug, Deserialize)]
struct S2Paper {
    title: Option<String>,
    authors: Option<Vec<S2Author>>,
    year: Option<i32>,
    venue: Option<String>,
    #[serde(rename = "externalIds")]
    external_ids: Option<S2ExternalIds>,
    url: Option<String>,
    #[serde(rename = "citationCount")]
    citation_count: Option<i64>,
    r#abstract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S2Author {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S2ExternalIds {
    #[serde(rename = "DOI")]
    doi: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S2SearchResponse {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}
