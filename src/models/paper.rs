//! Paper metadata and analysis models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for an academic paper returned by paper search
///
/// This struct provides a standardized format for papers regardless of
/// whether they came from an external scholarly source or the synthetic
/// fallback; callers cannot tell the two apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperMetadata {
    /// Paper title
    pub title: String,

    /// Authors in publication order
    pub authors: Vec<String>,

    /// Publication year
    pub year: Option<i32>,

    /// Publication venue
    pub venue: Option<String>,

    /// Digital Object Identifier
    pub doi: Option<String>,

    /// Paper page URL
    pub url: Option<String>,

    /// Citation count
    pub citation_count: Option<u32>,

    /// Abstract text
    pub r#abstract: Option<String>,
}

impl PaperMetadata {
    /// Create a new paper with the required fields
    pub fn new(title: impl Into<String>, authors: Vec<String>) -> Self {
        Self {
            title: title.into(),
            authors,
            year: None,
            venue: None,
            doi: None,
            url: None,
            citation_count: None,
            r#abstract: None,
        }
    }
}

/// A described unmet need tied to a set of paper identifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchGap {
    /// What is missing from the literature
    pub description: String,

    /// Identifiers of the papers this gap was derived from
    pub related_papers: Vec<String>,

    /// Potential impact of closing the gap
    pub potential_impact: String,

    /// Estimated difficulty of closing the gap
    pub difficulty_level: String,
}

/// Result of analyzing a set of papers for gaps and directions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperAnalysis {
    /// Identified research gaps
    pub research_gaps: Vec<ResearchGap>,

    /// Suggested research directions
    pub research_directions: Vec<String>,

    /// Key concepts surfaced by the analysis
    pub key_concepts: Vec<String>,

    /// When the analysis ran
    pub analysis_timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_metadata_new() {
        let paper = PaperMetadata::new(
            "Attention Is All You Need",
            vec!["Vaswani".to_string(), "Shazeer".to_string()],
        );

        assert_eq!(paper.title, "Attention Is All You Need");
        assert_eq!(paper.authors.len(), 2);
        assert!(paper.year.is_none());
        assert!(paper.doi.is_none());
    }

    #[test]
    fn test_paper_metadata_abstract_field_name() {
        let mut paper = PaperMetadata::new("Test", vec![]);
        paper.r#abstract = Some("An abstract.".to_string());

        let json = serde_json::to_value(&paper).unwrap();
        assert_eq!(json["abstract"], "An abstract.");
    }
}
