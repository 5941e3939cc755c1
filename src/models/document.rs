//! Analyzed document records and the analysis-service reply shape.
//!
//! An [`AnalyzedDocument`] combines the extracted text, derived metrics, and
//! the analysis result for one uploaded source. The stored collection of these
//! records is the single source of truth; extraction and analysis components
//! never retain copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::extract::{reading_time_minutes, word_count};

/// Classification labels the analysis service may assign.
///
/// Unknown labels in an otherwise well-formed reply decode as `Others`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Classification {
    Resume,
    Invoice,
    #[serde(rename = "Legal Agreement")]
    LegalAgreement,
    #[serde(rename = "Research Paper")]
    ResearchPaper,
    #[default]
    #[serde(other)]
    Others,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resume => "Resume",
            Self::Invoice => "Invoice",
            Self::LegalAgreement => "Legal Agreement",
            Self::ResearchPaper => "Research Paper",
            Self::Others => "Others",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment label attached to a document's metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    #[serde(other)]
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured reply from the analysis service.
///
/// `classification`, `summary`, `tags`, and `sentiment` are required; a reply
/// missing any of them is replaced wholesale by [`DocumentAnalysis::fallback`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub classification: Classification,
    pub summary: String,
    pub tags: Vec<String>,
    pub sentiment: Sentiment,
    /// Free-text observations, if the service offered any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<String>,
    /// Chart suggestions; opaque to this system.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub graphs: Vec<serde_json::Value>,
}

impl DocumentAnalysis {
    /// Fixed record used when the service reply cannot be parsed.
    ///
    /// Classification failure is non-fatal: the document was still extracted,
    /// so it is saved with these values instead of propagating a parse error.
    pub fn fallback() -> Self {
        Self {
            classification: Classification::Others,
            summary: "The document was processed, but no detailed summary could be generated."
                .to_string(),
            tags: vec![
                "document".to_string(),
                "unclassified".to_string(),
                "text".to_string(),
            ],
            sentiment: Sentiment::Neutral,
            insights: None,
            graphs: Vec::new(),
        }
    }
}

/// Per-document statistics captured at analysis time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetrics {
    /// Whitespace-delimited token count of the extracted text.
    pub word_count: usize,
    /// Page count; present only when the source was a PDF.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    /// Estimated reading time at 200 words per minute.
    pub reading_time_minutes: u32,
    /// Sentiment label from the analysis reply.
    pub sentiment: Sentiment,
}

impl DocumentMetrics {
    /// Derive metrics from extracted text.
    pub fn for_text(text: &str, page_count: Option<u32>, sentiment: Sentiment) -> Self {
        let words = word_count(text);
        Self {
            word_count: words,
            page_count,
            reading_time_minutes: reading_time_minutes(words),
            sentiment,
        }
    }
}

/// A stored document with its extracted text and analysis results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedDocument {
    /// Unique identifier for this document.
    pub id: String,
    /// Display name, usually the uploaded file name.
    pub name: String,
    /// Classification label from the analysis service.
    pub classification: Classification,
    /// Tags from the analysis service.
    pub tags: Vec<String>,
    /// Short summary from the analysis service.
    pub summary: String,
    /// Full extracted text.
    pub full_text: String,
    /// SHA-256 hash of the source bytes; detects re-uploads of identical
    /// content. Empty for records created before hashing existed.
    #[serde(default)]
    pub content_hash: String,
    /// When this record was created or last reprocessed.
    pub created_at: DateTime<Utc>,
    /// Derived statistics.
    pub metrics: DocumentMetrics,
    /// Free-text observations from the analysis service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<String>,
    /// Chart suggestions from the analysis service; opaque to this system.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub graphs: Vec<serde_json::Value>,
}

impl AnalyzedDocument {
    /// Compute SHA-256 hash of content.
    pub fn compute_hash(content: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        hex::encode(hasher.finalize())
    }

    /// Create a new record from extracted text and an analysis reply.
    pub fn new(
        name: String,
        content_hash: String,
        full_text: String,
        page_count: Option<u32>,
        analysis: DocumentAnalysis,
    ) -> Self {
        let metrics = DocumentMetrics::for_text(&full_text, page_count, analysis.sentiment);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            classification: analysis.classification,
            tags: analysis.tags,
            summary: analysis.summary,
            full_text,
            content_hash,
            created_at: Utc::now(),
            metrics,
            insights: analysis.insights,
            graphs: analysis.graphs,
        }
    }

    /// Replace the analysis fields of this record in place.
    ///
    /// `id`, `full_text`, `content_hash`, and the page count are preserved;
    /// everything derived from the analysis reply, plus `created_at`, is
    /// replaced. This is the full-replacement semantics of a reprocess.
    pub fn apply_analysis(&mut self, analysis: DocumentAnalysis) {
        self.classification = analysis.classification;
        self.tags = analysis.tags;
        self.summary = analysis.summary;
        self.insights = analysis.insights;
        self.graphs = analysis.graphs;
        self.metrics = DocumentMetrics::for_text(
            &self.full_text,
            self.metrics.page_count,
            analysis.sentiment,
        );
        self.created_at = Utc::now();
    }
}
