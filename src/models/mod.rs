//! Data models for Doclens.

mod document;

pub use document::{
    AnalyzedDocument, Classification, DocumentAnalysis, DocumentMetrics, Sentiment,
};
