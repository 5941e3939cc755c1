//! Doclens - document extraction, analysis, and reporting.
//!
//! A tool for extracting text from uploaded documents (plain text, PDF, Word,
//! or zip archives of those), classifying and summarizing them through a
//! hosted language-model service, and rendering printable reports.

pub mod cli;
pub mod config;
pub mod extract;
pub mod llm;
pub mod models;
pub mod report;
pub mod repository;
