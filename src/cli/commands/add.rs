//! Upload and reprocess commands: the extraction, metrics, and analysis
//! pipeline.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::helpers::format_bytes;
use crate::config::Settings;
use crate::extract::{self, SourceFile};
use crate::llm::{AnalysisClient, AnalysisError};
use crate::models::{AnalyzedDocument, DocumentAnalysis};
use crate::repository::DocumentStore;

use super::documents::resolve_document;

/// Extract, analyze, and store one document.
pub async fn cmd_add(
    settings: &Settings,
    file: &Path,
    name: Option<String>,
    media_type: Option<String>,
    no_analysis: bool,
) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

    if bytes.len() as u64 > settings.max_upload_bytes {
        anyhow::bail!(
            "{} is {}, above the {} upload limit",
            file.display(),
            format_bytes(bytes.len() as u64),
            format_bytes(settings.max_upload_bytes)
        );
    }

    let display_name = name.unwrap_or_else(|| {
        file.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string())
    });

    let content_hash = AnalyzedDocument::compute_hash(&bytes);
    let source = SourceFile::new(display_name.clone(), media_type, bytes);

    println!("Extracting text from {}...", style(&display_name).bold());
    let extraction = extract::extract(&source)?;
    tracing::info!(
        "Extracted {} characters from {}",
        extraction.text.len(),
        display_name
    );

    let analysis = run_analysis(settings, &display_name, &extraction.text, no_analysis).await?;

    let store = DocumentStore::open(settings.store_path())?;
    let mut document = AnalyzedDocument::new(
        display_name,
        content_hash,
        extraction.text,
        extraction.page_count,
        analysis,
    );

    // Re-uploading identical content replaces the existing record in place.
    if let Some(existing) = store.find_by_hash(&document.content_hash).await {
        println!(
            "{} Identical content already stored; replacing {}",
            style("!").yellow(),
            existing.id
        );
        document.id = existing.id;
    }

    store.upsert(document.clone()).await?;
    print_record_summary(&document, "Stored");
    Ok(())
}

/// Re-run analysis over a stored document's extracted text.
///
/// Preserves the record's id and full text; everything derived from the
/// analysis reply is replaced.
pub async fn cmd_reprocess(settings: &Settings, id: &str) -> anyhow::Result<()> {
    let store = DocumentStore::open(settings.store_path())?;
    let mut document = resolve_document(&store, id).await?;

    let analysis = run_analysis(settings, &document.name, &document.full_text, false).await?;
    document.apply_analysis(analysis);

    store.upsert(document.clone()).await?;
    print_record_summary(&document, "Reprocessed");
    Ok(())
}

/// Call the analysis service, honoring the disabled path.
///
/// Transport failure aborts the operation so the caller never saves the
/// document; a disabled service is a user choice and degrades to the fixed
/// fallback record.
async fn run_analysis(
    settings: &Settings,
    name: &str,
    text: &str,
    no_analysis: bool,
) -> anyhow::Result<DocumentAnalysis> {
    if no_analysis {
        return Ok(DocumentAnalysis::fallback());
    }

    let client = AnalysisClient::new(settings.llm.clone());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("valid progress template"),
    );
    spinner.set_message(format!("Analyzing {}...", name));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = client.analyze(name, text).await;
    spinner.finish_and_clear();

    match result {
        Ok(analysis) => Ok(analysis),
        Err(AnalysisError::Disabled) => {
            println!(
                "{} Analysis disabled; storing fallback values",
                style("!").yellow()
            );
            Ok(DocumentAnalysis::fallback())
        }
        Err(e @ AnalysisError::ServiceUnavailable(_)) => {
            Err(anyhow::Error::new(e).context("The document was not saved"))
        }
    }
}

fn print_record_summary(document: &AnalyzedDocument, verb: &str) {
    println!(
        "{} {} {}",
        style("✓").green(),
        verb,
        style(&document.name).bold()
    );
    println!("  Id:             {}", document.id);
    println!("  Classification: {}", document.classification);
    println!(
        "  Words:          {} ({} min read)",
        document.metrics.word_count, document.metrics.reading_time_minutes
    );
    if let Some(pages) = document.metrics.page_count {
        println!("  Pages:          {}", pages);
    }
    println!("  Sentiment:      {}", document.metrics.sentiment);
    println!("  Tags:           {}", document.tags.join(", "));
}
