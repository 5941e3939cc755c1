//! Report command: render a stored document into a printable file.

use std::path::Path;

use anyhow::Context;
use console::style;

use crate::config::Settings;
use crate::report;
use crate::repository::DocumentStore;

use super::documents::resolve_document;

/// Write a paginated report for a stored document.
pub async fn cmd_report(
    settings: &Settings,
    id: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let store = DocumentStore::open(settings.store_path())?;
    let document = resolve_document(&store, id).await?;

    let rendered = report::render(&document);
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => report::default_filename(&document).into(),
    };

    std::fs::write(&path, rendered)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    println!(
        "{} Wrote report for {} to {}",
        style("✓").green(),
        style(&document.name).bold(),
        path.display()
    );
    Ok(())
}
