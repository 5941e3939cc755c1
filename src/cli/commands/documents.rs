//! Document management commands: init, list, show, delete.

use console::style;

use crate::cli::helpers::truncate;
use crate::config::Settings;
use crate::models::AnalyzedDocument;
use crate::repository::DocumentStore;

/// Initialize the data directory and document store.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    std::fs::create_dir_all(&settings.data_dir)?;
    let store = DocumentStore::open(settings.store_path())?;
    store.ensure_created().await?;

    println!(
        "{} Initialized Doclens in {}",
        style("✓").green(),
        settings.data_dir.display()
    );
    Ok(())
}

/// List stored documents.
pub async fn cmd_list(settings: &Settings) -> anyhow::Result<()> {
    let store = DocumentStore::open(settings.store_path())?;
    let documents = store.list().await;

    if documents.is_empty() {
        println!(
            "{} No documents stored. Run 'doclens add <file>' first.",
            style("!").yellow()
        );
        return Ok(());
    }

    println!("\n{}", style("Analyzed Documents").bold());
    println!("{}", "-".repeat(86));
    println!(
        "{:<10} {:<28} {:<16} {:>6} {:<12} Added",
        "ID", "Name", "Type", "Words", "Sentiment"
    );
    println!("{}", "-".repeat(86));

    for document in &documents {
        println!(
            "{:<10} {:<28} {:<16} {:>6} {:<12} {}",
            &document.id[..8.min(document.id.len())],
            truncate(&document.name, 27),
            truncate(document.classification.as_str(), 15),
            document.metrics.word_count,
            document.metrics.sentiment.as_str(),
            document.created_at.format("%Y-%m-%d %H:%M")
        );
    }

    println!("\n{} document(s)", documents.len());
    Ok(())
}

/// Show a stored document.
pub async fn cmd_show(settings: &Settings, id: &str, full: bool) -> anyhow::Result<()> {
    let store = DocumentStore::open(settings.store_path())?;
    let document = resolve_document(&store, id).await?;

    println!("\n{}", style(&document.name).bold());
    println!("{}", "-".repeat(60));
    println!("Id:             {}", document.id);
    println!("Classification: {}", document.classification);
    println!(
        "Added:          {}",
        document.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("Words:          {}", document.metrics.word_count);
    if let Some(pages) = document.metrics.page_count {
        println!("Pages:          {}", pages);
    }
    println!(
        "Reading time:   {} min",
        document.metrics.reading_time_minutes
    );
    println!("Sentiment:      {}", document.metrics.sentiment);
    println!("Tags:           {}", document.tags.join(", "));

    println!("\n{}", style("Summary").bold());
    println!("{}", document.summary);

    if let Some(insights) = &document.insights {
        println!("\n{}", style("Insights").bold());
        println!("{}", insights);
    }

    if full {
        println!("\n{}", style("Extracted text").bold());
        println!("{}", document.full_text);
    } else {
        println!(
            "\n{} characters of extracted text (use --full to print)",
            document.full_text.len()
        );
    }
    Ok(())
}

/// Delete a stored document.
pub async fn cmd_delete(settings: &Settings, id: &str, confirm: bool) -> anyhow::Result<()> {
    use std::io::{self, Write};

    let store = DocumentStore::open(settings.store_path())?;
    let document = resolve_document(&store, id).await?;

    if !confirm {
        print!(
            "Delete '{}' ({})? Type 'yes' to confirm: ",
            document.name, document.id
        );
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if answer.trim() != "yes" {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.delete(&document.id).await?;
    println!("{} Deleted {}", style("✓").green(), document.name);
    Ok(())
}

/// Resolve a document by id or unique id prefix.
pub(super) async fn resolve_document(
    store: &DocumentStore,
    id: &str,
) -> anyhow::Result<AnalyzedDocument> {
    if let Some(document) = store.get(id).await {
        return Ok(document);
    }

    let matches: Vec<AnalyzedDocument> = store
        .list()
        .await
        .into_iter()
        .filter(|doc| doc.id.starts_with(id))
        .collect();

    match matches.len() {
        0 => anyhow::bail!("No document matches '{}'", id),
        1 => Ok(matches.into_iter().next().expect("one match")),
        n => anyhow::bail!("'{}' is ambiguous: {} documents match", id, n),
    }
}
