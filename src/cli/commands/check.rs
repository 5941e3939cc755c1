//! Check command: service availability and effective configuration.

use console::style;

use crate::cli::helpers::format_bytes;
use crate::config::Settings;
use crate::llm::AnalysisClient;
use crate::repository::DocumentStore;

/// Show effective configuration and probe the analysis service.
pub async fn cmd_check(settings: &Settings) -> anyhow::Result<()> {
    println!("\n{}", style("Doclens Status").bold());
    println!("{}", "-".repeat(50));

    println!("\n{}", style("Storage:").cyan());
    println!("  Data dir:     {}", settings.data_dir.display());
    println!("  Upload limit: {}", format_bytes(settings.max_upload_bytes));
    match DocumentStore::open(settings.store_path()) {
        Ok(store) => println!("  Documents:    {}", store.list().await.len()),
        Err(e) => println!("  Documents:    {}", style(format!("error: {}", e)).red()),
    }

    println!("\n{}", style("Analysis service:").cyan());
    println!("  Endpoint:     {}", settings.llm.endpoint);
    println!("  Model:        {}", settings.llm.model);
    println!(
        "  API key:      {}",
        if settings.llm.api_key.is_some() {
            "set"
        } else {
            "not set"
        }
    );

    if !settings.llm.enabled {
        println!(
            "  Status:       {}",
            style("disabled (documents stored with fallback analysis)").yellow()
        );
        return Ok(());
    }

    let client = AnalysisClient::new(settings.llm.clone());
    let status = if client.is_available().await {
        style("✓ reachable").green()
    } else {
        style("✗ unreachable").red()
    };
    println!("  Status:       {}", status);

    Ok(())
}
