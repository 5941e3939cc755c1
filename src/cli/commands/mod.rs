//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific
//! modules.

mod add;
mod check;
mod documents;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "doclens")]
#[command(about = "Document extraction and analysis tool")]
#[command(version)]
pub struct Cli {
    /// Data directory holding the document store (overrides config file)
    #[arg(long, short = 't', global = true)]
    target: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and document store
    Init,

    /// Extract, analyze, and store a document
    Add {
        /// Path to the file to process
        file: PathBuf,
        /// Display name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
        /// Declared media type (inferred from content and extension if omitted)
        #[arg(long)]
        media_type: Option<String>,
        /// Skip the analysis service and store fallback analysis values
        #[arg(long)]
        no_analysis: bool,
    },

    /// List stored documents
    List,

    /// Show a stored document
    Show {
        /// Document id (a unique prefix is enough)
        id: String,
        /// Include the full extracted text
        #[arg(long)]
        full: bool,
    },

    /// Re-run analysis over a stored document's extracted text
    Reprocess {
        /// Document id (a unique prefix is enough)
        id: String,
    },

    /// Write a printable report for a stored document
    Report {
        /// Document id (a unique prefix is enough)
        id: String,
        /// Output path (defaults to a name derived from the document)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a stored document
    Delete {
        /// Document id (a unique prefix is enough)
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        confirm: bool,
    },

    /// Check analysis service availability and show effective configuration
    Check,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(target) = cli.target {
        settings.data_dir = target;
    }

    match cli.command {
        Commands::Init => documents::cmd_init(&settings).await,
        Commands::Add {
            file,
            name,
            media_type,
            no_analysis,
        } => add::cmd_add(&settings, &file, name, media_type, no_analysis).await,
        Commands::List => documents::cmd_list(&settings).await,
        Commands::Show { id, full } => documents::cmd_show(&settings, &id, full).await,
        Commands::Reprocess { id } => add::cmd_reprocess(&settings, &id).await,
        Commands::Report { id, output } => {
            report::cmd_report(&settings, &id, output.as_deref()).await
        }
        Commands::Delete { id, confirm } => documents::cmd_delete(&settings, &id, confirm).await,
        Commands::Check => check::cmd_check(&settings).await,
    }
}
