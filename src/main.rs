//! Community Directory Viewer - Entry Point

use cdir::model::Category;
use cdir::paginator::PageSize;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// Community Directory Viewer - TUI for browsing directory listings
#[derive(Parser, Debug)]
#[command(name = "cdir")]
#[command(version)]
#[command(about = "TUI application for browsing community directory listings")]
pub struct Args {
    /// Path to JSONL listings file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Listings per page (or per load-more chunk)
    #[arg(long, value_parser = parse_page_size)]
    pub page_size: Option<PageSize>,

    /// Grow the list with "load more" instead of numbered pages
    #[arg(short, long)]
    pub infinite: bool,

    /// Start on a category tab (jobs, events, dining, rentals)
    #[arg(short, long, value_parser = parse_category)]
    pub category: Option<Category>,

    /// Start with search query active
    #[arg(short, long)]
    pub search: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[allow(missing_docs)]
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands besides the viewer.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Normalize a raw JSONL export into viewer-ready listings
    Import {
        /// Raw JSONL export
        input: PathBuf,

        /// Output file (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_page_size(raw: &str) -> Result<PageSize, String> {
    let n: usize = raw.parse().map_err(|e| format!("{e}"))?;
    PageSize::new(n).map_err(|e| e.to_string())
}

fn parse_category(raw: &str) -> Result<Category, String> {
    Category::parse(raw).ok_or_else(|| {
        format!("unknown category '{raw}' (expected jobs, events, dining or rentals)")
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = cdir::config::load_config_with_precedence(args.config.clone())?;
        let merged = cdir::config::merge_config(config_file)?;
        let with_env = cdir::config::apply_env_overrides(merged)?;

        // --infinite only ever turns infinite scroll on
        let infinite = args.infinite.then_some(true);

        cdir::config::apply_cli_overrides(with_env, args.page_size, infinite)
    };

    cdir::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    if let Some(Command::Import { input, output }) = &args.command {
        let summary = cdir::import::import_path(input, output.as_deref())?;
        eprintln!(
            "imported {} listing(s), skipped {}",
            summary.accepted, summary.rejected
        );
        return Ok(());
    }

    let input_source = cdir::source::detect_input_source(args.file.clone())
        .map_err(cdir::model::AppError::from)?;
    let startup = cdir::view::StartupView {
        category: args.category,
        search: args.search.clone(),
    };

    cdir::view::run_with_source(input_source, &config, &startup)?;

    Ok(())
}
