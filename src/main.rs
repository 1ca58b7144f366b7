use anyhow::{Context, Result};
use clap::Parser;
use scripture_index::index::{IndexConfig, Mode, compile, ingest_files_with_progress};
use scripture_index::output::{print_summary, write_index};
use scripture_index::render::{RenderContext, Template, render};
use scripture_index::utils::Language;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scripture-index")]
#[command(about = "Compile scripture and subject indexes from page extractions")]
struct Cli {
    /// Kind of index to compile
    #[arg(short, long, value_enum)]
    mode: Mode,

    /// Output template (defaults to the mode's plain-text template)
    #[arg(short, long, value_enum)]
    template: Option<Template>,

    /// Write the index to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Language of book names, digits and separators
    #[arg(short, long, value_enum)]
    language: Option<Language>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v warnings, -vv progress, -vvv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Hide the progress bar and the run summary
    #[arg(short, long)]
    quiet: bool,

    /// Disable colors in the run summary
    #[arg(long)]
    no_color: bool,

    /// Input tables (.csv, or tab-delimited .tsv/.tab/.txt)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => IndexConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => IndexConfig::default(),
    };
    if let Some(language) = cli.language {
        config.language = language;
    }
    if let Some(template) = cli.template {
        config.template = Some(template);
    }

    let mut ingested = ingest_files_with_progress(&cli.inputs, cli.mode, &config, cli.quiet);
    if ingested.files_read == 0 {
        warn!(skipped = ingested.skipped.len(), "no input file could be read");
    }

    let document = compile(std::mem::take(&mut ingested.entries), cli.mode);
    let stats = document.stats();
    info!(
        headings = stats.headings,
        entries = stats.entries,
        unresolved = stats.unresolved,
        locations = stats.locations,
        "compiled index"
    );

    let template = config.template_for(cli.mode);
    let text = render(&document, template, &RenderContext::new(config.language))
        .with_context(|| format!("failed to render {} template", template.as_str()))?;

    write_index(&text, cli.output.as_deref()).with_context(|| match &cli.output {
        Some(path) => format!("failed to write {}", path.display()),
        None => "failed to write index to stdout".to_string(),
    })?;

    if !cli.quiet {
        print_summary(&ingested, &stats, !cli.no_color)?;
    }

    Ok(())
}

/// Log to stderr; RUST_LOG overrides the -v level
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
