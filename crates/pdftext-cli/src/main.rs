use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pdftext_core::config_file::{self, ConfigFile};
use pdftext_mupdf::MupdfBackend;

mod output;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Print the plain text of every page of a PDF file
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the PDF file
    #[arg(allow_hyphen_values = true)]
    path: Option<PathBuf>,

    /// Further positional arguments are accepted and ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    extra: Vec<String>,

    /// Read configuration from this file instead of the default locations
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip text in this fraction of the page height at the top (0 disables)
    #[arg(long)]
    header_exclusion: Option<f32>,

    /// Skip text in this fraction of the page height at the bottom (0 disables)
    #[arg(long)]
    footer_exclusion: Option<f32>,
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();

    let Some(path) = cli.path.clone() else {
        output::print_usage(&mut stdout)?;
        return Ok(ExitCode::from(1));
    };

    let (config, skipped) = match &cli.config {
        Some(config_path) => (config_file::read_config(config_path)?, Vec::new()),
        None => {
            let loaded = config_file::load_config();
            (loaded.config, loaded.skipped)
        }
    };
    init_tracing(&config);
    for err in &skipped {
        tracing::warn!(error = %err, "ignoring config file");
    }
    if !cli.extra.is_empty() {
        tracing::debug!(ignored = ?cli.extra, "extra arguments ignored");
    }

    if !path.exists() {
        output::print_file_not_found(&mut stdout, &path)?;
        return Ok(ExitCode::from(1));
    }

    let backend = resolve_backend(&cli, &config);
    let text = pdftext_core::extract_or_diagnostic(&path, &backend);
    output::print_extraction(&mut stdout, &text)?;

    Ok(ExitCode::SUCCESS)
}

/// Install the stderr subscriber. Filter: `PDFTEXT_LOG` > config file > `warn`.
fn init_tracing(config: &ConfigFile) {
    let directive = std::env::var("PDFTEXT_LOG")
        .ok()
        .or_else(|| config.log_filter().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn env_ratio(name: &str) -> Option<f32> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Resolve backend settings: CLI flags > env vars > config file > disabled.
fn resolve_backend(cli: &Cli, config: &ConfigFile) -> MupdfBackend {
    let header = cli
        .header_exclusion
        .or_else(|| env_ratio("PDFTEXT_HEADER_EXCLUSION"))
        .or_else(|| config.header_exclusion_ratio())
        .unwrap_or(0.0);
    let footer = cli
        .footer_exclusion
        .or_else(|| env_ratio("PDFTEXT_FOOTER_EXCLUSION"))
        .or_else(|| config.footer_exclusion_ratio())
        .unwrap_or(0.0);

    tracing::debug!(header, footer, "backend exclusion ratios");
    MupdfBackend::new()
        .with_header_exclusion(header)
        .with_footer_exclusion(footer)
}
