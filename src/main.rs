use anyhow::Result;
use clap::{Parser, ValueEnum};
use pubmed_affiliations::config::{find_config_file, get_config, load_config, Config};
use pubmed_affiliations::pipeline;
use pubmed_affiliations::report::{ReportWriter, StdoutFormat};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fetch PubMed papers with at least one author from a non-academic organization
#[derive(Parser, Debug)]
#[command(name = "pubmed-affiliations")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch PubMed papers with non-academic authors", long_about = None)]
struct Cli {
    /// PubMed search query
    query: String,

    /// Print the query before searching
    #[arg(long, short)]
    debug: bool,

    /// Filename to save results as CSV (prints to stdout when omitted)
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Maximum number of search results (default: from config, 10)
    #[arg(long, short)]
    max_results: Option<usize>,

    /// Stdout format when no file is given
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Debug)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging (-v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error logging
    #[arg(long, short)]
    quiet: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long)]
    timeout: Option<u64>,
}

/// Output format for stdout results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Structural dump of the result rows
    Debug,
    /// JSON format (machine-readable)
    Json,
    /// Table format (human-readable)
    Table,
}

impl From<OutputFormat> for StdoutFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Debug => StdoutFormat::Debug,
            OutputFormat::Json => StdoutFormat::Json,
            OutputFormat::Table => StdoutFormat::Table,
        }
    }
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("pubmed_affiliations={}", level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        get_config()?
    };

    if let Some(timeout) = cli.timeout {
        config.http.timeout_seconds = timeout;
    }
    if let Some(max_results) = cli.max_results {
        config.search.max_results = max_results;
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level());

    let config = resolve_config(&cli)?;
    let rendered = config.to_toml()?;
    tracing::debug!("Effective configuration:\n{}", rendered);

    if cli.debug {
        println!("Searching PubMed for: {}", cli.query);
    }

    let writer = ReportWriter::new(cli.output.into());
    pipeline::execute(
        &config,
        &cli.query,
        cli.file.as_deref(),
        &writer,
        &mut std::io::stdout(),
    )
    .await?;

    Ok(())
}
