// src/main.rs

use anyhow::Result;
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;
use debstat::contents::{self, MalformedLinePolicy, ParseOptions};
use debstat::mirror::{self, MirrorClient};
use debstat::report;
use std::path::PathBuf;
use tracing::{info, warn};

/// Ranking output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Left-justified two-column table
    Table,
    /// JSON array of package/file_count objects
    Json,
}

#[derive(Parser)]
#[command(name = "debstat")]
#[command(author, version, about = "Rank Debian packages by file count from a mirror's Contents indices", long_about = None)]
struct Cli {
    /// Architecture to analyze (default: this machine's)
    arch: Option<String>,

    /// Number of packages in the ranking
    #[arg(short = 'n', long, default_value_t = 10)]
    top: usize,

    /// Mirror directory URL holding the Contents indices
    #[arg(long, default_value = mirror::DEFAULT_MIRROR)]
    mirror: String,

    /// Ranking output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write the full package-to-files table as JSON to this path
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Save the decoded Contents index to this path
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Fail on malformed index lines instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Strip section prefixes (e.g. "utils/") from package identifiers
    #[arg(long)]
    strip_sections: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

/// Parser configuration from the command-line flags
fn parse_options(cli: &Cli) -> ParseOptions {
    ParseOptions {
        malformed: if cli.strict {
            MalformedLinePolicy::Fail
        } else {
            MalformedLinePolicy::Skip
        },
        strip_sections: cli.strip_sections,
        ..ParseOptions::default()
    }
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        return Ok(());
    }

    let arch = cli.arch.clone().unwrap_or_else(mirror::host_architecture);
    info!("Analyzing Contents index for architecture: {}", arch);

    let client = MirrorClient::new(&cli.mirror)?;
    let directory = client.fetch_directory()?;

    // Validate the architecture against the mirror before downloading.
    let architectures = directory.architectures();
    if !architectures.iter().any(|a| a == &arch) {
        return Err(debstat::Error::ArchitectureNotFound {
            arch,
            available: architectures,
        }
        .into());
    }

    let filename = mirror::contents_filename(&arch);
    let text = match &cli.save {
        Some(path) => client.fetch_and_decode_to(&directory, &filename, path)?,
        None => client.fetch_and_decode(&directory, &filename)?,
    };

    let tables = contents::build_tables(&text, parse_options(&cli))?;
    if !tables.skipped.is_empty() {
        warn!(
            "Skipped {} malformed lines (first: line {})",
            tables.skipped.len(),
            tables.skipped[0].number
        );
    }

    let ranking = contents::rank(&tables.packages, cli.top);

    match cli.format {
        OutputFormat::Table => {
            println!(
                "Top {} packages by file count for {} ({} paths, {} packages):",
                ranking.len(),
                arch,
                tables.files.len(),
                tables.packages.len()
            );
            print!("{}", report::format_table(&ranking));
        }
        OutputFormat::Json => {
            println!("{}", report::ranking_to_json(&ranking)?);
        }
    }

    if let Some(path) = &cli.export {
        report::write_json(&tables.packages, path)?;
        println!("Exported package-to-files table to: {}", path.display());
    }

    Ok(())
}
