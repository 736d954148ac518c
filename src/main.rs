//! pyexport - generates a pybind11 extension module from annotated C++ sources

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use pyexport::{DiagnosticKind, Generator, GeneratorConfig};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// pyexport CLI
#[derive(Parser)]
#[command(name = "pyexport")]
#[command(about = "Generates a pybind11 module from functions marked for export", long_about = None)]
#[command(version)]
struct Cli {
    /// Generated module source
    #[arg(short, long, env = "PYEXPORT_OUTPUT")]
    output: PathBuf,

    /// Semicolon-separated list of C++ sources to scan
    #[arg(short, long, env = "PYEXPORT_SOURCES", value_delimiter = ';', required = true)]
    sources: Vec<String>,

    /// Name of the Python module
    #[arg(short, long, env = "PYEXPORT_MODULE_NAME")]
    module_name: String,

    /// Cache file path
    #[arg(long, env = "PYEXPORT_CACHE", default_value = pyexport::DEFAULT_CACHE_PATH)]
    cache: PathBuf,

    /// Marker preceding exported functions
    #[arg(
        long,
        env = "PYEXPORT_EXPORT_MARKER",
        default_value = pyexport::DEFAULT_EXPORT_MARKER,
        value_parser = NonEmptyStringValueParser::new()
    )]
    export_marker: String,

    /// Spaces per indentation level in the generated code
    #[arg(long, default_value_t = pyexport::DEFAULT_INDENT)]
    indent: usize,

    /// Log level
    #[arg(long, env = "PYEXPORT_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Discard the cache and regenerate everything
    #[arg(long)]
    force: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let start = Instant::now();

    let sources: Vec<PathBuf> = cli
        .sources
        .into_iter()
        .filter(|source| !source.is_empty())
        .map(PathBuf::from)
        .collect();

    let config = GeneratorConfig::new()
        .with_cache_path(cli.cache)
        .with_export_marker(cli.export_marker)
        .with_indent(cli.indent);
    let generator = Generator::new(config);

    if cli.force {
        generator.clean().context("failed to discard cache")?;
    }

    let report = generator
        .run(&sources, &cli.output, &cli.module_name)
        .with_context(|| format!("failed to generate {}", cli.output.display()))?;

    for diagnostic in &report.diagnostics {
        match diagnostic.kind {
            DiagnosticKind::Error => error!("{diagnostic}"),
            DiagnosticKind::Warning => warn!("{diagnostic}"),
            DiagnosticKind::Info => info!("{diagnostic}"),
        }
    }

    info!("{report} in {:.3}s", start.elapsed().as_secs_f64());
    Ok(())
}
