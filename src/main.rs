use anyhow::Result;
use clap::Parser;
use std::io::{self, BufWriter};
use std::process;
use tracing_subscriber::EnvFilter;

use scar_analyzer::{AnalysisContext, Analyzer, AnalyzerConfig, Cli, ConfigFile};

const EXIT_ERROR: i32 = 1;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(&cli) {
        eprintln!("scar-analyzer: Error: {:#}", e);
        process::exit(EXIT_ERROR);
    }
}

/// Diagnostics go to stderr; RUST_LOG overrides the -v/-q level
fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let sources = cli.collect_sources(&config)?;

    let analyzer = Analyzer::new(AnalysisContext::new(config)).on_progress(|source, done| {
        if done {
            tracing::debug!(source, "Source completed");
        }
    });
    let stats = analyzer.analyze(&sources)?;

    if cli.json {
        let stdout = io::stdout();
        let mut output = BufWriter::new(stdout.lock());
        analyzer.write_jsonl(sources.keys().map(String::as_str), &mut output)?;
    }

    if cli.stats {
        eprintln!("{}", stats.format_stats());
    }

    Ok(())
}

/// Defaults, then rc files, then --config, then command-line flags
fn resolve_config(cli: &Cli) -> Result<AnalyzerConfig> {
    let mut config = AnalyzerConfig::default();

    let file = if cli.no_config {
        match &cli.config {
            Some(path) => ConfigFile::load_from_path(path)?,
            None => ConfigFile::default(),
        }
    } else {
        ConfigFile::load_with_custom_path(cli.config.as_deref())?
    };
    file.apply_to(&mut config);
    cli.apply_to(&mut config);

    tracing::debug!(?config, "Resolved configuration");
    Ok(config)
}
