// Command-line surface and the mapping from arguments to log sources

use anyhow::{Context, Result};
use clap::Parser;
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{AnalyzerConfig, DEFAULT_SOURCE_NAME};

#[derive(Parser, Debug)]
#[command(name = "scar-analyzer")]
#[command(about = "Extract charging events and protocol exchanges from EV charger firmware logs")]
#[command(
    long_about = "Extract charging events and protocol exchanges from EV charger firmware logs\n\nEach directory argument is one source (one charging station) named after the\ndirectory; plain file arguments form a single source named by --name.\nFor every source the raw matched lines are written to\n<log-path or source dir>/<source><dst-file>.\n\nEXAMPLES:\n  scar-analyzer logs/CP-0001 logs/CP-0002\n  scar-analyzer --name CP-0001 charger_0501.log charger_0502.log --json\n  scar-analyzer logs/* --log-name charger --stats"
)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Source directories or log files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Source name for file arguments
    #[arg(short = 'n', long = "name", default_value = DEFAULT_SOURCE_NAME, help_heading = "Input Options")]
    pub name: String,

    /// Substring a log file name in a source directory must contain
    #[arg(long = "log-name", help_heading = "Input Options")]
    pub log_name: Option<String>,

    /// Extension a log file name in a source directory must contain
    #[arg(long = "log-ext", help_heading = "Input Options")]
    pub log_ext: Option<String>,

    /// Directory receiving the raw-line files (default: each source's directory)
    #[arg(short = 'o', long = "log-path", help_heading = "Output Options")]
    pub log_path: Option<String>,

    /// Suffix of the raw-line file written per source
    #[arg(long = "dst-file", help_heading = "Output Options")]
    pub dst_file: Option<String>,

    /// Print every event as JSON Lines on stdout after the run
    #[arg(short = 'J', long = "json", help_heading = "Output Options")]
    pub json: bool,

    /// Show processing statistics on stderr
    #[arg(short = 's', long = "stats", help_heading = "Output Options")]
    pub stats: bool,

    /// Number of worker threads (0 = two per processor)
    #[arg(long = "threads", help_heading = "Performance Options")]
    pub threads: Option<usize>,

    /// Read configuration from this file on top of the rc files
    #[arg(long = "config", env = "SCAR_CONFIG", help_heading = "Configuration")]
    pub config: Option<PathBuf>,

    /// Ignore .scarrc and user config files
    #[arg(long = "no-config", help_heading = "Configuration")]
    pub no_config: bool,

    /// More diagnostics (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, help_heading = "Diagnostics")]
    pub verbose: u8,

    /// Only warnings and errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose", help_heading = "Diagnostics")]
    pub quiet: bool,
}

impl Cli {
    /// Overwrite configuration values given on the command line
    pub fn apply_to(&self, config: &mut AnalyzerConfig) {
        if let Some(log_path) = &self.log_path {
            config.log_path = log_path.clone();
        }
        if let Some(log_name) = &self.log_name {
            config.log_name = log_name.clone();
        }
        if let Some(log_ext) = &self.log_ext {
            config.log_ext = log_ext.clone();
        }
        if let Some(dst_file) = &self.dst_file {
            config.dst_file = dst_file.clone();
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
    }

    /// Default tracing directive for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Group the inputs into named sources with sorted file lists
    pub fn collect_sources(&self, config: &AnalyzerConfig) -> Result<IndexMap<String, Vec<PathBuf>>> {
        let mut sources: IndexMap<String, Vec<PathBuf>> = IndexMap::new();

        for input in &self.inputs {
            if input.is_dir() {
                let name = source_name(input);
                let files = list_log_files(input, config)?;
                if files.is_empty() {
                    tracing::warn!(source = %name, dir = %input.display(), "No log files in source directory");
                    continue;
                }
                sources.entry(name).or_default().extend(files);
            } else {
                sources.entry(self.name.clone()).or_default().push(input.clone());
            }
        }

        for files in sources.values_mut() {
            files.sort();
            files.dedup();
        }

        Ok(sources)
    }
}

fn source_name(dir: &Path) -> String {
    dir.canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(dir)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_SOURCE_NAME.to_string())
}

fn list_log_files(dir: &Path, config: &AnalyzerConfig) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read source directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read source directory: {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let accepted = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| config.accepts_file(name));
        if accepted {
            files.push(path);
        }
    }
    Ok(files)
}
