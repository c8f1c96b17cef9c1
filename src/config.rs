use std::path::{Path, PathBuf};

/// Source name used when none is given
pub const DEFAULT_SOURCE_NAME: &str = "analyze";

/// Resolved run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Directory receiving the raw-line files; empty means next to the source
    pub log_path: String,
    /// Substring a log file name must contain
    pub log_name: String,
    /// Extension a log file name must contain
    pub log_ext: String,
    /// Suffix of the raw-line file written per source
    pub dst_file: String,
    /// Worker threads, 0 for automatic
    pub threads: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            log_path: String::new(),
            log_name: String::new(),
            log_ext: ".log".to_string(),
            dst_file: "_analyze.log".to_string(),
            threads: 0,
        }
    }
}

impl AnalyzerConfig {
    /// Get effective number of worker threads, two per processor by default
    pub fn effective_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get() * 2
        } else {
            self.threads
        }
    }

    /// Whether a file found in a source directory is a log to analyze.
    /// Earlier raw-line outputs are never picked up again.
    pub fn accepts_file(&self, file_name: &str) -> bool {
        file_name.contains(&self.log_name)
            && file_name.contains(&self.log_ext)
            && (self.dst_file.is_empty() || !file_name.contains(&self.dst_file))
    }

    /// Raw-line output path of a source
    pub fn destination(&self, source: &str, source_dir: &Path) -> PathBuf {
        let name = if source.is_empty() {
            DEFAULT_SOURCE_NAME
        } else {
            source
        };
        let file_name = format!("{}{}", name, self.dst_file);

        if self.log_path.is_empty() {
            source_dir.join(file_name)
        } else {
            PathBuf::from(&self.log_path).join(file_name)
        }
    }
}
