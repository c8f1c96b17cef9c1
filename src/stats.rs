use std::time::{Duration, Instant};

/// Statistics collected while analyzing sources
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingStats {
    pub sources_processed: usize,
    pub files_processed: usize,
    /// Files skipped because they could not be opened or decoded
    pub files_failed: usize,
    /// Files whose reading stopped at a classification error
    pub files_aborted: usize,
    pub lines_read: usize,
    pub events_created: usize,
    pub raw_lines: usize,
    pub correlations: usize,
    pub processing_time: Duration,
    pub start_time: Option<Instant>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Add the counters of a worker or of one file
    pub fn merge(&mut self, other: &ProcessingStats) {
        self.sources_processed += other.sources_processed;
        self.files_processed += other.files_processed;
        self.files_failed += other.files_failed;
        self.files_aborted += other.files_aborted;
        self.lines_read += other.lines_read;
        self.events_created += other.events_created;
        self.raw_lines += other.raw_lines;
        self.correlations += other.correlations;
    }

    pub fn finish_processing(&mut self) {
        if let Some(start) = self.start_time {
            self.processing_time = start.elapsed();
        }
    }

    pub fn format_stats(&self) -> String {
        let mut output = format!(
            "Lines processed: {} total; Events created: {}, {} raw lines, {} correlated responses",
            self.lines_read, self.events_created, self.raw_lines, self.correlations
        );

        output.push_str(&format!(
            "; {} sources, {} files",
            self.sources_processed, self.files_processed
        ));

        if self.files_failed > 0 {
            output.push_str(&format!(", {} failed", self.files_failed));
        }

        if self.files_aborted > 0 {
            output.push_str(&format!(", {} aborted", self.files_aborted));
        }

        let processing_time_ms = self.processing_time.as_millis();
        output.push_str(&format!(" in {}ms", processing_time_ms));

        if processing_time_ms > 0 && self.lines_read > 0 {
            let lines_per_sec = (self.lines_read as f64 * 1000.0) / processing_time_ms as f64;
            output.push_str(&format!(" ({:.0} lines/s)", lines_per_sec));
        }

        output
    }
}
