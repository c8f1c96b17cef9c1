//! Run driver: sources fanned out over a worker pool
//!
//! Each source is processed end-to-end by one worker, file by file and line
//! by line, so its scratch state never crosses threads. The event store is
//! the only shared state.

use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use crossbeam_channel::unbounded;
use encoding_rs::Encoding;
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use crate::config::AnalyzerConfig;
use crate::error::{AnalyzeError, ClassifyError};
use crate::event::LogEvent;
use crate::pipeline::correlator::{self, Correlation};
use crate::pipeline::{Classification, Classifier, Record, SourceState};
use crate::stats::ProcessingStats;
use crate::store::EventStore;

/// Called after every file with the source name and whether it was the
/// source's last file
pub type ProgressCallback = Arc<dyn Fn(&str, bool) + Send + Sync>;

/// Everything one run shares: its configuration and its store
#[derive(Debug, Default)]
pub struct AnalysisContext {
    pub config: AnalyzerConfig,
    pub store: EventStore,
}

impl AnalysisContext {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            store: EventStore::new(),
        }
    }

    pub fn with_store(config: AnalyzerConfig, store: EventStore) -> Self {
        Self { config, store }
    }
}

#[derive(Clone)]
pub struct Analyzer {
    context: Arc<AnalysisContext>,
    classifier: Classifier,
    on_progress: Option<ProgressCallback>,
}

impl Analyzer {
    pub fn new(context: AnalysisContext) -> Self {
        Self {
            context: Arc::new(context),
            classifier: Classifier::new(),
            on_progress: None,
        }
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, bool) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.context.config
    }

    pub fn store(&self) -> &EventStore {
        &self.context.store
    }

    /// Analyze every source, clearing results of any previous run first.
    ///
    /// File-level failures are logged and counted, never returned.
    pub fn analyze(
        &self,
        sources: &IndexMap<String, Vec<PathBuf>>,
    ) -> Result<ProcessingStats, AnalyzeError> {
        if sources.values().all(|files| files.is_empty()) {
            return Err(AnalyzeError::NothingToAnalyze);
        }

        let mut stats = ProcessingStats::new();
        self.store().clear_all();

        let num_workers = self.config().effective_threads().min(sources.len()).max(1);
        tracing::info!(
            sources = sources.len(),
            threads = num_workers,
            "Analyzing"
        );

        let (job_sender, job_receiver) = unbounded::<(String, Vec<PathBuf>)>();
        for (name, files) in sources {
            if !files.is_empty() {
                let _ = job_sender.send((name.clone(), files.clone()));
            }
        }
        // Workers stop once the queue is drained
        drop(job_sender);

        let mut worker_handles = Vec::with_capacity(num_workers);
        for _ in 0..num_workers {
            let job_receiver = job_receiver.clone();
            let analyzer = self.clone();

            let handle = thread::spawn(move || {
                let mut worker_stats = ProcessingStats::default();
                while let Ok((name, files)) = job_receiver.recv() {
                    worker_stats.merge(&analyzer.analyze_source(&name, &files));
                }
                worker_stats
            });
            worker_handles.push(handle);
        }

        for (worker, handle) in worker_handles.into_iter().enumerate() {
            let worker_stats = handle
                .join()
                .map_err(|_| AnalyzeError::WorkerPanicked { worker })?;
            stats.merge(&worker_stats);
        }

        stats.finish_processing();
        Ok(stats)
    }

    /// Process one source's files in order and write its raw lines
    pub fn analyze_source(&self, name: &str, files: &[PathBuf]) -> ProcessingStats {
        let store = self.store();
        store.remove(name);
        store.reset(name);

        let mut state = SourceState::new();
        let mut stats = ProcessingStats {
            sources_processed: 1,
            ..Default::default()
        };

        for (index, file) in files.iter().enumerate() {
            stats.merge(&self.analyze_file(name, file, &mut state));

            let last = index + 1 == files.len();
            if last {
                let source_dir = files[0].parent().unwrap_or_else(|| Path::new("."));
                match self.write_result(name, source_dir) {
                    Ok(path) => {
                        tracing::info!(source = name, result = %path.display(), "Raw lines written")
                    }
                    Err(e) => tracing::warn!(source = name, error = %format!("{:#}", e), "Failed to write raw lines"),
                }
            }
            if let Some(callback) = &self.on_progress {
                callback(name, last);
            }
        }

        stats
    }

    /// Process one file; failures end the file, never the source
    fn analyze_file(&self, name: &str, path: &Path, state: &mut SourceState) -> ProcessingStats {
        let mut stats = ProcessingStats {
            files_processed: 1,
            ..Default::default()
        };

        let (text, encoding) = match read_log_file(path) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(source = name, file = %path.display(), error = %e, "Skipping file");
                stats.files_failed = 1;
                tracing::info!(source = name, file = %path.display(), lines = 0, "File analyzed");
                return stats;
            }
        };

        for (number, line) in text.split_inclusive('\n').enumerate() {
            if let Err(e) = self.feed(name, line, state, &mut stats) {
                tracing::warn!(
                    source = name,
                    file = %path.display(),
                    line = number + 1,
                    error = %e,
                    "Stopped reading file"
                );
                stats.files_aborted = 1;
                break;
            }
            stats.lines_read += 1;
        }

        tracing::info!(
            source = name,
            file = %path.display(),
            encoding,
            lines = stats.lines_read,
            "File analyzed"
        );
        stats
    }

    fn feed(
        &self,
        name: &str,
        line: &str,
        state: &mut SourceState,
        stats: &mut ProcessingStats,
    ) -> Result<(), ClassifyError> {
        match state.joiner.feed_line(line)? {
            Some(record) => self.record(name, &record, state, stats),
            None => Ok(()),
        }
    }

    fn record(
        &self,
        name: &str,
        record: &Record,
        state: &mut SourceState,
        stats: &mut ProcessingStats,
    ) -> Result<(), ClassifyError> {
        let store = self.store();

        match self.classifier.classify(record, state)? {
            Classification::Ignored => return Ok(()),
            Classification::Event(event) => {
                store.append_event(name, &event);
                stats.events_created += 1;
            }
            Classification::RawOnly => {}
            Classification::Response {
                correlation_id,
                payload,
            } => {
                let correlation =
                    correlator::correlate(store, name, state, record, &correlation_id, &payload)?;
                if correlation == Correlation::Unmatched {
                    return Ok(());
                }
                stats.correlations += 1;
            }
        }

        store.append_raw(name, &record.raw_line());
        stats.raw_lines += 1;
        Ok(())
    }

    /// Write the source's raw lines, one per line, to its destination
    pub fn write_result(&self, name: &str, source_dir: &Path) -> Result<PathBuf> {
        let path = self.config().destination(name, source_dir);

        let mut content = String::new();
        for line in self.store().raw_lines(name) {
            content.push_str(&line);
            content.push('\n');
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write result file: {}", path.display()))?;
        Ok(path)
    }

    /// Every stored event as one JSON object per line, sources in the given order
    pub fn write_jsonl<'a, W: Write>(
        &self,
        sources: impl IntoIterator<Item = &'a str>,
        output: &mut W,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct ExportedEvent<'e> {
            source: &'e str,
            index: usize,
            event: &'e LogEvent,
        }

        for source in sources {
            let Some(log) = self.store().get(source) else {
                continue;
            };
            for (index, event) in log.events.iter().enumerate() {
                let exported = ExportedEvent {
                    source,
                    index,
                    event,
                };
                serde_json::to_writer(&mut *output, &exported)
                    .context("Failed to serialize event")?;
                output.write_all(b"\n")?;
            }
        }
        output.flush()?;
        Ok(())
    }
}

/// Read a whole log file and decode it with the detected encoding
pub fn read_log_file(path: &Path) -> Result<(String, &'static str), AnalyzeError> {
    let bytes = fs::read(path).map_err(|source| AnalyzeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (encoding, bom_length) = match Encoding::for_bom(&bytes) {
        Some((encoding, length)) => (encoding, length),
        None => {
            let mut detector = EncodingDetector::new();
            detector.feed(&bytes, true);
            (detector.guess(None, true), 0)
        }
    };

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_length..])
        .ok_or(AnalyzeError::Encoding {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        })?;

    Ok((text.into_owned(), encoding.name()))
}
