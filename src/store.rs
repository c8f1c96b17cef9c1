//! Thread-safe store of per-source results
//!
//! Every operation takes one exclusive lock over the whole map, so an append
//! from one worker and an in-place correlation rewrite from another never
//! interleave. Values are cloned in and cloned out.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::event::LogEvent;

/// Accumulated output of one source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceLog {
    pub events: Vec<LogEvent>,
    pub raw_lines: Vec<String>,
}

/// Handle to the shared store; clones share the same map
#[derive(Debug, Default, Clone)]
pub struct EventStore {
    sources: Arc<Mutex<HashMap<String, SourceLog>>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the source map with poison recovery
    fn lock(&self) -> MutexGuard<'_, HashMap<String, SourceLog>> {
        match self.sources.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("Worker thread panicked, recovering event store");
                poisoned.into_inner()
            }
        }
    }

    pub fn get(&self, source: &str) -> Option<SourceLog> {
        self.lock().get(source).cloned()
    }

    /// Copy of every source, keyed by name
    pub fn snapshot_all(&self) -> HashMap<String, SourceLog> {
        self.lock().clone()
    }

    pub fn set(&self, source: &str, log: SourceLog) {
        self.lock().insert(source.to_string(), log);
    }

    /// Start the source over with empty sequences
    pub fn reset(&self, source: &str) {
        self.set(source, SourceLog::default());
    }

    /// Append an event, creating the source on first use. Returns its index.
    pub fn append_event(&self, source: &str, event: &LogEvent) -> usize {
        let mut sources = self.lock();
        let log = sources.entry(source.to_string()).or_default();
        log.events.push(event.clone());
        log.events.len() - 1
    }

    pub fn append_raw(&self, source: &str, line: &str) {
        self.lock()
            .entry(source.to_string())
            .or_default()
            .raw_lines
            .push(line.to_string());
    }

    /// Overwrite the event at `index`. Returns false when there is none.
    pub fn replace_at(&self, source: &str, index: usize, event: &LogEvent) -> bool {
        let mut sources = self.lock();
        match sources
            .get_mut(source)
            .and_then(|log| log.events.get_mut(index))
        {
            Some(slot) => {
                *slot = event.clone();
                true
            }
            None => false,
        }
    }

    /// Most recent event of the source matching `predicate`, with its index
    pub fn find_last<F>(&self, source: &str, predicate: F) -> Option<(usize, LogEvent)>
    where
        F: Fn(&LogEvent) -> bool,
    {
        let sources = self.lock();
        let log = sources.get(source)?;
        log.events
            .iter()
            .enumerate()
            .rev()
            .find(|(_, event)| predicate(event))
            .map(|(index, event)| (index, event.clone()))
    }

    /// Number of events stored for the source
    pub fn size_of(&self, source: &str) -> usize {
        self.lock().get(source).map_or(0, |log| log.events.len())
    }

    pub fn raw_lines(&self, source: &str) -> Vec<String> {
        self.lock()
            .get(source)
            .map(|log| log.raw_lines.clone())
            .unwrap_or_default()
    }

    pub fn remove(&self, source: &str) -> Option<SourceLog> {
        self.lock().remove(source)
    }

    pub fn clear_all(&self) {
        self.lock().clear();
    }

    /// Number of sources
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
