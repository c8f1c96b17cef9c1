use super::{has_frame_marker, Record, RecordBoundary};
use crate::error::ClassifyError;

/// Tail of the bracketed timestamp that opens every firmware log line
pub const TIME_SIGNATURE: &str = ":00][";

/// Default boundary heuristic for firmware logs.
///
/// A line opens a record when it contains the time signature anywhere but at
/// position 0. A continuation closes the record when it is exactly `]`;
/// longer lines starting with `]` keep the record open. The one exception is
/// a file's unterminated last line, which also closes on `]` plus one
/// character.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketTimeBoundary;

impl RecordBoundary for BracketTimeBoundary {
    fn starts_record(&self, line: &str) -> bool {
        matches!(line.find(TIME_SIGNATURE), Some(pos) if pos > 0)
    }

    fn closes_record(&self, line: &str) -> bool {
        match line.strip_suffix('\n') {
            Some(body) => body.trim_end_matches('\r') == "]",
            None => line.starts_with(']') && line.chars().count() <= 2,
        }
    }
}

/// Joins raw lines into records.
///
/// Every line that opens a record is returned as a complete record right
/// away. Continuation lines are appended to it, and the joined record is
/// returned again when a closing line arrives. The record in progress
/// survives across files of the same source.
pub struct RecordJoiner {
    boundary: Box<dyn RecordBoundary>,
    current: Option<Record>,
}

impl RecordJoiner {
    pub fn new() -> Self {
        Self::with_boundary(Box::new(BracketTimeBoundary))
    }

    pub fn with_boundary(boundary: Box<dyn RecordBoundary>) -> Self {
        Self {
            boundary,
            current: None,
        }
    }

    /// Feed one raw line, line break included, returning a record when one
    /// is complete.
    ///
    /// A continuation line with no record in progress is an error: a
    /// signature line without a message tag leaves nothing to continue.
    pub fn feed_line(&mut self, raw: &str) -> Result<Option<Record>, ClassifyError> {
        let line = raw.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            return Ok(None);
        }

        if self.boundary.starts_record(line) {
            self.current = split_record(line);
            return Ok(self.current.clone());
        }

        let Some(current) = self.current.as_mut() else {
            return Err(ClassifyError::DetachedContinuation {
                line: line.to_string(),
            });
        };

        // Pretty-printed frames: the header line is replaced by the array it opens
        if has_frame_marker(&current.message) {
            current.message = "[".to_string();
        }
        current.message.push_str(line.trim());

        if self.boundary.closes_record(raw) {
            Ok(Some(current.clone()))
        } else {
            Ok(None)
        }
    }

    /// Record currently being joined
    pub fn current(&self) -> Option<&Record> {
        self.current.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        self.current.is_some()
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

impl Default for RecordJoiner {
    fn default() -> Self {
        Self::new()
    }
}

/// Split "[time][tags...][F1] message" into its parts.
///
/// The message follows the first "[F3] " tag, or the first "[F1] " tag when
/// both are present.
fn split_record(line: &str) -> Option<Record> {
    let body = line.strip_prefix('[')?;
    let (time, rest) = body.split_once("][")?;

    let mut message = rest.split_once("[F3] ").map(|(_, msg)| msg);
    if let Some((_, msg)) = rest.split_once("[F1] ") {
        message = Some(msg);
    }
    let message = message?;

    if time.is_empty() || message.is_empty() {
        return None;
    }

    Some(Record {
        time: time.to_string(),
        message: message.trim().to_string(),
        origin: line.trim().to_string(),
    })
}
