//! Log-event extraction for one source
//!
//! Lines flow through three stages:
//!
//! - `joiner`: raw lines to `(time, message, origin)` records
//! - `classifier`: records to `LogEvent`s via the keyword table
//! - `correlator`: protocol responses matched back onto their requests
//!
//! `state` holds the per-source scratch values the stages share, `pattern`
//! and `payload` hold the text and JSON extraction helpers.

use serde::{Deserialize, Serialize};

pub mod classifier;
pub mod correlator;
pub mod joiner;
pub mod pattern;
pub mod payload;
pub mod state;

pub use classifier::{Classification, Classifier};
pub use correlator::Correlation;
pub use joiner::{BracketTimeBoundary, RecordJoiner};
pub use state::SourceState;

/// Arrow of an outgoing protocol frame header ("================> [")
pub const OUTGOING_FRAME_ARROW: &str = "========>";
/// Arrow of an incoming protocol frame header ("<================ [")
pub const INCOMING_FRAME_ARROW: &str = "<========";

/// Origin tag of lines replayed from the offline queue
pub const OFFLINE_TAG: &str = "[OFFLINE]";

/// One logical log record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub time: String,
    pub message: String,
    pub origin: String,
}

impl Record {
    /// "[time] message", the form kept in the raw-line sequence
    pub fn raw_line(&self) -> String {
        format!("[{}] {}", self.time, self.message)
    }

    pub fn is_frame_header(&self) -> bool {
        has_frame_marker(&self.message)
    }

    pub fn is_offline(&self) -> bool {
        self.origin.contains(OFFLINE_TAG)
    }
}

/// Decide where multi-line records begin and end
pub trait RecordBoundary: Send {
    /// The line, without its line break, opens a new record
    fn starts_record(&self, line: &str) -> bool;
    /// The continuation line completes the record in progress. The line
    /// still carries its line break; the last line of a file may have none.
    fn closes_record(&self, line: &str) -> bool;
}

/// True when the message carries an outgoing or incoming frame header.
///
/// The arrow may be longer than the constant and may be separated from the
/// opening bracket by one space.
pub fn has_frame_marker(message: &str) -> bool {
    let outgoing = message
        .match_indices(OUTGOING_FRAME_ARROW)
        .any(|(pos, arrow)| opens_bracket(&message[pos + arrow.len()..]));

    outgoing
        || message
            .match_indices(INCOMING_FRAME_ARROW)
            .any(|(pos, arrow)| {
                opens_bracket(message[pos + arrow.len()..].trim_start_matches('='))
            })
}

fn opens_bracket(tail: &str) -> bool {
    tail.strip_prefix(' ').unwrap_or(tail).starts_with('[')
}
