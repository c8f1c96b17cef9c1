use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::codes;

/// Plug transition observed on a connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connection {
    #[default]
    None,
    On,
    Off,
}

impl Connection {
    pub fn label(&self) -> &'static str {
        match self {
            Connection::None => "",
            Connection::On => "On",
            Connection::Off => "Off",
        }
    }
}

/// Facts observed for one connector at one point in the log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorState {
    pub connection: Connection,
    pub previous_status: String,
    pub current_status: String,
    pub notification: String,
    pub finish_code: String,
    pub error_code: String,
    pub plc_error_code: String,
    pub sequence_name1: String,
    pub sequence_name2: String,
}

/// Connector statuses at which the sequence bits carry meaning
const TERMINAL_STATUSES: [&str; 3] = ["finish", "thankYou", "fault"];

impl ConnectorState {
    pub fn with_connection(connection: Connection) -> Self {
        Self {
            connection,
            ..Default::default()
        }
    }

    /// Build a state from the raw finish/error/PLC codes of a mainboard line.
    /// Zero and non-numeric codes are stored as empty.
    pub fn with_codes(finish: &str, error: &str, plc: &str) -> Self {
        Self {
            finish_code: normalize_code(finish),
            error_code: normalize_code(error),
            plc_error_code: normalize_code(plc),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn connection_label(&self) -> &'static str {
        self.connection.label()
    }

    /// Faulted or Unavailable notification
    pub fn is_bad_status(&self) -> bool {
        matches!(self.notification.as_str(), "Faulted" | "Unavailable")
    }

    pub fn has_fault_codes(&self) -> bool {
        !self.finish_code.is_empty() || !self.error_code.is_empty() || !self.plc_error_code.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        TERMINAL_STATUSES.contains(&self.current_status.as_str())
    }

    /// Symbolic labels of the known codes joined with " / "
    pub fn detail_codes(&self) -> String {
        [
            codes::finish_code_label(&self.finish_code),
            codes::error_code_label(&self.error_code),
            codes::plc_error_code_label(&self.plc_error_code),
        ]
        .iter()
        .filter(|label| !label.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" / ")
    }

    /// Both sequence strings as one bit vector, bit 0 first.
    ///
    /// `sequence_name2` holds the high half, so the combined string is
    /// name2 followed by name1, read from the right.
    pub fn sequence_bits(&self) -> Option<Vec<bool>> {
        if self.sequence_name1.is_empty() || self.sequence_name2.is_empty() {
            return None;
        }

        let combined = format!("{}{}", self.sequence_name2, self.sequence_name1);
        Some(combined.chars().rev().map(|c| c == '1').collect())
    }
}

fn normalize_code(raw: &str) -> String {
    let code = raw.trim();
    if code.is_empty()
        || !code.chars().all(|c| c.is_ascii_digit())
        || code.trim_start_matches('0').is_empty()
    {
        String::new()
    } else {
        code.to_string()
    }
}

/// Protocol actions recognised in firmware logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    TransactionEvent,
    RequestStartTransaction,
    RequestStopTransaction,
    Authorize,
    StatusNotification,
    NotifyEvent,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::TransactionEvent => "TransactionEvent",
            Action::RequestStartTransaction => "RequestStartTransaction",
            Action::RequestStopTransaction => "RequestStopTransaction",
            Action::Authorize => "Authorize",
            Action::StatusNotification => "StatusNotification",
            Action::NotifyEvent => "NotifyEvent",
        }
    }

    /// Actions whose responses are matched back onto the request event
    pub fn expects_response(&self) -> bool {
        matches!(
            self,
            Action::TransactionEvent
                | Action::RequestStartTransaction
                | Action::RequestStopTransaction
                | Action::Authorize
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TransactionEvent" => Ok(Action::TransactionEvent),
            "RequestStartTransaction" => Ok(Action::RequestStartTransaction),
            "RequestStopTransaction" => Ok(Action::RequestStopTransaction),
            "Authorize" => Ok(Action::Authorize),
            "StatusNotification" => Ok(Action::StatusNotification),
            "NotifyEvent" => Ok(Action::NotifyEvent),
            other => Err(format!("Unknown action: {}", other)),
        }
    }
}

/// Snapshot of one protocol exchange, filled from the request line and
/// completed in place once the response line is seen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolMessage {
    pub action: Option<Action>,
    pub correlation_id: String,
    pub connector_id: String,
    pub event_type: String,
    pub charging_state: String,
    pub stopped_reason: String,
    pub trigger_reason: String,
    pub transaction_id: String,
    pub id_tag: String,
    pub meter_value: String,
    pub soc: String,
    pub timestamp: String,
    pub offline: bool,
    pub response: String,
    pub response_time: String,
}

impl ProtocolMessage {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn is_answered(&self) -> bool {
        !self.response.is_empty()
    }

    /// Status part of the response label ("<time> <status>")
    pub fn response_status(&self) -> Option<&str> {
        let (_, status) = self.response.split_once(' ')?;
        if status.is_empty() {
            None
        } else {
            Some(status)
        }
    }

    /// Answered with anything other than "Accepted"
    pub fn is_bad_response(&self) -> bool {
        self.response_status()
            .is_some_and(|status| status != "Accepted")
    }
}

/// One structured record extracted from a log source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub time: String,
    pub evse_event: String,
    pub command: String,
    pub connector1: ConnectorState,
    pub connector2: ConnectorState,
    pub protocol: ProtocolMessage,
}

impl LogEvent {
    pub fn new(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            ..Default::default()
        }
    }

    /// Place a connector state on connector 1, or on connector 2 for any other id
    pub fn set_connector(&mut self, connector_id: u32, state: ConnectorState) {
        if connector_id == 1 {
            self.connector1 = state;
        } else {
            self.connector2 = state;
        }
    }

    pub fn connector(&self, connector_id: u32) -> &ConnectorState {
        if connector_id == 1 {
            &self.connector1
        } else {
            &self.connector2
        }
    }

    /// True when the event carries the request this correlation id belongs to
    pub fn is_request(&self, correlation_id: &str, action: Action) -> bool {
        self.protocol.correlation_id == correlation_id && self.protocol.action == Some(action)
    }
}
