//! Keyword-driven classification of firmware log records
//!
//! The first keyword found in the message selects the extraction rule. When
//! no keyword applies, bare controller commands are recognised, and anything
//! left that parses as a protocol frame becomes a candidate response for the
//! correlator.

use once_cell::sync::Lazy;
use serde_json::Value;

use super::pattern::{Fields, Template};
use super::payload;
use super::state::SourceState;
use super::Record;
use crate::error::ClassifyError;
use crate::event::{Action, Connection, ConnectorState, LogEvent};

/// Origin tag of the module that logs bare controller commands
pub const COMMAND_ORIGIN: &str = "dspmanager.cpp:";

/// Responses to this request are never correlated
const IGNORED_RESPONSE: &str = "\"NotifyReport\"";

/// Keywords in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    CoreLibStart,
    WsConnected,
    WsDisconnected,
    StopButton,
    EmergencyButton,
    NayaxVend,
    TransactionEvent,
    RequestStartTransaction,
    RequestStopTransaction,
    Authorize,
    StatusNotification,
    NotifyEvent,
    PlugIn,
    PlugOut,
    MainboardStatus,
    PreviousStatus,
    CurrentStatus,
    MainboardCodes,
    Sequence,
}

impl Keyword {
    pub const ALL: [Keyword; 19] = [
        Keyword::CoreLibStart,
        Keyword::WsConnected,
        Keyword::WsDisconnected,
        Keyword::StopButton,
        Keyword::EmergencyButton,
        Keyword::NayaxVend,
        Keyword::TransactionEvent,
        Keyword::RequestStartTransaction,
        Keyword::RequestStopTransaction,
        Keyword::Authorize,
        Keyword::StatusNotification,
        Keyword::NotifyEvent,
        Keyword::PlugIn,
        Keyword::PlugOut,
        Keyword::MainboardStatus,
        Keyword::PreviousStatus,
        Keyword::CurrentStatus,
        Keyword::MainboardCodes,
        Keyword::Sequence,
    ];

    /// Substring that selects this rule
    pub fn text(&self) -> &'static str {
        match self {
            Keyword::CoreLibStart => "CORE LIB START",
            Keyword::WsConnected => "ws connected",
            Keyword::WsDisconnected => "ws disconnected",
            Keyword::StopButton => "Push Stop Button",
            Keyword::EmergencyButton => "Emergency Button emeStatus",
            Keyword::NayaxVend => "VPOS -> HMI NAYAX < Vend",
            Keyword::TransactionEvent => "\"TransactionEvent\",",
            Keyword::RequestStartTransaction => "\"RequestStartTransaction\",",
            Keyword::RequestStopTransaction => "\"RequestStopTransaction\",",
            Keyword::Authorize => "\"Authorize\",",
            Keyword::StatusNotification => "\"StatusNotification\",",
            Keyword::NotifyEvent => "\"NotifyEvent\",",
            Keyword::PlugIn => ", Plug in for id",
            Keyword::PlugOut => ", Plug Out for id",
            Keyword::MainboardStatus => "RECV MAINBOARD STATUS index",
            Keyword::PreviousStatus => "evse prev status :",
            Keyword::CurrentStatus => "evse aftr status :",
            Keyword::MainboardCodes => "mbStatusProcessing",
            Keyword::Sequence => "] Sequence Name1 [",
        }
    }

    /// First keyword in priority order contained in the message
    pub fn find(message: &str) -> Option<Keyword> {
        Self::ALL
            .iter()
            .copied()
            .find(|keyword| message.contains(keyword.text()))
    }

    fn action(&self) -> Option<Action> {
        match self {
            Keyword::TransactionEvent => Some(Action::TransactionEvent),
            Keyword::RequestStartTransaction => Some(Action::RequestStartTransaction),
            Keyword::RequestStopTransaction => Some(Action::RequestStopTransaction),
            Keyword::Authorize => Some(Action::Authorize),
            Keyword::StatusNotification => Some(Action::StatusNotification),
            Keyword::NotifyEvent => Some(Action::NotifyEvent),
            _ => None,
        }
    }
}

fn template(source: &'static str) -> Template {
    Template::compile(source).expect("failed to compile extraction template")
}

static EMERGENCY: Lazy<Template> =
    Lazy::new(|| template("{etc}Emergency Button emeStatus {emergencyStatus}"));
static NAYAX: Lazy<Template> = Lazy::new(|| template("VPOS -> HMI NAYAX < Vend {paymentStatus}"));
static PLUG_IN: Lazy<Template> = Lazy::new(|| template("{etc}Plug in for id {connectorId}"));
static PLUG_OUT: Lazy<Template> = Lazy::new(|| template("{etc}Plug Out for id {connectorId}"));
static MAINBOARD: Lazy<Template> = Lazy::new(|| {
    template("{etc1}RECV MAINBOARD STATUS index ({mainboardIndex}) connectorId({connectorId}){etc2}")
});
static PREVIOUS_STATUS: Lazy<Template> =
    Lazy::new(|| template("evse prev status : {connectorStatus}"));
static CURRENT_STATUS: Lazy<Template> =
    Lazy::new(|| template("evse aftr status : {connectorStatus}"));
static CONNECTOR_COLON: Lazy<Template> =
    Lazy::new(|| template("{etc1}connectorId : [{connectorId}]{etc2}"));
static CONNECTOR_BARE: Lazy<Template> =
    Lazy::new(|| template("{etc1}connectorId [{connectorId}]{etc2}"));
static CODES: Lazy<Template> = Lazy::new(|| {
    template("{etc1}errorCode [{fault}] errorCodePLC [{faultPLC}] finishCode [{finish}]{etc2}")
});
static SEQUENCE: Lazy<Template> = Lazy::new(|| {
    template(
        "{etc}ConnectorId [{connectorId}] Sequence Name1 [{sBit1}] [{sInt1}] Sequence Name2 [{sBit2}] [{sInt2}]",
    )
});

/// Outcome of classifying one record
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Nothing is recorded
    Ignored,
    /// A new event, recorded together with the raw line
    Event(LogEvent),
    /// Only the raw line is recorded
    RawOnly,
    /// Possibly the answer to a pending request
    Response {
        correlation_id: String,
        payload: Value,
    },
}

/// Maps records to events, updating the source's scratch state
#[derive(Debug, Clone)]
pub struct Classifier {
    command_origin: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            command_origin: COMMAND_ORIGIN.to_string(),
        }
    }

    pub fn with_command_origin(origin: impl Into<String>) -> Self {
        Self {
            command_origin: origin.into(),
        }
    }

    /// Classify one record.
    ///
    /// An error means the record matched a keyword but its fields could not
    /// be extracted; the caller stops reading the current file.
    pub fn classify(
        &self,
        record: &Record,
        state: &mut SourceState,
    ) -> Result<Classification, ClassifyError> {
        if record.is_frame_header() || record.is_offline() {
            return Ok(Classification::Ignored);
        }

        if let Some(keyword) = Keyword::find(&record.message) {
            // A suppressed keyword falls through to the lower-priority rules
            if let Some(classification) = self.extract(keyword, record, state)? {
                return Ok(classification);
            }
        }

        if let Some(event) = self.command(record) {
            return Ok(Classification::Event(event));
        }

        Ok(candidate_response(&record.message))
    }

    fn extract(
        &self,
        keyword: Keyword,
        record: &Record,
        state: &mut SourceState,
    ) -> Result<Option<Classification>, ClassifyError> {
        let message = record.message.as_str();
        let mut event = LogEvent::new(record.time.as_str());

        match keyword {
            Keyword::CoreLibStart => event.evse_event = "Start App".to_string(),
            Keyword::WsConnected => event.evse_event = "WS Connected".to_string(),
            Keyword::WsDisconnected => event.evse_event = "WS Disconnected".to_string(),
            Keyword::StopButton => event.evse_event = "User Stop".to_string(),

            Keyword::EmergencyButton => {
                let fields = parse(&EMERGENCY, keyword, message)?;
                let label = match fields.get("emergencyStatus") {
                    Some("1") => "Emergency On",
                    Some("0") => "Emergency Off",
                    _ => "",
                };
                if state.last_emergency == label {
                    return Ok(None);
                }
                state.last_emergency = label.to_string();
                event.evse_event = label.to_string();
            }

            Keyword::NayaxVend => {
                let fields = parse(&NAYAX, keyword, message)?;
                event.evse_event = format!("Nayax {}", text(&fields, "paymentStatus"));
            }

            Keyword::TransactionEvent => {
                let Some((id, body)) = request_frame(keyword, message) else {
                    return Ok(Some(Classification::Ignored));
                };
                let mut protocol = payload::transaction_request(&body, keyword.text())?;
                if protocol.event_type == "Updated" && protocol.trigger_reason == "MeterValuePeriodic" {
                    return Ok(Some(Classification::Ignored));
                }
                protocol.action = Some(Action::TransactionEvent);
                protocol.correlation_id = id.clone();
                state.register(id, Action::TransactionEvent);
                event.protocol = protocol;
            }

            Keyword::RequestStartTransaction
            | Keyword::RequestStopTransaction
            | Keyword::Authorize => {
                let Some((id, body)) = request_frame(keyword, message) else {
                    return Ok(Some(Classification::Ignored));
                };
                let Some(action) = keyword.action() else {
                    return Ok(Some(Classification::Ignored));
                };
                state.register(id.clone(), action);

                let mut protocol = match action {
                    Action::RequestStopTransaction => payload::stop_request(&body, keyword.text())?,
                    _ => payload::id_tag_request(&body, keyword.text())?,
                };
                protocol.action = Some(action);
                protocol.correlation_id = id;
                event.protocol = protocol;
            }

            Keyword::StatusNotification => {
                let Some((_, body)) = request_frame(keyword, message) else {
                    return Ok(Some(Classification::Ignored));
                };
                let (connector_id, status) = payload::status_notification(&body, keyword.text())?;
                let connector = ConnectorState {
                    notification: status,
                    ..Default::default()
                };
                match connector_id.as_str() {
                    "1" => event.connector1 = connector,
                    "2" => event.connector2 = connector,
                    _ => {}
                }
            }

            Keyword::NotifyEvent => {
                let Some((id, body)) = request_frame(keyword, message) else {
                    return Ok(Some(Classification::Ignored));
                };
                let mut protocol = payload::notify_event(&body, keyword.text())?;
                protocol.action = Some(Action::NotifyEvent);
                protocol.correlation_id = id;
                event.protocol = protocol;
            }

            Keyword::PlugIn | Keyword::PlugOut => {
                let (template, connection) = if keyword == Keyword::PlugIn {
                    (&*PLUG_IN, Connection::On)
                } else {
                    (&*PLUG_OUT, Connection::Off)
                };
                let fields = parse(template, keyword, message)?;
                let id: i64 = number(keyword, &fields, "connectorId")?;
                event.set_connector(
                    if id == 1 { 1 } else { 2 },
                    ConnectorState::with_connection(connection),
                );
            }

            Keyword::MainboardStatus => {
                let fields = parse(&MAINBOARD, keyword, message)?;
                state.connector_id = number(keyword, &fields, "connectorId")?;
                return Ok(Some(Classification::RawOnly));
            }

            // Without an active connector only the timestamp is recorded
            Keyword::PreviousStatus | Keyword::CurrentStatus if state.connector_id == 0 => {}

            Keyword::PreviousStatus => {
                let fields = parse(&PREVIOUS_STATUS, keyword, message)?;
                let connector = ConnectorState {
                    previous_status: text(&fields, "connectorStatus").to_string(),
                    ..Default::default()
                };
                event.set_connector(state.connector_id, connector);
            }

            Keyword::CurrentStatus => {
                let fields = parse(&CURRENT_STATUS, keyword, message)?;
                let connector = ConnectorState {
                    current_status: text(&fields, "connectorStatus").to_string(),
                    ..Default::default()
                };
                event.set_connector(state.take_connector(), connector);
            }

            Keyword::MainboardCodes => {
                let announced = if message.find("connectorId : [").is_some_and(|pos| pos > 0) {
                    CONNECTOR_COLON.parse(message)
                } else if message.find("connectorId [").is_some_and(|pos| pos > 0) {
                    CONNECTOR_BARE.parse(message)
                } else {
                    None
                };
                if let Some(fields) = announced {
                    state.connector_id = number(keyword, &fields, "connectorId")?;
                }

                let Some(codes) = CODES.parse(message) else {
                    return Ok(Some(Classification::Ignored));
                };
                if state.connector_id == 0 {
                    return Ok(Some(Classification::Ignored));
                }

                let connector = ConnectorState::with_codes(
                    text(&codes, "finish"),
                    text(&codes, "fault"),
                    text(&codes, "faultPLC"),
                );
                event.set_connector(state.take_connector(), connector);
            }

            Keyword::Sequence => {
                if let Some(fields) = SEQUENCE.parse(message) {
                    let connector = ConnectorState {
                        sequence_name1: text(&fields, "sBit1").to_string(),
                        sequence_name2: text(&fields, "sBit2").to_string(),
                        ..Default::default()
                    };
                    let id = if fields.get("connectorId") == Some("1") { 1 } else { 2 };
                    event.set_connector(id, connector);
                }
            }
        }

        Ok(Some(Classification::Event(event)))
    }

    /// Bare command words logged by the controller module
    fn command(&self, record: &Record) -> Option<LogEvent> {
        if !record.origin.contains(&self.command_origin) {
            return None;
        }

        let command = match record.message.as_str() {
            "init" => "Init",
            "CommunicationStart" => "Comm.Start",
            "start" => "Start",
            "stop" => "Stop",
            _ => return None,
        };

        let mut event = LogEvent::new(record.time.as_str());
        event.command = command.to_string();
        Some(event)
    }
}

fn candidate_response(message: &str) -> Classification {
    if message.find(IGNORED_RESPONSE).is_some_and(|pos| pos > 0) || !payload::is_json(message) {
        return Classification::Ignored;
    }

    match payload::parse_response(message) {
        Some((correlation_id, payload)) if !correlation_id.is_empty() => {
            Classification::Response {
                correlation_id,
                payload,
            }
        }
        _ => {
            tracing::debug!(line = message, "JSON line is not a protocol response");
            Classification::Ignored
        }
    }
}

/// Correlation id and payload of a request frame; `None` when either is missing
fn request_frame(keyword: Keyword, message: &str) -> Option<(String, Value)> {
    match payload::parse_request(message) {
        Some((id, body)) if !id.is_empty() => Some((id, body)),
        _ => {
            tracing::debug!(keyword = keyword.text(), line = message, "Malformed protocol request");
            None
        }
    }
}

fn parse<'t>(
    template: &Template,
    keyword: Keyword,
    message: &'t str,
) -> Result<Fields<'t>, ClassifyError> {
    template
        .parse(message)
        .ok_or_else(|| ClassifyError::TemplateMismatch {
            keyword: keyword.text(),
            template: template.source(),
            message: message.to_string(),
        })
}

fn text<'t>(fields: &Fields<'t>, name: &str) -> &'t str {
    fields.get(name).unwrap_or_default()
}

fn number<T: std::str::FromStr>(
    keyword: Keyword,
    fields: &Fields<'_>,
    field: &'static str,
) -> Result<T, ClassifyError> {
    let value = text(fields, field);
    value.trim().parse().map_err(|_| ClassifyError::BadNumber {
        keyword: keyword.text(),
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIME: &str = "2024-05-01 10:15:42.120-09:00";

    fn record(message: &str) -> Record {
        Record {
            time: TIME.to_string(),
            message: message.to_string(),
            origin: format!("[{}][main.cpp:42][F1] {}", TIME, message),
        }
    }

    fn event(classification: Classification) -> LogEvent {
        match classification {
            Classification::Event(event) => event,
            other => panic!("expected an event, got {:?}", other),
        }
    }

    fn classify(message: &str, state: &mut SourceState) -> Classification {
        Classifier::new().classify(&record(message), state).unwrap()
    }

    #[test]
    fn test_keyword_priority() {
        let mut state = SourceState::new();
        let result = event(classify("ws connected, Plug in for id 2", &mut state));
        assert_eq!(result.evse_event, "WS Connected");
        assert!(result.connector2.is_empty());
        assert_eq!(
            Keyword::find("ws connected, Plug in for id 2"),
            Some(Keyword::WsConnected)
        );
    }

    #[test]
    fn test_simple_labels() {
        let mut state = SourceState::new();
        for (message, label) in [
            ("==== CORE LIB START ====", "Start App"),
            ("ws disconnected (1006)", "WS Disconnected"),
            ("HMI Push Stop Button", "User Stop"),
            ("VPOS -> HMI NAYAX < Vend Approved", "Nayax Approved"),
        ] {
            let result = event(classify(message, &mut state));
            assert_eq!(result.evse_event, label);
            assert_eq!(result.time, TIME);
        }
    }

    #[test]
    fn test_frame_headers_and_offline_lines_are_skipped() {
        let mut state = SourceState::new();
        assert_eq!(classify("================> [", &mut state), Classification::Ignored);

        let mut offline = record("ws connected");
        offline.origin = format!("[{}][OFFLINE][F1] ws connected", TIME);
        assert_eq!(
            Classifier::new().classify(&offline, &mut state).unwrap(),
            Classification::Ignored
        );
    }

    #[test]
    fn test_emergency_deduplication() {
        let mut state = SourceState::new();
        let on = "EVSE Emergency Button emeStatus 1";

        assert_eq!(event(classify(on, &mut state)).evse_event, "Emergency On");
        assert_eq!(classify(on, &mut state), Classification::Ignored);
        assert_eq!(
            event(classify("EVSE Emergency Button emeStatus 0", &mut state)).evse_event,
            "Emergency Off"
        );
        assert_eq!(state.last_emergency, "Emergency Off");
    }

    #[test]
    fn test_unknown_emergency_status_matches_initial_label() {
        let mut state = SourceState::new();
        assert_eq!(
            classify("EVSE Emergency Button emeStatus 7", &mut state),
            Classification::Ignored
        );
    }

    #[test]
    fn test_emergency_template_mismatch_aborts() {
        let mut state = SourceState::new();
        let err = Classifier::new()
            .classify(&record("Emergency Button emeStatus 1"), &mut state)
            .unwrap_err();
        assert!(matches!(err, ClassifyError::TemplateMismatch { .. }));
    }

    #[test]
    fn test_authorize_request_registers_pending() {
        let mut state = SourceState::new();
        let message = r#"[2,"U1","Authorize",{"idToken":{"idToken":"CARD-7","type":"ISO14443"}}]"#;

        let result = event(classify(message, &mut state));
        assert_eq!(result.protocol.action, Some(Action::Authorize));
        assert_eq!(result.protocol.correlation_id, "U1");
        assert_eq!(result.protocol.id_tag, "CARD-7");
        assert!(state.is_pending("U1"));
    }

    #[test]
    fn test_escaped_request_payload() {
        let mut state = SourceState::new();
        let message =
            r#"[2,"S9","RequestStopTransaction","{\"transactionId\":\"TX-1\"}"]"#;
        let result = event(classify(message, &mut state));
        assert_eq!(result.protocol.action, Some(Action::RequestStopTransaction));
        assert_eq!(result.protocol.transaction_id, "TX-1");
        assert_eq!(state.pending().get("S9"), Some(&Action::RequestStopTransaction));
    }

    #[test]
    fn test_periodic_meter_values_are_dropped() {
        let mut state = SourceState::new();
        let message = r#"[2,"T1","TransactionEvent",{"eventType":"Updated","triggerReason":"MeterValuePeriodic"}]"#;
        assert_eq!(classify(message, &mut state), Classification::Ignored);
        assert!(!state.is_pending("T1"));

        let message = r#"[2,"T2","TransactionEvent",{"eventType":"Started","triggerReason":"Authorized","evse":{"connectorId":1}}]"#;
        let result = event(classify(message, &mut state));
        assert_eq!(result.protocol.event_type, "Started");
        assert_eq!(result.protocol.connector_id, "1");
        assert!(state.is_pending("T2"));
    }

    #[test]
    fn test_request_without_correlation_id_is_ignored() {
        let mut state = SourceState::new();
        let message = r#"[2,"","Authorize",{"idToken":{"idToken":"A"}}]"#;
        assert_eq!(classify(message, &mut state), Classification::Ignored);
        let message = r#"[2,"U1","Authorize",{"#;
        assert_eq!(classify(message, &mut state), Classification::Ignored);
        assert!(state.pending().is_empty());
    }

    #[test]
    fn test_status_notification_sets_connector_notification() {
        let mut state = SourceState::new();
        let message = r#"[2,"N1","StatusNotification",{"connectorId":2,"connectorStatus":"Faulted"}]"#;
        let result = event(classify(message, &mut state));
        assert!(result.connector2.is_bad_status());
        assert!(result.protocol.is_empty());
        assert!(!state.is_pending("N1"));
    }

    #[test]
    fn test_notify_event_not_registered() {
        let mut state = SourceState::new();
        let message = r#"[2,"E1","NotifyEvent",{"eventData":[{"component":{"evse":{"connectorId":1}},"techInfo":"RCD trip"}]}]"#;
        let result = event(classify(message, &mut state));
        assert_eq!(result.protocol.action, Some(Action::NotifyEvent));
        assert_eq!(result.protocol.trigger_reason, "RCD trip");
        assert!(state.pending().is_empty());
    }

    #[test]
    fn test_plug_in_and_out_route_by_id() {
        let mut state = SourceState::new();
        let plugged = event(classify("EVSE 1, Plug in for id 1", &mut state));
        assert_eq!(plugged.connector1.connection, Connection::On);

        let unplugged = event(classify("EVSE 2, Plug Out for id 2", &mut state));
        assert_eq!(unplugged.connector2.connection, Connection::Off);

        let err = Classifier::new()
            .classify(&record("EVSE, Plug in for id x"), &mut state)
            .unwrap_err();
        assert!(matches!(err, ClassifyError::BadNumber { field: "connectorId", .. }));
    }

    #[test]
    fn test_mainboard_status_drives_connector_statuses() {
        let mut state = SourceState::new();

        // No active connector yet: timestamp only
        let bare = event(classify("evse prev status : ready", &mut state));
        assert!(bare.connector1.is_empty() && bare.connector2.is_empty());

        let raw = classify(
            "[MB] RECV MAINBOARD STATUS index (4) connectorId(2) len 12",
            &mut state,
        );
        assert_eq!(raw, Classification::RawOnly);
        assert_eq!(state.connector_id, 2);

        let prev = event(classify("evse prev status : charging", &mut state));
        assert_eq!(prev.connector2.previous_status, "charging");
        assert_eq!(state.connector_id, 2);

        let aftr = event(classify("evse aftr status : finish", &mut state));
        assert_eq!(aftr.connector2.current_status, "finish");
        assert_eq!(state.connector_id, 0);
    }

    #[test]
    fn test_mainboard_codes() {
        let mut state = SourceState::new();
        let message = "mbStatusProcessing connectorId : [1] errorCode [13] errorCodePLC [0] finishCode [3] end";
        let result = event(classify(message, &mut state));
        assert_eq!(result.connector1.finish_code, "3");
        assert_eq!(result.connector1.error_code, "13");
        assert_eq!(result.connector1.plc_error_code, "");
        assert_eq!(state.connector_id, 0);

        // No connector announced or active
        let message = "mbStatusProcessing errorCode [13] errorCodePLC [0] finishCode [3] end";
        assert_eq!(classify(message, &mut state), Classification::Ignored);

        // Connector announced but no codes
        assert_eq!(
            classify("mbStatusProcessing connectorId [2] idle", &mut state),
            Classification::Ignored
        );
        assert_eq!(state.connector_id, 2);
    }

    #[test]
    fn test_sequence_bits() {
        let mut state = SourceState::new();
        let message = "SEQ ConnectorId [1] Sequence Name1 [0000000000000001] [1] Sequence Name2 [1000000000000000] [32768]";
        let result = event(classify(message, &mut state));
        assert_eq!(result.connector1.sequence_name1, "0000000000000001");
        assert_eq!(result.connector1.sequence_name2, "1000000000000000");
        assert_eq!(result.connector1.sequence_bits().map(|b| b.len()), Some(32));

        let partial = event(classify("x] Sequence Name1 [garbled", &mut state));
        assert!(partial.connector1.is_empty() && partial.connector2.is_empty());
    }

    #[test]
    fn test_templates_ignore_case() {
        let mut state = SourceState::new();
        let message = "mb connectorId [1] Sequence Name1 [0101] [5] Sequence Name2 [0011] [3]";
        let result = event(classify(message, &mut state));
        assert_eq!(result.connector1.sequence_name1, "0101");
        assert_eq!(result.connector1.sequence_name2, "0011");

        let message = "mbStatusProcessing connectorId : [2] ErrorCode [13] errorcodePLC [0] FinishCode [3] end";
        let result = event(classify(message, &mut state));
        assert_eq!(result.connector2.finish_code, "3");
        assert_eq!(result.connector2.error_code, "13");
    }

    #[test]
    fn test_commands_need_controller_origin() {
        let mut state = SourceState::new();
        let mut command = record("CommunicationStart");
        command.origin = format!("[{}][dspmanager.cpp:120][F1] CommunicationStart", TIME);

        let result = event(Classifier::new().classify(&command, &mut state).unwrap());
        assert_eq!(result.command, "Comm.Start");

        assert_eq!(classify("CommunicationStart", &mut state), Classification::Ignored);
    }

    #[test]
    fn test_candidate_responses() {
        let mut state = SourceState::new();
        match classify(r#"[3,"U1",{"idTokenInfo":{"status":"Accepted"}}]"#, &mut state) {
            Classification::Response {
                correlation_id,
                payload,
            } => {
                assert_eq!(correlation_id, "U1");
                assert_eq!(payload["idTokenInfo"]["status"], "Accepted");
            }
            other => panic!("expected a response, got {:?}", other),
        }

        assert_eq!(
            classify(r#"[3,"R1",{"x":"NotifyReport"}]"#, &mut state),
            Classification::Ignored
        );
        assert_eq!(classify("free text", &mut state), Classification::Ignored);
        assert_eq!(classify(r#"{"a":1}"#, &mut state), Classification::Ignored);
    }
}
