//! Protocol payloads embedded in firmware log messages
//!
//! Frames are logged as JSON arrays with ad-hoc escaping:
//! - request: `[2, correlationId, action, payload]`
//! - response: `[3, correlationId, payload]`

use serde_json::{Map, Value};

use crate::error::ClassifyError;
use crate::event::{Action, ProtocolMessage};

/// Array position of the correlation id
pub const CORRELATION_ID_POSITION: usize = 1;
/// Array position of a request payload
pub const REQUEST_PAYLOAD_POSITION: usize = 3;
/// Array position of a response payload
pub const RESPONSE_PAYLOAD_POSITION: usize = 2;

const METER_MEASURAND: &str = "Energy.Active.Import.Register";
const SOC_MEASURAND: &str = "SoC";

/// Undo the quoting the firmware applies when it logs nested JSON
pub fn unescape(message: &str) -> String {
    message
        .replace("\\\\\"", "\"")
        .replace("\\\"", "\"")
        .replace("\"[", "[")
        .replace("]\"", "]")
        .replace("\"{", "{")
        .replace("}\"", "}")
}

/// Text parses as a JSON array, object or string
pub fn is_json(text: &str) -> bool {
    matches!(
        serde_json::from_str::<Value>(text),
        Ok(Value::Array(_) | Value::Object(_) | Value::String(_))
    )
}

/// Correlation id and payload of a logged frame.
///
/// Anything that is not a frame of the expected shape yields `None`.
pub fn parse_frame(message: &str, payload_position: usize) -> Option<(String, Value)> {
    let unescaped = unescape(message);
    let Ok(Value::Array(mut frame)) = serde_json::from_str::<Value>(&unescaped) else {
        return None;
    };

    if frame.len() <= payload_position {
        return None;
    }

    let correlation_id = match &frame[CORRELATION_ID_POSITION] {
        Value::String(id) => id.clone(),
        _ => return None,
    };

    Some((correlation_id, frame.swap_remove(payload_position)))
}

pub fn parse_request(message: &str) -> Option<(String, Value)> {
    parse_frame(message, REQUEST_PAYLOAD_POSITION)
}

pub fn parse_response(message: &str) -> Option<(String, Value)> {
    parse_frame(message, RESPONSE_PAYLOAD_POSITION)
}

fn as_object<'a>(
    payload: &'a Value,
    keyword: &'static str,
) -> Result<&'a Map<String, Value>, ClassifyError> {
    payload.as_object().ok_or(ClassifyError::PayloadShape {
        keyword,
        found: json_kind(payload),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Text form of a scalar field: strings verbatim, anything else as JSON
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).filter(|v| !v.is_null()).map(text)
}

fn shape_error(
    value: &Value,
    field: &'static str,
    expected: &'static str,
    keyword: &'static str,
) -> ClassifyError {
    ClassifyError::FieldShape {
        keyword,
        field,
        found: json_kind(value),
        expected,
    }
}

/// Object held by `key`; absent or null is `None`, any other value is an error
fn nested<'a>(
    object: &'a Map<String, Value>,
    key: &'static str,
    keyword: &'static str,
) -> Result<Option<&'a Map<String, Value>>, ClassifyError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(inner)) => Ok(Some(inner)),
        Some(other) => Err(shape_error(other, key, "an object", keyword)),
    }
}

/// Items listed under `key`; absent, null and empty values list nothing
fn entries<'a>(
    object: &'a Map<String, Value>,
    key: &'static str,
    keyword: &'static str,
) -> Result<&'a [Value], ClassifyError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::String(s)) if s.is_empty() => Ok(&[]),
        Some(Value::Object(o)) if o.is_empty() => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(shape_error(other, key, "a list", keyword)),
    }
}

/// One item of the list under `key`, which must be an object
fn entry<'a>(
    item: &'a Value,
    key: &'static str,
    keyword: &'static str,
) -> Result<&'a Map<String, Value>, ClassifyError> {
    item.as_object()
        .ok_or_else(|| shape_error(item, key, "a list of objects", keyword))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn is_nonzero_reading(value: &Value, keyword: &'static str) -> Result<bool, ClassifyError> {
    match value {
        Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f.trunc() != 0.0)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(|reading| reading != 0)
            .map_err(|_| ClassifyError::BadNumber {
                keyword,
                field: "SoC",
                value: s.clone(),
            }),
        Value::Bool(b) => Ok(*b),
        other => Err(ClassifyError::BadNumber {
            keyword,
            field: "SoC",
            value: other.to_string(),
        }),
    }
}

fn id_token(
    object: &Map<String, Value>,
    keyword: &'static str,
) -> Result<Option<String>, ClassifyError> {
    Ok(nested(object, "idToken", keyword)?.and_then(|token| field(token, "idToken")))
}

/// TransactionEvent request fields
pub fn transaction_request(
    payload: &Value,
    keyword: &'static str,
) -> Result<ProtocolMessage, ClassifyError> {
    let object = as_object(payload, keyword)?;
    let mut message = ProtocolMessage::default();

    if let Some(event_type) = field(object, "eventType") {
        message.event_type = event_type;
    }
    if let Some(connector_id) =
        nested(object, "evse", keyword)?.and_then(|evse| field(evse, "connectorId"))
    {
        message.connector_id = connector_id;
    }

    for meter_value in entries(object, "meterValue", keyword)? {
        let meter_value = entry(meter_value, "meterValue", keyword)?;
        for sample in entries(meter_value, "sampledValue", keyword)? {
            let sample = entry(sample, "sampledValue", keyword)?;
            let measurand = sample.get("measurand").and_then(Value::as_str);
            let Some(value) = sample.get("value").filter(|v| !v.is_null()) else {
                continue;
            };

            if measurand == Some(METER_MEASURAND) {
                message.meter_value = text(value);
            } else if measurand == Some(SOC_MEASURAND) && is_nonzero_reading(value, keyword)? {
                message.soc = text(value);
            }
        }

        if !message.meter_value.is_empty() && !message.soc.is_empty() {
            break;
        }
    }

    if let Some(id_tag) = id_token(object, keyword)? {
        message.id_tag = id_tag;
    }
    if let Some(offline) = object.get("offline").filter(|v| !v.is_null()) {
        message.offline = truthy(offline);
    }
    if let Some(timestamp) = field(object, "timestamp") {
        message.timestamp = timestamp;
    }
    if let Some(info) = nested(object, "transactionInfo", keyword)? {
        if let Some(state) = field(info, "chargingState") {
            message.charging_state = state;
        }
        if let Some(reason) = field(info, "stoppedReason") {
            message.stopped_reason = reason;
        }
        if let Some(transaction_id) = field(info, "transactionId") {
            message.transaction_id = transaction_id;
        }
    }
    if let Some(reason) = field(object, "triggerReason") {
        message.trigger_reason = reason;
    }

    Ok(message)
}

/// RequestStartTransaction and Authorize request fields
pub fn id_tag_request(
    payload: &Value,
    keyword: &'static str,
) -> Result<ProtocolMessage, ClassifyError> {
    let object = as_object(payload, keyword)?;
    Ok(ProtocolMessage {
        id_tag: id_token(object, keyword)?.unwrap_or_default(),
        ..Default::default()
    })
}

/// RequestStopTransaction request fields
pub fn stop_request(
    payload: &Value,
    keyword: &'static str,
) -> Result<ProtocolMessage, ClassifyError> {
    let object = as_object(payload, keyword)?;
    Ok(ProtocolMessage {
        transaction_id: field(object, "transactionId").unwrap_or_default(),
        ..Default::default()
    })
}

/// StatusNotification connector id and connector status
pub fn status_notification(
    payload: &Value,
    keyword: &'static str,
) -> Result<(String, String), ClassifyError> {
    let object = as_object(payload, keyword)?;
    Ok((
        field(object, "connectorId").unwrap_or_default(),
        field(object, "connectorStatus").unwrap_or_default(),
    ))
}

/// NotifyEvent fields; the last event datum carrying a value wins
pub fn notify_event(
    payload: &Value,
    keyword: &'static str,
) -> Result<ProtocolMessage, ClassifyError> {
    let object = as_object(payload, keyword)?;
    let mut message = ProtocolMessage::default();

    for datum in entries(object, "eventData", keyword)? {
        let datum = entry(datum, "eventData", keyword)?;
        if let Some(component) = nested(datum, "component", keyword)? {
            if let Some(connector_id) =
                nested(component, "evse", keyword)?.and_then(|evse| field(evse, "connectorId"))
            {
                message.connector_id = connector_id;
            }
        }
        if let Some(tech_info) = field(datum, "techInfo") {
            message.trigger_reason = tech_info;
        }
    }

    Ok(message)
}

/// Status carried by the response to `action`, empty when absent
pub fn response_status(action: Action, payload: &Value) -> Result<String, ClassifyError> {
    let keyword = "response";
    let object = as_object(payload, keyword)?;
    let status = match action {
        Action::TransactionEvent | Action::Authorize => {
            nested(object, "idTokenInfo", keyword)?.and_then(|info| field(info, "status"))
        }
        Action::RequestStartTransaction | Action::RequestStopTransaction => {
            field(object, "status")
        }
        Action::StatusNotification | Action::NotifyEvent => None,
    };
    Ok(status.unwrap_or_default())
}
