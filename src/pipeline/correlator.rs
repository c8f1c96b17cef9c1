use once_cell::sync::Lazy;
use serde_json::Value;

use super::pattern::Template;
use super::payload;
use super::state::SourceState;
use super::Record;
use crate::error::ClassifyError;
use crate::event::Action;
use crate::store::EventStore;

static LINE_TIME: Lazy<Template> = Lazy::new(|| {
    Template::compile("{date} {time}-{zone}").expect("failed to compile line time template")
});

/// Result of offering a candidate response to the correlator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correlation {
    /// No pending request matches; nothing is recorded
    Unmatched,
    /// A pending request was answered and is no longer pending.
    /// `rewritten` holds the index of the updated request event, if any.
    Resolved {
        correlation_id: String,
        action: Action,
        rewritten: Option<usize>,
    },
}

impl Correlation {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Correlation::Resolved { .. })
    }
}

/// Match a response frame to a pending request of the same source and
/// complete the request event in place.
///
/// The pending id only has to be contained in the response id. The most
/// recent event carrying that request is updated with the response label
/// and time when the payload yields a status; the request stops being
/// pending either way.
pub fn correlate(
    store: &EventStore,
    source: &str,
    state: &mut SourceState,
    record: &Record,
    response_id: &str,
    response: &Value,
) -> Result<Correlation, ClassifyError> {
    let Some((correlation_id, action)) = state
        .find_pending(response_id)
        .map(|(id, action)| (id.to_string(), action))
    else {
        tracing::debug!(source, response_id, "No pending request for response");
        return Ok(Correlation::Unmatched);
    };

    let mut rewritten = None;
    if let Some((index, mut event)) =
        store.find_last(source, |event| event.is_request(&correlation_id, action))
    {
        let clock = short_time(&record.time)?;
        let status = payload::response_status(action, response)?;
        if !status.is_empty() {
            event.protocol.response = format!("{} {}", clock, status);
            event.protocol.response_time = record.time.clone();
            if store.replace_at(source, index, &event) {
                rewritten = Some(index);
            }
        }
    }

    state.resolve(&correlation_id);

    Ok(Correlation::Resolved {
        correlation_id,
        action,
        rewritten,
    })
}

/// Clock part of "<date> <time>-<zone>"
pub fn short_time(time: &str) -> Result<&str, ClassifyError> {
    LINE_TIME
        .parse(time)
        .and_then(|fields| fields.get("time"))
        .ok_or_else(|| ClassifyError::ResponseTime {
            time: time.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::LogEvent;
    use serde_json::json;

    const SOURCE: &str = "cp-1";
    const RESPONSE_TIME: &str = "2024-05-01 10:00:02.500-09:00";

    fn response_record() -> Record {
        Record {
            time: RESPONSE_TIME.to_string(),
            message: String::new(),
            origin: String::new(),
        }
    }

    fn request(store: &EventStore, state: &mut SourceState, id: &str, action: Action) -> usize {
        let mut event = LogEvent::new("2024-05-01 10:00:00.000-09:00");
        event.protocol.action = Some(action);
        event.protocol.correlation_id = id.to_string();
        state.register(id, action);
        store.append_event(SOURCE, &event)
    }

    #[test]
    fn test_short_time() {
        assert_eq!(short_time("2024-05-01 10:00:02.500-09:00").unwrap(), "10:00:02.500");
        assert!(matches!(
            short_time("10:00:02"),
            Err(ClassifyError::ResponseTime { .. })
        ));
        assert!(short_time("2024-05-01 10:00:02.500+09:00").is_err());
    }

    #[test]
    fn test_round_trip_rewrites_in_place() {
        let store = EventStore::new();
        let mut state = SourceState::new();
        let index = request(&store, &mut state, "U1", Action::Authorize);
        store.append_event(SOURCE, &LogEvent::new("later"));

        let result = correlate(
            &store,
            SOURCE,
            &mut state,
            &response_record(),
            "\"U1\"",
            &json!({"idTokenInfo": {"status": "Accepted"}}),
        )
        .unwrap();

        assert_eq!(
            result,
            Correlation::Resolved {
                correlation_id: "U1".to_string(),
                action: Action::Authorize,
                rewritten: Some(index),
            }
        );
        assert!(!state.is_pending("U1"));

        let events = store.get(SOURCE).unwrap().events;
        assert_eq!(events.len(), 2);
        assert_eq!(events[index].protocol.response, "10:00:02.500 Accepted");
        assert_eq!(events[index].protocol.response_time, RESPONSE_TIME);
        assert!(!events[index].protocol.is_bad_response());
    }

    #[test]
    fn test_empty_status_resolves_without_rewrite() {
        let store = EventStore::new();
        let mut state = SourceState::new();
        request(&store, &mut state, "S1", Action::RequestStartTransaction);

        let result = correlate(&store, SOURCE, &mut state, &response_record(), "S1", &json!({}))
            .unwrap();
        assert!(matches!(result, Correlation::Resolved { rewritten: None, .. }));
        assert!(state.pending().is_empty());
        assert!(!store.get(SOURCE).unwrap().events[0].protocol.is_answered());
    }

    #[test]
    fn test_unmatched_response() {
        let store = EventStore::new();
        let mut state = SourceState::new();
        request(&store, &mut state, "A", Action::Authorize);

        let result = correlate(
            &store,
            SOURCE,
            &mut state,
            &response_record(),
            "B",
            &json!({"status": "Accepted"}),
        )
        .unwrap();
        assert_eq!(result, Correlation::Unmatched);
        assert!(state.is_pending("A"));
    }

    #[test]
    fn test_sources_correlate_independently() {
        let store = EventStore::new();
        let mut state_a = SourceState::new();
        let mut state_b = SourceState::new();

        let mut event = LogEvent::new("t");
        event.protocol.action = Some(Action::Authorize);
        event.protocol.correlation_id = "X".to_string();
        store.append_event("a", &event);
        state_a.register("X", Action::Authorize);

        event.protocol.action = Some(Action::RequestStopTransaction);
        store.append_event("b", &event);
        state_b.register("X", Action::RequestStopTransaction);

        correlate(
            &store,
            "a",
            &mut state_a,
            &response_record(),
            "X",
            &json!({"idTokenInfo": {"status": "Blocked"}}),
        )
        .unwrap();

        assert!(!state_a.is_pending("X"));
        assert!(state_b.is_pending("X"));
        assert!(store.get("a").unwrap().events[0].protocol.is_bad_response());
        assert!(!store.get("b").unwrap().events[0].protocol.is_answered());
    }

    #[test]
    fn test_non_object_response_is_an_error() {
        let store = EventStore::new();
        let mut state = SourceState::new();
        request(&store, &mut state, "U1", Action::Authorize);

        let err = correlate(&store, SOURCE, &mut state, &response_record(), "U1", &json!([1]))
            .unwrap_err();
        assert!(matches!(err, ClassifyError::PayloadShape { .. }));
    }

    #[test]
    fn test_unparseable_response_time_is_an_error() {
        let store = EventStore::new();
        let mut state = SourceState::new();
        request(&store, &mut state, "U1", Action::Authorize);

        let mut record = response_record();
        record.time = "10:00:02.500".to_string();
        let err = correlate(
            &store,
            SOURCE,
            &mut state,
            &record,
            "U1",
            &json!({"idTokenInfo": {"status": "Accepted"}}),
        )
        .unwrap_err();

        assert!(matches!(err, ClassifyError::ResponseTime { ref time } if time == "10:00:02.500"));
        assert!(state.is_pending("U1"));
        assert!(!store.get(SOURCE).unwrap().events[0].protocol.is_answered());
    }

    #[test]
    fn test_non_object_status_holder_is_an_error() {
        let store = EventStore::new();
        let mut state = SourceState::new();
        request(&store, &mut state, "U1", Action::Authorize);

        let err = correlate(
            &store,
            SOURCE,
            &mut state,
            &response_record(),
            "U1",
            &json!({"idTokenInfo": "Accepted"}),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::FieldShape { field: "idTokenInfo", .. }
        ));
    }
}
