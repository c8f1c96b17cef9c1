use indexmap::IndexMap;

use super::joiner::RecordJoiner;
use crate::event::Action;

/// Scratch state of one source, owned by the task processing it.
///
/// Lives for all files of the source, so a request logged at the end of one
/// file can still be answered by a response in the next one.
#[derive(Default)]
pub struct SourceState {
    /// Connector announced by the last mainboard line, 0 when none
    pub connector_id: u32,
    /// In-flight requests by correlation id, in registration order
    pending: IndexMap<String, Action>,
    /// Last emergency label emitted
    pub last_emergency: String,
    pub joiner: RecordJoiner,
}

impl SourceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, correlation_id: impl Into<String>, action: Action) {
        self.pending.insert(correlation_id.into(), action);
    }

    /// First pending request whose id is contained in `candidate_id`
    pub fn find_pending(&self, candidate_id: &str) -> Option<(&str, Action)> {
        self.pending
            .iter()
            .find(|(id, _)| candidate_id.contains(id.as_str()))
            .map(|(id, action)| (id.as_str(), *action))
    }

    pub fn resolve(&mut self, correlation_id: &str) -> Option<Action> {
        self.pending.shift_remove(correlation_id)
    }

    pub fn pending(&self) -> &IndexMap<String, Action> {
        &self.pending
    }

    pub fn is_pending(&self, correlation_id: &str) -> bool {
        self.pending.contains_key(correlation_id)
    }

    /// Take the active connector, leaving none active
    pub fn take_connector(&mut self) -> u32 {
        std::mem::take(&mut self.connector_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_pending_by_containment_in_order() {
        let mut state = SourceState::new();
        state.register("abc", Action::Authorize);
        state.register("ab", Action::TransactionEvent);

        assert_eq!(state.find_pending("\"abc\""), Some(("abc", Action::Authorize)));
        assert_eq!(state.find_pending("xab"), Some(("ab", Action::TransactionEvent)));
        assert_eq!(state.find_pending("zzz"), None);
    }

    #[test]
    fn test_resolve_keeps_registration_order() {
        let mut state = SourceState::new();
        state.register("a", Action::Authorize);
        state.register("b", Action::RequestStartTransaction);
        state.register("c", Action::RequestStopTransaction);

        assert_eq!(state.resolve("b"), Some(Action::RequestStartTransaction));
        assert_eq!(state.resolve("b"), None);
        let order: Vec<_> = state.pending().keys().cloned().collect();
        assert_eq!(order, vec!["a", "c"]);
    }

    #[test]
    fn test_reregistering_replaces_action() {
        let mut state = SourceState::new();
        state.register("x", Action::Authorize);
        state.register("x", Action::TransactionEvent);
        assert_eq!(state.pending().len(), 1);
        assert_eq!(state.find_pending("x"), Some(("x", Action::TransactionEvent)));
    }

    #[test]
    fn test_take_connector() {
        let mut state = SourceState::new();
        state.connector_id = 2;
        assert_eq!(state.take_connector(), 2);
        assert_eq!(state.connector_id, 0);
    }
}
