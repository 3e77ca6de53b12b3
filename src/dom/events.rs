use std::collections::BTreeMap;

use super::NodeId;

/// Kinds of events a listener can be registered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A control was activated (clicked or pressed).
    Action,
}

/// Token returned by [`Document::listen`](super::Document::listen), used to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerKey(u64);

/// One delivered event: which registration fired, and on which node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    pub key: ListenerKey,
    pub kind: EventType,
    pub target: NodeId,
}

#[derive(Clone, Copy, Debug)]
struct Listener {
    target: NodeId,
    kind: EventType,
}

/// Table of live (event-source, registration-token) pairs.
#[derive(Debug, Default)]
pub(crate) struct ListenerRegistry {
    next_key: u64,
    listeners: BTreeMap<ListenerKey, Listener>,
}

impl ListenerRegistry {
    pub(crate) fn listen(&mut self, target: NodeId, kind: EventType) -> ListenerKey {
        let key = ListenerKey(self.next_key);
        self.next_key += 1;
        self.listeners.insert(key, Listener { target, kind });
        key
    }

    pub(crate) fn unlisten(&mut self, key: ListenerKey) -> bool {
        self.listeners.remove(&key).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    //registration order is key order
    pub(crate) fn fire(&self, target: NodeId, kind: EventType) -> Vec<Event> {
        self.listeners
            .iter()
            .filter(|(_, l)| l.target == target && l.kind == kind)
            .map(|(key, l)| Event {
                key: *key,
                kind: l.kind,
                target: l.target,
            })
            .collect()
    }

    /// Drops every listener whose target is in `freed`. Returns how many were dropped.
    pub(crate) fn forget_targets(&mut self, freed: &[NodeId]) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|_, l| !freed.contains(&l.target));
        before - self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique_and_fire_in_registration_order() {
        let mut registry = ListenerRegistry::default();
        let a = registry.listen(NodeId(1), EventType::Action);
        let b = registry.listen(NodeId(1), EventType::Action);
        let c = registry.listen(NodeId(2), EventType::Action);
        assert_ne!(a, b);

        let fired: Vec<_> = registry
            .fire(NodeId(1), EventType::Action)
            .iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(fired, vec![a, b]);
        assert_eq!(registry.fire(NodeId(2), EventType::Action)[0].key, c);
    }

    #[test]
    fn unlisten_only_succeeds_once() {
        let mut registry = ListenerRegistry::default();
        let key = registry.listen(NodeId(3), EventType::Action);
        assert!(registry.unlisten(key));
        assert!(!registry.unlisten(key));
        assert!(registry.fire(NodeId(3), EventType::Action).is_empty());
    }

    #[test]
    fn forgetting_targets_drops_their_listeners() {
        let mut registry = ListenerRegistry::default();
        registry.listen(NodeId(1), EventType::Action);
        registry.listen(NodeId(2), EventType::Action);
        registry.listen(NodeId(2), EventType::Action);

        assert_eq!(registry.forget_targets(&[NodeId(2)]), 2);
        assert_eq!(registry.len(), 1);
    }
}
