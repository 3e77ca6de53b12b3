//! In-process model of the host page: an element tree with class lists,
//! text, attributes, and a table of event listeners.

pub mod document;
pub mod events;

use thiserror::Error;

pub use document::{Document, Element, NodeId};
pub use events::{Event, EventType, ListenerKey};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("no live element for {0:?}")]
    UnknownNode(NodeId),
    #[error("cannot append {child:?} under {parent:?}: it would create a cycle")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}
