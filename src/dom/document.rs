use std::collections::BTreeMap;

use super::DomError;
use super::events::{Event, EventType, ListenerKey, ListenerRegistry};

/// Handle to an element slot in a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Clone, Debug, Default)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Retained element tree with a listener table.
///
/// Slots of removed elements are freed and never reused, so a stale
/// [`NodeId`] always reports [`DomError::UnknownNode`] instead of aliasing
/// a newer element.
#[derive(Debug)]
pub struct Document {
    body: NodeId,
    nodes: Vec<Option<Element>>,
    listeners: ListenerRegistry,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            body: NodeId(0),
            nodes: vec![Some(Element::new("body"))],
            listeners: ListenerRegistry::default(),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Element::new(tag)));
        id
    }

    pub fn element(&self, node: NodeId) -> Result<&Element, DomError> {
        self.nodes
            .get(node.0)
            .and_then(Option::as_ref)
            .ok_or(DomError::UnknownNode(node))
    }

    fn element_mut(&mut self, node: NodeId) -> Result<&mut Element, DomError> {
        self.nodes
            .get_mut(node.0)
            .and_then(Option::as_mut)
            .ok_or(DomError::UnknownNode(node))
    }

    /// Moves `child` to the end of `parent`'s children, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.element(parent)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        if let Some(old) = self.element(child)?.parent {
            self.element_mut(old)?.children.retain(|c| *c != child);
        }
        self.element_mut(child)?.parent = Some(parent);
        self.element_mut(parent)?.children.push(child);
        Ok(())
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.element(node).ok().and_then(Element::parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.element(id).ok().and_then(Element::parent);
        }
        false
    }

    /// Whether `node` is live and attached under body.
    pub fn contains(&self, node: NodeId) -> bool {
        self.element(node).is_ok() && (node == self.body || self.is_ancestor(self.body, node))
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.element(node).map(Element::children).unwrap_or_default()
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        let element = self.element_mut(node)?;
        if !element.has_class(class) {
            element.classes.push(class.to_owned());
        }
        Ok(())
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        self.element_mut(node)?.classes.retain(|c| c != class);
        Ok(())
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_ok_and(|e| e.has_class(class))
    }

    /// Replaces the whole class list with the whitespace-separated names in `classes`.
    /// An empty string clears it.
    pub fn set_classes(&mut self, node: NodeId, classes: &str) -> Result<(), DomError> {
        let element = self.element_mut(node)?;
        element.classes.clear();
        for class in classes.split_whitespace() {
            if !element.has_class(class) {
                element.classes.push(class.to_owned());
            }
        }
        Ok(())
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        self.element_mut(node)?.text = text.into();
        Ok(())
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.element(node).ok().map(Element::text)
    }

    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        self.element_mut(node)?
            .attributes
            .insert(name.to_owned(), value.into());
        Ok(())
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).ok().and_then(|e| e.attribute(name))
    }

    /// Descendants of `root` (root excluded) in document order.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    pub fn elements_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    pub fn element_by_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.elements_by_class(root, class).into_iter().next()
    }

    pub fn elements_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| {
                self.element(*n)
                    .is_ok_and(|e| e.tag.eq_ignore_ascii_case(tag))
            })
            .collect()
    }

    pub fn element_by_tag(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        self.elements_by_tag(root, tag).into_iter().next()
    }

    pub fn listen(&mut self, node: NodeId, kind: EventType) -> Result<ListenerKey, DomError> {
        self.element(node)?;
        Ok(self.listeners.listen(node, kind))
    }

    /// Returns `false` when the key was already released.
    pub fn unlisten(&mut self, key: ListenerKey) -> bool {
        self.listeners.unlisten(key)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Simulates activating `node`; yields one event per live `Action` listener on it.
    /// Nodes that are not attached under body deliver nothing.
    pub fn click(&self, node: NodeId) -> Vec<Event> {
        if !self.contains(node) {
            return Vec::new();
        }
        self.listeners.fire(node, EventType::Action)
    }

    /// Detaches and frees every child subtree of `node`, along with any listener bound inside it.
    pub fn remove_children(&mut self, node: NodeId) -> Result<(), DomError> {
        let freed = self.descendants(node);
        self.element_mut(node)?.children.clear();
        for id in &freed {
            self.nodes[id.0] = None;
        }
        let dropped = self.listeners.forget_targets(&freed);
        if dropped > 0 {
            log::debug!("dropped {dropped} listener(s) bound under removed nodes");
        }
        Ok(())
    }
}
