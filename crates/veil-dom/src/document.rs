//! Document
//!
//! Owns the element tree, tracks the active (focused) element, and answers
//! selector queries in document order. Queries walk the live tree on every
//! call so results always reflect current attribute state.

use crate::{DomTree, NodeId, Selector};

/// A document with a `body` root element and focus tracking
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    body: NodeId,
    active: Option<NodeId>,
}

impl Document {
    /// Create a document containing only the body root
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        Self { tree, body, active: None }
    }

    /// The body root element
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Underlying tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    /// Append a detached node as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.tree.append_child(parent, child);
    }

    /// Ancestor chain of a node, nearest first
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        self.tree.ancestors(id)
    }

    /// Sibling elements of a node, in document order (text siblings are
    /// not included)
    pub fn siblings(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .siblings(id)
            .into_iter()
            .filter(|&s| self.tree.element(s).is_some())
            .collect()
    }

    /// Whether `id` is `ancestor` or one of its descendants
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.tree.contains(ancestor, id)
    }

    /// Test one element against a selector
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.tree
            .element(id)
            .is_some_and(|el| selector.matches(el))
    }

    /// All matching elements in the document (body included), document order
    pub fn query(&self, selector: &Selector) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.matches(self.body, selector) {
            out.push(self.body);
        }
        out.extend(
            self.tree
                .descendants(self.body)
                .into_iter()
                .filter(|&id| self.matches(id, selector)),
        );
        tracing::trace!(matched = out.len(), "document query");
        out
    }

    /// Matching descendants of `root` (root excluded), document order
    pub fn query_within(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.tree
            .descendants(root)
            .into_iter()
            .filter(|&id| self.matches(id, selector))
            .collect()
    }

    /// Get an attribute value
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.tree
            .element(id)
            .and_then(|el| el.attr(name))
            .map(str::to_string)
    }

    /// Set an attribute value
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.tree.element_mut(id) {
            el.set_attr(name, value);
        }
    }

    /// Remove an attribute
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(el) = self.tree.element_mut(id) {
            el.remove_attr(name);
        }
    }

    /// Check for an attribute
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.tree.element(id).is_some_and(|el| el.has_attr(name))
    }

    /// Add a class token
    pub fn add_class(&mut self, id: NodeId, token: &str) {
        if let Some(el) = self.tree.element_mut(id) {
            el.add_class(token);
        }
    }

    /// Remove a class token
    pub fn remove_class(&mut self, id: NodeId, token: &str) {
        if let Some(el) = self.tree.element_mut(id) {
            el.remove_class(token);
        }
    }

    /// Check for a class token
    pub fn has_class(&self, id: NodeId, token: &str) -> bool {
        self.tree
            .element(id)
            .is_some_and(|el| el.classes.contains(token))
    }

    /// The element currently holding focus
    pub fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    /// Move focus to an element; non-elements cannot take focus
    pub fn focus(&mut self, id: NodeId) {
        if self.tree.element(id).is_some() {
            tracing::trace!(?id, "focus");
            self.active = Some(id);
        }
    }

    /// Clear focus
    pub fn blur(&mut self) {
        self.active = None;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
