//! DOM Node
//!
//! Compact node representation with sibling links for O(1) append and
//! cheap document-order traversal.

use crate::{NamedNodeMap, NodeId, TokenList};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (None if root)
    pub parent: Option<NodeId>,
    /// First child
    pub first_child: Option<NodeId>,
    /// Last child (for O(1) append)
    pub last_child: Option<NodeId>,
    /// Previous sibling
    pub prev_sibling: Option<NodeId>,
    /// Next sibling
    pub next_sibling: Option<NodeId>,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    /// Create a new element node
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            data: NodeData::Element(ElementData::new(name)),
        }
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            data: NodeData::Text(TextData { content: content.into() }),
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name (lowercase)
    pub name: String,
    /// Attributes, insertion order preserved
    pub attrs: NamedNodeMap,
    /// Class token list
    pub classes: TokenList,
}

impl ElementData {
    pub fn new(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            name: name.to_ascii_lowercase(),
            attrs: NamedNodeMap::new(),
            classes: TokenList::new(),
        }
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    /// Set an attribute. The `class` attribute is mirrored into the
    /// class token list.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if name == "class" {
            self.classes = TokenList::from_string(value);
        }
        self.attrs.set(name, value);
    }

    /// Remove an attribute
    pub fn remove_attr(&mut self, name: &str) -> bool {
        if name == "class" {
            self.classes = TokenList::new();
        }
        self.attrs.remove(name)
    }

    /// Check for an attribute
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has(name)
    }

    /// Cached id attribute (very common lookup)
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id")
    }

    /// Add a class token, keeping the `class` attribute in sync
    pub fn add_class(&mut self, token: &str) {
        self.classes.add(token);
        self.attrs.set("class", &self.classes.value());
    }

    /// Remove a class token, keeping the `class` attribute in sync
    pub fn remove_class(&mut self, token: &str) -> bool {
        let removed = self.classes.remove(token);
        if removed {
            if self.classes.is_empty() {
                self.attrs.remove("class");
            } else {
                self.attrs.set("class", &self.classes.value());
            }
        }
        removed
    }
}

/// Text node data
#[derive(Debug)]
pub struct TextData {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node() {
        let node = Node::element("DIV");
        assert!(node.is_element());
        assert_eq!(node.as_element().unwrap().name, "div");
        assert!(node.as_text().is_none());
    }

    #[test]
    fn test_class_attr_mirrors_token_list() {
        let mut el = ElementData::new("div");
        el.set_attr("class", "modal open");
        assert!(el.classes.contains("modal"));
        assert!(el.classes.contains("open"));

        el.remove_attr("class");
        assert!(!el.classes.contains("modal"));
    }

    #[test]
    fn test_text_node() {
        let node = Node::text("hello");
        assert!(!node.is_element());
        assert_eq!(node.as_text(), Some("hello"));
    }
}
