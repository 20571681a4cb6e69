//! veil DOM - Document element tree
//!
//! In-memory element tree the veil accessibility layer operates on.
//! Arena-backed, deterministic document-order traversal, no live browser
//! bindings.

mod attributes;
mod classlist;
mod document;
mod node;
mod selector;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use classlist::TokenList;
pub use document::Document;
pub use node::{ElementData, Node, NodeData, TextData};
pub use selector::{Selector, SelectorError};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
}
