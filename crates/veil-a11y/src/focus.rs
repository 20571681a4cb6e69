//! First-focusable resolution

use veil_dom::{Document, NodeId};

use crate::config::A11yConfig;

/// Focus `root` if it is tabbable, else its first tabbable descendant,
/// else the first tabbable element under the document body. Returns the
/// newly focused element, if any.
pub fn focus_first(doc: &mut Document, config: &A11yConfig, root: NodeId) -> Option<NodeId> {
    let target = first_tabbable(doc, config, root)
        .or_else(|| first_tabbable(doc, config, doc.body()));
    if let Some(id) = target {
        doc.focus(id);
    }
    target
}

/// First tabbable element at or under `root`, in document order
fn first_tabbable(doc: &Document, config: &A11yConfig, root: NodeId) -> Option<NodeId> {
    let tabbable = config.tabbable_selector()?;
    let excludes = config.excludes_selector();
    let kept = |id: NodeId| !excludes.as_ref().is_some_and(|ex| doc.matches(id, ex));

    if doc.matches(root, &tabbable) && kept(root) {
        return Some(root);
    }
    doc.query_within(root, &tabbable).into_iter().find(|&id| kept(id))
}
