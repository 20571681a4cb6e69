//! Popup focus scoping
//!
//! Tabindex and aria-hidden manager for popup layers. While a layer is
//! open, everything outside its branch is made unreachable to the keyboard
//! and hidden from assistive technology; closing the layer restores every
//! touched element to the exact attribute state observed when the layer
//! opened, including "attribute absent".

use std::collections::{HashMap, HashSet};

use veil_dom::{Document, NodeId, Selector};

use crate::config::A11yConfig;
use crate::focus;

/// Stable per-element identifier, assigned once on first encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementUid(u64);

/// Saved attribute states for one element
///
/// The two stacks always have equal length; each level holds the values
/// observed when the element was most recently suppressed. `None` means
/// the attribute was absent.
#[derive(Debug, Default)]
struct ElementRecord {
    tab_stack: Vec<Option<String>>,
    hidden_stack: Vec<Option<String>>,
}

/// Popup layer manager
///
/// Owns the scope stack (bottom entry = document body, never popped), the
/// return-focus stack, and the per-element saved-attribute ledger.
#[derive(Debug)]
pub struct PopupManager {
    config: A11yConfig,
    /// Elements at which tabbing is generally allowed, bottom = body
    floor_stack: Vec<NodeId>,
    /// Elements to return focus to when leaving each layer
    focus_stack: Vec<Option<NodeId>>,
    /// Saved attribute states, keyed by element uid
    records: HashMap<ElementUid, ElementRecord>,
    /// Element identity side table; uids are never reused
    uids: HashMap<NodeId, ElementUid>,
    next_uid: u64,
}

impl PopupManager {
    /// Create a manager for the given document session
    pub fn new(config: A11yConfig, doc: &Document) -> Self {
        Self {
            config,
            floor_stack: vec![doc.body()],
            focus_stack: Vec::new(),
            records: HashMap::new(),
            uids: HashMap::new(),
            next_uid: 0,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &A11yConfig {
        &self.config
    }

    /// Mutable configuration access
    pub fn config_mut(&mut self) -> &mut A11yConfig {
        &mut self.config
    }

    /// Number of open layers, the body layer included
    pub fn depth(&self) -> usize {
        self.floor_stack.len()
    }

    /// Bookkeeping snapshot
    pub fn stats(&self) -> PopupStats {
        PopupStats {
            layers: self.floor_stack.len(),
            pending_focus: self.focus_stack.len(),
            saved_records: self.records.len(),
        }
    }

    /// Restrict tabbing and screen reader access to `scope` and its branch.
    ///
    /// With no scope given, the element currently holding focus is used.
    /// Disabled configuration or an unresolvable scope makes this a no-op.
    pub fn enter(&mut self, doc: &mut Document, scope: Option<NodeId>) -> &mut Self {
        if !self.config.is_enabled || !self.config.is_popup_management_enabled {
            return self;
        }
        let Some(scope) = scope.or_else(|| doc.active_element()) else {
            return self;
        };

        self.floor_stack.push(scope);
        self.focus_stack.push(doc.active_element());

        let tabbable = self.config.tabbable_selector();
        let excludes = self.config.excludes_selector();

        // Privileged branch: the scope element plus its ancestor chain.
        let mut branch = vec![scope];
        branch.extend(doc.ancestors(scope));
        let branch_set: HashSet<NodeId> = branch.iter().copied().collect();

        // Suppression set: every tabbable element outside the branch, plus
        // every non-excluded sibling of a branch node. Sibling containers are
        // swept in even when they are not themselves tabbable; aria-hiding a
        // container removes its whole subtree from assistive technology.
        let mut suppression = Vec::new();
        let mut seen = HashSet::new();
        if let Some(tabbable) = &tabbable {
            for id in doc.query(tabbable) {
                if branch_set.contains(&id) || excluded(doc, &excludes, id) {
                    continue;
                }
                if seen.insert(id) {
                    suppression.push(id);
                }
            }
        }
        for &node in &branch {
            for sibling in doc.siblings(node) {
                if excluded(doc, &excludes, sibling) {
                    continue;
                }
                if seen.insert(sibling) {
                    suppression.push(sibling);
                }
            }
        }

        for id in suppression {
            let uid = self.uid_for(id);
            let record = self.records.entry(uid).or_default();
            record.tab_stack.push(doc.attribute(id, "tabindex"));
            record.hidden_stack.push(doc.attribute(id, "aria-hidden"));
            if self.config.is_popup_tab_index_management_enabled {
                doc.set_attribute(id, "tabindex", "-1");
            }
            if self.config.is_popup_aria_hidden_management_enabled {
                doc.set_attribute(id, "aria-hidden", "true");
            }
        }

        // Elements inside the scope become reachable in natural order; any
        // aria-hidden marking is cleared on them and on ancestors below the
        // configured boundary.
        if let Some(tabbable) = &tabbable {
            let inner: Vec<NodeId> = doc
                .query_within(scope, tabbable)
                .into_iter()
                .filter(|&id| !excluded(doc, &excludes, id))
                .collect();
            let boundary = self.config.aria_boundary_selector();
            for id in inner {
                if self.config.is_popup_tab_index_management_enabled {
                    doc.set_attribute(id, "tabindex", "0");
                }
                if self.config.is_popup_aria_hidden_management_enabled {
                    clear_hidden(doc, id);
                    for ancestor in doc.ancestors(id) {
                        if boundary.as_ref().is_some_and(|sel| doc.matches(ancestor, sel)) {
                            break;
                        }
                        clear_hidden(doc, ancestor);
                    }
                }
            }
        }

        tracing::debug!(depth = self.floor_stack.len(), "popup layer added");
        self
    }

    /// Close the last popup layer, restoring saved tabindex and aria-hidden
    /// state and moving focus to `focus_target` (or, when absent, to the
    /// element captured when the layer was entered).
    ///
    /// Returns the element that held focus before the close. Calling with
    /// only the body layer open changes nothing.
    pub fn exit(&mut self, doc: &mut Document, focus_target: Option<NodeId>) -> Option<NodeId> {
        if !self.config.is_enabled || !self.config.is_popup_management_enabled {
            return doc.active_element();
        }
        // The body layer is the bottom entry and must always remain.
        if self.floor_stack.len() <= 1 {
            return doc.active_element();
        }
        let was_focused = doc.active_element();
        self.floor_stack.pop();

        let tabbable = self.config.tabbable_selector();
        let excludes = self.config.excludes_selector();

        // The full tab-reachable set is recomputed here on purpose:
        // restoration is keyed per element through the ledger, and
        // overlapping suppression sets from differently-scoped layers only
        // unwind correctly when every candidate is revisited each time.
        if let Some(tabbable) = &tabbable {
            for id in doc.query(tabbable) {
                if excluded(doc, &excludes, id) {
                    continue;
                }
                let Some(&uid) = self.uids.get(&id) else { continue };
                let Some(record) = self.records.get_mut(&uid) else { continue };
                let (Some(prev_tab), Some(prev_hidden)) =
                    (record.tab_stack.pop(), record.hidden_stack.pop())
                else {
                    continue;
                };
                if record.tab_stack.is_empty() && record.hidden_stack.is_empty() {
                    self.records.remove(&uid);
                }
                if self.config.is_popup_tab_index_management_enabled {
                    match prev_tab {
                        Some(value) => doc.set_attribute(id, "tabindex", &value),
                        None => doc.remove_attribute(id, "tabindex"),
                    }
                }
                if self.config.is_popup_aria_hidden_management_enabled {
                    match prev_hidden {
                        Some(value) => doc.set_attribute(id, "aria-hidden", &value),
                        None => doc.remove_attribute(id, "aria-hidden"),
                    }
                }
            }
        }

        let saved = self.focus_stack.pop().flatten();
        match focus_target.or(saved) {
            Some(target) => focus::focus_first(doc, &self.config, target),
            None => focus::focus_first(doc, &self.config, doc.body()),
        };

        tracing::debug!(depth = self.floor_stack.len(), "popup layer removed");
        was_focused
    }

    fn uid_for(&mut self, id: NodeId) -> ElementUid {
        match self.uids.get(&id) {
            Some(&uid) => uid,
            None => {
                self.next_uid += 1;
                let uid = ElementUid(self.next_uid);
                self.uids.insert(id, uid);
                uid
            }
        }
    }
}

/// Bookkeeping snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupStats {
    /// Open layers, the body layer included
    pub layers: usize,
    /// Pending return-focus entries (always `layers - 1`)
    pub pending_focus: usize,
    /// Elements with live saved-attribute records
    pub saved_records: usize,
}

fn excluded(doc: &Document, excludes: &Option<Selector>, id: NodeId) -> bool {
    excludes.as_ref().is_some_and(|sel| doc.matches(id, sel))
}

fn clear_hidden(doc: &mut Document, id: NodeId) {
    doc.remove_attribute(id, "aria-hidden");
    doc.remove_class(id, "aria-hidden");
}
