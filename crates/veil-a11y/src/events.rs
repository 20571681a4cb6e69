//! Deprecated popup event aliases
//!
//! Thin adapter keeping the legacy event surface alive: incoming events are
//! logged as deprecated, then forwarded to the direct `PopupManager` calls.

use veil_dom::{Document, NodeId};

use crate::log::DeprecationLog;
use crate::popup::PopupManager;

/// Legacy popup notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum A11yEvent {
    /// A popup opened; payload is the scoping element
    PopupOpened(Option<NodeId>),
    /// A popup closed; payload is the element to receive focus
    PopupClosed(Option<NodeId>),
}

/// Adapter forwarding legacy events to a popup manager
#[derive(Debug, Default)]
pub struct EventAdapter {
    log: DeprecationLog,
}

impl EventAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward one legacy event. For `PopupClosed`, returns the element
    /// that held focus before the close (as `PopupManager::exit` does).
    pub fn dispatch(
        &mut self,
        manager: &mut PopupManager,
        doc: &mut Document,
        event: A11yEvent,
    ) -> Option<NodeId> {
        match event {
            A11yEvent::PopupOpened(scope) => {
                self.log.deprecated(
                    "the 'popup:opened' event is replaced with PopupManager::enter",
                );
                manager.enter(doc, scope);
                None
            }
            A11yEvent::PopupClosed(target) => {
                self.log.deprecated(
                    "the 'popup:closed' event is replaced with PopupManager::exit",
                );
                manager.exit(doc, target)
            }
        }
    }

    /// Deprecation records collected so far
    pub fn log(&self) -> &DeprecationLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::A11yConfig;

    #[test]
    fn test_aliases_forward_and_log() {
        let mut doc = Document::new();
        let dialog = doc.create_element("div");
        let button = doc.create_element("button");
        doc.append_child(doc.body(), dialog);
        doc.append_child(dialog, button);

        let mut manager = PopupManager::new(A11yConfig::default(), &doc);
        let mut adapter = EventAdapter::new();

        adapter.dispatch(&mut manager, &mut doc, A11yEvent::PopupOpened(Some(dialog)));
        assert_eq!(manager.depth(), 2);

        adapter.dispatch(&mut manager, &mut doc, A11yEvent::PopupClosed(None));
        assert_eq!(manager.depth(), 1);

        assert_eq!(
            adapter
                .log()
                .count("the 'popup:opened' event is replaced with PopupManager::enter"),
            1
        );
    }
}
