//! Edge case tests for veil-a11y
//!
//! Kill switches, independent gating, configuration parsing, and stress
//! on the saved-state ledger.

use veil_a11y::{A11yConfig, PopupManager};
use veil_dom::{Document, NodeId};

/// body > [dialog > input, button]
fn dialog_doc() -> (Document, NodeId, NodeId, NodeId) {
    let mut doc = Document::new();
    let body = doc.body();
    let dialog = doc.create_element("div");
    let input = doc.create_element("input");
    let outside = doc.create_element("button");
    doc.append_child(body, dialog);
    doc.append_child(dialog, input);
    doc.append_child(body, outside);
    (doc, dialog, input, outside)
}

// ============================================================================
// KILL SWITCHES AND GATING
// ============================================================================

#[test]
fn test_master_switch_disables_everything() {
    let (mut doc, dialog, input, outside) = dialog_doc();
    let config = A11yConfig { is_enabled: false, ..Default::default() };
    let mut manager = PopupManager::new(config, &doc);
    doc.focus(outside);

    manager.enter(&mut doc, Some(dialog));
    assert_eq!(manager.depth(), 1);
    assert!(!doc.has_attribute(outside, "tabindex"));
    assert!(!doc.has_attribute(input, "tabindex"));

    assert_eq!(manager.exit(&mut doc, None), Some(outside));
    assert_eq!(doc.active_element(), Some(outside));
}

#[test]
fn test_tab_index_gating_is_independent() {
    let (mut doc, dialog, input, outside) = dialog_doc();
    let config = A11yConfig {
        is_popup_tab_index_management_enabled: false,
        ..Default::default()
    };
    let mut manager = PopupManager::new(config, &doc);

    manager.enter(&mut doc, Some(dialog));

    // aria-hidden mutation still happens; tabindex is left alone.
    assert!(!doc.has_attribute(outside, "tabindex"));
    assert_eq!(doc.attribute(outside, "aria-hidden"), Some("true".to_string()));
    assert!(!doc.has_attribute(input, "tabindex"));

    manager.exit(&mut doc, None);
    assert!(!doc.has_attribute(outside, "aria-hidden"));
    assert_eq!(manager.stats().saved_records, 0);
}

#[test]
fn test_aria_hidden_gating_is_independent() {
    let (mut doc, dialog, input, outside) = dialog_doc();
    let config = A11yConfig {
        is_popup_aria_hidden_management_enabled: false,
        ..Default::default()
    };
    let mut manager = PopupManager::new(config, &doc);
    doc.set_attribute(input, "aria-hidden", "true");

    manager.enter(&mut doc, Some(dialog));

    // tabindex mutation still happens; aria-hidden is left alone.
    assert_eq!(doc.attribute(outside, "tabindex"), Some("-1".to_string()));
    assert!(!doc.has_attribute(outside, "aria-hidden"));
    assert_eq!(doc.attribute(input, "tabindex"), Some("0".to_string()));
    assert_eq!(doc.attribute(input, "aria-hidden"), Some("true".to_string()));

    manager.exit(&mut doc, None);
    assert!(!doc.has_attribute(outside, "tabindex"));
    assert_eq!(manager.stats().saved_records, 0);
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn test_config_parses_from_camel_case_json() {
    let config: A11yConfig = serde_json::from_str(
        r#"{
            "isEnabled": true,
            "isPopupManagementEnabled": true,
            "isPopupTabIndexManagementEnabled": false,
            "tabbableElements": "a, [tabindex]",
            "ariaHiddenExcludes": "body, .boundary"
        }"#,
    )
    .unwrap();

    assert!(!config.is_popup_tab_index_management_enabled);
    // Unlisted fields fall back to defaults.
    assert!(config.is_popup_aria_hidden_management_enabled);
    assert_eq!(config.tabbable_elements, "a, [tabindex]");
    assert!(config.validate().is_ok());
}

#[test]
fn test_unparsable_tabbable_selector_degrades_to_noop_suppression() {
    let (mut doc, dialog, input, outside) = dialog_doc();
    let config = A11yConfig {
        tabbable_elements: "main > button".to_string(),
        ..Default::default()
    };
    assert!(config.validate().is_err());

    let mut manager = PopupManager::new(config, &doc);
    manager.enter(&mut doc, Some(dialog));

    // The layer is tracked, but with no usable selector nothing matches.
    // The sibling sweep is selector-independent and still applies.
    assert_eq!(manager.depth(), 2);
    assert!(!doc.has_attribute(input, "tabindex"));
    assert_eq!(doc.attribute(outside, "tabindex"), Some("-1".to_string()));

    manager.exit(&mut doc, None);
    assert_eq!(manager.depth(), 1);
}

// ============================================================================
// LEDGER STRESS
// ============================================================================

#[test]
fn test_deeply_nested_same_scope_drains_completely() {
    let (mut doc, dialog, input, outside) = dialog_doc();
    let mut manager = PopupManager::new(A11yConfig::default(), &doc);
    doc.set_attribute(outside, "tabindex", "5");

    for _ in 0..10 {
        manager.enter(&mut doc, Some(dialog));
    }
    assert_eq!(manager.depth(), 11);
    assert_eq!(manager.stats().pending_focus, 10);
    assert_eq!(doc.attribute(outside, "tabindex"), Some("-1".to_string()));

    for _ in 0..10 {
        manager.exit(&mut doc, None);
    }
    assert_eq!(manager.depth(), 1);
    assert_eq!(manager.stats().saved_records, 0);
    assert_eq!(doc.attribute(outside, "tabindex"), Some("5".to_string()));
    assert!(!doc.has_attribute(outside, "aria-hidden"));
    assert!(!doc.has_attribute(input, "tabindex"));
}

#[test]
fn test_extra_exits_beyond_base_change_nothing() {
    let (mut doc, dialog, _input, outside) = dialog_doc();
    let mut manager = PopupManager::new(A11yConfig::default(), &doc);
    doc.focus(outside);

    manager.enter(&mut doc, Some(dialog));
    manager.exit(&mut doc, None);

    let snapshot = doc.attribute(outside, "tabindex");
    for _ in 0..3 {
        manager.exit(&mut doc, None);
    }
    assert_eq!(manager.depth(), 1);
    assert_eq!(doc.attribute(outside, "tabindex"), snapshot);
}

#[test]
fn test_text_siblings_leave_no_ledger_residue() {
    let mut doc = Document::new();
    let body = doc.body();
    let prologue = doc.create_text("prologue");
    let dialog = doc.create_element("div");
    let outside = doc.create_element("button");
    doc.append_child(body, prologue);
    doc.append_child(body, dialog);
    doc.append_child(body, outside);

    let mut manager = PopupManager::new(A11yConfig::default(), &doc);
    manager.enter(&mut doc, Some(dialog));
    manager.exit(&mut doc, None);

    assert_eq!(manager.stats().saved_records, 0);
}

#[test]
fn test_elements_added_while_layer_open_are_skipped_on_restore() {
    let (mut doc, dialog, _input, _outside) = dialog_doc();
    let mut manager = PopupManager::new(A11yConfig::default(), &doc);

    manager.enter(&mut doc, Some(dialog));

    // A tabbable element inserted after the layer opened has no ledger
    // record; restore skips it rather than inventing state.
    let late = doc.create_element("button");
    doc.append_child(doc.body(), late);
    doc.set_attribute(late, "tabindex", "2");

    manager.exit(&mut doc, None);
    assert_eq!(doc.attribute(late, "tabindex"), Some("2".to_string()));
    assert_eq!(manager.stats().saved_records, 0);
}
