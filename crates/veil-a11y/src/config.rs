//! Accessibility Configuration

use serde::{Deserialize, Serialize};
use veil_dom::{Selector, SelectorError};

/// Accessibility configuration options
///
/// Field names follow the camelCase convention of the course configuration
/// files this is deserialized from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct A11yConfig {
    /// Master kill switch
    pub is_enabled: bool,

    /// Popup scoping kill switch
    pub is_popup_management_enabled: bool,

    /// Gate on tab-order mutation only
    pub is_popup_tab_index_management_enabled: bool,

    /// Gate on aria-hidden mutation only
    pub is_popup_aria_hidden_management_enabled: bool,

    /// Which elements count as tab-reachable candidates
    pub tabbable_elements: String,

    /// Elements that must never be touched
    pub tabbable_elements_excludes: String,

    /// Ancestor boundary at which aria-hidden clearing stops
    pub aria_hidden_excludes: String,
}

impl Default for A11yConfig {
    fn default() -> Self {
        Self {
            is_enabled: true,
            is_popup_management_enabled: true,
            is_popup_tab_index_management_enabled: true,
            is_popup_aria_hidden_management_enabled: true,
            tabbable_elements: "a, button, input, select, textarea, [tabindex]".to_string(),
            tabbable_elements_excludes: ".a11y-ignore".to_string(),
            aria_hidden_excludes: "body".to_string(),
        }
    }
}

impl A11yConfig {
    /// Check that all three selector fields parse
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::check("tabbableElements", &self.tabbable_elements)?;
        Self::check("tabbableElementsExcludes", &self.tabbable_elements_excludes)?;
        Self::check("ariaHiddenExcludes", &self.aria_hidden_excludes)?;
        Ok(())
    }

    fn check(field: &'static str, selector: &str) -> Result<(), ConfigError> {
        match Selector::parse(selector) {
            Ok(_) => Ok(()),
            Err(source) => Err(ConfigError::Selector { field, source }),
        }
    }

    /// Compiled tab-reachable selector; None degrades to match-nothing
    pub(crate) fn tabbable_selector(&self) -> Option<Selector> {
        compile("tabbableElements", &self.tabbable_elements)
    }

    /// Compiled excludes selector; None degrades to exclude-nothing
    pub(crate) fn excludes_selector(&self) -> Option<Selector> {
        compile("tabbableElementsExcludes", &self.tabbable_elements_excludes)
    }

    /// Compiled aria-hidden boundary selector; None degrades to no boundary
    pub(crate) fn aria_boundary_selector(&self) -> Option<Selector> {
        compile("ariaHiddenExcludes", &self.aria_hidden_excludes)
    }
}

/// Parse a configured selector, absorbing failures into a debug record
fn compile(field: &'static str, selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(sel) => Some(sel),
        Err(error) => {
            tracing::debug!(field, %error, "ignoring unparsable selector");
            None
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {field} selector: {source}")]
    Selector {
        field: &'static str,
        source: SelectorError,
    },
}
