//! veil Accessibility
//!
//! Accessibility layer for the veil document stack.
//!
//! Features:
//! - Popup focus scoping (tabindex + aria-hidden isolation with exact restore)
//! - Return-focus tracking across nested popup layers
//! - First-focusable resolution
//! - Deprecated event aliases with one-shot deprecation logging

pub mod config;
pub mod events;
pub mod focus;
pub mod log;
pub mod popup;

// Core exports
pub use config::{A11yConfig, ConfigError};
pub use events::{A11yEvent, EventAdapter};
pub use focus::focus_first;
pub use log::DeprecationLog;
pub use popup::{ElementUid, PopupManager, PopupStats};
