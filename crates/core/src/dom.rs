//! Host-DOM boundary: the content target experiments write into, and the
//! element handle the widget controllers mutate.
//!
//! Widget controllers run on the browser main thread only, so [`Element`]
//! carries no `Send`/`Sync` bound; the experiment-facing traits do, so an
//! engine can be shared behind an `Arc`.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// An addressable element accepting "set content" and "become visible"
/// operations — the slot an experiment cohort can replace.
pub trait ContentTarget: Send + Sync {
    fn set_content(&self, html: &str);
    fn show(&self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TargetState {
    content: Option<String>,
    visible: bool,
}

/// In-memory content target that records what was written, for testing.
#[derive(Default)]
pub struct CaptureTarget {
    state: Mutex<TargetState>,
}

impl CaptureTarget {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TargetState::default()),
        }
    }

    pub fn content(&self) -> Option<String> {
        self.state
            .lock()
            .expect("content target mutex poisoned")
            .content
            .clone()
    }

    pub fn is_visible(&self) -> bool {
        self.state
            .lock()
            .expect("content target mutex poisoned")
            .visible
    }
}

impl ContentTarget for CaptureTarget {
    fn set_content(&self, html: &str) {
        self.state
            .lock()
            .expect("content target mutex poisoned")
            .content = Some(html.to_string());
    }

    fn show(&self) {
        self.state
            .lock()
            .expect("content target mutex poisoned")
            .visible = true;
    }
}

/// The `type` attribute of a form input, as far as the widgets care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Radio,
    Checkbox,
    Other,
}

/// Handle to a live DOM element. Class and attribute mutations apply
/// immediately; reads reflect current host state.
pub trait Element: Clone {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;

    fn set_attribute(&self, name: &str, value: &str);
    fn attribute(&self, name: &str) -> Option<String>;

    /// Checked state of a radio/checkbox input.
    fn is_checked(&self) -> bool;

    fn input_kind(&self) -> InputKind;

    /// The form `name` the input belongs to, grouping radios.
    fn input_name(&self) -> Option<String>;

    /// The enclosing label element, where selection styling lands.
    fn parent_label(&self) -> Option<Self>;

    /// Whether both handles refer to the same host node.
    fn is_same(&self, other: &Self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_target_records_content_and_visibility() {
        let target = CaptureTarget::new();
        assert_eq!(target.content(), None);
        assert!(!target.is_visible());

        target.set_content("<p>You are in cohort B</p>");
        target.show();
        assert_eq!(target.content(), Some("<p>You are in cohort B</p>".to_string()));
        assert!(target.is_visible());
    }
}
