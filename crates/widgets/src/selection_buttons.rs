//! Styled selection buttons — `checked` state mirrored onto a "selected"
//! class on the enclosing label, focus/blur mirrored onto a "focused"
//! class. Radios enforce mutual exclusivity within their `name` group;
//! checkboxes toggle independently.

use serde::{Deserialize, Serialize};
use site_core::dom::{Element, InputKind};
use tracing::debug;

/// Label style classes shared by both button variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionButtonsConfig {
    #[serde(default = "default_selected_class")]
    pub selected_class: String,
    #[serde(default = "default_focused_class")]
    pub focused_class: String,
}

fn default_selected_class() -> String {
    "selected".to_string()
}
fn default_focused_class() -> String {
    "focused".to_string()
}

impl Default for SelectionButtonsConfig {
    fn default() -> Self {
        Self {
            selected_class: default_selected_class(),
            focused_class: default_focused_class(),
        }
    }
}

/// Focus transition reported by the host's focus/blur events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    Focused,
    Blurred,
}

/// Radio variant: selecting one input clears the selected class from every
/// label in the same `name` group before marking the new selection.
pub struct RadioButtons<E: Element> {
    elements: Vec<E>,
    selector: Option<String>,
    config: SelectionButtonsConfig,
}

impl<E: Element> RadioButtons<E> {
    pub fn new(elements: Vec<E>) -> Self {
        Self::with_config(elements, SelectionButtonsConfig::default())
    }

    pub fn with_config(elements: Vec<E>, config: SelectionButtonsConfig) -> Self {
        let buttons = Self {
            elements,
            selector: None,
            config,
        };
        buttons.set_initial_state();
        buttons
    }

    /// Document-level variant: elements matching `selector` may appear
    /// after construction; the host routes their delegated events through
    /// the `handle_*` methods, which pick up newcomers.
    pub fn watching(
        selector: impl Into<String>,
        elements: Vec<E>,
        config: SelectionButtonsConfig,
    ) -> Self {
        let mut buttons = Self::with_config(elements, config);
        buttons.selector = Some(selector.into());
        buttons
    }

    /// Selector the host should bind delegated events for, if any.
    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    /// Mark labels of inputs that are already checked.
    pub fn set_initial_state(&self) {
        for element in &self.elements {
            if element.is_checked() {
                self.mark_selected(element);
            }
        }
    }

    pub fn mark_selected(&self, element: &E) {
        if let Some(name) = element.input_name() {
            for other in &self.elements {
                if other.input_name().as_deref() == Some(name.as_str()) {
                    if let Some(label) = other.parent_label() {
                        label.remove_class(&self.config.selected_class);
                    }
                }
            }
        }
        if let Some(label) = element.parent_label() {
            label.add_class(&self.config.selected_class);
        }
    }

    pub fn mark_focused(&self, element: &E, state: FocusState) {
        mark_focused(element, state, &self.config);
    }

    /// Handle a click/change event, tracking elements first seen now.
    pub fn handle_selection_event(&mut self, element: &E) {
        self.track(element);
        self.mark_selected(element);
    }

    /// Handle a focus/blur event, tracking elements first seen now.
    pub fn handle_focus_event(&mut self, element: &E, state: FocusState) {
        self.track(element);
        self.mark_focused(element, state);
    }

    fn track(&mut self, element: &E) {
        if !self.elements.iter().any(|known| known.is_same(element)) {
            self.elements.push(element.clone());
        }
    }
}

/// Checkbox variant: each input's label tracks only that input's checked
/// state, independent of siblings.
pub struct CheckboxButtons<E: Element> {
    elements: Vec<E>,
    selector: Option<String>,
    config: SelectionButtonsConfig,
}

impl<E: Element> CheckboxButtons<E> {
    pub fn new(elements: Vec<E>) -> Self {
        Self::with_config(elements, SelectionButtonsConfig::default())
    }

    pub fn with_config(elements: Vec<E>, config: SelectionButtonsConfig) -> Self {
        let buttons = Self {
            elements,
            selector: None,
            config,
        };
        buttons.set_initial_state();
        buttons
    }

    pub fn watching(
        selector: impl Into<String>,
        elements: Vec<E>,
        config: SelectionButtonsConfig,
    ) -> Self {
        let mut buttons = Self::with_config(elements, config);
        buttons.selector = Some(selector.into());
        buttons
    }

    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    pub fn set_initial_state(&self) {
        for element in &self.elements {
            if element.is_checked() {
                self.mark_selected(element);
            }
        }
    }

    pub fn mark_selected(&self, element: &E) {
        if let Some(label) = element.parent_label() {
            if element.is_checked() {
                label.add_class(&self.config.selected_class);
            } else {
                label.remove_class(&self.config.selected_class);
            }
        }
    }

    pub fn mark_focused(&self, element: &E, state: FocusState) {
        mark_focused(element, state, &self.config);
    }

    pub fn handle_selection_event(&mut self, element: &E) {
        self.track(element);
        self.mark_selected(element);
    }

    pub fn handle_focus_event(&mut self, element: &E, state: FocusState) {
        self.track(element);
        self.mark_focused(element, state);
    }

    fn track(&mut self, element: &E) {
        if !self.elements.iter().any(|known| known.is_same(element)) {
            self.elements.push(element.clone());
        }
    }
}

fn mark_focused<E: Element>(element: &E, state: FocusState, config: &SelectionButtonsConfig) {
    if let Some(label) = element.parent_label() {
        match state {
            FocusState::Focused => label.add_class(&config.focused_class),
            FocusState::Blurred => label.remove_class(&config.focused_class),
        }
    }
}

/// Controllers produced by the dispatcher, one per input kind present.
pub struct SelectionButtons<E: Element> {
    pub radios: Option<RadioButtons<E>>,
    pub checkboxes: Option<CheckboxButtons<E>>,
}

/// Split a set of inputs by their `type` attribute and build the matching
/// variant(s). Inputs that are neither radio nor checkbox are ignored.
pub fn selection_buttons<E: Element>(
    elements: Vec<E>,
    config: SelectionButtonsConfig,
) -> SelectionButtons<E> {
    dispatch(elements, None, config)
}

/// Dispatcher for the document-level selector form: current matches are
/// split by kind and each controller keeps the selector for delegated
/// events.
pub fn selection_buttons_watching<E: Element>(
    selector: impl Into<String>,
    elements: Vec<E>,
    config: SelectionButtonsConfig,
) -> SelectionButtons<E> {
    dispatch(elements, Some(selector.into()), config)
}

fn dispatch<E: Element>(
    elements: Vec<E>,
    selector: Option<String>,
    config: SelectionButtonsConfig,
) -> SelectionButtons<E> {
    let mut radios = Vec::new();
    let mut checkboxes = Vec::new();
    for element in elements {
        match element.input_kind() {
            InputKind::Radio => radios.push(element),
            InputKind::Checkbox => checkboxes.push(element),
            InputKind::Other => debug!("selection buttons skipping non-selectable input"),
        }
    }

    let build_radios = !radios.is_empty() || selector.is_some();
    let build_checkboxes = !checkboxes.is_empty() || selector.is_some();
    SelectionButtons {
        radios: build_radios.then(|| match &selector {
            Some(sel) => RadioButtons::watching(sel.clone(), radios, config.clone()),
            None => RadioButtons::with_config(radios, config.clone()),
        }),
        checkboxes: build_checkboxes.then(|| match &selector {
            Some(sel) => CheckboxButtons::watching(sel.clone(), checkboxes, config.clone()),
            None => CheckboxButtons::with_config(checkboxes, config.clone()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_dom::TestElement;

    fn radio_group() -> Vec<TestElement> {
        vec![
            TestElement::radio("size").labelled(),
            TestElement::radio("size").labelled(),
            TestElement::radio("size").labelled(),
        ]
    }

    #[test]
    fn test_initial_state_marks_checked_radios() {
        let radios = radio_group();
        radios[0].set_checked(true);
        let _buttons = RadioButtons::new(radios.clone());

        assert!(radios[0].label().has_class("selected"));
        assert!(!radios[1].label().has_class("selected"));
    }

    #[test]
    fn test_radio_selection_is_mutually_exclusive_within_group() {
        let radios = radio_group();
        let other_group = TestElement::radio("food").labelled();
        let mut all = radios.clone();
        all.push(other_group.clone());

        let buttons = RadioButtons::new(all);
        buttons.mark_selected(&other_group);
        buttons.mark_selected(&radios[0]);
        assert!(radios[0].label().has_class("selected"));

        buttons.mark_selected(&radios[2]);
        assert!(!radios[0].label().has_class("selected"));
        assert!(!radios[1].label().has_class("selected"));
        assert!(radios[2].label().has_class("selected"));
        // A different name group is untouched.
        assert!(other_group.label().has_class("selected"));
    }

    #[test]
    fn test_checkboxes_toggle_independently() {
        let eggs = TestElement::checkbox().labelled();
        let bread = TestElement::checkbox().labelled();
        let buttons = CheckboxButtons::new(vec![eggs.clone(), bread.clone()]);

        eggs.set_checked(true);
        buttons.mark_selected(&eggs);
        assert!(eggs.label().has_class("selected"));
        assert!(!bread.label().has_class("selected"));

        bread.set_checked(true);
        buttons.mark_selected(&bread);
        eggs.set_checked(false);
        buttons.mark_selected(&eggs);
        assert!(!eggs.label().has_class("selected"));
        assert!(bread.label().has_class("selected"));
    }

    #[test]
    fn test_focus_and_blur_toggle_focused_class() {
        let radios = radio_group();
        let buttons = RadioButtons::new(radios.clone());

        buttons.mark_focused(&radios[1], FocusState::Focused);
        assert!(radios[1].label().has_class("focused"));

        buttons.mark_focused(&radios[1], FocusState::Blurred);
        assert!(!radios[1].label().has_class("focused"));
    }

    #[test]
    fn test_custom_classes() {
        let config = SelectionButtonsConfig {
            selected_class: "selectable-selected".to_string(),
            focused_class: "selectable-focused".to_string(),
        };
        let radios = radio_group();
        let buttons = RadioButtons::with_config(radios.clone(), config);

        buttons.mark_selected(&radios[0]);
        buttons.mark_focused(&radios[0], FocusState::Focused);
        assert!(radios[0].label().has_class("selectable-selected"));
        assert!(radios[0].label().has_class("selectable-focused"));
        assert!(!radios[0].label().has_class("selected"));
    }

    #[test]
    fn test_dispatcher_splits_mixed_set_by_kind() {
        let radio = TestElement::radio("size").labelled();
        let checkbox = TestElement::checkbox().labelled();
        checkbox.set_checked(true);

        let buttons = selection_buttons(
            vec![radio, checkbox.clone()],
            SelectionButtonsConfig::default(),
        );
        assert!(buttons.radios.is_some());
        assert!(buttons.checkboxes.is_some());
        assert!(checkbox.label().has_class("selected"));
    }

    #[test]
    fn test_dispatcher_skips_absent_kinds() {
        let buttons = selection_buttons(
            vec![TestElement::radio("size").labelled()],
            SelectionButtonsConfig::default(),
        );
        assert!(buttons.radios.is_some());
        assert!(buttons.checkboxes.is_none());
    }

    #[test]
    fn test_watching_tracks_elements_added_after_construction() {
        let mut buttons = RadioButtons::watching(
            r#"label.selectable input[type="radio"]"#,
            Vec::new(),
            SelectionButtonsConfig::default(),
        );
        assert_eq!(
            buttons.selector(),
            Some(r#"label.selectable input[type="radio"]"#)
        );

        // Inputs appear on the page after construction; delegated events
        // flow through the handle_* methods.
        let late_a = TestElement::radio("size").labelled();
        let late_b = TestElement::radio("size").labelled();
        buttons.handle_selection_event(&late_a);
        assert!(late_a.label().has_class("selected"));

        buttons.handle_selection_event(&late_b);
        assert!(!late_a.label().has_class("selected"));
        assert!(late_b.label().has_class("selected"));
    }

    #[test]
    fn test_watching_dispatcher_builds_both_variants() {
        let buttons = selection_buttons_watching(
            "label.selectable input",
            Vec::<TestElement>::new(),
            SelectionButtonsConfig::default(),
        );
        assert_eq!(
            buttons.radios.as_ref().and_then(RadioButtons::selector),
            Some("label.selectable input")
        );
        assert!(buttons.checkboxes.is_some());
    }
}
