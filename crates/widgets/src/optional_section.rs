//! Collapsible "optional section" — visibility bound to the checked state
//! of a control element, with class and ARIA state moved in lock-step.

use serde::{Deserialize, Serialize};
use site_core::dom::{Element, InputKind};
use tracing::debug;

/// Style classes marking the section open or closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalSectionConfig {
    #[serde(default = "default_selected_class")]
    pub selected_class: String,
    #[serde(default = "default_deselected_class")]
    pub deselected_class: String,
}

fn default_selected_class() -> String {
    "selected".to_string()
}
fn default_deselected_class() -> String {
    "deselected".to_string()
}

impl Default for OptionalSectionConfig {
    fn default() -> Self {
        Self {
            selected_class: default_selected_class(),
            deselected_class: default_deselected_class(),
        }
    }
}

/// Binds a section element's visibility to a control's checked state.
///
/// Construction wires `aria-controls` and derives the initial state once
/// from the control. The host routes click/change events from the control
/// (or, for radios, from every input in the control's name group — see
/// [`OptionalSection::control_group_name`]) to
/// [`OptionalSection::on_option_change`].
pub struct OptionalSection<E: Element> {
    control: E,
    section: E,
    config: OptionalSectionConfig,
}

impl<E: Element> OptionalSection<E> {
    pub fn new(control: E, section: E) -> Self {
        Self::with_config(control, section, OptionalSectionConfig::default())
    }

    pub fn with_config(control: E, section: E, config: OptionalSectionConfig) -> Self {
        if let Some(id) = section.attribute("id") {
            control.set_attribute("aria-controls", &id);
        }
        let widget = Self {
            control,
            section,
            config,
        };
        widget.on_option_change();
        widget
    }

    /// For radio controls, the form `name` group whose change events the
    /// host should route here; checkboxes listen on the control alone.
    pub fn control_group_name(&self) -> Option<String> {
        match self.control.input_kind() {
            InputKind::Radio => self.control.input_name(),
            _ => None,
        }
    }

    /// Re-derive visibility from the control's current checked state.
    pub fn on_option_change(&self) {
        if self.control.is_checked() {
            self.show_section();
        } else {
            self.hide_section();
        }
    }

    pub fn show_section(&self) {
        debug!(class = %self.config.selected_class, "optional section shown");
        self.section.remove_class(&self.config.deselected_class);
        self.section.add_class(&self.config.selected_class);
        self.section.set_attribute("aria-hidden", "false");
        self.control.set_attribute("aria-expanded", "true");
    }

    pub fn hide_section(&self) {
        self.section.remove_class(&self.config.selected_class);
        self.section.add_class(&self.config.deselected_class);
        self.section.set_attribute("aria-hidden", "true");
        self.control.set_attribute("aria-expanded", "false");
    }
}
