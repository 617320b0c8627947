//! DOM widget controllers — state mirrored from native form inputs onto
//! style classes and ARIA attributes.
//!
//! Controllers are generic over [`site_core::dom::Element`]; the host
//! binding owns event wiring and routes click/change/focus/blur events to
//! the controller methods.
//!
//! # Modules
//!
//! - [`optional_section`] — collapsible section bound to a control's
//!   checked state
//! - [`selection_buttons`] — radio/checkbox label styling with group
//!   exclusivity

pub mod optional_section;
pub mod selection_buttons;

pub use optional_section::{OptionalSection, OptionalSectionConfig};
pub use selection_buttons::{
    selection_buttons, selection_buttons_watching, CheckboxButtons, FocusState, RadioButtons,
    SelectionButtons, SelectionButtonsConfig,
};

#[cfg(test)]
pub(crate) mod test_dom;
