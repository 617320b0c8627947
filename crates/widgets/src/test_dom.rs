//! Recording fake of the [`Element`] trait for controller tests.

use site_core::dom::{Element, InputKind};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

struct ElementState {
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    checked: bool,
    kind: InputKind,
    name: Option<String>,
    label: Option<TestElement>,
}

/// A shared-handle in-memory element. Cloning yields another handle to the
/// same node, matching live-DOM semantics.
#[derive(Clone)]
pub struct TestElement(Rc<RefCell<ElementState>>);

impl TestElement {
    fn with_kind(kind: InputKind, name: Option<&str>) -> Self {
        Self(Rc::new(RefCell::new(ElementState {
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
            checked: false,
            kind,
            name: name.map(str::to_string),
            label: None,
        })))
    }

    pub fn section(id: &str) -> Self {
        let element = Self::with_kind(InputKind::Other, None);
        element.set_attribute("id", id);
        element
    }

    pub fn radio(name: &str) -> Self {
        Self::with_kind(InputKind::Radio, Some(name))
    }

    pub fn checkbox() -> Self {
        Self::with_kind(InputKind::Checkbox, None)
    }

    /// Wrap the input in a label element, as the selection-button markup
    /// does, and return the input handle.
    pub fn labelled(self) -> Self {
        let label = Self::with_kind(InputKind::Other, None);
        self.0.borrow_mut().label = Some(label);
        self
    }

    pub fn set_checked(&self, checked: bool) {
        self.0.borrow_mut().checked = checked;
    }

    pub fn label(&self) -> TestElement {
        self.0.borrow().label.clone().expect("element has no label")
    }
}

impl Element for TestElement {
    fn add_class(&self, class: &str) {
        self.0.borrow_mut().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn is_checked(&self) -> bool {
        self.0.borrow().checked
    }

    fn input_kind(&self) -> InputKind {
        self.0.borrow().kind
    }

    fn input_name(&self) -> Option<String> {
        self.0.borrow().name.clone()
    }

    fn parent_label(&self) -> Option<Self> {
        self.0.borrow().label.clone()
    }

    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
