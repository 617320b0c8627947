//! Cohort model — one variant/arm of an experiment a visitor can be
//! assigned to, and the registry that resolves named cohort actions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// What happens on the page once a cohort is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohortAction {
    /// Invoke a handler registered under this id.
    Invoke(String),
    /// Replace the target element's content with this markup and show it.
    ReplaceContent(String),
}

/// A single cohort definition.
///
/// `weight` falls back to the experiment's `default_weight` when absent;
/// `variation_id` feeds the legacy `__utmx` variation cookie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cohort {
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub action: Option<CohortAction>,
    #[serde(default)]
    pub variation_id: Option<String>,
}

impl Cohort {
    pub fn invoke(handler_id: impl Into<String>) -> Self {
        Self {
            action: Some(CohortAction::Invoke(handler_id.into())),
            ..Self::default()
        }
    }

    pub fn replace_content(markup: impl Into<String>) -> Self {
        Self {
            action: Some(CohortAction::ReplaceContent(markup.into())),
            ..Self::default()
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_variation_id(mut self, variation_id: impl Into<String>) -> Self {
        self.variation_id = Some(variation_id.into());
        self
    }
}

type CohortHandler = Box<dyn Fn() + Send + Sync>;

/// Explicit registry resolving `CohortAction::Invoke` ids to callbacks.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, CohortHandler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: impl Into<String>, handler: impl Fn() + Send + Sync + 'static) {
        self.handlers.insert(id.into(), Box::new(handler));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    /// Invoke the handler registered under `id`. Unknown ids are a no-op.
    pub fn invoke(&self, id: &str) -> bool {
        match self.handlers.get(id) {
            Some(handler) => {
                handler();
                true
            }
            None => {
                warn!(handler = %id, "no handler registered for cohort action");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_registry_invokes_registered_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut registry = HandlerRegistry::new();
        registry.register("show_banner", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(registry.contains("show_banner"));
        assert!(registry.invoke("show_banner"));
        assert!(registry.invoke("show_banner"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_registry_unknown_handler_is_noop() {
        let registry = HandlerRegistry::new();
        assert!(!registry.invoke("missing"));
    }

    #[test]
    fn test_cohort_from_json() {
        let cohort: Cohort = serde_json::from_str(
            r#"{"weight": 3, "action": {"replace_content": "<p>B</p>"}, "variation_id": "1"}"#,
        )
        .unwrap();
        assert_eq!(cohort.weight, Some(3));
        assert_eq!(
            cohort.action,
            Some(CohortAction::ReplaceContent("<p>B</p>".into()))
        );
        assert_eq!(cohort.variation_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_cohort_defaults_from_empty_json() {
        let cohort: Cohort = serde_json::from_str("{}").unwrap();
        assert_eq!(cohort, Cohort::default());
    }
}
