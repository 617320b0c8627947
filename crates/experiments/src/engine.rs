//! The multivariate test engine: sticky cookie-based cohort assignment,
//! weighted random selection, analytics tagging and cohort execution.

use crate::cohort::{CohortAction, HandlerRegistry};
use crate::config::MultivariateConfig;
use crate::ga;
use chrono::Utc;
use site_core::analytics::{AnalyticsQueue, CustomVarScope, GaCommand};
use site_core::cookies::{CookieStore, Expiry};
use site_core::dom::ContentTarget;
use site_core::random::{RandomSource, ThreadRngSource};
use site_core::{ToolkitError, ToolkitResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// Prefix of the assignment cookie; legacy trackers key off the full name.
pub const ASSIGNMENT_COOKIE_PREFIX: &str = "multivariatetest_cohort_";

/// Assignment cookies persist for 30 days.
pub const ASSIGNMENT_COOKIE_DAYS: u32 = 30;

/// A configured multivariate test bound to its host collaborators.
pub struct MultivariateTest {
    config: MultivariateConfig,
    cookies: Arc<dyn CookieStore>,
    analytics: Arc<dyn AnalyticsQueue>,
    random: Arc<dyn RandomSource>,
    target: Option<Arc<dyn ContentTarget>>,
    handlers: HandlerRegistry,
}

impl std::fmt::Debug for MultivariateTest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultivariateTest")
            .field("config", &self.config)
            .field("target", &self.target.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder wiring a [`MultivariateTest`] to its collaborators.
///
/// The cookie store and analytics queue are required; the random source
/// defaults to the thread RNG and the content target and handlers are
/// optional. `build` validates the configuration and, when
/// `run_immediately` is set, performs the first run.
pub struct MultivariateTestBuilder {
    config: MultivariateConfig,
    cookies: Option<Arc<dyn CookieStore>>,
    analytics: Option<Arc<dyn AnalyticsQueue>>,
    random: Option<Arc<dyn RandomSource>>,
    target: Option<Arc<dyn ContentTarget>>,
    handlers: HandlerRegistry,
}

impl MultivariateTestBuilder {
    pub fn new(config: MultivariateConfig) -> Self {
        Self {
            config,
            cookies: None,
            analytics: None,
            random: None,
            target: None,
            handlers: HandlerRegistry::new(),
        }
    }

    pub fn cookies(mut self, store: Arc<dyn CookieStore>) -> Self {
        self.cookies = Some(store);
        self
    }

    pub fn analytics(mut self, queue: Arc<dyn AnalyticsQueue>) -> Self {
        self.analytics = Some(queue);
        self
    }

    pub fn random(mut self, source: Arc<dyn RandomSource>) -> Self {
        self.random = Some(source);
        self
    }

    pub fn target(mut self, target: Arc<dyn ContentTarget>) -> Self {
        self.target = Some(target);
        self
    }

    pub fn handler(
        mut self,
        id: impl Into<String>,
        handler: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.handlers.register(id, handler);
        self
    }

    pub fn build(self) -> ToolkitResult<MultivariateTest> {
        self.config.validate()?;
        let cookies = self.cookies.ok_or(ToolkitError::MissingOption("cookies"))?;
        let analytics = self
            .analytics
            .ok_or(ToolkitError::MissingOption("analytics"))?;

        let test = MultivariateTest {
            config: self.config,
            cookies,
            analytics,
            random: self
                .random
                .unwrap_or_else(|| Arc::new(ThreadRngSource)),
            target: self.target,
            handlers: self.handlers,
        };
        if test.config.run_immediately {
            test.run();
        }
        Ok(test)
    }
}

impl MultivariateTest {
    pub fn builder(config: MultivariateConfig) -> MultivariateTestBuilder {
        MultivariateTestBuilder::new(config)
    }

    pub fn config(&self) -> &MultivariateConfig {
        &self.config
    }

    /// Name of the assignment cookie for this experiment.
    pub fn cookie_name(&self) -> String {
        format!("{}{}", ASSIGNMENT_COOKIE_PREFIX, self.config.name)
    }

    /// Resolve the visitor's cohort and apply its side effects: legacy
    /// experiment cookies, analytics tagging, then the cohort action.
    /// A degenerate experiment (no cohorts) does nothing.
    pub fn run(&self) -> Option<String> {
        let cohort = self.get_cohort()?;
        if let Some(experiment_id) = self.config.ga_experiment_id.as_deref() {
            self.set_experiment_cookie(experiment_id);
            let variation_id = self
                .config
                .cohorts
                .get(&cohort)
                .and_then(|c| c.variation_id.as_deref());
            if let Some(variation_id) = variation_id {
                self.set_variation_cookie(experiment_id, variation_id);
            }
        }
        self.set_custom_var(&cohort);
        self.execute_cohort(&cohort);
        Some(cohort)
    }

    /// The visitor's current cohort, assigning one if the cookie is absent
    /// or names a cohort that no longer exists. An existing valid
    /// assignment is authoritative and is never re-rolled.
    pub fn get_cohort(&self) -> Option<String> {
        let cookie = self.cookie_name();
        if let Some(existing) = self.cookies.get(&cookie) {
            if self.config.cohorts.contains_key(&existing) {
                return Some(existing);
            }
            debug!(cookie = %cookie, value = %existing, "cookie names an unknown cohort, re-rolling");
        }

        let cohort = self.choose_random_cohort()?;
        self.cookies
            .set(&cookie, &cohort, Expiry::Days(ASSIGNMENT_COOKIE_DAYS));
        debug!(experiment = %self.config.name, cohort = %cohort, "cohort assigned");
        Some(cohort)
    }

    /// The virtual selection pool: each cohort key repeated `weight` times
    /// (the experiment default when the cohort sets none), in sorted key
    /// order.
    pub fn weighted_cohort_keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        for (key, cohort) in &self.config.cohorts {
            let weight = cohort.weight.unwrap_or(self.config.default_weight);
            for _ in 0..weight {
                keys.push(key.as_str());
            }
        }
        keys
    }

    /// Draw uniformly from the weighted pool: index `floor(r * pool_len)`
    /// for `r` in `[0, 1)`. `None` when the experiment has no cohorts.
    pub fn choose_random_cohort(&self) -> Option<String> {
        let pool = self.weighted_cohort_keys();
        if pool.is_empty() {
            return None;
        }
        let index = (self.random.next_f64() * pool.len() as f64).floor() as usize;
        pool.get(index)
            .or_else(|| pool.last())
            .map(|key| (*key).to_string())
    }

    /// Apply the cohort's action: invoke its registered handler, or replace
    /// the target element's content and make it visible.
    pub fn execute_cohort(&self, key: &str) {
        let Some(cohort) = self.config.cohorts.get(key) else {
            return;
        };
        match &cohort.action {
            Some(CohortAction::Invoke(handler_id)) => {
                self.handlers.invoke(handler_id);
            }
            Some(CohortAction::ReplaceContent(markup)) => match &self.target {
                Some(target) => {
                    target.set_content(markup);
                    target.show();
                }
                None => {
                    warn!(cohort = %key, "cohort replaces content but no target element is wired");
                }
            },
            None => {}
        }
    }

    /// Tag the analytics queue with the assignment: a session-scoped custom
    /// variable, then a dummy non-interactive event so the variable attaches
    /// to the page view.
    pub fn set_custom_var(&self, cohort: &str) {
        self.analytics.push(GaCommand::SetCustomVar {
            index: self.config.custom_var_index,
            name: self.cookie_name(),
            value: cohort.to_string(),
            scope: CustomVarScope::Session,
        });
        self.analytics.push(GaCommand::TrackEvent {
            category: self.cookie_name(),
            action: "run".to_string(),
            label: "-".to_string(),
            value: 0,
            non_interactive: true,
        });
    }

    fn set_experiment_cookie(&self, experiment_id: &str) {
        let value = ga::build_utmxx_value(self.ga_domain(), experiment_id, Utc::now().timestamp());
        self.cookies.set(
            ga::UTMXX_COOKIE,
            &value,
            Expiry::Minutes(ga::EXPERIMENT_COOKIE_MINUTES),
        );
    }

    fn set_variation_cookie(&self, experiment_id: &str, variation_id: &str) {
        let value = ga::build_utmx_value(self.ga_domain(), experiment_id, variation_id);
        self.cookies.set(
            ga::UTMX_COOKIE,
            &value,
            Expiry::Minutes(ga::EXPERIMENT_COOKIE_MINUTES),
        );
    }

    fn ga_domain(&self) -> Option<&str> {
        if self.config.ga_domain.is_empty() {
            None
        } else {
            Some(self.config.ga_domain.as_str())
        }
    }
}
