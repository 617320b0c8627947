//! Legacy ga.js command queue — typed commands for the `_gaq`-style
//! append-only queue consumed by the analytics tool.
//!
//! Behaviors accept an `Arc<dyn AnalyticsQueue>` rather than reaching for a
//! page-global queue, so tests can capture exactly what was pushed.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Custom-variable scope slots as defined by the legacy analytics tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomVarScope {
    Visitor = 1,
    Session = 2,
    Page = 3,
}

/// A command destined for the analytics queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaCommand {
    SetCustomVar {
        index: u32,
        name: String,
        value: String,
        scope: CustomVarScope,
    },
    TrackEvent {
        category: String,
        action: String,
        label: String,
        value: i64,
        non_interactive: bool,
    },
}

impl GaCommand {
    /// The exact array shape the legacy queue consumer expects.
    pub fn to_params(&self) -> serde_json::Value {
        match self {
            GaCommand::SetCustomVar {
                index,
                name,
                value,
                scope,
            } => serde_json::json!(["_setCustomVar", index, name, value, *scope as u8]),
            GaCommand::TrackEvent {
                category,
                action,
                label,
                value,
                non_interactive,
            } => serde_json::json!(["_trackEvent", category, action, label, value, non_interactive]),
        }
    }
}

/// Trait for appending commands to the analytics queue. Implementations
/// route to the page-level queue, or capture for tests.
pub trait AnalyticsQueue: Send + Sync {
    fn push(&self, command: GaCommand);
}

/// No-op queue for headless runs and modules that don't tag analytics.
pub struct NoOpQueue;

impl AnalyticsQueue for NoOpQueue {
    fn push(&self, _command: GaCommand) {}
}

/// In-memory queue that captures commands for testing.
#[derive(Default)]
pub struct CaptureQueue {
    commands: Mutex<Vec<GaCommand>>,
}

impl CaptureQueue {
    pub fn new() -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
        }
    }

    pub fn commands(&self) -> Vec<GaCommand> {
        self.commands
            .lock()
            .expect("analytics queue mutex poisoned")
            .clone()
    }

    pub fn count(&self) -> usize {
        self.commands
            .lock()
            .expect("analytics queue mutex poisoned")
            .len()
    }

    pub fn clear(&self) {
        self.commands
            .lock()
            .expect("analytics queue mutex poisoned")
            .clear();
    }
}

impl AnalyticsQueue for CaptureQueue {
    fn push(&self, command: GaCommand) {
        self.commands
            .lock()
            .expect("analytics queue mutex poisoned")
            .push(command);
    }
}
