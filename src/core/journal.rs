//! Event journal for state mutations.
//!
//! Every lifecycle operation records one event per environment it touches:
//! `Info` when it applied a change, `Warn` when it skipped or short-circuited.
//! Events are kept in memory for the CLI and tests and are mirrored to
//! `tracing` so whatever subscriber the binary installs sees them too.

use crate::core::environment::Environment;
use crate::core::time;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    Info,
    Warn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateEvent {
    pub ts: String,
    pub event_id: String,
    pub level: EventLevel,
    pub op: String,
    pub environment: Environment,
    pub tenant: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Journal {
    events: Vec<StateEvent>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, op: &str, env: Environment, tenant: &str, message: String) {
        tracing::info!(op, env = %env, tenant, "{}", message);
        self.push(EventLevel::Info, op, env, tenant, message);
    }

    pub fn warn(&mut self, op: &str, env: Environment, tenant: &str, message: String) {
        tracing::warn!(op, env = %env, tenant, "{}", message);
        self.push(EventLevel::Warn, op, env, tenant, message);
    }

    fn push(&mut self, level: EventLevel, op: &str, env: Environment, tenant: &str, message: String) {
        self.events.push(StateEvent {
            ts: time::now_rfc3339(),
            event_id: time::new_event_id(),
            level,
            op: op.to_string(),
            environment: env,
            tenant: tenant.to_string(),
            message,
        });
    }

    pub fn events(&self) -> &[StateEvent] {
        &self.events
    }

    pub fn count(&self, level: EventLevel) -> usize {
        self.events.iter().filter(|e| e.level == level).count()
    }

    /// One JSON object per line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        Ok(out)
    }
}
