//! Deployment environments and the per-environment account table.
//!
//! The set of environments is closed: every tenant gets one namespace per
//! variant of [`Environment`]. Account ids are not baked in; they come from the
//! seed document as an [`AccountMap`].

use crate::core::error::PlatformStateError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// An isolated deployment stage with its own cloud account.
///
/// Declaration order is the canonical iteration order used by the store and
/// by `create_tenant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    InfraDev,
    Management,
    Dev,
    Test,
    PerfTest,
    ExtTest,
    Prod,
}

impl Environment {
    pub const ALL: [Environment; 7] = [
        Environment::InfraDev,
        Environment::Management,
        Environment::Dev,
        Environment::Test,
        Environment::PerfTest,
        Environment::ExtTest,
        Environment::Prod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::InfraDev => "infra-dev",
            Environment::Management => "management",
            Environment::Dev => "dev",
            Environment::Test => "test",
            Environment::PerfTest => "perf-test",
            Environment::ExtTest => "ext-test",
            Environment::Prod => "prod",
        }
    }

    /// The environment that hosts shared build artifacts (container images).
    pub fn is_management(&self) -> bool {
        matches!(self, Environment::Management)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = PlatformStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| PlatformStateError::UnknownEnvironment(s.to_string()))
    }
}

/// Closed lookup table from environment to cloud account id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountMap(BTreeMap<Environment, String>);

impl AccountMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, env: Environment, account_id: impl Into<String>) {
        self.0.insert(env, account_id.into());
    }

    /// Account id for `env`, or `UnknownEnvironment` when the table has no entry.
    pub fn account_id_for(&self, env: Environment) -> Result<&str, PlatformStateError> {
        self.0
            .get(&env)
            .map(String::as_str)
            .ok_or_else(|| PlatformStateError::UnknownEnvironment(env.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Environment, &str)> {
        self.0.iter().map(|(env, id)| (*env, id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Environment, String)> for AccountMap {
    fn from_iter<I: IntoIterator<Item = (Environment, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
