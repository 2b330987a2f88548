//! Store abstraction for the platform's tenant state.
//!
//! Two-level ownership: environment → tenant name → record. The store is pure
//! containment; invariants are enforced by the lifecycle operations before they
//! call [`StateStore::set`].

use crate::core::environment::Environment;
use crate::core::tenant_state::TenantStateRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// In-memory tenant state for every known environment.
///
/// Every [`Environment`] has a namespace from construction, so iteration
/// always covers the full closed set even when a namespace is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StateStore {
    environments: BTreeMap<Environment, BTreeMap<String, TenantStateRecord>>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            environments: Environment::ALL
                .into_iter()
                .map(|env| (env, BTreeMap::new()))
                .collect(),
        }
    }

    pub fn get(&self, env: Environment, name: &str) -> Option<&TenantStateRecord> {
        self.environments.get(&env).and_then(|tenants| tenants.get(name))
    }

    pub fn get_mut(&mut self, env: Environment, name: &str) -> Option<&mut TenantStateRecord> {
        self.environments
            .get_mut(&env)
            .and_then(|tenants| tenants.get_mut(name))
    }

    pub fn contains(&self, env: Environment, name: &str) -> bool {
        self.get(env, name).is_some()
    }

    pub fn set(&mut self, env: Environment, name: impl Into<String>, record: TenantStateRecord) {
        self.environments
            .entry(env)
            .or_default()
            .insert(name.into(), record);
    }

    pub fn environments(&self) -> impl Iterator<Item = Environment> + '_ {
        self.environments.keys().copied()
    }

    pub fn tenants(&self, env: Environment) -> impl Iterator<Item = (&str, &TenantStateRecord)> {
        self.environments
            .get(&env)
            .into_iter()
            .flat_map(|tenants| tenants.iter().map(|(name, record)| (name.as_str(), record)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Environment, &str, &TenantStateRecord)> {
        self.environments.iter().flat_map(|(env, tenants)| {
            tenants
                .iter()
                .map(move |(name, record)| (*env, name.as_str(), record))
        })
    }

    pub fn tenant_count(&self, env: Environment) -> usize {
        self.environments.get(&env).map_or(0, BTreeMap::len)
    }

    pub fn record_count(&self) -> usize {
        self.environments.values().map(BTreeMap::len).sum()
    }
}
