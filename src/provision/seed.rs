//! Seed document loading and the bootstrap pass.
//!
//! The seed document is TOML: an optional RFC 3339 `created` stamp, an
//! `[accounts]` table and a list of `[[tenants]]`. It is parsed and validated
//! once, then handed by reference to [`bootstrap`], which drives the lifecycle
//! operations. A tenant listed twice is not a load error: the second
//! `create_tenant` warns and skips like any other repeat.

use crate::core::assets;
use crate::core::environment::{AccountMap, Environment};
use crate::core::error::PlatformStateError;
use crate::core::journal::EventLevel;
use crate::core::resources::{BucketConfig, QueueConfig, TopicConfig};
use crate::core::store::StateStore;
use crate::core::time;
use crate::provision::lifecycle::{TenantConfig, TenantLifecycle, UrlConfig};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static ACCOUNT_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{12}$").unwrap());
static TENANT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").unwrap());

/// Parsed, validated seed document.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub created: Option<String>,
    pub accounts: AccountMap,
    pub tenants: Vec<TenantSeed>,
}

#[derive(Debug, Deserialize)]
struct RawSeed {
    #[serde(default)]
    created: Option<String>,
    #[serde(default)]
    accounts: BTreeMap<String, String>,
    #[serde(default)]
    tenants: Vec<TenantSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantSeed {
    pub name: String,
    pub zone: String,
    #[serde(default)]
    pub mongo: bool,
    #[serde(default)]
    pub redis: bool,
    pub service_code: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(rename = "type")]
    pub tenant_type: String,
    pub subtype: String,
    #[serde(default)]
    pub urls: Vec<UrlConfig>,
    #[serde(default)]
    pub sqs_queues: Vec<SeededResource<QueueConfig>>,
    #[serde(default)]
    pub sns_topics: Vec<SeededResource<TopicConfig>>,
    #[serde(default)]
    pub s3_buckets: Vec<SeededResource<BucketConfig>>,
    #[serde(default)]
    pub rds_aurora_postgres: Vec<AuroraSeed>,
}

/// A resource entry plus an optional override of the environments it goes to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeededResource<T> {
    #[serde(flatten)]
    pub config: T,
    #[serde(default)]
    pub environments: Option<Vec<Environment>>,
}

/// Sizing hints; only their presence matters to the state model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuroraSeed {
    #[serde(default)]
    pub instance_count: u32,
    #[serde(default)]
    pub min_capacity: f64,
    #[serde(default)]
    pub max_capacity: f64,
}

impl TenantSeed {
    pub fn tenant_config(&self) -> TenantConfig {
        TenantConfig {
            redis_enabled: self.redis,
            mongo_enabled: self.mongo,
            team: self.team.clone(),
            service_code: self.service_code.clone(),
            tenant_type: self.tenant_type.clone(),
            subtype: self.subtype.clone(),
            zone: self.zone.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BootstrapSummary {
    pub tenants: usize,
    pub records: usize,
    pub info_events: usize,
    pub warn_events: usize,
}

/// `seed --format json` output: the summary plus the whole store.
#[derive(Debug, Serialize)]
pub struct SeedReport<'a> {
    pub cmd: &'static str,
    pub status: &'static str,
    pub ts: String,
    pub summary: &'a BootstrapSummary,
    pub state: &'a StateStore,
}

impl<'a> SeedReport<'a> {
    pub fn ok(summary: &'a BootstrapSummary, state: &'a StateStore) -> Self {
        Self {
            cmd: "seed",
            status: "ok",
            ts: time::now_rfc3339(),
            summary,
            state,
        }
    }
}

impl SeedConfig {
    pub fn from_toml(content: &str) -> Result<Self, PlatformStateError> {
        let raw: RawSeed = toml::from_str(content)?;

        let mut accounts = AccountMap::new();
        for (env_name, account_id) in raw.accounts {
            let env: Environment = env_name.parse()?;
            if !ACCOUNT_ID.is_match(&account_id) {
                return Err(PlatformStateError::SeedError(format!(
                    "account id for {} must be 12 digits, got {:?}",
                    env, account_id
                )));
            }
            accounts.insert(env, account_id);
        }

        if let Some(created) = &raw.created
            && !time::is_rfc3339(created)
        {
            return Err(PlatformStateError::SeedError(format!(
                "created must be an RFC 3339 timestamp, got {:?}",
                created
            )));
        }

        for tenant in &raw.tenants {
            if !TENANT_NAME.is_match(&tenant.name) {
                return Err(PlatformStateError::SeedError(format!(
                    "invalid tenant name {:?}",
                    tenant.name
                )));
            }
        }

        Ok(Self {
            created: raw.created,
            accounts,
            tenants: raw.tenants,
        })
    }

    pub fn load(path: &Path) -> Result<Self, PlatformStateError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// The built-in seed compiled into the binary.
    pub fn embedded() -> Result<Self, PlatformStateError> {
        Self::from_toml(assets::DEFAULT_SEED)
    }

    /// Fresh lifecycle engine over this seed's account table. Without a
    /// `created` stamp, records are stamped with the current time.
    pub fn lifecycle(&self) -> TenantLifecycle {
        let created = self.created.clone().unwrap_or_else(time::now_rfc3339);
        TenantLifecycle::new(self.accounts.clone(), created)
    }
}

/// Populates `lifecycle` from `seed`, tenant by tenant.
///
/// Queues, topics and the SQL database go to every environment; buckets go to
/// `management` only, since bucket names are unique per account. Any entry may
/// override its environment list.
pub fn bootstrap(
    lifecycle: &mut TenantLifecycle,
    seed: &SeedConfig,
) -> Result<BootstrapSummary, PlatformStateError> {
    let all = Environment::ALL.to_vec();
    let management = vec![Environment::Management];

    for tenant in &seed.tenants {
        let name = tenant.name.as_str();
        lifecycle.create_tenant(name, &tenant.tenant_config())?;

        for queue in &tenant.sqs_queues {
            let envs = queue.environments.as_ref().unwrap_or(&all);
            lifecycle.add_queue(name, envs, &queue.config)?;
        }
        for topic in &tenant.sns_topics {
            let envs = topic.environments.as_ref().unwrap_or(&all);
            lifecycle.add_topic(name, envs, &topic.config)?;
        }
        for bucket in &tenant.s3_buckets {
            let envs = bucket.environments.as_ref().unwrap_or(&management);
            lifecycle.add_bucket(name, envs, &bucket.config)?;
        }
        for url in &tenant.urls {
            lifecycle.add_url(name, url);
        }
        if !tenant.rds_aurora_postgres.is_empty() {
            lifecycle.add_sql_database(name, &all)?;
        }
    }

    let journal = lifecycle.journal();
    let distinct: BTreeSet<&str> = seed.tenants.iter().map(|t| t.name.as_str()).collect();
    Ok(BootstrapSummary {
        tenants: distinct.len(),
        records: lifecycle.store().record_count(),
        info_events: journal.count(EventLevel::Info),
        warn_events: journal.count(EventLevel::Warn),
    })
}
