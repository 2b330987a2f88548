//! Tenant lifecycle operations: the only code that mutates platform state.
//!
//! Expected conditions (tenant already exists, tenant missing in an
//! environment) are never errors. They are journaled as warnings and the
//! operation either continues (`create_tenant`) or stops processing the rest
//! of its environment list (`add_queue`, `add_topic`, `add_bucket`,
//! `add_sql_database`). The only error is `UnknownEnvironment`, raised when the
//! account table has no entry for an environment a descriptor needs.
//!
//! Each environment is one read-modify-write of a single record; there is no
//! rollback of environments already written when a later one fails.

use crate::core::environment::{AccountMap, Environment};
use crate::core::error::PlatformStateError;
use crate::core::journal::Journal;
use crate::core::naming;
use crate::core::resources::{self, BucketConfig, QueueConfig, TopicConfig};
use crate::core::store::StateStore;
use crate::core::tenant_state::{
    Logs, MICROSERVICE, Progress, TenantConfigSummary, TenantInfra, TenantMetadata,
    TenantStateRecord, UrlEntry, UrlType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity and capability flags for a new tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantConfig {
    pub redis_enabled: bool,
    pub mongo_enabled: bool,
    pub team: Option<String>,
    pub service_code: String,
    pub tenant_type: String,
    pub subtype: String,
    pub zone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlConfig {
    #[serde(rename = "env")]
    pub environment: Environment,
    pub url: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub shuttered: bool,
    #[serde(rename = "type")]
    pub url_type: UrlType,
}

/// What a lifecycle call did across its environments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub applied: Vec<Environment>,
    pub skipped: Vec<Environment>,
    /// True when a missing tenant stopped the remaining environments.
    pub short_circuited: bool,
}

/// Owns the platform state and applies tenant mutations to it.
///
/// There is no internal locking: every mutation takes `&mut self`. Callers that
/// serve concurrent requests must serialize access themselves, e.g. by holding
/// the lifecycle behind a `Mutex`.
#[derive(Debug)]
pub struct TenantLifecycle {
    store: StateStore,
    accounts: AccountMap,
    journal: Journal,
    created: String,
}

impl TenantLifecycle {
    /// `created` is stamped into `metadata.created` of every new record.
    pub fn new(accounts: AccountMap, created: impl Into<String>) -> Self {
        Self {
            store: StateStore::new(),
            accounts,
            journal: Journal::new(),
            created: created.into(),
        }
    }

    /// Resumes mutation over an existing store.
    pub fn with_store(store: StateStore, accounts: AccountMap, created: impl Into<String>) -> Self {
        Self {
            store,
            accounts,
            journal: Journal::new(),
            created: created.into(),
        }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn accounts(&self) -> &AccountMap {
        &self.accounts
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn into_parts(self) -> (StateStore, Journal) {
        (self.store, self.journal)
    }

    pub fn create_tenant(
        &mut self,
        name: &str,
        config: &TenantConfig,
    ) -> Result<Outcome, PlatformStateError> {
        let mut outcome = Outcome::default();
        for env in Environment::ALL {
            if self.store.contains(env, name) {
                self.journal.warn(
                    "tenant.create",
                    env,
                    name,
                    format!("Service {} already exists in {}", name, env),
                );
                outcome.skipped.push(env);
                continue;
            }

            let record = self.new_tenant_state(name, config, env)?;
            self.store.set(env, name, record);
            self.journal
                .info("tenant.create", env, name, format!("Added {} to {}", name, env));
            outcome.applied.push(env);
        }
        Ok(outcome)
    }

    pub fn add_url(&mut self, name: &str, config: &UrlConfig) -> Outcome {
        let env = config.environment;
        let Some(record) = self.store.get_mut(env, name) else {
            self.journal.warn(
                "url.add",
                env,
                name,
                format!("Service not found {} in {}", name, env),
            );
            return Outcome {
                skipped: vec![env],
                ..Outcome::default()
            };
        };

        record.upsert_url(
            config.url.clone(),
            UrlEntry {
                url_type: config.url_type,
                enabled: config.enabled,
                shuttered: config.shuttered,
            },
        );
        self.journal.info(
            "url.add",
            env,
            name,
            format!("Added url {} to {}/{}", config.url, env, name),
        );
        Outcome {
            applied: vec![env],
            ..Outcome::default()
        }
    }

    pub fn add_queue(
        &mut self,
        name: &str,
        envs: &[Environment],
        config: &QueueConfig,
    ) -> Result<Outcome, PlatformStateError> {
        self.for_each_existing("queue.add", name, envs, |record, env, accounts| {
            let queue = resources::build_queue(env, accounts, config)?;
            record.push_queue(queue);
            Ok(format!("Added queue {} to {}/{}", config.name, env, name))
        })
    }

    pub fn add_topic(
        &mut self,
        name: &str,
        envs: &[Environment],
        config: &TopicConfig,
    ) -> Result<Outcome, PlatformStateError> {
        self.for_each_existing("topic.add", name, envs, |record, env, accounts| {
            let topic = resources::build_topic(env, accounts, config)?;
            record.push_topic(topic);
            Ok(format!("Added topic {} to {}/{}", config.name, env, name))
        })
    }

    /// Bucket ARNs carry no account id, so unlike the other `add_*` calls this
    /// never consults the account table and never fails with
    /// `UnknownEnvironment`.
    pub fn add_bucket(
        &mut self,
        name: &str,
        envs: &[Environment],
        config: &BucketConfig,
    ) -> Result<Outcome, PlatformStateError> {
        self.for_each_existing("bucket.add", name, envs, |record, env, _| {
            record.push_bucket(resources::build_bucket(config));
            Ok(format!("Added bucket {} to {}/{}", config.name, env, name))
        })
    }

    pub fn add_sql_database(
        &mut self,
        name: &str,
        envs: &[Environment],
    ) -> Result<Outcome, PlatformStateError> {
        self.for_each_existing("sql_database.add", name, envs, |record, env, accounts| {
            let database = resources::build_sql_database(name, env, accounts)?;
            record.set_sql_database(database);
            Ok(format!("Added sql database to {}/{}", env, name))
        })
    }

    /// Applies `apply` to the tenant's record in each environment in order.
    ///
    /// The first environment without a record ends the whole call: later
    /// environments are not visited, even if they hold a record.
    fn for_each_existing<F>(
        &mut self,
        op: &str,
        name: &str,
        envs: &[Environment],
        mut apply: F,
    ) -> Result<Outcome, PlatformStateError>
    where
        F: FnMut(&mut TenantStateRecord, Environment, &AccountMap) -> Result<String, PlatformStateError>,
    {
        let mut outcome = Outcome::default();
        for &env in envs {
            let Some(record) = self.store.get_mut(env, name) else {
                self.journal
                    .warn(op, env, name, format!("Service not found {} in {}", name, env));
                outcome.skipped.push(env);
                outcome.short_circuited = true;
                return Ok(outcome);
            };

            let message = apply(record, env, &self.accounts)?;
            self.journal.info(op, env, name, message);
            outcome.applied.push(env);
        }
        Ok(outcome)
    }

    fn new_tenant_state(
        &self,
        name: &str,
        config: &TenantConfig,
        env: Environment,
    ) -> Result<TenantStateRecord, PlatformStateError> {
        let ecr_repository = if env.is_management() {
            Some(resources::build_ecr_repository(name, &self.accounts)?)
        } else {
            None
        };
        let nginx = (config.tenant_type == MICROSERVICE).then(|| resources::build_nginx(name, env));

        let mut urls = BTreeMap::new();
        urls.insert(
            naming::default_internal_url(name, env),
            UrlEntry {
                url_type: UrlType::Internal,
                enabled: false,
                shuttered: false,
            },
        );

        Ok(TenantStateRecord {
            tenant: TenantInfra {
                urls,
                ecr_repository,
                s3_buckets: Vec::new(),
                sqs_queues: Vec::new(),
                sns_topics: Vec::new(),
                sql_database: None,
                dynamodb: Vec::new(),
                api_gateway: None,
                cognito_identity_pool: None,
                bedrock_ai: None,
                tenant_config: TenantConfigSummary {
                    redis: config.redis_enabled,
                    mongo: config.mongo_enabled,
                    zone: config.zone.clone(),
                    ..TenantConfigSummary::default()
                },
                logs: Logs {
                    name: name.to_string(),
                    url: naming::logs_dashboard_url(name, env),
                },
                metrics: Vec::new(),
                alerts: Vec::new(),
                nginx,
                squid: resources::build_squid(),
            },
            metadata: TenantMetadata {
                created: self.created.clone(),
                name: name.to_string(),
                service_code: config.service_code.clone(),
                subtype: config.subtype.clone(),
                tenant_type: config.tenant_type.clone(),
                teams: config.team.iter().cloned().collect(),
            },
            progress: Progress::completed(),
        })
    }
}
