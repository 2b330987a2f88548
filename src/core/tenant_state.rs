//! The per-(environment, tenant) state record.
//!
//! Field names serialize exactly as the platform's state documents spell them,
//! so a JSON snapshot of a record can be compared against what the portal
//! expects.

use crate::core::resources::{
    EcrRepository, Nginx, S3Bucket, SnsTopic, SqlDatabase, SqsQueue, Squid,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MICROSERVICE: &str = "Microservice";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantStateRecord {
    pub tenant: TenantInfra,
    pub metadata: TenantMetadata,
    pub progress: Progress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantInfra {
    pub urls: BTreeMap<String, UrlEntry>,
    pub ecr_repository: Option<EcrRepository>,
    pub s3_buckets: Vec<S3Bucket>,
    pub sqs_queues: Vec<SqsQueue>,
    pub sns_topics: Vec<SnsTopic>,
    pub sql_database: Option<SqlDatabase>,
    pub dynamodb: Vec<serde_json::Value>,
    pub api_gateway: Option<serde_json::Value>,
    pub cognito_identity_pool: Option<serde_json::Value>,
    pub bedrock_ai: Option<serde_json::Value>,
    pub tenant_config: TenantConfigSummary,
    pub logs: Logs,
    pub metrics: Vec<serde_json::Value>,
    pub alerts: Vec<serde_json::Value>,
    pub nginx: Option<Nginx>,
    pub squid: Squid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlType {
    Internal,
    Vanity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlEntry {
    #[serde(rename = "type")]
    pub url_type: UrlType,
    pub enabled: bool,
    pub shuttered: bool,
}

/// Capability flags plus name lists mirroring the resource collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantConfigSummary {
    pub redis: bool,
    pub mongo: bool,
    pub s3_buckets: Vec<String>,
    pub sqs_queues: Vec<String>,
    pub sns_topics: Vec<String>,
    pub dynamodb: Vec<String>,
    pub sql_database: bool,
    pub api_gateway: bool,
    pub cognito_identity_pool: bool,
    pub bedrock_ai: bool,
    pub zone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logs {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantMetadata {
    pub created: String,
    pub name: String,
    pub service_code: String,
    pub subtype: String,
    #[serde(rename = "type")]
    pub tenant_type: String,
    pub teams: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub complete: bool,
    pub steps: ProgressSteps,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSteps {
    pub infra: bool,
    pub logs: bool,
    pub metrics: bool,
    pub nginx: bool,
    pub squid: bool,
}

impl Progress {
    /// No partial provisioning is modelled: every step is done at creation.
    pub fn completed() -> Self {
        Self {
            complete: true,
            steps: ProgressSteps {
                infra: true,
                logs: true,
                metrics: true,
                nginx: true,
                squid: true,
            },
        }
    }
}

impl TenantStateRecord {
    pub fn push_queue(&mut self, queue: SqsQueue) {
        self.tenant.tenant_config.sqs_queues.push(queue.name.clone());
        self.tenant.sqs_queues.push(queue);
    }

    pub fn push_topic(&mut self, topic: SnsTopic) {
        self.tenant.tenant_config.sns_topics.push(topic.name.clone());
        self.tenant.sns_topics.push(topic);
    }

    pub fn push_bucket(&mut self, bucket: S3Bucket) {
        self.tenant
            .tenant_config
            .s3_buckets
            .push(bucket.bucket_name.clone());
        self.tenant.s3_buckets.push(bucket);
    }

    pub fn set_sql_database(&mut self, database: SqlDatabase) {
        self.tenant.sql_database = Some(database);
        self.tenant.tenant_config.sql_database = true;
    }

    /// Inserts or overwrites a single URL key; other keys are untouched.
    pub fn upsert_url(&mut self, url: impl Into<String>, entry: UrlEntry) {
        self.tenant.urls.insert(url.into(), entry);
    }
}
