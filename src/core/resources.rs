//! Resource descriptors and the builders that synthesize them.
//!
//! A builder takes a tenant name, an environment and a minimal config record
//! and returns a fully-populated descriptor. Builders never touch the store and
//! never perform I/O; all defaulting for optional config fields happens here.

use crate::core::environment::{AccountMap, Environment};
use crate::core::error::PlatformStateError;
use crate::core::naming::{self, REGION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const QUEUE_RECEIVE_WAIT_TIME_SECONDS: u32 = 30;
pub const SQL_ENGINE: &str = "aurora-postgresql";
pub const SQL_ENGINE_VERSION: &str = "16.8";
pub const SQL_PORT: u16 = 5432;

// ===== Minimal input configs =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueConfig {
    pub name: String,
    /// String-typed flag; only the literal `"true"` enables FIFO.
    #[serde(default)]
    pub fifo_queue: String,
    #[serde(default)]
    pub content_based_deduplication: Option<bool>,
    #[serde(default)]
    pub subscriptions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicConfig {
    pub name: String,
    #[serde(default)]
    pub fifo_topic: String,
    #[serde(default)]
    pub content_based_deduplication: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketConfig {
    pub name: String,
    #[serde(default)]
    pub versioning: Option<Versioning>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Versioning {
    Enabled,
    Suspended,
    #[default]
    Disabled,
}

// ===== Descriptors =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqsQueue {
    pub arn: String,
    pub name: String,
    pub url: String,
    pub fifo_queue: bool,
    pub content_based_deduplication: bool,
    pub receive_wait_time_seconds: u32,
    pub subscriptions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnsTopic {
    pub arn: String,
    pub name: String,
    pub fifo_topic: bool,
    pub content_based_deduplication: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Bucket {
    pub arn: String,
    pub bucket_name: String,
    pub bucket_domain_name: String,
    pub versioning: Versioning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlDatabase {
    pub arn: String,
    pub endpoint: String,
    pub reader_endpoint: String,
    pub name: String,
    pub port: u16,
    pub engine_version: String,
    pub engine: String,
    pub database_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcrRepository {
    pub arn: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nginx {
    pub servers: BTreeMap<String, NginxServer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NginxServer {
    pub name: String,
    pub locations: BTreeMap<String, NginxLocation>,
    pub settings: NginxSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NginxLocation {
    pub path: String,
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NginxSettings {
    pub listen: String,
    pub server_tokens: String,
    pub server_name: String,
    pub ssl_certificate: String,
    pub ssl_certificate_key: String,
    pub ssl_protocols: String,
    pub keepalive_timeout: String,
    pub add_header: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squid {
    pub ports: Vec<u16>,
    pub domains: Vec<String>,
}

// ===== Builders =====

pub fn build_queue(
    env: Environment,
    accounts: &AccountMap,
    config: &QueueConfig,
) -> Result<SqsQueue, PlatformStateError> {
    let account_id = accounts.account_id_for(env)?;
    Ok(SqsQueue {
        arn: naming::arn("sqs", account_id, &config.name),
        name: config.name.clone(),
        url: format!(
            "https://sqs.{}.amazonaws.com/{}/{}",
            REGION, account_id, config.name
        ),
        fifo_queue: config.fifo_queue == "true",
        content_based_deduplication: config.content_based_deduplication.unwrap_or(false),
        receive_wait_time_seconds: QUEUE_RECEIVE_WAIT_TIME_SECONDS,
        subscriptions: config.subscriptions.clone().unwrap_or_default(),
    })
}

pub fn build_topic(
    env: Environment,
    accounts: &AccountMap,
    config: &TopicConfig,
) -> Result<SnsTopic, PlatformStateError> {
    let account_id = accounts.account_id_for(env)?;
    Ok(SnsTopic {
        arn: naming::arn("sns", account_id, &config.name),
        name: config.name.clone(),
        fifo_topic: config.fifo_topic == "true",
        content_based_deduplication: config.content_based_deduplication.unwrap_or(false),
    })
}

/// S3 ARNs are global: no region or account segment.
pub fn build_bucket(config: &BucketConfig) -> S3Bucket {
    S3Bucket {
        arn: format!("arn:aws:s3:::{}", config.name),
        bucket_name: config.name.clone(),
        bucket_domain_name: naming::s3_domain_name(&config.name),
        versioning: config.versioning.unwrap_or_default(),
    }
}

pub fn build_sql_database(
    name: &str,
    env: Environment,
    accounts: &AccountMap,
) -> Result<SqlDatabase, PlatformStateError> {
    let account_id = accounts.account_id_for(env)?;
    let suffix = naming::deterministic_suffix(name);
    Ok(SqlDatabase {
        arn: naming::arn("rds", account_id, &format!("cluster:{}", name)),
        endpoint: naming::rds_writer_endpoint(name, &suffix),
        reader_endpoint: naming::rds_reader_endpoint(name, &suffix),
        name: name.to_string(),
        port: SQL_PORT,
        engine_version: SQL_ENGINE_VERSION.to_string(),
        engine: SQL_ENGINE.to_string(),
        database_name: naming::normalize_identifier(name),
    })
}

/// Container registry repository, always scoped to the management account.
pub fn build_ecr_repository(
    name: &str,
    accounts: &AccountMap,
) -> Result<EcrRepository, PlatformStateError> {
    let account_id = accounts.account_id_for(Environment::Management)?;
    Ok(EcrRepository {
        arn: naming::arn("ecr", account_id, &format!("repository/{}", name)),
        name: name.to_string(),
        url: format!("{}.dkr.ecr.{}.amazonaws.com/{}", account_id, REGION, name),
    })
}

pub fn build_nginx(name: &str, env: Environment) -> Nginx {
    let server_name = naming::default_internal_url(name, env);

    let root = NginxLocation {
        path: "/".to_string(),
        params: params(&[
            ("proxy_set_header", "X-cdp-request-id $cdp_request_id".to_string()),
            ("proxy_pass", format!("https://{}", name)),
            ("proxy_pass_request_headers", "on".to_string()),
        ]),
    };
    let upload = NginxLocation {
        path: "/upload-and-scan".to_string(),
        params: params(&[
            ("client_max_body_size", "2304M".to_string()),
            (
                "proxy_set_header",
                format!("Host cdp-uploader.{}.{}", env, naming::INTERNAL_DOMAIN),
            ),
            (
                "proxy_pass",
                "https://upload-for-virus-scanning/upload-and-scan".to_string(),
            ),
            ("proxy_pass_request_headers", "on".to_string()),
        ]),
    };

    let mut locations = BTreeMap::new();
    locations.insert(root.path.clone(), root);
    locations.insert(upload.path.clone(), upload);

    let server = NginxServer {
        name: server_name.clone(),
        locations,
        settings: NginxSettings {
            listen: "443 ssl".to_string(),
            server_tokens: "off".to_string(),
            server_name: server_name.clone(),
            ssl_certificate: "/etc/nginx/ssl/cdp.crt".to_string(),
            ssl_certificate_key: "/etc/nginx/ssl/cdp.key".to_string(),
            ssl_protocols: "TLSv1.2 TLSv1.3".to_string(),
            keepalive_timeout: "0".to_string(),
            add_header: "X-cdp-request-id $cdp_request_id".to_string(),
        },
    };

    let mut servers = BTreeMap::new();
    servers.insert(server_name, server);
    Nginx { servers }
}

/// Shared egress allow-list; identical for every tenant.
pub fn build_squid() -> Squid {
    Squid {
        ports: vec![80, 443],
        domains: [
            ".cdp-int.defra.cloud",
            ".amazonaws.com",
            "login.microsoftonline.com",
            "www.gov.uk",
            ".auth.eu-west-2.amazoncognito.com",
            ".browserstack.com",
            "api.notifications.service.gov.uk",
        ]
        .iter()
        .map(|d| d.to_string())
        .collect(),
    }
}

fn params(pairs: &[(&str, String)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}
