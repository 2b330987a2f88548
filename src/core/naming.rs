//! Deterministic identifiers derived from a tenant name and environment.
//!
//! Everything here is a pure function. Database endpoints embed
//! [`deterministic_suffix`], so its output must not change between releases.

use crate::core::environment::Environment;
use sha2::{Digest, Sha256};

pub const REGION: &str = "eu-west-2";
pub const INTERNAL_DOMAIN: &str = "cdp-int.defra.cloud";

/// Stable 32-char lowercase hex digest of `name` (first 16 bytes of SHA-256).
///
/// The length matches an MD5 hex digest, but the value does not: database
/// endpoints derived here differ from ones minted with MD5.
pub fn deterministic_suffix(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();
    digest[..16].iter().map(|b| format!("{:02x}", b)).collect()
}

/// SQL-identifier-safe form of a tenant name.
pub fn normalize_identifier(name: &str) -> String {
    name.replace('-', "_")
}

/// `arn:aws:<service>:eu-west-2:<account>:<resource_path>`
pub fn arn(service: &str, account_id: &str, resource_path: &str) -> String {
    format!("arn:aws:{}:{}:{}:{}", service, REGION, account_id, resource_path)
}

pub fn default_internal_url(name: &str, env: Environment) -> String {
    format!("{}.{}.{}", name, env, INTERNAL_DOMAIN)
}

pub fn logs_dashboard_url(name: &str, env: Environment) -> String {
    format!(
        "https://logs.{}.defra.cloud/_dashboards/app/dashboards#/view/{}",
        env, name
    )
}

pub fn s3_domain_name(bucket: &str) -> String {
    format!("{}.s3.{}.amazonaws.com", bucket, REGION)
}

pub fn rds_writer_endpoint(name: &str, suffix: &str) -> String {
    format!("{}-{}.{}.rds.amazonaws.com", name, suffix, REGION)
}

pub fn rds_reader_endpoint(name: &str, suffix: &str) -> String {
    format!("{}.cluster-ro-{}.{}.rds.amazonaws.com", name, suffix, REGION)
}
