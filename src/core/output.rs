//! Text rendering for CLI surfaces.
//!
//! Keeps per-tenant output to one bounded line in listings while preserving
//! the resource names that matter when scanning a whole environment.

use crate::core::environment::Environment;
use crate::core::tenant_state::TenantStateRecord;
use colored::Colorize;

/// Render up to `max_items` names, noting how many were left out.
pub fn preview_names(names: &[String], max_items: usize) -> String {
    if names.is_empty() {
        return "-".to_string();
    }
    let shown = names
        .iter()
        .take(max_items)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() > max_items {
        format!("{} (+{} more)", shown, names.len() - max_items)
    } else {
        shown
    }
}

/// One line per tenant for `list`.
pub fn tenant_line(name: &str, record: &TenantStateRecord) -> String {
    let config = &record.tenant.tenant_config;
    let mut flags = Vec::new();
    if config.redis {
        flags.push("redis");
    }
    if config.mongo {
        flags.push("mongo");
    }
    if config.sql_database {
        flags.push("sql");
    }
    format!(
        "  {} [{}] {} urls={} queues={} topics={} buckets={} flags={}",
        name.bright_white().bold(),
        record.metadata.tenant_type,
        config.zone.dimmed(),
        record.tenant.urls.len(),
        config.sqs_queues.len(),
        config.sns_topics.len(),
        config.s3_buckets.len(),
        if flags.is_empty() {
            "-".to_string()
        } else {
            flags.join(",")
        }
    )
}

/// Multi-line view of a single record for `show --format text`.
pub fn record_detail(env: Environment, name: &str, record: &TenantStateRecord) -> String {
    let tenant = &record.tenant;
    let mut lines = vec![
        format!("{} {}/{}", "▸".bright_cyan(), env, name.bright_white().bold()),
        format!(
            "  type: {} / {}  service_code: {}  teams: {}",
            record.metadata.tenant_type,
            record.metadata.subtype,
            record.metadata.service_code,
            preview_names(&record.metadata.teams, 3)
        ),
        format!("  created: {}", record.metadata.created),
        "  urls:".to_string(),
    ];
    for (url, entry) in &tenant.urls {
        lines.push(format!(
            "    {} ({:?}, enabled={}, shuttered={})",
            url, entry.url_type, entry.enabled, entry.shuttered
        ));
    }
    if let Some(ecr) = &tenant.ecr_repository {
        lines.push(format!("  ecr: {}", ecr.url));
    }
    lines.push(format!(
        "  queues: {}",
        preview_names(&tenant.tenant_config.sqs_queues, 5)
    ));
    lines.push(format!(
        "  topics: {}",
        preview_names(&tenant.tenant_config.sns_topics, 5)
    ));
    lines.push(format!(
        "  buckets: {}",
        preview_names(&tenant.tenant_config.s3_buckets, 5)
    ));
    if let Some(db) = &tenant.sql_database {
        lines.push(format!("  sql: {} ({})", db.endpoint, db.database_name));
    }
    lines.push(format!(
        "  nginx: {}",
        if tenant.nginx.is_some() { "yes" } else { "no" }
    ));
    lines.join("\n")
}
