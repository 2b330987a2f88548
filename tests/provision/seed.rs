use platform_state::core::environment::Environment;
use platform_state::core::error::PlatformStateError;
use platform_state::core::journal::EventLevel;
use platform_state::core::tenant_state::UrlType;
use platform_state::provision::seed::{SeedConfig, bootstrap};
use std::fs;
use tempfile::tempdir;

fn seeded() -> platform_state::provision::lifecycle::TenantLifecycle {
    let seed = SeedConfig::embedded().expect("embedded seed");
    let mut lifecycle = seed.lifecycle();
    bootstrap(&mut lifecycle, &seed).expect("bootstrap");
    lifecycle
}

#[test]
fn embedded_seed_bootstraps_every_environment() {
    let seed = SeedConfig::embedded().unwrap();
    let mut lifecycle = seed.lifecycle();
    let summary = bootstrap(&mut lifecycle, &seed).unwrap();

    assert_eq!(summary.tenants, 6);
    assert_eq!(summary.records, 6 * Environment::ALL.len());
    assert_eq!(summary.warn_events, 0);
    for env in Environment::ALL {
        assert_eq!(lifecycle.store().tenant_count(env), 6);
    }
}

#[test]
fn portal_backend_buckets_only_in_management() {
    let lc = seeded();
    for env in Environment::ALL {
        let record = lc.store().get(env, "cdp-portal-backend").unwrap();
        if env == Environment::Management {
            assert_eq!(
                record.tenant.tenant_config.s3_buckets,
                vec!["cdp-portal-backend", "cdp-portal-backend-images"]
            );
        } else {
            assert!(record.tenant.s3_buckets.is_empty());
        }
        assert_eq!(record.tenant.sqs_queues.len(), 1);
        assert_eq!(
            record.tenant.sqs_queues[0].subscriptions,
            vec!["error_notification.fifo"]
        );
        assert_eq!(
            record.tenant.tenant_config.sns_topics,
            vec!["decision_notification", "error_notification"]
        );
    }
}

#[test]
fn postgres_service_has_database_everywhere() {
    let lc = seeded();
    for env in Environment::ALL {
        let record = lc.store().get(env, "cdp-postgres-service").unwrap();
        let db = record.tenant.sql_database.as_ref().unwrap();
        assert_eq!(db.database_name, "cdp_postgres_service");
        assert!(record.tenant.tenant_config.sql_database);

        let other = lc.store().get(env, "cdp-self-service-ops").unwrap();
        assert!(other.tenant.sql_database.is_none());
    }
}

#[test]
fn test_suite_has_no_nginx_and_no_team() {
    let lc = seeded();
    let record = lc
        .store()
        .get(Environment::Prod, "cdp-env-test-suite")
        .unwrap();
    assert!(record.tenant.nginx.is_none());
    assert!(record.metadata.teams.is_empty());
    assert_eq!(record.metadata.tenant_type, "TestSuite");
}

#[test]
fn seeded_urls_land_in_their_environment() {
    let lc = seeded();
    let mgmt = lc
        .store()
        .get(Environment::Management, "cdp-portal-frontend")
        .unwrap();
    assert_eq!(mgmt.tenant.urls.len(), 3);
    assert!(mgmt.tenant.urls["portal.defra.gov.uk"].enabled);

    let infra = lc
        .store()
        .get(Environment::InfraDev, "cdp-portal-frontend")
        .unwrap();
    let test_url = &infra.tenant.urls["portal-test.cdp-int.defra.cloud"];
    assert!(test_url.shuttered);
    assert_eq!(test_url.url_type, UrlType::Vanity);

    let prod = lc
        .store()
        .get(Environment::Prod, "cdp-portal-frontend")
        .unwrap();
    assert_eq!(prod.tenant.urls.len(), 1);
}

#[test]
fn seed_file_with_environment_overrides() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("seed.toml");
    fs::write(
        &path,
        r#"
created = "2026-01-01T00:00:00Z"

[accounts]
management = "123456789012"
dev = "210987654321"

[[tenants]]
name = "svc-a"
zone = "public"
redis = true
service_code = "ABC"
team = "t1"
type = "Microservice"
subtype = "Backend"

[[tenants.sqs_queues]]
name = "jobs"
fifo_queue = "false"
environments = ["dev"]

[[tenants.s3_buckets]]
name = "svc-a-data"
environments = ["dev", "management"]
"#,
    )
    .unwrap();

    let seed = SeedConfig::load(&path).unwrap();
    let mut lc = seed.lifecycle();
    bootstrap(&mut lc, &seed).unwrap();

    let dev = lc.store().get(Environment::Dev, "svc-a").unwrap();
    assert_eq!(dev.metadata.created, "2026-01-01T00:00:00Z");
    assert_eq!(dev.tenant.sqs_queues[0].url, "https://sqs.eu-west-2.amazonaws.com/210987654321/jobs");
    assert_eq!(dev.tenant.s3_buckets.len(), 1);
    let mgmt = lc.store().get(Environment::Management, "svc-a").unwrap();
    assert!(mgmt.tenant.sqs_queues.is_empty());
    assert_eq!(mgmt.tenant.s3_buckets.len(), 1);
    assert_eq!(lc.journal().count(EventLevel::Warn), 0);
}

#[test]
fn seed_queue_for_environment_without_account_fails() {
    let doc = r#"
[accounts]
management = "123456789012"

[[tenants]]
name = "svc-a"
zone = "public"
service_code = "ABC"
type = "TestSuite"
subtype = "Journey"

[[tenants.sqs_queues]]
name = "jobs"
"#;
    let seed = SeedConfig::from_toml(doc).unwrap();
    let mut lc = seed.lifecycle();
    let err = bootstrap(&mut lc, &seed).unwrap_err();
    assert!(matches!(err, PlatformStateError::UnknownEnvironment(ref e) if e == "infra-dev"));
}

#[test]
fn invalid_tenant_name_is_rejected() {
    let doc = r#"
[[tenants]]
name = "Bad_Name"
zone = "public"
service_code = "ABC"
type = "TestSuite"
subtype = "Journey"
"#;
    let err = SeedConfig::from_toml(doc).unwrap_err();
    assert!(matches!(err, PlatformStateError::SeedError(_)));
}

#[test]
fn missing_seed_file_is_an_io_error() {
    let tmp = tempdir().unwrap();
    let err = SeedConfig::load(&tmp.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, PlatformStateError::IoError(_)));
}

#[test]
fn repeated_tenant_keeps_first_record_and_seeds_the_rest() {
    let doc = r#"
[accounts]
management = "123456789012"

[[tenants]]
name = "svc-a"
zone = "public"
service_code = "ABC"
type = "Microservice"
subtype = "Backend"

[[tenants]]
name = "svc-b"
zone = "public"
service_code = "ABC"
type = "TestSuite"
subtype = "Journey"

[[tenants]]
name = "svc-a"
zone = "protected"
service_code = "XYZ"
type = "TestSuite"
subtype = "Journey"
"#;
    let seed = SeedConfig::from_toml(doc).unwrap();
    let mut lc = seed.lifecycle();
    let summary = bootstrap(&mut lc, &seed).unwrap();

    assert_eq!(summary.tenants, 2);
    assert_eq!(summary.records, 2 * Environment::ALL.len());
    assert_eq!(summary.warn_events, Environment::ALL.len());
    for env in Environment::ALL {
        assert!(lc.store().contains(env, "svc-b"));
        let first = lc.store().get(env, "svc-a").unwrap();
        assert_eq!(first.tenant.tenant_config.zone, "public");
        assert_eq!(first.metadata.service_code, "ABC");
        assert!(first.tenant.nginx.is_some());
    }
    let warned = lc
        .journal()
        .events()
        .iter()
        .filter(|e| e.level == EventLevel::Warn)
        .all(|e| e.op == "tenant.create" && e.tenant == "svc-a");
    assert!(warned);
}

#[test]
fn seed_without_created_stamps_rfc3339_time() {
    let doc = r#"
[accounts]
management = "123456789012"

[[tenants]]
name = "svc-a"
zone = "public"
service_code = "ABC"
type = "TestSuite"
subtype = "Journey"
"#;
    let seed = SeedConfig::from_toml(doc).unwrap();
    assert!(seed.created.is_none());
    let mut lc = seed.lifecycle();
    bootstrap(&mut lc, &seed).unwrap();

    let created = &lc.store().get(Environment::Prod, "svc-a").unwrap().metadata.created;
    let stamp = regex::Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$").unwrap();
    assert!(stamp.is_match(created), "created = {}", created);
}
