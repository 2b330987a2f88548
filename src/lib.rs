//! platform-state: in-memory tenant infrastructure state for the developer platform.
//!
//! For every onboarded service (a tenant) and every deployment environment,
//! the crate keeps a state record of derived AWS-shaped resources: queues,
//! topics, buckets, the SQL database, URLs, the container registry and the
//! reverse/egress proxy configuration.
//!
//! # Architecture
//!
//! - [`core`]: environments, naming, resource builders, record types, the
//!   store and the event journal. Pure derivations only.
//! - [`provision`]: the lifecycle operations (the only writers) and the seed
//!   loader that drives them at startup.
//!
//! State is never persisted. Every process rebuilds it from the seed document.
//!
//! # Examples
//!
//! ```bash
//! # Bootstrap from the built-in seed and summarize
//! platform-state seed
//!
//! # Inspect one record
//! platform-state show --env management --tenant cdp-portal-backend
//! ```

pub mod core;
pub mod provision;

mod cli;

use crate::cli::{Cli, Command, EventsFormat, SeedFormat, ShowFormat};
use crate::core::environment::Environment;
use crate::core::error::PlatformStateError;
use crate::core::journal::EventLevel;
use crate::core::output;
use crate::provision::lifecycle::TenantLifecycle;
use crate::provision::seed::{self, BootstrapSummary, SeedConfig, SeedReport};
use clap::Parser;
use colored::Colorize;

pub fn run() -> Result<(), PlatformStateError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let seed_config = match &cli.seed {
        Some(path) => SeedConfig::load(path)?,
        None => SeedConfig::embedded()?,
    };
    let mut lifecycle = seed_config.lifecycle();
    let summary = seed::bootstrap(&mut lifecycle, &seed_config)?;

    match cli.command {
        Command::Seed { format } => print_seed(&lifecycle, &summary, format)?,
        Command::List { env } => {
            let envs = match env {
                Some(name) => vec![name.parse::<Environment>()?],
                None => Environment::ALL.to_vec(),
            };
            for env in envs {
                println!(
                    "{} ({} tenants)",
                    env.to_string().bright_cyan().bold(),
                    lifecycle.store().tenant_count(env)
                );
                for (name, record) in lifecycle.store().tenants(env) {
                    println!("{}", output::tenant_line(name, record));
                }
            }
        }
        Command::Show {
            env,
            tenant,
            format,
        } => {
            let env: Environment = env.parse()?;
            let record = lifecycle.store().get(env, &tenant).ok_or_else(|| {
                PlatformStateError::NotFound(format!("tenant {} in {}", tenant, env))
            })?;
            match format {
                ShowFormat::Text => println!("{}", output::record_detail(env, &tenant, record)),
                ShowFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
            }
        }
        Command::Events { format } => {
            if format == EventsFormat::Jsonl {
                print!("{}", lifecycle.journal().to_jsonl()?);
            } else {
                for event in lifecycle.journal().events() {
                    let level = match event.level {
                        EventLevel::Info => "INFO".bright_green(),
                        EventLevel::Warn => "WARN".bright_yellow(),
                    };
                    println!(
                        "{} {:<16} {:<10} {}",
                        level,
                        event.op,
                        event.environment.as_str(),
                        event.message
                    );
                }
            }
        }
        Command::Accounts => {
            for (env, account_id) in lifecycle.accounts().iter() {
                println!("{:<12} {}", env.to_string(), account_id);
            }
        }
    }

    Ok(())
}

fn print_seed(
    lifecycle: &TenantLifecycle,
    summary: &BootstrapSummary,
    format: SeedFormat,
) -> Result<(), PlatformStateError> {
    if format == SeedFormat::Json {
        let report = SeedReport::ok(summary, lifecycle.store());
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} Seeded {} tenants into {} records ({} info, {} warnings)",
        "✓".bright_green(),
        summary.tenants,
        summary.records,
        summary.info_events,
        summary.warn_events
    );
    for env in lifecycle.store().environments() {
        println!(
            "  {:<12} {} tenants",
            env.to_string(),
            lifecycle.store().tenant_count(env)
        );
    }
    Ok(())
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("PLATFORM_STATE_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("platform_state=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
