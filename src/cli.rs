//! CLI struct definitions for the platform-state command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "platform-state",
    version = env!("CARGO_PKG_VERSION"),
    about = "Build the in-memory tenant state for every platform environment from a seed document and inspect it."
)]
pub(crate) struct Cli {
    /// Seed document to bootstrap from (defaults to the built-in seed).
    #[clap(long, global = true)]
    pub seed: Option<PathBuf>,
    /// Log at debug level (PLATFORM_STATE_LOG overrides).
    #[clap(long, short = 'v', global = true)]
    pub verbose: bool,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Bootstrap the state and print a summary
    Seed {
        /// `json` prints the full state.
        #[clap(long, value_enum, default_value_t = SeedFormat::Text)]
        format: SeedFormat,
    },
    /// List tenants per environment
    List {
        /// Restrict to one environment.
        #[clap(long)]
        env: Option<String>,
    },
    /// Show one tenant's state record
    Show {
        #[clap(long)]
        env: String,
        #[clap(long)]
        tenant: String,
        #[clap(long, value_enum, default_value_t = ShowFormat::Json)]
        format: ShowFormat,
    },
    /// Print the bootstrap event journal
    Events {
        #[clap(long, value_enum, default_value_t = EventsFormat::Text)]
        format: EventsFormat,
    },
    /// Print the environment to account id table
    Accounts,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SeedFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ShowFormat {
    Json,
    Text,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EventsFormat {
    Text,
    Jsonl,
}
