//! Files compiled into the binary.

/// Built-in seed document: the platform's own tenants and account table.
pub const DEFAULT_SEED: &str = include_str!("../../seed/platform.toml");
