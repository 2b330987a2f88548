//! Core types and pure derivations for the platform state engine.
//!
//! Nothing in here mutates state on its own; the lifecycle operations in
//! `provision` are the only writers of the [`store::StateStore`].

pub mod assets;
pub mod environment;
pub mod error;
pub mod journal;
pub mod naming;
pub mod output;
pub mod resources;
pub mod store;
pub mod tenant_state;
pub mod time;
