//! Mutation API and the seed-driven bootstrap pass.

pub mod lifecycle;
pub mod seed;
