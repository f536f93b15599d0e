//! Subcommand implementations.

pub mod chart;
pub mod evaluate;
pub mod summary;
