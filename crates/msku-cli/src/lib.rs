//! CLI library components for the `msku` tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
