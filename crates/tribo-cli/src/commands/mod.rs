//! CLI commands

pub mod config;
pub mod get;
pub mod serve;
