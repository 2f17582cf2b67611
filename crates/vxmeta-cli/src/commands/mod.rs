//! CLI subcommand implementations

pub mod common;
pub mod run;
pub mod show;
