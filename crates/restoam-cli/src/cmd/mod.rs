//! One module per CLI subcommand.

pub mod completions;
pub mod create;
pub mod delete;
pub mod filters;
pub mod list;
pub mod show;
pub mod update;
