//! CLI subcommands.

pub mod docs;
pub mod set_version;
