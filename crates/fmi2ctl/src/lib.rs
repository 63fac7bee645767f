//! Subcommands of the `fmi2ctl` inspector.

pub mod cmd_info;
pub mod cmd_structure;
pub mod cmd_vars;
pub mod common;
