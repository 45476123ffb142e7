//! Subcommand bodies for `postool` and `addrtool`. Each function prints its
//! result and exits the process with status 1 on error.

pub mod address_ops;
pub mod build_ops;
pub mod config_ops;
pub mod lookup_ops;
