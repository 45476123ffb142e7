pub mod commands;
pub mod logging;
pub mod postal_source;
