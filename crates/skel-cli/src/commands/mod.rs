//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod init;
pub mod read;
pub mod templates;
