//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into calls on `rootgen-core` and
//! `rootgen-adapters` and report results through the `OutputManager`.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod inspect;
