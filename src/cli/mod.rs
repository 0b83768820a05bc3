//! Command-line surface: flags, help rewriting, dispatch and exit codes.
pub mod args;
pub mod dispatch;
pub mod exit;
pub mod help;

pub use args::{config_override, flag_values, global_args, root_args, verbose};
pub use dispatch::Dispatcher;
pub use exit::RuntimeExit;
pub use help::normalize_help_request;
