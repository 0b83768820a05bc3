//! Shared library modules providing error types, file utilities, prompting, validation and telemetry initialization.

pub mod errors;
pub mod fs;
pub mod paths;
pub mod prompt;
pub mod telemetry;
pub mod validate;
