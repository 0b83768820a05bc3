//! Tracing initialization and per-invocation telemetry.

use anyhow::Result;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize `tracing` for the CLI.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown unless
/// `--verbose` asked for debug output.
pub fn init_tracing(verbose: bool) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let default_directive = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    fmt()
        .with_env_filter(env_filter)
        .with_target(verbose)
        .with_file(verbose)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Facts about one invocation, logged once the gate has decided.
#[derive(Debug)]
pub struct InvocationTelemetry<'a> {
    pub command: &'a str,
    pub profile: &'a str,
    pub config_path: &'a str,
    pub auth_required: bool,
    pub has_handler: bool,
}

/// Emit invocation details to `tracing`.
pub fn emit_invocation(telemetry: &InvocationTelemetry<'_>) {
    debug!(
        target: "falcon::dispatch",
        command = telemetry.command,
        profile = telemetry.profile,
        config_path = telemetry.config_path,
        auth_required = telemetry.auth_required,
        has_handler = telemetry.has_handler,
        "Dispatching command"
    );
}
