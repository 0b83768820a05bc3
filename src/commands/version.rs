use anyhow::Result;

use super::{registry::CommandSpec, CommandContext};

/// Human-readable build description printed by `falcon version` and `falcon --version`.
pub fn version_string() -> String {
    format!(
        "falcon version: {:?}, commit: {:?}, os: {:?}, arch: {:?}",
        env!("CARGO_PKG_VERSION"),
        option_env!("FALCON_GIT_COMMIT").unwrap_or("unknown"),
        std::env::consts::OS,
        std::env::consts::ARCH,
    )
}

pub fn spec() -> CommandSpec {
    CommandSpec::new("version", "Print the version number of the Falcon CLI")
        .examples("  # Print the version of the Falcon CLI\n  falcon version")
        .handler(run)
}

fn run(ctx: &mut CommandContext<'_>) -> Result<()> {
    writeln!(ctx.out, "{}", version_string())?;
    Ok(())
}
