use anyhow::Result;

use super::{registry::CommandSpec, version::version_string, CommandContext};
use crate::cli::args::{root_args, version_requested};

pub fn spec() -> CommandSpec {
    CommandSpec::new("falcon", "The CrowdStrike Falcon CLI")
        .long_about(
            "The CrowdStrike Falcon CLI allows you to work effortlessly with the CrowdStrike Falcon platform.",
        )
        .args(root_args())
        .handler(run)
}

fn run(ctx: &mut CommandContext<'_>) -> Result<()> {
    if version_requested(ctx.matches) {
        writeln!(ctx.out, "{}", version_string())?;
        return Ok(());
    }
    ctx.print_help()
}
