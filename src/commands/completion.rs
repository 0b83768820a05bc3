use anyhow::{Context, Result};
use clap::{value_parser, Arg};
use clap_complete::{generate, Shell};

use super::{registry::CommandSpec, CommandContext};

const SHELL_ARG: &str = "shell";

/// `falcon completion <shell>`; exempt from the credential check by name.
pub fn spec() -> CommandSpec {
    CommandSpec::new("completion", "Generate the autocompletion script for the specified shell")
        .arg(
            Arg::new(SHELL_ARG)
                .required(true)
                .value_parser(value_parser!(Shell))
                .help("Target shell"),
        )
        .examples("  # Load completions in the current bash session\n  source <(falcon completion bash)")
        .handler(run)
}

fn run(ctx: &mut CommandContext<'_>) -> Result<()> {
    let shell = ctx
        .matches
        .get_one::<Shell>(SHELL_ARG)
        .copied()
        .context("a shell name is required")?;
    let mut command = ctx.tree.to_clap();
    let bin_name = ctx.tree.name(ctx.tree.root());
    generate(shell, &mut command, bin_name, ctx.out);
    Ok(())
}
