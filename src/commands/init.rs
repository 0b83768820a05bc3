use anyhow::{Context, Result};

use super::{configure::save_profile, registry::CommandSpec, CommandContext};
use crate::config::DEFAULT_CLOUD;

const EXAMPLES: &str = "  # Initialize the CrowdStrike Falcon CLI tool
  falcon init

  # Initialize the CrowdStrike Falcon CLI tool with OAuth2 client ID and secret
  falcon init --client-id <client_id> --client-secret <client_secret>";

/// `falcon init`; runs without credentials since it is how they are first stored.
pub fn spec() -> CommandSpec {
    CommandSpec::new("init", "Initialize the Falcon CLI tool")
        .examples(EXAMPLES)
        .handler(run)
}

/// Persist the resolved values into the active profile, asking only for
/// what is still missing.
fn run(ctx: &mut CommandContext<'_>) -> Result<()> {
    let mut profile = ctx.config.to_profile();

    if profile.client_id.is_empty() {
        profile.client_id = ctx
            .prompter
            .ask_password("Please provide your CrowdStrike Falcon OAuth2 API Client ID")
            .context("failed to read the client ID")?
            .trim()
            .to_string();
    }
    if profile.client_secret.is_empty() {
        profile.client_secret = ctx
            .prompter
            .ask_password("Please provide your CrowdStrike Falcon OAuth2 API Client Secret")
            .context("failed to read the client secret")?
            .trim()
            .to_string();
    }
    if profile.cloud == DEFAULT_CLOUD {
        profile.cloud.clear();
    }

    save_profile(ctx.store_path, &ctx.config.profile, profile, ctx.out)
}
