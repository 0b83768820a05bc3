//! `falcon auth` and its interactive `config` subcommand.
use anyhow::{Context, Result};
use clap::Arg;

use super::{
    configure::save_profile,
    registry::{CommandRegistry, CommandSpec, NodeId},
    CommandContext,
};
use crate::{
    api::Cloud,
    config::{Profile, ProfileStore},
    lib::errors::RegistryError,
};

/// Positional profile selector of `falcon auth config`.
pub const PROFILE_NAME_ARG: &str = "profile_name";

const CONFIG_EXAMPLES: &str = "  # Configure the default profile interactively
  falcon auth config

  # Configure a named profile
  falcon auth config prod";

/// Register the `auth` group. The whole group runs without credentials.
pub fn register(registry: &mut CommandRegistry, root: NodeId) -> Result<NodeId, RegistryError> {
    let auth = registry.register(
        root,
        CommandSpec::new("auth", "Authenticate falcon with CrowdStrike Falcon API"),
    )?;
    registry.mark_auth_optional(auth);
    registry.register(
        auth,
        CommandSpec::new(
            "config",
            "Configures a profile to use with CrowdStrike Falcon API",
        )
        .alias("login")
        .alias("init")
        .arg(
            Arg::new(PROFILE_NAME_ARG)
                .value_name("PROFILE")
                .help("Profile to configure; prompted for when omitted"),
        )
        .examples(CONFIG_EXAMPLES)
        .handler(run_config),
    )?;
    Ok(auth)
}

fn run_config(ctx: &mut CommandContext<'_>) -> Result<()> {
    let selector = ctx
        .matches
        .get_one::<String>(PROFILE_NAME_ARG)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    let existing = match &selector {
        Some(name) => ProfileStore::load_or_default(ctx.store_path)?
            .profile(name)
            .cloned()
            .unwrap_or_default(),
        None => ctx.config.to_profile(),
    };
    let prompter = ctx.prompter;

    let client_id = prompter
        .ask_password("Enter your CrowdStrike API Client ID")
        .context("failed to read the client ID")?;
    let client_secret = prompter
        .ask_password("Enter your CrowdStrike API Client Secret")
        .context("failed to read the client secret")?;
    let cid = prompter
        .ask_text(
            "Enter your CrowdStrike Customer ID (CID)",
            Some(existing.cid.as_str()),
        )
        .context("failed to read the CID")?;
    let member_cid = prompter
        .ask_text(
            "Enter your CrowdStrike Member CID",
            Some(existing.member_cid.as_str()),
        )
        .context("failed to read the member CID")?;

    let clouds = Cloud::ALL.map(|cloud| cloud.as_str());
    let current_cloud = existing.cloud.parse::<Cloud>().unwrap_or_default();
    let cloud = prompter
        .ask_choice(
            "Select your CrowdStrike Cloud",
            &clouds,
            current_cloud.index(),
        )
        .context("failed to read the cloud region")?;

    let profile_name = match selector {
        Some(name) => name,
        None => prompter
            .ask_text(
                "What is the name of the profile you want to configure?",
                Some(ctx.config.profile.as_str()),
            )
            .context("failed to read the profile name")?,
    };

    let profile = Profile {
        cid: cid.trim().to_string(),
        client_id: client_id.trim().to_string(),
        client_secret: client_secret.trim().to_string(),
        member_cid: member_cid.trim().to_string(),
        cloud: Cloud::ALL
            .get(cloud)
            .copied()
            .unwrap_or_default()
            .as_str()
            .to_string(),
    };
    save_profile(ctx.store_path, profile_name.trim(), profile, ctx.out)
}
