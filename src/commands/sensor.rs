use anyhow::{Context, Result};
use tracing::info;

use super::{
    registry::{CommandRegistry, CommandSpec, NodeId},
    CommandContext,
};
use crate::{api::ApiConfig, lib::errors::RegistryError};

/// Register `sensor` and its subcommands. Every one of them needs credentials.
pub fn register(registry: &mut CommandRegistry, root: NodeId) -> Result<NodeId, RegistryError> {
    let sensor = registry.register(
        root,
        CommandSpec::new("sensor", "Manage the CrowdStrike Falcon Sensor"),
    )?;
    registry.register(
        sensor,
        CommandSpec::new("download", "Download the CrowdStrike Falcon Sensor")
            .examples("  # Download the CrowdStrike Falcon Sensor\n  falcon sensor download")
            .handler(run_download),
    )?;
    Ok(sensor)
}

fn run_download(ctx: &mut CommandContext<'_>) -> Result<()> {
    let api = ApiConfig::from_config(ctx.config)
        .with_context(|| format!("invalid API configuration for profile `{}`", ctx.config.profile))?;
    info!(
        target: "falcon::sensor",
        profile = %ctx.config.profile,
        cloud = %api.cloud,
        member_cid = api.member_cid.is_some(),
        user_agent = %api.user_agent,
        "Sensor download requested"
    );
    writeln!(
        ctx.out,
        "Sensor download requested for profile `{}` (cloud: {})",
        ctx.config.profile, api.cloud
    )?;
    Ok(())
}
