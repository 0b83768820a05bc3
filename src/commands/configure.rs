//! Shared tail of `falcon init` and `falcon auth config`: validate, then persist.
use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    config::{Profile, ProfileStore},
    lib::validate::{validate_profile, validate_profile_env_namespace},
};

/// Validate `profile` and write it under `name`, leaving every other entry as it was.
///
/// Nothing is written when validation fails.
pub fn save_profile(
    store_path: &Path,
    name: &str,
    profile: Profile,
    out: &mut dyn Write,
) -> Result<()> {
    validate_profile(name, &profile)?;

    let mut store = ProfileStore::load_or_default(store_path)
        .with_context(|| format!("failed to re-read {}", store_path.display()))?;
    validate_profile_env_namespace(name, store.profile_names())?;
    ProfileStore::ensure_exists(store_path)?;
    store.upsert_profile(name, profile);
    store.save(store_path)?;

    info!(
        target: "falcon::config",
        profile = name,
        path = %store_path.display(),
        "Profile saved"
    );
    writeln!(
        out,
        "Profile `{name}` saved to {}",
        store_path.display()
    )?;
    Ok(())
}
