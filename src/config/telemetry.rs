use std::path::Path;

use tracing::{debug, info};

use super::{ConfigKey, Resolution};
use crate::lib::paths::{StorePathSource, CONFIG_PATH_ENV};

pub fn log_store_source(path: &Path, source: StorePathSource) {
    match source {
        StorePathSource::Flag => info!(
            target: "falcon::config",
            path = %path.display(),
            "Using profile store from --config"
        ),
        StorePathSource::Env => info!(
            target: "falcon::config",
            path = %path.display(),
            env = CONFIG_PATH_ENV,
            "Using profile store from FALCON_CONFIG environment variable"
        ),
        StorePathSource::Home => debug!(
            target: "falcon::config",
            path = %path.display(),
            env = CONFIG_PATH_ENV,
            "FALCON_CONFIG not set; using default profile store"
        ),
    }
}

/// Log where each key came from. Values are never logged, only their presence.
pub fn log_resolved(resolution: &Resolution) {
    let config = resolution.config();
    for key in ConfigKey::ALL {
        debug!(
            target: "falcon::config",
            key = key.as_str(),
            source = resolution.source(key).as_str(),
            present = !config.get(key).is_empty(),
            "Resolved configuration key"
        );
    }
    info!(
        target: "falcon::config",
        profile = %config.profile,
        cloud = %config.cloud,
        has_credentials = config.has_credentials(),
        "Configuration resolved"
    );
}
