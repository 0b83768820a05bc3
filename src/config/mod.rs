//! The effective configuration of one invocation and the sources it is resolved from.
use std::fmt;

pub mod resolver;
pub mod store;
pub mod telemetry;

pub use resolver::{
    env_var_name, profile_env_infix, profile_env_var_name, resolve, EnvSnapshot, FlagValue,
    FlagValues, Resolution, Source, Sources, ENV_PREFIX,
};
pub use store::{Profile, ProfileStore};

/// Profile used when nothing selects another one.
pub const DEFAULT_PROFILE: &str = "default";
/// Cloud sentinel letting the API client discover the region.
pub const DEFAULT_CLOUD: &str = "autodiscover";

/// Keys of the effective configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigKey {
    Cid,
    ClientId,
    ClientSecret,
    MemberCid,
    Cloud,
    Profile,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 6] = [
        ConfigKey::Cid,
        ConfigKey::ClientId,
        ConfigKey::ClientSecret,
        ConfigKey::MemberCid,
        ConfigKey::Cloud,
        ConfigKey::Profile,
    ];

    /// Keys stored per profile.
    pub const PROFILE_FIELDS: [ConfigKey; 5] = [
        ConfigKey::Cid,
        ConfigKey::ClientId,
        ConfigKey::ClientSecret,
        ConfigKey::MemberCid,
        ConfigKey::Cloud,
    ];

    /// Key name in the persisted store.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Cid => "cid",
            ConfigKey::ClientId => "client_id",
            ConfigKey::ClientSecret => "client_secret",
            ConfigKey::MemberCid => "member_cid",
            ConfigKey::Cloud => "cloud",
            ConfigKey::Profile => "profile",
        }
    }

    /// Long flag name on the command line.
    pub const fn flag_name(&self) -> &'static str {
        match self {
            ConfigKey::Cid => "cid",
            ConfigKey::ClientId => "client-id",
            ConfigKey::ClientSecret => "client-secret",
            ConfigKey::MemberCid => "member-cid",
            ConfigKey::Cloud => "cloud",
            ConfigKey::Profile => "profile",
        }
    }

    /// Value used when no source supplies the key.
    pub const fn default_value(&self) -> &'static str {
        match self {
            ConfigKey::Cloud => DEFAULT_CLOUD,
            ConfigKey::Profile => DEFAULT_PROFILE,
            _ => "",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effective configuration for one invocation.
///
/// Built once by [`resolve`] before any handler runs and handed out as
/// `&Config` afterwards. A handler needing different values clones it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// The Falcon Customer ID.
    pub cid: String,
    /// The Falcon API OAuth client ID.
    pub client_id: String,
    /// The Falcon API OAuth client secret.
    pub client_secret: String,
    /// The Falcon member CID for multi-tenant (MSSP) access.
    pub member_cid: String,
    /// The Falcon API cloud region.
    pub cloud: String,
    /// Active profile name.
    pub profile: String,
}

impl Config {
    pub fn get(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::Cid => &self.cid,
            ConfigKey::ClientId => &self.client_id,
            ConfigKey::ClientSecret => &self.client_secret,
            ConfigKey::MemberCid => &self.member_cid,
            ConfigKey::Cloud => &self.cloud,
            ConfigKey::Profile => &self.profile,
        }
    }

    pub(crate) fn set(&mut self, key: ConfigKey, value: String) {
        let slot = match key {
            ConfigKey::Cid => &mut self.cid,
            ConfigKey::ClientId => &mut self.client_id,
            ConfigKey::ClientSecret => &mut self.client_secret,
            ConfigKey::MemberCid => &mut self.member_cid,
            ConfigKey::Cloud => &mut self.cloud,
            ConfigKey::Profile => &mut self.profile,
        };
        *slot = value;
    }

    /// True only when client ID and client secret are both present.
    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    /// The persisted record for the active profile.
    pub fn to_profile(&self) -> Profile {
        Profile {
            cid: self.cid.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            member_cid: self.member_cid.clone(),
            cloud: self.cloud.clone(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("cid", &self.cid)
            .field("client_id", &self.client_id)
            .field("client_secret", &redacted(&self.client_secret))
            .field("member_cid", &self.member_cid)
            .field("cloud", &self.cloud)
            .field("profile", &self.profile)
            .finish()
    }
}

pub(crate) fn redacted(value: &str) -> &'static str {
    if value.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}
