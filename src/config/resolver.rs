//! Resolve the effective [`Config`] from flags, environment and the profile store.
//!
//! Every key walks the same fixed chain, highest priority first, and takes the
//! first source holding a non-empty value:
//!
//! 1. a flag passed on this invocation,
//! 2. `FALCON_<PROFILE>_<KEY>`,
//! 3. `FALCON_<KEY>`,
//! 4. the active profile in the store,
//! 5. an unscoped top-level value in the store,
//! 6. the compiled-in default.
//!
//! The profile name itself is resolved first, from the flag, `FALCON_PROFILE`,
//! the store's top-level `profile` value, then `default`.
use std::{collections::BTreeMap, ffi::OsString};

use super::{store::ProfileStore, Config, ConfigKey};

/// Namespace token of every environment variable the resolver reads.
pub const ENV_PREFIX: &str = "FALCON";

/// Which tier of the chain supplied a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Flag,
    ProfileEnv,
    Env,
    ProfileStore,
    UnscopedStore,
    Default,
}

impl Source {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Source::Flag => "flag",
            Source::ProfileEnv => "profile_env",
            Source::Env => "env",
            Source::ProfileStore => "profile_store",
            Source::UnscopedStore => "unscoped_store",
            Source::Default => "default",
        }
    }
}

/// A parsed flag value and whether the user typed it on this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagValue {
    pub value: String,
    pub explicit: bool,
}

/// Flag values for the configuration keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagValues {
    values: BTreeMap<ConfigKey, FlagValue>,
}

impl FlagValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ConfigKey, value: FlagValue) {
        self.values.insert(key, value);
    }

    /// Record a value the user passed explicitly.
    pub fn with_explicit(mut self, key: ConfigKey, value: impl Into<String>) -> Self {
        self.insert(
            key,
            FlagValue {
                value: value.into(),
                explicit: true,
            },
        );
        self
    }

    /// Record a value that only came from the flag's default.
    pub fn with_default(mut self, key: ConfigKey, value: impl Into<String>) -> Self {
        self.insert(
            key,
            FlagValue {
                value: value.into(),
                explicit: false,
            },
        );
        self
    }

    /// The value for `key` if the user passed it on this invocation.
    pub fn explicit(&self, key: ConfigKey) -> Option<&str> {
        self.values
            .get(&key)
            .filter(|flag| flag.explicit)
            .map(|flag| flag.value.as_str())
    }
}

/// Point-in-time copy of the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment; non-UTF-8 entries are skipped.
    pub fn capture() -> Self {
        Self::from_os_pairs(std::env::vars_os())
    }

    fn from_os_pairs(pairs: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        let vars = pairs
            .into_iter()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// True when the variable is set to `true` in any letter case.
    pub fn is_true(&self, name: &str) -> bool {
        self.get(name)
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }
}

/// `FALCON_<KEY>`, for example `FALCON_CLIENT_ID`.
pub fn env_var_name(key: ConfigKey) -> String {
    format!("{ENV_PREFIX}_{}", key.as_str().to_ascii_uppercase())
}

/// Profile part of a profile-qualified variable: upper-cased, and every
/// character other than an ASCII letter or digit becomes `_`.
pub fn profile_env_infix(profile: &str) -> String {
    profile
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// `FALCON_<PROFILE>__<KEY>`. Key names never contain `__`, so the key is
/// whatever follows the last double underscore.
pub fn profile_env_var_name(profile: &str, key: ConfigKey) -> String {
    format!(
        "{ENV_PREFIX}_{}__{}",
        profile_env_infix(profile),
        key.as_str().to_ascii_uppercase()
    )
}

/// Inputs of one resolution.
#[derive(Debug, Clone, Copy)]
pub struct Sources<'a> {
    pub flags: &'a FlagValues,
    pub env: &'a EnvSnapshot,
    pub store: &'a ProfileStore,
}

/// Resolved configuration plus the tier each key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    config: Config,
    sources: BTreeMap<ConfigKey, Source>,
}

impl Resolution {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    pub fn source(&self, key: ConfigKey) -> Source {
        self.sources.get(&key).copied().unwrap_or(Source::Default)
    }
}

/// Resolve the effective configuration. Pure: the same inputs always give the
/// same result.
pub fn resolve(sources: &Sources<'_>) -> Resolution {
    let mut config = Config::default();
    let mut trace = BTreeMap::new();

    let (profile, profile_source) = resolve_profile(sources);
    for key in ConfigKey::PROFILE_FIELDS {
        let (value, source) = resolve_key(sources, &profile, key);
        config.set(key, value);
        trace.insert(key, source);
    }
    config.set(ConfigKey::Profile, profile);
    trace.insert(ConfigKey::Profile, profile_source);

    Resolution {
        config,
        sources: trace,
    }
}

fn resolve_profile(sources: &Sources<'_>) -> (String, Source) {
    let key = ConfigKey::Profile;
    let env_name = env_var_name(key);
    let candidates = [
        (Source::Flag, sources.flags.explicit(key)),
        (Source::Env, sources.env.get(&env_name)),
        (Source::UnscopedStore, sources.store.unscoped(key.as_str())),
    ];
    first_non_empty(candidates)
        .unwrap_or_else(|| (key.default_value().to_string(), Source::Default))
}

fn resolve_key(sources: &Sources<'_>, profile: &str, key: ConfigKey) -> (String, Source) {
    let profile_env_name = profile_env_var_name(profile, key);
    let env_name = env_var_name(key);
    let candidates = [
        (Source::Flag, sources.flags.explicit(key)),
        (Source::ProfileEnv, sources.env.get(&profile_env_name)),
        (Source::Env, sources.env.get(&env_name)),
        (
            Source::ProfileStore,
            sources.store.profile(profile).map(|stored| stored.get(key)),
        ),
        (Source::UnscopedStore, sources.store.unscoped(key.as_str())),
    ];
    first_non_empty(candidates)
        .unwrap_or_else(|| (key.default_value().to_string(), Source::Default))
}

fn first_non_empty<'a>(
    candidates: impl IntoIterator<Item = (Source, Option<&'a str>)>,
) -> Option<(String, Source)> {
    candidates.into_iter().find_map(|(source, value)| {
        value
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| (value.to_string(), source))
    })
}
