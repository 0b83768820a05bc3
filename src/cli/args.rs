//! Global flag definitions and extraction of their values.
use std::path::PathBuf;

use clap::{parser::ValueSource, value_parser, Arg, ArgAction, ArgMatches};

use crate::config::{ConfigKey, FlagValue, FlagValues, DEFAULT_CLOUD, DEFAULT_PROFILE};

/// `--config <PATH>`: profile store location.
pub const CONFIG_ARG: &str = "config";
/// `--verbose`: debug logging on stderr.
pub const VERBOSE_ARG: &str = "verbose";
/// Root-only `--version`.
pub const VERSION_ARG: &str = "version";

/// Flags accepted by every command.
pub fn global_args() -> Vec<Arg> {
    vec![
        Arg::new(CONFIG_ARG)
            .long(CONFIG_ARG)
            .value_name("PATH")
            .value_parser(value_parser!(PathBuf))
            .global(true)
            .help("Profile store file (default is $HOME/.falcon/config.yaml)"),
        key_arg(ConfigKey::Cid, 'f', "The Falcon Customer ID (CID)"),
        key_arg(ConfigKey::ClientId, 'u', "The Falcon API OAuth client ID"),
        key_arg(
            ConfigKey::ClientSecret,
            's',
            "The Falcon API OAuth client secret",
        ),
        key_arg(ConfigKey::MemberCid, 'm', "The Falcon API member CID"),
        key_arg(ConfigKey::Cloud, 'r', "The Falcon API cloud region")
            .default_value(DEFAULT_CLOUD),
        key_arg(
            ConfigKey::Profile,
            'p',
            "Use a specific profile from your config file",
        )
        .default_value(DEFAULT_PROFILE),
        Arg::new(VERBOSE_ARG)
            .long(VERBOSE_ARG)
            .action(ArgAction::SetTrue)
            .global(true)
            .help("Print debug logs to stderr (RUST_LOG overrides)"),
    ]
}

/// Flags accepted only by the root command.
pub fn root_args() -> Vec<Arg> {
    let mut args = global_args();
    args.push(
        Arg::new(VERSION_ARG)
            .long(VERSION_ARG)
            .action(ArgAction::SetTrue)
            .help("Show version"),
    );
    args
}

fn key_arg(key: ConfigKey, short: char, help: &'static str) -> Arg {
    Arg::new(key.flag_name())
        .short(short)
        .long(key.flag_name())
        .global(true)
        .help(help)
}

/// Configuration flag values, marking which ones were typed on the command line.
pub fn flag_values(matches: &ArgMatches) -> FlagValues {
    let mut flags = FlagValues::new();
    for key in ConfigKey::ALL {
        let id = key.flag_name();
        let Some(value) = matches.try_get_one::<String>(id).ok().flatten() else {
            continue;
        };
        flags.insert(
            key,
            FlagValue {
                value: value.clone(),
                explicit: matches.value_source(id) == Some(ValueSource::CommandLine),
            },
        );
    }
    flags
}

pub fn config_override(matches: &ArgMatches) -> Option<PathBuf> {
    matches
        .try_get_one::<PathBuf>(CONFIG_ARG)
        .ok()
        .flatten()
        .cloned()
}

pub fn verbose(matches: &ArgMatches) -> bool {
    matches
        .try_get_one::<bool>(VERBOSE_ARG)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}

pub fn version_requested(matches: &ArgMatches) -> bool {
    matches
        .try_get_one::<bool>(VERSION_ARG)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}
