//! Parse, resolve, gate, run: the single path every invocation takes.
use std::{ffi::OsString, io::Write};

use anyhow::Context;
use clap::error::ErrorKind;
use tracing::error;

use super::{
    args::{config_override, flag_values, verbose},
    exit::RuntimeExit,
    help::normalize_help_request,
};
use crate::{
    commands::{gate, CommandContext, CommandTree},
    config::{self, resolve, EnvSnapshot, ProfileStore, Sources},
    lib::{
        errors::ResolveError,
        paths::{resolve_store_path, CONFIG_PATH_ENV},
        prompt::Prompter,
        telemetry::{emit_invocation, init_tracing, InvocationTelemetry},
    },
};

/// Runs one invocation against a frozen command tree.
#[derive(Debug)]
pub struct Dispatcher {
    tree: CommandTree,
    env: EnvSnapshot,
    tracing: bool,
}

impl Dispatcher {
    pub fn new(tree: CommandTree, env: EnvSnapshot) -> Self {
        Self {
            tree,
            env,
            tracing: false,
        }
    }

    /// Install the global tracing subscriber once arguments are parsed.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.tracing = enabled;
        self
    }

    /// Run the command named by `args` (including the binary name).
    ///
    /// Help and command output go to `out`; failures come back as a
    /// [`RuntimeExit`] carrying the exit code.
    pub fn dispatch<I, T>(
        &self,
        args: I,
        out: &mut dyn Write,
        prompter: &dyn Prompter,
    ) -> Result<(), RuntimeExit>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = normalize_help_request(args.into_iter().map(Into::into).collect());
        let matches = match self.tree.to_clap().try_get_matches_from(args) {
            Ok(matches) => matches,
            Err(err) => return render_parse_outcome(err, out),
        };
        let (node, node_matches) = self.tree.invoked(&matches);

        if self.tracing {
            init_tracing(verbose(node_matches)).map_err(RuntimeExit::from_error)?;
        }

        let (store_path, path_source) = resolve_store_path(
            config_override(node_matches).as_deref(),
            self.env.get(CONFIG_PATH_ENV),
        )
        .context("failed to locate the profile store")
        .map_err(RuntimeExit::from_error)?;
        config::telemetry::log_store_source(&store_path, path_source);

        let store = ProfileStore::load_or_default(&store_path).map_err(|source| {
            RuntimeExit::config_parse(ResolveError::ConfigParse {
                path: store_path.clone(),
                source,
            })
        })?;
        let flags = flag_values(node_matches);
        let resolution = resolve(&Sources {
            flags: &flags,
            env: &self.env,
            store: &store,
        });
        config::telemetry::log_resolved(&resolution);
        let config = resolution.into_config();

        let command = self.tree.command_path(node);
        let handler = self.tree.handler(node);
        emit_invocation(&InvocationTelemetry {
            command: &command,
            profile: &config.profile,
            config_path: &store_path.to_string_lossy(),
            auth_required: self.tree.is_auth_required(node),
            has_handler: handler.is_some(),
        });

        // A group without a runnable subcommand only shows its help.
        let Some(handler) = handler else {
            return write!(out, "{}", self.tree.render_help(node))
                .context("failed to write help")
                .map_err(RuntimeExit::from_error);
        };

        gate(&self.tree, node, &config).map_err(RuntimeExit::auth_required)?;

        let mut ctx = CommandContext {
            config: &config,
            matches: node_matches,
            tree: &self.tree,
            node,
            store_path: &store_path,
            prompter,
            out,
        };
        handler(&mut ctx).map_err(|err| {
            error!(target: "falcon::dispatch", command = %command, error = %err, "Command failed");
            RuntimeExit::from_error(err)
        })
    }
}

/// Help and version requests are successful output; anything else is a usage error.
fn render_parse_outcome(err: clap::Error, out: &mut dyn Write) -> Result<(), RuntimeExit> {
    let rendered = err.render().to_string();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => write!(out, "{rendered}")
            .context("failed to write help")
            .map_err(RuntimeExit::from_error),
        _ => Err(RuntimeExit::usage(rendered)),
    }
}
