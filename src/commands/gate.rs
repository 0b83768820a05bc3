//! Authorization gate run once per invocation, before the handler.
use tracing::{debug, warn};

use super::registry::{CommandTree, NodeId};
use crate::{config::Config, lib::errors::GateError};

/// How complete the credentials in a [`Config`] are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Configured,
    /// Exactly one of client ID and client secret is set.
    Partial,
    Missing,
}

pub fn auth_status(config: &Config) -> AuthStatus {
    match (config.client_id.is_empty(), config.client_secret.is_empty()) {
        (false, false) => AuthStatus::Configured,
        (true, true) => AuthStatus::Missing,
        _ => AuthStatus::Partial,
    }
}

/// True when both client ID and client secret are present.
pub fn check_auth(config: &Config) -> bool {
    auth_status(config) == AuthStatus::Configured
}

pub fn is_auth_required(tree: &CommandTree, node: NodeId) -> bool {
    tree.is_auth_required(node)
}

/// Refuse to run `node` without credentials when it requires them.
pub fn gate(tree: &CommandTree, node: NodeId, config: &Config) -> Result<(), GateError> {
    let command = tree.command_path(node);
    if !is_auth_required(tree, node) {
        debug!(target: "falcon::gate", command = %command, "Command does not require credentials");
        return Ok(());
    }

    match auth_status(config) {
        AuthStatus::Configured => {
            debug!(target: "falcon::gate", command = %command, profile = %config.profile, "Credentials present");
            Ok(())
        }
        status => {
            if status == AuthStatus::Partial {
                warn!(
                    target: "falcon::gate",
                    command = %command,
                    profile = %config.profile,
                    "Only one of client ID and client secret is configured"
                );
            }
            Err(GateError::AuthRequired { command })
        }
    }
}
