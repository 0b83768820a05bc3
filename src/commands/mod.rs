//! Command tree, authorization gate and the command handlers.
pub mod auth;
pub mod completion;
pub mod configure;
pub mod context;
pub mod gate;
pub mod init;
pub mod registry;
pub mod root;
pub mod sensor;
pub mod version;

pub use context::{CommandContext, Handler};
pub use gate::{auth_status, check_auth, gate, is_auth_required, AuthStatus};
pub use registry::{CommandRegistry, CommandSpec, CommandTree, NodeId, AUTH_EXEMPT_COMMANDS};

use crate::lib::errors::RegistryError;

/// Assemble the full `falcon` command tree.
pub fn build_registry() -> Result<CommandTree, RegistryError> {
    let mut registry = CommandRegistry::new(root::spec());
    let root = registry.root();

    let version = registry.register(root, version::spec())?;
    registry.mark_auth_optional(version);
    let init = registry.register(root, init::spec())?;
    registry.mark_auth_optional(init);
    auth::register(&mut registry, root)?;
    sensor::register(&mut registry, root)?;
    registry.register(root, completion::spec())?;

    Ok(registry.build())
}
