use std::{io::Write, path::Path};

use clap::ArgMatches;

use super::registry::{CommandTree, NodeId};
use crate::{config::Config, lib::prompt::Prompter};

/// Everything a command handler may touch.
///
/// The configuration is borrowed immutably; a handler that needs different
/// values clones it.
pub struct CommandContext<'a> {
    pub config: &'a Config,
    /// Matches of the invoked command, with global flags propagated.
    pub matches: &'a ArgMatches,
    pub tree: &'a CommandTree,
    pub node: NodeId,
    pub store_path: &'a Path,
    pub prompter: &'a dyn Prompter,
    pub out: &'a mut dyn Write,
}

impl CommandContext<'_> {
    /// Write the help text of the invoked command.
    pub fn print_help(&mut self) -> anyhow::Result<()> {
        let help = self.tree.render_help(self.node);
        write!(self.out, "{help}")?;
        Ok(())
    }
}

/// Signature of a command's run function.
pub type Handler = fn(&mut CommandContext<'_>) -> anyhow::Result<()>;
