//! Command tree with inheritable "auth optional" annotations.
//!
//! Commands are registered into a [`CommandRegistry`] and frozen with
//! [`CommandRegistry::build`]. The frozen [`CommandTree`] answers whether a
//! node needs credentials from a cache computed once at build time, and
//! produces the `clap::Command` used for parsing and help.
use std::fmt;

use clap::{Arg, ArgMatches, Command};

use super::context::Handler;
use crate::lib::errors::RegistryError;

/// Commands that never require credentials, wherever they are registered.
pub const AUTH_EXEMPT_COMMANDS: [&str; 4] = ["help", "completion", "__complete", "__completeNoDesc"];

/// Index of a node in the command tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Declarative description of one command.
#[derive(Clone)]
pub struct CommandSpec {
    name: &'static str,
    about: &'static str,
    long_about: Option<&'static str>,
    aliases: Vec<&'static str>,
    args: Vec<Arg>,
    handler: Option<Handler>,
    examples: Option<&'static str>,
}

impl CommandSpec {
    pub fn new(name: &'static str, about: &'static str) -> Self {
        Self {
            name,
            about,
            long_about: None,
            aliases: Vec::new(),
            args: Vec::new(),
            handler: None,
            examples: None,
        }
    }

    pub fn long_about(mut self, text: &'static str) -> Self {
        self.long_about = Some(text);
        self
    }

    pub fn alias(mut self, alias: &'static str) -> Self {
        self.aliases.push(alias);
        self
    }

    pub fn arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = Arg>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn handler(mut self, handler: Handler) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn examples(mut self, examples: &'static str) -> Self {
        self.examples = Some(examples);
        self
    }

    fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("args", &self.args.len())
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

#[derive(Debug, Clone)]
struct Node {
    spec: CommandSpec,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    auth_optional: bool,
}

/// Mutable builder for the command tree.
#[derive(Debug)]
pub struct CommandRegistry {
    nodes: Vec<Node>,
}

impl CommandRegistry {
    pub fn new(root: CommandSpec) -> Self {
        Self {
            nodes: vec![Node {
                spec: root,
                parent: None,
                children: Vec::new(),
                auth_optional: false,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Attach `spec` under `parent`. Names and aliases must be unique among siblings.
    pub fn register(&mut self, parent: NodeId, spec: CommandSpec) -> Result<NodeId, RegistryError> {
        let clash = std::iter::once(spec.name)
            .chain(spec.aliases.iter().copied())
            .find(|name| {
                self.nodes[parent.0]
                    .children
                    .iter()
                    .any(|sibling| self.nodes[sibling.0].spec.answers_to(name))
            });
        if let Some(name) = clash {
            return Err(RegistryError::DuplicateCommand {
                parent: self.nodes[parent.0].spec.name.to_string(),
                name: name.to_string(),
            });
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            spec,
            parent: Some(parent),
            children: Vec::new(),
            auth_optional: false,
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Let `node` and all of its descendants run without credentials.
    pub fn mark_auth_optional(&mut self, node: NodeId) {
        self.nodes[node.0].auth_optional = true;
    }

    /// Freeze the tree and compute which nodes require credentials.
    pub fn build(self) -> CommandTree {
        let mut inherited_optional = vec![false; self.nodes.len()];
        let mut auth_required = vec![false; self.nodes.len()];

        // Parents are always registered before their children.
        for (index, node) in self.nodes.iter().enumerate() {
            let Some(parent) = node.parent else {
                continue;
            };
            inherited_optional[index] = node.auth_optional || inherited_optional[parent.0];
            auth_required[index] =
                !inherited_optional[index] && !AUTH_EXEMPT_COMMANDS.contains(&node.spec.name);
        }

        CommandTree {
            nodes: self.nodes,
            auth_required,
        }
    }
}

/// Frozen command tree.
#[derive(Debug, Clone)]
pub struct CommandTree {
    nodes: Vec<Node>,
    auth_required: Vec<bool>,
}

impl CommandTree {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn name(&self, node: NodeId) -> &'static str {
        self.nodes[node.0].spec.name
    }

    pub fn handler(&self, node: NodeId) -> Option<Handler> {
        self.nodes[node.0].spec.handler
    }

    pub fn child_named(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.nodes[node.0]
            .children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].spec.answers_to(name))
    }

    /// Resolved annotation: whether the gate must check credentials for `node`.
    pub fn is_auth_required(&self, node: NodeId) -> bool {
        self.auth_required[node.0]
    }

    /// Names from the root down to `node`.
    pub fn names(&self, node: NodeId) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            names.push(self.nodes[id.0].spec.name);
            current = self.nodes[id.0].parent;
        }
        names.reverse();
        names
    }

    /// Full command path, for example `falcon sensor download`.
    pub fn command_path(&self, node: NodeId) -> String {
        self.names(node).join(" ")
    }

    /// Walk the subcommand chain of `matches` to the invoked node.
    pub fn invoked<'m>(&self, matches: &'m ArgMatches) -> (NodeId, &'m ArgMatches) {
        let mut node = self.root();
        let mut current = matches;
        while let Some((name, sub_matches)) = current.subcommand() {
            match self.child_named(node, name) {
                Some(child) => {
                    node = child;
                    current = sub_matches;
                }
                None => break,
            }
        }
        (node, current)
    }

    /// The `clap` command for the whole tree.
    pub fn to_clap(&self) -> Command {
        self.command_for(self.root())
            .disable_help_subcommand(true)
            .disable_version_flag(true)
    }

    fn command_for(&self, node: NodeId) -> Command {
        let spec = &self.nodes[node.0].spec;
        let mut command = Command::new(spec.name)
            .about(spec.about)
            .visible_aliases(spec.aliases.iter().copied())
            .args(spec.args.iter().cloned());
        if let Some(long_about) = spec.long_about {
            command = command.long_about(long_about);
        }
        if let Some(examples) = spec.examples {
            command = command.after_help(format!("Examples:\n{examples}"));
        }
        command.subcommands(
            self.nodes[node.0]
                .children
                .iter()
                .map(|child| self.command_for(*child)),
        )
    }

    /// Rendered help of `node`, including propagated global flags.
    pub fn render_help(&self, node: NodeId) -> String {
        let mut command = self.to_clap();
        command.build();
        let mut current = &mut command;
        for name in self.names(node).into_iter().skip(1) {
            let Some(next) = current.find_subcommand_mut(name) else {
                return String::new();
            };
            current = next;
        }
        current.render_help().to_string()
    }
}
