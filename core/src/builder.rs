//! Declarative command configuration.
//!
//! A [`CommandSpec`] is plain data: it can be written in code with the
//! chained `with_*` setters or deserialized from YAML/JSON. [`CommandSpec::build`]
//! turns it into a sealed [`CommandTree`] or fails without producing anything.
//!
//! # Example YAML
//!
//! ```yaml
//! name: ping
//! help_text: send an ICMP request
//! no_args: true
//! children:
//!   - name: -c
//!     help_text: how many to send
//!     value_type: int
//!     pattern: '\d+'
//!     optional: true
//!   - name: -A
//!     help_text: audible ping
//!     no_args: true
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::command::{Command, DefaultCommand, FlagCommand, ValueCommand};
use crate::error::{CommandError, Result};
use crate::root::{RootCommand, TrailingPolicy};
use crate::tree::CommandTree;
use crate::value::ValueKind;

/// Pattern used when a spec does not declare one.
pub const DEFAULT_VALUE_PATTERN: &str = ".*";

/// Configuration for one command and its nested children.
///
/// Shape is chosen in priority order:
///
/// 1. `no_args` set → flag (no value), whatever the other fields say.
/// 2. non-empty `default_argument` → default-valued command.
/// 3. otherwise a value command, mandatory unless `optional` is set.
///
/// Children are built and attached whatever shape the parent resolves to.
/// A child spec with children of its own becomes a nested root that keeps
/// the child's `optional` setting: when optional and its name is absent, the
/// whole subtree is skipped.
///
/// # Examples
///
/// ```
/// use command_match_core::{CommandSpec, ValueKind};
///
/// let tree = CommandSpec::new("ping")
///     .with_help("send an ICMP request")
///     .no_args()
///     .with_child(
///         CommandSpec::new("-c")
///             .with_help("how many to send")
///             .with_value_type(ValueKind::Integer)
///             .with_pattern(r"\d+")
///             .optional(),
///     )
///     .build()
///     .unwrap();
///
/// assert!(tree.validate("ping -c 3"));
/// assert_eq!(tree.parse("ping -c 3").unwrap().get("-c"), Some("3"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandSpec {
    /// Token that invokes the command; may contain spaces (`view task`).
    pub name: String,
    /// One-line description used in help text.
    pub help_text: String,
    /// Declared kind of the value.
    pub value_type: ValueKind,
    /// Regular expression the value must match.
    pub pattern: String,
    /// Whether the command may be absent.
    pub optional: bool,
    /// Build a flag with no value.
    pub no_args: bool,
    /// Literal used when the value is omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_argument: Option<String>,
    /// Handling of unrecognized trailing text (roots only).
    pub trailing: TrailingPolicy,
    /// Nested commands, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CommandSpec>,
}

impl Default for CommandSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            help_text: String::new(),
            value_type: ValueKind::default(),
            pattern: DEFAULT_VALUE_PATTERN.to_string(),
            optional: false,
            no_args: false,
            default_argument: None,
            trailing: TrailingPolicy::default(),
            children: Vec::new(),
        }
    }
}

impl CommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help_text = help.into();
        self
    }

    pub fn with_value_type(mut self, kind: ValueKind) -> Self {
        self.value_type = kind;
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Marks the command as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Marks the command as a flag with no value.
    pub fn no_args(mut self) -> Self {
        self.no_args = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_argument = Some(default.into());
        self
    }

    pub fn with_trailing(mut self, trailing: TrailingPolicy) -> Self {
        self.trailing = trailing;
        self
    }

    pub fn with_child(mut self, child: CommandSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Builds and seals the tree described by this spec.
    ///
    /// # Errors
    ///
    /// - [`CommandError::EmptyCommandName`] for a blank name anywhere.
    /// - [`CommandError::InvalidPattern`] for a pattern that does not compile.
    /// - [`CommandError::DuplicateCommandName`] for sibling name collisions.
    pub fn build(&self) -> Result<CommandTree> {
        let root = self.build_root()?;
        debug!(
            command = %self.name,
            children = root.children().len(),
            "Built command tree"
        );
        Ok(root.seal())
    }

    fn build_root(&self) -> Result<RootCommand> {
        let mut root = RootCommand::new(self.build_head()?).with_trailing(self.trailing);
        for child in &self.children {
            root.attach_child(child.build_node()?)?;
        }
        Ok(root)
    }

    fn build_node(&self) -> Result<Command> {
        if self.children.is_empty() {
            self.build_head()
        } else {
            self.build_root()
                .map(|root| Command::Root(root.with_optional(self.optional)))
        }
    }

    fn build_head(&self) -> Result<Command> {
        if self.name.trim().is_empty() {
            return Err(CommandError::EmptyCommandName);
        }
        if self.no_args {
            return Ok(FlagCommand::new(&self.name, &self.help_text).into());
        }

        let kind = self.value_type.clone();
        match self.default_argument.as_deref().filter(|d| !d.is_empty()) {
            Some(default) => DefaultCommand::new(
                &self.name,
                &self.help_text,
                kind,
                &self.pattern,
                default,
                self.optional,
            )
            .map(Command::from),
            None => ValueCommand::new(
                &self.name,
                &self.help_text,
                kind,
                &self.pattern,
                self.optional,
            )
            .map(Command::from),
        }
    }
}
