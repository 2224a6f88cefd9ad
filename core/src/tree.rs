//! Sealed, shareable command trees.

use std::sync::Arc;

use crate::command::Command;
use crate::error::{CommandError, Result};
use crate::parsed::ParsedValues;
use crate::root::RootCommand;
use crate::value::Value;

/// A finished command tree.
///
/// Cloning is cheap and every method takes `&self`, so a tree built once at
/// startup can be handed to any number of threads. There is no way to attach
/// children to a sealed tree.
///
/// # Examples
///
/// ```
/// use command_match_core::{CommandSpec, Value, ValueKind};
///
/// let tree = CommandSpec::new("view task")
///     .with_help("View a task: `view task <task number>`")
///     .with_value_type(ValueKind::Integer)
///     .with_pattern(r"\d+")
///     .build()
///     .unwrap();
///
/// let values = tree.parse("please view task 42").unwrap();
/// assert_eq!(tree.typed_value(&values, "view task").unwrap(), Some(Value::Integer(42)));
/// assert_eq!(tree.strip("please view task 42"), "please  ");
/// ```
#[derive(Debug, Clone)]
pub struct CommandTree {
    root: Arc<RootCommand>,
}

impl CommandTree {
    pub fn name(&self) -> &str {
        self.root.name()
    }

    pub fn root(&self) -> &RootCommand {
        &self.root
    }

    pub fn validate(&self, input: &str) -> bool {
        self.root.validate(input)
    }

    /// Parses `input` into a fresh accumulator.
    ///
    /// # Errors
    ///
    /// [`CommandError::InvalidInput`] if `validate(input)` does not hold.
    pub fn parse(&self, input: &str) -> Result<ParsedValues> {
        self.root.parse(input)
    }

    pub fn strip(&self, input: &str) -> String {
        self.root.strip(input)
    }

    pub fn help_text(&self) -> String {
        self.root.help_text()
    }

    /// Finds the node called `name` anywhere in the tree.
    pub fn find(&self, name: &str) -> Option<&Command> {
        if self.root.name() == name {
            return Some(self.root.head());
        }
        self.root
            .children()
            .iter()
            .find_map(|child| child.find(name))
    }

    /// Reads the value recorded for `name` as its declared kind.
    ///
    /// # Errors
    ///
    /// [`CommandError::UnknownCommand`] if `name` is not in the tree, plus
    /// the errors of [`Command::typed_value`].
    pub fn typed_value(&self, values: &ParsedValues, name: &str) -> Result<Option<Value>> {
        self.find(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?
            .typed_value(values)
    }
}

impl From<RootCommand> for CommandTree {
    fn from(root: RootCommand) -> Self {
        Self {
            root: Arc::new(root),
        }
    }
}
