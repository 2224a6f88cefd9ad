//! Ordered root command lookup and line dispatch.

use std::collections::HashSet;
use std::path::Path;

use command_match_core::{CommandError, CommandTree, ParsedValues, Value};
use serde::Serialize;
use tracing::debug;

use crate::builtin::builtin_config;
use crate::config::CatalogConfig;
use crate::error::Result;

/// Outcome of matching one line against a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandMatch {
    /// Name of the root command that matched.
    pub command: String,
    /// Raw values extracted from the line.
    pub values: ParsedValues,
    /// The line with the command and its values stripped out.
    pub residual: String,
}

/// Ordered set of sealed root commands.
///
/// Built once from a [`CatalogConfig`] and then only read, so it can be
/// cloned into worker threads freely.
///
/// # Examples
///
/// ```
/// use command_match_catalog::CommandCatalog;
///
/// let catalog = CommandCatalog::builtin().unwrap();
/// assert_eq!(catalog.len(), 5);
///
/// let found = catalog.match_line("create task buy milk").unwrap().unwrap();
/// assert_eq!(found.values.get("create task"), Some("buy milk"));
/// ```
#[derive(Debug, Clone)]
pub struct CommandCatalog {
    commands: Vec<CommandTree>,
}

impl CommandCatalog {
    /// Builds every root command in `config`.
    ///
    /// # Errors
    ///
    /// Any build error from [`CommandSpec::build`](command_match_core::CommandSpec::build),
    /// or [`CommandError::DuplicateCommandName`] when two roots share a name.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut commands = Vec::with_capacity(config.commands.len());
        for spec in &config.commands {
            let tree = spec.build()?;
            if !seen.insert(tree.name().to_string()) {
                return Err(CommandError::DuplicateCommandName(tree.name().to_string()).into());
            }
            commands.push(tree);
        }
        debug!(commands = commands.len(), "Built command catalog");
        Ok(Self { commands })
    }

    /// Loads and builds a catalog file.
    ///
    /// # Errors
    ///
    /// See [`CatalogConfig::load`] and [`CommandCatalog::from_config`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_config(&CatalogConfig::load(path)?)
    }

    /// The built-in task command set.
    ///
    /// # Errors
    ///
    /// Only if the built-in configuration fails to build.
    pub fn builtin() -> Result<Self> {
        Self::from_config(&builtin_config())
    }

    pub fn get(&self, name: &str) -> Option<&CommandTree> {
        self.commands.iter().find(|c| c.name() == name)
    }

    /// Root command names in matching order.
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(CommandTree::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandTree> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Matches `text` against the roots in declaration order.
    ///
    /// Returns `Ok(None)` when no root validates.
    ///
    /// # Errors
    ///
    /// Propagates a parse failure of the matching root.
    pub fn match_line(&self, text: &str) -> Result<Option<CommandMatch>> {
        let Some(tree) = self.commands.iter().find(|c| c.validate(text)) else {
            debug!(input = text, "No command matched");
            return Ok(None);
        };
        let values = tree.parse(text)?;
        debug!(command = %tree.name(), values = values.len(), "Matched command");
        Ok(Some(CommandMatch {
            command: tree.name().to_string(),
            values,
            residual: tree.strip(text),
        }))
    }

    /// Reads `name` from a match as its declared kind.
    ///
    /// # Errors
    ///
    /// [`CommandError::UnknownCommand`] if the matched root is not in this
    /// catalog or has no node called `name`, plus any coercion error.
    pub fn typed_value(&self, found: &CommandMatch, name: &str) -> Result<Option<Value>> {
        let tree = self
            .get(&found.command)
            .ok_or_else(|| CommandError::UnknownCommand(found.command.clone()))?;
        Ok(tree.typed_value(&found.values, name)?)
    }

    /// Help text of every root, in order.
    pub fn help_text(&self) -> String {
        self.commands
            .iter()
            .map(CommandTree::help_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use command_match_core::CommandSpec;

    use super::*;
    use crate::CatalogError;

    #[test]
    fn test_builtin_names_in_order() {
        let catalog = CommandCatalog::builtin().unwrap();
        assert_eq!(
            catalog.names(),
            vec!["create task", "view task", "view tasks", "view my tasks", "delete task"]
        );
    }

    #[test]
    fn test_view_task_does_not_shadow_view_tasks() {
        let catalog = CommandCatalog::builtin().unwrap();
        let found = catalog.match_line("view tasks").unwrap().unwrap();
        assert_eq!(found.command, "view tasks");
        assert!(found.values.is_empty());

        let found = catalog.match_line("view my tasks please").unwrap().unwrap();
        assert_eq!(found.command, "view my tasks");
        assert_eq!(found.residual, " please");
    }

    #[test]
    fn test_typed_task_number() {
        let catalog = CommandCatalog::builtin().unwrap();
        let found = catalog.match_line("delete task 7").unwrap().unwrap();
        assert_eq!(
            catalog.typed_value(&found, "delete task").unwrap(),
            Some(Value::Integer(7))
        );
        assert_eq!(found.residual, " ");
    }

    #[test]
    fn test_task_number_must_be_numeric() {
        let catalog = CommandCatalog::builtin().unwrap();
        assert!(catalog.match_line("delete task seven").unwrap().is_none());
    }

    #[test]
    fn test_free_text_ends_on_word_boundary() {
        let catalog = CommandCatalog::builtin().unwrap();
        let found = catalog.match_line("create task buy milk!").unwrap().unwrap();
        assert_eq!(found.values.get("create task"), Some("buy milk"));
        assert_eq!(found.residual, " !");
        assert!(catalog.match_line("create task ???").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_roots_rejected() {
        let config = CatalogConfig::new(vec![
            CommandSpec::new("view tasks").no_args(),
            CommandSpec::new("view tasks").no_args(),
        ]);
        let err = CommandCatalog::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Command(CommandError::DuplicateCommandName(name)) if name == "view tasks"
        ));
    }

    #[test]
    fn test_help_text_joins_roots() {
        let config = CatalogConfig::new(vec![
            CommandSpec::new("a").with_help("first").no_args(),
            CommandSpec::new("b").with_help("second").no_args(),
        ]);
        let catalog = CommandCatalog::from_config(&config).unwrap();
        assert_eq!(catalog.help_text(), "a: first\nb: second");
    }
}
