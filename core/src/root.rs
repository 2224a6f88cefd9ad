//! Root commands: a head node composed with an ordered child list.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::command::{Command, FlagCommand};
use crate::error::{CommandError, Result};
use crate::matching;
use crate::parsed::ParsedValues;
use crate::tree::CommandTree;

/// What a root does with text left over after every known command is
/// stripped.
///
/// # Examples
///
/// ```
/// use command_match_core::{RootCommand, TrailingPolicy};
///
/// let lenient = RootCommand::named("ping", "send an ICMP request");
/// assert!(lenient.validate("ping asdfa"));
///
/// let strict = RootCommand::named("ping", "send an ICMP request")
///     .with_trailing(TrailingPolicy::Reject);
/// assert!(strict.validate("ping"));
/// assert!(!strict.validate("ping asdfa"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingPolicy {
    /// Unrecognized text is allowed (the default).
    #[default]
    Ignore,
    /// The residual of a full strip must be blank.
    Reject,
}

/// A command that owns an ordered set of child commands.
///
/// The head decides the root's own shape: a bare name, a value command or a
/// default-valued command. Unlike a child flag, a root's name must be present
/// in the input unless the root is marked optional, in which case an absent
/// root is satisfied and contributes nothing.
///
/// Children can only be attached while the root is owned; once sealed into a
/// [`CommandTree`] the structure is read-only.
///
/// # Examples
///
/// ```
/// use command_match_core::{RootCommand, ValueCommand, ValueKind};
///
/// let mut ping = RootCommand::named("ping", "send an ICMP request");
/// ping.attach_child(
///     ValueCommand::optional("-c", "how many to send", ValueKind::Integer, r"\d+")
///         .unwrap()
///         .into(),
/// )
/// .unwrap();
///
/// assert_eq!(ping.help_text(), "ping: send an ICMP request\n-c: how many to send");
/// assert_eq!(ping.parse("ping -c 3").unwrap().get("-c"), Some("3"));
/// assert!(!ping.validate("pong -c 3"));
/// ```
#[derive(Debug, Clone)]
pub struct RootCommand {
    head: Box<Command>,
    children: Vec<Command>,
    trailing: TrailingPolicy,
    optional: bool,
}

impl RootCommand {
    /// Creates a root whose own behavior is `head`.
    pub fn new(head: impl Into<Command>) -> Self {
        Self {
            head: Box::new(head.into()),
            children: Vec::new(),
            trailing: TrailingPolicy::default(),
            optional: false,
        }
    }

    /// Creates a root that carries no value of its own.
    pub fn named(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self::new(FlagCommand::new(name, help))
    }

    /// Sets the trailing-content policy.
    pub fn with_trailing(mut self, trailing: TrailingPolicy) -> Self {
        self.trailing = trailing;
        self
    }

    /// Lets the whole subtree be absent when the root's name does not occur.
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Attaches `child` and returns the root, for chained construction.
    ///
    /// # Errors
    ///
    /// [`CommandError::DuplicateCommandName`] if a sibling shares the name.
    pub fn with_child(mut self, child: impl Into<Command>) -> Result<Self> {
        self.attach_child(child.into())?;
        Ok(self)
    }

    /// Appends `child` to the end of the child list.
    ///
    /// # Errors
    ///
    /// [`CommandError::DuplicateCommandName`] if a sibling shares the name.
    pub fn attach_child(&mut self, child: Command) -> Result<()> {
        if self.children.iter().any(|c| c.name() == child.name()) {
            return Err(CommandError::DuplicateCommandName(child.name().to_string()));
        }
        self.children.push(child);
        Ok(())
    }

    /// Freezes this root into a shareable, read-only tree.
    pub fn seal(self) -> CommandTree {
        CommandTree::from(self)
    }

    pub fn name(&self) -> &str {
        self.head.name()
    }

    pub fn help(&self) -> &str {
        self.head.help()
    }

    pub fn head(&self) -> &Command {
        &self.head
    }

    pub fn children(&self) -> &[Command] {
        &self.children
    }

    pub fn trailing(&self) -> TrailingPolicy {
        self.trailing
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The name is present, the head and every child validate, and the
    /// trailing policy holds. An optional root whose name is absent is
    /// always valid.
    pub fn validate(&self, input: &str) -> bool {
        if !matching::contains_token(input, self.name()) {
            return self.optional;
        }
        let siblings = self.child_names();
        self.head.validate_among(input, &siblings)
            && self
                .children
                .iter()
                .all(|child| child.validate_among(input, &siblings))
            && self.trailing_allowed(input)
    }

    /// Parses `input` into a fresh accumulator.
    ///
    /// # Errors
    ///
    /// [`CommandError::InvalidInput`] if the tree does not validate; no
    /// partial values are returned.
    pub fn parse(&self, input: &str) -> Result<ParsedValues> {
        self.parse_into(input, ParsedValues::new())
    }

    /// Parses `input`, adding the head's value and then each child's value
    /// in declaration order. An absent optional root returns `values`
    /// unchanged.
    ///
    /// # Errors
    ///
    /// [`CommandError::InvalidInput`] if the tree does not validate.
    pub fn parse_into(&self, input: &str, values: ParsedValues) -> Result<ParsedValues> {
        if !self.validate(input) {
            return Err(CommandError::invalid_input(self.name(), input));
        }
        if !matching::contains_token(input, self.name()) {
            return Ok(values);
        }
        let siblings = self.child_names();
        let values = self.head.parse_among(input, &siblings, values)?;
        let values = self
            .children
            .iter()
            .try_fold(values, |acc, child| child.parse_among(input, &siblings, acc))?;
        debug!(command = %self.name(), values = values.len(), "Parsed command");
        Ok(values)
    }

    /// Strips the head, then each child in declaration order.
    pub fn strip(&self, input: &str) -> String {
        let siblings = self.child_names();
        self.children.iter().fold(
            self.head.strip_among(input, &siblings),
            |text, child| child.strip_among(&text, &siblings),
        )
    }

    /// The root's `"name: help"` line followed by one entry per child.
    pub fn help_text(&self) -> String {
        std::iter::once(format!("{}: {}", self.name(), self.help()))
            .chain(self.children.iter().map(Command::help_text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(Command::name).collect()
    }

    fn trailing_allowed(&self, input: &str) -> bool {
        match self.trailing {
            TrailingPolicy::Ignore => true,
            TrailingPolicy::Reject => self.strip(input).trim().is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{DefaultCommand, ValueCommand};
    use crate::value::ValueKind;

    fn ping() -> RootCommand {
        RootCommand::named("ping", "send an ICMP request")
    }

    fn count(name: &str, help: &str, kind: ValueKind) -> Command {
        ValueCommand::mandatory(name, help, kind, r"\d").unwrap().into()
    }

    #[test]
    fn test_help_text_without_children() {
        assert_eq!(ping().help_text(), "ping: send an ICMP request");
    }

    #[test]
    fn test_help_text_with_one_child() {
        let root = ping()
            .with_child(count("-c", "how many to send", ValueKind::Integer))
            .unwrap();
        assert_eq!(root.help_text(), "ping: send an ICMP request\n-c: how many to send");
    }

    #[test]
    fn test_help_text_keeps_declaration_order() {
        let mut root = ping();
        root.attach_child(count("-c", "how many to send", ValueKind::Integer))
            .unwrap();
        root.attach_child(count("-d", "d flag help text", ValueKind::Boolean))
            .unwrap();
        root.attach_child(count("-e", "e flag help text", ValueKind::Boolean))
            .unwrap();
        assert_eq!(
            root.help_text(),
            "ping: send an ICMP request\n\
             -c: how many to send\n\
             -d: d flag help text\n\
             -e: e flag help text"
        );
    }

    #[test]
    fn test_duplicate_child_is_rejected() {
        let mut root = ping();
        root.attach_child(count("-c", "how many to send", ValueKind::Integer))
            .unwrap();
        let err = root
            .attach_child(count("-c", "again", ValueKind::Integer))
            .unwrap_err();
        assert!(matches!(err, CommandError::DuplicateCommandName(name) if name == "-c"));
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_validate_requires_root_name() {
        assert!(!ping().validate("asdfasdf"));
        assert!(!ping().validate("pinging"));
        assert!(ping().validate("ping"));
    }

    #[test]
    fn test_trailing_policy() {
        assert!(ping().validate("ping asdfa"));
        let strict = ping()
            .with_trailing(TrailingPolicy::Reject)
            .with_child(FlagCommand::new("-f", "force"))
            .unwrap();
        assert!(strict.validate("ping -f"));
        assert!(strict.validate("  ping  "));
        assert!(!strict.validate("ping asdfa"));
    }

    #[test]
    fn test_parse_invalid_input() {
        let root = ping();
        assert!(!root.validate("banana apple"));
        assert!(matches!(
            root.parse("banana apple"),
            Err(CommandError::InvalidInput { command, .. }) if command == "ping"
        ));
    }

    #[test]
    fn test_parse_without_children_is_empty() {
        assert!(ping().parse("ping").unwrap().is_empty());
    }

    #[test]
    fn test_parse_flag_children_is_empty() {
        let root = ping()
            .with_child(FlagCommand::new("asdf", "doesnt matter whats here"))
            .unwrap()
            .with_child(FlagCommand::new("vzx", "doesnt matter whats here"))
            .unwrap();
        assert!(root.parse("ping asdf vzx").unwrap().is_empty());
    }

    #[test]
    fn test_parse_fails_whole_tree_when_child_fails() {
        let root = ping()
            .with_child(ValueCommand::optional("-i", "interval", ValueKind::Double, r"[\d.]+").unwrap())
            .unwrap()
            .with_child(count("-c", "how many to send", ValueKind::Integer))
            .unwrap();
        assert!(root.parse("ping -i 0.5").is_err());
        let values = root.parse("ping -i 0.5 -c 3").unwrap();
        assert_eq!(values.get("-i"), Some("0.5"));
        assert_eq!(values.get("-c"), Some("3"));
    }

    #[test]
    fn test_valued_root_inserts_own_value_first() {
        let head = ValueCommand::mandatory("view task", "View a task", ValueKind::Integer, r"\d+").unwrap();
        let root = RootCommand::new(head)
            .with_child(DefaultCommand::new("-p", "priority", ValueKind::Integer, r"\d", "1", true).unwrap())
            .unwrap();
        let values = root.parse("view task 12 -p").unwrap();
        assert_eq!(values.get("view task"), Some("12"));
        assert_eq!(values.get("-p"), Some("1"));
        assert!(!root.validate("view task"));
    }

    #[test]
    fn test_optional_nested_root() {
        let interval = RootCommand::new(
            ValueCommand::optional("-x", "extra", ValueKind::Integer, r"\d+").unwrap(),
        )
        .with_optional(true)
        .with_child(count("-y", "nested count", ValueKind::Integer))
        .unwrap();
        assert!(Command::from(interval.clone()).is_optional());

        let root = ping().with_child(interval).unwrap();
        assert!(root.validate("ping"));
        assert!(root.parse("ping").unwrap().is_empty());
        assert!(!root.validate("ping -x 3"));

        let values = root.parse("ping -x 3 -y 4").unwrap();
        assert_eq!(values.get("-x"), Some("3"));
        assert_eq!(values.get("-y"), Some("4"));
    }

    #[test]
    fn test_default_child_followed_by_sibling() {
        let root = ping()
            .with_child(DefaultCommand::new("-n", "count", ValueKind::Integer, r"\d+", "4", true).unwrap())
            .unwrap()
            .with_child(FlagCommand::new("-A", "audible"))
            .unwrap();
        assert!(root.validate("ping -n -A"));
        assert!(root.validate("ping -A -n"));
        assert!(!root.validate("ping -n twelve"));
        assert_eq!(root.parse("ping -n -A").unwrap().get("-n"), Some("4"));
        assert_eq!(root.parse("ping -n 9 -A").unwrap().get("-n"), Some("9"));
        assert_eq!(root.strip("ping -n -A 10.0.0.1"), "   10.0.0.1");
    }

    #[test]
    fn test_strip_folds_children_in_order() {
        let root = ping()
            .with_child(count("-c", "how many to send", ValueKind::Integer))
            .unwrap()
            .with_child(FlagCommand::new("-A", "audible"))
            .unwrap();
        assert_eq!(root.strip("ping -c 3 -A 192.168.1.1"), "    192.168.1.1");
    }
}
