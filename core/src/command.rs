//! Command node shapes.
//!
//! [`Command`] is a closed set of shapes that share one contract:
//!
//! - `validate(input)` decides whether the text satisfies the node.
//! - `parse(input, values)` adds the node's raw value to the accumulator and
//!   fails with [`CommandError::InvalidInput`] when `validate` does not hold.
//! - `strip(input)` removes the node's name (and value) from the text without
//!   touching surrounding whitespace.
//!
//! Leaf shapes are [`FlagCommand`], [`ValueCommand`] and [`DefaultCommand`];
//! [`RootCommand`] wraps a leaf and composes an ordered child list.

use std::ops::Range;

use tracing::trace;

use crate::error::{CommandError, Result};
use crate::matching::{self, ValuePattern};
use crate::parsed::ParsedValues;
use crate::root::RootCommand;
use crate::value::{Value, ValueKind};

/// Zero-payload flag such as `-A`.
///
/// Always optional: a mandatory flag with no value would carry no
/// information, so the type has no mandatory form.
///
/// # Examples
///
/// ```
/// use command_match_core::FlagCommand;
///
/// let flag = FlagCommand::new("-A", "audible ping");
/// assert!(flag.validate(""));
/// assert_eq!(flag.strip("ping -c 3 -A 192.168.1.1"), "ping -c 3  192.168.1.1");
/// ```
#[derive(Debug, Clone)]
pub struct FlagCommand {
    name: String,
    help: String,
}

impl FlagCommand {
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// Always `true`.
    pub fn validate(&self, _input: &str) -> bool {
        true
    }

    /// Returns `values` unchanged.
    pub fn parse(&self, _input: &str, values: ParsedValues) -> Result<ParsedValues> {
        Ok(values)
    }

    /// Removes every boundary-matched occurrence of the name.
    pub fn strip(&self, input: &str) -> String {
        matching::strip_token(input, &self.name)
    }
}

/// Command carrying a value matched by a pattern, e.g. `-c 3`.
///
/// # Examples
///
/// ```
/// use command_match_core::{ParsedValues, ValueCommand, ValueKind};
///
/// let count = ValueCommand::mandatory("-c", "how many to send", ValueKind::Integer, r"\d+").unwrap();
/// assert!(count.validate("-c 14"));
/// assert!(!count.validate("-c 14c"));
///
/// let values = count.parse("ping -c 3 -A 1.1.1.1", ParsedValues::new()).unwrap();
/// assert_eq!(values.get("-c"), Some("3"));
/// ```
#[derive(Debug, Clone)]
pub struct ValueCommand {
    name: String,
    help: String,
    kind: ValueKind,
    pattern: ValuePattern,
    optional: bool,
}

impl ValueCommand {
    /// Creates a value command.
    ///
    /// # Errors
    ///
    /// [`CommandError::InvalidPattern`] if `pattern` does not compile.
    pub fn new(
        name: impl Into<String>,
        help: impl Into<String>,
        kind: ValueKind,
        pattern: &str,
        optional: bool,
    ) -> Result<Self> {
        let name = name.into();
        let pattern = ValuePattern::new(pattern).map_err(|source| CommandError::InvalidPattern {
            command: name.clone(),
            source,
        })?;
        Ok(Self {
            name,
            help: help.into(),
            kind,
            pattern,
            optional,
        })
    }

    /// Creates a value command that must be present with a matching value.
    pub fn mandatory(
        name: impl Into<String>,
        help: impl Into<String>,
        kind: ValueKind,
        pattern: &str,
    ) -> Result<Self> {
        Self::new(name, help, kind, pattern, false)
    }

    /// Creates a value command that may be absent.
    pub fn optional(
        name: impl Into<String>,
        help: impl Into<String>,
        kind: ValueKind,
        pattern: &str,
    ) -> Result<Self> {
        Self::new(name, help, kind, pattern, true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Optional commands always validate. Mandatory ones need the name
    /// followed by a value that matches the pattern up to a word boundary.
    pub fn validate(&self, input: &str) -> bool {
        self.optional || self.has_leading_value(input)
    }

    /// Inserts `name -> value` for the first value after the name.
    ///
    /// # Errors
    ///
    /// [`CommandError::InvalidInput`] when a mandatory command finds no value.
    pub fn parse(&self, input: &str, mut values: ParsedValues) -> Result<ParsedValues> {
        if !self.validate(input) {
            return Err(CommandError::invalid_input(&self.name, input));
        }
        match self.locate_value(input) {
            Some(range) => {
                trace!(command = %self.name, value = &input[range.clone()], "Matched value");
                values.insert(self.name.as_str(), &input[range]);
                Ok(values)
            }
            None if self.optional => Ok(values),
            None => Err(CommandError::invalid_input(&self.name, input)),
        }
    }

    /// Removes the name, then the first matched value after it.
    pub fn strip(&self, input: &str) -> String {
        let Some(first) = matching::find_token(input, &self.name) else {
            return input.to_string();
        };
        let stripped = matching::strip_token(input, &self.name);
        match self.value_after(&stripped, first.start) {
            Some(range) => matching::remove_ranges(&stripped, &[range]),
            None => stripped,
        }
    }

    fn has_leading_value(&self, input: &str) -> bool {
        matching::find_token(input, &self.name).is_some_and(|token| {
            let (_, text) = matching::following(input, token.end);
            self.pattern.leading_match(text).is_some()
        })
    }

    fn locate_value(&self, input: &str) -> Option<Range<usize>> {
        let token = matching::find_token(input, &self.name)?;
        self.value_after(input, token.end)
    }

    fn value_after(&self, input: &str, at: usize) -> Option<Range<usize>> {
        let (offset, text) = matching::following(input, at);
        self.pattern
            .first_match(text)
            .map(|range| offset + range.start..offset + range.end)
    }
}

/// Value command that falls back to a literal when the value is omitted.
///
/// The value counts as omitted when nothing follows the name, or when the
/// next token is the name of a sibling command. A value that is present but
/// does not match the pattern still fails validation.
///
/// # Examples
///
/// ```
/// use command_match_core::{DefaultCommand, ParsedValues, ValueKind};
///
/// let count = DefaultCommand::new("-n", "ping count", ValueKind::Integer, r"\d+", "4", false).unwrap();
/// assert_eq!(count.parse("ping -n", ParsedValues::new()).unwrap().get("-n"), Some("4"));
/// assert_eq!(count.parse("ping -n 9", ParsedValues::new()).unwrap().get("-n"), Some("9"));
/// assert!(!count.validate("ping -n x"));
/// assert!(count.validate_among("ping -n -A", &["-A"]));
/// ```
#[derive(Debug, Clone)]
pub struct DefaultCommand {
    inner: ValueCommand,
    default: String,
}

/// What follows a default-valued command's name.
enum Slot {
    Omitted,
    Given(Range<usize>),
    Mismatch,
}

impl DefaultCommand {
    /// Creates a default-valued command.
    ///
    /// # Errors
    ///
    /// [`CommandError::InvalidPattern`] if `pattern` does not compile.
    pub fn new(
        name: impl Into<String>,
        help: impl Into<String>,
        kind: ValueKind,
        pattern: &str,
        default: impl Into<String>,
        optional: bool,
    ) -> Result<Self> {
        Ok(Self {
            inner: ValueCommand::new(name, help, kind, pattern, optional)?,
            default: default.into(),
        })
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn help(&self) -> &str {
        self.inner.help()
    }

    pub fn kind(&self) -> &ValueKind {
        self.inner.kind()
    }

    pub fn pattern(&self) -> &str {
        self.inner.pattern()
    }

    pub fn is_optional(&self) -> bool {
        self.inner.is_optional()
    }

    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// Validates without knowledge of sibling commands.
    pub fn validate(&self, input: &str) -> bool {
        self.validate_among(input, &[])
    }

    /// Name absent: the optional flag decides. Name present: valid when the
    /// value is omitted or when a matching value follows it.
    pub fn validate_among(&self, input: &str, siblings: &[&str]) -> bool {
        match matching::find_token(input, self.name()) {
            None => self.is_optional(),
            Some(token) => !matches!(self.slot(input, token.end, siblings), Slot::Mismatch),
        }
    }

    /// Parses without knowledge of sibling commands.
    ///
    /// # Errors
    ///
    /// [`CommandError::InvalidInput`] when `validate` does not hold.
    pub fn parse(&self, input: &str, values: ParsedValues) -> Result<ParsedValues> {
        self.parse_among(input, &[], values)
    }

    /// Inserts the matched value, or the default when the value is omitted.
    ///
    /// # Errors
    ///
    /// [`CommandError::InvalidInput`] when `validate_among` does not hold.
    pub fn parse_among(
        &self,
        input: &str,
        siblings: &[&str],
        mut values: ParsedValues,
    ) -> Result<ParsedValues> {
        let Some(token) = matching::find_token(input, self.name()) else {
            return if self.is_optional() {
                Ok(values)
            } else {
                Err(CommandError::invalid_input(self.name(), input))
            };
        };
        match self.slot(input, token.end, siblings) {
            Slot::Omitted => values.insert(self.name(), self.default.as_str()),
            Slot::Given(range) => values.insert(self.name(), &input[range]),
            Slot::Mismatch => return Err(CommandError::invalid_input(self.name(), input)),
        }
        Ok(values)
    }

    pub fn strip(&self, input: &str) -> String {
        self.strip_among(input, &[])
    }

    /// Removes the name, then the value it carries if one was given.
    pub fn strip_among(&self, input: &str, siblings: &[&str]) -> String {
        let Some(first) = matching::find_token(input, self.name()) else {
            return input.to_string();
        };
        let stripped = matching::strip_token(input, self.name());
        match self.slot(&stripped, first.start, siblings) {
            Slot::Given(range) => matching::remove_ranges(&stripped, &[range]),
            Slot::Omitted | Slot::Mismatch => stripped,
        }
    }

    fn slot(&self, input: &str, at: usize, siblings: &[&str]) -> Slot {
        let (offset, text) = matching::following(input, at);
        let sibling_next = siblings
            .iter()
            .any(|name| *name != self.name() && matching::starts_with_token(text, name));
        if text.is_empty() || sibling_next {
            return Slot::Omitted;
        }
        match self.inner.pattern.leading_match(text) {
            Some(range) => Slot::Given(offset + range.start..offset + range.end),
            None => Slot::Mismatch,
        }
    }
}

/// A node of a command tree.
#[derive(Debug, Clone)]
pub enum Command {
    Flag(FlagCommand),
    Value(ValueCommand),
    Defaulted(DefaultCommand),
    Root(RootCommand),
}

impl Command {
    pub fn name(&self) -> &str {
        match self {
            Self::Flag(c) => c.name(),
            Self::Value(c) => c.name(),
            Self::Defaulted(c) => c.name(),
            Self::Root(c) => c.name(),
        }
    }

    pub fn help(&self) -> &str {
        match self {
            Self::Flag(c) => c.help(),
            Self::Value(c) => c.help(),
            Self::Defaulted(c) => c.help(),
            Self::Root(c) => c.help(),
        }
    }

    /// Declared value kind, or `None` for nodes that carry no value.
    pub fn kind(&self) -> Option<&ValueKind> {
        match self {
            Self::Flag(_) => None,
            Self::Value(c) => Some(c.kind()),
            Self::Defaulted(c) => Some(c.kind()),
            Self::Root(c) => c.head().kind(),
        }
    }

    pub fn is_optional(&self) -> bool {
        match self {
            Self::Flag(_) => true,
            Self::Value(c) => c.is_optional(),
            Self::Defaulted(c) => c.is_optional(),
            Self::Root(c) => c.is_optional(),
        }
    }

    pub fn validate(&self, input: &str) -> bool {
        self.validate_among(input, &[])
    }

    /// Validates with the names of this node's siblings in view, so a
    /// default-valued node treats a following sibling as an omitted value.
    pub fn validate_among(&self, input: &str, siblings: &[&str]) -> bool {
        match self {
            Self::Flag(c) => c.validate(input),
            Self::Value(c) => c.validate(input),
            Self::Defaulted(c) => c.validate_among(input, siblings),
            Self::Root(c) => c.validate(input),
        }
    }

    /// # Errors
    ///
    /// [`CommandError::InvalidInput`] when `validate(input)` does not hold.
    pub fn parse(&self, input: &str, values: ParsedValues) -> Result<ParsedValues> {
        self.parse_among(input, &[], values)
    }

    /// # Errors
    ///
    /// [`CommandError::InvalidInput`] when `validate_among(input, siblings)`
    /// does not hold.
    pub fn parse_among(
        &self,
        input: &str,
        siblings: &[&str],
        values: ParsedValues,
    ) -> Result<ParsedValues> {
        match self {
            Self::Flag(c) => c.parse(input, values),
            Self::Value(c) => c.parse(input, values),
            Self::Defaulted(c) => c.parse_among(input, siblings, values),
            Self::Root(c) => c.parse_into(input, values),
        }
    }

    pub fn strip(&self, input: &str) -> String {
        self.strip_among(input, &[])
    }

    pub fn strip_among(&self, input: &str, siblings: &[&str]) -> String {
        match self {
            Self::Flag(c) => c.strip(input),
            Self::Value(c) => c.strip(input),
            Self::Defaulted(c) => c.strip_among(input, siblings),
            Self::Root(c) => c.strip(input),
        }
    }

    /// `"name: help"`, followed by child lines for root nodes.
    pub fn help_text(&self) -> String {
        match self {
            Self::Root(c) => c.help_text(),
            _ => format!("{}: {}", self.name(), self.help()),
        }
    }

    /// Child nodes (empty for leaves).
    pub fn children(&self) -> &[Command] {
        match self {
            Self::Root(c) => c.children(),
            _ => &[],
        }
    }

    /// Depth-first lookup of `name`, starting with this node.
    pub fn find(&self, name: &str) -> Option<&Command> {
        if self.name() == name {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(name))
    }

    /// Coerces this node's raw value in `values` to its declared kind.
    ///
    /// Returns `Ok(None)` when no value was recorded.
    ///
    /// # Errors
    ///
    /// [`CommandError::UnsupportedValueType`] when the node carries no value
    /// or its kind has no coercion; [`CommandError::ValueCoercionFailure`]
    /// when the raw text does not parse.
    pub fn typed_value(&self, values: &ParsedValues) -> Result<Option<Value>> {
        let kind = match self.kind() {
            Some(kind) if kind.is_coercible() => kind,
            other => {
                return Err(CommandError::UnsupportedValueType {
                    command: self.name().to_string(),
                    kind: other.map_or("none", ValueKind::as_str).to_string(),
                });
            }
        };
        values
            .get(self.name())
            .map(|raw| kind.coerce(self.name(), raw))
            .transpose()
    }
}

impl From<FlagCommand> for Command {
    fn from(command: FlagCommand) -> Self {
        Self::Flag(command)
    }
}

impl From<ValueCommand> for Command {
    fn from(command: ValueCommand) -> Self {
        Self::Value(command)
    }
}

impl From<DefaultCommand> for Command {
    fn from(command: DefaultCommand) -> Self {
        Self::Defaulted(command)
    }
}

impl From<RootCommand> for Command {
    fn from(command: RootCommand) -> Self {
        Self::Root(command)
    }
}
