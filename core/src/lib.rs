//! Hierarchical text command matching.
//!
//! This crate decides whether a free-form line of text (an SMS or e-mail body,
//! a chat message) invokes a named command, pulls argument values out of the
//! surrounding text, and can strip the matched command back out.
//!
//! - [`FlagCommand`] — a zero-payload token such as `-A`.
//! - [`ValueCommand`] — a token followed by a value matched by a pattern.
//! - [`DefaultCommand`] — a value command with a literal fallback.
//! - [`RootCommand`] — a head node composed with an ordered child list.
//! - [`CommandSpec`] — declarative configuration, built into a sealed
//!   [`CommandTree`].
//!
//! Names only match on whitespace boundaries, so `ping` never matches inside
//! `pinging`. Parsing stores raw strings in [`ParsedValues`]; conversion to a
//! typed [`Value`] happens on access according to the declared [`ValueKind`].
//!
//! # Example
//!
//! ```
//! use command_match_core::*;
//!
//! let ping = CommandSpec::new("ping")
//!     .with_help("send an ICMP request")
//!     .no_args()
//!     .with_child(
//!         CommandSpec::new("-c")
//!             .with_help("how many to send")
//!             .with_value_type(ValueKind::Integer)
//!             .with_pattern(r"\d+"),
//!     )
//!     .with_child(CommandSpec::new("-A").with_help("audible ping").no_args())
//!     .build()
//!     .unwrap();
//!
//! let input = "ping -c 3 -A 1.1.1.1";
//! assert!(ping.validate(input));
//!
//! let values = ping.parse(input).unwrap();
//! assert_eq!(values.get("-c"), Some("3"));
//! assert_eq!(ping.typed_value(&values, "-c").unwrap(), Some(Value::Integer(3)));
//! assert_eq!(ping.strip(input).trim(), "1.1.1.1");
//! ```

mod builder;
mod command;
mod error;
mod matching;
mod parsed;
mod root;
mod tree;
mod value;

pub use builder::{CommandSpec, DEFAULT_VALUE_PATTERN};
pub use command::{Command, DefaultCommand, FlagCommand, ValueCommand};
pub use error::{CommandError, Result};
pub use matching::ValuePattern;
pub use parsed::ParsedValues;
pub use root::{RootCommand, TrailingPolicy};
pub use tree::CommandTree;
pub use value::{Value, ValueKind};
