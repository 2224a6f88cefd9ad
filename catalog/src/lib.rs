//! Command catalogs for command-match.
//!
//! A catalog is an ordered list of root commands, typically loaded once at
//! startup from a YAML or JSON file. Each inbound line is offered to the roots
//! in declaration order and the first one that validates wins.
//!
//! # Quick start
//!
//! ```
//! use command_match_catalog::CommandCatalog;
//!
//! let catalog = CommandCatalog::builtin().unwrap();
//! let found = catalog.match_line("view task 12").unwrap().unwrap();
//! assert_eq!(found.command, "view task");
//! assert_eq!(found.values.get("view task"), Some("12"));
//!
//! assert!(catalog.match_line("hello there").unwrap().is_none());
//! ```
//!
//! Loading from a file:
//!
//! ```no_run
//! use command_match_catalog::{CatalogConfig, CommandCatalog};
//!
//! let config = CatalogConfig::load("commands.yml").unwrap();
//! let catalog = CommandCatalog::from_config(&config).unwrap();
//! println!("{}", catalog.help_text());
//! ```

mod builtin;
mod catalog;
mod config;
mod error;

pub use builtin::builtin_config;
pub use catalog::{CommandCatalog, CommandMatch};
pub use config::{CATALOG_FORMAT_VERSION, CatalogConfig, ConfigFormat};
pub use error::{CatalogError, Result};
