//! Built-in task command set.

use command_match_core::{CommandSpec, ValueKind};

use crate::config::CatalogConfig;

/// Task commands understood out of the box.
///
/// | Command | Value |
/// |---------|-------|
/// | `create task` | free-text description |
/// | `view task` | task number |
/// | `view tasks` | none |
/// | `view my tasks` | none |
/// | `delete task` | task number |
pub fn builtin_config() -> CatalogConfig {
    let task_number = |name: &str, help: &str| {
        CommandSpec::new(name)
            .with_help(help)
            .with_value_type(ValueKind::Integer)
            .with_pattern(r"\d+")
    };

    CatalogConfig::new(vec![
        CommandSpec::new("create task")
            .with_help("Create a task: `create task <task description>`"),
        task_number("view task", "View a task: `view task <task number>`"),
        CommandSpec::new("view tasks")
            .with_help("View all tasks in this group")
            .no_args(),
        CommandSpec::new("view my tasks")
            .with_help("View all your tasks in this group")
            .no_args(),
        task_number("delete task", "Delete a task: `delete task <task number>`"),
    ])
}
