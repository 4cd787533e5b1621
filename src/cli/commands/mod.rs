use std::collections::HashMap;

pub mod budget;
pub mod config;
pub mod system;

use crate::cli::core::{CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(budget::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// One shell command: its lowercase name, help text, and handler.
#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Shell commands in help order, looked up by name regardless of case.
pub struct CommandRegistry {
    definitions: Vec<CommandDefinition>,
    by_name: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    /// Names are registered lowercase; a repeated name keeps its first definition.
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut registry = Self {
            definitions: Vec::with_capacity(definitions.len()),
            by_name: HashMap::new(),
        };
        for definition in definitions {
            if registry.by_name.contains_key(definition.name) {
                tracing::warn!(name = definition.name, "duplicate command ignored");
                continue;
            }
            registry
                .by_name
                .insert(definition.name, registry.definitions.len());
            registry.definitions.push(definition);
        }
        registry
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        let key = name.trim().to_ascii_lowercase();
        self.by_name
            .get(key.as_str())
            .and_then(|idx| self.definitions.get(*idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.definitions.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.definitions.iter().map(|definition| definition.name)
    }
}
