use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::config::Config;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "View and change preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            output::section("Configuration");
            for (key, value) in context.config().entries() {
                output::info(format!("  {key:<14} {value}"));
            }
            output::info(format!("  stored at      {}", context.config_manager.path().display()));
            Ok(())
        }
        ["set", key, value] => {
            context.update_config(key, value)?;
            output::success(format!("Set `{key}` to `{value}`."));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config set <{}> <value>",
            Config::KEYS.join("|")
        ))),
    }
}
