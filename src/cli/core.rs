//! Shell context, dispatch, and the CLI error types.

use std::{io, sync::Arc};

use chrono::{Local, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    chart::{TextChartOptions, TextChartRenderer},
    config::{Config, ConfigManager},
    errors::{ConfigError, RequestError},
    ledger::{InMemoryLedger, LedgerStore},
    service::BudgetViewService,
};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::output::{self, OutputPreferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
    OneShot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single shell command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("exit requested")]
    ExitRequested,
}

/// Failure that stops the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Command(#[from] CommandError),
}

pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) service: BudgetViewService,
    pub(crate) config_manager: ConfigManager,
    pub(crate) config: Config,
    pub(crate) theme: ColorfulTheme,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let ledger: Arc<dyn LedgerStore> = Arc::new(InMemoryLedger::new());
        Ok(Self::with_parts(mode, ledger, config_manager, config))
    }

    pub fn with_parts(
        mode: CliMode,
        ledger: Arc<dyn LedgerStore>,
        config_manager: ConfigManager,
        config: Config,
    ) -> Self {
        output::set_preferences(OutputPreferences {
            plain_mode: config.plain_output,
        });
        Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            service: BudgetViewService::new(ledger, config.request_mode),
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub(crate) fn service(&self) -> &BudgetViewService {
        &self.service
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub(crate) fn text_renderer(&self) -> TextChartRenderer {
        TextChartRenderer::new(TextChartOptions {
            width: self.config.chart_width,
            plain: self.config.plain_output,
            currency: self.config.currency.clone(),
        })
    }

    /// Applies a config change, persists it, and refreshes dependent state.
    pub(crate) fn update_config(&mut self, key: &str, value: &str) -> CommandResult {
        self.config.set(key, value)?;
        self.config_manager.save(&self.config)?;
        self.service.set_mode(self.config.request_mode);
        output::set_preferences(OutputPreferences {
            plain_mode: self.config.plain_output,
        });
        tracing::info!(key, value, "config updated");
        Ok(())
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(definition) = self.registry.get(command) else {
            self.suggest_command(command);
            return Err(CommandError::UnknownCommand(command.to_string()));
        };
        let handler = definition.handler;
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = closest_command(self.registry.names(), input) {
            output::info(format!("Suggestion: `{best}`?"));
        }
    }

    pub(crate) fn report_error(&self, err: &CommandError) {
        match err {
            CommandError::ExitRequested | CommandError::UnknownCommand(_) => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Request(RequestError::MissingParameter(name)) => {
                output::error(err);
                output::hint(format!("Add `{name}=<value>` to the command."));
            }
            other => output::error(other),
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode != CliMode::Interactive {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()
            .map_err(CommandError::from)
    }

    pub(crate) fn prompt(&self) -> String {
        format!("budget ({})> ", self.config.default_view)
    }
}

/// Closest registered name within an edit distance of three.
pub(crate) fn closest_command<'a>(
    names: impl Iterator<Item = &'a str>,
    input: &str,
) -> Option<&'a str> {
    let input = input.trim().to_ascii_lowercase();
    names
        .map(|name| (levenshtein(name, &input), name))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= 3)
        .map(|(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_nearby_command_names() {
        let names = ["plot", "json", "spend", "ledger"];
        assert_eq!(closest_command(names.into_iter(), "plto"), Some("plot"));
        assert_eq!(closest_command(names.into_iter(), "spnd"), Some("spend"));
        assert_eq!(closest_command(names.into_iter(), "LEDGR"), Some("ledger"));
        assert_eq!(closest_command(names.into_iter(), "completely-off"), None);
    }
}
