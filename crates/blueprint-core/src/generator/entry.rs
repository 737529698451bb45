//! Generator entries and their registration-time validation.

use super::options::{OptionShape, OptionSpec};
use crate::args::{NormalizedArgs, Settings};
use crate::fsops::Workspace;
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

/// Controller callback: invoked once per target name with a workspace bound
/// to the effective context of this invocation. Controllers report outcomes
/// through the workspace and must not panic.
pub type Controller = Box<dyn Fn(&Workspace<'_>, &str, &NormalizedArgs, &Settings)>;

/// One registered generator: a command, a prompt message, an option schema
/// and the controller driving the file operations.
pub struct GeneratorEntry {
    /// Subcommand name.
    pub command: String,
    /// Message key: the interactive names question, also printed when
    /// prompting yields no names.
    pub message: String,
    pub options: Vec<OptionSpec>,
    /// Passed to the controller verbatim.
    pub settings: Settings,
    /// Optional root directory override for this generator's invocations.
    pub context: Option<PathBuf>,
    pub controller: Controller,
}

impl GeneratorEntry {
    pub fn new(
        command: impl Into<String>,
        message: impl Into<String>,
        controller: impl Fn(&Workspace<'_>, &str, &NormalizedArgs, &Settings) + 'static,
    ) -> Self {
        Self {
            command: command.into(),
            message: message.into(),
            options: Vec::new(),
            settings: Settings::new(),
            context: None,
            controller: Box::new(controller),
        }
    }

    /// Append an option; declaration order is question order.
    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn context(mut self, context: impl Into<PathBuf>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// A rejected generator declaration.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("generator command '{0}' is already registered")]
    DuplicateCommand(String),

    #[error("generator '{command}' declares option '{option}' more than once")]
    DuplicateOption { command: String, option: String },

    #[error("generator '{command}' declares flag '{flag}' more than once")]
    DuplicateFlag { command: String, flag: String },

    #[error("option '{option}' of generator '{command}' declares no choices")]
    EmptyChoices { command: String, option: String },

    #[error("default flag '{flag}' of option '{option}' (generator '{command}') is not a declared choice")]
    UnknownDefault {
        command: String,
        option: String,
        flag: String,
    },
}

/// Validate a declaration against the already registered generators.
pub(crate) fn validate(
    entry: &GeneratorEntry,
    registered: &[GeneratorEntry],
) -> Result<(), RegistrationError> {
    if registered.iter().any(|g| g.command == entry.command) {
        return Err(RegistrationError::DuplicateCommand(entry.command.clone()));
    }

    let mut option_names = BTreeSet::new();
    // "names" is the positional argument of every generator subcommand.
    let mut flag_names = BTreeSet::from(["names".to_string()]);

    for option in &entry.options {
        if !option_names.insert(option.name.clone()) {
            return Err(RegistrationError::DuplicateOption {
                command: entry.command.clone(),
                option: option.name.clone(),
            });
        }

        let choices = option.shape.choices();
        if choices.is_empty() {
            return Err(RegistrationError::EmptyChoices {
                command: entry.command.clone(),
                option: option.name.clone(),
            });
        }

        // Checkbox choices register one CLI flag each; a list option
        // registers a single flag under its own name.
        let flags: Vec<&str> = match &option.shape {
            OptionShape::Checkbox { choices, .. } => {
                choices.iter().map(|choice| choice.flag.as_str()).collect()
            }
            OptionShape::List { .. } => vec![option.name.as_str()],
        };
        for flag in flags {
            if !flag_names.insert(flag.to_string()) {
                return Err(RegistrationError::DuplicateFlag {
                    command: entry.command.clone(),
                    flag: flag.to_string(),
                });
            }
        }

        for flag in option.shape.default_flags() {
            if !choices.iter().any(|choice| choice.flag == *flag) {
                return Err(RegistrationError::UnknownDefault {
                    command: entry.command.clone(),
                    option: option.name.clone(),
                    flag: flag.clone(),
                });
            }
        }
    }

    Ok(())
}
