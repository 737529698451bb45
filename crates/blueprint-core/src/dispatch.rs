//! Command registration and dispatch
//!
//! The [`Blueprint`] holds the registered generators and the shared locale
//! state. For every generator it registers one subcommand; an invocation
//! either takes its arguments from CLI flags or falls back to interactive
//! prompting, and both surfaces are normalized into the same canonical
//! shape before the controller runs.

use crate::args::{NormalizedArgs, OptionValue};
use crate::fsops::Workspace;
use crate::generator::{validate, GeneratorEntry, OptionShape, RegistrationError};
use crate::locale::Localizer;
use crate::message::Messenger;
use anyhow::{Context as _, Result};
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::collections::{BTreeSet, HashMap};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Construction options for [`Blueprint`].
pub struct BlueprintOptions {
    /// Active locale selector.
    pub locale: String,
    /// Custom locale catalogs: locale code and a flat JSON file path,
    /// resolved against `context`.
    pub locales: Vec<(String, PathBuf)>,
    /// Base root directory for all path resolution; the process working
    /// directory when not set.
    pub context: Option<PathBuf>,
}

impl Default for BlueprintOptions {
    fn default() -> Self {
        Self {
            locale: "ru".to_string(),
            locales: Vec::new(),
            context: None,
        }
    }
}

/// The toolkit: registered generators plus the shared locale state.
pub struct Blueprint {
    name: String,
    localizer: Localizer,
    context: PathBuf,
    generators: Vec<GeneratorEntry>,
}

impl Blueprint {
    /// Create a toolkit instance named `name` (the CLI program name).
    pub fn new(name: impl Into<String>, options: BlueprintOptions) -> Result<Self> {
        let context = match options.context {
            Some(context) => context,
            None => std::env::current_dir().context("cannot resolve current directory")?,
        };

        let mut localizer = Localizer::new(&options.locale)?;
        for (locale, file) in &options.locales {
            let path = context.join(file);
            localizer
                .merge_file(locale, &path)
                .with_context(|| format!("failed to load locale catalog {}", path.display()))?;
        }

        Ok(Self {
            name: name.into(),
            localizer,
            context,
            generators: Vec::new(),
        })
    }

    /// The base context root.
    pub fn context(&self) -> &Path {
        &self.context
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    /// Overlay extra catalog entries onto a locale.
    pub fn merge_locale(&mut self, locale: &str, entries: HashMap<String, String>) {
        self.localizer.merge(locale, entries);
    }

    /// Switch the active locale.
    pub fn set_locale(&mut self, locale: &str) {
        self.localizer.set_locale(locale);
    }

    /// Validate and store a generator declaration.
    pub fn add_generator(&mut self, entry: GeneratorEntry) -> Result<(), RegistrationError> {
        validate(&entry, &self.generators)?;
        self.generators.push(entry);
        Ok(())
    }

    /// Parse the process arguments and run the matching generator.
    pub fn run(&self) -> Result<()> {
        let matches = self.build_cli().get_matches();
        let messenger = Messenger::new(&self.localizer);
        self.dispatch_matches(&matches, &messenger)
    }

    /// Argv-injectable variant of [`Blueprint::run`].
    pub fn run_from<I, T>(&self, argv: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.build_cli().try_get_matches_from(argv)?;
        let messenger = Messenger::new(&self.localizer);
        self.dispatch_matches(&matches, &messenger)
    }

    /// Register one subcommand per generator: a positional name list, one
    /// boolean flag per checkbox choice and one valued flag per list option.
    fn build_cli(&self) -> Command {
        let mut cli = Command::new(self.name.clone())
            .subcommand_required(true)
            .arg_required_else_help(true);

        for generator in &self.generators {
            let mut command = Command::new(generator.command.clone())
                .about(self.localizer.translate(&generator.message, &[]))
                .arg(Arg::new("names").value_name("names").num_args(0..));

            for option in &generator.options {
                match &option.shape {
                    OptionShape::Checkbox { choices, .. } => {
                        for choice in choices {
                            command = command.arg(
                                Arg::new(choice.flag.clone())
                                    .long(choice.flag.clone())
                                    .action(ArgAction::SetTrue)
                                    .help(self.localizer.translate(&choice.description, &[])),
                            );
                        }
                    }
                    OptionShape::List { choices, default } => {
                        let mut arg = Arg::new(option.name.clone())
                            .long(option.name.clone())
                            .value_name("value")
                            .value_parser(PossibleValuesParser::new(
                                choices.iter().map(|choice| choice.flag.clone()),
                            ))
                            .help(self.localizer.translate(&option.message, &[]));
                        let initial = default
                            .first()
                            .cloned()
                            .or_else(|| choices.first().map(|choice| choice.flag.clone()));
                        if let Some(initial) = initial {
                            arg = arg.default_value(initial);
                        }
                        command = command.arg(arg);
                    }
                }
            }

            cli = cli.subcommand(command);
        }

        cli
    }

    fn dispatch_matches(&self, matches: &ArgMatches, messenger: &Messenger<'_>) -> Result<()> {
        let Some((command, sub)) = matches.subcommand() else {
            return Ok(());
        };
        let Some(generator) = self.generators.iter().find(|g| g.command == command) else {
            return Ok(());
        };

        let names: Vec<String> = sub
            .get_many::<String>("names")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        let (names, args) = if names.is_empty() {
            match self.prompt(generator, messenger)? {
                Some(outcome) => outcome,
                None => return Ok(()),
            }
        } else {
            (names, self.normalize_cli(generator, sub))
        };

        // One controller call per target name, each against a workspace
        // bound to the effective context; the base context never changes,
        // so later names and sibling generators are unaffected.
        for name in &names {
            let context = generator
                .context
                .clone()
                .unwrap_or_else(|| self.context.clone());
            let workspace = Workspace::new(context, messenger);
            (generator.controller)(&workspace, name, &args, &generator.settings);
        }

        Ok(())
    }

    #[cfg(feature = "tui")]
    fn prompt(
        &self,
        generator: &GeneratorEntry,
        messenger: &Messenger<'_>,
    ) -> Result<Option<(Vec<String>, NormalizedArgs)>> {
        let questions = crate::prompt::build_questions(generator, &self.localizer);
        let (names, answers) = crate::prompt::run_questions(&questions, &self.localizer)
            .context("interactive prompt failed")?;
        Ok(self.finish_prompt(generator, names, answers, messenger))
    }

    #[cfg(not(feature = "tui"))]
    fn prompt(
        &self,
        generator: &GeneratorEntry,
        messenger: &Messenger<'_>,
    ) -> Result<Option<(Vec<String>, NormalizedArgs)>> {
        Ok(self.finish_prompt(generator, Vec::new(), NormalizedArgs::new(), messenger))
    }

    /// An empty name list ends the invocation with the generator's
    /// informational message; anything else proceeds to execution.
    fn finish_prompt(
        &self,
        generator: &GeneratorEntry,
        names: Vec<String>,
        answers: NormalizedArgs,
        messenger: &Messenger<'_>,
    ) -> Option<(Vec<String>, NormalizedArgs)> {
        if names.is_empty() {
            messenger.note(&generator.message, &[]);
            return None;
        }
        Some((names, answers))
    }

    /// Regroup flat CLI flags into the canonical shape: each checkbox
    /// option collects exactly its chosen flags, list flags pass through.
    fn normalize_cli(&self, generator: &GeneratorEntry, matches: &ArgMatches) -> NormalizedArgs {
        let mut args = NormalizedArgs::new();
        for option in &generator.options {
            match &option.shape {
                OptionShape::Checkbox { choices, .. } => {
                    let chosen: BTreeSet<String> = choices
                        .iter()
                        .filter(|choice| matches.get_flag(&choice.flag))
                        .map(|choice| choice.flag.clone())
                        .collect();
                    args.insert(option.name.clone(), OptionValue::Flags(chosen));
                }
                OptionShape::List { .. } => {
                    if let Some(value) = matches.get_one::<String>(&option.name) {
                        args.insert(option.name.clone(), OptionValue::Value(value.clone()));
                    }
                }
            }
        }
        args
    }
}
