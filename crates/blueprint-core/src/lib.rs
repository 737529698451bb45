//! Blueprint Core - Shared library for boilerplate-generation CLIs
//!
//! This library is the glue between a CLI argument parser, an interactive
//! prompt session, a locale catalog and direct filesystem calls. A host
//! application registers named generators (command, prompt message, option
//! schema, controller callback); the toolkit registers one subcommand per
//! generator and reconciles the two input surfaces (non-interactive flags
//! and interactive answers) into one canonical argument shape before the
//! controller runs.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Leaf services** - locale catalogs ([`locale`]), outcome
//!   reporting ([`message`]), context-bound file operations ([`fsops`])
//! - **Layer 2: Declarations** - generator entries and their option schema
//!   ([`generator`]), the canonical argument shapes ([`args`])
//! - **Layer 3: CLI/TUI interface** - subcommand registration and dispatch
//!   ([`Blueprint`]), interactive prompting ([`prompt`], feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based interactive prompt
//!   fallback; without it, invocations without positional names end with
//!   the generator's informational message.
//!
//! # Example Usage
//!
//! ```ignore
//! use blueprint_core::{Blueprint, BlueprintOptions, GeneratorEntry, MakeFile, OptionSpec};
//!
//! let mut blueprint = Blueprint::new("my-tools", BlueprintOptions::default())?;
//! blueprint.add_generator(
//!     GeneratorEntry::new("component", "Component name", |ws, name, args, _settings| {
//!         ws.make_file(
//!             MakeFile::new("templates/component.ts", format!("src/{name}.ts"))
//!                 .replace("COMPONENT_NAME", name)
//!                 .entity("Component"),
//!         );
//!     })
//!     .option(
//!         OptionSpec::checkbox("extras", "Component extras")
//!             .choice("test", "Add unit test")
//!             .choice("story", "Add Storybook story"),
//!     ),
//! )?;
//! blueprint.run()?;
//! ```

pub mod args;
pub mod dispatch;
pub mod fsops;
pub mod generator;
pub mod locale;
pub mod message;

#[cfg(feature = "tui")]
pub mod prompt;

// Re-export main types for convenience
pub use args::{NormalizedArgs, OptionValue, Settings};
pub use dispatch::{Blueprint, BlueprintOptions};
pub use fsops::{clean_name, MakeFile, UpdateFile, UpdateReplacement, Workspace};
pub use generator::{
    Choice, Controller, GeneratorEntry, OptionShape, OptionSpec, RegistrationError, When,
};
pub use locale::{CatalogError, Localizer};
pub use message::{MessageOptions, Messenger};
