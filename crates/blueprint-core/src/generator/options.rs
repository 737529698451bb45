//! Option schema: one declaration drives both the CLI flags and the
//! interactive question for a logical option.

use crate::args::NormalizedArgs;
use std::fmt;
use std::rc::Rc;

/// One selectable flag of an option.
///
/// `flag` doubles as the CLI long-flag name and the value stored in the
/// normalized answers; `description` is a message key.
#[derive(Debug, Clone)]
pub struct Choice {
    pub flag: String,
    pub description: String,
}

impl Choice {
    pub fn new(flag: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            description: description.into(),
        }
    }
}

/// Closed set of option shapes. Both the prompt conversion and the CLI
/// flag registration/normalization match on this exhaustively.
#[derive(Debug, Clone)]
pub enum OptionShape {
    /// Multi-select; normalizes to the partial chosen-flag set.
    Checkbox {
        choices: Vec<Choice>,
        default: Vec<String>,
    },
    /// Single-select; normalizes to the selected flag.
    List {
        choices: Vec<Choice>,
        default: Vec<String>,
    },
}

impl OptionShape {
    /// Declared choices in declaration (= display) order.
    pub fn choices(&self) -> &[Choice] {
        match self {
            OptionShape::Checkbox { choices, .. } | OptionShape::List { choices, .. } => choices,
        }
    }

    /// Declared default flags.
    pub fn default_flags(&self) -> &[String] {
        match self {
            OptionShape::Checkbox { default, .. } | OptionShape::List { default, .. } => default,
        }
    }
}

/// Condition deciding whether the interactive question is asked.
#[derive(Clone)]
pub enum When {
    Always,
    Value(bool),
    /// Evaluated against the answers accumulated so far.
    Predicate(Rc<dyn Fn(&NormalizedArgs) -> bool>),
}

impl When {
    pub fn ask(&self, answers: &NormalizedArgs) -> bool {
        match self {
            When::Always => true,
            When::Value(value) => *value,
            When::Predicate(predicate) => predicate(answers),
        }
    }
}

impl fmt::Debug for When {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            When::Always => write!(f, "Always"),
            When::Value(value) => write!(f, "Value({value})"),
            When::Predicate(_) => write!(f, "Predicate"),
        }
    }
}

/// One logical option: a single interactive question and its CLI flag(s).
#[derive(Debug, Clone)]
pub struct OptionSpec {
    pub name: String,
    /// Message key of the question text.
    pub message: String,
    pub shape: OptionShape,
    pub when: When,
}

impl OptionSpec {
    /// A multi-select option with no choices yet.
    pub fn checkbox(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            shape: OptionShape::Checkbox {
                choices: Vec::new(),
                default: Vec::new(),
            },
            when: When::Always,
        }
    }

    /// A single-select option with no choices yet.
    pub fn list(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            shape: OptionShape::List {
                choices: Vec::new(),
                default: Vec::new(),
            },
            when: When::Always,
        }
    }

    /// Append a choice; declaration order is display order.
    pub fn choice(mut self, flag: impl Into<String>, description: impl Into<String>) -> Self {
        match &mut self.shape {
            OptionShape::Checkbox { choices, .. } | OptionShape::List { choices, .. } => {
                choices.push(Choice::new(flag, description));
            }
        }
        self
    }

    /// Append a default flag.
    pub fn default_flag(mut self, flag: impl Into<String>) -> Self {
        match &mut self.shape {
            OptionShape::Checkbox { default, .. } | OptionShape::List { default, .. } => {
                default.push(flag.into());
            }
        }
        self
    }

    /// Replace the ask condition.
    pub fn when(mut self, when: When) -> Self {
        self.when = when;
        self
    }

    /// Ask only when the predicate holds for the answers so far.
    pub fn when_fn(mut self, predicate: impl Fn(&NormalizedArgs) -> bool + 'static) -> Self {
        self.when = When::Predicate(Rc::new(predicate));
        self
    }
}
