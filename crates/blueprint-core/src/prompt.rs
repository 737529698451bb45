//! Interactive prompting (Charm-style, via cliclack)
//!
//! The conversion from a generator declaration to an ordered question list
//! is a pure function, so the mapping is testable without a terminal; only
//! [`run_questions`] touches the interactive session.

use crate::args::{NormalizedArgs, OptionValue};
use crate::generator::{GeneratorEntry, OptionShape, OptionSpec};
use crate::locale::Localizer;
use std::collections::BTreeSet;

/// One prepared choice row: the flag value, its localized label and whether
/// it starts selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptChoice {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// One prepared question, in ask order.
pub enum Question<'a> {
    /// Free-text target names; always first.
    Names { message: String },
    /// A checkbox option.
    MultiSelect {
        option: &'a OptionSpec,
        message: String,
        choices: Vec<PromptChoice>,
    },
    /// A list option.
    Select {
        option: &'a OptionSpec,
        message: String,
        choices: Vec<PromptChoice>,
    },
}

/// Build the ordered question list for a generator declaration.
pub fn build_questions<'a>(
    entry: &'a GeneratorEntry,
    localizer: &Localizer,
) -> Vec<Question<'a>> {
    let mut questions = vec![Question::Names {
        message: localizer.translate(&entry.message, &[]),
    }];

    for option in &entry.options {
        let message = localizer.translate(&option.message, &[]);
        match &option.shape {
            OptionShape::Checkbox { choices, default } => {
                let choices = choices
                    .iter()
                    .map(|choice| PromptChoice {
                        value: choice.flag.clone(),
                        label: localizer.translate(&choice.description, &[]),
                        checked: default.contains(&choice.flag),
                    })
                    .collect();
                questions.push(Question::MultiSelect {
                    option,
                    message,
                    choices,
                });
            }
            OptionShape::List { choices, default } => {
                let initial = default
                    .first()
                    .map(String::as_str)
                    .or_else(|| choices.first().map(|choice| choice.flag.as_str()));
                let choices = choices
                    .iter()
                    .map(|choice| PromptChoice {
                        value: choice.flag.clone(),
                        label: localizer.translate(&choice.description, &[]),
                        checked: Some(choice.flag.as_str()) == initial,
                    })
                    .collect();
                questions.push(Question::Select {
                    option,
                    message,
                    choices,
                });
            }
        }
    }

    questions
}

/// Split a raw names answer into trimmed, non-empty names.
pub fn split_names(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// An empty answer is allowed (it yields no names and ends the invocation);
/// a non-empty answer must still contain at least one name after splitting.
pub fn names_answer_valid(raw: &str) -> bool {
    raw.is_empty() || raw.split_whitespace().next().is_some()
}

/// Convert a multi-select answer into the canonical partial flag set.
pub fn checkbox_answer(flags: Vec<String>) -> OptionValue {
    OptionValue::Flags(flags.into_iter().collect::<BTreeSet<_>>())
}

/// Run the prepared questions interactively. Questions whose `when` does
/// not hold for the answers so far are skipped and contribute nothing.
pub fn run_questions(
    questions: &[Question<'_>],
    localizer: &Localizer,
) -> std::io::Result<(Vec<String>, NormalizedArgs)> {
    let mut names = Vec::new();
    let mut answers = NormalizedArgs::new();

    for question in questions {
        match question {
            Question::Names { message } => {
                let invalid = localizer.translate("At least one name is required", &[]);
                let raw: String = cliclack::input(message)
                    .required(false)
                    .validate(move |value: &String| {
                        if names_answer_valid(value) {
                            Ok(())
                        } else {
                            Err(invalid.clone())
                        }
                    })
                    .interact()?;
                names = split_names(&raw);
            }
            Question::MultiSelect {
                option,
                message,
                choices,
            } => {
                if !option.when.ask(&answers) {
                    continue;
                }
                let mut select = cliclack::multiselect::<String>(message).required(false);
                for choice in choices {
                    select = select.item(choice.value.clone(), &choice.label, "");
                }
                let initial: Vec<String> = choices
                    .iter()
                    .filter(|choice| choice.checked)
                    .map(|choice| choice.value.clone())
                    .collect();
                if !initial.is_empty() {
                    select = select.initial_values(initial);
                }
                let chosen = select.interact()?;
                answers.insert(option.name.clone(), checkbox_answer(chosen));
            }
            Question::Select {
                option,
                message,
                choices,
            } => {
                if !option.when.ask(&answers) {
                    continue;
                }
                let mut select = cliclack::select::<String>(message);
                for choice in choices {
                    select = select.item(choice.value.clone(), &choice.label, "");
                }
                if let Some(initial) = choices.iter().find(|choice| choice.checked) {
                    select = select.initial_value(initial.value.clone());
                }
                let value = select.interact()?;
                answers.insert(option.name.clone(), OptionValue::Value(value));
            }
        }
    }

    Ok((names, answers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::OptionSpec;

    fn entry() -> GeneratorEntry {
        GeneratorEntry::new("component", "Component name", |_, _, _, _| {})
            .option(
                OptionSpec::checkbox("extras", "Component extras")
                    .choice("scss", "Add SCSS stylesheet")
                    .choice("test", "Add unit test")
                    .choice("story", "Add Storybook story")
                    .default_flag("scss"),
            )
            .option(
                OptionSpec::list("script", "Source language")
                    .choice("ts", "TypeScript")
                    .choice("js", "JavaScript"),
            )
    }

    #[test]
    fn test_names_question_is_first() {
        let generator = entry();
        let localizer = Localizer::new("en").unwrap();
        let questions = build_questions(&generator, &localizer);

        assert_eq!(questions.len(), 3);
        assert!(matches!(&questions[0], Question::Names { message } if message == "Component name"));
    }

    #[test]
    fn test_checkbox_marks_default_flags_checked() {
        let generator = entry();
        let localizer = Localizer::new("en").unwrap();
        let questions = build_questions(&generator, &localizer);

        let Question::MultiSelect { choices, .. } = &questions[1] else {
            panic!("expected a multi-select question");
        };
        let checked: Vec<(&str, bool)> = choices
            .iter()
            .map(|choice| (choice.value.as_str(), choice.checked))
            .collect();
        assert_eq!(
            checked,
            [("scss", true), ("test", false), ("story", false)]
        );
    }

    #[test]
    fn test_list_falls_back_to_first_choice() {
        let generator = entry();
        let localizer = Localizer::new("en").unwrap();
        let questions = build_questions(&generator, &localizer);

        let Question::Select { choices, .. } = &questions[2] else {
            panic!("expected a select question");
        };
        assert!(choices[0].checked);
        assert!(!choices[1].checked);
    }

    #[test]
    fn test_choice_order_is_declaration_order() {
        let generator = entry();
        let localizer = Localizer::new("en").unwrap();
        let questions = build_questions(&generator, &localizer);

        let Question::MultiSelect { choices, .. } = &questions[1] else {
            panic!("expected a multi-select question");
        };
        let values: Vec<&str> = choices.iter().map(|choice| choice.value.as_str()).collect();
        assert_eq!(values, ["scss", "test", "story"]);
    }

    #[test]
    fn test_split_names_drops_extra_whitespace() {
        assert_eq!(split_names("Button  Card\tModal "), ["Button", "Card", "Modal"]);
        assert!(split_names("").is_empty());
    }

    #[test]
    fn test_names_answer_validation() {
        assert!(names_answer_valid(""));
        assert!(names_answer_valid("Button"));
        assert!(names_answer_valid(" Button "));
        assert!(!names_answer_valid("   "));
        assert!(!names_answer_valid("\t"));
    }

    #[test]
    fn test_checkbox_answer_builds_partial_flag_set() {
        let OptionValue::Flags(flags) =
            checkbox_answer(vec!["test".to_string(), "scss".to_string()])
        else {
            panic!("expected a flag set");
        };
        assert!(flags.contains("scss"));
        assert!(flags.contains("test"));
        assert!(!flags.contains("story"));
        assert_eq!(flags.len(), 2);
    }

    #[test]
    fn test_empty_checkbox_answer_is_empty_set() {
        assert_eq!(checkbox_answer(Vec::new()), OptionValue::Flags(Default::default()));
    }
}
