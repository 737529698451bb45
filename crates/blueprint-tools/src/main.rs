//! Blueprint CLI - boilerplate generators for front-end projects

use anyhow::{Context, Result};
use blueprint_core::{
    Blueprint, BlueprintOptions, GeneratorEntry, MakeFile, OptionSpec, Settings, UpdateFile,
    UpdateReplacement,
};
use std::collections::HashMap;
use std::path::PathBuf;

fn settings(entries: &[(&str, &str)]) -> Settings {
    entries
        .iter()
        .map(|(key, value)| {
            (
                key.to_string(),
                serde_json::Value::String(value.to_string()),
            )
        })
        .collect()
}

/// `component <names...>` - a component directory with its source file and
/// optional stylesheet/test/story files.
fn component_generator() -> GeneratorEntry {
    GeneratorEntry::new(
        "component",
        "Component name (split multiple by space)",
        |ws, name, args, settings| {
            let directory = settings
                .get("directory")
                .and_then(|value| value.as_str())
                .unwrap_or("src/components");
            let templates = settings
                .get("templates")
                .and_then(|value| value.as_str())
                .unwrap_or("templates/component");
            let script = args.value("script").unwrap_or("ts");

            ws.make_directory(format!("{directory}/{name}"), false, "Component");
            ws.make_file(
                MakeFile::new(
                    format!("{templates}/component.{script}"),
                    format!("{directory}/{name}/{name}.{script}"),
                )
                .replace("COMPONENT_NAME", name)
                .entity("Component"),
            );

            if args.flag("extras", "scss") {
                ws.make_file(
                    MakeFile::new(
                        format!("{templates}/styles.scss"),
                        format!("{directory}/{name}/{name}.scss"),
                    )
                    .replace("COMPONENT_NAME", name),
                );
            }
            if args.flag("extras", "test") {
                ws.make_file(
                    MakeFile::new(
                        format!("{templates}/component.test.{script}"),
                        format!("{directory}/{name}/{name}.test.{script}"),
                    )
                    .replace("COMPONENT_NAME", name),
                );
            }
            if args.flag("extras", "story") {
                ws.make_file(
                    MakeFile::new(
                        format!("{templates}/component.stories.{script}"),
                        format!("{directory}/{name}/{name}.stories.{script}"),
                    )
                    .replace("COMPONENT_NAME", name),
                );
            }
        },
    )
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
            .choice("js", "JavaScript")
            .default_flag("ts"),
    )
    .settings(settings(&[
        ("directory", "src/components"),
        ("templates", "templates/component"),
    ]))
}

/// `store <names...>` - a store module re-exported from the stores index.
fn store_generator() -> GeneratorEntry {
    GeneratorEntry::new(
        "store",
        "Store name (split multiple by space)",
        |ws, name, _args, settings| {
            let directory = settings
                .get("directory")
                .and_then(|value| value.as_str())
                .unwrap_or("src/stores");
            let template = settings
                .get("template")
                .and_then(|value| value.as_str())
                .unwrap_or("templates/store/store.ts");

            ws.make_file(
                MakeFile::new(template, format!("{directory}/{name}.ts"))
                    .replace("STORE_NAME", name)
                    .entity("Store"),
            );

            let export_line = format!("export * from './{name}';\n");
            ws.update_file(
                UpdateFile::new(format!("{directory}/index.ts")).replacement(
                    UpdateReplacement::append(export_line.clone()).skip_if(export_line),
                ),
            );
        },
    )
    .settings(settings(&[
        ("directory", "src/stores"),
        ("template", "templates/store/store.ts"),
    ]))
}

/// `page <names...>` - a page directory with its entry module. The root
/// directory can be redirected per project via BLUEPRINT_PAGES_ROOT.
fn page_generator() -> GeneratorEntry {
    let mut generator = GeneratorEntry::new(
        "page",
        "Page name (split multiple by space)",
        |ws, name, _args, settings| {
            let directory = settings
                .get("directory")
                .and_then(|value| value.as_str())
                .unwrap_or("src/pages");
            let template = settings
                .get("template")
                .and_then(|value| value.as_str())
                .unwrap_or("templates/page/page.ts");

            ws.make_directory(format!("{directory}/{name}"), true, "Page");
            ws.make_file(
                MakeFile::new(template, format!("{directory}/{name}/index.ts"))
                    .replace("PAGE_NAME", name)
                    .entity("Page"),
            );
        },
    )
    .settings(settings(&[
        ("directory", "src/pages"),
        ("template", "templates/page/page.ts"),
    ]));

    if let Some(root) = std::env::var_os("BLUEPRINT_PAGES_ROOT") {
        generator = generator.context(PathBuf::from(root));
    }
    generator
}

fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let locale = std::env::var("BLUEPRINT_LOCALE").unwrap_or_else(|_| "en".to_string());
    let mut blueprint = Blueprint::new(
        "blueprint-tools",
        BlueprintOptions {
            locale,
            ..Default::default()
        },
    )?;

    let catalog: HashMap<String, String> =
        serde_json::from_str(include_str!("../locales/ru.json"))
            .context("bundled ru catalog is not a flat JSON object")?;
    blueprint.merge_locale("ru", catalog);

    blueprint.add_generator(component_generator())?;
    blueprint.add_generator(store_generator())?;
    blueprint.add_generator(page_generator())?;

    let result = blueprint.run();

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
