//! Context-bound filesystem operations with localized reporting
//!
//! A [`Workspace`] binds the effective context root of one generator
//! invocation to a messenger. Every operation resolves its paths against
//! that root, performs a single filesystem action and reports the outcome.
//! Failures are reported once and abort only the call that produced them;
//! nothing here returns an error to the caller.

use crate::message::{MessageOptions, Messenger};
use std::fs;
use std::path::{Path, PathBuf};

/// Final path segment with leading underscores stripped, used for display.
pub fn clean_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default()
        .trim_start_matches('_')
        .to_string()
}

/// Slash-normalized path for message output.
fn display_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

/// Collapse every run of two or more consecutive newlines into one.
fn squash_blank_lines(contents: &str) -> String {
    let mut out = String::with_capacity(contents.len());
    let mut in_newlines = false;
    for ch in contents.chars() {
        if ch == '\n' {
            if !in_newlines {
                out.push('\n');
            }
            in_newlines = true;
        } else {
            in_newlines = false;
            out.push(ch);
        }
    }
    out
}

/// Options for [`Workspace::make_file`].
pub struct MakeFile {
    template_path: PathBuf,
    file_path: PathBuf,
    replacements: Vec<(String, String)>,
    entity: String,
}

impl MakeFile {
    pub fn new(template_path: impl Into<PathBuf>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            file_path: file_path.into(),
            replacements: Vec::new(),
            entity: "File".to_string(),
        }
    }

    /// Append a literal substitution; pairs apply in order and later pairs
    /// see the result of earlier ones.
    pub fn replace(mut self, search: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.replacements.push((search.into(), replacement.into()));
        self
    }

    /// Entity name used in the outcome messages.
    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = entity.into();
        self
    }
}

/// One step of [`Workspace::update_file`].
pub struct UpdateReplacement {
    needle: Option<String>,
    replacement: String,
    skip_if: Option<String>,
}

impl UpdateReplacement {
    /// Replace all literal occurrences of `needle`.
    pub fn replace(needle: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            needle: Some(needle.into()),
            replacement: replacement.into(),
            skip_if: None,
        }
    }

    /// Append `replacement` to the end of the file.
    pub fn append(replacement: impl Into<String>) -> Self {
        Self {
            needle: None,
            replacement: replacement.into(),
            skip_if: None,
        }
    }

    /// Skip this step when the content already contains `marker`.
    pub fn skip_if(mut self, marker: impl Into<String>) -> Self {
        self.skip_if = Some(marker.into());
        self
    }
}

/// Options for [`Workspace::update_file`].
pub struct UpdateFile {
    file_path: PathBuf,
    replacements: Vec<UpdateReplacement>,
}

impl UpdateFile {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            replacements: Vec::new(),
        }
    }

    /// Append a step; steps apply in order against the accumulated content.
    pub fn replacement(mut self, replacement: UpdateReplacement) -> Self {
        self.replacements.push(replacement);
        self
    }
}

/// Filesystem operations bound to the context root of one invocation.
pub struct Workspace<'a> {
    context: PathBuf,
    messenger: &'a Messenger<'a>,
}

impl<'a> Workspace<'a> {
    pub fn new(context: impl Into<PathBuf>, messenger: &'a Messenger<'a>) -> Self {
        Self {
            context: context.into(),
            messenger,
        }
    }

    /// The context root of this invocation.
    pub fn context(&self) -> &Path {
        &self.context
    }

    pub fn messenger(&self) -> &Messenger<'a> {
        self.messenger
    }

    /// Join path fragments onto the context root. The context is read,
    /// never mutated.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.context.join(path)
    }

    /// Create a directory (with missing ancestors) and report the outcome.
    /// `child` moves the messages one nesting level deeper and adds the
    /// full-path line; it does not change filesystem behavior.
    pub fn make_directory(&self, path: impl AsRef<Path>, child: bool, entity: &str) {
        let directory = self.resolve(path);
        let name = clean_name(&directory);
        let depth = usize::from(child);

        if directory.exists() {
            self.messenger.error(
                &format!("{entity} '%s' already exists"),
                MessageOptions::depth(depth),
                &[&name],
            );
            if child {
                self.messenger.error(
                    "%s",
                    MessageOptions::depth(depth + 1),
                    &[&display_path(&directory)],
                );
            }
            return;
        }

        match fs::create_dir_all(&directory) {
            Ok(()) => {
                self.messenger.success(
                    &format!("{entity} '%s' successfully created"),
                    MessageOptions::depth(depth),
                    &[&name],
                );
                if child {
                    self.messenger.success(
                        "%s",
                        MessageOptions::depth(depth + 1),
                        &[&display_path(&directory)],
                    );
                }
            }
            Err(_) => {
                self.messenger.error(
                    &format!("Unable to create {} '%s'", entity.to_lowercase()),
                    MessageOptions::depth(depth),
                    &[&name],
                );
            }
        }
    }

    /// Instantiate a file from a template with literal substitutions.
    /// Never overwrites an existing target.
    pub fn make_file(&self, options: MakeFile) {
        let template = self.resolve(&options.template_path);
        let file = self.resolve(&options.file_path);
        let name = clean_name(&file);

        let Ok(contents) = fs::read_to_string(&template) else {
            self.messenger.error(
                "Template '%s' not found",
                MessageOptions::depth(1),
                &[&display_path(&template)],
            );
            return;
        };

        let contents = options
            .replacements
            .iter()
            .fold(contents, |acc, (search, replacement)| {
                acc.replace(search.as_str(), replacement)
            });
        let contents = format!("{}\n", squash_blank_lines(&contents).trim());

        if file.exists() {
            self.messenger.error(
                &format!("{} '%s' already exists", options.entity),
                MessageOptions::depth(1),
                &[&name],
            );
            self.messenger
                .error("%s", MessageOptions::depth(2), &[&display_path(&file)]);
            return;
        }

        let written = file
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| fs::write(&file, &contents));
        match written {
            Ok(()) => {
                self.messenger.success(
                    &format!("{} '%s' successfully created", options.entity),
                    MessageOptions::depth(1),
                    &[&name],
                );
                self.messenger
                    .success("%s", MessageOptions::depth(2), &[&display_path(&file)]);
            }
            Err(_) => {
                self.messenger.error(
                    &format!("Unable to create {} '%s'", options.entity.to_lowercase()),
                    MessageOptions::depth(1),
                    &[&name],
                );
            }
        }
    }

    /// Apply in-place replacements/appends to an existing file.
    pub fn update_file(&self, options: UpdateFile) {
        let file = self.resolve(&options.file_path);
        let name = clean_name(&file);

        let Ok(mut content) = fs::read_to_string(&file) else {
            self.report_locked(&file, &name);
            return;
        };

        for step in &options.replacements {
            if let Some(marker) = &step.skip_if {
                if content.contains(marker.as_str()) {
                    self.messenger.error(
                        "Content to modify already in use in '%s'",
                        MessageOptions::depth(1),
                        &[&name],
                    );
                    self.messenger
                        .error("%s", MessageOptions::depth(2), &[&display_path(&file)]);
                    continue;
                }
            }

            match step.needle.as_deref() {
                Some(needle) if !needle.is_empty() => {
                    content = content.replace(needle, &step.replacement);
                }
                _ => content.push_str(&step.replacement),
            }
        }

        match fs::write(&file, &content) {
            Ok(()) => {
                self.messenger.success(
                    "File '%s' successfully updated",
                    MessageOptions::depth(1),
                    &[&name],
                );
                self.messenger
                    .success("%s", MessageOptions::depth(2), &[&display_path(&file)]);
            }
            Err(_) => self.report_locked(&file, &name),
        }
    }

    fn report_locked(&self, file: &Path, name: &str) {
        self.messenger.error(
            "File '%s' doesn't exists or locked",
            MessageOptions::depth(1),
            &[name],
        );
        self.messenger
            .error("%s", MessageOptions::depth(2), &[&display_path(file)]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Localizer;
    use tempfile::TempDir;

    struct Fixture {
        root: TempDir,
        localizer: Localizer,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                root: TempDir::new().unwrap(),
                localizer: Localizer::new("en").unwrap(),
            }
        }

        fn with<R>(&self, run: impl FnOnce(&Workspace<'_>) -> R) -> (R, Vec<String>) {
            let (messenger, lines) = Messenger::capturing(&self.localizer);
            let workspace = Workspace::new(self.root.path(), &messenger);
            let result = run(&workspace);
            let captured = lines.borrow().clone();
            (result, captured)
        }

        fn write(&self, relative: &str, contents: &str) {
            let path = self.root.path().join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, contents).unwrap();
        }

        fn read(&self, relative: &str) -> String {
            fs::read_to_string(self.root.path().join(relative)).unwrap()
        }

        fn exists(&self, relative: &str) -> bool {
            self.root.path().join(relative).exists()
        }
    }

    #[test]
    fn test_clean_name_strips_leading_underscores() {
        assert_eq!(clean_name(Path::new("src/components/_Button")), "Button");
        assert_eq!(clean_name(Path::new("plain")), "plain");
        assert_eq!(clean_name(Path::new("a/__b.ts")), "b.ts");
    }

    #[test]
    fn test_make_directory_creates_missing_ancestors() {
        let fx = Fixture::new();
        let ((), lines) = fx.with(|ws| ws.make_directory("a/b/c", false, "Directory"));

        assert!(fx.exists("a/b/c"));
        assert_eq!(lines, ["✔︎ Directory 'c' successfully created"]);
    }

    #[test]
    fn test_make_directory_existing_reports_error_once() {
        let fx = Fixture::new();
        fx.write("existing/.keep", "");

        let ((), lines) = fx.with(|ws| ws.make_directory("existing", false, "Directory"));
        assert_eq!(lines, ["✖ Directory 'existing' already exists"]);
    }

    #[test]
    fn test_make_directory_child_adds_path_line() {
        let fx = Fixture::new();
        let ((), lines) = fx.with(|ws| ws.make_directory("nested", true, "Directory"));

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "  - Directory 'nested' successfully created");
        assert!(lines[1].starts_with("  -- "));
        assert!(lines[1].ends_with("/nested"));
    }

    #[test]
    fn test_make_file_applies_replacements_sequentially() {
        let fx = Fixture::new();
        fx.write("tpl.txt", "A");

        let ((), _) = fx.with(|ws| {
            ws.make_file(
                MakeFile::new("tpl.txt", "out.txt")
                    .replace("A", "1")
                    .replace("1", "2"),
            )
        });
        assert_eq!(fx.read("out.txt"), "2\n");
    }

    #[test]
    fn test_make_file_collapses_newline_runs() {
        let fx = Fixture::new();
        fx.write("tpl.txt", "a\n\n\n\nb");

        let ((), _) = fx.with(|ws| ws.make_file(MakeFile::new("tpl.txt", "out.txt")));
        assert_eq!(fx.read("out.txt"), "a\nb\n");
    }

    #[test]
    fn test_make_file_trims_and_ends_with_single_newline() {
        let fx = Fixture::new();
        fx.write("tpl.txt", "\n\n  body  \n\n\n");

        let ((), _) = fx.with(|ws| ws.make_file(MakeFile::new("tpl.txt", "out.txt")));
        assert_eq!(fx.read("out.txt"), "body\n");
    }

    #[test]
    fn test_make_file_never_overwrites() {
        let fx = Fixture::new();
        fx.write("tpl.txt", "new content");
        fx.write("out.txt", "original");

        let ((), lines) = fx.with(|ws| {
            ws.make_file(MakeFile::new("tpl.txt", "out.txt").entity("Component"))
        });

        assert_eq!(fx.read("out.txt"), "original");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "  - Component 'out.txt' already exists");
        assert!(lines[1].starts_with("  -- "));
    }

    #[test]
    fn test_make_file_missing_template_aborts() {
        let fx = Fixture::new();

        let ((), lines) = fx.with(|ws| ws.make_file(MakeFile::new("missing.tpl", "out.txt")));

        assert!(!fx.exists("out.txt"));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("  - Template '"));
        assert!(lines[0].ends_with("' not found"));
    }

    #[test]
    fn test_make_file_creates_parent_directories() {
        let fx = Fixture::new();
        fx.write("tpl.txt", "x");

        let ((), _) = fx.with(|ws| ws.make_file(MakeFile::new("tpl.txt", "deep/nested/out.txt")));
        assert_eq!(fx.read("deep/nested/out.txt"), "x\n");
    }

    #[test]
    fn test_update_file_replaces_all_occurrences() {
        let fx = Fixture::new();
        fx.write("index.ts", "foo bar foo");

        let ((), _) = fx.with(|ws| {
            ws.update_file(
                UpdateFile::new("index.ts").replacement(UpdateReplacement::replace("foo", "baz")),
            )
        });
        assert_eq!(fx.read("index.ts"), "baz bar baz");
    }

    #[test]
    fn test_update_file_appends_without_needle() {
        let fx = Fixture::new();
        fx.write("index.ts", "export {};\n");

        let ((), _) = fx.with(|ws| {
            ws.update_file(
                UpdateFile::new("index.ts")
                    .replacement(UpdateReplacement::append("export * from './card';\n")),
            )
        });
        assert_eq!(fx.read("index.ts"), "export {};\nexport * from './card';\n");
    }

    #[test]
    fn test_update_file_skip_if_skips_only_that_step() {
        let fx = Fixture::new();
        fx.write("index.ts", "marker\nfoo\n");

        let ((), lines) = fx.with(|ws| {
            ws.update_file(
                UpdateFile::new("index.ts")
                    .replacement(UpdateReplacement::append("dup\n").skip_if("marker"))
                    .replacement(UpdateReplacement::replace("foo", "bar")),
            )
        });

        // First step skipped with an error, second still applied.
        assert_eq!(fx.read("index.ts"), "marker\nbar\n");
        assert_eq!(lines[0], "  - Content to modify already in use in 'index.ts'");
        assert!(lines
            .iter()
            .any(|line| line == "  - File 'index.ts' successfully updated"));
    }

    #[test]
    fn test_update_file_missing_reports_locked() {
        let fx = Fixture::new();

        let ((), lines) = fx.with(|ws| ws.update_file(UpdateFile::new("absent.ts")));

        assert!(!fx.exists("absent.ts"));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "  - File 'absent.ts' doesn't exists or locked");
    }

    #[test]
    fn test_resolve_joins_against_context() {
        let fx = Fixture::new();
        let (resolved, _) = fx.with(|ws| ws.resolve("a/b"));
        assert_eq!(resolved, fx.root.path().join("a/b"));
    }
}
