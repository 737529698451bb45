//! Locale catalogs and message lookup
//!
//! Catalog state is owned by the [`Localizer`] instance rather than held in a
//! process-wide global, so independent toolkit instances (and tests) never
//! interfere with each other.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Locale consulted when the active locale lacks a key.
const DEFAULT_LOCALE: &str = "en";

/// A flat locale file: message key to template string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
struct CatalogFile(HashMap<String, String>);

/// Failures while loading a locale catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read locale file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("locale file {path} is not a flat JSON object of strings")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Message-key lookup with positional `%s` substitution.
pub struct Localizer {
    catalogs: HashMap<String, HashMap<String, String>>,
    active: String,
}

impl Localizer {
    /// Create a localizer with the built-in catalogs and `locale` active.
    pub fn new(locale: &str) -> Result<Self, CatalogError> {
        let mut catalogs = HashMap::new();
        for (code, raw) in [
            ("en", include_str!("../locales/en.json")),
            ("ru", include_str!("../locales/ru.json")),
        ] {
            let CatalogFile(entries) =
                serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
                    path: format!("built-in:{code}"),
                    source,
                })?;
            catalogs.insert(code.to_string(), entries);
        }

        Ok(Self {
            catalogs,
            active: locale.to_string(),
        })
    }

    /// Switch the active locale selector.
    pub fn set_locale(&mut self, locale: &str) {
        self.active = locale.to_string();
    }

    pub fn active_locale(&self) -> &str {
        &self.active
    }

    /// Additively overlay `entries` onto the catalog for `locale`.
    /// New keys win over existing ones; untouched keys are preserved.
    pub fn merge(&mut self, locale: &str, entries: HashMap<String, String>) {
        self.catalogs
            .entry(locale.to_string())
            .or_default()
            .extend(entries);
    }

    /// Merge a flat JSON catalog file from disk into `locale`.
    pub fn merge_file(&mut self, locale: &str, path: &Path) -> Result<(), CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let CatalogFile(entries) =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        self.merge(locale, entries);
        Ok(())
    }

    /// Resolve `key` in the active locale, falling back to the default
    /// locale and finally to the key itself, then substitute `%s`
    /// placeholders positionally from `args`.
    pub fn translate(&self, key: &str, args: &[&str]) -> String {
        let template = self
            .catalogs
            .get(&self.active)
            .and_then(|catalog| catalog.get(key))
            .or_else(|| {
                self.catalogs
                    .get(DEFAULT_LOCALE)
                    .and_then(|catalog| catalog.get(key))
            })
            .map(String::as_str)
            .unwrap_or(key);

        substitute(template, args)
    }
}

/// `%s`-style positional substitution. Placeholders beyond the argument list
/// are left verbatim; surplus arguments are ignored.
fn substitute(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();

    while let Some(position) = rest.find("%s") {
        let Some(arg) = args.next() else { break };
        out.push_str(&rest[..position]);
        out.push_str(arg);
        rest = &rest[position + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn localizer(locale: &str) -> Localizer {
        Localizer::new(locale).unwrap()
    }

    #[test]
    fn test_translate_substitutes_positionally() {
        let l = localizer("en");
        assert_eq!(
            l.translate("File '%s' already exists", &["Button.vue"]),
            "File 'Button.vue' already exists"
        );
    }

    #[test]
    fn test_translate_uses_active_locale() {
        let l = localizer("ru");
        assert_eq!(
            l.translate("Template '%s' not found", &["x.tpl"]),
            "Шаблон 'x.tpl' не найден"
        );
    }

    #[test]
    fn test_translate_falls_back_to_default_locale() {
        let mut l = localizer("ru");
        l.merge(
            "en",
            HashMap::from([("only english".to_string(), "english text".to_string())]),
        );
        assert_eq!(l.translate("only english", &[]), "english text");
    }

    #[test]
    fn test_translate_falls_back_to_key() {
        let l = localizer("en");
        assert_eq!(
            l.translate("Component '%s' removed", &["Card"]),
            "Component 'Card' removed"
        );
    }

    #[test]
    fn test_unfilled_placeholders_stay_verbatim() {
        let l = localizer("en");
        assert_eq!(l.translate("a %s b %s", &["1"]), "a 1 b %s");
        assert_eq!(l.translate("plain", &["ignored"]), "plain");
    }

    #[test]
    fn test_set_locale_switches_catalog() {
        let mut l = localizer("en");
        l.set_locale("ru");
        assert_eq!(l.active_locale(), "ru");
        assert_eq!(
            l.translate("File '%s' successfully created", &["a"]),
            "Файл 'a' успешно создан"
        );
    }

    #[test]
    fn test_merge_overlays_and_preserves() {
        let mut l = localizer("ru");
        l.merge(
            "ru",
            HashMap::from([
                (
                    "Template '%s' not found".to_string(),
                    "Нет шаблона '%s'".to_string(),
                ),
                ("custom key".to_string(), "своё значение".to_string()),
            ]),
        );
        // Overwritten by the merge
        assert_eq!(l.translate("Template '%s' not found", &["t"]), "Нет шаблона 't'");
        // Added by the merge
        assert_eq!(l.translate("custom key", &[]), "своё значение");
        // Untouched built-in key survives
        assert_eq!(
            l.translate("File '%s' already exists", &["f"]),
            "Файл 'f' уже существует"
        );
    }

    #[test]
    fn test_merge_file_reads_flat_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"greeting": "привет, %s"}}"#).unwrap();

        let mut l = localizer("ru");
        l.merge_file("ru", file.path()).unwrap();
        assert_eq!(l.translate("greeting", &["мир"]), "привет, мир");
    }

    #[test]
    fn test_merge_file_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let mut l = localizer("ru");
        let err = l.merge_file("ru", file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn test_merge_file_reports_missing_file() {
        let mut l = localizer("ru");
        let err = l
            .merge_file("ru", Path::new("/nonexistent/locale.json"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
