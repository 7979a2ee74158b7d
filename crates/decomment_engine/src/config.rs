use serde::Deserialize;
use tracing::{debug, instrument};

use decomment_base::{DecommentError, DecommentResult, ErrorKind, FilePath, PalHandle, ResultExt};

use crate::diff::DEFAULT_CONTEXT_LINES;
use crate::language::{LanguageRegistry, LanguageRules, normalize_extension};

/// File looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "decomment.toml";

/// Suffix inserted before the extension of the stripped copy.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_1";

/// Settings for the strip workflow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Suffix for the stripped copy, `a.c` becomes `a<suffix>.c`.
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
    /// Unchanged lines shown around each change in the diff.
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
    /// Extra languages, consulted after the built-in ones.
    #[serde(default, rename = "language")]
    pub languages: Vec<LanguageRules>,
}

fn default_output_suffix() -> String {
    DEFAULT_OUTPUT_SUFFIX.to_string()
}

fn default_context_lines() -> usize {
    DEFAULT_CONTEXT_LINES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_suffix: default_output_suffix(),
            context_lines: default_context_lines(),
            languages: Vec::new(),
        }
    }
}

fn config_error(message: impl Into<String>) -> Box<DecommentError> {
    Box::new(DecommentError::new(ErrorKind::Config {
        message: message.into(),
    }))
}

impl Config {
    /// Parses and validates a TOML document.
    pub fn from_toml(text: &str) -> DecommentResult<Self> {
        let mut config: Config = toml::from_str(text).map_err(|e| config_error(e.message()))?;
        config.validate()?;
        for language in &mut config.languages {
            language.extensions = language
                .extensions
                .iter()
                .map(|ext| normalize_extension(ext))
                .collect();
        }
        Ok(config)
    }

    fn validate(&self) -> DecommentResult<()> {
        if self.output_suffix.is_empty() {
            return Err(config_error("output_suffix must not be empty"));
        }
        for language in &self.languages {
            let name = &language.name;
            if language.extensions.iter().all(|ext| ext.trim_start_matches('.').is_empty()) {
                return Err(config_error(format!(
                    "language '{name}' needs at least one extension"
                )));
            }
            if language.multi_start.is_empty() != language.multi_end.is_empty() {
                return Err(config_error(format!(
                    "language '{name}' must set both multi_start and multi_end, or neither"
                )));
            }
            if language.single_line.is_empty() && language.multi_start.is_empty() {
                return Err(config_error(format!(
                    "language '{name}' defines no comment delimiters"
                )));
            }
        }
        Ok(())
    }

    /// Built-in languages followed by the configured ones.
    pub fn registry(&self) -> LanguageRegistry {
        LanguageRegistry::builtin().with_languages(self.languages.iter().cloned())
    }
}

/// Loads and validates the configuration file at `path`.
#[instrument(skip(pal), fields(path = %path))]
pub fn load_config(pal: &PalHandle, path: &FilePath) -> DecommentResult<Config> {
    let text = pal.read_file_to_string(path)?;
    Config::from_toml(&text).with_context(|| format!("Failed to load config from {}", path))
}

/// Loads `explicit` if given, otherwise `decomment.toml` if it exists, otherwise defaults.
pub fn resolve_config(pal: &PalHandle, explicit: Option<&FilePath>) -> DecommentResult<Config> {
    if let Some(path) = explicit {
        return load_config(pal, path);
    }
    let default_path = FilePath::from(DEFAULT_CONFIG_FILE);
    if pal.file_exists(&default_path)? {
        return load_config(pal, &default_path);
    }
    debug!("no config file found, using defaults");
    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use decomment_base::MockPal;

    fn pal_with_config(path: &str, text: &str) -> PalHandle {
        let mock = MockPal::new();
        mock.add_file(FilePath::from(path), text.as_bytes().to_vec());
        PalHandle::new(mock)
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output_suffix, "_1");
        assert_eq!(config.context_lines, 3);
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r##"
output_suffix = ".stripped"
context_lines = 1

[[language]]
name = "lisp"
single_line = ";"
multi_start = "#|"
multi_end = "|#"
extensions = ["lisp", ".el"]
"##,
        )
        .unwrap();
        assert_eq!(config.output_suffix, ".stripped");
        assert_eq!(config.context_lines, 1);
        assert_eq!(
            config.languages,
            vec![LanguageRules::new("lisp", ";", "#|", "|#", &[".lisp", ".el"])]
        );
        let registry = config.registry();
        let rules = registry.detect(&FilePath::from("init.EL")).unwrap();
        assert_eq!(rules.name, "lisp");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_toml("suffix = \"_x\"").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Config { .. }));
        assert!(err.to_string().contains("suffix"), "{err}");
    }

    #[test]
    fn test_empty_suffix_is_rejected() {
        let err = Config::from_toml("output_suffix = \"\"").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: output_suffix must not be empty"
        );
    }

    #[test]
    fn test_language_validation() {
        let missing_end = "[[language]]\nname = \"x\"\nmulti_start = \"{-\"\nextensions = [\"hs\"]\n";
        let err = Config::from_toml(missing_end).unwrap_err();
        assert!(err.to_string().contains("both multi_start and multi_end"));

        let no_delimiters = "[[language]]\nname = \"x\"\nextensions = [\"x\"]\n";
        let err = Config::from_toml(no_delimiters).unwrap_err();
        assert!(err.to_string().contains("no comment delimiters"));

        let no_extensions = "[[language]]\nname = \"x\"\nsingle_line = \"--\"\nextensions = []\n";
        let err = Config::from_toml(no_extensions).unwrap_err();
        assert!(err.to_string().contains("at least one extension"));
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let pal = pal_with_config("custom.toml", "context_lines = 7");
        let config = resolve_config(&pal, Some(&FilePath::from("custom.toml"))).unwrap();
        assert_eq!(config.context_lines, 7);
    }

    #[test]
    fn test_resolve_missing_explicit_path_fails() {
        let pal = PalHandle::new(MockPal::new());
        let err = resolve_config(&pal, Some(&FilePath::from("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_resolve_falls_back_to_default_file_then_defaults() {
        let pal = pal_with_config(DEFAULT_CONFIG_FILE, "output_suffix = \"_clean\"");
        assert_eq!(resolve_config(&pal, None).unwrap().output_suffix, "_clean");

        let empty = PalHandle::new(MockPal::new());
        assert_eq!(resolve_config(&empty, None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_error_names_the_file() {
        let pal = pal_with_config(DEFAULT_CONFIG_FILE, "context_lines = \"many\"");
        let err = resolve_config(&pal, None).unwrap_err();
        assert!(
            err.to_string()
                .starts_with("Failed to load config from decomment.toml: Invalid configuration:"),
            "{err}"
        );
    }
}
