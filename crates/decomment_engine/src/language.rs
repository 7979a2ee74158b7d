use decomment_base::FilePath;
use serde::Deserialize;

/// Comment delimiters for one family of languages.
///
/// An empty delimiter means the language has no comment of that form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageRules {
    pub name: String,
    #[serde(default)]
    pub single_line: String,
    #[serde(default)]
    pub multi_start: String,
    #[serde(default)]
    pub multi_end: String,
    /// File extensions including the leading dot, e.g. `.c`.
    pub extensions: Vec<String>,
}

impl LanguageRules {
    pub fn new(
        name: &str,
        single_line: &str,
        multi_start: &str,
        multi_end: &str,
        extensions: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            single_line: single_line.to_string(),
            multi_start: multi_start.to_string(),
            multi_end: multi_end.to_string(),
            extensions: extensions.iter().map(|ext| normalize_extension(ext)).collect(),
        }
    }

    /// Whether `extension` (with or without the leading dot) belongs to this language.
    /// Comparison ignores ASCII case.
    pub fn matches_extension(&self, extension: &str) -> bool {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        self.extensions.iter().any(|known| {
            known
                .strip_prefix('.')
                .unwrap_or(known)
                .eq_ignore_ascii_case(extension)
        })
    }
}

/// Adds the leading dot if missing.
pub(crate) fn normalize_extension(extension: &str) -> String {
    if extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{extension}")
    }
}

/// The built-in language table. Order matters: the first match wins.
pub fn builtin_languages() -> Vec<LanguageRules> {
    vec![
        LanguageRules::new(
            "c",
            "//",
            "/*",
            "*/",
            &[".c", ".h", ".cpp", ".hpp", ".cs", ".java", ".js"],
        ),
        LanguageRules::new("python", "#", "", "", &[".py"]),
        LanguageRules::new("shell", "#", "", "", &[".sh", ".bash"]),
        LanguageRules::new("ruby", "#", "=begin", "=end", &[".rb"]),
        LanguageRules::new("perl", "#", "=pod", "=cut", &[".pl"]),
        LanguageRules::new("markup", "", "<!--", "-->", &[".html", ".htm", ".xml", ".xhtml"]),
        LanguageRules::new("css", "", "/*", "*/", &[".css"]),
        LanguageRules::new("php", "//", "/*", "*/", &[".php"]),
    ]
}

/// Ordered collection of language rules used for detection.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: Vec<LanguageRules>,
}

impl LanguageRegistry {
    pub fn builtin() -> Self {
        Self {
            languages: builtin_languages(),
        }
    }

    /// Appends languages after the existing ones, so earlier entries keep priority.
    pub fn with_languages(mut self, extra: impl IntoIterator<Item = LanguageRules>) -> Self {
        self.languages.extend(extra);
        self
    }

    pub fn languages(&self) -> &[LanguageRules] {
        &self.languages
    }

    /// Finds the rules for a file by the extension of its final path component.
    pub fn detect(&self, path: &FilePath) -> Option<&LanguageRules> {
        let extension = path.extension()?;
        self.languages
            .iter()
            .find(|rules| rules.matches_extension(extension))
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
