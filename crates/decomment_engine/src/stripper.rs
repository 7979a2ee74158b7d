/* 📖 # How does comment stripping work?

The stripper is a byte scanner with four flags: inside a block comment, inside a string,
inside a character literal, and "previous byte was an escaping backslash". Comment
delimiters are only recognised when the scanner is outside all three kinds of region, so
`"// not a comment"` survives. A line comment is dropped up to, but not including, its
newline, which keeps line structure intact. A block comment is dropped together with both
of its delimiters. Only `"` and `'` delimit strings; backticks, raw strings and heredocs
are not understood.

All delimiters are ASCII, so every cut lands on a UTF-8 boundary.
*/

use tracing::{debug, instrument};

use crate::language::LanguageRules;

/// Result of stripping comments from a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripOutcome {
    /// The source with all comments removed.
    pub output: String,
    /// Number of comments (line or block) that were removed.
    pub comments_removed: usize,
}

impl StripOutcome {
    pub fn comments_found(&self) -> bool {
        self.comments_removed > 0
    }
}

#[derive(Debug, Default)]
struct ScanState {
    in_comment: bool,
    in_string: bool,
    in_char: bool,
    escape: bool,
}

impl ScanState {
    fn in_code(&self) -> bool {
        !self.in_comment && !self.in_string && !self.in_char
    }
}

fn delimiter_at(source: &[u8], position: usize, delimiter: &str) -> bool {
    !delimiter.is_empty() && source[position..].starts_with(delimiter.as_bytes())
}

/// Removes every comment described by `rules` from `source`.
#[instrument(
    level = "debug",
    skip(source, rules),
    fields(language = %rules.name, len = source.len())
)]
pub fn strip_comments(source: &str, rules: &LanguageRules) -> StripOutcome {
    let bytes = source.as_bytes();
    let mut output = Vec::with_capacity(bytes.len());
    let mut state = ScanState::default();
    let mut comments_removed = 0;
    let mut i = 0;

    while i < bytes.len() {
        if state.in_code() {
            if delimiter_at(bytes, i, &rules.multi_start) {
                state.in_comment = true;
                comments_removed += 1;
                i += rules.multi_start.len();
                continue;
            }
            if delimiter_at(bytes, i, &rules.single_line) {
                comments_removed += 1;
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                if i < bytes.len() {
                    output.push(b'\n');
                }
                i += 1;
                continue;
            }
        }

        let byte = bytes[i];
        if !state.in_comment && !state.escape {
            if byte == b'"' && !state.in_char {
                state.in_string = !state.in_string;
            } else if byte == b'\'' && !state.in_string {
                state.in_char = !state.in_char;
            }
        }
        state.escape = (state.in_string || state.in_char) && byte == b'\\' && !state.escape;

        if !state.in_comment {
            output.push(byte);
        } else if delimiter_at(bytes, i, &rules.multi_end) {
            state.in_comment = false;
            i += rules.multi_end.len();
            continue;
        }
        i += 1;
    }

    if state.in_comment {
        debug!("block comment was not terminated before end of input");
    }
    debug!(comments_removed, "stripped comments");

    let output = match String::from_utf8(output) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    StripOutcome {
        output,
        comments_removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageRegistry;
    use decomment_base::FilePath;

    fn strip(file: &str, source: &str) -> StripOutcome {
        let registry = LanguageRegistry::builtin();
        let rules = registry.detect(&FilePath::from(file)).unwrap();
        strip_comments(source, rules)
    }

    const GREETER_JS: &str = r#"// Single-line comment in JavaScript
/*
Multi-line comment in JavaScript.
It can span multiple lines and
is useful for explaining complex logic.
*/
let message = "Hello, world!"; // This is a single-line comment

/**
 * Function to display a greeting
 * @param {string} name - The name to greet
 */
function greet(name) {
  // Single-line comment inside function
  /* Multi-line comment explaining the code */
  console.log(`Hello, ${name}!`);
}

// Execute the function
greet("World");
"#;

    #[test]
    fn test_strip_greeter_script() {
        let outcome = strip("greeter.js", GREETER_JS);
        assert_eq!(outcome.comments_removed, 7);
        assert_eq!(
            outcome.output,
            concat!(
                "\n",
                "\n",
                "let message = \"Hello, world!\"; \n",
                "\n",
                "\n",
                "function greet(name) {\n",
                "  \n",
                "  \n",
                "  console.log(`Hello, ${name}!`);\n",
                "}\n",
                "\n",
                "\n",
                "greet(\"World\");\n",
            )
        );
    }

    #[test]
    fn test_no_comments_leaves_source_untouched() {
        let source = "int main(void) {\n    return 0;\n}\n";
        let outcome = strip("main.c", source);
        assert!(!outcome.comments_found());
        assert_eq!(outcome.output, source);
    }

    #[test]
    fn test_delimiters_inside_strings_are_kept() {
        let outcome = strip("a.c", "char *s = \"// not /* a comment */\"; // real");
        assert_eq!(outcome.output, "char *s = \"// not /* a comment */\"; ");
        assert_eq!(outcome.comments_removed, 1);
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let outcome = strip("a.c", "s = \"a \\\" // b\"; // c\n");
        assert_eq!(outcome.output, "s = \"a \\\" // b\"; \n");
    }

    #[test]
    fn test_escaped_backslash_ends_escape() {
        let outcome = strip("a.c", "s = \"a\\\\\"; // c");
        assert_eq!(outcome.output, "s = \"a\\\\\"; ");
    }

    #[test]
    fn test_double_quote_inside_char_literal() {
        let outcome = strip("a.c", "char q = '\"'; // quote\nint x; /* y */\n");
        assert_eq!(outcome.output, "char q = '\"'; \nint x; \n");
        assert_eq!(outcome.comments_removed, 2);
    }

    #[test]
    fn test_unterminated_block_comment_swallows_rest() {
        let outcome = strip("a.c", "int a; /* open\nint b;\n");
        assert_eq!(outcome.output, "int a; ");
        assert!(outcome.comments_found());
    }

    #[test]
    fn test_line_comment_at_end_without_newline() {
        let outcome = strip("a.c", "x = 1; // trailing");
        assert_eq!(outcome.output, "x = 1; ");
    }

    #[test]
    fn test_python_hash_comments() {
        let outcome = strip("tool.py", "x = 1  # note\ny = '#'\nz = \"# kept\"\n");
        assert_eq!(outcome.output, "x = 1  \ny = '#'\nz = \"# kept\"\n");
        assert_eq!(outcome.comments_removed, 1);
    }

    #[test]
    fn test_ruby_begin_end_block() {
        let outcome = strip("gem.rb", "a = 1\n=begin\ndoc\n=end\nb = 2 # two\n");
        assert_eq!(outcome.output, "a = 1\n\nb = 2 \n");
        assert_eq!(outcome.comments_removed, 2);
    }

    #[test]
    fn test_markup_comments() {
        let outcome = strip("page.html", "<p>hi</p><!-- note -->\n<!--\nblock\n--><br>\n");
        assert_eq!(outcome.output, "<p>hi</p>\n<br>\n");
    }

    #[test]
    fn test_css_has_no_line_comments() {
        let outcome = strip("site.css", "a { color: red; } // kept\n/* gone */b {}\n");
        assert_eq!(outcome.output, "a { color: red; } // kept\nb {}\n");
    }

    #[test]
    fn test_unicode_survives() {
        let outcome = strip("a.js", "// 世界\nlet s = \"世界\"; /* ünïcode */\n");
        assert_eq!(outcome.output, "\nlet s = \"世界\"; \n");
    }

    #[test]
    fn test_line_comment_drops_carriage_return() {
        let outcome = strip("a.c", "a; // c\r\nb;\r\n");
        assert_eq!(outcome.output, "a; \nb;\r\n");
    }
}
