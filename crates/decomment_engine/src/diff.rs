use owo_colors::{OwoColorize, Stream};
use similar::TextDiff;

/// Default number of unchanged lines shown around each change.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// When to emit ANSI colors in rendered diffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Color only if stdout is a terminal that supports it.
    #[default]
    Auto,
    Always,
    Never,
}

/// Renders a unified diff between the original and the stripped text.
///
/// Returns an empty string when both texts are equal.
pub fn unified_diff(
    original: &str,
    stripped: &str,
    old_label: &str,
    new_label: &str,
    context_lines: usize,
) -> String {
    TextDiff::from_lines(original, stripped)
        .unified_diff()
        .context_radius(context_lines)
        .header(old_label, new_label)
        .to_string()
}

fn paint(line: &str, mode: ColorMode, style: fn(&str) -> String) -> String {
    match mode {
        ColorMode::Never => line.to_string(),
        ColorMode::Always => style(line),
        ColorMode::Auto => line
            .if_supports_color(Stream::Stdout, |text| style(text))
            .to_string(),
    }
}

/// Colors a unified diff the way `diff --color` does: removals red, additions green,
/// hunk headers cyan, file headers bold.
pub fn colorize_diff(diff: &str, mode: ColorMode) -> String {
    let mut colored = String::with_capacity(diff.len());
    for (index, line) in diff.split_inclusive('\n').enumerate() {
        let (text, newline) = match line.strip_suffix('\n') {
            Some(text) => (text, "\n"),
            None => (line, ""),
        };
        // Only the two leading lines are file headers; later `---` lines are removals.
        let is_header = index < 2 && (text.starts_with("---") || text.starts_with("+++"));
        let painted = if is_header {
            paint(text, mode, |t| t.bold().to_string())
        } else if text.starts_with("@@") {
            paint(text, mode, |t| t.cyan().to_string())
        } else if text.starts_with('-') {
            paint(text, mode, |t| t.red().to_string())
        } else if text.starts_with('+') {
            paint(text, mode, |t| t.green().to_string())
        } else {
            text.to_string()
        };
        colored.push_str(&painted);
        colored.push_str(newline);
    }
    colored
}
