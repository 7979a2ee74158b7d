/* 📖 # What does a strip session do?

A session takes one file from source to decision:

1. detect the language from the extension
2. strip comments into a sibling copy (`a.c` -> `a_1.c`)
3. show a unified diff of the change
4. ask whether to replace the original

Accepting renames the copy over the original in one step, so the original is never
missing. Declining deletes the copy. A file without comments produces no copy at all.
*/

use std::io::Write;

use tracing::{debug, info, instrument};

use decomment_base::{DecommentError, DecommentResult, ErrorKind, FilePath, PalHandle, ResultExt};

use crate::config::Config;
use crate::diff::{ColorMode, colorize_diff, unified_diff};
use crate::stripper::strip_comments;

pub const REPLACE_PROMPT: &str = "\nReplace original file? [Y/n] ";
pub const NO_COMMENTS_MESSAGE: &str = "No comments found in the code.";

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripReport {
    /// The original file now holds the stripped text.
    Replaced { path: FilePath, comments_removed: usize },
    /// The user declined; the stripped copy was deleted.
    Discarded { temp_path: FilePath },
    /// Nothing to strip; no file was written.
    NoComments,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StripOptions {
    /// Replace without asking.
    pub assume_yes: bool,
    pub color: ColorMode,
}

/// Path of the stripped copy: `suffix` goes before the last `.` of the file name,
/// or at the end when the name has no extension.
pub fn stripped_path(path: &FilePath, suffix: &str) -> FilePath {
    let file_name = path.file_name().unwrap_or_default();
    let new_name = match file_name.rfind('.') {
        Some(dot) if dot > 0 => {
            format!("{}{}{}", &file_name[..dot], suffix, &file_name[dot..])
        }
        _ => format!("{file_name}{suffix}"),
    };
    path.with_file_name(&new_name)
}

/// Interprets the answer to the replace prompt. The default is yes; end of input is no.
pub fn accepts_replacement(answer: Option<&str>) -> bool {
    match answer {
        None => false,
        Some(line) => match line.trim().chars().next() {
            None => true,
            Some(first) => first.eq_ignore_ascii_case(&'y'),
        },
    }
}

fn write_stripped_copy(pal: &PalHandle, path: &FilePath, text: &str) -> DecommentResult<()> {
    let mut writer = pal.create_file(path)?;
    writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| Box::new(DecommentError::file_error(path.as_path(), e)))
}

/// Runs the full strip workflow for one file.
#[instrument(skip(pal, config, options), fields(path = %path))]
pub fn strip_file(
    pal: &PalHandle,
    config: &Config,
    path: &FilePath,
    options: &StripOptions,
) -> DecommentResult<StripReport> {
    let registry = config.registry();
    let rules = registry.detect(path).ok_or_else(|| {
        Box::new(DecommentError::new(ErrorKind::UnsupportedFileType {
            path: path.as_path().to_path_buf(),
        }))
    })?;
    debug!(language = %rules.name, "detected language");

    let source = pal
        .read_file_to_string(path)
        .context("Error reading input file")?;
    let outcome = strip_comments(&source, rules);

    if !outcome.comments_found() {
        pal.write_stdout(&format!("{NO_COMMENTS_MESSAGE}\n"))?;
        return Ok(StripReport::NoComments);
    }

    let temp_path = stripped_path(path, &config.output_suffix);
    write_stripped_copy(pal, &temp_path, &outcome.output)
        .context("Error writing output file")?;
    info!(temp = %temp_path, comments = outcome.comments_removed, "wrote stripped copy");

    let diff = unified_diff(
        &source,
        &outcome.output,
        &path.to_string(),
        &temp_path.to_string(),
        config.context_lines,
    );
    pal.write_stdout(&colorize_diff(&diff, options.color))?;

    let accepted = if options.assume_yes {
        true
    } else {
        pal.write_stdout(REPLACE_PROMPT)?;
        let answer = pal.read_stdin_line()?;
        accepts_replacement(answer.as_deref())
    };

    if accepted {
        pal.rename_file(&temp_path, path)
            .context("Error replacing original file")?;
        pal.write_stdout("File successfully replaced.\n")?;
        info!("original replaced");
        Ok(StripReport::Replaced {
            path: path.clone(),
            comments_removed: outcome.comments_removed,
        })
    } else {
        pal.remove_file(&temp_path)
            .context("Error removing temporary file")?;
        pal.write_stdout(&format!("Temporary file removed: {}\n", temp_path))?;
        info!("stripped copy discarded");
        Ok(StripReport::Discarded { temp_path })
    }
}
