use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::{DecommentError, DecommentResult};

use super::FilePath;
use super::traits::Pal;

/// Concrete PAL implementation using the real filesystem and the process' standard streams.
///
/// All file paths are resolved relative to a configured base directory.
#[derive(Debug)]
pub struct RealPal {
    base_dir: PathBuf,
}

impl RealPal {
    /// Create a new RealPal with the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolve a FilePath to a filesystem path under the base directory.
    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        self.base_dir.join(path.as_path())
    }
}

fn file_error(path: PathBuf, source: io::Error) -> Box<DecommentError> {
    debug!(path = %path.display(), error = %source, "file operation failed");
    Box::new(DecommentError::file_error(path, source))
}

impl Pal for RealPal {
    #[instrument(skip(self), fields(path = %path))]
    fn file_exists(&self, path: &FilePath) -> DecommentResult<bool> {
        let resolved = self.resolve_path(path);
        let exists = resolved.is_file();
        debug!(exists, resolved = %resolved.display(), "checked file existence");
        Ok(exists)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn read_file(&self, path: &FilePath) -> DecommentResult<Box<dyn Read + 'static>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "opening file for reading");
        let file = fs::File::open(&resolved).map_err(|e| file_error(resolved, e))?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn create_file(&self, path: &FilePath) -> DecommentResult<Box<dyn Write>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "creating file");
        let file = fs::File::create(&resolved).map_err(|e| file_error(resolved, e))?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn remove_file(&self, path: &FilePath) -> DecommentResult<()> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "removing file");
        fs::remove_file(&resolved).map_err(|e| file_error(resolved, e))
    }

    #[instrument(skip(self), fields(from = %from, to = %to))]
    fn rename_file(&self, from: &FilePath, to: &FilePath) -> DecommentResult<()> {
        let resolved_from = self.resolve_path(from);
        let resolved_to = self.resolve_path(to);
        debug!(
            from = %resolved_from.display(),
            to = %resolved_to.display(),
            "renaming file"
        );
        fs::rename(&resolved_from, &resolved_to).map_err(|e| file_error(resolved_from, e))
    }

    fn write_stdout(&self, text: &str) -> DecommentResult<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|e| file_error(PathBuf::from("<stdout>"), e))
    }

    fn read_stdin_line(&self) -> DecommentResult<Option<String>> {
        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| file_error(PathBuf::from("<stdin>"), e))?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}
