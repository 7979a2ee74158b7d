use std::io::{Read, Write};
use std::sync::Arc;

use crate::{DecommentError, DecommentResult};

use super::file_path::FilePath;

/// Platform Abstraction Layer (PAL) trait providing filesystem and terminal operations.
///
/// Two implementations are provided:
/// - `RealPal`: Uses the real filesystem via `std::fs` and the process' standard streams
/// - `MockPal`: In-memory implementation for testing
pub trait Pal: std::fmt::Debug + Send + Sync + 'static {
    /// Check if a file exists at the given path.
    fn file_exists(&self, path: &FilePath) -> DecommentResult<bool>;

    /// Open a file for reading.
    fn read_file(&self, path: &FilePath) -> DecommentResult<Box<dyn Read + 'static>>;

    /// Read entire file contents as a UTF-8 string.
    fn read_file_to_string(&self, path: &FilePath) -> DecommentResult<String> {
        let mut reader = self.read_file(path)?;
        let mut contents = Vec::new();
        reader
            .read_to_end(&mut contents)
            .map_err(|e| Box::new(DecommentError::file_error(path.as_path(), e)))?;
        String::from_utf8(contents).map_err(|_e| crate::err!("File is not valid UTF-8: {}", path))
    }

    /// Create a new file, overwriting if it exists.
    fn create_file(&self, path: &FilePath) -> DecommentResult<Box<dyn Write>>;

    /// Remove a single file.
    fn remove_file(&self, path: &FilePath) -> DecommentResult<()>;

    /// Rename `from` to `to`, replacing `to` if it exists.
    fn rename_file(&self, from: &FilePath, to: &FilePath) -> DecommentResult<()>;

    /// Write text to standard output and flush it.
    ///
    /// The text is written in a single locked write, so concurrent callers never
    /// interleave within one call.
    fn write_stdout(&self, text: &str) -> DecommentResult<()>;

    /// Read one line from standard input, without its line terminator.
    ///
    /// Returns `Ok(None)` when standard input is at end of file.
    fn read_stdin_line(&self) -> DecommentResult<Option<String>>;
}

/* 📖 # Why use Arc<dyn Pal> with PalHandle?

Arc enables cheap cloning of the PAL implementation, so the greeter, the config loader
and the strip workflow can each hold one without lifetime parameters.
*/

/// Handle to a PAL implementation, enabling shared ownership.
///
/// # Examples
///
/// ```no_run
/// use decomment_base::{RealPal, PalHandle};
///
/// let pal = PalHandle::new(RealPal::new(".".into()));
/// let pal_clone = pal.clone(); // Cheap clone, shares the same implementation
/// ```
#[derive(Debug, Clone)]
pub struct PalHandle(Arc<dyn Pal>);

impl PalHandle {
    /// Create a new PalHandle from a Pal implementation.
    pub fn new(pal: impl Pal + 'static) -> Self {
        Self(Arc::new(pal))
    }
}

impl std::ops::Deref for PalHandle {
    type Target = dyn Pal;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
