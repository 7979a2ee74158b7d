use std::collections::{HashMap, VecDeque};
use std::io::{Cursor, Read, Write};
use std::sync::{Arc, Mutex};

use crate::{DecommentError, DecommentResult};

use super::FilePath;
use super::traits::Pal;

/* 📖 # Why use shared in-memory state for MockPal?

MockPal keeps files, captured stdout and queued stdin lines behind Arc<Mutex<..>>.
Clones share that state, so a test can hand a clone to a PalHandle and still inspect
what the code under test wrote.
*/

/// In-memory PAL implementation for testing.
///
/// # Examples
///
/// ```
/// use decomment_base::{MockPal, Pal, FilePath};
///
/// let mock = MockPal::new();
/// mock.add_file(FilePath::from("test.txt"), b"content".to_vec());
/// let content = mock.read_file_to_string(&FilePath::from("test.txt")).unwrap();
/// assert_eq!(content, "content");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockPal {
    files: Arc<Mutex<HashMap<FilePath, Vec<u8>>>>,
    stdout: Arc<Mutex<String>>,
    stdin: Arc<Mutex<VecDeque<String>>>,
    failures: Arc<Mutex<MockFailures>>,
}

/// Operations that are set to fail with an I/O error.
#[derive(Debug, Default)]
struct MockFailures {
    stdout: bool,
    rename: bool,
    remove: bool,
}

impl MockPal {
    /// Create a new empty MockPal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the mock storage.
    pub fn add_file(&self, path: FilePath, content: Vec<u8>) {
        self.files.lock().unwrap().insert(path, content);
    }

    /// Returns the current content of a file as a string, if it exists.
    pub fn file_contents(&self, path: &FilePath) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|content| String::from_utf8_lossy(content).into_owned())
    }

    /// Returns the paths of all stored files, sorted.
    pub fn file_paths(&self) -> Vec<FilePath> {
        let mut paths: Vec<FilePath> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
        paths
    }

    /// Everything written to stdout so far.
    pub fn stdout_contents(&self) -> String {
        self.stdout.lock().unwrap().clone()
    }

    /// Queue a line to be returned by `read_stdin_line`.
    pub fn push_stdin_line(&self, line: impl Into<String>) {
        self.stdin.lock().unwrap().push_back(line.into());
    }

    /// Make every following `write_stdout` fail, like a closed pipe.
    pub fn fail_stdout(&self) {
        self.failures.lock().unwrap().stdout = true;
    }

    /// Make every following `rename_file` fail without touching the files.
    pub fn fail_rename(&self) {
        self.failures.lock().unwrap().rename = true;
    }

    /// Make every following `remove_file` fail without touching the files.
    pub fn fail_remove(&self) {
        self.failures.lock().unwrap().remove = true;
    }

    fn injected_failure(path: impl Into<std::path::PathBuf>) -> Box<DecommentError> {
        Box::new(DecommentError::file_error(
            path,
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "injected failure"),
        ))
    }

    fn not_found(path: &FilePath) -> Box<DecommentError> {
        Box::new(DecommentError::file_error(
            path.as_path(),
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ),
        ))
    }
}

impl Pal for MockPal {
    fn file_exists(&self, path: &FilePath) -> DecommentResult<bool> {
        Ok(self.files.lock().unwrap().contains_key(path))
    }

    fn read_file(&self, path: &FilePath) -> DecommentResult<Box<dyn Read + 'static>> {
        let files = self.files.lock().unwrap();
        let content = files.get(path).ok_or_else(|| Self::not_found(path))?.clone();
        Ok(Box::new(Cursor::new(content)))
    }

    fn create_file(&self, path: &FilePath) -> DecommentResult<Box<dyn Write>> {
        // Return a writer that will store in the mock storage when dropped
        Ok(Box::new(MockFileWriter {
            path: path.clone(),
            files: Arc::clone(&self.files),
            buffer: Vec::new(),
        }))
    }

    fn remove_file(&self, path: &FilePath) -> DecommentResult<()> {
        if self.failures.lock().unwrap().remove {
            return Err(Self::injected_failure(path.as_path()));
        }
        match self.files.lock().unwrap().remove(path) {
            Some(_) => Ok(()),
            None => Err(Self::not_found(path)),
        }
    }

    fn rename_file(&self, from: &FilePath, to: &FilePath) -> DecommentResult<()> {
        if self.failures.lock().unwrap().rename {
            return Err(Self::injected_failure(from.as_path()));
        }
        let mut files = self.files.lock().unwrap();
        let content = files.remove(from).ok_or_else(|| Self::not_found(from))?;
        files.insert(to.clone(), content);
        Ok(())
    }

    fn write_stdout(&self, text: &str) -> DecommentResult<()> {
        if self.failures.lock().unwrap().stdout {
            return Err(Self::injected_failure("<stdout>"));
        }
        self.stdout.lock().unwrap().push_str(text);
        Ok(())
    }

    fn read_stdin_line(&self) -> DecommentResult<Option<String>> {
        Ok(self.stdin.lock().unwrap().pop_front())
    }
}

/// Helper struct for writing files to MockPal.
struct MockFileWriter {
    path: FilePath,
    files: Arc<Mutex<HashMap<FilePath, Vec<u8>>>>,
    buffer: Vec<u8>,
}

impl Write for MockFileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Drop for MockFileWriter {
    fn drop(&mut self) {
        self.files
            .lock()
            .unwrap()
            .insert(self.path.clone(), std::mem::take(&mut self.buffer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_exists() {
        let pal = MockPal::new();
        pal.add_file(FilePath::from("test.txt"), b"content".to_vec());

        assert!(pal.file_exists(&FilePath::from("test.txt")).unwrap());
        assert!(!pal.file_exists(&FilePath::from("other.txt")).unwrap());
    }

    #[test]
    fn test_read_file_not_found() {
        let pal = MockPal::new();
        let result = pal.read_file_to_string(&FilePath::from("missing.c"));
        assert!(result.unwrap_err().to_string().contains("missing.c"));
    }

    #[test]
    fn test_create_file_stores_on_drop() {
        let pal = MockPal::new();
        {
            let mut writer = pal.create_file(&FilePath::from("out.c")).unwrap();
            writer.write_all(b"int x;\n").unwrap();
        }
        assert_eq!(
            pal.file_contents(&FilePath::from("out.c")).as_deref(),
            Some("int x;\n")
        );
    }

    #[test]
    fn test_remove_file() {
        let pal = MockPal::new();
        pal.add_file(FilePath::from("a.c"), b"x".to_vec());

        pal.remove_file(&FilePath::from("a.c")).unwrap();
        assert!(!pal.file_exists(&FilePath::from("a.c")).unwrap());
        assert!(pal.remove_file(&FilePath::from("a.c")).is_err());
    }

    #[test]
    fn test_rename_file_replaces_target() {
        let pal = MockPal::new();
        pal.add_file(FilePath::from("a.c"), b"old".to_vec());
        pal.add_file(FilePath::from("a_1.c"), b"new".to_vec());

        pal.rename_file(&FilePath::from("a_1.c"), &FilePath::from("a.c"))
            .unwrap();
        assert_eq!(pal.file_paths(), vec![FilePath::from("a.c")]);
        assert_eq!(pal.file_contents(&FilePath::from("a.c")).as_deref(), Some("new"));
    }

    #[test]
    fn test_stdin_lines_are_replayed_in_order() {
        let pal = MockPal::new();
        pal.push_stdin_line("first");
        pal.push_stdin_line("second");

        assert_eq!(pal.read_stdin_line().unwrap().as_deref(), Some("first"));
        assert_eq!(pal.read_stdin_line().unwrap().as_deref(), Some("second"));
        assert_eq!(pal.read_stdin_line().unwrap(), None);
    }

    #[test]
    fn test_stdout_is_captured() {
        let pal = MockPal::new();
        pal.write_stdout("one\n").unwrap();
        pal.write_stdout("two\n").unwrap();
        assert_eq!(pal.stdout_contents(), "one\ntwo\n");
    }

    #[test]
    fn test_injected_failures_leave_state_untouched() {
        let pal = MockPal::new();
        pal.add_file(FilePath::from("a_1.c"), b"x".to_vec());
        pal.fail_stdout();
        pal.fail_rename();
        pal.fail_remove();

        let err = pal.write_stdout("lost\n").unwrap_err();
        assert!(err.to_string().contains("<stdout>"), "{err}");
        assert!(
            pal.rename_file(&FilePath::from("a_1.c"), &FilePath::from("a.c"))
                .is_err()
        );
        assert!(pal.remove_file(&FilePath::from("a_1.c")).is_err());

        assert_eq!(pal.stdout_contents(), "");
        assert_eq!(pal.file_paths(), vec![FilePath::from("a_1.c")]);
    }
}
